//! Error and outcome types.
//!
//! Only [`BuildError`] and [`QueryError`] are errors in the `Result` sense.
//! A query that cannot be answered because of the state of the network
//! (unknown station, disconnected stations) reports a [`NotFound`] instead,
//! which callers are expected to present as a normal message.
use std::fmt;

use serde::Serialize;

/// Which end of a query a name was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// Structural problems in the records a network is built from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("duplicate station name '{0}'")]
    DuplicateStation(String),

    #[error("duplicate line name '{0}'")]
    DuplicateLine(String),

    /// Only raised by the low-level builder API, the record path skips
    /// nameless records instead.
    #[error("{0} name must not be empty")]
    MissingName(&'static str),
}

/// Invalid query arguments, rejected before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("{side} station name must not be empty")]
    EmptyStationName { side: Side },

    #[error("source and destination are the same station '{name}'")]
    SameStation { name: String },
}

/// Why a query produced no route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum NotFound {
    #[error("the network has no stations")]
    EmptyNetwork,

    /// Each side is `Some(name)` if that name did not resolve.
    #[error("{}", unknown_station_message(.from, .to))]
    UnknownStation {
        from: Option<String>,
        to: Option<String>,
    },

    #[error("{side} station '{name}' is ambiguous, candidates: {}", .candidates.join(", "))]
    AmbiguousStation {
        side: Side,
        name: String,
        candidates: Vec<String>,
    },

    #[error("no path found between {from} and {to}")]
    NoPath { from: String, to: String },
}

fn unknown_station_message(from: &Option<String>, to: &Option<String>) -> String {
    match (from, to) {
        (Some(s), Some(d)) => format!("unknown source station '{s}' and destination station '{d}'"),
        (Some(s), None) => format!("unknown source station '{s}'"),
        (None, Some(d)) => format!("unknown destination station '{d}'"),
        (None, None) => "unknown station".to_string(),
    }
}
