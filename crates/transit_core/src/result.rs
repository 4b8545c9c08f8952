//! Query outcomes as handed to the presentation layer.
use std::fmt;

use serde::Serialize;

use crate::error::NotFound;

/// What a route was optimized for, together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Metric {
    /// Kilometers
    Distance(f64),
    Stops(usize),
    LineChanges(usize),
}

impl Metric {
    pub fn value(&self) -> f64 {
        match *self {
            Metric::Distance(km) => km,
            Metric::Stops(stops) => stops as f64,
            Metric::LineChanges(changes) => changes as f64,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Distance(km) => write!(f, "{km:.2} km"),
            Metric::Stops(stops) => write!(f, "{stops} stops"),
            Metric::LineChanges(changes) => write!(f, "{changes} line changes"),
        }
    }
}

/// Where a traveller has to change, and between which lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    pub station: String,
    pub from_lines: Vec<String>,
    pub to_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Station names from source to destination, both included
    pub stations: Vec<String>,
    pub metric: Metric,
    /// Only set for fewest line change queries
    pub line_changes: Option<Vec<LineChange>>,
}

impl Route {
    pub fn stops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.stations.join(" -> "), self.metric)?;
        for change in self.line_changes.iter().flatten() {
            write!(
                f,
                "\n  change at {}: {} -> {}",
                change.station,
                change.from_lines.join(", "),
                change.to_lines.join(", ")
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PathResult {
    Found(Route),
    NotFound(NotFound),
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            PathResult::Found(route) => Some(route),
            PathResult::NotFound(_) => None,
        }
    }

    pub fn not_found(&self) -> Option<&NotFound> {
        match self {
            PathResult::Found(_) => None,
            PathResult::NotFound(reason) => Some(reason),
        }
    }
}

impl From<NotFound> for PathResult {
    fn from(reason: NotFound) -> Self {
        PathResult::NotFound(reason)
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathResult::Found(route) => write!(f, "{route}"),
            PathResult::NotFound(reason) => write!(f, "{reason}"),
        }
    }
}
