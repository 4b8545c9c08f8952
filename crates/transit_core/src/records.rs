//! Input records handed over by the parsing layer.
//!
//! The records mirror what a map export provides: a list of lines and a list
//! of stations, each station naming the lines it is served by. Names are the
//! only identifiers, handles are assigned once the records are turned into a
//! [`Network`](crate::network::Network).
use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LineRecord {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Station names in running order. May be empty, in which case the
    /// station input order is used.
    #[serde(default)]
    pub stations: Vec<String>,
}

impl LineRecord {
    pub fn new(name: impl Into<String>) -> Self {
        LineRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn stations<S: Into<String>>(mut self, stations: impl IntoIterator<Item = S>) -> Self {
        self.stations = stations.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StationRecord {
    pub name: String,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl StationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        StationRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.coordinate = Some(Coordinate::new(lat, lon));
        self
    }

    pub fn lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Macro to create a station record with a name, lines and an optional position
///
/// station!("Bank", ["Central", "Northern"])
///
/// station!("Bank", ["Central"], 51.5133, -0.0886)
#[macro_export]
macro_rules! station {
    ($name:expr, [$($line:expr),* $(,)?]) => {
        $crate::records::StationRecord::new($name)
            .lines::<::std::string::String>([$(::std::string::String::from($line)),*])
    };
    ($name:expr, [$($line:expr),* $(,)?], $lat:expr, $lon:expr) => {
        $crate::records::StationRecord::new($name)
            .lines::<::std::string::String>([$(::std::string::String::from($line)),*])
            .at($lat, $lon)
    };
}
