//! Route planning over public transit networks.
//!
//! A [`Network`] is built once from line and station records and then
//! answers three kinds of queries: shortest distance, fewest stops and
//! fewest line changes. Distance and stop queries can optionally be guided
//! by an A* heuristic.
//!
//! # Basic usage
//! ```
//! use transit_core::{build_network, query, records::LineRecord, station};
//!
//! let lines = vec![LineRecord::new("Victoria")];
//! let stations = vec![
//!     station!("Green Park", ["Victoria"], 51.5067, -0.1428),
//!     station!("Oxford Circus", ["Victoria"], 51.5152, -0.1419),
//!     station!("Warren Street", ["Victoria"], 51.5247, -0.1384),
//! ];
//!
//! // Build the network
//! let network = build_network(&lines, &stations).expect("valid records");
//!
//! // Ask for the shortest route, without A*
//! let result = query::find_shortest_distance(&network, "Green Park", "Warren Street", false)
//!     .expect("valid arguments");
//!
//! assert_eq!(
//!     result.route().unwrap().stations,
//!     vec!["Green Park", "Oxford Circus", "Warren Street"]
//! );
//!```
//! [`Network`]: crate::network::Network
pub mod builder;
pub mod constants;
pub mod error;
pub mod network;
pub mod params;
pub mod prelude;
pub mod query;
pub mod records;
pub mod result;
pub mod search;
pub mod statistics;
pub mod util;

pub use builder::build as build_network;
