//! Re-exports of the most commonly used items in `transit_core`.
pub use crate::builder::{build, build_with_params, NetworkBuilder};
pub use crate::error::{BuildError, NotFound, QueryError, Side};
pub use crate::params::{BuildParams, SearchParams};
pub use crate::query::{find_fewest_line_changes, find_fewest_stops, find_shortest_distance, Router};
pub use crate::records::{Coordinate, LineRecord, StationRecord};
pub use crate::result::{LineChange, Metric, PathResult, Route};

pub use crate::search;

pub use crate::network::node_index;
pub use crate::network::Network;
