//! Construction of a [`Network`] from line and station records.
//!
//! Segments are derived from line membership: every station is connected to
//! its predecessor and successor on each line serving it. A line's running
//! order is the order of its stations in the station input. The station list
//! of a line record is only consulted if
//! [`BuildParams::use_line_station_order`] is set. No geographic sorting is
//! done, so the input order has to reflect the real topology.
//!
//! # Examples
//! ```
//! use transit_core::{builder, station, records::LineRecord};
//!
//! let lines = vec![LineRecord::new("Victoria")];
//! let stations = vec![
//!     station!("Warren Street", ["Victoria"], 51.5247, -0.1384),
//!     station!("Oxford Circus", ["Victoria"], 51.5152, -0.1419),
//! ];
//!
//! let network = builder::build(&lines, &stations).unwrap();
//! assert_eq!(network.num_segments(), 1);
//! ```
use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::{
    constants::Weight,
    error::BuildError,
    network::{
        node_index, Line, LineIndex, Network, NodeIndex, Segment, SegmentIndex, Station,
    },
    params::BuildParams,
    records::{Coordinate, LineRecord, StationRecord},
    util::math::distance_km,
};

/// Builds a network from records with default parameters.
pub fn build(lines: &[LineRecord], stations: &[StationRecord]) -> Result<Network, BuildError> {
    build_with_params(lines, stations, BuildParams::default())
}

pub fn build_with_params(
    lines: &[LineRecord],
    stations: &[StationRecord],
    params: BuildParams,
) -> Result<Network, BuildError> {
    info!(
        "BEGIN building network from {} lines and {} stations",
        lines.len(),
        stations.len()
    );

    let mut builder = NetworkBuilder::with_params(params);

    let mut orders = Vec::new();
    for record in lines {
        let name = record.name.trim();
        if name.is_empty() {
            warn!("Skipping line record without a name");
            continue;
        }
        let line = builder.add_line(name, record.color.as_deref())?;
        orders.push((line, &record.stations));
    }

    for record in stations {
        let name = record.name.trim();
        if name.is_empty() {
            warn!("Skipping station record without a name");
            continue;
        }

        let mut station_lines = Vec::with_capacity(record.lines.len());
        for line_name in &record.lines {
            let line_name = line_name.trim();
            if line_name.is_empty() {
                warn!("Station {} lists a line without a name", name);
                continue;
            }
            match builder.network.line_index(line_name) {
                Some(line) => station_lines.push(line),
                None => warn!("Station {} references unknown line {}", name, line_name),
            }
        }

        builder.add_station(name, record.coordinate, &station_lines)?;
    }

    if builder.params.use_line_station_order {
        for (line, order) in orders {
            if !order.is_empty() {
                builder.order_line(line, order.as_slice());
            }
        }
    }

    builder.connect_line_neighbours();

    let network = builder.finish();
    info!(
        "FINISHED building network: {} stations, {} lines, {} segments",
        network.num_stations(),
        network.lines.len(),
        network.num_segments()
    );
    Ok(network)
}

/// Owns a [`Network`] while it is being assembled.
///
/// Besides the record based [`build`], the builder can be driven directly,
/// which is handy when segment weights are known up front.
pub struct NetworkBuilder {
    network: Network,
    params: BuildParams,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::with_params(BuildParams::default())
    }

    pub fn with_params(params: BuildParams) -> Self {
        NetworkBuilder {
            network: Network::new(),
            params,
        }
    }

    pub fn add_line(&mut self, name: &str, color: Option<&str>) -> Result<LineIndex, BuildError> {
        if name.trim().is_empty() {
            return Err(BuildError::MissingName("line"));
        }
        if self.network.line_by_name.contains_key(name) {
            return Err(BuildError::DuplicateLine(name.to_string()));
        }

        let line_idx = LineIndex::new(self.network.lines.len());
        let group = self.network.intern_group(self.params.group_of(name));

        self.network.lines.push(Line {
            name: name.to_string(),
            color: color.map(str::to_string),
            group,
            stations: Vec::new(),
        });
        self.network.line_by_name.insert(name.to_string(), line_idx);

        Ok(line_idx)
    }

    /// Adds a station served by `lines`. The station is appended to the
    /// running order of each of them.
    ///
    /// **Panics** if a line index does not exist
    pub fn add_station(
        &mut self,
        name: &str,
        coordinate: Option<Coordinate>,
        lines: &[LineIndex],
    ) -> Result<NodeIndex, BuildError> {
        if name.trim().is_empty() {
            return Err(BuildError::MissingName("station"));
        }
        if self.network.station_by_name.contains_key(name) {
            return Err(BuildError::DuplicateStation(name.to_string()));
        }

        let node_idx = node_index(self.network.stations.len());
        assert!(
            NodeIndex::end() != node_idx,
            "Maximum number of stations exceeded"
        );

        let mut station_lines: Vec<LineIndex> = Vec::with_capacity(lines.len());
        for line in lines {
            assert!(
                line.index() < self.network.lines.len(),
                "Line index ({}) does not exist",
                line.index()
            );
            if !station_lines.contains(line) {
                station_lines.push(*line);
            }
        }

        let mut groups: Vec<_> = station_lines
            .iter()
            .map(|line| self.network.lines[line.index()].group)
            .collect();
        groups.sort_unstable();
        groups.dedup();

        for line in &station_lines {
            self.network.lines[line.index()].stations.push(node_idx);
        }

        self.network.stations.push(Station {
            name: name.to_string(),
            coordinate,
            lines: station_lines,
            groups,
        });
        self.network.adjacency.push(Vec::new());
        self.network
            .station_by_name
            .insert(name.to_string(), node_idx);
        self.network
            .stations_by_folded_name
            .entry(name.to_lowercase())
            .or_default()
            .push(node_idx);

        Ok(node_idx)
    }

    /// Connects `a` and `b` with a segment created by `line`.
    ///
    /// Returns `None` without touching the network if the stations are
    /// already connected, in either direction, if `a == b` or if `weight` is
    /// negative or not finite.
    ///
    /// **Panics** if a station or the line does not exist
    pub fn connect(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        line: LineIndex,
        weight: Weight,
    ) -> Option<SegmentIndex> {
        assert!(
            a.index() < self.network.stations.len(),
            "Source station index ({}) does not exist",
            a.index()
        );
        assert!(
            b.index() < self.network.stations.len(),
            "Target station index ({}) does not exist",
            b.index()
        );
        assert!(
            line.index() < self.network.lines.len(),
            "Line index ({}) does not exist",
            line.index()
        );

        if !(weight.is_finite() && weight >= 0.0) {
            warn!(
                "Ignoring segment {} - {} with invalid weight {}",
                self.network.stations[a.index()].name,
                self.network.stations[b.index()].name,
                weight
            );
            return None;
        }
        if a == b {
            debug!("Ignoring self-loop at {}", self.network.stations[a.index()].name);
            return None;
        }
        if self.network.are_adjacent(a, b) {
            return None;
        }

        let segment_idx = SegmentIndex::new(self.network.segments.len());
        assert!(
            SegmentIndex::end() != segment_idx,
            "Maximum number of segments exceeded"
        );

        self.network.segments.push(Segment {
            source: a,
            target: b,
            line,
            weight,
        });
        self.network.adjacency[a.index()].push(segment_idx);
        self.network.adjacency[b.index()].push(segment_idx);
        self.network.distances.insert((a, b), weight);
        self.network.distances.insert((b, a), weight);

        Some(segment_idx)
    }

    /// Reorders the members of `line` by their position in `order`. Members
    /// missing from `order` keep their relative order behind the listed ones.
    pub fn order_line<S: AsRef<str>>(&mut self, line: LineIndex, order: &[S]) {
        let mut position: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, name) in order.iter().enumerate() {
            position.entry(name.as_ref().trim()).or_insert(i);
        }

        let mut members = std::mem::take(&mut self.network.lines[line.index()].stations);
        members.sort_by_key(|node| {
            position
                .get(self.network.stations[node.index()].name.as_str())
                .copied()
                .unwrap_or(usize::MAX)
        });
        self.network.lines[line.index()].stations = members;
    }

    /// Connects every station to its neighbours on each of its lines and
    /// returns the number of segments created.
    pub fn connect_line_neighbours(&mut self) -> usize {
        let mut created = 0;

        for node in 0..self.network.stations.len() {
            let node = node_index(node);
            let lines = self.network.stations[node.index()].lines.clone();

            for line in lines {
                let members = &self.network.lines[line.index()].stations;
                let Some(pos) = members.iter().position(|member| *member == node) else {
                    continue;
                };

                let mut adjacent = Vec::with_capacity(2);
                if pos > 0 {
                    adjacent.push(members[pos - 1]);
                }
                if let Some(next) = members.get(pos + 1) {
                    adjacent.push(*next);
                }

                for other in adjacent {
                    let weight = self.segment_weight(node, other);
                    if self.connect(node, other, line, weight).is_some() {
                        created += 1;
                    }
                }
            }
        }

        debug!("Created {} segments from line order", created);
        created
    }

    fn segment_weight(&self, a: NodeIndex, b: NodeIndex) -> Weight {
        let a = &self.network.stations[a.index()];
        let b = &self.network.stations[b.index()];
        match (&a.coordinate, &b.coordinate) {
            (Some(from), Some(to)) => distance_km(from, to),
            _ => self.params.fallback_weight,
        }
    }

    pub fn finish(self) -> Network {
        self.network
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
