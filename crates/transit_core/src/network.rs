use crate::constants::Weight;
use crate::records::Coordinate;
use anyhow::Context;
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default integer type for station, line and segment handles
pub type DefaultIdx = u32;

/// Station identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct NodeIndex(DefaultIdx);

impl NodeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn end() -> Self {
        NodeIndex(DefaultIdx::MAX)
    }
}

impl From<DefaultIdx> for NodeIndex {
    fn from(ix: DefaultIdx) -> Self {
        NodeIndex(ix)
    }
}

/// Short version of `NodeIndex::new`
pub fn node_index(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Segment identifier.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize,
)]
pub struct SegmentIndex(DefaultIdx);

impl SegmentIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        SegmentIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn end() -> Self {
        SegmentIndex(DefaultIdx::MAX)
    }
}

/// Line identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct LineIndex(DefaultIdx);

impl LineIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        LineIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lines sharing a group name count as one line when changes are counted,
/// e.g. the branches of a line that splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct LineGroup(DefaultIdx);

impl LineGroup {
    #[inline]
    pub fn new(x: usize) -> Self {
        LineGroup(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub coordinate: Option<Coordinate>,
    /// Lines serving this station, in the order the record listed them
    pub lines: Vec<LineIndex>,
    /// Sorted, deduplicated groups of `lines`
    pub groups: Vec<LineGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub name: String,
    pub color: Option<String>,
    pub group: LineGroup,
    /// Member stations in running order
    pub stations: Vec<NodeIndex>,
}

/// Undirected connection between two stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub source: NodeIndex,
    pub target: NodeIndex,
    /// Line that created the adjacency
    pub line: LineIndex,
    pub weight: Weight,
}

impl Segment {
    /// The endpoint that is not `node`.
    #[inline]
    pub fn opposite(&self, node: NodeIndex) -> NodeIndex {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// Stations, lines and segments of a transit network.
///
/// A `Network` is only mutable while a [`NetworkBuilder`] owns it. Once
/// handed out it is read-only and can be shared between any number of
/// concurrent queries.
///
/// [`NetworkBuilder`]: crate::builder::NetworkBuilder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    pub(crate) stations: Vec<Station>,
    pub(crate) lines: Vec<Line>,
    pub(crate) segments: Vec<Segment>,
    pub(crate) adjacency: Vec<Vec<SegmentIndex>>,
    pub(crate) distances: FxHashMap<(NodeIndex, NodeIndex), Weight>,
    pub(crate) line_groups: Vec<String>,
    pub(crate) station_by_name: FxHashMap<String, NodeIndex>,
    pub(crate) stations_by_folded_name: FxHashMap<String, Vec<NodeIndex>>,
    pub(crate) line_by_name: FxHashMap<String, LineIndex>,
    group_by_name: FxHashMap<String, LineGroup>,
}

impl Network {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn station(&self, node: NodeIndex) -> Option<&Station> {
        self.stations.get(node.index())
    }

    /// Returns an iterator over all stations in insertion order
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn line(&self, line: LineIndex) -> Option<&Line> {
        self.lines.get(line.index())
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn segment(&self, segment: SegmentIndex) -> Option<&Segment> {
        self.segments.get(segment.index())
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn group_name(&self, group: LineGroup) -> &str {
        &self.line_groups[group.index()]
    }

    /// Exact, case-sensitive lookup.
    pub fn station_index(&self, name: &str) -> Option<NodeIndex> {
        self.station_by_name.get(name).copied()
    }

    /// All stations whose lowercased name equals `name` lowercased.
    pub fn stations_named_ignore_case(&self, name: &str) -> &[NodeIndex] {
        self.stations_by_folded_name
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn line_index(&self, name: &str) -> Option<LineIndex> {
        self.line_by_name.get(name).copied()
    }

    /// Weight of the segment between `a` and `b`, in either direction.
    pub fn distance(&self, a: NodeIndex, b: NodeIndex) -> Option<Weight> {
        self.distances.get(&(a, b)).copied()
    }

    pub fn are_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.distances.contains_key(&(a, b))
    }

    /// Neighbouring stations of `node` together with the connecting segment,
    /// in the order the segments were created.
    pub fn neighbors(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (SegmentIndex, NodeIndex, Weight)> + '_ {
        self.adjacency[node.index()].iter().map(move |segment_idx| {
            let segment = &self.segments[segment_idx.index()];
            (*segment_idx, segment.opposite(node), segment.weight)
        })
    }

    pub fn degree(&self, node: NodeIndex) -> usize {
        self.adjacency[node.index()].len()
    }

    /// Names of the given stations, in order.
    pub fn station_names(&self, nodes: &[NodeIndex]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| self.stations[node.index()].name.clone())
            .collect()
    }

    pub fn group_names(&self, groups: &[LineGroup]) -> Vec<String> {
        groups
            .iter()
            .map(|group| self.group_name(*group).to_string())
            .collect()
    }

    pub(crate) fn intern_group(&mut self, name: &str) -> LineGroup {
        if let Some(group) = self.group_by_name.get(name) {
            return *group;
        }
        let group = LineGroup::new(self.line_groups.len());
        self.line_groups.push(name.to_string());
        self.group_by_name.insert(name.to_string(), group);
        group
    }

    pub fn print_info(&self) {
        println!(
            "Network:\t#Stations: {}, #Lines: {}, #Segments: {}",
            self.stations.len(),
            self.lines.len(),
            self.segments.len()
        );
    }

    /// Writes `stations.csv` and `segments.csv` into `dir`.
    pub fn export_csv(&self, dir: &Path) -> anyhow::Result<()> {
        let stations_path = dir.join("stations.csv");
        let mut wtr = csv::Writer::from_path(&stations_path)
            .with_context(|| format!("Could not create {}", stations_path.display()))?;
        wtr.write_record(["name", "lat", "lon", "lines"])?;

        debug!("BEGIN writing stations");
        for station in self.stations() {
            let (lat, lon) = match station.coordinate {
                Some(c) => (c.lat.to_string(), c.lon.to_string()),
                None => (String::new(), String::new()),
            };
            let lines = station
                .lines
                .iter()
                .map(|line| self.lines[line.index()].name.as_str())
                .collect::<Vec<_>>()
                .join(";");
            wtr.write_record([station.name.as_str(), &lat, &lon, &lines])?;
        }
        wtr.flush()?;
        debug!("FINISHED writing stations");

        let segments_path = dir.join("segments.csv");
        let mut wtr = csv::Writer::from_path(&segments_path)
            .with_context(|| format!("Could not create {}", segments_path.display()))?;
        wtr.write_record(["source", "target", "line", "weight"])?;

        debug!("BEGIN writing segments");
        for segment in self.segments() {
            wtr.write_record([
                self.stations[segment.source.index()].name.as_str(),
                self.stations[segment.target.index()].name.as_str(),
                self.lines[segment.line.index()].name.as_str(),
                &segment.weight.to_string(),
            ])?;
        }
        wtr.flush()?;
        debug!("FINISHED writing segments");
        Ok(())
    }
}
