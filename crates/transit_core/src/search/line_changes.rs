//! Search for the route with the fewest line changes.
//!
//! Partial routes are expanded in order of (changes, stations visited). Each
//! route carries the set of line groups it could still be riding on. Moving
//! to a station narrows that set to the groups both have in common; when
//! nothing is left a change is counted and the set restarts from the groups
//! of the new station. The very first hop never counts as a change.
use std::collections::BinaryHeap;

use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::{
    network::{LineGroup, Network, NodeIndex},
    statistics::SearchStats,
};

/// A change between line groups, made at `station`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeAt {
    pub station: NodeIndex,
    pub from: Vec<LineGroup>,
    pub to: Vec<LineGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChangePath {
    pub nodes: Vec<NodeIndex>,
    pub changes: Vec<ChangeAt>,
}

impl LineChangePath {
    pub fn num_changes(&self) -> usize {
        self.changes.len()
    }
}

// Partial route, linked to its parent through the label arena
#[derive(Debug)]
struct Label {
    node: NodeIndex,
    parent: Option<usize>,
    changes: usize,
    len: usize,
    active: Vec<LineGroup>,
    change: Option<ChangeAt>,
}

#[derive(Debug)]
struct Candidate {
    changes: usize,
    len: usize,
    label: usize,
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    // Labels are numbered in push order, which breaks ties
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .changes
            .cmp(&self.changes)
            .then_with(|| other.len.cmp(&self.len))
            .then_with(|| other.label.cmp(&self.label))
    }
}

/// Groups present in both sorted slices.
fn intersect(a: &[LineGroup], b: &[LineGroup]) -> Vec<LineGroup> {
    let mut common = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    common
}

pub struct LineChangeSearch<'a> {
    pub stats: SearchStats,
    g: &'a Network,
}

impl<'a> LineChangeSearch<'a> {
    pub fn new(network: &'a Network) -> Self {
        LineChangeSearch {
            g: network,
            stats: SearchStats::default(),
        }
    }

    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<LineChangePath> {
        info!("BEGIN LINE CHANGE SEARCH from {:?} to {:?}", source, target);
        self.stats.init();

        let g = self.g;
        let mut labels = vec![Label {
            node: source,
            parent: None,
            changes: 0,
            len: 1,
            active: g.station(source)?.groups.clone(),
            change: None,
        }];

        let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut queue = BinaryHeap::new();
        queue.push(Candidate {
            changes: 0,
            len: 1,
            label: 0,
        });

        let mut found = None;
        while let Some(Candidate { label: current, .. }) = queue.pop() {
            let node = labels[current].node;

            if node == target {
                found = Some(current);
                break;
            }

            if !visited.insert(node) {
                continue;
            }
            self.stats.nodes_settled += 1;

            for (_, neighbor, _) in g.neighbors(node) {
                if visited.contains(&neighbor) {
                    continue;
                }

                let parent = &labels[current];
                let neighbor_groups = &g.stations[neighbor.index()].groups;
                let common = intersect(&parent.active, neighbor_groups);

                let (changes, active, change) = if common.is_empty() && parent.len > 1 {
                    let change = ChangeAt {
                        station: node,
                        from: parent.active.clone(),
                        to: neighbor_groups.clone(),
                    };
                    (parent.changes + 1, neighbor_groups.clone(), Some(change))
                } else if common.is_empty() {
                    (parent.changes, neighbor_groups.clone(), None)
                } else {
                    (parent.changes, common, None)
                };

                let len = parent.len + 1;
                let label = labels.len();
                labels.push(Label {
                    node: neighbor,
                    parent: Some(current),
                    changes,
                    len,
                    active,
                    change,
                });
                queue.push(Candidate {
                    changes,
                    len,
                    label,
                });
            }
        }

        self.stats.finish();

        let Some(found) = found else {
            info!(
                "No path found: {:?}/{} nodes settled",
                self.stats.duration,
                self.stats.nodes_settled
            );
            return None;
        };

        let path = reconstruct(found, &labels);
        debug!("Path found: {:?}", path);
        info!("{}, line changes: {}", self.stats, path.num_changes());
        Some(path)
    }
}

fn reconstruct(found: usize, labels: &[Label]) -> LineChangePath {
    let mut nodes = Vec::new();
    let mut changes = Vec::new();

    let mut current = Some(found);
    while let Some(idx) = current {
        let label = &labels[idx];
        nodes.push(label.node);
        if let Some(change) = &label.change {
            changes.push(change.clone());
        }
        current = label.parent;
    }

    nodes.reverse();
    changes.reverse();
    LineChangePath { nodes, changes }
}
