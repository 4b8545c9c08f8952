use std::collections::BinaryHeap;

use crate::constants::Weight;
use crate::network::*;
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;
use log::{debug, info};
use rustc_hash::FxHashMap;

use super::NodeData;

/// Frontier entry. Lower weight pops first, equal weights pop in push order.
#[derive(Debug)]
pub(crate) struct Candidate {
    pub(crate) node_idx: NodeIndex,
    pub(crate) weight: Weight,
    seq: usize,
}

impl Candidate {
    pub(crate) fn new(node_idx: NodeIndex, weight: Weight, seq: usize) -> Self {
        Self {
            node_idx,
            weight,
            seq,
        }
    }
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
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Network,
}

impl<'a> Dijkstra<'a> {
    pub fn new(network: &'a Network) -> Self {
        Dijkstra {
            g: network,
            stats: SearchStats::default(),
        }
    }

    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        info!("BEGIN DIJKSTRA SEARCH from {:?} to {:?}", source, target);
        self.stats.init();

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0));
        }

        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = BinaryHeap::new();
        let mut seq = 0;

        queue.push(Candidate::new(source, 0.0, seq));

        while let Some(Candidate {
            weight, node_idx, ..
        }) = queue.pop()
        {
            // Outdated entry, the node was reached cheaper in the meantime
            if node_data
                .get(&node_idx)
                .is_some_and(|(best, _)| weight > *best)
            {
                continue;
            }

            self.stats.nodes_settled += 1;

            if node_idx == target {
                break;
            }

            for (_, neighbor, segment_weight) in self.g.neighbors(node_idx) {
                let new_distance = weight + segment_weight;
                if new_distance
                    < node_data
                        .get(&neighbor)
                        .unwrap_or(&(f64::INFINITY, None))
                        .0
                {
                    node_data.insert(neighbor, (new_distance, Some(node_idx)));
                    seq += 1;
                    queue.push(Candidate::new(neighbor, new_distance, seq));
                }
            }
        }
        self.stats.finish();

        let sp = super::reconstruct_path(target, &node_data);
        if let Some(sp) = &sp {
            debug!("Path found: {:?}", sp);
            info!("{}, weight: {}", self.stats, sp.weight);
        } else {
            info!(
                "No path found: {:?}/{} nodes settled",
                self.stats.duration,
                self.stats.nodes_settled
            );
        }

        sp
    }
}
