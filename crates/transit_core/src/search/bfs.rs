use std::collections::VecDeque;

use crate::network::*;
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;
use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use super::NodeData;

/// Breadth-first search, finds a path with the fewest segments.
pub struct Bfs<'a> {
    pub stats: SearchStats,
    g: &'a Network,
}

impl<'a> Bfs<'a> {
    pub fn new(network: &'a Network) -> Self {
        Bfs {
            g: network,
            stats: SearchStats::default(),
        }
    }

    /// The weight of the returned path is its hop count.
    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        info!("BEGIN BFS SEARCH from {:?} to {:?}", source, target);
        self.stats.init();

        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
        visited.insert(source);

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            self.stats.nodes_settled += 1;

            if node == target {
                break;
            }

            let hops = node_data[&node].0;
            for (_, neighbor, _) in self.g.neighbors(node) {
                if visited.insert(neighbor) {
                    node_data.insert(neighbor, (hops + 1.0, Some(node)));
                    queue.push_back(neighbor);
                }
            }
        }
        self.stats.finish();

        let sp = super::reconstruct_path(target, &node_data);
        if let Some(sp) = &sp {
            debug!("Path found: {:?}", sp);
            info!("{}, hops: {}", self.stats, sp.hops());
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
