//! A* on hop counts.
//!
//! The heuristic distance is scaled and truncated to whole hops before it is
//! added to the number of hops travelled so far. The frontier supports
//! decrease-key, so each station is queued at most once.
use std::cmp::Reverse;

use log::{debug, info};
use priority_queue::PriorityQueue;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::{Weight, HOP_HEURISTIC_SCALE},
    network::{Network, NodeIndex, Station},
    statistics::SearchStats,
};

use super::{shortest_path::ShortestPath, NodeData};

pub struct HopAStar<'a> {
    pub stats: SearchStats,
    g: &'a Network,
    scale: f64,
}

impl<'a> HopAStar<'a> {
    pub fn new(g: &'a Network) -> Self {
        Self::with_scale(g, HOP_HEURISTIC_SCALE)
    }

    pub fn with_scale(g: &'a Network, scale: f64) -> Self {
        HopAStar {
            g,
            scale,
            stats: SearchStats::default(),
        }
    }

    pub fn search(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        heuristic: impl Fn(&Station, &Station) -> Weight,
    ) -> Option<ShortestPath> {
        info!("BEGIN HOP ASTAR SEARCH from {:?} to {:?}", source, target);
        self.stats.init();

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0));
        }

        let g = self.g;
        let scale = self.scale;
        let target_station = g.station(target)?;
        // Truncation towards zero is intended, NaN ends up as 0
        let estimate = |node: NodeIndex| -> usize {
            match g.station(node) {
                Some(station) => (heuristic(station, target_station) * scale) as usize,
                None => 0,
            }
        };

        // Hop counts are stored as weights to share path reconstruction
        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut closed: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut queue: PriorityQueue<NodeIndex, Reverse<(usize, usize)>> = PriorityQueue::new();
        let mut seq = 0;

        queue.push(source, Reverse((estimate(source), seq)));

        while let Some((node, _)) = queue.pop() {
            self.stats.nodes_settled += 1;

            if node == target {
                break;
            }

            closed.insert(node);
            let hops = node_data[&node].0 as usize;

            for (_, neighbor, _) in g.neighbors(node) {
                if closed.contains(&neighbor) {
                    continue;
                }

                let tentative_hops = hops + 1;
                let known = node_data
                    .get(&neighbor)
                    .map_or(usize::MAX, |(h, _)| *h as usize);

                if tentative_hops < known {
                    node_data.insert(neighbor, (tentative_hops as Weight, Some(node)));
                    seq += 1;
                    // Updates the priority if the neighbor is queued already
                    queue.push(
                        neighbor,
                        Reverse((tentative_hops + estimate(neighbor), seq)),
                    );
                }
            }
        }

        self.stats.finish();

        if let Some(sp) = super::reconstruct_path(target, &node_data) {
            debug!("Path found: {:?}", sp);
            info!("{}, hops: {}", self.stats, sp.hops());
            Some(sp)
        } else {
            info!(
                "No path found: {:?}/{} nodes settled",
                self.stats.duration,
                self.stats.nodes_settled
            );
            None
        }
    }
}
