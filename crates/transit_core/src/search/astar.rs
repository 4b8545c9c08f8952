//! Implementation of the A* search algorithm on segment distances.
//!
//! The heuristic in use ([`straight_line`](crate::util::math::straight_line))
//! measures raw coordinate units while segments are weighted in kilometers,
//! so optimality is not guaranteed in general. Results match Dijkstra
//! whenever the heuristic happens to be admissible for the network at hand.
use std::collections::BinaryHeap;

use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::Weight,
    network::{Network, NodeIndex, Station},
    statistics::SearchStats,
};

use super::{shortest_path::ShortestPath, NodeData};

#[derive(Debug)]
struct Candidate {
    node: NodeIndex,
    real_weight: Weight,
    tentative_weight: Weight,
    seq: usize,
}

impl Candidate {
    fn new(node: NodeIndex, real_weight: Weight, estimated_weight: Weight, seq: usize) -> Self {
        Self {
            node,
            real_weight,
            tentative_weight: estimated_weight,
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
            .tentative_weight
            .total_cmp(&self.tentative_weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct AStar<'a> {
    pub stats: SearchStats,
    pub nodes_settled: FxHashSet<NodeIndex>,
    g: &'a Network,
}

impl<'a> AStar<'a> {
    pub fn new(g: &'a Network) -> Self {
        AStar {
            g,
            stats: SearchStats::default(),
            nodes_settled: FxHashSet::default(),
        }
    }

    pub fn search(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        heuristic: impl Fn(&Station, &Station) -> Weight,
    ) -> Option<ShortestPath> {
        info!("BEGIN ASTAR SEARCH from {:?} to {:?}", source, target);
        self.stats.init();
        self.nodes_settled.clear();

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0));
        }

        let g = self.g;
        let target_station = g.station(target)?;
        let estimate = |node: NodeIndex| match g.station(node) {
            Some(station) => heuristic(station, target_station),
            None => 0.0,
        };

        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = BinaryHeap::new();
        let mut seq = 0;

        queue.push(Candidate::new(source, 0.0, estimate(source), seq));

        while let Some(Candidate {
            real_weight, node, ..
        }) = queue.pop()
        {
            if !self.nodes_settled.insert(node) {
                continue;
            }
            self.stats.nodes_settled += 1;

            if node == target {
                break;
            }

            for (_, neighbor, segment_weight) in g.neighbors(node) {
                if self.nodes_settled.contains(&neighbor) {
                    continue;
                }

                let real_weight = real_weight + segment_weight;

                if real_weight
                    < node_data
                        .get(&neighbor)
                        .unwrap_or(&(f64::INFINITY, None))
                        .0
                {
                    let tentative_weight = real_weight + estimate(neighbor);

                    node_data.insert(neighbor, (real_weight, Some(node)));
                    seq += 1;
                    queue.push(Candidate::new(neighbor, real_weight, tentative_weight, seq));
                }
            }
        }

        self.stats.finish();

        if let Some(sp) = super::reconstruct_path(target, &node_data) {
            debug!("Path found: {:?}", sp);
            info!("{}, weight: {}", self.stats, sp.weight);

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

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        network::node_index,
        search::{assert_no_path, assert_path, dijkstra::Dijkstra},
        util::{
            math::straight_line,
            test_networks::{chain_with_shortcut, disconnected_network, grid_network},
        },
    };

    use super::*;

    fn null_heuristic(_: &Station, _: &Station) -> Weight {
        0.0
    }

    #[test]
    fn chain_with_shortcut_path() {
        let g = chain_with_shortcut();
        let mut astar = AStar::new(&g);

        assert_path(
            vec![0, 1, 2, 3],
            10.0,
            astar.search(0.into(), 3.into(), null_heuristic),
        );
        // No coordinates, the straight line heuristic degrades to zero
        assert_path(
            vec![0, 1, 2, 3],
            10.0,
            astar.search(0.into(), 3.into(), straight_line),
        );
        assert_path(vec![2], 0.0, astar.search(2.into(), 2.into(), straight_line));
    }

    #[test]
    fn disconnected() {
        let g = disconnected_network();
        let mut astar = AStar::new(&g);

        assert_no_path(astar.search(0.into(), 1.into(), null_heuristic));
        assert_no_path(astar.search(1.into(), 0.into(), straight_line));
    }

    #[test]
    fn agrees_with_dijkstra_on_grid() {
        let g = grid_network(5);
        let n = g.num_stations();

        let mut runner = proptest::test_runner::TestRunner::default();
        runner
            .run(&(0..n, 0..n), |(s, t)| {
                let mut dijkstra = Dijkstra::new(&g);
                let mut astar = AStar::new(&g);
                let expected = dijkstra.search(node_index(s), node_index(t)).unwrap();
                let actual = astar
                    .search(node_index(s), node_index(t), straight_line)
                    .unwrap();
                assert_abs_diff_eq!(expected.weight, actual.weight, epsilon = 1e-9);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn settles_fewer_nodes_than_dijkstra() {
        let g = grid_network(6);
        let target = node_index(g.num_stations() - 1);

        let mut dijkstra = Dijkstra::new(&g);
        dijkstra.search(0.into(), target);

        let mut astar = AStar::new(&g);
        astar.search(0.into(), target, |a, b| straight_line(a, b) * 111.0);

        assert!(astar.stats.nodes_settled <= dijkstra.stats.nodes_settled);
    }
}
