use rustc_hash::FxHashMap;

use crate::{constants::Weight, network::NodeIndex};

use self::shortest_path::ShortestPath;

pub mod astar;
pub mod astar_hops;
pub mod bfs;
pub mod dijkstra;
pub mod line_changes;
pub mod shortest_path;

/// Per node: best known cost and predecessor.
pub type NodeData = FxHashMap<NodeIndex, (Weight, Option<NodeIndex>)>;

/// Follows predecessors from `target` back to the node without one.
pub fn reconstruct_path(target: NodeIndex, node_data: &NodeData) -> Option<ShortestPath> {
    let weight = node_data.get(&target)?.0;
    let mut path = vec![target];

    let mut current = target;
    while let Some(prev_node) = node_data.get(&current)?.1 {
        path.push(prev_node);
        current = prev_node;
    }
    path.reverse();
    Some(ShortestPath::new(path, weight))
}

#[cfg(test)]
pub(crate) fn assert_no_path(path: Option<ShortestPath>) {
    assert_eq!(path, None);
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected_path: Vec<usize>,
    expected_weight: Weight,
    path: Option<ShortestPath>,
) {
    assert_ne!(path, None);
    let path = path.unwrap();
    let expected: Vec<NodeIndex> = expected_path
        .into_iter()
        .map(crate::network::node_index)
        .collect();
    assert_eq!(path.nodes, expected);
    approx::assert_abs_diff_eq!(path.weight, expected_weight, epsilon = 1e-9);
}
