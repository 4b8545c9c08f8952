use crate::{constants::Weight, network::NodeIndex};

#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<NodeIndex>,
    /// Distance for weighted searches, number of hops for the others
    pub weight: Weight,
}

impl ShortestPath {
    pub fn new(nodes: Vec<NodeIndex>, weight: Weight) -> Self {
        ShortestPath { nodes, weight }
    }

    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}
