mod edge;
mod node;
mod view;

pub use edge::GraphEdge;
pub use node::{GraphNode, NodeKind, Position, ScalarProperty, Size};
pub use view::{LayoutDirection, SHOW_ALL_LEVEL, SizeMode};

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Node/edge set built from one JSON document plus its transient view state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Outgoing structural neighbours per node, in edge order.
    pub fn children(&self) -> HashMap<&str, Vec<&str>> {
        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &self.edges {
            children
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
        children
    }

    /// Nodes with no incoming edge.
    pub fn roots(&self) -> Vec<&GraphNode> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.target.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !targets.contains(n.id.as_str()))
            .collect()
    }

    pub fn visible_nodes(&self) -> Vec<GraphNode> {
        self.nodes.iter().filter(|n| !n.hidden).cloned().collect()
    }

    pub fn visible_edges(&self) -> Vec<GraphEdge> {
        self.edges.iter().filter(|e| !e.hidden).cloned().collect()
    }

    pub fn hidden_ids(&self) -> HashSet<String> {
        self.nodes
            .iter()
            .filter(|n| n.hidden)
            .map(|n| n.id.clone())
            .collect()
    }

    /// Copy positions and sizes from laid-out nodes onto matching nodes.
    pub fn apply_positions(&mut self, positioned: &[GraphNode]) {
        let by_id: HashMap<&str, &GraphNode> =
            positioned.iter().map(|n| (n.id.as_str(), n)).collect();
        for node in &mut self.nodes {
            if let Some(laid_out) = by_id.get(node.id.as_str()) {
                node.position = laid_out.position;
                node.size = laid_out.size;
            }
        }
    }
}
