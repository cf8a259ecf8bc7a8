use serde::{Deserialize, Serialize};

/// Parent to child structural relation between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub hidden: bool,
    /// Touches the selected node.
    pub highlighted: bool,
    pub animated: bool,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: Self::edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            hidden: false,
            highlighted: false,
            animated: false,
        }
    }

    pub fn edge_id(source: &str, target: &str) -> String {
        format!("edge-{}-{}", source, target)
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
