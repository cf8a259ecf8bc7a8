use serde::{Deserialize, Serialize};

/// A structural JSON value rendered as one box on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    /// Key or index under which the value was reached, or a default at the root.
    pub label: String,
    /// Scalar entries of an object, inlined into the node.
    pub properties: Vec<ScalarProperty>,
    /// Element count, only present on arrays.
    pub array_length: Option<usize>,
    /// Number of outgoing structural edges.
    pub child_count: usize,
    /// Distance from the root, root = 0.
    pub depth: usize,
    pub collapsed: bool,
    /// Set once a user toggled this node; pins it against threshold changes.
    pub manually_toggled: bool,
    /// Strict descendant of a collapsed node.
    pub hidden: bool,
    pub selected: bool,
    pub search_match: bool,
    /// Top-left corner in canvas coordinates.
    pub position: Position,
    /// Footprint computed by the last layout pass.
    pub size: Option<Size>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScalarProperty {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl GraphNode {
    pub fn new(id: String, kind: NodeKind, label: String, depth: usize) -> Self {
        Self {
            id,
            kind,
            label,
            properties: Vec::new(),
            array_length: None,
            child_count: 0,
            depth,
            collapsed: false,
            manually_toggled: false,
            hidden: false,
            selected: false,
            search_match: false,
            position: Position::default(),
            size: None,
        }
    }

    /// Default label for a value reached without a key.
    pub fn default_label(kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Object => "Object",
            NodeKind::Array => "Array",
        }
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Object => write!(f, "object"),
            NodeKind::Array => write!(f, "array"),
        }
    }
}
