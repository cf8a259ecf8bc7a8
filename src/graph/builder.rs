use crate::model::{Graph, GraphEdge, GraphNode, NodeKind, ScalarProperty};
use serde_json::Value;
use std::collections::HashMap;

/// Translate a JSON value into a tree of object/array nodes.
///
/// Ids are assigned in pre-order (`node-0` is the root), so the same document
/// always yields the same nodes and edges. Scalars inside objects become
/// inline properties; scalar array elements are not represented, only
/// counted in `array_length`.
pub fn build_graph(json: &Value) -> Graph {
    let mut builder = GraphBuilder::default();
    builder.visit(json, None, None, 0);
    builder.finish()
}

#[derive(Default)]
struct GraphBuilder {
    next_id: usize,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl GraphBuilder {
    fn allocate_id(&mut self) -> String {
        let id = format!("node-{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn visit(&mut self, value: &Value, parent: Option<&str>, key: Option<String>, depth: usize) {
        let kind = match value {
            Value::Array(_) => NodeKind::Array,
            _ => NodeKind::Object,
        };

        let id = self.allocate_id();
        let label = key.unwrap_or_else(|| GraphNode::default_label(kind).to_string());
        let mut node = GraphNode::new(id.clone(), kind, label, depth);

        if let Value::Object(map) = value {
            node.properties = map
                .iter()
                .filter(|(_, v)| !is_structural(v))
                .map(|(k, v)| ScalarProperty {
                    key: k.clone(),
                    value: stringify_scalar(v),
                })
                .collect();
        }
        if let Value::Array(items) = value {
            node.array_length = Some(items.len());
        }

        self.nodes.push(node);
        if let Some(parent_id) = parent {
            self.edges.push(GraphEdge::new(parent_id, &id));
        }

        match value {
            Value::Object(map) => {
                for (k, v) in map.iter().filter(|(_, v)| is_structural(v)) {
                    self.visit(v, Some(&id), Some(k.clone()), depth + 1);
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if is_structural(item) {
                        self.visit(item, Some(&id), Some(index.to_string()), depth + 1);
                    }
                }
            }
            // Scalar roots degrade to a single empty node
            _ => {}
        }
    }

    fn finish(mut self) -> Graph {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            *counts.entry(edge.source.as_str()).or_insert(0) += 1;
        }
        let counts: HashMap<String, usize> =
            counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();

        for node in &mut self.nodes {
            node.child_count = counts.get(&node.id).copied().unwrap_or(0);
        }

        Graph::new(self.nodes, self.edges)
    }
}

/// Objects and arrays become nodes; everything else is a scalar.
pub fn is_structural(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Natural string form of a scalar: strings unquoted, `null` as literal text.
pub fn stringify_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
pub mod fixtures {
    use serde_json::{Value, json};

    /// Deterministic nested document with objects, arrays and scalars mixed.
    pub fn generated_document(breadth: usize, depth: usize) -> Value {
        fn level(breadth: usize, depth: usize, seed: usize) -> Value {
            let mut map = serde_json::Map::new();
            map.insert("id".to_string(), json!(seed));
            map.insert("name".to_string(), json!(format!("item-{}", seed)));
            if depth > 0 {
                for i in 0..breadth {
                    let child = level(breadth, depth - 1, seed * 10 + i);
                    if i % 2 == 0 {
                        map.insert(format!("child_{}", i), child);
                    } else {
                        map.insert(format!("list_{}", i), json!([child, 1, "x", null]));
                    }
                }
            }
            Value::Object(map)
        }
        level(breadth, depth, 1)
    }
}
