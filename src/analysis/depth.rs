use crate::graph::is_structural;
use crate::model::Graph;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// Maximum nesting depth of a document for display, root = 1.
///
/// Scalars count as the depth they appear at; only objects and arrays open a
/// new level, so `{"a": 1}` is depth 1 and `{"a": {"b": 1}}` is depth 2.
pub fn max_depth(json: &Value) -> usize {
    depth_from(json, 1)
}

fn depth_from(value: &Value, current: usize) -> usize {
    let children: Box<dyn Iterator<Item = &Value>> = match value {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        _ => return current,
    };

    children
        .filter(|v| is_structural(v))
        .map(|v| depth_from(v, current + 1))
        .max()
        .unwrap_or(current)
}

/// Deepest node of a built graph, root = 0.
///
/// Agrees with [`max_depth`] up to the root offset:
/// `graph_max_depth(&build_graph(v)) + 1 == max_depth(v)`.
pub fn graph_max_depth(graph: &Graph) -> usize {
    graph.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
}

/// Per-node depth derived from the edge structure alone, root = 0.
///
/// Breadth-first from every node without an incoming edge. Nodes unreachable
/// from a root (only possible on a malformed graph) are left out.
pub fn node_depths(graph: &Graph) -> HashMap<String, usize> {
    let children = graph.children();
    let mut depths: HashMap<String, usize> = HashMap::new();
    let mut queue: VecDeque<(&str, usize)> = graph
        .roots()
        .into_iter()
        .map(|n| (n.id.as_str(), 0))
        .collect();

    while let Some((id, depth)) = queue.pop_front() {
        if depths.contains_key(id) {
            continue;
        }
        depths.insert(id.to_string(), depth);
        if let Some(kids) = children.get(id) {
            for kid in kids {
                queue.push_back((kid, depth + 1));
            }
        }
    }

    depths
}
