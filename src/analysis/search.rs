use crate::model::{Graph, GraphNode};

/// Ids of nodes whose label, property key or property value contains `term`,
/// compared case-insensitively. An empty or blank term matches nothing.
pub fn search_nodes(graph: &Graph, term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    graph
        .nodes
        .iter()
        .filter(|n| node_matches(n, &needle))
        .map(|n| n.id.clone())
        .collect()
}

fn node_matches(node: &GraphNode, needle: &str) -> bool {
    node.label.to_lowercase().contains(needle)
        || node.properties.iter().any(|p| {
            p.key.to_lowercase().contains(needle) || p.value.to_lowercase().contains(needle)
        })
}

/// Recompute every node's `search_match` flag from scratch.
pub fn apply_search(graph: &mut Graph, term: &str) -> usize {
    let needle = term.trim().to_lowercase();
    let mut count = 0;
    for node in &mut graph.nodes {
        node.search_match = !needle.is_empty() && node_matches(node, &needle);
        if node.search_match {
            count += 1;
        }
    }
    count
}
