//! Collapse state and the hidden node/edge sets derived from it.
//!
//! A node is hidden exactly when it is a strict descendant of a collapsed
//! node. Every operation here rewrites the collapsed flags it owns and then
//! recomputes the hidden sets from scratch over the whole graph.

use crate::model::{Graph, SHOW_ALL_LEVEL};
use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};

/// Flip one node's collapsed state and pin it against threshold changes.
///
/// Returns `false` (and changes nothing) when `node_id` is not in the graph.
pub fn toggle(graph: &mut Graph, node_id: &str) -> bool {
    let Some(node) = graph.node_mut(node_id) else {
        debug!("Ignoring toggle of unknown node {}", node_id);
        return false;
    };

    node.collapsed = !node.collapsed;
    node.manually_toggled = true;
    recompute_hidden(graph);
    true
}

/// Show nodes down to depth `level` (root = 0), leaving pinned nodes alone.
///
/// Unpinned nodes at or below `level` that have children are collapsed, the
/// rest expanded. `level = 0` therefore hides everything below the root and
/// any level at or above [`SHOW_ALL_LEVEL`] expands every unpinned node.
pub fn set_level(graph: &mut Graph, level: usize) {
    let parents: HashSet<String> = graph.edges.iter().map(|e| e.source.clone()).collect();

    for node in graph.nodes.iter_mut().filter(|n| !n.manually_toggled) {
        node.collapsed =
            level < SHOW_ALL_LEVEL && node.depth >= level && parents.contains(&node.id);
    }
    recompute_hidden(graph);
}

/// Collapse everything below the root and clear every manual pin.
pub fn collapse_all(graph: &mut Graph) {
    clear_pins(graph);
    set_level(graph, 0);
}

/// Expand every node and clear every manual pin.
pub fn expand_all(graph: &mut Graph) {
    clear_pins(graph);
    set_level(graph, SHOW_ALL_LEVEL);
}

fn clear_pins(graph: &mut Graph) {
    for node in &mut graph.nodes {
        node.manually_toggled = false;
    }
}

/// Rebuild `hidden` on every node and edge from the collapsed flags.
pub fn recompute_hidden(graph: &mut Graph) {
    let hidden = {
        let children = graph.children();
        let collapsed: Vec<&str> = graph
            .nodes
            .iter()
            .filter(|n| n.collapsed)
            .map(|n| n.id.as_str())
            .collect();
        closure_below(&children, &collapsed)
    };

    for node in &mut graph.nodes {
        node.hidden = hidden.contains(&node.id);
    }
    for edge in &mut graph.edges {
        edge.hidden = hidden.contains(&edge.source) || hidden.contains(&edge.target);
    }
}

fn closure_below(children: &HashMap<&str, Vec<&str>>, starts: &[&str]) -> HashSet<String> {
    let mut found: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&str> = starts
        .iter()
        .filter_map(|s| children.get(s))
        .flatten()
        .copied()
        .collect();

    while let Some(id) = queue.pop_front() {
        if !found.insert(id.to_string()) {
            continue;
        }
        if let Some(kids) = children.get(id) {
            queue.extend(kids.iter().copied());
        }
    }
    found
}
