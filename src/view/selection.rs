use crate::model::Graph;

/// The single selected node, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select `node_id`, or clear the selection when it is already selected.
    pub fn select(&mut self, node_id: &str) -> Option<&str> {
        if self.selected.as_deref() == Some(node_id) {
            self.selected = None;
        } else {
            self.selected = Some(node_id.to_string());
        }
        self.selected()
    }

    /// Empty canvas click.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Forget a selection that no longer points at a node of `graph`.
    pub fn retain_in(&mut self, graph: &Graph) {
        if let Some(id) = &self.selected {
            if !graph.contains(id) {
                self.selected = None;
            }
        }
    }
}

/// Derive selection and highlight flags on `graph` from `selected` alone.
///
/// Every flag is overwritten, so nothing carries over from earlier selections.
pub fn apply_highlight(graph: &mut Graph, selected: Option<&str>) {
    for node in &mut graph.nodes {
        node.selected = selected == Some(node.id.as_str());
    }
    for edge in &mut graph.edges {
        let on = selected.is_some_and(|id| edge.touches(id));
        edge.highlighted = on;
        edge.animated = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use serde_json::json;

    fn fruits() -> Graph {
        build_graph(&json!({"fruits": [{"name": "Apple"}, {"name": "Banana"}]}))
    }

    fn highlighted(graph: &Graph) -> Vec<&str> {
        graph
            .edges
            .iter()
            .filter(|e| e.highlighted)
            .map(|e| e.id.as_str())
            .collect()
    }

    #[test]
    fn test_selecting_twice_clears() {
        let mut selection = Selection::new();
        assert_eq!(selection.select("node-1"), Some("node-1"));
        assert_eq!(selection.select("node-2"), Some("node-2"));
        assert_eq!(selection.select("node-2"), None);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_highlight_marks_incident_edges_only() {
        let mut graph = fruits();
        apply_highlight(&mut graph, Some("node-1"));
        assert_eq!(highlighted(&graph).len(), 3);
        assert!(graph.edges.iter().all(|e| e.animated == e.highlighted));

        apply_highlight(&mut graph, Some("node-2"));
        assert_eq!(highlighted(&graph), vec!["edge-node-1-node-2"]);
        let selected: Vec<_> = graph.nodes.iter().filter(|n| n.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "node-2");
    }

    #[test]
    fn test_clearing_removes_all_highlight() {
        let mut graph = fruits();
        apply_highlight(&mut graph, Some("node-0"));
        apply_highlight(&mut graph, None);
        assert!(highlighted(&graph).is_empty());
        assert!(graph.nodes.iter().all(|n| !n.selected));
        assert!(graph.edges.iter().all(|e| !e.animated));
    }

    #[test]
    fn test_selection_dropped_when_node_disappears() {
        let mut selection = Selection::new();
        selection.select("node-9");
        selection.retain_in(&fruits());
        assert_eq!(selection.selected(), None);
    }
}
