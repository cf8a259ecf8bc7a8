use crate::analysis::{DocumentStats, graph_max_depth};
use crate::model::{GraphEdge, GraphNode, LayoutDirection, SizeMode};
use crate::session::{Canvas, FitViewOptions, Session};
use serde::Serialize;

/// Everything the viewer needs to draw one frame of a session.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub view: ViewState,
    pub stats: StatsSummary,
    /// Viewport refit the viewer should perform after drawing this frame.
    pub fit_view: Option<FitViewOptions>,
    pub revision: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub direction: LayoutDirection,
    pub size_mode: SizeMode,
    pub level: usize,
    /// Deepest node depth in the graph (root = 0), the top of the level slider.
    pub max_level: usize,
    pub selected: Option<String>,
    pub search: String,
    pub search_matches: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub max_depth: usize,
    pub node_count: usize,
    pub visible_nodes: usize,
    pub property_count: usize,
    pub byte_size: usize,
    pub size: String,
}

impl GraphData {
    /// Snapshot a session. Hidden nodes and edges are included with their
    /// flags set so the viewer can keep their last positions.
    pub fn from_session<C: Canvas>(session: &Session<C>, fit_view: Option<FitViewOptions>) -> Self {
        let graph = session.graph();
        let view = ViewState {
            direction: session.direction(),
            size_mode: session.size_mode(),
            level: session.level(),
            max_level: graph_max_depth(graph),
            selected: session.selected().map(str::to_string),
            search: session.search_term().to_string(),
            search_matches: graph.nodes.iter().filter(|n| n.search_match).count(),
        };

        GraphData {
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            view,
            stats: StatsSummary::new(session.stats(), graph.len() - graph.hidden_ids().len()),
            fit_view,
            revision: session.revision(),
        }
    }
}

impl StatsSummary {
    fn new(stats: &DocumentStats, visible_nodes: usize) -> Self {
        Self {
            max_depth: stats.max_depth,
            node_count: stats.node_count,
            visible_nodes,
            property_count: stats.property_count,
            byte_size: stats.byte_size,
            size: stats.formatted_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DeferredCanvas, SessionOptions};
    use serde_json::json;

    fn session() -> Session<DeferredCanvas> {
        Session::with_document(
            DeferredCanvas::new(),
            SessionOptions::default(),
            json!({"fruits": [{"name": "Apple"}, {"name": "Banana"}]}),
        )
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = session();
        session.toggle_node("node-1");
        session.search("apple");

        let data = GraphData::from_session(&session, None);
        assert_eq!(data.nodes.len(), 4);
        assert_eq!(data.edges.len(), 3);
        assert_eq!(data.view.max_level, 2);
        assert_eq!(data.view.search_matches, 1);
        assert_eq!(data.stats.visible_nodes, 2);
        assert_eq!(data.stats.max_depth, 3);
        assert_eq!(data.revision, session.revision());
    }

    #[test]
    fn test_snapshot_serializes_wire_names() {
        let mut session = session();
        session.set_layout_direction(LayoutDirection::TopBottom);
        let fit = session.canvas_mut().take_fit();

        let value = serde_json::to_value(GraphData::from_session(&session, fit)).unwrap();
        assert_eq!(value["view"]["direction"], "tb");
        assert_eq!(value["view"]["size_mode"], "medium");
        assert_eq!(value["fit_view"]["padding"], 0.2);
        assert_eq!(value["nodes"][1]["kind"], "array");
        assert_eq!(value["nodes"][1]["array_length"], 2);
    }
}
