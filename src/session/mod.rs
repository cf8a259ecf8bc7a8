//! Interaction orchestration: one session owns the document, the graph built
//! from it and all view state, and decides per event whether to rebuild,
//! re-run layout, or only patch flags.

mod action;
mod canvas;
mod editor;
mod scheduler;

pub use action::Action;
pub use canvas::{Canvas, DeferredCanvas, FitViewOptions};
pub use editor::EditorSync;
pub use scheduler::{LayoutReason, LayoutRequest, LayoutScheduler};

use crate::analysis::{self, DocumentStats};
use crate::graph::build_graph;
use crate::layout::{LayoutEngine, LayoutSettings};
use crate::model::{Graph, LayoutDirection, Position, SHOW_ALL_LEVEL, SizeMode};
use crate::view::{Selection, apply_highlight, visibility};
use log::{debug, info};
use serde_json::Value;

/// Initial view settings and tuning for a [`Session`].
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub direction: LayoutDirection,
    pub size_mode: SizeMode,
    pub layout: LayoutSettings,
    pub fit_view: FitViewOptions,
}

/// Drag in progress.
#[derive(Debug, Clone, PartialEq)]
struct Drag {
    node_id: String,
    origin: Position,
}

pub struct Session<C: Canvas> {
    canvas: C,
    document: Value,
    graph: Graph,
    stats: DocumentStats,
    engine: LayoutEngine,
    fit_view: FitViewOptions,
    direction: LayoutDirection,
    size_mode: SizeMode,
    level: usize,
    selection: Selection,
    search_term: String,
    drag: Option<Drag>,
    scheduler: LayoutScheduler,
    auto_flush: bool,
    editor: EditorSync,
    revision: u64,
}

impl<C: Canvas> Session<C> {
    /// Empty session; nothing is drawn until a document arrives.
    pub fn new(canvas: C, options: SessionOptions) -> Self {
        Self {
            canvas,
            document: Value::Null,
            graph: Graph::default(),
            stats: DocumentStats::default(),
            engine: LayoutEngine::new(options.layout),
            fit_view: options.fit_view,
            direction: options.direction,
            size_mode: options.size_mode,
            level: SHOW_ALL_LEVEL,
            selection: Selection::new(),
            search_term: String::new(),
            drag: None,
            scheduler: LayoutScheduler::new(),
            auto_flush: true,
            editor: EditorSync::new(),
            revision: 0,
        }
    }

    /// Session with `document` already loaded and laid out.
    pub fn with_document(canvas: C, options: SessionOptions, document: Value) -> Self {
        let mut session = Self::new(canvas, options);
        session.on_document_changed(document);
        session
    }

    /// When disabled, layout requests accumulate until [`Session::flush`].
    pub fn set_auto_flush(&mut self, auto_flush: bool) {
        self.auto_flush = auto_flush;
        if auto_flush {
            self.flush();
        }
    }

    // ----- editor collaborator -----

    /// The editor emitted a new document.
    pub fn on_document_changed(&mut self, document: Value) {
        self.editor.record_emitted(&document);
        self.load(document);
    }

    /// Replace the document from outside the editor (file reload, import).
    ///
    /// Returns the text the editor should now show, or `None` when the editor
    /// already holds this document and nothing was reloaded.
    pub fn set_document(&mut self, document: Value) -> Option<String> {
        let text = self.editor.outgoing(&document)?;
        self.load(document);
        Some(text)
    }

    fn load(&mut self, document: Value) {
        self.graph = build_graph(&document);
        self.stats = DocumentStats::from_document(&document);
        self.document = document;
        info!(
            "Loaded document: {} nodes, {} edges, depth {}",
            self.graph.len(),
            self.graph.edges.len(),
            self.stats.max_depth
        );

        self.level = SHOW_ALL_LEVEL;
        visibility::expand_all(&mut self.graph);

        // Node ids are positional, so an old selection may now name a different node
        self.selection.clear();
        self.drag = None;
        self.refresh_flags();

        self.request_layout(LayoutReason::DocumentChanged);
    }

    // ----- toolbar collaborator -----

    pub fn set_level_threshold(&mut self, level: usize) {
        self.level = level;
        visibility::set_level(&mut self.graph, level);
        self.request_layout(LayoutReason::LevelChanged);
    }

    pub fn collapse_all(&mut self) {
        self.level = 0;
        visibility::collapse_all(&mut self.graph);
        self.request_layout(LayoutReason::LevelChanged);
    }

    pub fn expand_all(&mut self) {
        self.level = SHOW_ALL_LEVEL;
        visibility::expand_all(&mut self.graph);
        self.request_layout(LayoutReason::LevelChanged);
    }

    /// Collapse or expand one node. Unknown ids are ignored.
    pub fn toggle_node(&mut self, node_id: &str) -> bool {
        let toggled = visibility::toggle(&mut self.graph, node_id);
        if toggled {
            self.request_layout(LayoutReason::NodeToggled);
        }
        toggled
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.direction != direction {
            self.direction = direction;
            self.request_layout(LayoutReason::DirectionChanged);
        }
    }

    pub fn set_size_mode(&mut self, size_mode: SizeMode) {
        if self.size_mode != size_mode {
            self.size_mode = size_mode;
            self.request_layout(LayoutReason::SizeModeChanged);
        }
    }

    /// Re-run layout now over everything visible.
    ///
    /// With `preserve_selected` the selected node stays where it is and the
    /// viewport is left alone; otherwise the viewport is refitted.
    pub fn reorganize(&mut self, preserve_selected: bool) {
        if self.drag.is_some() {
            debug!("Ignoring reorganize during drag");
            return;
        }

        let pinned: Option<(String, Position)> = if preserve_selected {
            self.selection
                .selected()
                .and_then(|id| self.graph.node(id))
                .map(|n| (n.id.clone(), n.position))
        } else {
            None
        };

        // An explicit pass supersedes anything queued
        self.scheduler.take();
        self.run_layout();

        if let Some((id, position)) = &pinned {
            if let Some(node) = self.graph.node_mut(id) {
                node.position = *position;
            }
        } else {
            self.canvas.fit_view(&self.fit_view);
        }
        self.revision += 1;
    }

    // ----- canvas collaborator -----

    /// Click on a node: select it, or deselect it when already selected.
    pub fn on_node_click(&mut self, node_id: &str) {
        if !self.graph.contains(node_id) {
            debug!("Ignoring click on unknown node {}", node_id);
            return;
        }
        self.selection.select(node_id);
        self.refresh_flags();
        self.revision += 1;
    }

    pub fn on_pane_click(&mut self) {
        self.selection.clear();
        self.refresh_flags();
        self.revision += 1;
    }

    pub fn on_drag_start(&mut self, node_id: &str, position: Position) {
        let Some(node) = self.graph.node(node_id) else {
            debug!("Ignoring drag of unknown node {}", node_id);
            return;
        };
        let origin = node.position;

        // Anything queued reflects the state before the drag, so apply it first
        self.flush();
        self.drag = Some(Drag {
            node_id: node_id.to_string(),
            origin,
        });
        self.move_node(node_id, position);
    }

    pub fn on_drag(&mut self, node_id: &str, position: Position) {
        if self.is_dragging(node_id) {
            self.move_node(node_id, position);
        }
    }

    /// Finish a drag. The dropped position stands; no layout runs.
    pub fn on_drag_end(&mut self, node_id: &str, position: Position) {
        if !self.is_dragging(node_id) {
            return;
        }
        self.move_node(node_id, position);
        if let Some(drag) = self.drag.take() {
            debug!(
                "Dragged {} from ({:.0}, {:.0}) to ({:.0}, {:.0})",
                drag.node_id, drag.origin.x, drag.origin.y, position.x, position.y
            );
        }
    }

    fn is_dragging(&self, node_id: &str) -> bool {
        self.drag.as_ref().is_some_and(|d| d.node_id == node_id)
    }

    fn move_node(&mut self, node_id: &str, position: Position) {
        if let Some(node) = self.graph.node_mut(node_id) {
            node.position = position;
            self.revision += 1;
        }
    }

    // ----- search collaborator -----

    /// Mark nodes matching `term`; an empty term clears the marks.
    pub fn search(&mut self, term: &str) -> usize {
        self.search_term = term.trim().to_string();
        let matches = analysis::apply_search(&mut self.graph, &self.search_term);
        self.revision += 1;
        matches
    }

    // ----- scheduling -----

    fn request_layout(&mut self, reason: LayoutReason) {
        self.revision += 1;
        if let Some(drag) = &self.drag {
            debug!("Dropping layout request ({}) while {} is dragged", reason, drag.node_id);
            return;
        }

        let generation = self.scheduler.request(reason, true);
        debug!("Queued layout #{} ({})", generation, reason);
        if self.auto_flush {
            self.flush();
        }
    }

    /// Run the pending layout pass, if any. Returns whether one ran.
    pub fn flush(&mut self) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(request) = self.scheduler.take() else {
            return false;
        };

        debug!("Running layout #{} ({})", request.generation, request.reason);
        self.run_layout();
        if request.fit_view {
            self.canvas.fit_view(&self.fit_view);
        }
        self.revision += 1;
        true
    }

    fn run_layout(&mut self) {
        let result = self.engine.layout(
            &self.graph.visible_nodes(),
            &self.graph.visible_edges(),
            self.direction,
            self.size_mode,
        );
        self.graph.apply_positions(&result.nodes);
    }

    fn refresh_flags(&mut self) {
        apply_highlight(&mut self.graph, self.selection.selected());
        analysis::apply_search(&mut self.graph, &self.search_term);
    }

    // ----- read accessors -----

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn stats(&self) -> &DocumentStats {
        &self.stats
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.node_id.as_str())
    }

    pub fn layout_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Bumped on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::generated_document;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingCanvas {
        fits: Vec<FitViewOptions>,
    }

    impl Canvas for RecordingCanvas {
        fn fit_view(&mut self, options: &FitViewOptions) {
            self.fits.push(*options);
        }
    }

    fn fruits() -> Value {
        json!({"fruits": [{"name": "Apple"}, {"name": "Banana"}]})
    }

    fn session_with(document: Value) -> Session<RecordingCanvas> {
        Session::with_document(RecordingCanvas::default(), SessionOptions::default(), document)
    }

    fn position_of(session: &Session<RecordingCanvas>, id: &str) -> Position {
        session.graph().node(id).unwrap().position
    }

    #[test]
    fn test_document_load_lays_out_and_fits() {
        let session = session_with(fruits());
        assert_eq!(session.graph().len(), 4);
        assert_eq!(session.level(), SHOW_ALL_LEVEL);
        assert_eq!(session.stats().max_depth, 3);
        assert!(session.graph().nodes.iter().all(|n| n.size.is_some()));
        assert_eq!(session.canvas().fits.len(), 1);
        assert_eq!(session.canvas().fits[0], FitViewOptions::default());
    }

    #[test]
    fn test_document_change_resets_view_state() {
        let mut session = session_with(fruits());
        session.toggle_node("node-1");
        session.set_level_threshold(1);
        session.on_node_click("node-0");

        session.on_document_changed(json!({"other": {"x": 1}}));
        assert_eq!(session.level(), SHOW_ALL_LEVEL);
        assert_eq!(session.selected(), None);
        assert!(
            session
                .graph()
                .nodes
                .iter()
                .all(|n| !n.collapsed && !n.manually_toggled && !n.hidden)
        );
    }

    #[test]
    fn test_toggle_relayouts_visible_nodes_only() {
        let mut session = session_with(fruits());
        let hidden_before = position_of(&session, "node-2");

        assert!(session.toggle_node("node-1"));
        assert!(session.graph().node("node-2").unwrap().hidden);
        assert_eq!(position_of(&session, "node-2"), hidden_before);
        assert_eq!(session.canvas().fits.len(), 2);

        assert!(!session.toggle_node("node-404"));
        assert_eq!(session.canvas().fits.len(), 2);
    }

    #[test]
    fn test_hidden_nodes_do_not_affect_visible_spacing() {
        let doc = generated_document(3, 3);
        let mut session = session_with(doc.clone());
        session.set_level_threshold(1);
        let visible_positions: Vec<Position> = session
            .graph()
            .nodes
            .iter()
            .filter(|n| !n.hidden)
            .map(|n| n.position)
            .collect();

        // Same visible set reached by a different route
        let mut other = session_with(doc);
        other.collapse_all();
        other.set_level_threshold(1);
        let other_positions: Vec<Position> = other
            .graph()
            .nodes
            .iter()
            .filter(|n| !n.hidden)
            .map(|n| n.position)
            .collect();
        assert_eq!(visible_positions, other_positions);
    }

    #[test]
    fn test_collapse_all_then_expand_all() {
        let mut session = session_with(fruits());
        session.collapse_all();
        assert_eq!(session.level(), 0);
        assert_eq!(session.graph().visible_nodes().len(), 1);

        session.expand_all();
        assert_eq!(session.level(), SHOW_ALL_LEVEL);
        assert_eq!(session.graph().visible_nodes().len(), 4);
    }

    #[test]
    fn test_direction_change_moves_children_and_refits() {
        let mut session = session_with(fruits());
        let lr = position_of(&session, "node-1");
        assert!(lr.x > position_of(&session, "node-0").x);

        session.set_layout_direction(LayoutDirection::TopBottom);
        let tb = position_of(&session, "node-1");
        assert!(tb.y > position_of(&session, "node-0").y);
        assert_eq!(session.canvas().fits.len(), 2);

        // Same direction again is a no-op
        session.set_layout_direction(LayoutDirection::TopBottom);
        assert_eq!(session.canvas().fits.len(), 2);
    }

    #[test]
    fn test_size_mode_change_resizes_nodes() {
        let mut session = session_with(fruits());
        let medium = session.graph().nodes[0].size.unwrap();
        session.set_size_mode(SizeMode::Expanded);
        let expanded = session.graph().nodes[0].size.unwrap();
        assert!(expanded.width > medium.width);
    }

    #[test]
    fn test_click_selects_and_highlights() {
        let mut session = session_with(fruits());
        session.on_node_click("node-1");
        assert_eq!(session.selected(), Some("node-1"));
        assert_eq!(session.graph().edges.iter().filter(|e| e.highlighted).count(), 3);

        session.on_node_click("node-1");
        assert_eq!(session.selected(), None);

        session.on_node_click("node-2");
        session.on_pane_click();
        assert_eq!(session.selected(), None);
        assert!(session.graph().edges.iter().all(|e| !e.highlighted));
    }

    #[test]
    fn test_drag_position_survives_state_changes_during_drag() {
        let mut session = session_with(fruits());
        let dropped = Position::new(900.0, 900.0);

        session.on_drag_start("node-2", Position::new(10.0, 10.0));
        session.on_drag("node-2", dropped);
        session.set_layout_direction(LayoutDirection::TopBottom);
        session.toggle_node("node-3");
        assert_eq!(position_of(&session, "node-2"), dropped);
        assert!(!session.layout_pending());

        session.on_drag_end("node-2", dropped);
        assert_eq!(session.dragging(), None);
        assert_eq!(position_of(&session, "node-2"), dropped);
        // Only the initial load fitted the view
        assert_eq!(session.canvas().fits.len(), 1);
    }

    #[test]
    fn test_drag_of_other_node_is_ignored() {
        let mut session = session_with(fruits());
        let before = position_of(&session, "node-3");
        session.on_drag_start("node-2", Position::new(0.0, 0.0));
        session.on_drag("node-3", Position::new(5.0, 5.0));
        assert_eq!(position_of(&session, "node-3"), before);
    }

    #[test]
    fn test_reorganize_restores_layout() {
        let mut session = session_with(fruits());
        let laid_out = position_of(&session, "node-2");
        session.on_drag_start("node-2", laid_out);
        session.on_drag_end("node-2", Position::new(-500.0, 0.0));

        session.reorganize(false);
        assert_eq!(position_of(&session, "node-2"), laid_out);
        assert_eq!(session.canvas().fits.len(), 2);
    }

    #[test]
    fn test_reorganize_can_preserve_selected_node() {
        let mut session = session_with(fruits());
        let moved = Position::new(-500.0, 0.0);
        session.on_drag_start("node-2", moved);
        session.on_drag_end("node-2", moved);
        session.on_node_click("node-2");

        session.reorganize(true);
        assert_eq!(position_of(&session, "node-2"), moved);
        assert_eq!(session.canvas().fits.len(), 1);
    }

    #[test]
    fn test_batched_requests_run_once() {
        let mut session = session_with(fruits());
        session.set_auto_flush(false);

        session.set_layout_direction(LayoutDirection::TopBottom);
        session.set_size_mode(SizeMode::Compact);
        session.toggle_node("node-1");
        assert!(session.layout_pending());
        assert_eq!(session.canvas().fits.len(), 1);

        assert!(session.flush());
        assert!(!session.flush());
        assert_eq!(session.canvas().fits.len(), 2);
        assert!(session.graph().node("node-2").unwrap().hidden);
    }

    #[test]
    fn test_set_document_skips_unchanged_content() {
        let mut session = session_with(fruits());
        assert_eq!(session.set_document(fruits()), None);
        assert_eq!(session.canvas().fits.len(), 1);

        let text = session.set_document(json!({"x": {}})).expect("document differs");
        assert!(text.contains("\"x\""));
        assert_eq!(session.graph().len(), 2);
    }

    #[test]
    fn test_search_marks_survive_relayout() {
        let mut session = session_with(fruits());
        assert_eq!(session.search("banana"), 1);
        session.set_level_threshold(1);
        session.expand_all();
        assert!(session.graph().node("node-3").unwrap().search_match);

        assert_eq!(session.search(""), 0);
        assert!(session.graph().nodes.iter().all(|n| !n.search_match));
    }

    #[test]
    fn test_revision_moves_on_every_change() {
        let mut session = session_with(fruits());
        let mut last = session.revision();
        session.on_node_click("node-1");
        assert!(session.revision() > last);
        last = session.revision();
        session.search("apple");
        assert!(session.revision() > last);
    }

    #[test]
    fn test_partially_collapsed_view_never_overlaps() {
        for direction in [LayoutDirection::LeftRight, LayoutDirection::TopBottom] {
            for mode in [SizeMode::Compact, SizeMode::Medium, SizeMode::Expanded] {
                let mut session = session_with(generated_document(3, 4));
                session.set_layout_direction(direction);
                session.set_size_mode(mode);
                session.set_level_threshold(2);
                assert!(session.toggle_node("node-1"));

                // Open up one branch below the threshold so depths are mixed
                let pinned_open = session
                    .graph()
                    .nodes
                    .iter()
                    .find(|n| !n.hidden && n.collapsed && n.depth == 2)
                    .map(|n| n.id.clone())
                    .unwrap();
                assert!(session.toggle_node(&pinned_open));

                let visible = session.graph().visible_nodes();
                assert!(visible.len() < session.graph().len());
                assert!(visible.iter().any(|n| n.depth == 3));
                for (i, a) in visible.iter().enumerate() {
                    let sa = a.size.unwrap();
                    for b in &visible[i + 1..] {
                        let sb = b.size.unwrap();
                        let overlap_x = a.position.x < b.position.x + sb.width
                            && b.position.x < a.position.x + sa.width;
                        let overlap_y = a.position.y < b.position.y + sb.height
                            && b.position.y < a.position.y + sa.height;
                        assert!(
                            !(overlap_x && overlap_y),
                            "{} overlaps {} ({:?}, {:?})",
                            a.id,
                            b.id,
                            direction,
                            mode
                        );
                    }
                }
            }
        }
    }
}
