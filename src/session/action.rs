use super::{Canvas, Session};
use crate::model::{LayoutDirection, Position, SizeMode};
use serde::{Deserialize, Serialize};

/// User interaction forwarded by a remote viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Toggle { node_id: String },
    SetLevel { level: usize },
    CollapseAll,
    ExpandAll,
    SetDirection { direction: LayoutDirection },
    SetSizeMode { size_mode: SizeMode },
    Select { node_id: String },
    PaneClick,
    DragStart { node_id: String, x: f64, y: f64 },
    Drag { node_id: String, x: f64, y: f64 },
    DragEnd { node_id: String, x: f64, y: f64 },
    Reorganize {
        #[serde(default)]
        preserve_selected: bool,
    },
    Search { term: String },
}

impl Action {
    /// Dispatch to the matching session handler.
    pub fn apply<C: Canvas>(self, session: &mut Session<C>) {
        match self {
            Action::Toggle { node_id } => {
                session.toggle_node(&node_id);
            }
            Action::SetLevel { level } => session.set_level_threshold(level),
            Action::CollapseAll => session.collapse_all(),
            Action::ExpandAll => session.expand_all(),
            Action::SetDirection { direction } => session.set_layout_direction(direction),
            Action::SetSizeMode { size_mode } => session.set_size_mode(size_mode),
            Action::Select { node_id } => session.on_node_click(&node_id),
            Action::PaneClick => session.on_pane_click(),
            Action::DragStart { node_id, x, y } => {
                session.on_drag_start(&node_id, Position::new(x, y))
            }
            Action::Drag { node_id, x, y } => session.on_drag(&node_id, Position::new(x, y)),
            Action::DragEnd { node_id, x, y } => session.on_drag_end(&node_id, Position::new(x, y)),
            Action::Reorganize { preserve_selected } => session.reorganize(preserve_selected),
            Action::Search { term } => {
                session.search(&term);
            }
        }
    }
}
