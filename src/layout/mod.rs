mod engine;
mod layered;
mod size;

pub use engine::{LayoutEngine, LayoutError, LayoutResult, LayoutSettings, filter_edges};
pub use size::estimate_size;
