pub mod selection;
pub mod visibility;

pub use selection::{Selection, apply_highlight};
