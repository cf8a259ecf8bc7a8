mod depth;
mod search;
mod stats;

pub use depth::{graph_max_depth, max_depth, node_depths};
pub use search::{apply_search, search_nodes};
pub use stats::{DocumentStats, format_size};
