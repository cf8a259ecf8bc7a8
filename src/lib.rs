pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod graph;
pub mod layout;
pub mod model;
pub mod session;
pub mod style;
pub mod view;

pub use api::{
    JsonmapError, SearchHit, ViewOptions, load_document, open_session, search, search_document,
    stats, visualize,
};
pub use cli::Cli;
pub use commands::{cmd_graph, cmd_init, cmd_layout, cmd_search, cmd_stats};
pub use config::Config;
pub use graph::{GraphData, build_graph};
pub use layout::{LayoutEngine, LayoutSettings};
pub use model::{Graph, GraphEdge, GraphNode, LayoutDirection, SHOW_ALL_LEVEL, SizeMode};
pub use session::{Canvas, FitViewOptions, Session, SessionOptions};
