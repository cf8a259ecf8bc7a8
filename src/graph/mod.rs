mod assets;
mod builder;
mod data;
mod routes;
mod watch;

pub use assets::generate_static_html;
#[cfg(test)]
pub use builder::fixtures;
pub use builder::{build_graph, is_structural, stringify_scalar};
pub use data::{GraphData, StatsSummary, ViewState};
pub use routes::{AppState, ServeOptions, serve};
pub use watch::DocumentWatcher;
