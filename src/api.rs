//! Library API for jsonmap.
//!
//! These functions return `Result`s instead of printing and exiting, so the
//! engine can be driven from other Rust code.
//!
//! # Example
//!
//! ```no_run
//! use jsonmap::{ViewOptions, visualize};
//! use std::path::Path;
//!
//! let data = visualize(Path::new("data.json"), &ViewOptions::default())?;
//! println!("{} nodes, {} visible", data.stats.node_count, data.stats.visible_nodes);
//! # Ok::<(), jsonmap::JsonmapError>(())
//! ```

use crate::analysis::{DocumentStats, search_nodes};
use crate::config::{Config, ConfigError};
use crate::fs::{FileSystem, default_fs};
use crate::graph::{GraphData, build_graph};
use crate::layout::LayoutSettings;
use crate::model::{LayoutDirection, SHOW_ALL_LEVEL, ScalarProperty, SizeMode};
use crate::session::{DeferredCanvas, FitViewOptions, Session, SessionOptions};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during jsonmap operations.
#[derive(Debug, Error)]
pub enum JsonmapError {
    /// The specified path could not be found or resolved.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The document is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a document is presented when first opened.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub direction: LayoutDirection,
    pub size_mode: SizeMode,
    /// Deepest level shown, root = 0. [`SHOW_ALL_LEVEL`] shows everything.
    pub level: usize,
    pub layout: LayoutSettings,
    pub fit_view: FitViewOptions,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            direction: config.view.direction,
            size_mode: config.view.size_mode,
            level: config.view.level,
            layout: config.layout.clone(),
            fit_view: config.fit_view,
        }
    }
}

/// A node matched by [`search`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub label: String,
    pub depth: usize,
    /// Properties whose key or value contain the term.
    pub properties: Vec<ScalarProperty>,
}

/// Read and parse a JSON document.
pub fn load_document(path: &Path) -> Result<Value, JsonmapError> {
    load_document_with_fs(path, default_fs())
}

pub fn load_document_with_fs(path: &Path, fs: &dyn FileSystem) -> Result<Value, JsonmapError> {
    if !fs.exists(path) {
        return Err(JsonmapError::PathNotFound(path.to_path_buf()));
    }
    let content = fs.read_to_string(path)?;
    parse_document(&content, path)
}

/// Parse document text; `path` is only used in the error.
pub fn parse_document(content: &str, path: &Path) -> Result<Value, JsonmapError> {
    serde_json::from_str(content).map_err(|source| JsonmapError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Open a session on `document` with the initial view from `options` applied.
pub fn open_session(document: Value, options: &ViewOptions) -> Session<DeferredCanvas> {
    let session_options = SessionOptions {
        direction: options.direction,
        size_mode: options.size_mode,
        layout: options.layout.clone(),
        fit_view: options.fit_view,
    };
    let mut session = Session::with_document(DeferredCanvas::new(), session_options, document);
    if options.level < SHOW_ALL_LEVEL {
        session.set_level_threshold(options.level);
    }
    session
}

/// Lay out a JSON file and return the positioned diagram.
///
/// # Arguments
///
/// * `path` - The JSON document to visualize
/// * `options` - Initial direction, size mode and collapse level
///
/// # Returns
///
/// The same snapshot the web viewer receives, including hidden nodes.
pub fn visualize(path: &Path, options: &ViewOptions) -> Result<GraphData, JsonmapError> {
    let document = load_document(path)?;
    let mut session = open_session(document, options);
    let fit = session.canvas_mut().take_fit();
    Ok(GraphData::from_session(&session, fit))
}

/// Compute document metrics for a JSON file.
pub fn stats(path: &Path) -> Result<DocumentStats, JsonmapError> {
    let document = load_document(path)?;
    Ok(DocumentStats::from_document(&document))
}

/// Find nodes whose label, property key or property value contains `term`,
/// ignoring case. Hits come back in pre-order.
pub fn search(path: &Path, term: &str) -> Result<Vec<SearchHit>, JsonmapError> {
    let document = load_document(path)?;
    Ok(search_document(&document, term))
}

pub fn search_document(document: &Value, term: &str) -> Vec<SearchHit> {
    let graph = build_graph(document);
    let needle = term.trim().to_lowercase();

    search_nodes(&graph, term)
        .iter()
        .filter_map(|id| graph.node(id))
        .map(|node| SearchHit {
            id: node.id.clone(),
            label: node.label.clone(),
            depth: node.depth,
            properties: node
                .properties
                .iter()
                .filter(|p| {
                    p.key.to_lowercase().contains(&needle)
                        || p.value.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect(),
        })
        .collect()
}
