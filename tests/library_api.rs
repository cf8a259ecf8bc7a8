//! Integration tests for the jsonmap library API.

use jsonmap::{
    Canvas, Config, FitViewOptions, JsonmapError, LayoutDirection, Session, SessionOptions,
    SizeMode, ViewOptions, search, stats, visualize,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_document(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn fruits(dir: &TempDir) -> PathBuf {
    write_document(
        dir,
        "fruits.json",
        r#"{"fruits": [{"name": "Apple", "color": "red"}, {"name": "Banana"}]}"#,
    )
}

#[test]
fn test_visualize_document() {
    let dir = TempDir::new().unwrap();
    let data = visualize(&fruits(&dir), &ViewOptions::default()).unwrap();

    assert_eq!(data.nodes.len(), 4);
    assert_eq!(data.edges.len(), 3);
    assert_eq!(data.stats.max_depth, 3);
    assert_eq!(data.stats.visible_nodes, 4);
    assert!(data.fit_view.is_some(), "first frame asks for a viewport fit");

    // Every node has been given a footprint, children sit to the right
    assert!(data.nodes.iter().all(|n| n.size.is_some()));
    assert!(data.nodes[1].position.x > data.nodes[0].position.x);
}

#[test]
fn test_visualize_with_options() {
    let dir = TempDir::new().unwrap();
    let options = ViewOptions {
        direction: LayoutDirection::TopBottom,
        size_mode: SizeMode::Compact,
        level: 1,
        ..Default::default()
    };

    let data = visualize(&fruits(&dir), &options).unwrap();
    assert_eq!(data.view.level, 1);
    assert_eq!(data.stats.visible_nodes, 2);
    let visible: Vec<_> = data.nodes.iter().filter(|n| !n.hidden).collect();
    assert!(visible[1].position.y > visible[0].position.y);
}

#[test]
fn test_visualize_invalid_path() {
    let result = visualize(
        &PathBuf::from("/nonexistent/doc.json"),
        &ViewOptions::default(),
    );

    match result {
        Err(JsonmapError::PathNotFound(_)) => {}
        Err(e) => panic!("Expected PathNotFound error, got: {:?}", e),
        Ok(_) => panic!("Expected error for invalid path"),
    }
}

#[test]
fn test_malformed_document_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "broken.json", "{\"a\": [1, 2");

    match stats(&path) {
        Err(JsonmapError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected parse error, got: {:?}", other),
    }
}

#[test]
fn test_stats() {
    let dir = TempDir::new().unwrap();
    let stats = stats(&fruits(&dir)).unwrap();

    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.property_count, 4);
    assert!(stats.formatted_size().ends_with("bytes"));
}

#[test]
fn test_search() {
    let dir = TempDir::new().unwrap();
    let hits = search(&fruits(&dir), "RED").unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].label, "0");
    assert_eq!(hits[0].properties[0].key, "color");
}

#[test]
fn test_config_next_to_document() {
    let dir = TempDir::new().unwrap();
    write_document(
        &dir,
        ".jsonmap.toml",
        "[view]\ndirection = \"tb\"\nlevel = 0\n\n[server]\nport = 8123\n",
    );

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.view.direction, LayoutDirection::TopBottom);
    assert_eq!(config.server.port, 8123);

    let data = visualize(&fruits(&dir), &ViewOptions::from_config(&config)).unwrap();
    assert_eq!(data.stats.visible_nodes, 1);
}

#[derive(Default)]
struct CountingCanvas {
    fits: usize,
}

impl Canvas for CountingCanvas {
    fn fit_view(&mut self, _options: &FitViewOptions) {
        self.fits += 1;
    }
}

#[test]
fn test_session_with_custom_canvas() {
    let mut session = Session::with_document(
        CountingCanvas::default(),
        SessionOptions::default(),
        json!({"fruits": [{"name": "Apple"}, {"name": "Banana"}]}),
    );
    assert_eq!(session.canvas().fits, 1);

    session.collapse_all();
    assert_eq!(session.graph().visible_nodes().len(), 1);

    session.toggle_node("node-0");
    session.toggle_node("node-1");
    assert_eq!(session.graph().visible_nodes().len(), 4);
    assert_eq!(session.canvas().fits, 4);
}
