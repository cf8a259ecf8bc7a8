use super::assets::INDEX_HTML;
use super::data::GraphData;
use super::watch::DocumentWatcher;
use crate::fs::default_fs;
use crate::session::{Action, DeferredCanvas, Session};
use crate::style;
use axum::{
    Json, Router,
    extract::State,
    response::{
        Html, IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use log::{debug, warn};
use serde_json::Value;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

const WATCH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub port: u16,
    pub open_browser: bool,
    /// Reload the document whenever this file changes on disk.
    pub watch: Option<PathBuf>,
}

/// Application state shared across handlers
pub struct AppState {
    session: Mutex<Session<DeferredCanvas>>,
    /// Revision numbers of externally triggered changes.
    changes: broadcast::Sender<u64>,
}

impl AppState {
    pub fn new(session: Session<DeferredCanvas>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            session: Mutex::new(session),
            changes,
        }
    }

    /// Current frame for the viewer, handing over any pending viewport fit.
    pub async fn snapshot(&self) -> GraphData {
        let mut session = self.session.lock().await;
        let fit = session.canvas_mut().take_fit();
        GraphData::from_session(&session, fit)
    }

    pub async fn apply(&self, action: Action) -> GraphData {
        debug!("Viewer action: {:?}", action);
        let mut session = self.session.lock().await;
        action.apply(&mut session);
        let fit = session.canvas_mut().take_fit();
        GraphData::from_session(&session, fit)
    }

    pub async fn replace_document(&self, document: Value) -> GraphData {
        let mut session = self.session.lock().await;
        session.on_document_changed(document);
        let fit = session.canvas_mut().take_fit();
        GraphData::from_session(&session, fit)
    }

    /// Load a document that changed outside the viewer and notify listeners.
    pub async fn reload_document(&self, document: Value) -> bool {
        let mut session = self.session.lock().await;
        if session.set_document(document).is_none() {
            return false;
        }
        // No receivers just means no viewer is listening
        let _ = self.changes.send(session.revision());
        true
    }
}

/// Start the HTTP server for the interactive viewer
pub async fn serve(
    session: Session<DeferredCanvas>,
    options: ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(session));

    if let Some(path) = options.watch.clone() {
        tokio::spawn(watch_document(state.clone(), path));
    }

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/action", post(action_handler))
        .route("/api/document", post(document_handler))
        .route("/api/events", get(events_handler))
        .layer(cors)
        .with_state(state);

    let addr = format!("127.0.0.1:{}", options.port);
    let url = format!("http://{}", addr);

    style::header("Starting jsonmap viewer...");
    println!("Open in browser: {}", style::url(&url));
    println!("Press Ctrl+C to stop");

    if options.open_browser {
        if let Err(e) = open::that(&url) {
            style::warning(&format!("Could not open browser: {}", e));
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn watch_document(state: Arc<AppState>, path: PathBuf) {
    let fs = default_fs();
    let mut watcher = DocumentWatcher::new(path, fs);
    let mut ticker = tokio::time::interval(WATCH_INTERVAL);
    style::status(&format!("Watching {}", style::path(watcher.path())));

    loop {
        ticker.tick().await;
        match watcher.poll(fs) {
            Ok(Some(document)) => {
                if state.reload_document(document).await {
                    style::status(&style::file_changed(&watcher.path().display().to_string()));
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Keeping previous document: {}", e),
        }
    }
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.snapshot().await)
}

async fn action_handler(
    State(state): State<Arc<AppState>>,
    Json(action): Json<Action>,
) -> impl IntoResponse {
    Json(state.apply(action).await)
}

async fn document_handler(
    State(state): State<Arc<AppState>>,
    Json(document): Json<Value>,
) -> impl IntoResponse {
    Json(state.replace_document(document).await)
}

async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.changes.subscribe()).filter_map(|result| match result {
        Ok(revision) => Some(Ok(Event::default().event("changed").data(revision.to_string()))),
        // Lagged receivers only missed revision numbers; the next one will do
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
