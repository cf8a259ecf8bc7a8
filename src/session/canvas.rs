//! What the orchestrator needs from the rendering surface.

use serde::{Deserialize, Serialize};

/// Pan/zoom request so that all visible nodes fit the viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FitViewOptions {
    /// Fraction of the viewport kept free around the content.
    pub padding: f64,
    pub max_zoom: f64,
    pub duration_ms: u64,
}

impl Default for FitViewOptions {
    fn default() -> Self {
        Self {
            padding: 0.2,
            max_zoom: 1.5,
            duration_ms: 200,
        }
    }
}

/// Rendering collaborator. Nodes and edges are read from the session; the
/// only thing pushed to the canvas is the request to refit the viewport.
pub trait Canvas {
    fn fit_view(&mut self, options: &FitViewOptions);
}

/// Canvas that remembers the latest fit request until a renderer collects it.
///
/// Used when the real renderer lives on the other side of a request/response
/// boundary and polls for state.
#[derive(Debug, Default, Clone)]
pub struct DeferredCanvas {
    pending_fit: Option<FitViewOptions>,
    fit_count: usize,
}

impl DeferredCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the pending fit request to the renderer, at most once.
    pub fn take_fit(&mut self) -> Option<FitViewOptions> {
        self.pending_fit.take()
    }

    pub fn fit_count(&self) -> usize {
        self.fit_count
    }
}

impl Canvas for DeferredCanvas {
    fn fit_view(&mut self, options: &FitViewOptions) {
        self.pending_fit = Some(*options);
        self.fit_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_canvas_hands_out_fit_once() {
        let mut canvas = DeferredCanvas::new();
        assert!(canvas.take_fit().is_none());

        canvas.fit_view(&FitViewOptions::default());
        canvas.fit_view(&FitViewOptions {
            padding: 0.1,
            ..Default::default()
        });
        assert_eq!(canvas.fit_count(), 2);
        assert_eq!(canvas.take_fit().map(|f| f.padding), Some(0.1));
        assert!(canvas.take_fit().is_none());
    }
}
