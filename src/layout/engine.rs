use super::layered::{self, Extent, Spacing};
use super::size::estimate_size;
use crate::model::{GraphEdge, GraphNode, LayoutDirection, Position, SizeMode};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Graph contains a cycle through node {0}")]
    Cycle(String),
    #[error("Non-finite coordinate computed for node {0}")]
    NonFinite(String),
}

/// Tunable spacing inputs for the layered layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    /// Padding added around each node's estimated size.
    pub safety_margin: f64,
    /// Offset of the whole drawing from the canvas origin.
    pub margin: f64,
    pub compact_separation: f64,
    pub medium_separation: f64,
    pub expanded_separation: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            safety_margin: 15.0,
            margin: 50.0,
            compact_separation: 40.0,
            medium_separation: 60.0,
            expanded_separation: 80.0,
        }
    }
}

impl LayoutSettings {
    pub fn base_separation(&self, mode: SizeMode) -> f64 {
        match mode {
            SizeMode::Compact => self.compact_separation,
            SizeMode::Medium => self.medium_separation,
            SizeMode::Expanded => self.expanded_separation,
        }
    }

    /// Separation between siblings and between ranks for a graph of `node_count` nodes.
    ///
    /// Small graphs get more air, large graphs are packed tighter. Sibling
    /// separation is boosted for left-right flow and rank separation for
    /// top-bottom flow, since nodes are wider than tall.
    pub fn separations(
        &self,
        mode: SizeMode,
        direction: LayoutDirection,
        node_count: usize,
    ) -> (f64, f64) {
        let base = self.base_separation(mode);
        let density = if node_count < 20 {
            1.5
        } else if node_count > 100 {
            0.8
        } else {
            1.0
        };

        let (node_boost, rank_boost) = match direction {
            LayoutDirection::LeftRight => (1.2, 1.0),
            LayoutDirection::TopBottom => (1.0, 1.2),
        };

        (base * node_boost * density, base * rank_boost * density)
    }
}

/// Nodes with positions and sizes, plus the edges that survived filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    settings: LayoutSettings,
}

impl LayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Position `nodes`, never failing.
    ///
    /// On any internal failure the input nodes come back with the positions
    /// they already had and a warning is logged.
    pub fn layout(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        direction: LayoutDirection,
        mode: SizeMode,
    ) -> LayoutResult {
        match self.try_layout(nodes, edges, direction, mode) {
            Ok(result) => result,
            Err(e) => {
                warn!("Layout failed, keeping previous positions: {}", e);
                LayoutResult {
                    nodes: nodes.to_vec(),
                    edges: filter_edges(nodes, edges),
                }
            }
        }
    }

    pub fn try_layout(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        direction: LayoutDirection,
        mode: SizeMode,
    ) -> Result<LayoutResult, LayoutError> {
        if nodes.is_empty() {
            return Ok(LayoutResult::default());
        }

        let edges = filter_edges(nodes, edges);
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();
        let pairs: Vec<(usize, usize)> = edges
            .iter()
            .map(|e| (index[e.source.as_str()], index[e.target.as_str()]))
            .collect();

        let sizes: Vec<_> = nodes.iter().map(|n| estimate_size(n, mode)).collect();
        let margin = self.settings.safety_margin;
        let extents: Vec<Extent> = sizes
            .iter()
            .map(|s| Extent {
                width: s.width + margin,
                height: s.height + margin,
            })
            .collect();

        let (node_sep, rank_sep) = self.settings.separations(mode, direction, nodes.len());
        let spacing = Spacing {
            node_sep,
            rank_sep,
            margin: self.settings.margin,
        };

        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let centres = layered::place(&ids, &extents, &pairs, direction, spacing)?;

        debug!(
            "Laid out {} nodes and {} edges ({}, {}, node_sep={:.1}, rank_sep={:.1})",
            nodes.len(),
            edges.len(),
            direction,
            mode,
            node_sep,
            rank_sep
        );

        let positioned = nodes
            .iter()
            .zip(sizes)
            .zip(centres)
            .map(|((node, size), (cx, cy))| {
                let mut node = node.clone();
                node.position = Position::new(cx - size.width / 2.0, cy - size.height / 2.0);
                node.size = Some(size);
                node
            })
            .collect();

        Ok(LayoutResult {
            nodes: positioned,
            edges,
        })
    }
}

/// Drop edges whose endpoints are not both among `nodes`.
pub fn filter_edges(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<GraphEdge> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let kept: Vec<GraphEdge> = edges
        .iter()
        .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
        .cloned()
        .collect();

    if kept.len() < edges.len() {
        debug!("Dropped {} dangling edges before layout", edges.len() - kept.len());
    }
    kept
}
