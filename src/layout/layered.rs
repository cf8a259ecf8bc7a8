//! Layered placement of a directed acyclic graph.
//!
//! Phases:
//!   1. Rank assignment (longest path from the sources, via topological order)
//!   2. Spanning forest: each node hangs under the source of its first
//!      incoming edge; siblings keep input order
//!   3. Primary axis: one band per rank, as thick as its largest node
//!   4. Cross axis: every subtree gets a contiguous interval, parents are
//!      centred over their children
//!
//! Two nodes of one rank always sit in disjoint subtree intervals, and nodes of
//! different ranks sit in disjoint bands, so boxes never overlap.

use super::engine::LayoutError;
use crate::model::LayoutDirection;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

/// Node footprint fed into placement (already padded by the caller).
#[derive(Debug, Clone, Copy)]
pub(super) struct Extent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Spacing {
    pub node_sep: f64,
    pub rank_sep: f64,
    pub margin: f64,
}

/// Compute the centre of every node, in input order.
///
/// `edges` are `(source, target)` indices into `extents`.
pub(super) fn place(
    ids: &[&str],
    extents: &[Extent],
    edges: &[(usize, usize)],
    direction: LayoutDirection,
    spacing: Spacing,
) -> Result<Vec<(f64, f64)>, LayoutError> {
    let count = extents.len();
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(count, edges.len());
    let indices: Vec<NodeIndex> = (0..count).map(|i| graph.add_node(i)).collect();
    for &(source, target) in edges {
        graph.add_edge(indices[source], indices[target], ());
    }

    let order: Vec<usize> = toposort(&graph, None)
        .map_err(|cycle| LayoutError::Cycle(ids[graph[cycle.node_id()]].to_string()))?
        .into_iter()
        .map(|idx| graph[idx])
        .collect();

    let ranks = assign_ranks(&order, edges, count);
    let children = spanning_children(edges, count);

    let (primary, cross): (Vec<f64>, Vec<f64>) = extents
        .iter()
        .map(|e| match direction {
            LayoutDirection::LeftRight => (e.width, e.height),
            LayoutDirection::TopBottom => (e.height, e.width),
        })
        .unzip();

    let primary_centres = band_centres(&ranks, &primary, spacing);
    let cross_centres = cross_centres(&order, &children, &cross, spacing);

    let centres: Vec<(f64, f64)> = primary_centres
        .into_iter()
        .zip(cross_centres)
        .map(|(p, c)| match direction {
            LayoutDirection::LeftRight => (p, c),
            LayoutDirection::TopBottom => (c, p),
        })
        .collect();

    if let Some(i) = centres
        .iter()
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(LayoutError::NonFinite(ids[i].to_string()));
    }

    Ok(centres)
}

fn assign_ranks(order: &[usize], edges: &[(usize, usize)], count: usize) -> Vec<usize> {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); count];
    for &(source, target) in edges {
        outgoing[source].push(target);
    }

    let mut ranks = vec![0usize; count];
    for &node in order {
        for &target in &outgoing[node] {
            ranks[target] = ranks[target].max(ranks[node] + 1);
        }
    }
    ranks
}

/// Children of each node in the spanning forest, ordered by input index.
fn spanning_children(edges: &[(usize, usize)], count: usize) -> Vec<Vec<usize>> {
    let mut parent: Vec<Option<usize>> = vec![None; count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for &(source, target) in edges {
        if parent[target].is_none() && source != target {
            parent[target] = Some(source);
            children[source].push(target);
        }
    }
    for list in &mut children {
        list.sort();
    }
    children
}

fn band_centres(ranks: &[usize], primary: &[f64], spacing: Spacing) -> Vec<f64> {
    let rank_count = ranks.iter().copied().max().map_or(0, |r| r + 1);
    let mut thickness = vec![0.0f64; rank_count];
    for (&rank, &size) in ranks.iter().zip(primary) {
        thickness[rank] = thickness[rank].max(size);
    }

    let mut starts = Vec::with_capacity(rank_count);
    let mut cursor = spacing.margin;
    for &t in &thickness {
        starts.push(cursor);
        cursor += t + spacing.rank_sep;
    }

    ranks
        .iter()
        .map(|&rank| starts[rank] + thickness[rank] / 2.0)
        .collect()
}

fn cross_centres(
    order: &[usize],
    children: &[Vec<usize>],
    cross: &[f64],
    spacing: Spacing,
) -> Vec<f64> {
    let count = cross.len();
    let gap = spacing.node_sep;

    // Children always follow their spanning parent in topological order,
    // so walking it backwards sizes every subtree before its parent.
    let mut span = cross.to_vec();
    for &node in order.iter().rev() {
        let kids = &children[node];
        if kids.is_empty() {
            continue;
        }
        let packed = packed_span(kids, &span, gap);
        span[node] = span[node].max(packed);
    }

    let mut has_parent = vec![false; count];
    for kids in children {
        for &k in kids {
            has_parent[k] = true;
        }
    }

    let mut start = vec![0.0f64; count];
    let mut cursor = spacing.margin;
    for node in (0..count).filter(|&n| !has_parent[n]) {
        start[node] = cursor;
        cursor += span[node] + gap;
    }

    let mut centres = vec![0.0f64; count];
    for &node in order {
        centres[node] = start[node] + span[node] / 2.0;

        let kids = &children[node];
        if kids.is_empty() {
            continue;
        }
        let packed = packed_span(kids, &span, gap);
        let mut child_cursor = start[node] + (span[node] - packed) / 2.0;
        for &kid in kids {
            start[kid] = child_cursor;
            child_cursor += span[kid] + gap;
        }
    }

    centres
}

fn packed_span(kids: &[usize], span: &[f64], gap: f64) -> f64 {
    kids.iter().map(|&k| span[k]).sum::<f64>() + gap * kids.len().saturating_sub(1) as f64
}
