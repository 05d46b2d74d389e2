//! Longest-path-from-sink layering.
//!
//! Sinks are peeled off repeatedly; each batch becomes one layer. The batches are collected
//! sink side first and reversed at the end, so layer 0 holds the vertices furthest from any sink
//! and every sink lands in the last layer.

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};

pub fn run(g: &mut Graph) -> Result<()> {
    let live: Vec<VertexId> = g.live_vertices().collect();
    g.layers.clear();
    if live.is_empty() {
        return Ok(());
    }

    let mut out_degree = vec![0usize; g.vertex_capacity()];
    for &v in &live {
        out_degree[v.0] = g.vertex(v).out_edges().len();
    }

    let mut current: Vec<VertexId> = live.iter().copied().filter(|v| out_degree[v.0] == 0).collect();
    let mut batches: Vec<Vec<VertexId>> = Vec::new();
    let mut remaining = live.len();

    while remaining > 0 {
        if current.is_empty() {
            return Err(Error::CyclicGraph { remaining });
        }
        remaining -= current.len();

        let mut next: Vec<VertexId> = Vec::new();
        for &v in &current {
            for (u, _) in g.predecessors(v) {
                out_degree[u.0] -= 1;
                if out_degree[u.0] == 0 {
                    next.push(u);
                }
            }
        }
        batches.push(current);
        current = next;
    }

    batches.reverse();
    for layer in &mut batches {
        // Hinted vertices first (ascending hint), then insertion order.
        layer.sort_by_key(|&v| {
            let hint = g.vertex(v).rank_hint;
            (hint.is_none(), hint, v)
        });
    }
    g.layers = batches;
    g.reset_vertex_indices_in_layers();

    tracing::debug!(layers = g.layers.len(), "layer assignment");
    Ok(())
}
