//! Collapse fan-in / fan-out siblings into one group vertex and expand them again.
//!
//! A group keeps its members' original edges (detached) so expansion restores the exact
//! adjacency the members had before compression.

use crate::error::{Error, Result};
use crate::graph::{CompressionMode, Graph, VertexId, VertexKind};
use indexmap::IndexMap;

/// Collapses simple sources and simple targets of every active layer. Returns the number of
/// groups created.
pub fn run(g: &mut Graph, spacing: f64) -> usize {
    let mut created = 0;
    for l in 0..g.layers.len() {
        for mode in [CompressionMode::Sources, CompressionMode::Targets] {
            let mut by_neighbour: IndexMap<VertexId, Vec<VertexId>> = IndexMap::new();
            for &v in &g.layers[l] {
                let vertex = g.vertex(v);
                if vertex.kind != VertexKind::Real {
                    continue;
                }
                let neighbour = match mode {
                    CompressionMode::Sources
                        if vertex.in_edges().is_empty() && vertex.out_edges().len() == 1 =>
                    {
                        g.edge(vertex.out_edges()[0]).target
                    }
                    CompressionMode::Targets
                        if vertex.out_edges().is_empty() && vertex.in_edges().len() == 1 =>
                    {
                        g.edge(vertex.in_edges()[0]).source
                    }
                    _ => continue,
                };
                by_neighbour.entry(neighbour).or_default().push(v);
            }
            for (neighbour, members) in by_neighbour {
                if members.len() >= 2 {
                    collapse(g, mode, l, members, Some(neighbour), spacing);
                    created += 1;
                }
            }
        }
    }
    if created > 0 {
        tracing::debug!(groups = created, "sibling compression");
    }
    created
}

/// Collapses isolated vertices sharing a layer into one group each.
pub fn collapse_isolated(g: &mut Graph, spacing: f64) -> usize {
    let mut created = 0;
    for l in 0..g.layers.len() {
        let members: Vec<VertexId> = g.layers[l]
            .iter()
            .copied()
            .filter(|&v| {
                let vertex = g.vertex(v);
                vertex.kind == VertexKind::Real && vertex.degree() == 0
            })
            .collect();
        if members.len() >= 2 {
            collapse(g, CompressionMode::Components, l, members, None, spacing);
            created += 1;
        }
    }
    if created > 0 {
        tracing::debug!(groups = created, "isolated vertex compression");
    }
    created
}

fn collapse(
    g: &mut Graph,
    mode: CompressionMode,
    layer: usize,
    members: Vec<VertexId>,
    neighbour: Option<VertexId>,
    spacing: f64,
) {
    let member_edges: Vec<_> = members
        .iter()
        .flat_map(|&m| {
            let vertex = g.vertex(m);
            vertex.in_edges().iter().chain(vertex.out_edges()).copied().collect::<Vec<_>>()
        })
        .collect();
    let weight: f64 = member_edges.iter().map(|&e| g.edge(e).weight).sum();
    let rank_hint = members.iter().filter_map(|&m| g.vertex(m).rank_hint).min();

    let sizes: Vec<f64> = members.iter().map(|&m| g.vertex(m).size).collect();
    let size = (members.len() as f64 * spacing).max(expanded_extent(&sizes, spacing));
    let (gid, gv) = g.insert_group(mode, members.clone(), size);

    for &e in &member_edges {
        g.detach_edge(e);
    }
    let synthetic = neighbour.map(|n| match mode {
        CompressionMode::Targets => g.insert_weighted_edge(n, gv, weight, false),
        _ => g.insert_weighted_edge(gv, n, weight, false),
    });
    {
        let group = g.group_mut(gid);
        group.member_edges = member_edges;
        group.synthetic_edge = synthetic;
    }

    let slot = members
        .iter()
        .filter_map(|&m| g.layers[layer].iter().position(|&x| x == m))
        .min()
        .unwrap_or(g.layers[layer].len());
    g.layers[layer].retain(|v| !members.contains(v));
    let slot = slot.min(g.layers[layer].len());
    g.layers[layer].insert(slot, gv);

    for &m in &members {
        let vertex = g.vertex_mut(m);
        vertex.live = false;
        vertex.index_in_layer = None;
    }
    g.vertex_mut(gv).rank_hint = rank_hint;
    g.reset_vertex_indices_in_layers();
}

/// Expands every collapsed group, in creation order.
pub fn decompress(g: &mut Graph, spacing: f64) -> Result<()> {
    let pending: Vec<VertexId> = g
        .groups()
        .iter()
        .filter(|group| !group.expanded)
        .map(|group| group.vertex)
        .collect();
    for gv in pending {
        expand_group(g, gv, spacing)?;
    }
    Ok(())
}

/// Replaces group vertex `gv` by its members, spread around the group's position.
pub fn expand_group(g: &mut Graph, gv: VertexId, spacing: f64) -> Result<()> {
    let vertex = g.vertex(gv);
    let Some(gid) = vertex.group().filter(|_| vertex.live) else {
        return Err(Error::MissingGroup { vertex: gv });
    };
    if g.group(gid).expanded {
        return Err(Error::MissingGroup { vertex: gv });
    }
    let Some(layer) = vertex.layer else {
        return Err(Error::UndefinedLayer { vertex: gv });
    };
    let Some(slot) = g.layers[layer].iter().position(|&x| x == gv) else {
        return Err(Error::MissingGroup { vertex: gv });
    };
    let center = vertex.position;

    let group = g.group(gid).clone();
    if let Some(synthetic) = group.synthetic_edge {
        g.detach_edge(synthetic);
        if let Some(route) = g.routes.get(&synthetic).cloned() {
            for &e in &group.member_edges {
                g.routes.insert(e, route.clone());
            }
        }
    }
    for &e in &group.member_edges {
        g.attach_edge(e);
    }

    let offsets = member_offsets(
        &group
            .members
            .iter()
            .map(|&m| g.vertex(m).size)
            .collect::<Vec<_>>(),
        spacing,
    );
    for (&m, offset) in group.members.iter().zip(offsets) {
        let vertex = g.vertex_mut(m);
        vertex.live = true;
        vertex.layer = Some(layer);
        vertex.position = center + offset;
    }

    g.layers[layer].splice(slot..=slot, group.members.iter().copied());
    g.vertex_mut(gv).live = false;
    g.vertex_mut(gv).index_in_layer = None;
    g.group_mut(gid).expanded = true;
    g.reset_vertex_indices_in_layers();
    Ok(())
}

/// Center offsets of members relative to the group center. Consecutive members are at least
/// `spacing` apart and never overlap.
fn member_offsets(sizes: &[f64], spacing: f64) -> Vec<f64> {
    let mut offsets: Vec<f64> = Vec::with_capacity(sizes.len());
    let mut cursor = 0.0;
    for (i, &size) in sizes.iter().enumerate() {
        if i > 0 {
            cursor += spacing.max((sizes[i - 1] + size) / 2.0);
        }
        offsets.push(cursor);
    }
    // Center the block's full extent, not just the first and last centers.
    let mid = match (sizes.first(), sizes.last(), offsets.last()) {
        (Some(first), Some(last), Some(end)) => (end + (last - first) / 2.0) / 2.0,
        _ => 0.0,
    };
    offsets.iter_mut().for_each(|o| *o -= mid);
    offsets
}

/// Full extent of the members once [`member_offsets`] has spread them.
fn expanded_extent(sizes: &[f64], spacing: f64) -> f64 {
    let (Some(first), Some(last)) = (sizes.first(), sizes.last()) else {
        return 0.0;
    };
    let offsets = member_offsets(sizes, spacing);
    let span = offsets.last().copied().unwrap_or(0.0) - offsets.first().copied().unwrap_or(0.0);
    span + (first + last) / 2.0
}
