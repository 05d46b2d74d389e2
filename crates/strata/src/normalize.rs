//! Replace multi-layer edges by chains of virtual vertices, and undo it.
//!
//! After [`run`] every attached edge connects adjacent layers. [`undo`] removes the chains,
//! re-attaches the original edges and keeps the virtual vertices as the edges' bend points.

use crate::error::{Error, Result};
use crate::graph::{Chain, EdgeId, Graph, VertexId, VertexKind};

/// Inserts virtual chains into the active layers and returns the number of virtual vertices.
///
/// Only out-edges of vertices in the active layers are considered; vertices of other
/// components carry their own local layer numbers.
pub fn run(g: &mut Graph) -> Result<usize> {
    let edges: Vec<EdgeId> = g
        .layers
        .iter()
        .flatten()
        .flat_map(|&v| g.vertex(v).out_edges().iter().copied())
        .collect();
    let mut inserted = 0;

    for e in edges {
        let edge = g.edge(e);
        let (source, target, weight) = (edge.source, edge.target, edge.weight);
        let ls = layer_of(g, source)?;
        let lt = layer_of(g, target)?;
        if lt <= ls + 1 {
            continue;
        }
        let span = lt - ls;
        let from = group_size(g, source);
        let to = group_size(g, target);

        g.detach_edge(e);
        let mut vertices: Vec<VertexId> = Vec::with_capacity(span - 1);
        let mut segments: Vec<EdgeId> = Vec::with_capacity(span);
        let mut prev = source;
        for k in 1..span {
            let size = interpolate(from, to, k as f64 / span as f64);
            let v = g.insert_vertex(VertexKind::Virtual, size);
            g.vertex_mut(v).layer = Some(ls + k);
            g.layers[ls + k].push(v);
            segments.push(g.insert_weighted_edge(prev, v, weight, true));
            vertices.push(v);
            prev = v;
        }
        segments.push(g.insert_weighted_edge(prev, target, weight, true));

        inserted += vertices.len();
        g.chains.push(Chain {
            edge: e,
            vertices,
            segments,
        });
    }

    g.reset_vertex_indices_in_layers();
    if inserted > 0 {
        tracing::debug!(virtual_vertices = inserted, "virtual vertex insertion");
    }
    Ok(inserted)
}

/// Removes every chain and re-attaches its original edge.
pub fn undo(g: &mut Graph) {
    let chains = std::mem::take(&mut g.chains);
    for chain in chains {
        for &s in &chain.segments {
            g.detach_edge(s);
        }
        for &v in &chain.vertices {
            g.vertex_mut(v).live = false;
        }
        g.attach_edge(chain.edge);
        g.routes.insert(chain.edge, chain.vertices);
    }
    g.retain_live_in_layers();
}

fn layer_of(g: &Graph, v: VertexId) -> Result<usize> {
    g.vertex(v)
        .layer
        .ok_or(Error::UndefinedLayer { vertex: v })
}

fn group_size(g: &Graph, v: VertexId) -> f64 {
    let vertex = g.vertex(v);
    if vertex.group().is_some() { vertex.size } else { 0.0 }
}

/// Linear interpolation between the sizes of a chain's endpoints.
fn interpolate(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

#[cfg(test)]
mod tests {
    use super::interpolate;

    #[test]
    fn interpolate_fades_from_a_group_source() {
        assert_eq!(interpolate(60.0, 0.0, 0.25), 45.0);
        assert_eq!(interpolate(60.0, 0.0, 0.5), 30.0);
    }

    #[test]
    fn interpolate_without_groups_is_zero() {
        assert_eq!(interpolate(0.0, 0.0, 0.25), 0.0);
    }
}
