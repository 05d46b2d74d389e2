//! The full layout run, from host input to scaled coordinates.

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::input::{Canvas, LayoutGraph, LayoutResult, Point};
use crate::options::{Direction, LayoutOptions, Positioner};
use crate::{acyclic, components, compress, normalize, order, position, rank, scale};
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeMap;
use strata_lp::Solver;

/// Builds the arena from validated input. Self-loops are dropped and parallel edges share one
/// arena edge; the returned vector maps each input edge to its arena edge.
pub fn build_graph(input: &LayoutGraph) -> (Graph, Vec<Option<EdgeId>>) {
    let mut g = Graph::new();
    let mut index: HashMap<&str, VertexId> = HashMap::default();
    for node in &input.nodes {
        let v = g.add_vertex(node.size);
        g.vertex_mut(v).rank_hint = node.rank_hint;
        index.insert(node.id.as_str(), v);
    }

    let mut by_endpoints: HashMap<(VertexId, VertexId), EdgeId> = HashMap::default();
    let mut edge_map: Vec<Option<EdgeId>> = Vec::with_capacity(input.edges.len());
    for edge in &input.edges {
        let (Some(&s), Some(&t)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        else {
            edge_map.push(None);
            continue;
        };
        if s == t {
            tracing::warn!(edge = %edge.id, node = %edge.source, "dropping self-loop");
            edge_map.push(None);
            continue;
        }
        let e = match by_endpoints.get(&(s, t)) {
            Some(&e) => {
                g.edge_mut(e).weight += 1.0;
                e
            }
            None => {
                let e = g.insert_edge(s, t);
                by_endpoints.insert((s, t), e);
                e
            }
        };
        edge_map.push(Some(e));
    }
    (g, edge_map)
}

/// Splits the canvas height between components in proportion to their widest layer, after
/// reserving the gaps between them. Used by the even positioner only.
fn even_shares(comps: &[components::LayeredComponent], height: f64, gap: f64) -> Vec<f64> {
    let widths: Vec<usize> = comps
        .iter()
        .map(|c| c.layers.iter().map(Vec::len).max().unwrap_or(0))
        .collect();
    let total: usize = widths.iter().sum();
    let gaps = gap * comps.len().saturating_sub(1) as f64;
    let available = if height - gaps > 0.0 { height - gaps } else { height };
    widths
        .iter()
        .map(|&w| if total == 0 { 0.0 } else { available * w as f64 / total as f64 })
        .collect()
}

pub fn run(
    input: &LayoutGraph,
    opts: &LayoutOptions,
    solver: Option<&dyn Solver>,
) -> Result<LayoutResult> {
    input.validate()?;

    let canvas = match opts.direction {
        Direction::LeftToRight => input.canvas,
        Direction::TopToBottom => Canvas {
            width: input.canvas.height,
            height: input.canvas.width,
        },
    };

    let (mut g, edge_map) = build_graph(input);
    tracing::debug!(
        vertices = g.vertex_count(),
        edges = g.edge_count(),
        "layout input"
    );
    if g.vertex_count() == 0 {
        return Ok(LayoutResult {
            width: input.canvas.width,
            height: input.canvas.height,
            ..Default::default()
        });
    }

    let reversed_edges = acyclic::run(&mut g).len();
    g.merge_parallel_edges();
    rank::run(&mut g)?;

    let spacing = opts.spacing();
    let order_opts = opts.order_options();
    if opts.compress {
        compress::collapse_isolated(&mut g, opts.compression_spacing);
    }

    let mut comps = components::split(&mut g);
    let shares = even_shares(&comps, canvas.height, opts.component_gap);
    let mut crossings = 0.0;
    for (comp, &share) in comps.iter_mut().zip(&shares) {
        components::enter(&mut g, comp);
        if opts.compress {
            compress::run(&mut g, opts.compression_spacing);
        }
        normalize::run(&mut g)?;
        crossings += order::order(&mut g, &order_opts, solver).crossings;
        match opts.positioner {
            Positioner::Aligned => position::position(&mut g, &spacing, opts.alignment_passes)?,
            Positioner::Even => position::position_even(&mut g, share)?,
        }
        components::leave(&mut g, comp);
    }
    components::merge(&mut g, comps, opts.component_gap);
    normalize::undo(&mut g);
    compress::decompress(&mut g, opts.compression_spacing)?;

    let scaled = if opts.scale_to_canvas {
        scale::scale(&g, canvas)
    } else {
        scale::raw(&g, opts.layer_distance)
    };

    let orient = |p: Point| match opts.direction {
        Direction::LeftToRight => p,
        Direction::TopToBottom => Point { x: p.y, y: p.x },
    };

    let mut positions: BTreeMap<String, Point> = BTreeMap::new();
    for (i, node) in input.nodes.iter().enumerate() {
        let v = VertexId(i);
        let point = scaled.point(v).ok_or(Error::UndefinedLayer { vertex: v })?;
        positions.insert(node.id.clone(), orient(point));
    }

    let node_index: HashMap<&str, VertexId> = input
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), VertexId(i)))
        .collect();
    let mut edges: BTreeMap<String, Vec<Point>> = BTreeMap::new();
    for (edge, mapped) in input.edges.iter().zip(&edge_map) {
        let mut points: Vec<Point> = Vec::new();
        if let Some(e) = mapped.map(|e| g.resolve_edge(e)) {
            points = g
                .route(e)
                .iter()
                .filter_map(|&v| scaled.point(v))
                .map(orient)
                .collect();
            if node_index.get(edge.source.as_str()) != Some(&g.edge(e).source) {
                points.reverse();
            }
        }
        edges.insert(edge.id.clone(), points);
    }

    let (width, height) = match opts.direction {
        Direction::LeftToRight => (scaled.width, scaled.height),
        Direction::TopToBottom => (scaled.height, scaled.width),
    };
    tracing::debug!(crossings, reversed_edges, width, height, "layout finished");
    Ok(LayoutResult {
        positions,
        edges,
        width,
        height,
        crossings,
        reversed_edges,
    })
}
