//! Fit the final coordinates into the host canvas.
//!
//! The spacing-axis extent is compared with the canvas height: a taller layout keeps its extent
//! and widens the canvas by the same ratio, a shorter one is centered vertically. Layers are
//! then spread evenly across the (possibly widened) width.

use crate::graph::{Graph, VertexId};
use crate::input::{Canvas, Point};
use crate::position::layer_coordinate;

#[derive(Debug, Clone)]
pub struct Scaled {
    /// Indexed by vertex id; `None` for vertices that are not part of the drawing.
    pub points: Vec<Option<Point>>,
    pub width: f64,
    pub height: f64,
}

impl Scaled {
    pub fn point(&self, v: VertexId) -> Option<Point> {
        self.points.get(v.0).copied().flatten()
    }
}

/// Live vertices plus the virtual vertices kept as edge bend points.
fn drawn(g: &Graph) -> Vec<(VertexId, usize)> {
    (0..g.vertex_capacity())
        .map(VertexId)
        .filter(|&v| {
            let vertex = g.vertex(v);
            vertex.live || vertex.is_virtual()
        })
        .filter_map(|v| g.vertex(v).layer.map(|l| (v, l)))
        .collect()
}

fn extent(g: &Graph, vertices: &[(VertexId, usize)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &(v, _) in vertices {
        let vertex = g.vertex(v);
        lo = lo.min(vertex.position - vertex.size / 2.0);
        hi = hi.max(vertex.position + vertex.size / 2.0);
    }
    if lo.is_finite() { (lo, hi) } else { (0.0, 0.0) }
}

pub fn scale(g: &Graph, canvas: Canvas) -> Scaled {
    let vertices = drawn(g);
    let (lo, hi) = extent(g, &vertices);
    let used = hi - lo;

    let (width, height, shift) = if used > canvas.height && canvas.height > 0.0 {
        (canvas.width * used / canvas.height, used, -lo)
    } else {
        (canvas.width, canvas.height, (canvas.height - used) / 2.0 - lo)
    };

    let layer_count = g.layers.len().max(1) as f64;
    let mut points: Vec<Option<Point>> = vec![None; g.vertex_capacity()];
    for (v, l) in vertices {
        points[v.0] = Some(Point {
            x: width * (l as f64 + 0.5) / layer_count,
            y: g.vertex(v).position + shift,
        });
    }

    tracing::debug!(width, height, extent = used, "scaling");
    Scaled {
        points,
        width,
        height,
    }
}

/// Unscaled coordinates: layers `layer_distance` apart, spacing axis shifted to start at 0.
pub fn raw(g: &Graph, layer_distance: f64) -> Scaled {
    let vertices = drawn(g);
    let (lo, hi) = extent(g, &vertices);
    let mut points: Vec<Option<Point>> = vec![None; g.vertex_capacity()];
    for (v, l) in vertices {
        points[v.0] = Some(Point {
            x: layer_coordinate(l, layer_distance),
            y: g.vertex(v).position - lo,
        });
    }
    Scaled {
        points,
        width: layer_coordinate(g.layers.len().saturating_sub(1), layer_distance),
        height: hi - lo,
    }
}
