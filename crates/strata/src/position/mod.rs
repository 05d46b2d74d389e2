//! In-layer coordinates.
//!
//! The aligned positioner packs each layer at minimum separation, then runs alternating
//! weighted-median passes that pull vertices toward their neighbours without ever breaking
//! order or separation. The layer axis is just `layer * layer_distance`.

use crate::error::{Error, Result};
use crate::graph::{Graph, Vertex, VertexId};

pub mod even;

pub use even::position_even;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Gap between two real (or group) vertices.
    pub vertex: f64,
    /// Gap between a real vertex and a virtual one.
    pub mixed: f64,
    /// Gap between two virtual vertices.
    pub virtual_: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            vertex: 30.0,
            mixed: 20.0,
            virtual_: 10.0,
        }
    }
}

/// Minimum center-to-center distance of two neighbours in a layer.
pub fn min_separation(a: &Vertex, b: &Vertex, spacing: &Spacing) -> f64 {
    let gap = match (a.is_virtual(), b.is_virtual()) {
        (false, false) => spacing.vertex,
        (true, true) => spacing.virtual_,
        _ => spacing.mixed,
    };
    (a.size + b.size) / 2.0 + gap
}

pub fn layer_coordinate(layer: usize, layer_distance: f64) -> f64 {
    layer as f64 * layer_distance
}

pub(crate) fn check_layers(g: &Graph) -> Result<()> {
    for (l, layer) in g.layers.iter().enumerate() {
        for &v in layer {
            if g.vertex(v).layer != Some(l) {
                return Err(Error::UndefinedLayer { vertex: v });
            }
        }
    }
    Ok(())
}

pub fn position(g: &mut Graph, spacing: &Spacing, passes: usize) -> Result<()> {
    check_layers(g)?;
    if g.layers.is_empty() {
        return Ok(());
    }

    for l in 0..g.layers.len() {
        pack(g, l, spacing);
    }

    for pass in 0..passes {
        let down = pass % 2 == 0;
        let ranks: Vec<usize> = if down {
            (1..g.layers.len()).collect()
        } else {
            (0..g.layers.len().saturating_sub(1)).rev().collect()
        };
        for l in ranks {
            align_layer(g, l, down, spacing);
        }
    }

    normalize(g);
    Ok(())
}

/// Packs layer `l` at minimum separation, centered on 0.
fn pack(g: &mut Graph, l: usize, spacing: &Spacing) {
    let layer = g.layers[l].clone();
    let mut cursor = 0.0;
    for (i, &v) in layer.iter().enumerate() {
        if i > 0 {
            cursor += min_separation(g.vertex(layer[i - 1]), g.vertex(v), spacing);
        }
        g.vertex_mut(v).position = cursor;
    }
    let mid = cursor / 2.0;
    for &v in &layer {
        g.vertex_mut(v).position -= mid;
    }
}

/// Moves each vertex of layer `l` toward the weighted median of its neighbours in the
/// previous (`down`) or next layer, clamped between its already-placed left neighbour and its
/// not-yet-moved right neighbour.
fn align_layer(g: &mut Graph, l: usize, down: bool, spacing: &Spacing) {
    let layer: Vec<VertexId> = g.layers[l].clone();
    let mut prev: Option<(VertexId, f64)> = None;
    for (i, &v) in layer.iter().enumerate() {
        let current = g.vertex(v).position;
        let neighbours: Vec<(f64, f64)> = if down {
            g.predecessors(v)
                .map(|(u, w)| (g.vertex(u).position, w))
                .collect()
        } else {
            g.successors(v)
                .map(|(u, w)| (g.vertex(u).position, w))
                .collect()
        };
        let mut target = weighted_median(neighbours).unwrap_or(current);

        if let Some((p, p_pos)) = prev {
            target = target.max(p_pos + min_separation(g.vertex(p), g.vertex(v), spacing));
        }
        if let Some(&next) = layer.get(i + 1) {
            let hi = g.vertex(next).position - min_separation(g.vertex(v), g.vertex(next), spacing);
            target = target.min(hi);
        }

        g.vertex_mut(v).position = target;
        prev = Some((v, target));
    }
}

/// Weighted median of `(position, weight)` pairs; an exact half split averages the two middle
/// positions.
fn weighted_median(mut items: Vec<(f64, f64)>) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    items.sort_by(|a, b| a.0.total_cmp(&b.0));
    let total: f64 = items.iter().map(|i| i.1).sum();
    let half = total / 2.0;
    let mut acc = 0.0;
    for (i, &(pos, w)) in items.iter().enumerate() {
        acc += w;
        if acc > half {
            return Some(pos);
        }
        if acc == half {
            let next = items.get(i + 1).map(|n| n.0).unwrap_or(pos);
            return Some((pos + next) / 2.0);
        }
    }
    items.last().map(|i| i.0)
}

/// Shifts the active layers so the smallest vertex edge sits at 0.
fn normalize(g: &mut Graph) {
    let vertices: Vec<VertexId> = g.layers.iter().flatten().copied().collect();
    let lo = vertices
        .iter()
        .map(|&v| g.vertex(v).position - g.vertex(v).size / 2.0)
        .fold(f64::INFINITY, f64::min);
    if !lo.is_finite() {
        return;
    }
    for v in vertices {
        g.vertex_mut(v).position -= lo;
    }
}

#[cfg(test)]
mod tests {
    use super::weighted_median;

    #[test]
    fn weighted_median_picks_the_heavier_side() {
        assert_eq!(weighted_median(vec![(0.0, 1.0), (10.0, 3.0)]), Some(10.0));
    }

    #[test]
    fn weighted_median_averages_an_even_split() {
        assert_eq!(weighted_median(vec![(10.0, 1.0), (0.0, 1.0)]), Some(5.0));
    }

    #[test]
    fn weighted_median_of_nothing_is_none() {
        assert_eq!(weighted_median(Vec::new()), None);
    }
}
