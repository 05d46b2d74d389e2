//! Median sweeps and adjacent-swap (transpose) refinement.

use super::cross_count::cross_count;
use crate::graph::{Graph, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Order layer `l` by its neighbours in layer `l - 1`.
    Down,
    /// Order layer `l` by its neighbours in layer `l + 1`.
    Up,
}

/// Slot of every vertex within its layer, indexed by vertex id.
pub(crate) fn slots(g: &Graph, layering: &[Vec<VertexId>]) -> Vec<usize> {
    let mut pos = vec![0usize; g.vertex_capacity()];
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            pos[v.0] = i;
        }
    }
    pos
}

/// Median of sorted neighbour slots; lists of even length use the interpolated median that
/// leans toward the denser side. An empty list yields `-1`, which sorts before every
/// connected vertex.
pub fn median_value(sorted: &[usize]) -> f64 {
    let m = sorted.len();
    if m == 0 {
        return -1.0;
    }
    let mid = m / 2;
    if m % 2 == 1 {
        return sorted[mid] as f64;
    }
    if m == 2 {
        return (sorted[0] + sorted[1]) as f64 / 2.0;
    }
    let left = (sorted[mid - 1] - sorted[0]) as f64;
    let right = (sorted[m - 1] - sorted[mid]) as f64;
    if left + right == 0.0 {
        return (sorted[mid - 1] + sorted[mid]) as f64 / 2.0;
    }
    (sorted[mid - 1] as f64 * right + sorted[mid] as f64 * left) / (left + right)
}

fn neighbour_slots(g: &Graph, v: VertexId, pos: &[usize], direction: SweepDirection) -> Vec<usize> {
    let mut out: Vec<usize> = match direction {
        SweepDirection::Down => g.predecessors(v).map(|(u, _)| pos[u.0]).collect(),
        SweepDirection::Up => g.successors(v).map(|(w, _)| pos[w.0]).collect(),
    };
    out.sort_unstable();
    out
}

/// One full median sweep; each layer is stably re-sorted by the median slot of its fixed
/// neighbours.
pub fn sweep(g: &Graph, layering: &mut [Vec<VertexId>], pos: &mut [usize], direction: SweepDirection) {
    let n = layering.len();
    if n < 2 {
        return;
    }
    let ranks: Vec<usize> = match direction {
        SweepDirection::Down => (1..n).collect(),
        SweepDirection::Up => (0..n - 1).rev().collect(),
    };
    for l in ranks {
        let layer = &mut layering[l];
        let mut keyed: Vec<(f64, VertexId)> = layer
            .iter()
            .map(|&v| (median_value(&neighbour_slots(g, v, pos, direction)), v))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (i, (_, v)) in keyed.into_iter().enumerate() {
            layer[i] = v;
            pos[v.0] = i;
        }
    }
}

/// Crossings among the edges of `v` and `w` (on both sides) when `v` precedes `w`.
fn pair_crossings(g: &Graph, v: VertexId, w: VertexId, pos: &[usize]) -> f64 {
    let mut c = 0.0;
    for (vs, ws) in [
        (
            g.predecessors(v).collect::<Vec<_>>(),
            g.predecessors(w).collect::<Vec<_>>(),
        ),
        (
            g.successors(v).collect::<Vec<_>>(),
            g.successors(w).collect::<Vec<_>>(),
        ),
    ] {
        for &(p, pw) in &vs {
            for &(q, qw) in &ws {
                if pos[p.0] > pos[q.0] {
                    c += pw * qw;
                }
            }
        }
    }
    c
}

/// Swaps adjacent vertices while a swap strictly lowers their mutual crossings.
///
/// Each accepted swap strictly lowers the total crossing count, so the loop terminates.
pub fn transpose(g: &Graph, layering: &mut [Vec<VertexId>], pos: &mut [usize]) {
    let mut improved = true;
    while improved {
        improved = false;
        for layer in layering.iter_mut() {
            for i in 1..layer.len() {
                let (v, w) = (layer[i - 1], layer[i]);
                if pair_crossings(g, w, v, pos) < pair_crossings(g, v, w, pos) {
                    layer.swap(i - 1, i);
                    pos[v.0] = i;
                    pos[w.0] = i - 1;
                    improved = true;
                }
            }
        }
    }
}

/// Alternating sweeps plus transpose for `iterations` rounds; keeps the best layering seen,
/// starting from the given one. Returns its crossing count.
pub fn minimize(g: &Graph, layering: &mut Vec<Vec<VertexId>>, iterations: usize) -> f64 {
    let mut pos = slots(g, layering);
    let mut best = layering.clone();
    let mut best_cc = cross_count(g, layering);

    for i in 0..iterations {
        if best_cc == 0.0 {
            break;
        }
        let direction = if i % 2 == 0 {
            SweepDirection::Down
        } else {
            SweepDirection::Up
        };
        sweep(g, layering, &mut pos, direction);
        transpose(g, layering, &mut pos);

        let cc = cross_count(g, layering);
        tracing::trace!(iteration = i, crossings = cc, "sweep");
        if cc < best_cc {
            best_cc = cc;
            best.clone_from(layering);
        }
    }

    *layering = best;
    best_cc
}
