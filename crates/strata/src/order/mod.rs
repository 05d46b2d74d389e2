//! Vertex ordering / crossing minimization.
//!
//! The heuristic alternates median sweeps with transpose refinement and keeps the best layering
//! seen. When a [`Solver`] is available and every layer of the active layering is narrow enough,
//! the exact 0/1 formulation in [`exact`] is tried first; an infeasible answer or a solver error
//! falls back to the heuristic.

pub mod cross_count;
pub mod exact;
pub mod sweep;

pub use cross_count::{cross_count, two_layer_cross_count};
pub use sweep::{SweepDirection, median_value, minimize, sweep, transpose};

use crate::graph::{Graph, VertexId};
use strata_lp::Solver;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderOptions {
    pub iterations: usize,
    /// Widest layer for which the exact formulation is attempted.
    pub exact_max_width: usize,
    pub sibling_bonus: f64,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            iterations: 24,
            exact_max_width: 8,
            sibling_bonus: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMethod {
    /// No layer has two vertices; nothing to order.
    Trivial,
    Heuristic,
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub method: OrderMethod,
    pub initial_crossings: f64,
    pub crossings: f64,
}

/// Reorders the active layers of `g` in place.
pub fn order(g: &mut Graph, opts: &OrderOptions, solver: Option<&dyn Solver>) -> OrderStats {
    let mut layering: Vec<Vec<VertexId>> = std::mem::take(&mut g.layers);
    let initial = cross_count(g, &layering);
    let width = layering.iter().map(Vec::len).max().unwrap_or(0);

    if width < 2 {
        g.layers = layering;
        g.reset_vertex_indices_in_layers();
        return OrderStats {
            method: OrderMethod::Trivial,
            initial_crossings: initial,
            crossings: initial,
        };
    }

    let exact = match solver {
        Some(solver) if width <= opts.exact_max_width => order_exact(g, &layering, opts, solver),
        _ => None,
    };

    let stats = match exact {
        Some((ordered, crossings)) if crossings <= initial => {
            layering = ordered;
            OrderStats {
                method: OrderMethod::Exact,
                initial_crossings: initial,
                crossings,
            }
        }
        _ => {
            let crossings = minimize(g, &mut layering, opts.iterations);
            OrderStats {
                method: OrderMethod::Heuristic,
                initial_crossings: initial,
                crossings,
            }
        }
    };

    g.layers = layering;
    g.reset_vertex_indices_in_layers();
    tracing::debug!(
        method = ?stats.method,
        initial = stats.initial_crossings,
        crossings = stats.crossings,
        "vertex ordering"
    );
    stats
}

fn order_exact(
    g: &Graph,
    layering: &[Vec<VertexId>],
    opts: &OrderOptions,
    solver: &dyn Solver,
) -> Option<(Vec<Vec<VertexId>>, f64)> {
    let model = exact::build_model(g, layering, opts.sibling_bonus);
    tracing::debug!(
        variables = model.variable_count(),
        constraints = model.constraint_count(),
        "exact ordering model"
    );
    let solution = match solver.solve(&model) {
        Ok(solution) => solution,
        Err(err) => {
            tracing::warn!(error = %err, "exact ordering failed; using heuristic");
            return None;
        }
    };
    if !solution.feasible {
        tracing::warn!("exact ordering infeasible; using heuristic");
        return None;
    }
    let ordered = exact::apply_solution(layering, &solution);
    let crossings = cross_count(g, &ordered);
    Some((ordered, crossings))
}
