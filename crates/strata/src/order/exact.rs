//! Exact ordering as a 0/1 program.
//!
//! For every pair `a < b` (by vertex id) within a layer, `x_a_b = 1` means `a` precedes `b`.
//! Transitivity rows keep the pair variables a total order. Every pair of edges between two
//! adjacent layers with four distinct endpoints gets a crossing variable that is forced to 1 when
//! the two pair orders disagree. The objective minimizes weighted crossings, plus an optional
//! penalty for vertices placed between two siblings.

use crate::graph::{EdgeId, Graph, VertexId};
use indexmap::IndexMap;
use strata_lp::{Bounds, Direction, Model, Solution};

/// `[a before b]` as `coef * x + constant` over the canonical pair variable.
#[derive(Debug, Clone)]
struct Literal {
    var: String,
    coef: f64,
    constant: f64,
}

fn pair_var(a: VertexId, b: VertexId) -> String {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    format!("x_{}_{}", lo.0, hi.0)
}

fn precedes(a: VertexId, b: VertexId) -> Literal {
    let var = pair_var(a, b);
    if a < b {
        Literal {
            var,
            coef: 1.0,
            constant: 0.0,
        }
    } else {
        Literal {
            var,
            coef: -1.0,
            constant: 1.0,
        }
    }
}

/// Adds `var + Σ sign_i * lit_i >= rhs` (constants moved to the bound).
fn add_lower_row(model: &mut Model, name: String, var: &str, terms: &[(f64, &Literal)], rhs: f64) {
    let mut bound = rhs;
    model.set_coefficient(var, name.clone(), 1.0);
    let mut coefficients: IndexMap<&str, f64> = IndexMap::new();
    for &(sign, lit) in terms {
        *coefficients.entry(lit.var.as_str()).or_insert(0.0) += sign * lit.coef;
        bound -= sign * lit.constant;
    }
    for (v, c) in coefficients {
        model.set_coefficient(v, name.clone(), c);
    }
    model.set_bounds(name, Bounds::at_least(bound));
}

pub fn build_model(g: &Graph, layering: &[Vec<VertexId>], sibling_bonus: f64) -> Model {
    let mut model = Model::new(Direction::Min);

    for layer in layering {
        let mut ids: Vec<VertexId> = layer.clone();
        ids.sort();
        for i in 0..ids.len() {
            for j in i + 1..ids.len() {
                model.add_binary(pair_var(ids[i], ids[j]));
            }
        }
        for i in 0..ids.len() {
            for j in i + 1..ids.len() {
                for k in j + 1..ids.len() {
                    let name = format!("t_{}_{}_{}", ids[i].0, ids[j].0, ids[k].0);
                    model.set_coefficient(pair_var(ids[i], ids[j]), name.clone(), 1.0);
                    model.set_coefficient(pair_var(ids[j], ids[k]), name.clone(), 1.0);
                    model.set_coefficient(pair_var(ids[i], ids[k]), name.clone(), -1.0);
                    model.set_bounds(name, Bounds::between(0.0, 1.0));
                }
            }
        }
    }

    for l in 1..layering.len() {
        let edges: Vec<(EdgeId, VertexId, VertexId, f64)> = layering[l - 1]
            .iter()
            .flat_map(|&u| g.vertex(u).out_edges().iter().map(move |&e| (u, e)))
            .map(|(u, e)| {
                let edge = g.edge(e);
                (e, u, edge.target, edge.weight)
            })
            .filter(|(_, _, w, _)| layering[l].contains(w))
            .collect();

        for i in 0..edges.len() {
            for j in i + 1..edges.len() {
                let (e1, u1, v1, w1) = edges[i];
                let (e2, u2, v2, w2) = edges[j];
                if u1 == u2 || v1 == v2 {
                    continue;
                }
                let c = format!("c_{}_{}", e1.0, e2.0);
                model.add_binary(c.clone());
                model.add_objective(c.clone(), w1 * w2);
                let north = precedes(u1, u2);
                let south = precedes(v1, v2);
                add_lower_row(&mut model, format!("{c}_a"), &c, &[(-1.0, &north), (1.0, &south)], 0.0);
                add_lower_row(&mut model, format!("{c}_b"), &c, &[(1.0, &north), (-1.0, &south)], 0.0);
            }
        }
    }

    if sibling_bonus > 0.0 {
        add_sibling_terms(g, layering, sibling_bonus, &mut model);
    }
    model
}

/// Siblings share exactly one predecessor. `s_a_b_c = 1` whenever `c` sits between `a` and `b`.
fn add_sibling_terms(g: &Graph, layering: &[Vec<VertexId>], bonus: f64, model: &mut Model) {
    for layer in layering {
        let mut by_parent: IndexMap<VertexId, Vec<VertexId>> = IndexMap::new();
        for &v in layer {
            let mut parents: Vec<VertexId> = g.predecessors(v).map(|(u, _)| u).collect();
            parents.sort();
            parents.dedup();
            if let [p] = parents.as_slice() {
                by_parent.entry(*p).or_default().push(v);
            }
        }
        for siblings in by_parent.values() {
            for i in 0..siblings.len() {
                for j in i + 1..siblings.len() {
                    let (a, b) = (siblings[i], siblings[j]);
                    for &c in layer {
                        if c == a || c == b {
                            continue;
                        }
                        let s = format!("s_{}_{}_{}", a.0, b.0, c.0);
                        model.add_binary(s.clone());
                        model.add_objective(s.clone(), bonus);
                        let (ac, cb) = (precedes(a, c), precedes(c, b));
                        let (bc, ca) = (precedes(b, c), precedes(c, a));
                        add_lower_row(model, format!("{s}_1"), &s, &[(-1.0, &ac), (-1.0, &cb)], -1.0);
                        add_lower_row(model, format!("{s}_2"), &s, &[(-1.0, &bc), (-1.0, &ca)], -1.0);
                    }
                }
            }
        }
    }
}

/// Reads the per-layer order back from the pair variables. `NaN` values count as 0.
pub fn apply_solution(layering: &[Vec<VertexId>], solution: &Solution) -> Vec<Vec<VertexId>> {
    let mut nan_count = 0usize;
    let mut value = |name: &str| {
        let v = solution.value(name);
        if v.is_nan() {
            nan_count += 1;
            0.0
        } else {
            v
        }
    };

    let mut out: Vec<Vec<VertexId>> = Vec::with_capacity(layering.len());
    for layer in layering {
        let mut scored: Vec<(f64, usize, VertexId)> = layer
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let ahead: f64 = layer
                    .iter()
                    .filter(|&&b| b != a)
                    .map(|&b| {
                        let lit = precedes(a, b);
                        lit.coef * value(&lit.var).round() + lit.constant
                    })
                    .sum();
                (ahead, i, a)
            })
            .collect();
        scored.sort_by(|x, y| y.0.total_cmp(&x.0).then(x.1.cmp(&y.1)));
        out.push(scored.into_iter().map(|(_, _, v)| v).collect());
    }

    if nan_count > 0 {
        tracing::warn!(values = nan_count, "solver returned NaN for ordering variables; using 0");
    }
    out
}
