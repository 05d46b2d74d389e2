//! Depth-first branch-and-bound for pure 0/1 models.
//!
//! Variables are fixed in model order. Each constraint row tracks its current activity and the
//! largest positive/negative contribution its unfixed variables can still add; a branch is cut
//! as soon as a row can no longer reach its bounds or the objective can no longer beat the
//! incumbent.

use crate::model::{Direction, Model};
use crate::solution::Solution;
use crate::{Error, Result, Solver};
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
pub struct BranchAndBound {
    /// Upper bound on visited search nodes. Exceeding it is an error, not a partial answer.
    pub max_nodes: u64,
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self {
            max_nodes: 2_000_000,
        }
    }
}

impl BranchAndBound {
    pub fn with_max_nodes(max_nodes: u64) -> Self {
        Self { max_nodes }
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    min: f64,
    max: f64,
    activity: f64,
    rem_pos: f64,
    rem_neg: f64,
}

impl Row {
    fn feasible(&self) -> bool {
        self.activity + self.rem_neg <= self.max + EPS && self.activity + self.rem_pos >= self.min - EPS
    }
}

#[derive(Debug, Clone)]
struct Column {
    rows: Vec<(usize, f64)>,
    cost: f64,
}

struct Search<'a> {
    columns: &'a [Column],
    rows: Vec<Row>,
    assignment: Vec<u8>,
    cost: f64,
    /// Sum of the negative costs of unfixed columns: the best the remaining suffix can add.
    cost_rem_neg: f64,
    best_cost: f64,
    best: Option<Vec<u8>>,
    nodes: u64,
    max_nodes: u64,
}

impl Search<'_> {
    fn run(&mut self, depth: usize) -> Result<()> {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(Error::NodeLimit {
                limit: self.max_nodes,
            });
        }
        if self.cost + self.cost_rem_neg >= self.best_cost - EPS {
            return Ok(());
        }
        if depth == self.columns.len() {
            self.best_cost = self.cost;
            self.best = Some(self.assignment.clone());
            return Ok(());
        }

        let cost = self.columns[depth].cost;
        let order: [u8; 2] = if cost > 0.0 { [0, 1] } else { [1, 0] };
        for value in order {
            if self.fix(depth, value) {
                self.run(depth + 1)?;
            }
            self.unfix(depth, value);
        }
        Ok(())
    }

    /// Fixes `column` to `value` and reports whether every touched row is still satisfiable.
    fn fix(&mut self, column: usize, value: u8) -> bool {
        let columns = self.columns;
        let col = &columns[column];
        let mut ok = true;
        for &(r, coef) in &col.rows {
            let row = &mut self.rows[r];
            if coef > 0.0 {
                row.rem_pos -= coef;
            } else {
                row.rem_neg -= coef;
            }
            row.activity += coef * f64::from(value);
            ok &= row.feasible();
        }
        if col.cost < 0.0 {
            self.cost_rem_neg -= col.cost;
        }
        self.cost += col.cost * f64::from(value);
        self.assignment[column] = value;
        ok
    }

    fn unfix(&mut self, column: usize, value: u8) {
        let columns = self.columns;
        let col = &columns[column];
        for &(r, coef) in &col.rows {
            let row = &mut self.rows[r];
            if coef > 0.0 {
                row.rem_pos += coef;
            } else {
                row.rem_neg += coef;
            }
            row.activity -= coef * f64::from(value);
        }
        if col.cost < 0.0 {
            self.cost_rem_neg += col.cost;
        }
        self.cost -= col.cost * f64::from(value);
        self.assignment[column] = 0;
    }
}

impl Solver for BranchAndBound {
    fn solve(&self, model: &Model) -> Result<Solution> {
        for name in model.variables.keys() {
            if !model.is_binary(name) {
                return Err(Error::NonBinaryVariable { name: name.clone() });
            }
        }
        for name in model.objective.keys() {
            if !model.variables.contains_key(name) {
                return Err(Error::UnknownVariable { name: name.clone() });
            }
        }

        let sign = match model.direction {
            Direction::Min => 1.0,
            Direction::Max => -1.0,
        };

        let mut row_index: HashMap<&str, usize> = HashMap::default();
        let mut rows: Vec<Row> = Vec::with_capacity(model.constraints.len());
        for (name, bounds) in &model.constraints {
            row_index.insert(name.as_str(), rows.len());
            rows.push(Row {
                min: bounds.min.unwrap_or(f64::NEG_INFINITY),
                max: bounds.max.unwrap_or(f64::INFINITY),
                activity: 0.0,
                rem_pos: 0.0,
                rem_neg: 0.0,
            });
        }

        let mut columns: Vec<Column> = Vec::with_capacity(model.variables.len());
        let mut cost_rem_neg = 0.0;
        for (name, coefficients) in &model.variables {
            let cost = sign * model.objective.get(name).copied().unwrap_or(0.0);
            if cost < 0.0 {
                cost_rem_neg += cost;
            }
            // Coefficients on undeclared constraints are free attributes and do not bind.
            let col_rows: Vec<(usize, f64)> = coefficients
                .iter()
                .filter(|(_, coef)| **coef != 0.0)
                .filter_map(|(c, coef)| row_index.get(c.as_str()).map(|&r| (r, *coef)))
                .collect();
            for &(r, coef) in &col_rows {
                if coef > 0.0 {
                    rows[r].rem_pos += coef;
                } else {
                    rows[r].rem_neg += coef;
                }
            }
            columns.push(Column {
                rows: col_rows,
                cost,
            });
        }

        if !rows.iter().all(Row::feasible) {
            tracing::debug!(rows = rows.len(), "model infeasible at the root");
            return Ok(Solution::infeasible());
        }

        let mut search = Search {
            columns: &columns,
            rows,
            assignment: vec![0; columns.len()],
            cost: 0.0,
            cost_rem_neg,
            best_cost: f64::INFINITY,
            best: None,
            nodes: 0,
            max_nodes: self.max_nodes,
        };
        search.run(0)?;
        tracing::debug!(
            variables = columns.len(),
            nodes = search.nodes,
            feasible = search.best.is_some(),
            "branch-and-bound finished"
        );

        let Some(best) = search.best else {
            return Ok(Solution::infeasible());
        };
        let values: IndexMap<String, f64> = model
            .variables
            .keys()
            .zip(best)
            .map(|(name, v)| (name.clone(), f64::from(v)))
            .collect();
        Ok(Solution {
            feasible: true,
            bounded: true,
            result: sign * search.best_cost,
            values,
        })
    }
}
