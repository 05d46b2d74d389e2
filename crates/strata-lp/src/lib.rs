//! Linear / integer-programming request-response contract used by `strata`.
//!
//! The layout engine never talks to a concrete solver. It builds a [`Model`], hands it to a
//! [`Solver`], and reads back a [`Solution`]. Both types serialize to the plain JSON shape most
//! JS-style LP services accept, so an out-of-process solver only needs a thin adapter.
//!
//! [`BranchAndBound`] is a small in-process solver for pure 0/1 models. It is exact but only
//! practical for the small per-layer ordering problems `strata` produces.

#![forbid(unsafe_code)]

pub mod branch_bound;
pub mod error;
pub mod model;
pub mod solution;

pub use branch_bound::BranchAndBound;
pub use error::{Error, Result};
pub use model::{Bounds, Direction, Model};
pub use solution::Solution;

/// A blocking request/response solver.
///
/// Implementations must either return a complete [`Solution`] or an error; there are no partial
/// results. A solution with `feasible == false` is a valid answer, not an error.
pub trait Solver {
    fn solve(&self, model: &Model) -> Result<Solution>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, model: &Model) -> Result<Solution> {
        (**self).solve(model)
    }
}
