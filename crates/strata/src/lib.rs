#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) layout for directed process graphs.
//!
//! The pipeline breaks cycles, assigns layers, splits the graph into weakly connected
//! components, compresses fan-in/fan-out siblings, routes long edges through virtual vertices,
//! minimizes crossings, assigns coordinates, and finally merges, expands and scales everything
//! into the host canvas. Every stage mutates one [`Graph`] arena in place.
//!
//! ```
//! use strata::{Canvas, LayoutGraph, LayoutOptions};
//!
//! let mut input = LayoutGraph::new(Canvas { width: 600.0, height: 400.0 });
//! input.add_node("a", 40.0).add_node("b", 40.0).add_node("c", 40.0);
//! input.add_edge("a", "b").add_edge("b", "c");
//!
//! let out = strata::layout(&input, &LayoutOptions::default()).unwrap();
//! assert!(out.positions["a"].x < out.positions["b"].x);
//! assert!(out.positions["b"].x < out.positions["c"].x);
//! ```

pub mod acyclic;
pub mod components;
pub mod compress;
pub mod error;
pub mod graph;
pub mod input;
pub mod normalize;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod scale;

pub use error::{Error, Result};
pub use graph::{CompressionMode, EdgeId, Graph, GroupId, VertexId, VertexKind};
pub use input::{Canvas, Edge, LayoutGraph, LayoutResult, Node, Point};
pub use options::{Direction, LayoutOptions, Positioner};
pub use strata_lp as lp;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out `input` with the heuristic crossing minimizer only.
pub fn layout(input: &LayoutGraph, opts: &LayoutOptions) -> Result<LayoutResult> {
    pipeline::run(input, opts, None)
}

/// Lays out `input`, trying the exact ordering model on narrow components first.
pub fn layout_with_solver(
    input: &LayoutGraph,
    opts: &LayoutOptions,
    solver: &dyn lp::Solver,
) -> Result<LayoutResult> {
    pipeline::run(input, opts, Some(solver))
}
