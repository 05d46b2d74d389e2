use crate::graph::{EdgeId, VertexId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("edge {edge_id} references missing node {node_id}")]
    MissingEndpoint { edge_id: String, node_id: String },

    #[error("node {id} has a negative or non-finite size")]
    InvalidSize { id: String },

    #[error("layer assignment found no sink with {remaining} vertices left; the graph is cyclic")]
    CyclicGraph { remaining: usize },

    #[error("vertex {vertex:?} has no layer index")]
    UndefinedLayer { vertex: VertexId },

    #[error("vertex {vertex:?} claims slot {index} of layer {layer} but is not stored there")]
    IndexMismatch {
        vertex: VertexId,
        layer: usize,
        index: usize,
    },

    #[error("edge {edge:?} is not listed symmetrically by its endpoints")]
    EdgeAsymmetry { edge: EdgeId },

    #[error("vertex {vertex:?} is not a live compressed group")]
    MissingGroup { vertex: VertexId },

    #[error(transparent)]
    Solver(#[from] strata_lp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
