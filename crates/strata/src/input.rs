//! Host-facing input and output types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub canvas: Canvas,
}

impl LayoutGraph {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            canvas,
        }
    }

    pub fn add_node(&mut self, id: impl Into<String>, size: f64) -> &mut Self {
        self.nodes.push(Node {
            id: id.into(),
            size,
            rank_hint: None,
        });
        self
    }

    /// Adds an edge whose id is derived from its position in the edge list.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let id = format!("e{}", self.edges.len());
        self.edges.push(Edge {
            id,
            source: source.into(),
            target: target.into(),
        });
        self
    }

    pub fn validate(&self) -> Result<()> {
        let mut ids: BTreeSet<&str> = BTreeSet::new();
        for n in &self.nodes {
            if !ids.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode { id: n.id.clone() });
            }
            if !n.size.is_finite() || n.size < 0.0 {
                return Err(Error::InvalidSize { id: n.id.clone() });
            }
        }
        for e in &self.edges {
            for end in [&e.source, &e.target] {
                if !ids.contains(end.as_str()) {
                    return Err(Error::MissingEndpoint {
                        edge_id: e.id.clone(),
                        node_id: end.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// Extent along the in-layer axis, used for spacing.
    pub size: f64,
    /// Optional stage/type hint; lower hints are placed first within a layer.
    #[serde(default)]
    pub rank_hint: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Center of every input node.
    pub positions: BTreeMap<String, Point>,
    /// Bend points of every input edge, in input source-to-target order.
    pub edges: BTreeMap<String, Vec<Point>>,
    /// Canvas width after scaling; grows past the requested width for tall layouts.
    pub width: f64,
    pub height: f64,
    pub crossings: f64,
    pub reversed_edges: usize,
}
