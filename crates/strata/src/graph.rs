//! Index-based graph arena shared by every pipeline stage.
//!
//! Vertices and edges live in append-only vectors and are addressed by [`VertexId`] /
//! [`EdgeId`]. Adjacency lists hold ids, and an edge is either *attached* (listed by both of its
//! endpoints) or *detached* (kept in the arena so a later stage can restore it). Vertex storage
//! is never reclaimed during a layout run, which keeps ids stable across compression, virtual
//! chains and their undo.
//!
//! Real vertices are inserted first, so `VertexId(i)` is input node `i`.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    Real,
    /// Layout-only placeholder on a chain that replaces a multi-layer edge.
    Virtual,
    Group(GroupId),
}

#[derive(Debug, Clone)]
pub struct Vertex {
    pub kind: VertexKind,
    pub size: f64,
    pub rank_hint: Option<i32>,
    pub layer: Option<usize>,
    pub index_in_layer: Option<usize>,
    /// Coordinate along the in-layer (spacing) axis, measured at the vertex center.
    pub position: f64,
    /// Live vertices occupy exactly one layer slot once layering has run.
    pub live: bool,
    in_edges: Vec<EdgeId>,
    out_edges: Vec<EdgeId>,
}

impl Vertex {
    pub fn is_virtual(&self) -> bool {
        self.kind == VertexKind::Virtual
    }

    pub fn group(&self) -> Option<GroupId> {
        match self.kind {
            VertexKind::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    pub fn degree(&self) -> usize {
        self.in_edges.len() + self.out_edges.len()
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: f64,
    pub is_virtual: bool,
    /// Toggled each time the edge is inverted.
    pub reversed: bool,
    /// Set when this edge was folded into a parallel edge.
    pub merged_into: Option<EdgeId>,
    attached: bool,
}

impl Edge {
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Zero in-degree vertices sharing their only successor.
    Sources,
    /// Zero out-degree vertices sharing their only predecessor.
    Targets,
    /// Isolated vertices sharing a layer.
    Components,
}

#[derive(Debug, Clone)]
pub struct CompressedGroup {
    pub vertex: VertexId,
    pub mode: CompressionMode,
    pub members: Vec<VertexId>,
    /// The members' original edges, detached while the group is collapsed.
    pub member_edges: Vec<EdgeId>,
    /// The group's stand-in edge to the shared neighbour, if any.
    pub synthetic_edge: Option<EdgeId>,
    pub expanded: bool,
}

/// A multi-layer edge replaced by unit-span segments through virtual vertices.
#[derive(Debug, Clone)]
pub struct Chain {
    pub edge: EdgeId,
    pub vertices: Vec<VertexId>,
    pub segments: Vec<EdgeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    pub layers: Vec<Vec<VertexId>>,
    groups: Vec<CompressedGroup>,
    pub(crate) chains: Vec<Chain>,
    /// Bend points (virtual vertices) of edges whose chains have been undone.
    pub(crate) routes: HashMap<EdgeId, Vec<VertexId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, size: f64) -> VertexId {
        self.insert_vertex(VertexKind::Real, size)
    }

    pub fn insert_vertex(&mut self, kind: VertexKind, size: f64) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            kind,
            size,
            rank_hint: None,
            layer: None,
            index_in_layer: None,
            position: 0.0,
            live: true,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        });
        id
    }

    /// Inserts a unit-weight edge. Self-loops are not checked for; callers must avoid them.
    pub fn insert_edge(&mut self, source: VertexId, target: VertexId) -> EdgeId {
        self.insert_weighted_edge(source, target, 1.0, false)
    }

    pub fn insert_weighted_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: f64,
        is_virtual: bool,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            weight,
            is_virtual,
            reversed: false,
            merged_into: None,
            attached: true,
        });
        self.vertices[source.0].out_edges.push(id);
        self.vertices[target.0].in_edges.push(id);
        id
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> &mut Vertex {
        &mut self.vertices[v.0]
    }

    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.0]
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> &mut Edge {
        &mut self.edges[e.0]
    }

    /// Total arena size, including detached and non-live entries.
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn live_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.live)
            .map(|(i, _)| VertexId(i))
    }

    pub fn attached_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attached)
            .map(|(i, _)| EdgeId(i))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.live).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.attached).count()
    }

    pub fn successors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.vertices[v.0]
            .out_edges
            .iter()
            .map(|&e| (self.edges[e.0].target, self.edges[e.0].weight))
    }

    pub fn predecessors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.vertices[v.0]
            .in_edges
            .iter()
            .map(|&e| (self.edges[e.0].source, self.edges[e.0].weight))
    }

    /// Removes `e` from both adjacency lists but keeps it in the arena.
    pub fn detach_edge(&mut self, e: EdgeId) {
        let Edge {
            source,
            target,
            attached,
            ..
        } = self.edges[e.0];
        if !attached {
            return;
        }
        self.vertices[source.0].out_edges.retain(|&x| x != e);
        self.vertices[target.0].in_edges.retain(|&x| x != e);
        self.edges[e.0].attached = false;
    }

    pub fn attach_edge(&mut self, e: EdgeId) {
        let Edge {
            source,
            target,
            attached,
            ..
        } = self.edges[e.0];
        if attached {
            return;
        }
        self.vertices[source.0].out_edges.push(e);
        self.vertices[target.0].in_edges.push(e);
        self.edges[e.0].attached = true;
    }

    /// Swaps source and target of every edge in `edges`, keeping adjacency lists in sync.
    pub fn invert_edges(&mut self, edges: &[EdgeId]) {
        for &e in edges {
            self.detach_edge(e);
            let edge = &mut self.edges[e.0];
            std::mem::swap(&mut edge.source, &mut edge.target);
            edge.reversed = !edge.reversed;
            self.attach_edge(e);
        }
    }

    /// Folds attached edges with identical endpoints into the first one, summing weights.
    ///
    /// Returns the number of edges folded away.
    pub fn merge_parallel_edges(&mut self) -> usize {
        let mut merged = 0;
        for v in 0..self.vertices.len() {
            let mut first_by_target: HashMap<VertexId, EdgeId> = HashMap::default();
            let out: Vec<EdgeId> = self.vertices[v].out_edges.clone();
            for e in out {
                let target = self.edges[e.0].target;
                match first_by_target.get(&target) {
                    Some(&keep) => {
                        let weight = self.edges[e.0].weight;
                        self.edges[keep.0].weight += weight;
                        self.detach_edge(e);
                        self.edges[e.0].merged_into = Some(keep);
                        merged += 1;
                    }
                    None => {
                        first_by_target.insert(target, e);
                    }
                }
            }
        }
        merged
    }

    /// Follows `merged_into` links to the edge that currently represents `e`.
    pub fn resolve_edge(&self, mut e: EdgeId) -> EdgeId {
        while let Some(next) = self.edges[e.0].merged_into {
            e = next;
        }
        e
    }

    /// Recomputes `layer` / `index_in_layer` of every vertex from its slot in `layers`.
    pub fn reset_vertex_indices_in_layers(&mut self) {
        for (l, layer) in self.layers.iter().enumerate() {
            for (i, &v) in layer.iter().enumerate() {
                let vertex = &mut self.vertices[v.0];
                vertex.layer = Some(l);
                vertex.index_in_layer = Some(i);
            }
        }
    }

    /// Drops non-live vertices from `layers` and renumbers the rest.
    pub(crate) fn retain_live_in_layers(&mut self) {
        let vertices = &self.vertices;
        for layer in &mut self.layers {
            layer.retain(|v| vertices[v.0].live);
        }
        self.reset_vertex_indices_in_layers();
    }

    pub fn max_layer_width(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn groups(&self) -> &[CompressedGroup] {
        &self.groups
    }

    pub fn group(&self, g: GroupId) -> &CompressedGroup {
        &self.groups[g.0]
    }

    pub(crate) fn group_mut(&mut self, g: GroupId) -> &mut CompressedGroup {
        &mut self.groups[g.0]
    }

    /// Creates a group vertex and its bookkeeping record; the caller wires edges and slots.
    pub(crate) fn insert_group(
        &mut self,
        mode: CompressionMode,
        members: Vec<VertexId>,
        size: f64,
    ) -> (GroupId, VertexId) {
        let gid = GroupId(self.groups.len());
        let vertex = self.insert_vertex(VertexKind::Group(gid), size);
        self.groups.push(CompressedGroup {
            vertex,
            mode,
            members,
            member_edges: Vec::new(),
            synthetic_edge: None,
            expanded: false,
        });
        (gid, vertex)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn route(&self, e: EdgeId) -> &[VertexId] {
        self.routes.get(&e).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Diagnostic: every live vertex sits in the slot its indices claim, exactly once.
    pub fn check_vertex_indices(&self) -> Result<()> {
        let mut seen = vec![false; self.vertices.len()];
        for (l, layer) in self.layers.iter().enumerate() {
            for (i, &v) in layer.iter().enumerate() {
                let vertex = &self.vertices[v.0];
                if seen[v.0] || vertex.layer != Some(l) || vertex.index_in_layer != Some(i) {
                    return Err(Error::IndexMismatch {
                        vertex: v,
                        layer: l,
                        index: i,
                    });
                }
                seen[v.0] = true;
            }
        }
        for v in self.live_vertices() {
            if !seen[v.0] {
                let vertex = &self.vertices[v.0];
                return Err(match (vertex.layer, vertex.index_in_layer) {
                    (Some(layer), Some(index)) => Error::IndexMismatch {
                        vertex: v,
                        layer,
                        index,
                    },
                    _ => Error::UndefinedLayer { vertex: v },
                });
            }
        }
        Ok(())
    }

    /// Diagnostic: attached edges are listed once by each endpoint, detached ones by neither.
    pub fn check_in_edge_out_edge_symmetry(&self) -> Result<()> {
        for (i, edge) in self.edges.iter().enumerate() {
            let e = EdgeId(i);
            let outs = self.vertices[edge.source.0]
                .out_edges
                .iter()
                .filter(|&&x| x == e)
                .count();
            let ins = self.vertices[edge.target.0]
                .in_edges
                .iter()
                .filter(|&&x| x == e)
                .count();
            let expected = usize::from(edge.attached);
            if outs != expected || ins != expected {
                return Err(Error::EdgeAsymmetry { edge: e });
            }
        }
        for vertex in &self.vertices {
            for &e in &vertex.out_edges {
                if !self.edges[e.0].attached {
                    return Err(Error::EdgeAsymmetry { edge: e });
                }
            }
        }
        Ok(())
    }
}
