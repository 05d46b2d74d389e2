//! Break cycles by reversing the back-edges found by a depth-first search.
//!
//! Roots are visited in vertex insertion order, so the feedback arc set is deterministic for a
//! given input. It is not guaranteed to be minimum.

use crate::graph::{EdgeId, Graph, VertexId};

/// Inverts every back-edge and returns the inverted edges.
pub fn run(g: &mut Graph) -> Vec<EdgeId> {
    let n = g.vertex_capacity();
    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];
    let mut reversed: Vec<EdgeId> = Vec::new();

    let roots: Vec<VertexId> = g.live_vertices().collect();
    for root in roots {
        if visited[root.0] {
            continue;
        }
        let fas = dfs_fas(g, root, &mut visited, &mut on_stack);
        g.invert_edges(&fas);
        reversed.extend(fas);
    }

    tracing::debug!(reversed = reversed.len(), "cycle removal");
    reversed
}

fn dfs_fas(g: &Graph, root: VertexId, visited: &mut [bool], on_stack: &mut [bool]) -> Vec<EdgeId> {
    let mut fas: Vec<EdgeId> = Vec::new();
    let mut stack: Vec<(VertexId, usize)> = vec![(root, 0)];
    visited[root.0] = true;
    on_stack[root.0] = true;

    while let Some(top) = stack.last_mut() {
        let v = top.0;
        let out = g.vertex(v).out_edges();
        if top.1 >= out.len() {
            on_stack[v.0] = false;
            stack.pop();
            continue;
        }
        let e = out[top.1];
        top.1 += 1;

        let w = g.edge(e).target;
        if w == v {
            continue;
        }
        if on_stack[w.0] {
            fas.push(e);
        } else if !visited[w.0] {
            visited[w.0] = true;
            on_stack[w.0] = true;
            stack.push((w, 0));
        }
    }
    fas
}

/// Kahn-style check over attached edges of live vertices.
pub fn is_acyclic(g: &Graph) -> bool {
    let n = g.vertex_capacity();
    let mut indegree = vec![0usize; n];
    let mut total = 0usize;
    for v in g.live_vertices() {
        indegree[v.0] = g.vertex(v).in_edges().len();
        total += 1;
    }
    let mut queue: Vec<VertexId> = g.live_vertices().filter(|v| indegree[v.0] == 0).collect();
    let mut seen = 0usize;
    while let Some(v) = queue.pop() {
        seen += 1;
        for (w, _) in g.successors(v) {
            indegree[w.0] -= 1;
            if indegree[w.0] == 0 {
                queue.push(w);
            }
        }
    }
    seen == total
}
