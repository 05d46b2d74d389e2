//! Split the layered graph into weakly connected components and merge them back.
//!
//! Each component gets its own local layer array, so ordering and positioning of one component
//! never see the vertices of another. Merging stacks the components along the spacing axis in
//! the order they were found.

use crate::graph::{Graph, VertexId};

#[derive(Debug, Clone, Default)]
pub struct LayeredComponent {
    /// Sorted global layer indices spanned by the component; local layer `k` is
    /// `global_layers[k]`.
    pub global_layers: Vec<usize>,
    pub layers: Vec<Vec<VertexId>>,
}

impl LayeredComponent {
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.layers.iter().flatten().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}

/// Takes the global layers apart into components. `g.layers` is left empty and each member
/// vertex is renumbered to its component-local layer and slot.
pub fn split(g: &mut Graph) -> Vec<LayeredComponent> {
    let n = g.vertex_capacity();
    let mut component_of: Vec<Option<usize>> = vec![None; n];
    let mut spans: Vec<(usize, usize)> = Vec::new();

    let live: Vec<VertexId> = g.live_vertices().collect();
    for start in live {
        if component_of[start.0].is_some() {
            continue;
        }
        let c = spans.len();
        let mut span = (usize::MAX, 0usize);
        let mut queue: Vec<VertexId> = vec![start];
        component_of[start.0] = Some(c);
        while let Some(v) = queue.pop() {
            if let Some(layer) = g.vertex(v).layer {
                span.0 = span.0.min(layer);
                span.1 = span.1.max(layer);
            }
            let neighbours: Vec<VertexId> = g
                .successors(v)
                .chain(g.predecessors(v))
                .map(|(w, _)| w)
                .collect();
            for w in neighbours {
                if component_of[w.0].is_none() {
                    component_of[w.0] = Some(c);
                    queue.push(w);
                }
            }
        }
        spans.push(span);
    }

    let mut components: Vec<LayeredComponent> = spans
        .iter()
        .map(|&(lo, hi)| {
            let global_layers: Vec<usize> = if lo <= hi { (lo..=hi).collect() } else { Vec::new() };
            LayeredComponent {
                layers: vec![Vec::new(); global_layers.len()],
                global_layers,
            }
        })
        .collect();

    let global = std::mem::take(&mut g.layers);
    for (l, layer) in global.iter().enumerate() {
        for &v in layer {
            let Some(c) = component_of[v.0] else {
                continue;
            };
            let comp = &mut components[c];
            let local = l - comp.global_layers[0];
            comp.layers[local].push(v);
        }
    }

    for comp in &components {
        for (k, layer) in comp.layers.iter().enumerate() {
            for (i, &v) in layer.iter().enumerate() {
                let vertex = g.vertex_mut(v);
                vertex.layer = Some(k);
                vertex.index_in_layer = Some(i);
            }
        }
    }

    tracing::debug!(components = components.len(), "component split");
    components
}

/// Makes `comp`'s local layers the graph's active layer array.
pub fn enter(g: &mut Graph, comp: &mut LayeredComponent) {
    g.layers = std::mem::take(&mut comp.layers);
    g.reset_vertex_indices_in_layers();
}

/// Hands the active layer array back to `comp`.
pub fn leave(g: &mut Graph, comp: &mut LayeredComponent) {
    comp.layers = std::mem::take(&mut g.layers);
}

/// Re-inserts components at their global layers, stacking each one below the previous along
/// the spacing axis with `gap` in between, and renumbers every vertex globally.
pub fn merge(g: &mut Graph, components: Vec<LayeredComponent>, gap: f64) {
    let layer_count = components
        .iter()
        .filter_map(|c| c.global_layers.last())
        .map(|&l| l + 1)
        .max()
        .unwrap_or(0);
    let mut layers: Vec<Vec<VertexId>> = vec![Vec::new(); layer_count];

    let mut cursor = 0.0;
    for comp in components {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in comp.vertices() {
            let vertex = g.vertex(v);
            lo = lo.min(vertex.position - vertex.size / 2.0);
            hi = hi.max(vertex.position + vertex.size / 2.0);
        }
        if !lo.is_finite() {
            continue;
        }

        let offset = cursor - lo;
        for v in comp.vertices() {
            g.vertex_mut(v).position += offset;
        }
        cursor += (hi - lo) + gap;

        for (k, local) in comp.layers.into_iter().enumerate() {
            layers[comp.global_layers[k]].extend(local);
        }
    }

    g.layers = layers;
    g.reset_vertex_indices_in_layers();
}
