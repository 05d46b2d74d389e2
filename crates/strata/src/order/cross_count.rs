//! Weighted crossing counts between adjacent layers.
//!
//! Upper-layer vertices are visited in slot order. Each of their edges adds, times its own
//! weight, the weight of every earlier edge that ends strictly further along the lower layer.
//! The running weights per lower slot live in a Fenwick tree, so one layer pair costs
//! `O(E log V)`.

use crate::graph::{Graph, VertexId};

/// Weighted crossing count of a whole layering: the sum over adjacent layer pairs.
pub fn cross_count(g: &Graph, layering: &[Vec<VertexId>]) -> f64 {
    let mut counter = BilayerCounter::new(g);
    layering
        .windows(2)
        .map(|pair| counter.count(&pair[0], &pair[1]))
        .sum()
}

/// Crossings between the edges from `north` into `south`. Edges leaving `south` are ignored.
pub fn two_layer_cross_count(g: &Graph, north: &[VertexId], south: &[VertexId]) -> f64 {
    BilayerCounter::new(g).count(north, south)
}

/// Scratch space reused across the layer pairs of one count.
struct BilayerCounter<'a> {
    g: &'a Graph,
    /// Lower-layer slot by vertex id; only set while that layer is being counted.
    slot: Vec<Option<usize>>,
    tree: Vec<f64>,
    ends: Vec<(usize, f64)>,
}

impl<'a> BilayerCounter<'a> {
    fn new(g: &'a Graph) -> Self {
        Self {
            g,
            slot: vec![None; g.vertex_capacity()],
            tree: Vec::new(),
            ends: Vec::new(),
        }
    }

    fn count(&mut self, north: &[VertexId], south: &[VertexId]) -> f64 {
        for (i, &v) in south.iter().enumerate() {
            self.slot[v.0] = Some(i);
        }
        self.tree.clear();
        self.tree.resize(south.len() + 1, 0.0);

        let mut placed = 0.0;
        let mut crossings = 0.0;
        for &u in north {
            let slot = &self.slot;
            self.ends.clear();
            self.ends.extend(
                self.g
                    .successors(u)
                    .filter_map(|(w, weight)| slot[w.0].map(|s| (s, weight))),
            );
            self.ends.sort_by_key(|&(s, _)| s);
            for &(s, weight) in &self.ends {
                let behind = placed - prefix_sum(&self.tree, s);
                crossings += weight * behind;
                add(&mut self.tree, s, weight);
                placed += weight;
            }
        }

        for &v in south {
            self.slot[v.0] = None;
        }
        crossings
    }
}

/// Total weight at slots `0..=slot`.
fn prefix_sum(tree: &[f64], slot: usize) -> f64 {
    let mut i = slot + 1;
    let mut sum = 0.0;
    while i > 0 {
        sum += tree[i];
        i &= i - 1;
    }
    sum
}

fn add(tree: &mut [f64], slot: usize, weight: f64) {
    let mut i = slot + 1;
    while i < tree.len() {
        tree[i] += weight;
        i += i & i.wrapping_neg();
    }
}

#[cfg(test)]
mod tests {
    use super::{add, prefix_sum};

    #[test]
    fn prefix_sum_accumulates_added_weights() {
        let mut tree = vec![0.0; 6];
        add(&mut tree, 0, 1.0);
        add(&mut tree, 2, 2.0);
        add(&mut tree, 4, 4.0);
        assert_eq!(prefix_sum(&tree, 0), 1.0);
        assert_eq!(prefix_sum(&tree, 3), 3.0);
        assert_eq!(prefix_sum(&tree, 4), 7.0);
    }
}
