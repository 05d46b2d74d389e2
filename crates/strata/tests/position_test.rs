use strata::position::{self, Spacing, min_separation, position_even};
use strata::{Error, Graph, VertexId, VertexKind};

fn assert_separated(g: &Graph, spacing: &Spacing) {
    for layer in &g.layers {
        for w in layer.windows(2) {
            let (a, b) = (g.vertex(w[0]), g.vertex(w[1]));
            assert!(
                b.position - a.position >= min_separation(a, b, spacing) - 1e-9,
                "{:?} and {:?} overlap",
                w[0],
                w[1]
            );
        }
    }
}

#[test]
fn position_packs_a_layer_with_kind_dependent_gaps() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let v = g.insert_vertex(VertexKind::Virtual, 0.0);
    let w = g.insert_vertex(VertexKind::Virtual, 0.0);
    let b = g.add_vertex(10.0);
    g.layers = vec![vec![a, v, w, b]];
    g.reset_vertex_indices_in_layers();

    position::position(&mut g, &Spacing::default(), 0).unwrap();
    assert_eq!(g.vertex(a).position, 5.0);
    assert_eq!(g.vertex(v).position - g.vertex(a).position, 25.0);
    assert_eq!(g.vertex(w).position - g.vertex(v).position, 10.0);
    assert_eq!(g.vertex(b).position - g.vertex(w).position, 25.0);
}

#[test]
fn position_keeps_a_chain_straight() {
    let mut g = Graph::new();
    let a = g.add_vertex(40.0);
    let v = g.insert_vertex(VertexKind::Virtual, 0.0);
    let b = g.add_vertex(20.0);
    g.insert_weighted_edge(a, v, 1.0, true);
    g.insert_weighted_edge(v, b, 1.0, true);
    g.layers = vec![vec![a], vec![v], vec![b]];
    g.reset_vertex_indices_in_layers();

    position::position(&mut g, &Spacing::default(), 4).unwrap();
    assert_eq!(g.vertex(a).position, 20.0);
    assert_eq!(g.vertex(v).position, 20.0);
    assert_eq!(g.vertex(b).position, 20.0);
}

#[test]
fn position_centers_a_child_between_its_parents() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let c = g.add_vertex(10.0);
    g.insert_edge(a, c);
    g.insert_edge(b, c);
    g.layers = vec![vec![a, b], vec![c]];
    g.reset_vertex_indices_in_layers();

    position::position(&mut g, &Spacing::default(), 4).unwrap();
    assert_eq!(g.vertex(a).position, 5.0);
    assert_eq!(g.vertex(b).position, 45.0);
    assert_eq!(g.vertex(c).position, 25.0);
}

#[test]
fn position_preserves_order_and_separation() {
    let mut seed: u64 = 0x1234_5678_9abc_def1;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    let spacing = Spacing::default();
    for _ in 0..20 {
        let mut g = Graph::new();
        let layers: Vec<Vec<VertexId>> = (0..4)
            .map(|_| {
                (0..4)
                    .map(|_| {
                        if next() % 3 == 0 {
                            g.insert_vertex(VertexKind::Virtual, 0.0)
                        } else {
                            g.add_vertex((next() % 50) as f64 + 5.0)
                        }
                    })
                    .collect()
            })
            .collect();
        for l in 1..layers.len() {
            for _ in 0..6 {
                let u = layers[l - 1][(next() % 4) as usize];
                let w = layers[l][(next() % 4) as usize];
                g.insert_weighted_edge(u, w, (next() % 3 + 1) as f64, false);
            }
        }
        g.layers = layers;
        g.reset_vertex_indices_in_layers();

        position::position(&mut g, &spacing, 6).unwrap();
        assert_separated(&g, &spacing);
        let lo = g
            .layers
            .iter()
            .flatten()
            .map(|&v| g.vertex(v).position - g.vertex(v).size / 2.0)
            .fold(f64::INFINITY, f64::min);
        assert!(lo.abs() < 1e-9);
    }
}

#[test]
fn position_requires_consistent_layers() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    g.layers = vec![vec![a]];

    assert!(matches!(
        position::position(&mut g, &Spacing::default(), 1),
        Err(Error::UndefinedLayer { vertex }) if vertex == a
    ));
    assert!(matches!(
        position_even(&mut g, 100.0),
        Err(Error::UndefinedLayer { .. })
    ));
}

#[test]
fn position_even_spreads_layers_over_the_height() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let c = g.add_vertex(10.0);
    g.insert_edge(a, c);
    g.insert_edge(b, c);
    g.layers = vec![vec![a, b], vec![c]];
    g.reset_vertex_indices_in_layers();

    position_even(&mut g, 100.0).unwrap();
    assert_eq!(g.vertex(a).position, 25.0);
    assert_eq!(g.vertex(b).position, 75.0);
    assert_eq!(g.vertex(c).position, 50.0);
}

#[test]
fn position_layer_coordinate_is_linear() {
    assert_eq!(position::layer_coordinate(0, 120.0), 0.0);
    assert_eq!(position::layer_coordinate(3, 120.0), 360.0);
}
