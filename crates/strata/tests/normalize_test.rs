use strata::{Error, Graph, compress, normalize, rank};

fn assert_unit_spans(g: &Graph) {
    for e in g.attached_edges() {
        let edge = g.edge(e);
        let ls = g.vertex(edge.source).layer.unwrap();
        let lt = g.vertex(edge.target).layer.unwrap();
        assert_eq!(lt, ls + 1, "edge {e:?} spans {ls}..{lt}");
    }
}

#[test]
fn normalize_run_splits_a_long_edge_into_unit_segments() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let c = g.add_vertex(10.0);
    let d = g.add_vertex(10.0);
    g.insert_edge(a, b);
    g.insert_edge(b, c);
    g.insert_edge(c, d);
    let ad = g.insert_edge(a, d);
    rank::run(&mut g).unwrap();

    assert_eq!(normalize::run(&mut g).unwrap(), 2);
    assert_eq!(g.vertex_count(), 6);
    assert_eq!(g.edge_count(), 6);
    assert!(!g.edge(ad).is_attached());
    assert_unit_spans(&g);
    g.check_vertex_indices().unwrap();
    g.check_in_edge_out_edge_symmetry().unwrap();

    let chain = &g.chains()[0];
    assert_eq!(chain.edge, ad);
    assert_eq!(chain.vertices.len(), 2);
    assert_eq!(chain.segments.len(), 3);
    for &v in &chain.vertices {
        assert!(g.vertex(v).is_virtual());
        assert_eq!(g.vertex(v).size, 0.0);
    }
    assert_eq!(g.layers[1], vec![b, chain.vertices[0]]);
    assert_eq!(g.layers[2], vec![c, chain.vertices[1]]);
}

#[test]
fn normalize_run_leaves_unit_edges_alone() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    g.insert_edge(a, b);
    rank::run(&mut g).unwrap();

    assert_eq!(normalize::run(&mut g).unwrap(), 0);
    assert!(g.chains().is_empty());
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn normalize_undo_restores_edges_and_keeps_bend_points() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let c = g.add_vertex(10.0);
    g.insert_edge(a, b);
    g.insert_edge(b, c);
    let ac = g.insert_edge(a, c);
    rank::run(&mut g).unwrap();
    normalize::run(&mut g).unwrap();
    let bends = g.chains()[0].vertices.clone();

    normalize::undo(&mut g);
    assert!(g.chains().is_empty());
    assert!(g.edge(ac).is_attached());
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.vertex_count(), 3);
    assert_eq!(g.route(ac), bends.as_slice());
    assert_eq!(g.layers, vec![vec![a], vec![b], vec![c]]);
    assert!(!g.vertex(bends[0]).live);
    assert_eq!(g.vertex(bends[0]).layer, Some(1));
    g.check_vertex_indices().unwrap();
    g.check_in_edge_out_edge_symmetry().unwrap();
}

#[test]
fn normalize_run_interpolates_sizes_from_group_endpoints() {
    let mut g = Graph::new();
    let n = g.add_vertex(10.0);
    let t1 = g.add_vertex(10.0);
    let t2 = g.add_vertex(10.0);
    let m = g.add_vertex(10.0);
    let k = g.add_vertex(10.0);
    g.insert_edge(n, t1);
    g.insert_edge(n, t2);
    g.insert_edge(n, m);
    g.insert_edge(m, k);
    rank::run(&mut g).unwrap();
    assert_eq!(compress::run(&mut g, 20.0), 1);

    assert_eq!(normalize::run(&mut g).unwrap(), 1);
    let chain = &g.chains()[0];
    let v = chain.vertices[0];
    assert_eq!(g.vertex(v).size, 20.0);
    assert_eq!(g.vertex(v).layer, Some(1));
    assert_unit_spans(&g);
}

#[test]
fn normalize_run_requires_layers() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    g.insert_edge(a, b);
    g.layers = vec![vec![a]];
    g.reset_vertex_indices_in_layers();

    assert!(matches!(
        normalize::run(&mut g),
        Err(Error::UndefinedLayer { vertex }) if vertex == b
    ));
}

#[test]
fn normalize_run_without_layers_inserts_nothing() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    g.insert_edge(a, b);

    assert_eq!(normalize::run(&mut g).unwrap(), 0);
    assert!(g.chains().is_empty());
}
