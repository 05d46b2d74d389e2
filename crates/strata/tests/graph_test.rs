use strata::{Error, Graph, VertexId};

#[test]
fn graph_insert_vertex_assigns_stable_sequential_ids() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(20.0);
    assert_eq!(a, VertexId(0));
    assert_eq!(b, VertexId(1));
    assert_eq!(g.vertex(b).size, 20.0);
    assert_eq!(g.vertex_count(), 2);
}

#[test]
fn graph_insert_edge_is_listed_by_both_endpoints() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let e = g.insert_edge(a, b);
    assert_eq!(g.vertex(a).out_edges(), &[e]);
    assert_eq!(g.vertex(b).in_edges(), &[e]);
    assert_eq!(g.edge(e).weight, 1.0);
    assert!(!g.edge(e).is_virtual);
    g.check_in_edge_out_edge_symmetry().unwrap();
}

#[test]
fn graph_invert_edges_swaps_endpoints_and_adjacency() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let c = g.add_vertex(10.0);
    let ab = g.insert_edge(a, b);
    let bc = g.insert_edge(b, c);

    g.invert_edges(&[ab]);
    assert_eq!(g.edge(ab).source, b);
    assert_eq!(g.edge(ab).target, a);
    assert!(g.edge(ab).reversed);
    assert!(g.vertex(a).out_edges().is_empty());
    assert_eq!(g.vertex(a).in_edges(), &[ab]);
    assert_eq!(g.vertex(b).out_edges(), &[bc, ab]);
    g.check_in_edge_out_edge_symmetry().unwrap();

    g.invert_edges(&[ab]);
    assert!(!g.edge(ab).reversed);
    assert_eq!(g.edge(ab).source, a);
}

#[test]
fn graph_detached_edges_stay_in_the_arena() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let e = g.insert_edge(a, b);

    g.detach_edge(e);
    assert_eq!(g.edge_count(), 0);
    assert!(!g.edge(e).is_attached());
    assert!(g.vertex(a).out_edges().is_empty());
    g.check_in_edge_out_edge_symmetry().unwrap();

    g.attach_edge(e);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.successors(a).collect::<Vec<_>>(), vec![(b, 1.0)]);
}

#[test]
fn graph_merge_parallel_edges_sums_weights() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let e1 = g.insert_edge(a, b);
    let e2 = g.insert_weighted_edge(a, b, 2.5, false);
    let e3 = g.insert_edge(b, a);

    assert_eq!(g.merge_parallel_edges(), 1);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edge(e1).weight, 3.5);
    assert_eq!(g.resolve_edge(e2), e1);
    assert_eq!(g.resolve_edge(e3), e3);
    g.check_in_edge_out_edge_symmetry().unwrap();
}

#[test]
fn graph_reset_vertex_indices_follows_the_layers() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    let c = g.add_vertex(10.0);
    g.layers = vec![vec![b, a], vec![c]];
    g.reset_vertex_indices_in_layers();

    assert_eq!(g.vertex(b).layer, Some(0));
    assert_eq!(g.vertex(b).index_in_layer, Some(0));
    assert_eq!(g.vertex(a).index_in_layer, Some(1));
    assert_eq!(g.vertex(c).layer, Some(1));
    g.check_vertex_indices().unwrap();
    assert_eq!(g.max_layer_width(), 2);
}

#[test]
fn graph_check_vertex_indices_reports_stale_slots() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let b = g.add_vertex(10.0);
    g.layers = vec![vec![a, b]];
    g.reset_vertex_indices_in_layers();
    g.layers[0].swap(0, 1);

    assert!(matches!(
        g.check_vertex_indices(),
        Err(Error::IndexMismatch { layer: 0, index: 0, .. })
    ));
}

#[test]
fn graph_check_vertex_indices_reports_unplaced_vertices() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0);
    let _b = g.add_vertex(10.0);
    g.layers = vec![vec![a]];
    g.reset_vertex_indices_in_layers();

    assert!(matches!(
        g.check_vertex_indices(),
        Err(Error::UndefinedLayer { vertex: VertexId(1) })
    ));
}
