use strata::acyclic;
use strata::{Graph, VertexId};

fn path(g: &mut Graph, vs: &[VertexId]) {
    for w in vs.windows(2) {
        g.insert_edge(w[0], w[1]);
    }
}

fn vertices(g: &mut Graph, n: usize) -> Vec<VertexId> {
    (0..n).map(|_| g.add_vertex(10.0)).collect()
}

#[test]
fn acyclic_run_does_not_change_an_already_acyclic_graph() {
    let mut g = Graph::new();
    let v = vertices(&mut g, 4);
    path(&mut g, &[v[0], v[1], v[3]]);
    path(&mut g, &[v[0], v[2], v[3]]);

    assert!(acyclic::run(&mut g).is_empty());
    assert!(acyclic::is_acyclic(&g));
    assert_eq!(g.edge_count(), 4);
}

#[test]
fn acyclic_run_breaks_cycles_in_the_input_graph() {
    let mut g = Graph::new();
    let v = vertices(&mut g, 4);
    path(&mut g, &[v[0], v[1], v[2], v[3], v[0]]);
    assert!(!acyclic::is_acyclic(&g));

    let reversed = acyclic::run(&mut g);
    assert_eq!(reversed.len(), 1);
    assert!(acyclic::is_acyclic(&g));
    g.check_in_edge_out_edge_symmetry().unwrap();
}

#[test]
fn acyclic_run_reverses_exactly_one_edge_of_a_two_cycle() {
    let mut g = Graph::new();
    let v = vertices(&mut g, 2);
    let ab = g.insert_edge(v[0], v[1]);
    let ba = g.insert_edge(v[1], v[0]);

    let reversed = acyclic::run(&mut g);
    assert_eq!(reversed, vec![ba]);
    assert!(g.edge(ba).reversed);
    assert!(!g.edge(ab).reversed);

    g.merge_parallel_edges();
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge(ab).weight, 2.0);
    assert!(acyclic::is_acyclic(&g));
}

#[test]
fn acyclic_run_ignores_self_loops() {
    let mut g = Graph::new();
    let v = vertices(&mut g, 1);
    g.insert_edge(v[0], v[0]);
    assert!(acyclic::run(&mut g).is_empty());
}

#[test]
fn acyclic_run_is_deterministic() {
    let build = || {
        let mut g = Graph::new();
        let v = vertices(&mut g, 5);
        path(&mut g, &[v[0], v[1], v[2], v[0]]);
        path(&mut g, &[v[2], v[3], v[4], v[1]]);
        g
    };
    let mut g1 = build();
    let mut g2 = build();
    assert_eq!(acyclic::run(&mut g1), acyclic::run(&mut g2));
}

#[test]
fn acyclic_run_makes_dense_pseudo_random_graphs_acyclic() {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    for _ in 0..20 {
        let mut g = Graph::new();
        let v = vertices(&mut g, 12);
        for _ in 0..40 {
            let a = (next() % 12) as usize;
            let b = (next() % 12) as usize;
            if a != b {
                g.insert_edge(v[a], v[b]);
            }
        }
        let edges = g.edge_count();
        acyclic::run(&mut g);
        assert!(acyclic::is_acyclic(&g));
        assert_eq!(g.edge_count(), edges);
    }
}
