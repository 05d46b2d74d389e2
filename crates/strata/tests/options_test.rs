use strata::{Direction, LayoutGraph, LayoutOptions, Positioner};

#[test]
fn options_defaults() {
    let opts = LayoutOptions::default();
    assert_eq!(opts.direction, Direction::LeftToRight);
    assert_eq!(opts.layer_distance, 120.0);
    assert_eq!(opts.vertex_spacing, 30.0);
    assert_eq!(opts.mixed_spacing, 20.0);
    assert_eq!(opts.virtual_spacing, 10.0);
    assert!(opts.compress);
    assert_eq!(opts.sort_iterations, 24);
    assert_eq!(opts.exact_ordering_max_width, 8);
    assert_eq!(opts.positioner, Positioner::Aligned);
    assert!(opts.scale_to_canvas);
}

#[test]
fn options_partial_json_keeps_the_other_defaults() {
    let opts = LayoutOptions::from_json_str(
        r#"{ "direction": "topToBottom", "positioner": "even", "compress": false }"#,
    )
    .unwrap();
    assert_eq!(opts.direction, Direction::TopToBottom);
    assert_eq!(opts.positioner, Positioner::Even);
    assert!(!opts.compress);
    assert_eq!(opts.component_gap, 40.0);
}

#[test]
fn options_roundtrip_through_json() {
    let opts = LayoutOptions {
        sibling_bonus: 0.25,
        alignment_passes: 2,
        ..LayoutOptions::default()
    };
    let json = serde_json::to_string(&opts).unwrap();
    assert!(json.contains("\"siblingBonus\":0.25"));
    assert_eq!(LayoutOptions::from_json_str(&json).unwrap(), opts);
}

#[test]
fn options_reject_unknown_enum_values() {
    assert!(LayoutOptions::from_json_str(r#"{ "direction": "diagonal" }"#).is_err());
}

#[test]
fn options_spacing_and_order_views() {
    let opts = LayoutOptions {
        virtual_spacing: 4.0,
        sort_iterations: 3,
        ..LayoutOptions::default()
    };
    assert_eq!(opts.spacing().virtual_, 4.0);
    assert_eq!(opts.order_options().iterations, 3);
}

#[test]
fn input_graph_parses_from_json_with_a_default_canvas() {
    let input: LayoutGraph = serde_json::from_str(
        r#"{
            "nodes": [{ "id": "a", "size": 10, "rankHint": 2 }, { "id": "b", "size": 10 }],
            "edges": [{ "id": "ab", "source": "a", "target": "b" }]
        }"#,
    )
    .unwrap();
    assert_eq!(input.nodes[0].rank_hint, Some(2));
    assert_eq!(input.nodes[1].rank_hint, None);
    assert_eq!(input.canvas.width, 800.0);
    input.validate().unwrap();
}
