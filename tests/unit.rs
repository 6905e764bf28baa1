//! Unit tests for node behaviors, pin naming and record resolution.
mod common;
use ahash::AHashMap;
use common::*;
use kairo::prelude::*;

#[test]
fn test_pin_id_scheme() {
    assert_eq!(pin_id(0), "a");
    assert_eq!(pin_id(1), "b");
    assert_eq!(pin_id(2), "p2");
    assert_eq!(pin_id(10), "p10");
}

#[test]
fn test_node_data_defaults() {
    let data = NodeData::default();
    assert_eq!(data.pins(), DEFAULT_PINS);
    assert!(!data.is_on());

    assert_eq!(NodeData::with_pins(0).pins(), 1); // floor of one pin
    assert!(NodeData::with_power(1).is_on());
}

#[test]
fn test_node_type_names_round_trip() {
    for node_type in [
        NodeType::Battery,
        NodeType::Switch,
        NodeType::Led,
        NodeType::Not,
        NodeType::And,
        NodeType::Or,
        NodeType::Xor,
        NodeType::DecimalDisplay,
    ] {
        let parsed: NodeType = node_type.as_str().parse().unwrap();
        assert_eq!(parsed, node_type);
    }
    assert!("CapacitorNode".parse::<NodeType>().is_err());
}

#[test]
fn test_node_type_partition() {
    assert!(NodeType::Battery.is_source() && NodeType::Switch.is_source());
    assert!(NodeType::Not.is_gate() && NodeType::Xor.is_gate());
    assert!(NodeType::Led.is_sink() && NodeType::DecimalDisplay.is_sink());
    assert!(!NodeType::And.is_source() && !NodeType::And.is_sink());
}

#[test]
fn test_registry_pin_layouts() {
    let battery = NodeData::with_pins(4);
    assert!(registry::inputs(NodeType::Battery, &battery).is_empty());
    assert_eq!(
        registry::outputs(NodeType::Battery, &battery),
        vec!["a", "b", "p2", "p3"]
    );

    assert_eq!(
        registry::inputs(NodeType::And, &NodeData::default()),
        vec!["a", "b"]
    );
    assert_eq!(
        registry::outputs(NodeType::Not, &NodeData::default()),
        vec![OUTPUT_HANDLE]
    );
    assert!(registry::outputs(NodeType::Led, &NodeData::default()).is_empty());
    assert_eq!(
        registry::inputs(NodeType::DecimalDisplay, &NodeData::with_pins(2)),
        vec!["a", "b"]
    );
}

#[test]
fn test_registry_truth_tables() {
    let data = NodeData::default();
    let signal = |pairs: &[(&str, bool)]| -> AHashMap<String, bool> {
        pairs.iter().map(|(h, v)| (h.to_string(), *v)).collect()
    };
    let out = |result: &AHashMap<String, bool>| result[OUTPUT_HANDLE];

    // Missing inputs read as false, so an unconnected Not outputs true.
    assert!(out(&registry::evaluate(NodeType::Not, &signal(&[]), &data)));
    assert!(!out(&registry::evaluate(
        NodeType::Not,
        &signal(&[("a", true)]),
        &data
    )));

    for (a, b, and, or, xor) in [
        (false, false, false, false, false),
        (true, false, false, true, true),
        (false, true, false, true, true),
        (true, true, true, true, false),
    ] {
        let signals = signal(&[("a", a), ("b", b)]);
        assert_eq!(out(&registry::evaluate(NodeType::And, &signals, &data)), and);
        assert_eq!(out(&registry::evaluate(NodeType::Or, &signals, &data)), or);
        assert_eq!(out(&registry::evaluate(NodeType::Xor, &signals, &data)), xor);
    }
}

#[test]
fn test_registry_sources_and_sinks() {
    let battery = registry::evaluate(
        NodeType::Battery,
        &AHashMap::new(),
        &NodeData::with_pins(3),
    );
    assert_eq!(battery.len(), 3);
    assert!(battery.values().all(|v| *v));

    let off = registry::evaluate(NodeType::Switch, &AHashMap::new(), &NodeData::default());
    assert!(!off[OUTPUT_HANDLE]);
    let on = registry::evaluate(NodeType::Switch, &AHashMap::new(), &NodeData::with_power(1));
    assert!(on[OUTPUT_HANDLE]);

    assert!(registry::evaluate(NodeType::Led, &AHashMap::new(), &NodeData::default()).is_empty());
    assert!(
        registry::evaluate(
            NodeType::DecimalDisplay,
            &AHashMap::new(),
            &NodeData::default()
        )
        .is_empty()
    );
}

#[test]
fn test_resolver_tie_break_takes_most_recent_edge() {
    let circuit = CircuitDefinition {
        nodes: vec![
            node("off_switch", NodeType::Switch, NodeData::with_power(0)),
            node("battery", NodeType::Battery, NodeData::with_pins(1)),
            node("led", NodeType::Led, NodeData::default()),
        ],
        edges: vec![
            edge("first", "off_switch", OUTPUT_HANDLE, "led", "a"),
            edge("second", "battery", "a", "led", "a"),
        ],
    };
    let graph = GraphModel::from_definition(circuit);
    let resolver = PinResolver::new(&graph);

    let driver = resolver.resolve_input("led", "a").unwrap();
    assert_eq!(driver.id, "second");
}

#[test]
fn test_resolver_excludes_malformed_edges() {
    let circuit = CircuitDefinition {
        nodes: vec![
            node("battery", NodeType::Battery, NodeData::with_pins(1)),
            node("led", NodeType::Led, NodeData::default()),
        ],
        edges: vec![
            edge("dangling", "ghost", "a", "led", "a"),
            edge("bad_handle", "battery", "p9", "led", "a"),
            edge("good", "battery", "a", "led", "a"),
        ],
    };
    let graph = GraphModel::from_definition(circuit);
    let resolver = PinResolver::new(&graph);

    assert!(!resolver.is_well_formed("dangling"));
    assert!(!resolver.is_well_formed("bad_handle"));
    assert_eq!(resolver.resolve_input("led", "a").unwrap().id, "good");
}

#[test]
fn test_resolver_defaults_omitted_handles() {
    // The visual editor omits the handle for single-connector nodes.
    let circuit = CircuitDefinition {
        nodes: vec![
            node("switch", NodeType::Switch, NodeData::with_power(1)),
            node("led", NodeType::Led, NodeData::default()),
        ],
        edges: vec![EdgeDefinition {
            id: "e1".to_string(),
            source: "switch".to_string(),
            target: "led".to_string(),
            source_handle: None,
            target_handle: None,
        }],
    };
    let graph = GraphModel::from_definition(circuit);
    let resolver = PinResolver::new(&graph);

    assert!(resolver.is_well_formed("e1"));
    assert_eq!(resolver.source_handle_of("e1"), Some(OUTPUT_HANDLE));
    assert_eq!(resolver.target_handle_of("e1"), Some("a"));
}

#[test]
fn test_resolver_adjacency() {
    let graph = GraphModel::from_definition(switch_and_led_circuit());
    let resolver = PinResolver::new(&graph);

    assert_eq!(resolver.successors("switch"), vec!["and_gate"]);
    assert_eq!(resolver.successors("and_gate"), vec!["led"]);
    assert_eq!(resolver.predecessors("and_gate"), vec!["switch", "battery"]);
    assert_eq!(resolver.resolve_outputs("and_gate", OUTPUT_HANDLE).len(), 1);
}

#[test]
fn test_error_display() {
    let err = CircuitError::UnknownNodeType {
        node_id: "n42".to_string(),
        type_name: "FluxNode".to_string(),
    };
    assert!(err.to_string().contains("n42"));
    assert!(err.to_string().contains("FluxNode"));

    let err = CircuitError::UnsupportedOperation {
        node_id: "n7".to_string(),
        node_type: NodeType::Led,
        operation: "toggle_switch",
    };
    assert!(err.to_string().contains("n7"));
    assert!(err.to_string().contains("toggle_switch"));
}
