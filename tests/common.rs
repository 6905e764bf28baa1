//! Common test utilities for building circuit snapshots.
use kairo::prelude::*;

#[allow(dead_code)]
pub fn node(id: &str, node_type: NodeType, data: NodeData) -> NodeDefinition {
    NodeDefinition::new(id, node_type, data)
}

#[allow(dead_code)]
pub fn edge(
    id: &str,
    source: &str,
    source_handle: &str,
    target: &str,
    target_handle: &str,
) -> EdgeDefinition {
    EdgeDefinition::new(id, source, source_handle, target, target_handle)
}

/// The reference scenario: `Switch(power=1) -> And.a`, `Battery -> And.b`,
/// `And.out -> Led.a`.
#[allow(dead_code)]
pub fn switch_and_led_circuit() -> CircuitDefinition {
    CircuitDefinition {
        nodes: vec![
            node("switch", NodeType::Switch, NodeData::with_power(1)),
            node("battery", NodeType::Battery, NodeData::with_pins(1)),
            node("and_gate", NodeType::And, NodeData::default()),
            node("led", NodeType::Led, NodeData::default()),
        ],
        edges: vec![
            edge("e1", "switch", OUTPUT_HANDLE, "and_gate", "a"),
            edge("e2", "battery", "a", "and_gate", "b"),
            edge("e3", "and_gate", OUTPUT_HANDLE, "led", "a"),
        ],
    }
}

/// One battery pin fanned out to three separate LEDs.
#[allow(dead_code)]
pub fn fanout_circuit() -> CircuitDefinition {
    CircuitDefinition {
        nodes: vec![
            node("battery", NodeType::Battery, NodeData::with_pins(1)),
            node("led1", NodeType::Led, NodeData::default()),
            node("led2", NodeType::Led, NodeData::default()),
            node("led3", NodeType::Led, NodeData::default()),
        ],
        edges: vec![
            edge("e1", "battery", "a", "led1", "a"),
            edge("e2", "battery", "a", "led2", "a"),
            edge("e3", "battery", "a", "led3", "a"),
        ],
    }
}

/// A three-pin battery driving all three pins of a decimal display.
#[allow(dead_code)]
pub fn display_circuit() -> CircuitDefinition {
    CircuitDefinition {
        nodes: vec![
            node("battery", NodeType::Battery, NodeData::with_pins(3)),
            node("display", NodeType::DecimalDisplay, NodeData::with_pins(3)),
        ],
        edges: vec![
            edge("e1", "battery", &pin_id(0), "display", &pin_id(0)),
            edge("e2", "battery", &pin_id(1), "display", &pin_id(1)),
            edge("e3", "battery", &pin_id(2), "display", &pin_id(2)),
        ],
    }
}

/// `And(a = Battery, b = Not(And.out))`: a feedback loop that never
/// stabilizes, plus a LED watching the oscillating output.
#[allow(dead_code)]
pub fn oscillator_circuit() -> CircuitDefinition {
    CircuitDefinition {
        nodes: vec![
            node("battery", NodeType::Battery, NodeData::with_pins(1)),
            node("and_gate", NodeType::And, NodeData::default()),
            node("inverter", NodeType::Not, NodeData::default()),
            node("led", NodeType::Led, NodeData::default()),
        ],
        edges: vec![
            edge("e1", "battery", "a", "and_gate", "a"),
            edge("e2", "and_gate", OUTPUT_HANDLE, "inverter", "a"),
            edge("e3", "inverter", OUTPUT_HANDLE, "and_gate", "b"),
            edge("e4", "and_gate", OUTPUT_HANDLE, "led", "a"),
        ],
    }
}

/// An SR latch from two NOR pairs (Or feeding Not), set/reset switches, with
/// `q = not1.out`.
///
/// `or1 = reset | not2.out`, `q = !or1`, `or2 = set | q`, `not2 = !or2`.
#[allow(dead_code)]
pub fn sr_latch_circuit() -> CircuitDefinition {
    CircuitDefinition {
        nodes: vec![
            node("set", NodeType::Switch, NodeData::with_power(1)),
            node("reset", NodeType::Switch, NodeData::with_power(0)),
            node("or1", NodeType::Or, NodeData::default()),
            node("not1", NodeType::Not, NodeData::default()),
            node("or2", NodeType::Or, NodeData::default()),
            node("not2", NodeType::Not, NodeData::default()),
            node("led", NodeType::Led, NodeData::default()),
        ],
        edges: vec![
            edge("e1", "reset", OUTPUT_HANDLE, "or1", "a"),
            edge("e2", "not2", OUTPUT_HANDLE, "or1", "b"),
            edge("e3", "or1", OUTPUT_HANDLE, "not1", "a"),
            edge("e4", "set", OUTPUT_HANDLE, "or2", "a"),
            edge("e5", "not1", OUTPUT_HANDLE, "or2", "b"),
            edge("e6", "or2", OUTPUT_HANDLE, "not2", "a"),
            edge("e7", "not1", OUTPUT_HANDLE, "led", "a"),
        ],
    }
}
