//! Pure truth-table and pin-layout definitions per node type.
//!
//! Everything here is a total function over the closed [`NodeType`] enum: no
//! state, no side effects, no failure modes. An undeclared type cannot reach
//! these functions, because the record ingestion boundary rejects unknown type
//! strings before a `NodeType` value ever exists.

use crate::circuit::{NodeData, NodeType, OUTPUT_HANDLE, pin_id};
use ahash::AHashMap;

/// The input handles declared by `node_type` under `data`.
///
/// Sources declare none. Gates declare pin 0 (`a`) and, for the binary gates,
/// pin 1 (`b`). A display declares one input per configured pin.
pub fn inputs(node_type: NodeType, data: &NodeData) -> Vec<String> {
    match node_type {
        NodeType::Battery | NodeType::Switch => Vec::new(),
        NodeType::Led | NodeType::Not => vec![pin_id(0)],
        NodeType::And | NodeType::Or | NodeType::Xor => vec![pin_id(0), pin_id(1)],
        NodeType::DecimalDisplay => (0..data.pins()).map(pin_id).collect(),
    }
}

/// The output handles declared by `node_type` under `data`.
///
/// Sinks declare none. A battery declares one output per configured pin; every
/// other driving type has the single [`OUTPUT_HANDLE`].
pub fn outputs(node_type: NodeType, data: &NodeData) -> Vec<String> {
    match node_type {
        NodeType::Battery => (0..data.pins()).map(pin_id).collect(),
        NodeType::Switch | NodeType::Not | NodeType::And | NodeType::Or | NodeType::Xor => {
            vec![OUTPUT_HANDLE.to_string()]
        }
        NodeType::Led | NodeType::DecimalDisplay => Vec::new(),
    }
}

/// Computes the output signals of one node from its input signals.
///
/// A handle missing from `signals` reads as `false` (an unconnected input
/// carries no power), so an unconnected `Not` outputs `true`. Sinks return an
/// empty mapping; their observable state is read from their resolved input
/// edges, not from here.
pub fn evaluate(
    node_type: NodeType,
    signals: &AHashMap<String, bool>,
    data: &NodeData,
) -> AHashMap<String, bool> {
    let signal = |handle: &str| signals.get(handle).copied().unwrap_or(false);

    match node_type {
        NodeType::Battery => (0..data.pins()).map(|i| (pin_id(i), true)).collect(),
        NodeType::Switch => AHashMap::from([(OUTPUT_HANDLE.to_string(), data.is_on())]),
        NodeType::Not => AHashMap::from([(OUTPUT_HANDLE.to_string(), !signal("a"))]),
        NodeType::And => {
            AHashMap::from([(OUTPUT_HANDLE.to_string(), signal("a") && signal("b"))])
        }
        NodeType::Or => AHashMap::from([(OUTPUT_HANDLE.to_string(), signal("a") || signal("b"))]),
        NodeType::Xor => AHashMap::from([(OUTPUT_HANDLE.to_string(), signal("a") ^ signal("b"))]),
        NodeType::Led | NodeType::DecimalDisplay => AHashMap::new(),
    }
}
