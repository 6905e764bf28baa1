use crate::circuit::NodeType;
use thiserror::Error;

/// Errors that can occur while ingesting circuit records or applying edits.
///
/// Circuit-shape issues (dangling wires, cycles, oscillation) are *not* errors:
/// they have defined semantics and are handled inside the engine. Only corrupted
/// records and invalid edit requests surface here.
#[derive(Error, Debug, Clone)]
pub enum CircuitError {
    #[error("Failed to parse circuit JSON: {0}")]
    JsonParse(String),

    #[error("Node '{node_id}' has an unknown node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' not found")]
    NodeNotFound { node_id: String },

    #[error("Edge '{edge_id}' not found")]
    EdgeNotFound { edge_id: String },

    #[error("Node '{node_id}' ({node_type}) does not support '{operation}'")]
    UnsupportedOperation {
        node_id: String,
        node_type: NodeType,
        operation: &'static str,
    },

    #[error(
        "Cannot connect '{source_id}.{source_handle}' to '{target_id}.{target_handle}': {message}"
    )]
    InvalidConnection {
        source_id: String,
        source_handle: String,
        target_id: String,
        target_handle: String,
        message: String,
    },
}
