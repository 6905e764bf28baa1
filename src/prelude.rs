//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kairo crate. Import this
//! module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! let mut board = CircuitBoard::new();
//! let switch = board.add_node(NodeType::Switch, NodeData::with_power(1));
//! let led = board.add_node(NodeType::Led, NodeData::default());
//! board.connect(&switch, OUTPUT_HANDLE, &led, &pin_id(0)).unwrap();
//! assert!(board.derived_state(&led).unwrap().power);
//! ```

// Board, cache and engine
pub use crate::board::CircuitBoard;
pub use crate::cache::DerivedCache;
pub use crate::engine::{DerivedState, Evaluation, EvaluationEngine};

// Record and graph types
pub use crate::circuit::{
    CircuitDefinition, DEFAULT_PINS, EdgeDefinition, IntoCircuit, NodeData, NodeDefinition,
    NodeType, OUTPUT_HANDLE, pin_id,
};
pub use crate::graph::{GraphModel, PinResolver};

// Node behavior registry
pub use crate::registry;

// Error types
pub use crate::error::CircuitError;
