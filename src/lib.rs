//! # Kairo - Incremental Digital-Logic Circuit Evaluation Engine
//!
//! **Kairo** computes the electrical state of a node-based logic circuit: given
//! a mutable directed graph of typed components (batteries, switches, gates,
//! LEDs, decimal displays) connected by point-to-point wires, it derives the
//! signal present at every node output and every wire, correctly and
//! incrementally. Feedback cycles are first-class: latches
//! built from cross-coupled gates converge and hold state, and regions that
//! genuinely oscillate (an inverter feeding itself) are detected, bounded, and
//! reported as `unstable` instead of hanging or crashing.
//!
//! ## Core Workflow
//!
//! The engine is persistence-agnostic. It operates on a canonical snapshot of
//! node and edge records; where those records live (a document store, a
//! real-time sync layer, test fixtures) is the caller's business. The primary
//! workflow is:
//!
//! 1.  **Load Your Records**: Parse your stored circuit into a
//!     [`circuit::CircuitDefinition`], directly via serde, through
//!     [`circuit::CircuitDefinition::from_json`], or by implementing
//!     [`circuit::IntoCircuit`] for your own record structs.
//! 2.  **Open a Board**: [`board::CircuitBoard::from_circuit`] takes ownership
//!     of the records and becomes the single mutation boundary.
//! 3.  **Edit and Read**: every edit (toggle a switch, wire two pins, remove a
//!     node) commits fully and invalidates exactly the downstream cone it
//!     affects; reads pull cached derived state and recompute lazily.
//!
//! ## Quick Start
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! fn main() -> Result<(), CircuitError> {
//!     let mut board = CircuitBoard::new();
//!
//!     // Switch -> And.a, Battery -> And.b, And.out -> Led.a
//!     let switch = board.add_node(NodeType::Switch, NodeData::with_power(1));
//!     let battery = board.add_node(NodeType::Battery, NodeData::with_pins(1));
//!     let and = board.add_node(NodeType::And, NodeData::default());
//!     let led = board.add_node(NodeType::Led, NodeData::default());
//!
//!     board.connect(&switch, OUTPUT_HANDLE, &and, &pin_id(0))?;
//!     board.connect(&battery, &pin_id(0), &and, &pin_id(1))?;
//!     let wire = board.connect(&and, OUTPUT_HANDLE, &led, &pin_id(0))?;
//!
//!     assert!(board.derived_state(&led).unwrap().power);
//!     assert!(board.edge_powered(&wire));
//!
//!     // Flipping the switch re-evaluates only the affected cone.
//!     board.toggle_switch(&switch)?;
//!     assert!(!board.derived_state(&led).unwrap().power);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Evaluation Model
//!
//! One evaluation pass partitions the graph into sources (fixed outputs),
//! gates (derived), and sinks (read-only consumers). The gate subgraph is
//! evaluated in topological order when acyclic (the common case, one visit per
//! gate) and falls back to bounded iterative relaxation for cyclic regions. A
//! region that fails to stabilize within the bound is frozen at its
//! last computed values and flagged `unstable` in its derived state, so a UI
//! can render a warning instead of wrong-but-confident signals.

pub mod board;
pub mod cache;
pub mod circuit;
pub mod engine;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod registry;
