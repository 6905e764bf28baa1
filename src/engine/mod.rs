//! Fixpoint evaluation of a circuit snapshot.
//!
//! The engine is a pure function of a [`GraphModel`]: it never mutates the
//! records it reads and never fails on circuit-shape issues. Cycles, dangling
//! wires and oscillation are expected inputs with defined semantics.

use crate::circuit::{NodeType, OUTPUT_HANDLE, pin_id};
use crate::graph::{GraphModel, PinResolver};
use crate::registry;
use ahash::AHashMap;
use serde::Serialize;

mod fixpoint;

use fixpoint::input_signal;

/// Per-node output handle -> signal, the working state of one evaluation pass.
pub(crate) type Assignment = AHashMap<String, AHashMap<String, bool>>;

/// The computed electrical state of one node. Never persisted; recomputed
/// whenever the owning record set changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedState {
    /// Signal per output handle. Empty for sinks.
    pub outputs: AHashMap<String, bool>,
    /// Whether the node is energized: a gate's `out`, a LED's resolved input,
    /// a switch's configured state. Batteries and displays always read `true`.
    pub power: bool,
    /// Set when the node sits in a region that failed to stabilize within the
    /// iteration bound. `outputs`/`power` then hold the last computed values.
    pub unstable: bool,
    /// Decimal read-out of a display: binary-weighted sum of its powered input
    /// pins, pin 0 least significant. `None` for every other type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

/// The result of evaluating a whole snapshot: derived state per node and the
/// mirrored power of every well-formed edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub states: AHashMap<String, DerivedState>,
    pub edge_power: AHashMap<String, bool>,
}

/// Computes a stable signal assignment for every node of one snapshot.
///
/// The snapshot is borrowed immutably for the lifetime of the engine; the
/// caller is responsible for not editing it mid-pass (one mutation commits
/// fully before evaluation runs).
pub struct EvaluationEngine<'a> {
    graph: &'a GraphModel,
    resolver: PinResolver<'a>,
}

impl<'a> EvaluationEngine<'a> {
    pub fn new(graph: &'a GraphModel) -> Self {
        Self {
            graph,
            resolver: PinResolver::new(graph),
        }
    }

    /// Runs one full evaluation.
    ///
    /// `warm` seeds gate outputs from a previous evaluation, so bistable
    /// regions (latches) hold their state across recomputation; a cold start
    /// assumes every gate output unpowered. Sources are fixed by their config,
    /// gates are driven to a fixpoint, sinks read their resolved inputs last.
    pub fn evaluate(&self, warm: Option<&Evaluation>) -> Evaluation {
        let mut assignment: Assignment = AHashMap::with_capacity(self.graph.node_count());

        let no_signals = AHashMap::new();
        for node in self.graph.nodes() {
            if node.node_type.is_source() {
                let outputs = registry::evaluate(node.node_type, &no_signals, &node.data);
                assignment.insert(node.id.clone(), outputs);
            } else if node.node_type.is_gate() {
                let previous = warm.and_then(|w| w.states.get(&node.id));
                let outputs = registry::outputs(node.node_type, &node.data)
                    .into_iter()
                    .map(|handle| {
                        let seed = previous
                            .and_then(|s| s.outputs.get(&handle))
                            .copied()
                            .unwrap_or(false);
                        (handle, seed)
                    })
                    .collect();
                assignment.insert(node.id.clone(), outputs);
            }
        }

        let oscillating = fixpoint::solve(self.graph, &self.resolver, &mut assignment);

        let mut states: AHashMap<String, DerivedState> =
            AHashMap::with_capacity(self.graph.node_count());
        for node in self.graph.nodes() {
            let outputs = assignment.get(&node.id).cloned().unwrap_or_default();
            let state = match node.node_type {
                NodeType::Battery => DerivedState {
                    outputs,
                    power: true,
                    ..Default::default()
                },
                NodeType::Switch => DerivedState {
                    outputs,
                    power: node.data.is_on(),
                    ..Default::default()
                },
                NodeType::Not | NodeType::And | NodeType::Or | NodeType::Xor => DerivedState {
                    power: outputs.get(OUTPUT_HANDLE).copied().unwrap_or(false),
                    unstable: oscillating.contains(&node.id),
                    outputs,
                    value: None,
                },
                NodeType::Led => DerivedState {
                    power: input_signal(&self.resolver, &assignment, &node.id, &pin_id(0)),
                    unstable: self.driver_unstable(&node.id, &oscillating),
                    ..Default::default()
                },
                NodeType::DecimalDisplay => {
                    let mut value = 0u32;
                    for pin in 0..node.data.pins() {
                        let lit =
                            input_signal(&self.resolver, &assignment, &node.id, &pin_id(pin));
                        if lit {
                            value |= 1u32.checked_shl(pin).unwrap_or(0);
                        }
                    }
                    DerivedState {
                        power: true,
                        unstable: self.driver_unstable(&node.id, &oscillating),
                        value: Some(value),
                        ..Default::default()
                    }
                }
            };
            states.insert(node.id.clone(), state);
        }

        let mut edge_power = AHashMap::with_capacity(self.graph.edge_count());
        for edge in self.graph.edges() {
            if let Some(source_handle) = self.resolver.source_handle_of(&edge.id) {
                let powered = assignment
                    .get(edge.source.as_str())
                    .and_then(|outputs| outputs.get(source_handle))
                    .copied()
                    .unwrap_or(false);
                edge_power.insert(edge.id.clone(), powered);
            }
        }

        Evaluation { states, edge_power }
    }

    /// A sink inherits instability from its drivers so the warning renders on
    /// the visible element.
    fn driver_unstable(&self, node_id: &str, oscillating: &ahash::AHashSet<String>) -> bool {
        let Some(node) = self.graph.node(node_id) else {
            return false;
        };
        registry::inputs(node.node_type, &node.data)
            .iter()
            .filter_map(|handle| self.resolver.resolve_input(node_id, handle))
            .any(|edge| oscillating.contains(edge.source.as_str()))
    }
}
