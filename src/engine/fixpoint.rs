use super::Assignment;
use crate::circuit::NodeDefinition;
use crate::graph::{GraphModel, PinResolver};
use crate::registry;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;
use tracing::debug;

/// Reads the effective signal at one input handle from the current assignment.
///
/// No driver, a malformed driver, or a driver that has produced nothing yet all
/// read as `false`.
pub(super) fn input_signal(
    resolver: &PinResolver<'_>,
    assignment: &Assignment,
    node_id: &str,
    handle: &str,
) -> bool {
    let Some(edge) = resolver.resolve_input(node_id, handle) else {
        return false;
    };
    let Some(source_handle) = resolver.source_handle_of(&edge.id) else {
        return false;
    };
    assignment
        .get(edge.source.as_str())
        .and_then(|outputs| outputs.get(source_handle))
        .copied()
        .unwrap_or(false)
}

/// Drives the gate subgraph to a fixpoint, mutating `assignment` in place.
///
/// First attempts a topological pass (Kahn) over the gate-to-gate dependency
/// edges: when the gate subgraph is acyclic every gate is evaluated exactly
/// once, in dependency order. Gates left with nonzero in-degree form the cyclic
/// region plus its downstream fan-out; that region falls back to iterative
/// relaxation in record order, capped at `2 * region_size + 4` passes, enough
/// for one full signal sweep around any cycle plus slack.
///
/// Returns the ids of the oscillating region, empty when everything converged.
pub(super) fn solve(
    graph: &GraphModel,
    resolver: &PinResolver<'_>,
    assignment: &mut Assignment,
) -> AHashSet<String> {
    let gates: Vec<&NodeDefinition> = graph.nodes().filter(|n| n.node_type.is_gate()).collect();
    if gates.is_empty() {
        return AHashSet::new();
    }

    let gate_ids: AHashSet<&str> = gates.iter().map(|g| g.id.as_str()).collect();
    let mut in_degree: AHashMap<&str, usize> =
        gates.iter().map(|g| (g.id.as_str(), 0)).collect();
    let mut dependents: AHashMap<&str, Vec<&str>> = AHashMap::new();

    // Dependency edges are counted from the consumer side so that only the
    // winning driver of each input handle participates.
    for gate in &gates {
        for handle in registry::inputs(gate.node_type, &gate.data) {
            if let Some(edge) = resolver.resolve_input(&gate.id, &handle) {
                if gate_ids.contains(edge.source.as_str()) {
                    if let Some(count) = in_degree.get_mut(gate.id.as_str()) {
                        *count += 1;
                    }
                    dependents
                        .entry(edge.source.as_str())
                        .or_default()
                        .push(gate.id.as_str());
                }
            }
        }
    }

    let mut queue: VecDeque<&str> = gates
        .iter()
        .filter(|g| in_degree.get(g.id.as_str()).copied() == Some(0))
        .map(|g| g.id.as_str())
        .collect();
    let mut processed: AHashSet<&str> = AHashSet::with_capacity(gates.len());

    while let Some(id) = queue.pop_front() {
        processed.insert(id);
        if let Some(node) = graph.node(id) {
            let outputs = eval_gate(resolver, assignment, node);
            assignment.insert(node.id.clone(), outputs);
        }
        for dependent in dependents.get(id).into_iter().flatten().copied() {
            if let Some(count) = in_degree.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    let region: Vec<&NodeDefinition> = gates
        .iter()
        .copied()
        .filter(|g| !processed.contains(g.id.as_str()))
        .collect();
    if region.is_empty() {
        return AHashSet::new();
    }

    debug!(
        region = region.len(),
        "gate subgraph is cyclic, falling back to iterative relaxation"
    );

    let max_passes = 2 * region.len() + 4;
    for pass in 0..max_passes {
        let mut changed = false;
        for node in &region {
            let outputs = eval_gate(resolver, assignment, node);
            if assignment.get(node.id.as_str()) != Some(&outputs) {
                changed = true;
            }
            assignment.insert(node.id.clone(), outputs);
        }
        if !changed {
            debug!(passes = pass + 1, "cyclic region converged");
            return AHashSet::new();
        }
    }

    debug!(
        region = region.len(),
        passes = max_passes,
        "cyclic region is oscillating, freezing at last computed values"
    );
    region.iter().map(|n| n.id.clone()).collect()
}

fn eval_gate(
    resolver: &PinResolver<'_>,
    assignment: &Assignment,
    node: &NodeDefinition,
) -> AHashMap<String, bool> {
    let mut signals = AHashMap::new();
    for handle in registry::inputs(node.node_type, &node.data) {
        let signal = input_signal(resolver, assignment, &node.id, &handle);
        signals.insert(handle, signal);
    }
    registry::evaluate(node.node_type, &signals, &node.data)
}
