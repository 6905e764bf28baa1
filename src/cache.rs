//! Pull-based memoization of derived state.
//!
//! The record layer pushes `invalidate` notifications after every commit; reads
//! pull. Invalidation determines what must be *recomputed*, not what may be
//! *read*: reading a node whose upstream cone is unchanged returns the cached
//! value untouched, while the first read of a dirty node triggers one
//! whole-graph engine pass.

use crate::engine::{DerivedState, Evaluation, EvaluationEngine};
use crate::graph::{GraphModel, PinResolver};
use ahash::AHashSet;
use std::collections::VecDeque;

/// Memoized per-node derived state with downstream-cone invalidation.
#[derive(Debug, Default)]
pub struct DerivedCache {
    evaluation: Evaluation,
    dirty: AHashSet<String>,
    valid: bool,
}

impl DerivedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every listed node and its transitive downstream cone dirty.
    ///
    /// Called by the mutation boundary after each commit: a toggled switch, an
    /// added or removed node or edge. Ids no longer present in the graph are
    /// tolerated (their cone is empty).
    pub fn invalidate<'i>(&mut self, graph: &GraphModel, ids: impl IntoIterator<Item = &'i str>) {
        let resolver = PinResolver::new(graph);
        let mut queue: VecDeque<String> = ids.into_iter().map(str::to_string).collect();
        let mut seen: AHashSet<String> = queue.iter().cloned().collect();

        while let Some(id) = queue.pop_front() {
            for successor in resolver.successors(&id) {
                if seen.insert(successor.to_string()) {
                    queue.push_back(successor.to_string());
                }
            }
            self.dirty.insert(id);
        }
    }

    /// The derived state of one node, recomputing lazily iff the node is dirty.
    pub fn get(&mut self, graph: &GraphModel, node_id: &str) -> Option<&DerivedState> {
        if graph.node(node_id).is_none() {
            return None;
        }
        if !self.valid || self.dirty.contains(node_id) {
            self.recompute(graph);
        }
        self.evaluation.states.get(node_id)
    }

    /// Whether the edge currently carries power. Mirrors the source node's
    /// output at the edge's source handle; a missing or malformed edge reads
    /// as unpowered.
    pub fn edge_powered(&mut self, graph: &GraphModel, edge_id: &str) -> bool {
        let Some(edge) = graph.edge(edge_id) else {
            return false;
        };
        if !self.valid || self.dirty.contains(edge.source.as_str()) {
            self.recompute(graph);
        }
        self.evaluation
            .edge_power
            .get(edge_id)
            .copied()
            .unwrap_or(false)
    }

    /// A fully refreshed view of the whole evaluation.
    pub fn refreshed(&mut self, graph: &GraphModel) -> &Evaluation {
        if !self.valid || !self.dirty.is_empty() {
            self.recompute(graph);
        }
        &self.evaluation
    }

    /// One whole-graph engine pass, warm-started from the previous evaluation
    /// so converged cyclic regions (latches) keep their held state.
    fn recompute(&mut self, graph: &GraphModel) {
        let engine = EvaluationEngine::new(graph);
        self.evaluation = engine.evaluate(Some(&self.evaluation));
        self.dirty.clear();
        self.valid = true;
    }
}
