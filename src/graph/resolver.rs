use super::GraphModel;
use crate::circuit::EdgeDefinition;
use crate::registry;
use ahash::AHashMap;
use itertools::Itertools;
use tracing::warn;

/// Validated pin/edge resolution over one [`GraphModel`] snapshot.
///
/// Construction walks every edge record once and indexes the well-formed ones
/// by endpoint and handle. Malformed edges (dangling node ids, handles the
/// endpoint's type does not declare) are excluded and logged; they are
/// expected inputs, since the record layer replicates edits without
/// referential checks, and never fatal.
pub struct PinResolver<'a> {
    /// target node id -> input handle -> driving edges, in record order.
    incoming: AHashMap<&'a str, AHashMap<String, Vec<&'a EdgeDefinition>>>,
    /// source node id -> output handle -> driven edges, in record order.
    outgoing: AHashMap<&'a str, AHashMap<String, Vec<&'a EdgeDefinition>>>,
    /// edge id -> (source handle, target handle) after defaulting.
    resolved: AHashMap<&'a str, (String, String)>,
    /// Every edge that survived validation, in record order.
    valid_edges: Vec<&'a EdgeDefinition>,
}

impl<'a> PinResolver<'a> {
    pub fn new(graph: &'a GraphModel) -> Self {
        let mut incoming: AHashMap<&str, AHashMap<String, Vec<&EdgeDefinition>>> = AHashMap::new();
        let mut outgoing: AHashMap<&str, AHashMap<String, Vec<&EdgeDefinition>>> = AHashMap::new();
        let mut resolved = AHashMap::new();
        let mut valid_edges = Vec::new();

        for edge in graph.edges() {
            let Some(source) = graph.node(&edge.source) else {
                warn!(edge = %edge.id, node = %edge.source, "edge references a missing source node, ignoring");
                continue;
            };
            let Some(target) = graph.node(&edge.target) else {
                warn!(edge = %edge.id, node = %edge.target, "edge references a missing target node, ignoring");
                continue;
            };

            let source_handles = registry::outputs(source.node_type, &source.data);
            let Some(source_handle) =
                resolve_handle(edge.source_handle.as_deref(), &source_handles)
            else {
                warn!(
                    edge = %edge.id,
                    node = %edge.source,
                    handle = edge.source_handle.as_deref().unwrap_or("<none>"),
                    "edge leaves an undeclared output handle, ignoring"
                );
                continue;
            };

            let target_handles = registry::inputs(target.node_type, &target.data);
            let Some(target_handle) =
                resolve_handle(edge.target_handle.as_deref(), &target_handles)
            else {
                warn!(
                    edge = %edge.id,
                    node = %edge.target,
                    handle = edge.target_handle.as_deref().unwrap_or("<none>"),
                    "edge enters an undeclared input handle, ignoring"
                );
                continue;
            };

            outgoing
                .entry(edge.source.as_str())
                .or_default()
                .entry(source_handle.clone())
                .or_default()
                .push(edge);
            incoming
                .entry(edge.target.as_str())
                .or_default()
                .entry(target_handle.clone())
                .or_default()
                .push(edge);
            resolved.insert(edge.id.as_str(), (source_handle, target_handle));
            valid_edges.push(edge);
        }

        Self {
            incoming,
            outgoing,
            resolved,
            valid_edges,
        }
    }

    /// The single driving edge of an input handle, if any.
    ///
    /// An input handle accepts at most one driver. When duplicate edges survive
    /// into a snapshot (replication can transiently hold both the displaced and
    /// the displacing wire), the most-recently-added edge wins.
    pub fn resolve_input(&self, node_id: &str, handle: &str) -> Option<&'a EdgeDefinition> {
        self.incoming
            .get(node_id)?
            .get(handle)?
            .last()
            .copied()
    }

    /// All edges driven by an output handle, in record order (fan-out is
    /// unbounded).
    pub fn resolve_outputs(&self, node_id: &str, handle: &str) -> &[&'a EdgeDefinition] {
        self.outgoing
            .get(node_id)
            .and_then(|handles| handles.get(handle))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Nodes reachable from `node_id` via one outgoing edge, deduplicated, in
    /// record order.
    pub fn successors(&self, node_id: &str) -> Vec<&'a str> {
        self.valid_edges
            .iter()
            .copied()
            .filter(|edge| edge.source == node_id)
            .map(|edge| edge.target.as_str())
            .unique()
            .collect()
    }

    /// Nodes driving `node_id` via one incoming edge, deduplicated, in record
    /// order.
    pub fn predecessors(&self, node_id: &str) -> Vec<&'a str> {
        self.valid_edges
            .iter()
            .copied()
            .filter(|edge| edge.target == node_id)
            .map(|edge| edge.source.as_str())
            .unique()
            .collect()
    }

    /// The resolved source handle of a well-formed edge.
    pub fn source_handle_of(&self, edge_id: &str) -> Option<&str> {
        self.resolved.get(edge_id).map(|(source, _)| source.as_str())
    }

    /// The resolved target handle of a well-formed edge.
    pub fn target_handle_of(&self, edge_id: &str) -> Option<&str> {
        self.resolved.get(edge_id).map(|(_, target)| target.as_str())
    }

    /// Whether the edge survived validation.
    pub fn is_well_formed(&self, edge_id: &str) -> bool {
        self.resolved.contains_key(edge_id)
    }
}

/// Matches an optional record handle against the declared handles, falling back
/// to the sole declared handle when the record omits it (the visual editor does
/// this for single-connector nodes).
fn resolve_handle(recorded: Option<&str>, declared: &[String]) -> Option<String> {
    match recorded {
        Some(handle) => declared.iter().find(|h| *h == handle).cloned(),
        None if declared.len() == 1 => Some(declared[0].clone()),
        None => None,
    }
}
