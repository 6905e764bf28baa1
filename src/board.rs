//! The owning mutation facade over one circuit.
//!
//! A [`CircuitBoard`] stands where the external editor/persistence collaborator
//! stands in production: it owns the record set, applies edits, keeps
//! referential integrity (removing a node removes its wires, connecting an
//! occupied input displaces the previous wire) and fires invalidation after
//! every commit. Each mutation completes fully before control returns, so a
//! reader never observes a half-applied edit.

use crate::cache::DerivedCache;
use crate::circuit::{
    EdgeDefinition, IntoCircuit, NodeData, NodeDefinition, NodeType, pin_id,
};
use crate::engine::DerivedState;
use crate::error::CircuitError;
use crate::graph::{GraphModel, PinResolver};
use crate::registry;

/// An editable circuit with incrementally cached derived state.
#[derive(Debug, Default)]
pub struct CircuitBoard {
    graph: GraphModel,
    cache: DerivedCache,
    next_id: u64,
}

impl CircuitBoard {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a record snapshot (anything convertible via
    /// [`IntoCircuit`]). Evaluation is lazy: nothing is computed until the
    /// first read.
    pub fn from_circuit(circuit: impl IntoCircuit) -> Result<Self, CircuitError> {
        Ok(Self {
            graph: GraphModel::from_definition(circuit.into_circuit()?),
            cache: DerivedCache::new(),
            next_id: 1,
        })
    }

    /// Read-only view of the underlying records.
    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    // --- mutations -------------------------------------------------------

    /// Adds a node and returns its generated id.
    pub fn add_node(&mut self, node_type: NodeType, data: NodeData) -> String {
        let id = self.fresh_id("n");
        self.graph
            .insert_node(NodeDefinition::new(id.clone(), node_type, data));
        self.invalidate([id.as_str()]);
        id
    }

    /// Removes a node and every wire touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), CircuitError> {
        if self.graph.node(node_id).is_none() {
            return Err(CircuitError::NodeNotFound {
                node_id: node_id.to_string(),
            });
        }

        // The downstream cone must be captured before the wires disappear.
        let affected: Vec<String> = PinResolver::new(&self.graph)
            .successors(node_id)
            .into_iter()
            .map(str::to_string)
            .collect();

        for edge_id in self.graph.incident_edges(node_id) {
            self.graph.remove_edge(&edge_id);
        }
        self.graph.remove_node(node_id);

        self.invalidate(affected.iter().map(String::as_str));
        Ok(())
    }

    /// Wires an output handle to an input handle and returns the new edge id.
    ///
    /// An input handle holds at most one wire: connecting to an occupied
    /// handle removes the wire it currently holds, exactly like re-plugging a
    /// jumper cable.
    pub fn connect(
        &mut self,
        source_id: &str,
        source_handle: &str,
        target_id: &str,
        target_handle: &str,
    ) -> Result<String, CircuitError> {
        let source = self
            .graph
            .node(source_id)
            .ok_or_else(|| CircuitError::NodeNotFound {
                node_id: source_id.to_string(),
            })?;
        let target = self
            .graph
            .node(target_id)
            .ok_or_else(|| CircuitError::NodeNotFound {
                node_id: target_id.to_string(),
            })?;

        let connection_error = |message: &str| CircuitError::InvalidConnection {
            source_id: source_id.to_string(),
            source_handle: source_handle.to_string(),
            target_id: target_id.to_string(),
            target_handle: target_handle.to_string(),
            message: message.to_string(),
        };

        if !registry::outputs(source.node_type, &source.data)
            .iter()
            .any(|h| h == source_handle)
        {
            return Err(connection_error("source node declares no such output"));
        }
        if !registry::inputs(target.node_type, &target.data)
            .iter()
            .any(|h| h == target_handle)
        {
            return Err(connection_error("target node declares no such input"));
        }

        let displaced: Vec<String> = {
            let resolver = PinResolver::new(&self.graph);
            self.graph
                .edges()
                .filter(|e| {
                    e.target == target_id
                        && resolver.target_handle_of(&e.id) == Some(target_handle)
                })
                .map(|e| e.id.clone())
                .collect()
        };
        for edge_id in displaced {
            self.graph.remove_edge(&edge_id);
        }

        let id = self.fresh_id("e");
        self.graph.insert_edge(EdgeDefinition::new(
            id.clone(),
            source_id,
            source_handle,
            target_id,
            target_handle,
        ));

        self.invalidate([source_id, target_id]);
        Ok(id)
    }

    /// Removes a wire.
    pub fn disconnect(&mut self, edge_id: &str) -> Result<(), CircuitError> {
        let edge = self
            .graph
            .remove_edge(edge_id)
            .ok_or_else(|| CircuitError::EdgeNotFound {
                edge_id: edge_id.to_string(),
            })?;
        self.invalidate([edge.source.as_str(), edge.target.as_str()]);
        Ok(())
    }

    /// Sets a switch on or off.
    pub fn set_switch(&mut self, node_id: &str, on: bool) -> Result<(), CircuitError> {
        let node = self.expect_node(node_id, NodeType::Switch, "set_switch")?;
        let mut updated = node.clone();
        updated.data.power = Some(on as u8);
        self.graph.insert_node(updated);
        self.invalidate([node_id]);
        Ok(())
    }

    /// Flips a switch and returns its new state.
    pub fn toggle_switch(&mut self, node_id: &str) -> Result<bool, CircuitError> {
        let node = self.expect_node(node_id, NodeType::Switch, "toggle_switch")?;
        let on = !node.data.is_on();
        self.set_switch(node_id, on)?;
        Ok(on)
    }

    /// Grows a battery or display by one pin and returns the new pin count.
    pub fn add_pin(&mut self, node_id: &str) -> Result<u32, CircuitError> {
        let node = self.pinned_node(node_id, "add_pin")?;
        let pins = node.data.pins() + 1;
        let mut updated = node.clone();
        updated.data.pins = Some(pins);
        self.graph.insert_node(updated);
        self.invalidate([node_id]);
        Ok(pins)
    }

    /// Shrinks a battery or display by one pin and returns the new pin count.
    ///
    /// A wire on a removed battery pin is re-plugged into the previous pin; a
    /// wire into a removed display pin is deleted. Removing the last remaining
    /// pin is a no-op, matching the editor.
    pub fn remove_pin(&mut self, node_id: &str) -> Result<u32, CircuitError> {
        let node = self.pinned_node(node_id, "remove_pin")?;
        let pins = node.data.pins();
        if pins < 2 {
            return Ok(pins);
        }
        let node_type = node.node_type;
        let last_pin = pin_id(pins - 1);
        let previous_pin = pin_id(pins - 2);

        let on_last_pin: Vec<String> = {
            let resolver = PinResolver::new(&self.graph);
            self.graph
                .edges()
                .filter(|e| match node_type {
                    NodeType::Battery => {
                        e.source == node_id
                            && resolver.source_handle_of(&e.id) == Some(last_pin.as_str())
                    }
                    _ => {
                        e.target == node_id
                            && resolver.target_handle_of(&e.id) == Some(last_pin.as_str())
                    }
                })
                .map(|e| e.id.clone())
                .collect()
        };
        for edge_id in &on_last_pin {
            match node_type {
                NodeType::Battery => {
                    self.graph.update_edge(edge_id, |edge| {
                        edge.source_handle = Some(previous_pin.clone());
                    });
                }
                _ => {
                    self.graph.remove_edge(edge_id);
                }
            }
        }

        let mut updated = self
            .graph
            .node(node_id)
            .cloned()
            .ok_or_else(|| CircuitError::NodeNotFound {
                node_id: node_id.to_string(),
            })?;
        updated.data.pins = Some(pins - 1);
        self.graph.insert_node(updated);
        self.invalidate([node_id]);
        Ok(pins - 1)
    }

    /// External change notification: marks the listed nodes and their
    /// downstream cones dirty. The board's own mutation methods call this
    /// after every commit; a caller replicating remote record changes into the
    /// graph uses it directly.
    pub fn invalidate<'i>(&mut self, node_ids: impl IntoIterator<Item = &'i str>) {
        self.cache.invalidate(&self.graph, node_ids);
    }

    // --- reads -----------------------------------------------------------

    /// The derived electrical state of one node, recomputed lazily if stale.
    pub fn derived_state(&mut self, node_id: &str) -> Option<&DerivedState> {
        self.cache.get(&self.graph, node_id)
    }

    /// Whether a wire currently carries power.
    pub fn edge_powered(&mut self, edge_id: &str) -> bool {
        self.cache.edge_powered(&self.graph, edge_id)
    }

    /// The decimal read-out of a display node.
    pub fn display_value(&mut self, node_id: &str) -> Option<u32> {
        self.derived_state(node_id).and_then(|state| state.value)
    }

    /// A fully refreshed evaluation of the whole board.
    pub fn evaluation(&mut self) -> &crate::engine::Evaluation {
        self.cache.refreshed(&self.graph)
    }

    // --- helpers ---------------------------------------------------------

    fn expect_node(
        &self,
        node_id: &str,
        node_type: NodeType,
        operation: &'static str,
    ) -> Result<&NodeDefinition, CircuitError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or_else(|| CircuitError::NodeNotFound {
                node_id: node_id.to_string(),
            })?;
        if node.node_type != node_type {
            return Err(CircuitError::UnsupportedOperation {
                node_id: node_id.to_string(),
                node_type: node.node_type,
                operation,
            });
        }
        Ok(node)
    }

    fn pinned_node(
        &self,
        node_id: &str,
        operation: &'static str,
    ) -> Result<&NodeDefinition, CircuitError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or_else(|| CircuitError::NodeNotFound {
                node_id: node_id.to_string(),
            })?;
        match node.node_type {
            NodeType::Battery | NodeType::DecimalDisplay => Ok(node),
            node_type => Err(CircuitError::UnsupportedOperation {
                node_id: node_id.to_string(),
                node_type,
                operation,
            }),
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{}{}", prefix, self.next_id);
            self.next_id += 1;
            if self.graph.node(&id).is_none() && self.graph.edge(&id).is_none() {
                return id;
            }
        }
    }
}
