use super::definition::CircuitDefinition;
use crate::error::CircuitError;

/// A trait for custom data models that can be converted into a kairo
/// [`CircuitDefinition`].
///
/// The engine is format-agnostic: it only understands its canonical node and
/// edge records. By implementing this trait on your own record structs you
/// provide the translation layer from whatever shape your persistence layer
/// stores.
///
/// # Example
///
/// ```rust
/// use kairo::circuit::{CircuitDefinition, IntoCircuit, NodeDefinition};
/// use kairo::error::CircuitError;
///
/// struct MyStoredNode { id: String, kind: String }
/// struct MyStoredCircuit { nodes: Vec<MyStoredNode> }
///
/// impl IntoCircuit for MyStoredCircuit {
///     fn into_circuit(self) -> Result<CircuitDefinition, CircuitError> {
///         let mut nodes = Vec::new();
///         for node in self.nodes {
///             let node_type = node.kind.parse().map_err(|_| CircuitError::UnknownNodeType {
///                 node_id: node.id.clone(),
///                 type_name: node.kind.clone(),
///             })?;
///             nodes.push(NodeDefinition::new(node.id, node_type, Default::default()));
///         }
///         Ok(CircuitDefinition { nodes, edges: vec![] })
///     }
/// }
/// ```
pub trait IntoCircuit {
    /// Consumes the object and converts it into a canonical circuit snapshot.
    fn into_circuit(self) -> Result<CircuitDefinition, CircuitError>;
}

impl IntoCircuit for CircuitDefinition {
    fn into_circuit(self) -> Result<CircuitDefinition, CircuitError> {
        Ok(self)
    }
}
