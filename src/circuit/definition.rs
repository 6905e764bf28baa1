use crate::error::CircuitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default pin count for `Battery` and `DecimalDisplay` nodes when the record
/// carries no explicit `pins` value.
pub const DEFAULT_PINS: u32 = 3;

/// The single output handle of switches and gates.
pub const OUTPUT_HANDLE: &str = "out";

/// Returns the handle id for pin `index`.
///
/// Pin 0 is `"a"`, pin 1 is `"b"`, and every further pin is `"p{index}"`. Gates
/// use pins 0 and 1 as their input handles, so a two-input gate reads from `a`
/// and `b` while a five-pin battery drives `a`, `b`, `p2`, `p3` and `p4`.
pub fn pin_id(index: u32) -> String {
    match index {
        0 => "a".to_string(),
        1 => "b".to_string(),
        i => format!("p{}", i),
    }
}

/// The closed set of circuit component types.
///
/// Serialized names match the record layer's type strings (`"BatteryNode"`,
/// `"AndNode"`, ...), so persisted node records deserialize directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "BatteryNode")]
    Battery,
    #[serde(rename = "SwitchNode")]
    Switch,
    #[serde(rename = "LedNode")]
    Led,
    #[serde(rename = "NotNode")]
    Not,
    #[serde(rename = "AndNode")]
    And,
    #[serde(rename = "OrNode")]
    Or,
    #[serde(rename = "XorNode")]
    Xor,
    #[serde(rename = "DecimalDisplayNode")]
    DecimalDisplay,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Battery => "BatteryNode",
            NodeType::Switch => "SwitchNode",
            NodeType::Led => "LedNode",
            NodeType::Not => "NotNode",
            NodeType::And => "AndNode",
            NodeType::Or => "OrNode",
            NodeType::Xor => "XorNode",
            NodeType::DecimalDisplay => "DecimalDisplayNode",
        }
    }

    /// Sources have no inputs and a fixed output (batteries, switches).
    pub fn is_source(&self) -> bool {
        matches!(self, NodeType::Battery | NodeType::Switch)
    }

    /// Gates derive their output from their inputs.
    pub fn is_gate(&self) -> bool {
        matches!(
            self,
            NodeType::Not | NodeType::And | NodeType::Or | NodeType::Xor
        )
    }

    /// Sinks consume signals and drive nothing (LEDs, displays).
    pub fn is_sink(&self) -> bool {
        matches!(self, NodeType::Led | NodeType::DecimalDisplay)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BatteryNode" => Ok(NodeType::Battery),
            "SwitchNode" => Ok(NodeType::Switch),
            "LedNode" => Ok(NodeType::Led),
            "NotNode" => Ok(NodeType::Not),
            "AndNode" => Ok(NodeType::And),
            "OrNode" => Ok(NodeType::Or),
            "XorNode" => Ok(NodeType::Xor),
            "DecimalDisplayNode" => Ok(NodeType::DecimalDisplay),
            _ => Err(()),
        }
    }
}

/// Type-specific static configuration carried by a node record.
///
/// Only two fields exist across all types: `pins` (Battery, DecimalDisplay) and
/// `power` (Switch, the sole node-local mutable source value). Both are
/// optional in the record; accessors apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u8>,
}

impl NodeData {
    pub fn with_pins(pins: u32) -> Self {
        Self {
            pins: Some(pins),
            power: None,
        }
    }

    pub fn with_power(power: u8) -> Self {
        Self {
            pins: None,
            power: Some(power),
        }
    }

    /// Effective pin count, defaulting to [`DEFAULT_PINS`]. Never below 1.
    pub fn pins(&self) -> u32 {
        self.pins.unwrap_or(DEFAULT_PINS).max(1)
    }

    /// Whether a switch is on. Missing `power` reads as off.
    pub fn is_on(&self) -> bool {
        self.power.unwrap_or(0) > 0
    }
}

/// Defines a single typed component in the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub data: NodeData,
}

impl NodeDefinition {
    pub fn new(id: impl Into<String>, node_type: NodeType, data: NodeData) -> Self {
        Self {
            id: id.into(),
            node_type,
            data,
        }
    }
}

/// Defines a directed wire from one output handle to one input handle.
///
/// Handles may be absent in records coming from the visual editor (it omits the
/// handle for nodes with a single connector on that side); resolution falls
/// back to the endpoint's sole declared handle in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDefinition {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl EdgeDefinition {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        source_handle: impl Into<String>,
        target: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: Some(source_handle.into()),
            target_handle: Some(target_handle.into()),
        }
    }
}

/// The complete, canonical definition of a circuit: a snapshot of the node and
/// edge records owned by the external persistence/editor collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitDefinition {
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
    #[serde(default)]
    pub edges: Vec<EdgeDefinition>,
}

impl CircuitDefinition {
    /// Parses a circuit from the record layer's JSON shape.
    ///
    /// Unlike a plain serde deserialization, a node record with an undeclared
    /// type string fails with [`CircuitError::UnknownNodeType`] naming the
    /// offending node: a corrupted record is a hard error, never skipped.
    pub fn from_json(json: &str) -> Result<Self, CircuitError> {
        #[derive(Deserialize)]
        struct RawNode {
            id: String,
            #[serde(rename = "type")]
            node_type: String,
            #[serde(default)]
            data: NodeData,
        }

        #[derive(Deserialize)]
        struct RawCircuit {
            #[serde(default)]
            nodes: Vec<RawNode>,
            #[serde(default)]
            edges: Vec<EdgeDefinition>,
        }

        let raw: RawCircuit =
            serde_json::from_str(json).map_err(|e| CircuitError::JsonParse(e.to_string()))?;

        let mut nodes = Vec::with_capacity(raw.nodes.len());
        for node in raw.nodes {
            let node_type =
                node.node_type
                    .parse()
                    .map_err(|_| CircuitError::UnknownNodeType {
                        node_id: node.id.clone(),
                        type_name: node.node_type.clone(),
                    })?;
            nodes.push(NodeDefinition {
                id: node.id,
                node_type,
                data: node.data,
            });
        }

        Ok(Self {
            nodes,
            edges: raw.edges,
        })
    }
}
