//! The 17 diff operations (spec §4.10), tagged by `type` on the wire.

use flowctl_model::workflow::{Node, Position};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiffOperation {
    AddNode { node: Node },
    RemoveNode { name: String },
    UpdateNode { name: String, parameters: Option<Value>, type_version: Option<f64> },
    MoveNode { name: String, position: (f64, f64) },
    EnableNode { name: String },
    DisableNode { name: String },
    AddConnection { source: String, target: String, connection_type: String, source_slot: u32, target_index: u32 },
    RemoveConnection { source: String, target: String, connection_type: String, source_slot: u32 },
    RewireConnection { source: String, old_target: String, new_target: String, connection_type: String, source_slot: u32 },
    CleanStaleConnections,
    ReplaceConnections { connections: Value },
    UpdateSettings { settings: Value },
    UpdateName { name: String },
    AddTag { tag: String },
    RemoveTag { tag: String },
    ActivateWorkflow,
    DeactivateWorkflow,
}

impl DiffOperation {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddNode { .. } => "addNode",
            Self::RemoveNode { .. } => "removeNode",
            Self::UpdateNode { .. } => "updateNode",
            Self::MoveNode { .. } => "moveNode",
            Self::EnableNode { .. } => "enableNode",
            Self::DisableNode { .. } => "disableNode",
            Self::AddConnection { .. } => "addConnection",
            Self::RemoveConnection { .. } => "removeConnection",
            Self::RewireConnection { .. } => "rewireConnection",
            Self::CleanStaleConnections => "cleanStaleConnections",
            Self::ReplaceConnections { .. } => "replaceConnections",
            Self::UpdateSettings { .. } => "updateSettings",
            Self::UpdateName { .. } => "updateName",
            Self::AddTag { .. } => "addTag",
            Self::RemoveTag { .. } => "removeTag",
            Self::ActivateWorkflow => "activateWorkflow",
            Self::DeactivateWorkflow => "deactivateWorkflow",
        }
    }
}

pub fn position_from_tuple(p: (f64, f64)) -> Position {
    Position(p.0, p.1)
}
