//! Applies a single `DiffOperation` to a working copy of the workflow.

use crate::operation::{position_from_tuple, DiffOperation};
use flowctl_core::error::ErrorCode;
use flowctl_model::workflow::{ConnectionTarget, ConnectionsMap, Workflow};

#[derive(Debug, Clone)]
pub struct OpError {
    pub code: ErrorCode,
    pub message: String,
}

impl OpError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Side effects that don't mutate the workflow directly — activation
/// requires control-plane coordination (webhook registration etc), so
/// these surface as flags on the result instead (spec §4.10).
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingActions {
    pub should_activate: bool,
    pub should_deactivate: bool,
}

pub fn apply(workflow: &mut Workflow, op: &DiffOperation, pending: &mut PendingActions) -> Result<(), OpError> {
    match op {
        DiffOperation::AddNode { node } => {
            if workflow.node_by_name(&node.name).is_some() {
                return Err(OpError::new(ErrorCode::NameCollision, format!("node '{}' already exists", node.name)));
            }
            workflow.nodes.push(node.clone());
        }
        DiffOperation::RemoveNode { name } => {
            require_node(workflow, name)?;
            workflow.nodes.retain(|n| &n.name != name);
            workflow.remove_connections_for(name);
            remove_connections_targeting(workflow, name);
        }
        DiffOperation::UpdateNode { name, parameters, type_version } => {
            let node = require_node_mut(workflow, name)?;
            if let Some(params) = parameters {
                node.parameters = params.clone();
            }
            if let Some(version) = type_version {
                node.type_version = flowctl_model::workflow::TypeVersion(*version);
            }
        }
        DiffOperation::MoveNode { name, position } => {
            require_node_mut(workflow, name)?.position = position_from_tuple(*position);
        }
        DiffOperation::EnableNode { name } => {
            require_node_mut(workflow, name)?.disabled = Some(false);
        }
        DiffOperation::DisableNode { name } => {
            require_node_mut(workflow, name)?.disabled = Some(true);
        }
        DiffOperation::AddConnection { source, target, connection_type, source_slot, target_index } => {
            require_node(workflow, source)?;
            require_node(workflow, target)
                .map_err(|_| OpError::new(ErrorCode::ConnectionTargetMissing, format!("target node '{target}' does not exist")))?;
            let slots = workflow.connections_for_mut(source).slots_mut(connection_type);
            while slots.len() <= *source_slot as usize {
                slots.push(Vec::new());
            }
            slots[*source_slot as usize].push(ConnectionTarget {
                node: target.clone(),
                kind: connection_type.clone(),
                index: *target_index,
            });
        }
        DiffOperation::RemoveConnection { source, target, connection_type, source_slot } => {
            if let Some(slots) = workflow.connections_for_mut(source).slots_mut(connection_type).get_mut(*source_slot as usize) {
                slots.retain(|t| &t.node != target);
            }
        }
        DiffOperation::RewireConnection { source, old_target, new_target, connection_type, source_slot } => {
            require_node(workflow, new_target)
                .map_err(|_| OpError::new(ErrorCode::ConnectionTargetMissing, format!("target node '{new_target}' does not exist")))?;
            let slots = workflow.connections_for_mut(source).slots_mut(connection_type);
            let Some(slot) = slots.get_mut(*source_slot as usize) else {
                return Err(OpError::new(ErrorCode::ConnectionTargetMissing, format!("no connection slot {source_slot} on '{source}'")));
            };
            let Some(entry) = slot.iter_mut().find(|t| &t.node == old_target) else {
                return Err(OpError::new(
                    ErrorCode::ConnectionTargetMissing,
                    format!("no connection from '{source}' to '{old_target}' to rewire"),
                ));
            };
            entry.node = new_target.clone();
        }
        DiffOperation::CleanStaleConnections => {
            let valid_names: std::collections::HashSet<&str> = workflow.nodes.iter().map(|n| n.name.as_str()).collect();
            workflow.connections.entries.retain(|(source, _)| valid_names.contains(source.as_str()));
            for (_, group) in workflow.connections.entries.iter_mut() {
                for (_, slots) in group.by_type.iter_mut() {
                    for slot in slots.iter_mut() {
                        slot.retain(|t| valid_names.contains(t.node.as_str()));
                    }
                }
            }
        }
        DiffOperation::ReplaceConnections { connections } => {
            let parsed: ConnectionsMap = serde_json::from_value(connections.clone())
                .map_err(|e| OpError::new(ErrorCode::InvalidOperationType, format!("malformed connections payload: {e}")))?;
            workflow.connections = parsed;
        }
        DiffOperation::UpdateSettings { settings } => {
            let Some(obj) = settings.as_object() else {
                return Err(OpError::new(ErrorCode::InvalidOperationType, "settings must be an object"));
            };
            for (k, v) in obj {
                workflow.settings.insert(k.clone(), v.clone());
            }
        }
        DiffOperation::UpdateName { name } => {
            if name.trim().is_empty() {
                return Err(OpError::new(ErrorCode::InvalidOperationType, "workflow name cannot be empty"));
            }
            workflow.name = name.clone();
        }
        DiffOperation::AddTag { tag } => {
            if !workflow.tags.iter().any(|t| t == tag) {
                workflow.tags.push(tag.clone());
            }
        }
        DiffOperation::RemoveTag { tag } => {
            workflow.tags.retain(|t| t != tag);
        }
        DiffOperation::ActivateWorkflow => pending.should_activate = true,
        DiffOperation::DeactivateWorkflow => pending.should_deactivate = true,
    }
    Ok(())
}

fn require_node<'a>(workflow: &'a Workflow, name: &str) -> Result<&'a flowctl_model::workflow::Node, OpError> {
    workflow
        .node_by_name(name)
        .ok_or_else(|| OpError::new(ErrorCode::TargetNodeMissing, format!("node '{name}' does not exist")))
}

fn require_node_mut<'a>(workflow: &'a mut Workflow, name: &str) -> Result<&'a mut flowctl_model::workflow::Node, OpError> {
    workflow
        .node_by_name_mut(name)
        .ok_or_else(|| OpError::new(ErrorCode::TargetNodeMissing, format!("node '{name}' does not exist")))
}

fn remove_connections_targeting(workflow: &mut Workflow, name: &str) {
    for (_, group) in workflow.connections.entries.iter_mut() {
        for (_, slots) in group.by_type.iter_mut() {
            for slot in slots.iter_mut() {
                slot.retain(|t| t.node != name);
            }
        }
    }
}
