//! Structural Validator (C5): workflow-shape invariants that don't
//! require resolving a node's definition — W1 (connection integrity),
//! W2 (duplicate names), W3 (trigger presence when active).

use crate::issue::{Location, Severity, ValidationIssue};
use flowctl_core::error::ErrorCode;
use flowctl_model::trigger::is_activatable_trigger;
use flowctl_model::workflow::Workflow;
use std::collections::HashSet;

pub fn validate_structure(workflow: &Workflow, raw_text: Option<&str>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_node_basics(workflow, raw_text, &mut issues);
    check_duplicate_names(workflow, &mut issues);
    check_connection_integrity(workflow, &mut issues);
    check_trigger_presence(workflow, &mut issues);

    issues
}

fn check_node_basics(workflow: &Workflow, raw_text: Option<&str>, issues: &mut Vec<ValidationIssue>) {
    for (idx, node) in workflow.nodes.iter().enumerate() {
        let location = Location {
            node_name: Some(node.name.clone()),
            node_id: Some(node.id.clone()),
            node_type: Some(node.node_type.clone()),
            node_index: Some(idx),
            path: Some(format!("nodes[{idx}].name")),
        };
        if node.name.trim().is_empty() {
            issues.push(
                ValidationIssue::new(
                    ErrorCode::MissingNodeName,
                    Severity::Warning,
                    format!("node at index {idx} has no name"),
                    location.clone(),
                )
                .with_source(raw_text, &format!("nodes[{idx}].name")),
            );
        }
        if node.node_type.trim().is_empty() {
            issues.push(
                ValidationIssue::new(
                    ErrorCode::MissingProperty,
                    Severity::Error,
                    format!("node '{}' has no type", node.name),
                    Location {
                        path: Some(format!("nodes[{idx}].type")),
                        ..location.clone()
                    },
                )
                .with_source(raw_text, &format!("nodes[{idx}].type")),
            );
        }
    }
}

fn check_duplicate_names(workflow: &Workflow, issues: &mut Vec<ValidationIssue>) {
    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, node) in workflow.nodes.iter().enumerate() {
        if node.name.trim().is_empty() {
            continue;
        }
        if !seen.insert(node.name.as_str()) {
            issues.push(ValidationIssue::new(
                ErrorCode::DuplicateNodeName,
                Severity::Error,
                format!("node name '{}' is used more than once", node.name),
                Location {
                    node_name: Some(node.name.clone()),
                    node_id: Some(node.id.clone()),
                    node_type: Some(node.node_type.clone()),
                    node_index: Some(idx),
                    path: Some(format!("nodes[{idx}].name")),
                },
            ));
        }
    }
}

/// W1: every connection endpoint must reference a node that exists.
/// Connections to or from a disabled node are reported too, at warning
/// severity, since they are stale rather than structurally broken.
fn check_connection_integrity(workflow: &Workflow, issues: &mut Vec<ValidationIssue>) {
    for (source_name, group) in workflow.connections.iter() {
        let source_node = workflow.node_by_name(source_name);
        if source_node.is_none() {
            issues.push(ValidationIssue::new(
                ErrorCode::ConnectionDangling,
                Severity::Error,
                format!("connections reference unknown source node '{source_name}'"),
                Location {
                    node_name: Some(source_name.to_string()),
                    path: Some(format!("connections.{source_name}")),
                    ..Default::default()
                },
            ));
            continue;
        }

        for (conn_type, slot_index, target) in group.all_targets() {
            let path = format!("connections.{source_name}.{conn_type}[{slot_index}]");
            let Some(target_node) = workflow.node_by_name(&target.node) else {
                issues.push(ValidationIssue::new(
                    ErrorCode::ConnectionDangling,
                    Severity::Error,
                    format!("connection from '{source_name}' targets unknown node '{}'", target.node),
                    Location {
                        node_name: Some(source_name.to_string()),
                        path: Some(path),
                        ..Default::default()
                    },
                ));
                continue;
            };
            if source_node.unwrap().is_disabled() || target_node.is_disabled() {
                issues.push(ValidationIssue::new(
                    ErrorCode::ConnectionDangling,
                    Severity::Warning,
                    format!("connection between disabled node(s) '{source_name}' -> '{}' is stale", target.node),
                    Location {
                        node_name: Some(source_name.to_string()),
                        path: Some(path),
                        ..Default::default()
                    },
                ));
            }
        }
    }
}

/// W3: an active workflow must have at least one activatable trigger.
fn check_trigger_presence(workflow: &Workflow, issues: &mut Vec<ValidationIssue>) {
    if !workflow.is_active() {
        return;
    }
    let has_trigger = workflow
        .nodes
        .iter()
        .any(|n| !n.is_disabled() && is_activatable_trigger(&n.node_type));
    if !has_trigger {
        issues.push(ValidationIssue::new(
            ErrorCode::NoTriggerWhenActive,
            Severity::Error,
            "workflow is active but has no activatable trigger node".to_string(),
            Location::default(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_model::workflow::{ConnectionTarget, Node, Position, TypeVersion};
    use serde_json::Value;

    fn node(name: &str, node_type: &str) -> Node {
        Node {
            id: name.to_string(),
            name: name.to_string(),
            node_type: node_type.to_string(),
            type_version: TypeVersion(1.0),
            position: Position(0.0, 0.0),
            parameters: Value::Object(Default::default()),
            credentials: None,
            disabled: None,
            webhook_id: None,
        }
    }

    #[test]
    fn flags_duplicate_node_names() {
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.noOp"), node("A", "nodes-base.noOp")],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_structure(&workflow, None);
        assert!(issues.iter().any(|i| i.code == "DUPLICATE_NODE_NAME"));
    }

    #[test]
    fn flags_dangling_connection_target() {
        let mut workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.noOp")],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        workflow.connections_for_mut("A").slots_mut("main").push(vec![ConnectionTarget {
            node: "Ghost".into(),
            kind: "main".into(),
            index: 0,
        }]);
        let issues = validate_structure(&workflow, None);
        assert!(issues.iter().any(|i| i.code == "CONNECTION_DANGLING" && i.severity == Severity::Error));
    }

    #[test]
    fn active_workflow_without_trigger_is_flagged_exactly_once() {
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.noOp")],
            connections: Default::default(),
            settings: Default::default(),
            active: Some(true),
            tags: Vec::new(),
        };
        let issues = validate_structure(&workflow, None);
        let count = issues.iter().filter(|i| i.code == "NO_TRIGGER_WHEN_ACTIVE").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn active_workflow_with_trigger_passes() {
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Start", "nodes-base.manualTrigger")],
            connections: Default::default(),
            settings: Default::default(),
            active: Some(true),
            tags: Vec::new(),
        };
        let issues = validate_structure(&workflow, None);
        assert!(!issues.iter().any(|i| i.code == "NO_TRIGGER_WHEN_ACTIVE"));
    }

    #[test]
    fn empty_workflow_validates_cleanly() {
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        assert!(validate_structure(&workflow, None).is_empty());
    }
}
