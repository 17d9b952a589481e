//! Diff Engine (C10): applies an ordered batch of operations to a
//! workflow, atomically by default, with optional continue-on-error and
//! validate-only modes.

mod executor;
mod operation;

pub use executor::{OpError, PendingActions};
pub use operation::DiffOperation;

use flowctl_catalog::Catalog;
use flowctl_core::types::WorkflowId;
use flowctl_model::workflow::Workflow;
use flowctl_validate::Severity as ValidateSeverity;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub workflow_id: WorkflowId,
    pub operations: Vec<DiffOperation>,
    pub validate_only: bool,
    pub continue_on_error: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub success: bool,
    pub operations_applied: usize,
    pub failed: Vec<OperationFailure>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<Workflow>,
    pub should_activate: bool,
    pub should_deactivate: bool,
}

/// Executes `request.operations` against `workflow`, returning the
/// would-be result. Never mutates `workflow` itself — callers persist
/// `result.workflow` only when they choose to (and never when
/// `validate_only` was set).
pub fn execute(workflow: &Workflow, request: &DiffRequest, catalog: &Catalog) -> DiffResult {
    let mut working = workflow.clone();
    let mut pending = PendingActions::default();
    let mut applied = 0usize;
    let mut failed = Vec::new();

    for (index, op) in request.operations.iter().enumerate() {
        match executor::apply(&mut working, op, &mut pending) {
            Ok(()) => applied += 1,
            Err(e) => {
                failed.push(OperationFailure { index, message: format!("{}: {}", e.code.as_str(), e.message) });
                if !request.continue_on_error {
                    return DiffResult {
                        success: false,
                        operations_applied: applied,
                        failed,
                        warnings: Vec::new(),
                        workflow: None,
                        should_activate: false,
                        should_deactivate: false,
                    };
                }
            }
        }
    }

    let integrity_errors = dangling_connections(&working);
    let atomic_mode = !request.continue_on_error;

    if atomic_mode && !integrity_errors.is_empty() {
        for message in integrity_errors {
            failed.push(OperationFailure { index: request.operations.len(), message });
        }
        return DiffResult {
            success: false,
            operations_applied: applied,
            failed,
            warnings: Vec::new(),
            workflow: None,
            should_activate: false,
            should_deactivate: false,
        };
    }

    let mut warnings: Vec<String> = integrity_errors;
    let report = flowctl_validate::validate(&working, None, catalog, flowctl_core::config::Profile::Runtime);
    warnings.extend(
        report
            .issues
            .iter()
            .filter(|i| i.severity != ValidateSeverity::Error)
            .map(|i| i.message.clone()),
    );

    let success = failed.is_empty();
    let persisted = if request.validate_only || !success { None } else { Some(working) };

    DiffResult {
        success,
        operations_applied: applied,
        failed,
        warnings,
        workflow: persisted,
        should_activate: pending.should_activate,
        should_deactivate: pending.should_deactivate,
    }
}

/// Every connection endpoint must reference an existing node (the diff
/// engine's half of the connection-integrity invariant the structural
/// validator also checks at read time).
fn dangling_connections(workflow: &Workflow) -> Vec<String> {
    let mut issues = Vec::new();
    for (source, group) in workflow.connections.iter() {
        if workflow.node_by_name(source).is_none() {
            issues.push(format!("connections reference unknown source node '{source}'"));
            continue;
        }
        for (_, _, target) in group.all_targets() {
            if workflow.node_by_name(&target.node).is_none() {
                issues.push(format!("connection from '{source}' targets unknown node '{}'", target.node));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_model::workflow::{ConnectionTarget, Node, Position, TypeVersion};
    use serde_json::{json, Value};

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

    fn base_workflow() -> Workflow {
        Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.noOp"), node("B", "nodes-base.noOp")],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        }
    }

    fn request(operations: Vec<DiffOperation>) -> DiffRequest {
        DiffRequest {
            workflow_id: WorkflowId("wf".into()),
            operations,
            validate_only: false,
            continue_on_error: false,
        }
    }

    #[test]
    fn atomic_mode_rolls_back_on_failure() {
        let catalog = Catalog::open().unwrap();
        let workflow = base_workflow();
        let req = request(vec![
            DiffOperation::UpdateName { name: "renamed".into() },
            DiffOperation::RemoveNode { name: "Ghost".into() },
        ]);
        let result = execute(&workflow, &req, &catalog);
        assert!(!result.success);
        assert!(result.workflow.is_none());
        assert_eq!(result.failed.len(), 1);
    }

    #[test]
    fn continue_on_error_applies_partial_and_reports_failures() {
        let catalog = Catalog::open().unwrap();
        let workflow = base_workflow();
        let mut req = request(vec![
            DiffOperation::UpdateName { name: "renamed".into() },
            DiffOperation::RemoveNode { name: "Ghost".into() },
            DiffOperation::AddTag { tag: "prod".into() },
        ]);
        req.continue_on_error = true;
        let result = execute(&workflow, &req, &catalog);
        assert_eq!(result.operations_applied, 2);
        assert_eq!(result.failed.len(), 1);
        let applied = result.workflow.unwrap();
        assert_eq!(applied.name, "renamed");
        assert_eq!(applied.tags, vec!["prod".to_string()]);
    }

    #[test]
    fn validate_only_never_returns_a_persistable_workflow() {
        let catalog = Catalog::open().unwrap();
        let workflow = base_workflow();
        let mut req = request(vec![DiffOperation::UpdateName { name: "renamed".into() }]);
        req.validate_only = true;
        let result = execute(&workflow, &req, &catalog);
        assert!(result.success);
        assert!(result.workflow.is_none());
        assert_eq!(result.operations_applied, 1);
    }

    #[test]
    fn add_node_rejects_name_collision() {
        let catalog = Catalog::open().unwrap();
        let workflow = base_workflow();
        let req = request(vec![DiffOperation::AddNode { node: node("A", "nodes-base.noOp") }]);
        let result = execute(&workflow, &req, &catalog);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("NAME_COLLISION"));
    }

    #[test]
    fn add_and_rewire_connection() {
        let catalog = Catalog::open().unwrap();
        let workflow = base_workflow();
        let req = request(vec![
            DiffOperation::AddConnection {
                source: "A".into(),
                target: "B".into(),
                connection_type: "main".into(),
                source_slot: 0,
                target_index: 0,
            },
            DiffOperation::RewireConnection {
                source: "A".into(),
                old_target: "B".into(),
                new_target: "A".into(),
                connection_type: "main".into(),
                source_slot: 0,
            },
        ]);
        let result = execute(&workflow, &req, &catalog);
        assert!(result.success);
        let applied = result.workflow.unwrap();
        let target = &applied.connections.get("A").unwrap().slots("main").unwrap()[0][0];
        assert_eq!(target.node, "A");
    }

    #[test]
    fn activate_workflow_sets_pending_flag_without_mutating_active() {
        let catalog = Catalog::open().unwrap();
        let workflow = base_workflow();
        let req = request(vec![DiffOperation::ActivateWorkflow]);
        let result = execute(&workflow, &req, &catalog);
        assert!(result.should_activate);
        assert_eq!(result.workflow.unwrap().active, None);
    }

    #[test]
    fn remove_node_cascades_connection_cleanup() {
        let catalog = Catalog::open().unwrap();
        let mut workflow = base_workflow();
        workflow.connections_for_mut("A").slots_mut("main").push(vec![ConnectionTarget {
            node: "B".into(),
            kind: "main".into(),
            index: 0,
        }]);
        let req = request(vec![DiffOperation::RemoveNode { name: "B".into() }]);
        let result = execute(&workflow, &req, &catalog);
        assert!(result.success);
        let applied = result.workflow.unwrap();
        assert!(applied.connections.get("A").is_none_or(|g| g.is_empty()));
        let _ = json!({});
    }
}
