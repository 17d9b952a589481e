//! Migration Engine (C9): applies every auto-migratable breaking change
//! the registry tracks for a `(from, to]` typeVersion upgrade, mutating
//! the node in place, and reports what it couldn't handle automatically.

use flowctl_model::workflow::Node;
use flowctl_registry::{analyze_upgrade, BreakingChange, ChangeType};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMigration {
    pub property_name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub from_version: f64,
    pub to_version: f64,
    pub applied_migrations: Vec<AppliedMigration>,
    pub remaining_issues: Vec<BreakingChange>,
}

/// Applies every `autoMigratable` change the registry tracks for
/// `(from, to]` to `node`, then upgrades its `typeVersion`. Non-auto-
/// migratable changes in the same range are returned as
/// `remainingIssues`, never silently dropped.
pub fn migrate_node(node: &mut Node, from: f64, to: f64) -> MigrationResult {
    let analysis = analyze_upgrade(&node.node_type, from, to);
    let mut applied = Vec::new();

    for change in &analysis.changes {
        if !change.auto_migratable {
            continue;
        }
        if change.change_type == ChangeType::Renamed {
            if let Some((old_path, new_path)) = parse_rename_hint(change.migration_hint) {
                if let Some(value) = remove_path(&mut node.parameters, &old_path) {
                    insert_path(&mut node.parameters, &new_path, value);
                }
            }
        }
        applied.push(AppliedMigration {
            property_name: change.property_name,
            description: change.migration_hint,
        });
    }

    node.type_version = flowctl_model::workflow::TypeVersion(to);

    let remaining_issues = analysis
        .changes
        .into_iter()
        .filter(|c| !c.auto_migratable)
        .collect();

    MigrationResult {
        from_version: from,
        to_version: to,
        applied_migrations: applied,
        remaining_issues,
    }
}

/// Migration hints for renames are written as `` `old` ... `new` ``.
/// Takes the first and last backtick-delimited token as old/new paths.
fn parse_rename_hint(hint: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = hint.split('`').collect();
    if tokens.len() < 4 {
        return None;
    }
    let old = tokens[1].to_string();
    let new = tokens[tokens.len() - 2].to_string();
    (old != new).then_some((old, new))
}

fn remove_path(parameters: &mut Value, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut cursor = parameters;
    for segment in &segments[..segments.len() - 1] {
        cursor = cursor.get_mut(*segment)?;
    }
    cursor.as_object_mut()?.remove(*segments.last()?)
}

fn insert_path(parameters: &mut Value, path: &str, value: Value) {
    if !parameters.is_object() {
        *parameters = Value::Object(Default::default());
    }
    let segments: Vec<&str> = path.split('.').collect();
    let mut cursor = parameters;
    for segment in &segments[..segments.len() - 1] {
        if !cursor.is_object() {
            *cursor = Value::Object(Default::default());
        }
        cursor = cursor
            .as_object_mut()
            .unwrap()
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
    }
    if let Some(map) = cursor.as_object_mut() {
        map.insert(segments.last().unwrap().to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_model::workflow::{Position, TypeVersion};
    use serde_json::json;

    fn node(node_type: &str, parameters: Value) -> Node {
        Node {
            id: "1".into(),
            name: "N".into(),
            node_type: node_type.to_string(),
            type_version: TypeVersion(1.0),
            position: Position(0.0, 0.0),
            parameters,
            credentials: None,
            disabled: None,
            webhook_id: None,
        }
    }

    #[test]
    fn renames_property_and_bumps_type_version() {
        let mut n = node("nodes-base.function", json!({"functionCode": "return items;"}));
        let result = migrate_node(&mut n, 1.0, 2.0);
        assert_eq!(n.type_version.0, 2.0);
        assert!(n.parameters.get("functionCode").is_none());
        assert_eq!(n.parameters.get("jsCode").unwrap().as_str().unwrap(), "return items;");
        assert_eq!(result.applied_migrations.len(), 1);
        assert!(result.remaining_issues.is_empty());
    }

    #[test]
    fn renames_nested_property() {
        let mut n = node(
            "nodes-base.switch",
            json!({"rules": {"conditions": [{"op": "eq"}]}}),
        );
        migrate_node(&mut n, 2.0, 3.0);
        assert!(n.parameters.pointer("/rules/conditions").is_none());
        assert!(n.parameters.pointer("/rules/values").is_some());
    }

    #[test]
    fn non_auto_migratable_changes_survive_as_remaining_issues() {
        let mut n = node("nodes-base.set", json!({"values": {}}));
        let result = migrate_node(&mut n, 2.0, 3.0);
        assert_eq!(n.type_version.0, 3.0);
        assert_eq!(result.applied_migrations.len(), 0);
        assert_eq!(result.remaining_issues.len(), 1);
        assert_eq!(result.remaining_issues[0].property_name, "values");
    }

    #[test]
    fn analyze_then_migrate_residual_matches_non_auto_migratable_set() {
        let mut n = node("nodes-langchain.agent", json!({}));
        let before = analyze_upgrade("nodes-langchain.agent", 1.0, 1.2);
        let result = migrate_node(&mut n, 1.0, 1.2);
        let expected_manual: Vec<_> = before.changes.iter().filter(|c| !c.auto_migratable).collect();
        assert_eq!(result.remaining_issues.len(), expected_manual.len());
    }
}
