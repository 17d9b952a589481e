//! Version Store (C11): durable local snapshots of a workflow, keyed by
//! an incrementing version number per workflow id, with compare/prune/
//! restore operations.

mod model;
mod store;

pub use model::{CompareResult, RestoreOutcome, StoreStats, VersionRecord, VersionSummary, VersionTrigger};
pub use store::VersionStore;

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_catalog::Catalog;
    use flowctl_core::types::WorkflowId;
    use flowctl_model::workflow::{Node, Position, TypeVersion, Workflow};
    use serde_json::{Map, Value};
    use tempfile::tempdir;

    fn node(name: &str) -> Node {
        Node {
            id: name.to_string(),
            name: name.to_string(),
            node_type: "nodes-base.noOp".to_string(),
            type_version: TypeVersion(1.0),
            position: Position(0.0, 0.0),
            parameters: Value::Object(Default::default()),
            credentials: None,
            disabled: None,
            webhook_id: None,
        }
    }

    fn workflow(names: &[&str]) -> Workflow {
        Workflow {
            name: "t".into(),
            nodes: names.iter().map(|n| node(n)).collect(),
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn backups_number_sequentially() {
        let dir = tempdir().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        let a = store.create_backup(&workflow(&["A"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        let b = store.create_backup(&workflow(&["A", "B"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        assert_eq!(a.version, 1);
        assert_eq!(b.version, 2);
        assert_eq!(store.list_versions().unwrap().len(), 2);
    }

    #[test]
    fn prune_keeps_only_the_newest() {
        let dir = tempdir().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        for i in 0..5 {
            store.create_backup(&workflow(&[&format!("N{i}")]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        }
        let pruned = store.prune(2).unwrap();
        assert_eq!(pruned, 3);
        let remaining: Vec<u32> = store.list_versions().unwrap().iter().map(|v| v.version).collect();
        assert_eq!(remaining, vec![4, 5]);
    }

    #[test]
    fn compare_reports_added_and_removed_nodes() {
        let dir = tempdir().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        store.create_backup(&workflow(&["A", "B"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        store.create_backup(&workflow(&["A", "C"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        let diff = store.compare(1, 2).unwrap();
        assert_eq!(diff.added_nodes, vec!["C".to_string()]);
        assert_eq!(diff.removed_nodes, vec!["B".to_string()]);
    }

    #[test]
    fn delete_version_reports_whether_it_existed() {
        let dir = tempdir().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        store.create_backup(&workflow(&["A"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        assert!(store.delete_version(1).unwrap());
        assert!(!store.delete_version(1).unwrap());
    }

    #[test]
    fn restore_always_snapshots_current_even_when_target_missing() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::open().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        let current = workflow(&["A"]);
        let outcome = store.restore(&current, 99, true, &catalog, 0).unwrap();
        match outcome {
            RestoreOutcome::ValidationFailed { backup, issues } => {
                assert_eq!(backup.trigger, VersionTrigger::PreRestore);
                assert!(!issues.is_empty());
            }
            RestoreOutcome::Ready { .. } => panic!("expected validation failure for a missing target version"),
        }
        assert_eq!(store.list_versions().unwrap().len(), 1);
    }

    #[test]
    fn restore_succeeds_against_a_valid_target() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::open().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        let mut target = workflow(&["Start"]);
        target.nodes[0].node_type = "nodes-base.manualTrigger".into();
        store.create_backup(&target, VersionTrigger::Manual, Map::new(), 0).unwrap();

        let current = workflow(&["A"]);
        let outcome = store.restore(&current, 1, true, &catalog, 0).unwrap();
        match outcome {
            RestoreOutcome::Ready { backup, workflow } => {
                assert_eq!(backup.trigger, VersionTrigger::PreRestore);
                assert_eq!(workflow.nodes[0].name, "Start");
            }
            RestoreOutcome::ValidationFailed { issues, .. } => panic!("unexpected validation failure: {issues:?}"),
        }
        assert_eq!(store.list_versions().unwrap().len(), 2);
    }

    #[test]
    fn stats_reports_count_and_bounds() {
        let dir = tempdir().unwrap();
        let store = VersionStore::open(dir.path(), &WorkflowId::from("wf1")).unwrap();
        store.create_backup(&workflow(&["A"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        store.create_backup(&workflow(&["A", "B"]), VersionTrigger::Manual, Map::new(), 0).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.oldest_version, Some(1));
        assert_eq!(stats.newest_version, Some(2));
        assert!(stats.total_bytes > 0);
    }
}
