//! Auto-Fix Engine (C8): generates and conditionally applies fixes for
//! eight fix types, in a fixed priority order, with confidence and count
//! filtering and post-upgrade migration guidance.

mod engine;
mod generators;
mod model;

pub use model::{
    AutoFixOptions, AutoFixResult, AutoFixStats, CandidateFix, FixRecord, FixTarget, FixType, PostUpdateGuidance,
};

use flowctl_catalog::Catalog;
use flowctl_model::workflow::Workflow;

pub fn run(workflow: &Workflow, catalog: &Catalog, options: &AutoFixOptions) -> AutoFixResult {
    engine::run(workflow, catalog, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_core::types::Confidence;
    use flowctl_model::workflow::{Node, Position, TypeVersion};
    use serde_json::{json, Value};

    fn node(name: &str, node_type: &str, parameters: Value) -> Node {
        Node {
            id: name.to_string(),
            name: name.to_string(),
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
    fn expression_format_fix_prefixes_equals() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.httpRequest", json!({"url": "{{ $json.url }}"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let result = run(&workflow, &catalog, &AutoFixOptions::default());
        assert!(result.applied.iter().any(|f| f.fix_type == "expression-format"));
        let fixed = result.workflow.unwrap();
        let url = fixed.node_by_name("A").unwrap().parameters.get("url").unwrap();
        assert_eq!(url.as_str().unwrap(), "={{ $json.url }}");
    }

    #[test]
    fn webhook_missing_path_is_filled_in() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("My Webhook", "nodes-base.webhook", json!({}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let result = run(&workflow, &catalog, &AutoFixOptions::default());
        let fixed = result.workflow.unwrap();
        let path = fixed.node_by_name("My Webhook").unwrap().parameters.get("path").unwrap();
        assert!(!path.as_str().unwrap().is_empty());
    }

    #[test]
    fn version_migration_is_never_applied() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Agent", "nodes-langchain.agent", json!({}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let mut options = AutoFixOptions::default();
        options.confidence_threshold = Confidence::Low;
        let result = run(&workflow, &catalog, &options);
        assert!(!result.applied.iter().any(|f| f.fix_type == "version-migration"));
    }

    #[test]
    fn max_fixes_caps_applied_count() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![
                node("A", "nodes-base.httpRequest", json!({"url": "{{ $json.a }}"})),
                node("B", "nodes-base.httpRequest", json!({"url": "{{ $json.b }}"})),
            ],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let mut options = AutoFixOptions::default();
        options.max_fixes = Some(1);
        let result = run(&workflow, &catalog, &options);
        assert_eq!(result.applied_count, 1);
    }

    #[test]
    fn fix_types_filter_restricts_generators() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.httpRequest", json!({"url": "{{ $json.a }}"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let mut options = AutoFixOptions::default();
        options.fix_types = Some(vec![FixType::WebhookMissingPath]);
        let result = run(&workflow, &catalog, &options);
        assert_eq!(result.applied_count, 0);
    }
}
