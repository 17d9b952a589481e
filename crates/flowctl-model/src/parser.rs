//! Top-level workflow parse pipeline (spec §4.3): strict JSON, then an
//! optional heuristic-repair pass, then an optional JS-object-literal
//! fallback. Every successful path normalizes node types before return.

use crate::jsobject;
use crate::normalize::normalize_node_types;
use crate::repair::repair_json;
use crate::workflow::Workflow;
use flowctl_core::error::{ErrorCode, FlowError};

/// Parse options, one flag per stage beyond the strict baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub accept_repaired: bool,
    pub accept_js_object: bool,
}

/// Parses raw workflow JSON text per the three-stage pipeline, normalizing
/// node types on any successful outcome.
pub fn parse_workflow(raw: &str, options: ParseOptions) -> Result<Workflow, FlowError> {
    let strict_err = match serde_json::from_str::<Workflow>(raw) {
        Ok(mut workflow) => {
            normalize_node_types(&mut workflow);
            return Ok(workflow);
        }
        Err(err) => err,
    };

    if options.accept_repaired {
        let repaired = repair_json(raw);
        match serde_json::from_str::<Workflow>(&repaired) {
            Ok(mut workflow) => {
                normalize_node_types(&mut workflow);
                return Ok(workflow);
            }
            Err(repair_err) => {
                if !options.accept_js_object {
                    return Err(parse_failure(ErrorCode::RepairFailed, &repair_err.to_string()));
                }
            }
        }
    }

    if options.accept_js_object {
        let value = jsobject::parse_js_object(raw)
            .map_err(|err| parse_failure(ErrorCode::RepairFailed, &err.to_string()))?;
        let mut workflow: Workflow = serde_json::from_value(value)
            .map_err(|err| parse_failure(ErrorCode::RepairFailed, &err.to_string()))?;
        normalize_node_types(&mut workflow);
        return Ok(workflow);
    }

    Err(FlowError::Parse {
        message: strict_err.to_string(),
        line: Some(strict_err.line() as u32),
        col: Some(strict_err.column() as u32),
    })
}

fn parse_failure(code: ErrorCode, message: &str) -> FlowError {
    FlowError::Parse {
        message: format!("{code}: {message}"),
        line: None,
        col: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_json_and_normalizes_types() {
        let raw = r#"{
            "name": "demo",
            "nodes": [{
                "id": "1", "name": "Start",
                "type": "n8n-nodes-base.manualTrigger",
                "typeVersion": 1,
                "position": [0, 0],
                "parameters": {}
            }],
            "connections": {}
        }"#;
        let workflow = parse_workflow(raw, ParseOptions::default()).unwrap();
        assert_eq!(workflow.nodes[0].node_type, "nodes-base.manualTrigger");
    }

    #[test]
    fn reports_line_and_column_on_strict_failure() {
        let raw = "{ not json";
        let err = parse_workflow(raw, ParseOptions::default()).unwrap_err();
        match err {
            FlowError::Parse { line, .. } => assert_eq!(line, Some(1)),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn repairs_bare_keys_when_requested() {
        let raw = r#"{
            name: "demo",
            nodes: [{
                id: "1", name: "Start",
                type: "nodes-base.manualTrigger",
                typeVersion: 1,
                position: [0, 0],
                parameters: {},
            }],
            connections: {},
        }"#;
        let options = ParseOptions {
            accept_repaired: true,
            accept_js_object: false,
        };
        let workflow = parse_workflow(raw, options).unwrap();
        assert_eq!(workflow.name, "demo");
    }

    #[test]
    fn falls_back_to_js_object_literal_when_requested() {
        let raw = r#"{
            name: 'demo',
            nodes: [],
            connections: {},
        }"#;
        let options = ParseOptions {
            accept_repaired: false,
            accept_js_object: true,
        };
        let workflow = parse_workflow(raw, options).unwrap();
        assert_eq!(workflow.name, "demo");
    }

    #[test]
    fn rejects_unparsable_input_without_fallback_options() {
        let raw = "not json at all";
        let err = parse_workflow(raw, ParseOptions::default());
        assert!(err.is_err());
    }
}
