//! The 8 fix generators (spec §4.8), each a pure function from the
//! current workflow state to a list of candidate fixes. Generators never
//! mutate; `engine::apply` does, one candidate at a time, so each later
//! generator sees the previous generators' results.

use crate::model::{CandidateFix, FixTarget, FixType};
use flowctl_catalog::Catalog;
use flowctl_core::types::Confidence;
use flowctl_model::workflow::Workflow;
use flowctl_registry::{analyze_upgrade, latest_version};
use serde_json::{json, Value};

fn walk_expression_fields(value: &Value, path: &str, out: &mut Vec<(String, String)>) {
    match value {
        Value::String(s) if s.contains("{{") && !s.starts_with('=') => {
            out.push((path.to_string(), s.clone()));
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk_expression_fields(item, &format!("{path}.{i}"), out);
            }
        }
        Value::Object(map) => {
            for (k, v) in map.iter() {
                walk_expression_fields(v, &format!("{path}.{k}"), out);
            }
        }
        _ => {}
    }
}

pub fn expression_format(workflow: &Workflow) -> Vec<CandidateFix> {
    let mut fixes = Vec::new();
    for node in &workflow.nodes {
        let mut fields = Vec::new();
        walk_expression_fields(&node.parameters, "", &mut fields);
        for (path, original) in fields {
            fixes.push(CandidateFix {
                fix_type: FixType::ExpressionFormat,
                node_name: node.name.clone(),
                target: FixTarget::Parameter(path.trim_start_matches('.').to_string()),
                new_value: json!(format!("={original}")),
                confidence: FixType::ExpressionFormat.default_confidence(),
                description: format!("prefixed expression with '=' on node '{}'", node.name),
            });
        }
    }
    fixes
}

/// `If`/`Switch` v3+ node: removes an empty `options` block, fills
/// `{caseSensitive,leftValue,typeValidation}` defaults on every
/// rule-condition entry, moves `fallbackOutput` out of `rules` into
/// `options`, and injects `options.version=2` for Switch >= 3.2.
pub fn switch_options(workflow: &Workflow) -> Vec<CandidateFix> {
    workflow
        .nodes
        .iter()
        .filter_map(|n| {
            let lower = n.node_type.to_lowercase();
            let is_switch = lower.contains("switch");
            let is_if = lower.ends_with(".if") || lower == "if";
            if !(is_switch || is_if) || n.type_version.0 < 3.0 || !n.parameters.is_object() {
                return None;
            }

            let mut params = n.parameters.clone();
            fill_rule_condition_defaults(&mut params);
            if is_switch {
                move_fallback_output_to_options(&mut params);
                if n.type_version.0 >= 3.2 {
                    set_switch_options_version(&mut params);
                }
            }
            remove_empty_options(&mut params);

            (params != n.parameters).then(|| CandidateFix {
                fix_type: FixType::SwitchOptions,
                node_name: n.name.clone(),
                target: FixTarget::Parameters,
                new_value: params,
                confidence: FixType::SwitchOptions.default_confidence(),
                description: format!("normalized switch/if options on node '{}'", n.name),
            })
        })
        .collect()
}

/// Recurses into every `conditions` array and fills missing default
/// keys on each rule-condition object it finds (nested once for `If`,
/// twice for `Switch`'s per-rule condition groups).
fn fill_rule_condition_defaults(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(conditions)) = map.get_mut("conditions") {
                for condition in conditions.iter_mut() {
                    if let Value::Object(condition) = condition {
                        condition.entry("caseSensitive".to_string()).or_insert(json!(true));
                        condition.entry("leftValue".to_string()).or_insert(json!(""));
                        condition.entry("typeValidation".to_string()).or_insert(json!("loose"));
                    }
                }
            }
            for v in map.values_mut() {
                fill_rule_condition_defaults(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                fill_rule_condition_defaults(item);
            }
        }
        _ => {}
    }
}

fn move_fallback_output_to_options(params: &mut Value) {
    let Value::Object(map) = params else { return };
    let fallback = match map.get_mut("rules") {
        Some(Value::Object(rules)) => rules.remove("fallbackOutput"),
        _ => None,
    };
    let Some(fallback) = fallback else { return };
    let options = map.entry("options".to_string()).or_insert_with(|| json!({}));
    if let Value::Object(options) = options {
        options.insert("fallbackOutput".to_string(), fallback);
    }
}

fn set_switch_options_version(params: &mut Value) {
    let Value::Object(map) = params else { return };
    let options = map.entry("options".to_string()).or_insert_with(|| json!({}));
    if let Value::Object(options) = options {
        options.insert("version".to_string(), json!(2));
    }
}

fn remove_empty_options(params: &mut Value) {
    let Value::Object(map) = params else { return };
    if matches!(map.get("options"), Some(Value::Object(o)) if o.is_empty()) {
        map.remove("options");
    }
}

pub fn webhook_missing_path(workflow: &Workflow) -> Vec<CandidateFix> {
    workflow
        .nodes
        .iter()
        .filter(|n| n.node_type.to_lowercase().contains("webhook") && !n.node_type.to_lowercase().contains("respond"))
        .filter(|n| {
            n.parameters
                .get("path")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .is_empty()
        })
        .map(|n| {
            let slug: String = n
                .name
                .to_lowercase()
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '-' })
                .collect();
            CandidateFix {
                fix_type: FixType::WebhookMissingPath,
                node_name: n.name.clone(),
                target: FixTarget::Parameter("path".into()),
                new_value: json!(slug),
                confidence: FixType::WebhookMissingPath.default_confidence(),
                description: format!("generated a webhook path for node '{}'", n.name),
            }
        })
        .collect()
}

pub fn node_type_correction(workflow: &Workflow, catalog: &Catalog) -> Vec<CandidateFix> {
    let candidates: Vec<flowctl_similarity::Candidate<'_>> = catalog
        .all()
        .iter()
        .map(|d| flowctl_similarity::Candidate {
            node_type: d.node_type,
            display_name: d.display_name,
        })
        .collect();

    workflow
        .nodes
        .iter()
        .filter(|n| catalog.get(&n.node_type).is_none())
        .filter_map(|n| {
            let top = flowctl_similarity::suggest(&n.node_type, &candidates, 1).into_iter().next()?;
            flowctl_similarity::is_auto_fixable(top.confidence).then(|| CandidateFix {
                fix_type: FixType::NodeTypeCorrection,
                node_name: n.name.clone(),
                target: FixTarget::NodeType,
                new_value: json!(top.node_type),
                confidence: FixType::NodeTypeCorrection.default_confidence(),
                description: format!("corrected node type on '{}' ({})", n.name, top.reason),
            })
        })
        .collect()
}

/// Clamps a node's `typeVersion` down to the catalog definition's max
/// known version when it overshoots it.
pub fn typeversion_correction(workflow: &Workflow, catalog: &Catalog) -> Vec<CandidateFix> {
    workflow
        .nodes
        .iter()
        .filter_map(|n| {
            let max = catalog.get(&n.node_type)?.version;
            if n.type_version.0 <= max {
                return None;
            }
            Some(CandidateFix {
                fix_type: FixType::TypeversionCorrection,
                node_name: n.name.clone(),
                target: FixTarget::TypeVersion,
                new_value: json!(max),
                confidence: FixType::TypeversionCorrection.default_confidence(),
                description: format!("clamped typeVersion on '{}' to the catalog max ({max})", n.name),
            })
        })
        .collect()
}

/// The only `onError` literals n8n accepts; anything else (missing,
/// misspelled, or a stale pre-rename value) is normalized to the safe
/// default `continueRegularOutput`.
const VALID_ON_ERROR_VALUES: &[&str] = &["stopWorkflow", "continueRegularOutput", "continueErrorOutput"];

pub fn error_output_config(workflow: &Workflow, catalog: &Catalog) -> Vec<CandidateFix> {
    workflow
        .nodes
        .iter()
        .filter(|n| catalog.get(&n.node_type).map(|d| !d.credentials.is_empty()).unwrap_or(false))
        .filter_map(|n| {
            let current = n.parameters.get("onError").and_then(Value::as_str);
            if current.is_some_and(|v| VALID_ON_ERROR_VALUES.contains(&v)) {
                return None;
            }
            let description = match current {
                None => format!("set an explicit error-output policy on '{}'", n.name),
                Some(bad) => format!("normalized invalid onError value '{bad}' on '{}'", n.name),
            };
            Some(CandidateFix {
                fix_type: FixType::ErrorOutputConfig,
                node_name: n.name.clone(),
                target: FixTarget::Parameter("onError".into()),
                new_value: json!("continueRegularOutput"),
                confidence: FixType::ErrorOutputConfig.default_confidence(),
                description,
            })
        })
        .collect()
}

pub fn typeversion_upgrade(workflow: &Workflow, upgrade_requested: bool) -> Vec<CandidateFix> {
    if !upgrade_requested {
        return Vec::new();
    }
    workflow
        .nodes
        .iter()
        .filter_map(|n| {
            let latest = latest_version(&n.node_type)?;
            (latest > n.type_version.0).then(|| CandidateFix {
                fix_type: FixType::TypeversionUpgrade,
                node_name: n.name.clone(),
                target: FixTarget::TypeVersion,
                new_value: json!(latest),
                confidence: FixType::TypeversionUpgrade.default_confidence(),
                description: format!("upgraded '{}' from typeVersion {} to {latest}", n.name, n.type_version.0),
            })
        })
        .collect()
}

/// Informational only: never applied (spec invariant — a breaking
/// version-change surfaces as guidance, never as a silent mutation).
pub fn version_migration(workflow: &Workflow) -> Vec<CandidateFix> {
    workflow
        .nodes
        .iter()
        .filter_map(|n| {
            let latest = latest_version(&n.node_type)?;
            let analysis = analyze_upgrade(&n.node_type, n.type_version.0, latest);
            analysis.has_breaking.then(|| CandidateFix {
                fix_type: FixType::VersionMigration,
                node_name: n.name.clone(),
                target: FixTarget::TypeVersion,
                new_value: json!(latest),
                confidence: FixType::VersionMigration.default_confidence(),
                description: format!(
                    "'{}' has {} breaking change(s) between {} and {latest}; review before upgrading",
                    n.name,
                    analysis.changes.len(),
                    n.type_version.0
                ),
            })
        })
        .collect()
}
