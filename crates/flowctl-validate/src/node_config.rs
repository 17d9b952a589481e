//! Node-Config Validator (C6): per-node property checks against the
//! catalog definition, expression-format checks, AI-topology checks, and
//! the security/best-practice hint pass — all filtered by profile.

use crate::issue::{Location, Severity, Suggestion, ValidationIssue};
use flowctl_catalog::{Catalog, DisplayOptions, NodeDefinition, PropertySchema, PropertyType};
use flowctl_core::config::Profile;
use flowctl_core::error::ErrorCode;
use flowctl_model::reverse::ReverseConnectionIndex;
use flowctl_model::workflow::{Node, Workflow};
use flowctl_similarity::Candidate;
use serde_json::Value;

pub fn validate_node_config(
    workflow: &Workflow,
    raw_text: Option<&str>,
    catalog: &Catalog,
    profile: Profile,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let reverse = ReverseConnectionIndex::build(workflow);

    for (idx, node) in workflow.nodes.iter().enumerate() {
        if node.is_disabled() {
            continue;
        }
        let location_base = Location {
            node_name: Some(node.name.clone()),
            node_id: Some(node.id.clone()),
            node_type: Some(node.node_type.clone()),
            node_index: Some(idx),
            path: None,
        };

        let Some(def) = catalog.get(&node.node_type) else {
            issues.push(unknown_node_type_issue(catalog, node, idx, raw_text, &location_base));
            continue;
        };

        check_properties(def, node, idx, raw_text, &location_base, profile, &mut issues);
        check_expressions(node, idx, raw_text, &location_base, &mut issues);

        // Security runs under every profile: minimal still needs to surface
        // ENHANCED_SECURITY through filter_by_profile.
        check_security(def, node, &location_base, &mut issues);
        if profile != Profile::Minimal {
            check_ai_topology(def, node, &reverse, &location_base, &mut issues);
        }
        if profile == Profile::Strict {
            check_strict_only(def, node, idx, &location_base, &mut issues);
        }
    }

    filter_by_profile(issues, profile)
}

fn unknown_node_type_issue(
    catalog: &Catalog,
    node: &Node,
    idx: usize,
    raw_text: Option<&str>,
    location: &Location,
) -> ValidationIssue {
    let candidates: Vec<Candidate<'_>> = catalog
        .all()
        .iter()
        .map(|d| Candidate {
            node_type: d.node_type,
            display_name: d.display_name,
        })
        .collect();
    let ranked = flowctl_similarity::suggest(&node.node_type, &candidates, 3);
    let suggestions = ranked
        .into_iter()
        .filter(|s| s.confidence >= 0.5)
        .map(|s| Suggestion {
            auto_fixable: flowctl_similarity::is_auto_fixable(s.confidence),
            value: s.node_type,
            confidence: s.confidence,
            reason: s.reason,
        })
        .collect();

    ValidationIssue::new(
        ErrorCode::UnknownNodeType,
        Severity::Warning,
        format!("unknown node type '{}'", node.node_type),
        Location {
            path: Some(format!("nodes[{idx}].type")),
            ..location.clone()
        },
    )
    .with_source(raw_text, &format!("nodes[{idx}].type"))
    .with_suggestions(suggestions)
}

/// Whether `prop` is active for the current parameter values, per its
/// `displayOptions.show`/`hide` rules (spec §4.6 step 2). A property with
/// no `displayOptions` is always active.
fn is_property_active(prop: &PropertySchema, parameters: &Value) -> bool {
    let Some(opts) = &prop.display_options else {
        return true;
    };
    matches_conditions(opts, parameters, true) && !matches_conditions(opts, parameters, false)
}

fn matches_conditions(opts: &DisplayOptions, parameters: &Value, show: bool) -> bool {
    let table = if show { &opts.show } else { &opts.hide };
    if table.is_empty() {
        return show;
    }
    table.iter().all(|(key, allowed)| {
        let current = parameters.get(key);
        match current {
            Some(value) => allowed.contains(value),
            None => false,
        }
    })
}

fn check_properties(
    def: &NodeDefinition,
    node: &Node,
    idx: usize,
    raw_text: Option<&str>,
    location: &Location,
    profile: Profile,
    issues: &mut Vec<ValidationIssue>,
) {
    let params = &node.parameters;

    for prop in &def.properties {
        if !is_property_active(prop, params) {
            continue;
        }
        let path = format!("nodes[{idx}].parameters.{}", prop.name);
        let value = params.get(prop.name);

        if def.flags.is_ai_tool && prop.name == "toolDescription" {
            if value.and_then(Value::as_str).unwrap_or("").trim().is_empty() {
                issues.push(
                    ValidationIssue::new(
                        ErrorCode::MissingToolDescription,
                        Severity::Warning,
                        format!("AI tool node '{}' has no tool description", node.name),
                        Location { path: Some(path.clone()), ..location.clone() },
                    )
                    .with_source(raw_text, &path),
                );
                continue;
            }
        }

        match value {
            None => {
                if prop.required {
                    issues.push(
                        ValidationIssue::new(
                            ErrorCode::MissingRequiredProperty,
                            Severity::Error,
                            format!("'{}' is required on node '{}'", prop.name, node.name),
                            Location { path: Some(path.clone()), ..location.clone() },
                        )
                        .with_source(raw_text, &path),
                    );
                }
            }
            Some(v) => {
                if prop.required && is_empty_value(v) {
                    issues.push(
                        ValidationIssue::new(
                            ErrorCode::MissingRequiredProperty,
                            Severity::Error,
                            format!("'{}' is required on node '{}' but empty", prop.name, node.name),
                            Location { path: Some(path.clone()), ..location.clone() },
                        )
                        .with_source(raw_text, &path),
                    );
                } else if let Some(message) = type_mismatch_message(prop, v) {
                    issues.push(
                        ValidationIssue::new(
                            ErrorCode::TypeMismatch,
                            if profile == Profile::Strict { Severity::Error } else { Severity::Warning },
                            message,
                            Location { path: Some(path.clone()), ..location.clone() },
                        )
                        .with_source(raw_text, &path),
                    );
                } else if let Some(message) = invalid_option_message(prop, v) {
                    issues.push(
                        ValidationIssue::new(
                            ErrorCode::InvalidOption,
                            Severity::Error,
                            message,
                            Location { path, ..location.clone() },
                        ),
                    );
                }
            }
        }
    }
}

fn is_empty_value(v: &Value) -> bool {
    matches!(v, Value::Null) || matches!(v, Value::String(s) if s.is_empty())
}

fn type_mismatch_message(prop: &PropertySchema, value: &Value) -> Option<String> {
    let matches = match prop.property_type {
        PropertyType::String | PropertyType::Options | PropertyType::ResourceLocator => {
            value.is_string() || value.is_null()
        }
        PropertyType::Number => value.is_number() || value.is_null(),
        PropertyType::Boolean => value.is_boolean() || value.is_null(),
        PropertyType::MultiOptions => value.is_array() || value.is_null(),
        PropertyType::Collection | PropertyType::FixedCollection | PropertyType::Json => {
            value.is_object() || value.is_array() || value.is_null()
        }
    };
    if matches {
        None
    } else {
        Some(format!(
            "'{}' expected a {:?} value but got {}",
            prop.name,
            prop.property_type,
            describe_json_kind(value)
        ))
    }
}

fn invalid_option_message(prop: &PropertySchema, value: &Value) -> Option<String> {
    let options = prop.options.as_ref()?;
    if options.is_empty() {
        return None;
    }
    match prop.property_type {
        PropertyType::Options => {
            let chosen = value.as_str()?;
            (!options.iter().any(|o| o.value == chosen))
                .then(|| format!("'{}' is not a valid option for '{}'", chosen, prop.name))
        }
        PropertyType::MultiOptions => {
            let chosen = value.as_array()?;
            let invalid: Vec<&str> = chosen
                .iter()
                .filter_map(Value::as_str)
                .filter(|c| !options.iter().any(|o| o.value == *c))
                .collect();
            (!invalid.is_empty())
                .then(|| format!("'{}' on '{}' contains invalid option(s): {}", prop.name, prop.name, invalid.join(", ")))
        }
        _ => None,
    }
}

fn describe_json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Expression-format checks (spec §4.6 step 4): every string parameter is
/// either a plain literal or a `={{ ... }}` expression. `{{` outside that
/// shape is a formatting mistake, not a syntax error, so it's reported as
/// a validation issue rather than a parse failure.
fn check_expressions(
    node: &Node,
    idx: usize,
    raw_text: Option<&str>,
    location: &Location,
    issues: &mut Vec<ValidationIssue>,
) {
    walk_strings(&node.parameters, &format!("nodes[{idx}].parameters"), &mut |path, s| {
        if !s.contains("{{") {
            return;
        }
        if !s.starts_with('=') {
            issues.push(
                ValidationIssue::new(
                    ErrorCode::ExpressionMissingPrefix,
                    Severity::Error,
                    format!("'{path}' contains an expression but is missing the leading '='"),
                    Location { path: Some(path.to_string()), ..location.clone() },
                )
                .with_source(raw_text, path),
            );
            return;
        }
        let body = &s[1..];
        let is_pure_expression = body.trim_start().starts_with("{{") && body.trim_end().ends_with("}}");
        if !is_pure_expression {
            issues.push(
                ValidationIssue::new(
                    ErrorCode::ExpressionMixedLiteral,
                    Severity::Warning,
                    format!("'{path}' mixes literal text with an expression"),
                    Location { path: Some(path.to_string()), ..location.clone() },
                )
                .with_source(raw_text, path),
            );
        }
    });
}

fn walk_strings(value: &Value, path: &str, visit: &mut impl FnMut(&str, &str)) {
    match value {
        Value::String(s) => visit(path, s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk_strings(item, &format!("{path}[{i}]"), visit);
            }
        }
        Value::Object(map) => {
            for (k, v) in map.iter() {
                walk_strings(v, &format!("{path}.{k}"), visit);
            }
        }
        _ => {}
    }
}

/// AI-topology checks (spec §4.6 step 5), run against the reverse
/// connection index built from the whole workflow.
fn check_ai_topology(
    def: &NodeDefinition,
    node: &Node,
    reverse: &ReverseConnectionIndex,
    location: &Location,
    issues: &mut Vec<ValidationIssue>,
) {
    let is_agent = def.node_type.to_lowercase().contains("agent");
    if !is_agent {
        return;
    }

    let model_count = reverse.count_of_type(&node.name, "ai_languageModel");
    let needs_fallback = node.parameters.get("needsFallback").and_then(Value::as_bool).unwrap_or(false);

    if model_count == 0 {
        issues.push(ValidationIssue::new(
            ErrorCode::MissingLanguageModel,
            Severity::Error,
            format!("agent '{}' has no connected language model", node.name),
            location.clone(),
        ));
    }
    if needs_fallback && model_count < 2 {
        issues.push(ValidationIssue::new(
            ErrorCode::FallbackMissingSecondModel,
            Severity::Error,
            format!("agent '{}' enables a fallback model but only one is connected", node.name),
            location.clone(),
        ));
    }
    // Independent of needsFallback: two connected models is a legitimate
    // primary+fallback pair even when the flag is off.
    if model_count > 2 {
        issues.push(ValidationIssue::new(
            ErrorCode::TooManyLanguageModels,
            Severity::Error,
            format!("agent '{}' has {model_count} connected language models, more than the 2 allowed", node.name),
            location.clone(),
        ));
    }

    let prompt_type = node.parameters.get("promptType").and_then(Value::as_str).unwrap_or("auto");
    if prompt_type == "define" {
        let text = node.parameters.get("text").and_then(Value::as_str).unwrap_or("");
        if text.trim().is_empty() {
            issues.push(ValidationIssue::new(
                ErrorCode::MissingPromptText,
                Severity::Error,
                format!("agent '{}' defines its prompt but has no text", node.name),
                location.clone(),
            ));
        }
    }

    let streaming = node.parameters.get("streamResponse").and_then(Value::as_bool).unwrap_or(false);
    if streaming {
        let main_targets: Vec<_> = reverse.incoming_of_type(&node.name, "main").collect();
        if main_targets.len() > 1 {
            issues.push(ValidationIssue::new(
                ErrorCode::StreamingWithMainOutput,
                Severity::Warning,
                format!("agent '{}' streams its response but has multiple main-output consumers", node.name),
                location.clone(),
            ));
        }
    }

    let has_output_parser_flag = node.parameters.get("hasOutputParser").and_then(Value::as_bool).unwrap_or(false);
    if has_output_parser_flag && reverse.count_of_type(&node.name, "ai_outputParser") == 0 {
        issues.push(ValidationIssue::new(
            ErrorCode::MissingOutputParser,
            Severity::Error,
            format!("agent '{}' expects an output parser but none is connected", node.name),
            location.clone(),
        ));
    }

    if reverse.count_of_type(&node.name, "ai_memory") > 1 {
        issues.push(ValidationIssue::new(
            ErrorCode::MultipleMemoryConnections,
            Severity::Error,
            format!("agent '{}' has more than one memory connection", node.name),
            location.clone(),
        ));
    }

    if node.parameters.get("systemMessage").and_then(Value::as_str).unwrap_or("").is_empty() {
        issues.push(ValidationIssue::new(
            ErrorCode::MissingSystemMessage,
            Severity::Info,
            format!("agent '{}' has no system message set", node.name),
            location.clone(),
        ));
    }
}

/// Flags raw `eval(`/`exec(` usage in Code nodes (spec §4.6 step 6).
fn check_security(def: &NodeDefinition, node: &Node, location: &Location, issues: &mut Vec<ValidationIssue>) {
    if !def.node_type.to_lowercase().contains("code") {
        return;
    }
    let code = node
        .parameters
        .get("jsCode")
        .or_else(|| node.parameters.get("pythonCode"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if code.contains("eval(") || code.contains("exec(") {
        issues.push(ValidationIssue::new(
            ErrorCode::EnhancedSecurity,
            Severity::Warning,
            format!("code node '{}' uses eval/exec, which can execute arbitrary input", node.name),
            location.clone(),
        ));
    }
}

fn filter_by_profile(issues: Vec<ValidationIssue>, profile: Profile) -> Vec<ValidationIssue> {
    match profile {
        // Minimal keeps required/type/structure errors plus the security
        // warning regardless of its severity (spec §4.6 profile filtering).
        Profile::Minimal => issues
            .into_iter()
            .filter(|i| i.severity == Severity::Error || i.code == ErrorCode::EnhancedSecurity.as_str())
            .collect(),
        Profile::Runtime => issues.into_iter().filter(|i| i.severity != Severity::Info).collect(),
        Profile::AiFriendly | Profile::Strict => issues,
    }
}

/// Strict-only checks (spec §4.6 profile filtering: "like ai-friendly plus
/// warnings on missing optional properties with no default and missing
/// node description").
fn check_strict_only(
    def: &NodeDefinition,
    node: &Node,
    idx: usize,
    location: &Location,
    issues: &mut Vec<ValidationIssue>,
) {
    for prop in &def.properties {
        if prop.required || prop.default.is_some() || !is_property_active(prop, &node.parameters) {
            continue;
        }
        if node.parameters.get(prop.name).is_none() {
            issues.push(ValidationIssue::new(
                ErrorCode::OptionalPropertyNoDefault,
                Severity::Warning,
                format!("'{}' on node '{}' has no value and no default", prop.name, node.name),
                Location { path: Some(format!("nodes[{idx}].parameters.{}", prop.name)), ..location.clone() },
            ));
        }
    }

    let has_description = node
        .parameters
        .get("notes")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty());
    if !has_description {
        issues.push(ValidationIssue::new(
            ErrorCode::MissingNodeDescription,
            Severity::Warning,
            format!("node '{}' has no description", node.name),
            location.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_model::workflow::{ConnectionTarget, Position, TypeVersion};
    use serde_json::json;

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
    fn unknown_node_type_warns_with_suggestion() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.webhok", json!({}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        let hit = issues.iter().find(|i| i.code == "UNKNOWN_NODE_TYPE").unwrap();
        assert!(!hit.suggestions.is_empty());
    }

    #[test]
    fn missing_required_property_is_an_error() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.httpRequest", json!({"method": "GET"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(issues.iter().any(|i| i.code == "MISSING_REQUIRED_PROPERTY"));
    }

    #[test]
    fn expression_missing_prefix_is_flagged() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node(
                "A",
                "nodes-base.httpRequest",
                json!({"url": "{{ $json.url }}", "method": "GET"}),
            )],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(issues.iter().any(|i| i.code == "EXPRESSION_MISSING_PREFIX"));
    }

    #[test]
    fn agent_without_language_model_is_flagged() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Agent", "nodes-langchain.agent", json!({"promptType": "auto"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(issues.iter().any(|i| i.code == "MISSING_LANGUAGE_MODEL"));
    }

    #[test]
    fn agent_with_one_language_model_passes() {
        let catalog = Catalog::open().unwrap();
        let mut workflow = Workflow {
            name: "t".into(),
            nodes: vec![
                node("Model", "nodes-langchain.lmChatOpenAi", json!({})),
                node("Agent", "nodes-langchain.agent", json!({"promptType": "auto"})),
            ],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        workflow.connections_for_mut("Model").slots_mut("ai_languageModel").push(vec![ConnectionTarget {
            node: "Agent".into(),
            kind: "ai_languageModel".into(),
            index: 0,
        }]);
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(!issues.iter().any(|i| i.code == "MISSING_LANGUAGE_MODEL"));
    }

    #[test]
    fn code_node_eval_use_is_flagged_as_security() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Code", "nodes-base.code", json!({"jsCode": "eval(userInput)"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(issues.iter().any(|i| i.code == "ENHANCED_SECURITY"));
    }

    #[test]
    fn minimal_profile_keeps_enhanced_security() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Code", "nodes-base.code", json!({"jsCode": "eval(userInput)"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Minimal);
        assert!(issues.iter().any(|i| i.code == "ENHANCED_SECURITY"));
    }

    #[test]
    fn minimal_profile_drops_other_warnings() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Tool", "nodes-langchain.toolCode", json!({"toolDescription": ""}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Minimal);
        assert!(!issues.iter().any(|i| i.code == "MISSING_TOOL_DESCRIPTION"));
    }

    #[test]
    fn two_language_models_without_fallback_is_not_too_many() {
        let catalog = Catalog::open().unwrap();
        let mut workflow = Workflow {
            name: "t".into(),
            nodes: vec![
                node("ModelA", "nodes-langchain.lmChatOpenAi", json!({})),
                node("ModelB", "nodes-langchain.lmChatOpenAi", json!({})),
                node("Agent", "nodes-langchain.agent", json!({"promptType": "auto", "needsFallback": false})),
            ],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        for source in ["ModelA", "ModelB"] {
            workflow.connections_for_mut(source).slots_mut("ai_languageModel").push(vec![ConnectionTarget {
                node: "Agent".into(),
                kind: "ai_languageModel".into(),
                index: 0,
            }]);
        }
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(!issues.iter().any(|i| i.code == "TOO_MANY_LANGUAGE_MODELS"));
    }

    #[test]
    fn three_language_models_is_too_many() {
        let catalog = Catalog::open().unwrap();
        let mut workflow = Workflow {
            name: "t".into(),
            nodes: vec![
                node("ModelA", "nodes-langchain.lmChatOpenAi", json!({})),
                node("ModelB", "nodes-langchain.lmChatOpenAi", json!({})),
                node("ModelC", "nodes-langchain.lmChatOpenAi", json!({})),
                node("Agent", "nodes-langchain.agent", json!({"promptType": "auto"})),
            ],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        for source in ["ModelA", "ModelB", "ModelC"] {
            workflow.connections_for_mut(source).slots_mut("ai_languageModel").push(vec![ConnectionTarget {
                node: "Agent".into(),
                kind: "ai_languageModel".into(),
                index: 0,
            }]);
        }
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(issues.iter().any(|i| i.code == "TOO_MANY_LANGUAGE_MODELS"));
    }

    #[test]
    fn multiple_memory_connections_is_an_error() {
        let catalog = Catalog::open().unwrap();
        let mut workflow = Workflow {
            name: "t".into(),
            nodes: vec![
                node("MemA", "nodes-langchain.memoryBufferWindow", json!({})),
                node("MemB", "nodes-langchain.memoryBufferWindow", json!({})),
                node("Agent", "nodes-langchain.agent", json!({"promptType": "auto"})),
            ],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        for source in ["MemA", "MemB"] {
            workflow.connections_for_mut(source).slots_mut("ai_memory").push(vec![ConnectionTarget {
                node: "Agent".into(),
                kind: "ai_memory".into(),
                index: 0,
            }]);
        }
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        let hit = issues.iter().find(|i| i.code == "MULTIPLE_MEMORY_CONNECTIONS").unwrap();
        assert_eq!(hit.severity, Severity::Error);
    }

    #[test]
    fn strict_profile_warns_on_missing_node_description() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.httpRequest", json!({"method": "GET", "url": "https://example.com"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Strict);
        assert!(issues.iter().any(|i| i.code == "MISSING_NODE_DESCRIPTION"));
    }

    #[test]
    fn ai_friendly_profile_skips_strict_only_checks() {
        let catalog = Catalog::open().unwrap();
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("A", "nodes-base.httpRequest", json!({"method": "GET", "url": "https://example.com"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::AiFriendly);
        assert!(!issues.iter().any(|i| i.code == "MISSING_NODE_DESCRIPTION"));
    }

    #[test]
    fn active_property_set_respects_display_options() {
        let catalog = Catalog::open().unwrap();
        // promptType "auto" keeps "text" inactive, so missing text is fine.
        let workflow = Workflow {
            name: "t".into(),
            nodes: vec![node("Agent", "nodes-langchain.agent", json!({"promptType": "auto"}))],
            connections: Default::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        };
        let issues = validate_node_config(&workflow, None, &catalog, Profile::Runtime);
        assert!(!issues.iter().any(|i| i.code == "MISSING_REQUIRED_PROPERTY" && i.location.path.as_deref() == Some("nodes[0].parameters.text")));
    }
}
