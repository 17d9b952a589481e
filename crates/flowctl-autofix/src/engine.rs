//! Filters, applies, and reports on the candidate fixes the generators
//! produce (spec §4.8 "Application semantics").

use crate::generators;
use crate::model::{
    AutoFixOptions, AutoFixResult, AutoFixStats, CandidateFix, FixRecord, FixTarget, FixType, PostUpdateGuidance,
};
use flowctl_catalog::Catalog;
use flowctl_model::workflow::{TypeVersion, Workflow};
use flowctl_registry::analyze_upgrade;
use serde_json::Value;

/// Generators run in this fixed order (spec §4.8). `version-migration`
/// runs last and is never eligible for application, regardless of
/// `options` — only ever surfaced as guidance.
pub fn run(workflow: &Workflow, catalog: &Catalog, options: &AutoFixOptions) -> AutoFixResult {
    let mut working = workflow.clone();
    let mut applied: Vec<FixRecord> = Vec::new();
    let mut skipped: Vec<FixRecord> = Vec::new();
    let mut guidance: Vec<PostUpdateGuidance> = Vec::new();

    let stages: Vec<(FixType, Vec<CandidateFix>)> = vec![
        (FixType::ExpressionFormat, generators::expression_format(&working)),
        (FixType::SwitchOptions, generators::switch_options(&working)),
        (FixType::WebhookMissingPath, generators::webhook_missing_path(&working)),
        (FixType::NodeTypeCorrection, generators::node_type_correction(&working, catalog)),
        (FixType::TypeversionCorrection, generators::typeversion_correction(&working, catalog)),
        (FixType::ErrorOutputConfig, generators::error_output_config(&working, catalog)),
        (
            FixType::TypeversionUpgrade,
            generators::typeversion_upgrade(&working, options.upgrade_versions || requests(options, FixType::TypeversionUpgrade)),
        ),
        (FixType::VersionMigration, generators::version_migration(&working)),
    ];

    for (fix_type, candidates) in stages {
        if !type_requested(options, fix_type) {
            continue;
        }
        for candidate in candidates {
            let record = FixRecord::from(&candidate);

            // Invariant: version-migration is guidance-only, never applied.
            let eligible = fix_type != FixType::VersionMigration
                && candidate.confidence.meets(options.confidence_threshold)
                && options.max_fixes.is_none_or(|max| applied.len() < max);

            if eligible {
                let before = working
                    .node_by_name(&candidate.node_name)
                    .map(|n| (n.type_version.0, n.node_type.clone()));
                apply_candidate(&mut working, &candidate);
                if fix_type == FixType::TypeversionUpgrade {
                    if let Some((from, node_type)) = before {
                        guidance.push(build_guidance(&candidate, from, &node_type));
                    }
                }
                applied.push(record);
            } else {
                skipped.push(record);
            }
        }
    }

    let stats = build_stats(&applied);
    let summary = format!(
        "applied {} fix(es), skipped {} candidate(s)",
        applied.len(),
        skipped.len()
    );
    let applied_count = applied.len();
    let skipped_count = skipped.len();

    AutoFixResult {
        workflow: (applied_count > 0).then_some(working),
        applied,
        skipped,
        stats,
        summary,
        applied_count,
        skipped_count,
        post_update_guidance: guidance,
    }
}

fn type_requested(options: &AutoFixOptions, fix_type: FixType) -> bool {
    options.fix_types.as_ref().is_none_or(|types| types.contains(&fix_type))
}

fn requests(options: &AutoFixOptions, fix_type: FixType) -> bool {
    options.fix_types.as_ref().is_some_and(|types| types.contains(&fix_type))
}

fn apply_candidate(workflow: &mut Workflow, fix: &CandidateFix) {
    let Some(node) = workflow.node_by_name_mut(&fix.node_name) else { return };
    match &fix.target {
        FixTarget::Parameter(path) => set_parameter(&mut node.parameters, path, fix.new_value.clone()),
        FixTarget::Parameters => node.parameters = fix.new_value.clone(),
        FixTarget::NodeType => {
            if let Some(s) = fix.new_value.as_str() {
                node.node_type = s.to_string();
            }
        }
        FixTarget::TypeVersion => {
            if let Some(v) = fix.new_value.as_f64() {
                node.type_version = TypeVersion(v);
            }
        }
    }
}

/// Sets a dot-separated path within a parameters object, creating
/// intermediate objects as needed.
fn set_parameter(parameters: &mut Value, path: &str, value: Value) {
    if !parameters.is_object() {
        *parameters = Value::Object(Default::default());
    }
    let mut segments = path.split('.').peekable();
    let mut cursor = parameters;
    while let Some(segment) = segments.next() {
        let Value::Object(map) = cursor else { return };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        cursor = map.entry(segment.to_string()).or_insert_with(|| Value::Object(Default::default()));
    }
}

fn build_guidance(fix: &CandidateFix, from: f64, node_type: &str) -> PostUpdateGuidance {
    let to = fix.new_value.as_f64().unwrap_or(from);
    let analysis = analyze_upgrade(node_type, from, to);

    let required_actions = analysis.recommendations.clone();
    let migration_status = if analysis.manual_required_count > 0 {
        "requires-review"
    } else {
        "complete"
    };
    let estimated_time = if analysis.manual_required_count > 0 { "15-30 minutes" } else { "0 minutes" };

    PostUpdateGuidance {
        node_name: fix.node_name.clone(),
        migration_status,
        confidence: fix.confidence,
        required_actions,
        estimated_time,
    }
}

fn build_stats(applied: &[FixRecord]) -> AutoFixStats {
    let mut stats = AutoFixStats::default();
    for record in applied {
        *stats.by_type.entry(record.fix_type.to_string()).or_insert(0) += 1;
        let confidence_key = match record.confidence {
            flowctl_core::types::Confidence::Low => "low",
            flowctl_core::types::Confidence::Medium => "medium",
            flowctl_core::types::Confidence::High => "high",
        };
        *stats.by_confidence.entry(confidence_key.to_string()).or_insert(0) += 1;
    }
    stats
}
