use crate::io::{read_workflow, write_workflow};
use crate::output::emit;
use flowctl_core::error::{ExitCode, FlowError};
use flowctl_core::types::OutputFormat;
use flowctl_migrate::{migrate_node, MigrationResult};
use flowctl_model::parser::ParseOptions;
use flowctl_registry::latest_version;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeMigrationReport {
    node_name: String,
    result: MigrationResult,
}

pub fn handle_migrate(
    file: &Path,
    to: Option<f64>,
    node: Option<String>,
    apply: bool,
    parse_options: ParseOptions,
    format: OutputFormat,
) -> Result<i32, FlowError> {
    let (_raw, mut workflow) = read_workflow(file, parse_options)?;

    let mut reports = Vec::new();
    for n in workflow.nodes.iter_mut() {
        if let Some(target_name) = &node {
            if &n.name != target_name {
                continue;
            }
        }
        let from = n.type_version.0;
        let Some(target_to) = to.or_else(|| latest_version(&n.node_type)) else {
            continue;
        };
        if target_to <= from {
            continue;
        }
        let result = migrate_node(n, from, target_to);
        reports.push(NodeMigrationReport {
            node_name: n.name.clone(),
            result,
        });
    }

    if apply {
        write_workflow(file, &workflow)?;
    }

    let has_remaining = reports.iter().any(|r| !r.result.remaining_issues.is_empty());

    emit(format, &reports, render_text);

    Ok(if has_remaining { ExitCode::Data.code() } else { ExitCode::Success.code() })
}

fn render_text(reports: &Vec<NodeMigrationReport>) {
    if reports.is_empty() {
        println!("no nodes needed migration");
        return;
    }
    for report in reports {
        println!(
            "{}: {} -> {} ({} applied, {} remaining)",
            report.node_name,
            report.result.from_version,
            report.result.to_version,
            report.result.applied_migrations.len(),
            report.result.remaining_issues.len()
        );
        for issue in &report.result.remaining_issues {
            println!("  manual: {}: {}", issue.property_name, issue.migration_hint);
        }
    }
}
