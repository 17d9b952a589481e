use crate::io::{read_workflow, write_workflow};
use crate::output::emit;
use flowctl_autofix::{AutoFixOptions, AutoFixResult, FixType};
use flowctl_catalog::Catalog;
use flowctl_core::error::{ExitCode, FlowError};
use flowctl_core::types::{Confidence, OutputFormat};
use flowctl_model::parser::ParseOptions;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn handle_autofix(
    file: &Path,
    confidence: Confidence,
    max_fixes: Option<usize>,
    fix_types: Option<Vec<String>>,
    upgrade_versions: bool,
    apply: bool,
    parse_options: ParseOptions,
    format: OutputFormat,
) -> Result<i32, FlowError> {
    let (_raw, workflow) = read_workflow(file, parse_options)?;
    let catalog = Catalog::open()?;

    let options = AutoFixOptions {
        confidence_threshold: confidence,
        max_fixes,
        fix_types: fix_types.map(|names| names.iter().filter_map(|n| parse_fix_type(n)).collect()),
        upgrade_versions,
    };

    let result = flowctl_autofix::run(&workflow, &catalog, &options);

    if apply {
        if let Some(fixed) = &result.workflow {
            write_workflow(file, fixed)?;
        }
    }

    emit(format, &result, render_text);

    Ok(ExitCode::Success.code())
}

fn parse_fix_type(name: &str) -> Option<FixType> {
    match name {
        "expression-format" => Some(FixType::ExpressionFormat),
        "switch-options" => Some(FixType::SwitchOptions),
        "webhook-missing-path" => Some(FixType::WebhookMissingPath),
        "node-type-correction" => Some(FixType::NodeTypeCorrection),
        "typeversion-correction" => Some(FixType::TypeversionCorrection),
        "error-output-config" => Some(FixType::ErrorOutputConfig),
        "typeversion-upgrade" => Some(FixType::TypeversionUpgrade),
        "version-migration" => Some(FixType::VersionMigration),
        _ => None,
    }
}

fn render_text(result: &AutoFixResult) {
    println!("{}", result.summary);
    for fix in &result.applied {
        println!("  applied  [{}] {} -- {}", fix.fix_type, fix.node_name, fix.description);
    }
    for fix in &result.skipped {
        println!("  skipped  [{}] {} -- {}", fix.fix_type, fix.node_name, fix.description);
    }
    for guidance in &result.post_update_guidance {
        println!(
            "  guidance {} ({}): {} required action(s), ~{}",
            guidance.node_name, guidance.migration_status, guidance.required_actions.len(), guidance.estimated_time
        );
    }
}
