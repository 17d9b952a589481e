use crate::io::read_workflow;
use crate::output::emit;
use flowctl_catalog::Catalog;
use flowctl_core::config::Profile;
use flowctl_core::error::{ExitCode, FlowError};
use flowctl_core::types::OutputFormat;
use flowctl_model::parser::ParseOptions;
use flowctl_validate::{Severity, ValidationResult};
use std::path::Path;

pub fn handle_validate(
    file: &Path,
    profile: Option<Profile>,
    parse_options: ParseOptions,
    format: OutputFormat,
) -> Result<i32, FlowError> {
    let (raw, workflow) = read_workflow(file, parse_options)?;
    let catalog = Catalog::open()?;
    let result = flowctl_validate::validate(&workflow, Some(&raw), &catalog, profile.unwrap_or_default());

    emit(format, &result, render_text);

    Ok(if result.valid { ExitCode::Success.code() } else { ExitCode::Data.code() })
}

fn render_text(result: &ValidationResult) {
    if result.issues.is_empty() {
        println!("no issues found");
        return;
    }
    for issue in &result.issues {
        let marker = match issue.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
            Severity::Info => "INFO ",
        };
        let where_ = issue.location.path.as_deref().unwrap_or("<workflow>");
        println!("{marker} [{}] {where_}: {}", issue.code, issue.message);
    }
    println!("\n{} error(s), {} warning(s)", result.errors, result.warnings);
}
