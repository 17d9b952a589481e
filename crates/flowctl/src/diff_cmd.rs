use crate::io::{read_workflow, write_workflow};
use crate::output::emit;
use flowctl_catalog::Catalog;
use flowctl_core::error::{ErrorCode, ExitCode, FlowError};
use flowctl_core::types::{OutputFormat, WorkflowId};
use flowctl_diff::{execute, DiffOperation, DiffRequest, DiffResult};
use flowctl_model::parser::ParseOptions;
use std::path::Path;

pub fn handle_diff(
    file: &Path,
    operations_file: &Path,
    validate_only: bool,
    continue_on_error: bool,
    apply: bool,
    parse_options: ParseOptions,
    format: OutputFormat,
) -> Result<i32, FlowError> {
    let (_raw, workflow) = read_workflow(file, parse_options)?;
    let catalog = Catalog::open()?;

    let ops_raw = std::fs::read_to_string(operations_file)?;
    let operations: Vec<DiffOperation> = serde_json::from_str(&ops_raw)
        .map_err(|e| FlowError::Parse { message: format!("{}: {e}", ErrorCode::InvalidOperationType), line: None, col: None })?;

    let request = DiffRequest {
        workflow_id: WorkflowId::from(file.to_string_lossy().to_string()),
        operations,
        validate_only,
        continue_on_error,
    };
    let result = execute(&workflow, &request, &catalog);

    if apply && !validate_only {
        if let Some(applied) = &result.workflow {
            write_workflow(file, applied)?;
        }
    }

    emit(format, &result, render_text);

    Ok(if result.success { ExitCode::Success.code() } else { ExitCode::Data.code() })
}

fn render_text(result: &DiffResult) {
    println!("{} operation(s) applied", result.operations_applied);
    for failure in &result.failed {
        println!("  failed at index {}: {}", failure.index, failure.message);
    }
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }
    if result.should_activate {
        println!("note: workflow requested activation (not applied locally)");
    }
    if result.should_deactivate {
        println!("note: workflow requested deactivation (not applied locally)");
    }
}
