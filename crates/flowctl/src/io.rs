//! Reading workflow documents from disk through the tolerant parser.

use flowctl_core::error::FlowError;
use flowctl_model::workflow::Workflow;
use flowctl_model::parser::{parse_workflow, ParseOptions};
use std::path::Path;

/// Returns the raw text alongside the parsed workflow; callers that need
/// source-located validation issues pass the raw text straight through.
pub fn read_workflow(path: &Path, options: ParseOptions) -> Result<(String, Workflow), FlowError> {
    let raw = std::fs::read_to_string(path)?;
    let workflow = parse_workflow(&raw, options)?;
    Ok((raw, workflow))
}

pub fn write_workflow(path: &Path, workflow: &Workflow) -> Result<(), FlowError> {
    let body = serde_json::to_string_pretty(workflow).map_err(|e| FlowError::Config(e.to_string()))?;
    std::fs::write(path, body)?;
    Ok(())
}
