//! Structural Validator + Node-Config Validator (C5 + C6): runs both
//! passes over a parsed workflow and returns a stably ordered, profile-
//! filtered list of `ValidationIssue`s.

pub mod issue;
mod node_config;
mod structural;

pub use issue::{Location, Severity, Suggestion, ValidationIssue};

use flowctl_catalog::Catalog;
use flowctl_core::config::Profile;
use flowctl_model::workflow::Workflow;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<ValidationIssue>,
}

/// Runs both validator passes and merges their findings into one stably
/// ordered list: by node index (workflow-scoped issues sort first), then
/// by path, then by code, matching spec §4.5/§4.6's reporting contract.
pub fn validate(workflow: &Workflow, raw_text: Option<&str>, catalog: &Catalog, profile: Profile) -> ValidationResult {
    let mut issues = structural::validate_structure(workflow, raw_text);
    issues.extend(node_config::validate_node_config(workflow, raw_text, catalog, profile));

    issues.sort_by(|a, b| {
        a.location
            .node_index
            .cmp(&b.location.node_index)
            .then_with(|| a.location.path.cmp(&b.location.path))
            .then_with(|| a.code.cmp(b.code))
    });

    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();

    ValidationResult {
        valid: errors == 0,
        errors,
        warnings,
        issues,
    }
}
