//! `ValidationIssue` and its nested shapes (spec §3).

use flowctl_core::error::ErrorCode;
use flowctl_locator::{SourceLocation, SourceSnippet};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Where in the workflow the issue was found. All fields optional since
/// some checks (e.g. trigger presence) are workflow-scoped, not node-scoped.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub value: String,
    pub confidence: f64,
    pub reason: String,
    pub auto_fixable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_snippet: Option<SourceSnippet>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub context: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl ValidationIssue {
    pub fn new(code: ErrorCode, severity: Severity, message: impl Into<String>, location: Location) -> Self {
        Self {
            code: code.as_str(),
            severity,
            message: message.into(),
            location,
            source_location: None,
            source_snippet: None,
            context: Value::Null,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Attaches source position info, resolved from the original raw text
    /// when available (spec §4.1/§4.4 "degrades gracefully" contract).
    pub fn with_source(mut self, raw_text: Option<&str>, path: &str) -> Self {
        if let Some(text) = raw_text {
            if let Some((location, snippet)) = flowctl_locator::locate(text, path) {
                self.source_location = Some(location);
                self.source_snippet = Some(snippet);
            }
        }
        self
    }
}
