//! Auto-Fix Engine types (spec §4.8).

use flowctl_core::types::Confidence;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The 8 fix generators, in the exact order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixType {
    ExpressionFormat,
    SwitchOptions,
    WebhookMissingPath,
    NodeTypeCorrection,
    TypeversionCorrection,
    ErrorOutputConfig,
    TypeversionUpgrade,
    VersionMigration,
}

impl FixType {
    pub fn default_confidence(self) -> Confidence {
        match self {
            Self::ExpressionFormat | Self::SwitchOptions | Self::WebhookMissingPath | Self::NodeTypeCorrection => {
                Confidence::High
            }
            Self::TypeversionCorrection | Self::ErrorOutputConfig | Self::TypeversionUpgrade => Confidence::Medium,
            Self::VersionMigration => Confidence::Low,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpressionFormat => "expression-format",
            Self::SwitchOptions => "switch-options",
            Self::WebhookMissingPath => "webhook-missing-path",
            Self::NodeTypeCorrection => "node-type-correction",
            Self::TypeversionCorrection => "typeversion-correction",
            Self::ErrorOutputConfig => "error-output-config",
            Self::TypeversionUpgrade => "typeversion-upgrade",
            Self::VersionMigration => "version-migration",
        }
    }
}

/// Where a fix's new value lands on the node.
#[derive(Debug, Clone)]
pub enum FixTarget {
    Parameter(String),
    /// Replaces the node's entire `parameters` object with `new_value`,
    /// for fixes that touch more than one leaf (e.g. `switch-options`).
    Parameters,
    NodeType,
    TypeVersion,
}

/// A generated fix, not yet filtered or applied.
#[derive(Debug, Clone)]
pub struct CandidateFix {
    pub fix_type: FixType,
    pub node_name: String,
    pub target: FixTarget,
    pub new_value: Value,
    pub confidence: Confidence,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixRecord {
    pub fix_type: &'static str,
    pub node_name: String,
    pub description: String,
    pub confidence: Confidence,
}

impl From<&CandidateFix> for FixRecord {
    fn from(fix: &CandidateFix) -> Self {
        Self {
            fix_type: fix.fix_type.as_str(),
            node_name: fix.node_name.clone(),
            description: fix.description.clone(),
            confidence: fix.confidence,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFixStats {
    pub by_confidence: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdateGuidance {
    pub node_name: String,
    pub migration_status: &'static str,
    pub confidence: Confidence,
    pub required_actions: Vec<String>,
    pub estimated_time: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFixResult {
    pub workflow: Option<flowctl_model::workflow::Workflow>,
    pub applied: Vec<FixRecord>,
    pub skipped: Vec<FixRecord>,
    pub stats: AutoFixStats,
    pub summary: String,
    pub applied_count: usize,
    pub skipped_count: usize,
    pub post_update_guidance: Vec<PostUpdateGuidance>,
}

/// Options controlling which fixes are applied (spec §4.8).
#[derive(Debug, Clone)]
pub struct AutoFixOptions {
    pub confidence_threshold: Confidence,
    pub max_fixes: Option<usize>,
    pub fix_types: Option<Vec<FixType>>,
    pub upgrade_versions: bool,
}

impl Default for AutoFixOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: Confidence::Medium,
            max_fixes: None,
            fix_types: None,
            upgrade_versions: false,
        }
    }
}
