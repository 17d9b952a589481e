//! Types shared by the static registry and its analysis operations.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    Added,
    Removed,
    Renamed,
    TypeChanged,
    DefaultChanged,
    SemanticChanged,
}

/// A single recorded breaking (or non-breaking, informational) change to
/// a node type between two adjacent tracked versions.
#[derive(Debug, Clone, Serialize)]
pub struct BreakingChange {
    pub node_type: &'static str,
    pub from_version: f64,
    pub to_version: f64,
    pub property_name: &'static str,
    pub change_type: ChangeType,
    pub is_breaking: bool,
    pub severity: Severity,
    pub auto_migratable: bool,
    pub migration_hint: &'static str,
}
