//! Wire and on-disk shapes for the version store (C11).

use chrono::{DateTime, Utc};
use flowctl_model::workflow::Workflow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionTrigger {
    Manual,
    PreDiff,
    PreRestore,
}

/// A full snapshot, as persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub trigger: VersionTrigger,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub workflow: Workflow,
}

/// A lightweight listing entry, without the full workflow body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub trigger: VersionTrigger,
    pub metadata: Map<String, Value>,
}

impl From<&VersionRecord> for VersionSummary {
    fn from(r: &VersionRecord) -> Self {
        Self {
            version: r.version,
            created_at: r.created_at,
            trigger: r.trigger,
            metadata: r.metadata.clone(),
        }
    }
}

/// Structural delta between two snapshots (spec §4.11 "compare").
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub added_nodes: Vec<String>,
    pub removed_nodes: Vec<String>,
    pub modified_nodes: Vec<String>,
    pub connection_changes: usize,
    pub setting_changes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub count: usize,
    pub oldest_version: Option<u32>,
    pub newest_version: Option<u32>,
    pub total_bytes: u64,
}

/// Result of the restore protocol (spec §4.11 "restore", invariant V2).
/// The pre-restore backup is always included, win or lose, so a caller
/// can never silently lose it.
#[derive(Debug, Clone)]
pub enum RestoreOutcome {
    Ready { backup: VersionRecord, workflow: Workflow },
    ValidationFailed { backup: VersionRecord, issues: Vec<String> },
}
