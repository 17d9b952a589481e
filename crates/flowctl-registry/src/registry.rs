//! `LatestVersion`, `TrackedVersions`, and `AnalyzeUpgrade` (spec §4.2).

use crate::data::BREAKING_CHANGES;
use crate::model::{BreakingChange, Severity};
use serde::Serialize;

/// Result of analyzing an upgrade path for one node type (spec §4.2).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeAnalysis {
    pub changes: Vec<BreakingChange>,
    pub has_breaking: bool,
    pub overall_severity: Option<Severity>,
    pub auto_migratable_count: usize,
    pub manual_required_count: usize,
    pub recommendations: Vec<String>,
}

/// The highest `toVersion` recorded for `node_type`, or `None` if the
/// registry tracks no changes for it (untracked types have no known
/// breaking history, not necessarily version 1.0).
pub fn latest_version(node_type: &str) -> Option<f64> {
    BREAKING_CHANGES
        .iter()
        .filter(|c| c.node_type == node_type)
        .map(|c| c.to_version)
        .fold(None, |max, v| Some(max.map_or(v, |m: f64| m.max(v))))
}

/// All distinct version boundaries the registry tracks for `node_type`,
/// ascending.
pub fn tracked_versions(node_type: &str) -> Vec<f64> {
    let mut versions: Vec<f64> = BREAKING_CHANGES
        .iter()
        .filter(|c| c.node_type == node_type)
        .flat_map(|c| [c.from_version, c.to_version])
        .collect();
    versions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    versions.dedup();
    versions
}

/// Collects every registered change for `node_type` whose step falls
/// within the half-open interval `(from, to]`, in registry order.
pub fn analyze_upgrade(node_type: &str, from: f64, to: f64) -> UpgradeAnalysis {
    let changes: Vec<BreakingChange> = BREAKING_CHANGES
        .iter()
        .filter(|c| c.node_type == node_type && c.from_version >= from && c.to_version <= to)
        .cloned()
        .collect();

    let has_breaking = changes.iter().any(|c| c.is_breaking);
    let overall_severity = changes.iter().map(|c| c.severity).max();
    let auto_migratable_count = changes.iter().filter(|c| c.auto_migratable).count();
    let manual_required_count = changes.iter().filter(|c| c.is_breaking && !c.auto_migratable).count();
    let recommendations = changes
        .iter()
        .filter(|c| c.is_breaking && !c.auto_migratable)
        .map(|c| format!("{}: {}", c.property_name, c.migration_hint))
        .collect();

    UpgradeAnalysis {
        changes,
        has_breaking,
        overall_severity,
        auto_migratable_count,
        manual_required_count,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_version_tracks_highest_to_version() {
        assert_eq!(latest_version("nodes-base.httpRequest"), Some(4.1));
        assert_eq!(latest_version("nodes-base.unknownType"), None);
    }

    #[test]
    fn tracked_versions_are_ascending_and_deduped() {
        assert_eq!(tracked_versions("nodes-base.httpRequest"), vec![3.0, 4.0, 4.1]);
    }

    #[test]
    fn analyze_upgrade_collects_changes_in_half_open_interval() {
        let analysis = analyze_upgrade("nodes-base.httpRequest", 3.0, 4.1);
        assert_eq!(analysis.changes.len(), 2);
        assert!(analysis.has_breaking);
        assert_eq!(analysis.overall_severity, Some(Severity::High));
    }

    #[test]
    fn analyze_upgrade_excludes_steps_outside_the_range() {
        let analysis = analyze_upgrade("nodes-base.httpRequest", 4.0, 4.1);
        assert_eq!(analysis.changes.len(), 1);
        assert!(!analysis.has_breaking);
    }

    #[test]
    fn analyze_upgrade_reports_manual_steps_as_recommendations() {
        let analysis = analyze_upgrade("nodes-base.set", 2.0, 3.0);
        assert_eq!(analysis.manual_required_count, 1);
        assert_eq!(analysis.recommendations.len(), 1);
    }

    #[test]
    fn analyze_upgrade_returns_empty_result_for_untracked_type() {
        let analysis = analyze_upgrade("nodes-base.noOp", 1.0, 2.0);
        assert!(analysis.changes.is_empty());
        assert!(!analysis.has_breaking);
        assert_eq!(analysis.overall_severity, None);
    }
}
