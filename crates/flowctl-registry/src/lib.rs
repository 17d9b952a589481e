//! The static Breaking-Change Registry (C2): compiled-in version-change
//! data plus the `LatestVersion` / `TrackedVersions` / `AnalyzeUpgrade`
//! operations the Auto-Fix and Migration engines consult.

mod data;
mod model;
mod registry;

pub use model::{BreakingChange, ChangeType, Severity};
pub use registry::{analyze_upgrade, latest_version, tracked_versions, UpgradeAnalysis};
