//! Durable JSON-snapshot version store, one directory per workflow,
//! guarded by an advisory lock so concurrent `flowctl` invocations don't
//! race each other's backup numbering.

use crate::model::{CompareResult, RestoreOutcome, StoreStats, VersionRecord, VersionSummary, VersionTrigger};
use flowctl_catalog::Catalog;
use flowctl_core::config::Profile;
use flowctl_core::error::FlowError;
use flowctl_core::types::WorkflowId;
use flowctl_model::workflow::Workflow;
use serde_json::{Map, Value};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

pub struct VersionStore {
    dir: PathBuf,
}

impl VersionStore {
    /// Opens (creating if absent) the on-disk directory for `workflow_id`
    /// under `root` (normally [`flowctl_core::config::data_dir`]`/versions`).
    pub fn open(root: &Path, workflow_id: &WorkflowId) -> Result<Self, FlowError> {
        let dir = root.join("versions").join(sanitize(&workflow_id.0));
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn lock(&self) -> Result<fd_lock::RwLock<File>, FlowError> {
        let path = self.dir.join(".lock");
        let file = OpenOptions::new().create(true).truncate(false).write(true).open(path)?;
        Ok(fd_lock::RwLock::new(file))
    }

    fn entry_path(&self, version: u32) -> PathBuf {
        self.dir.join(format!("{version:06}.json"))
    }

    fn existing_versions(&self) -> Result<Vec<u32>, FlowError> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".json") {
                if let Ok(v) = stem.parse::<u32>() {
                    versions.push(v);
                }
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    fn read_record(&self, version: u32) -> Result<Option<VersionRecord>, FlowError> {
        let path = self.entry_path(version);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let record: VersionRecord =
            serde_json::from_str(&contents).map_err(|e| FlowError::Config(format!("corrupt version snapshot {version}: {e}")))?;
        Ok(Some(record))
    }

    fn write_record(&self, record: &VersionRecord) -> Result<(), FlowError> {
        let path = self.entry_path(record.version);
        let body = serde_json::to_string_pretty(record).map_err(|e| FlowError::Config(e.to_string()))?;
        fs::write(path, body)?;
        Ok(())
    }

    /// Creates a new snapshot, numbered one past the current highest
    /// version, then prunes down to `keep_versions` (0 disables pruning).
    pub fn create_backup(
        &self,
        workflow: &Workflow,
        trigger: VersionTrigger,
        metadata: Map<String, Value>,
        keep_versions: u32,
    ) -> Result<VersionRecord, FlowError> {
        let mut lock = self.lock()?;
        let _guard = lock.write().map_err(FlowError::Io)?;

        let next = self.existing_versions()?.last().copied().unwrap_or(0) + 1;
        let record = VersionRecord {
            version: next,
            created_at: chrono::Utc::now(),
            trigger,
            metadata,
            workflow: workflow.clone(),
        };
        self.write_record(&record)?;
        if keep_versions > 0 {
            self.prune_locked(keep_versions)?;
        }
        Ok(record)
    }

    pub fn list_versions(&self) -> Result<Vec<VersionSummary>, FlowError> {
        let mut summaries = Vec::new();
        for version in self.existing_versions()? {
            if let Some(record) = self.read_record(version)? {
                summaries.push(VersionSummary::from(&record));
            }
        }
        Ok(summaries)
    }

    pub fn get(&self, version: u32) -> Result<Option<VersionRecord>, FlowError> {
        self.read_record(version)
    }

    pub fn delete_version(&self, version: u32) -> Result<bool, FlowError> {
        let mut lock = self.lock()?;
        let _guard = lock.write().map_err(FlowError::Io)?;
        let path = self.entry_path(version);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    pub fn delete_all(&self) -> Result<usize, FlowError> {
        let mut lock = self.lock()?;
        let _guard = lock.write().map_err(FlowError::Io)?;
        let versions = self.existing_versions()?;
        for v in &versions {
            fs::remove_file(self.entry_path(*v))?;
        }
        Ok(versions.len())
    }

    pub fn compare(&self, from: u32, to: u32) -> Result<CompareResult, FlowError> {
        let from_record = self
            .read_record(from)?
            .ok_or_else(|| FlowError::MissingInput(format!("version {from} not found")))?;
        let to_record = self
            .read_record(to)?
            .ok_or_else(|| FlowError::MissingInput(format!("version {to} not found")))?;
        Ok(diff_workflows(&from_record.workflow, &to_record.workflow))
    }

    /// Deletes the oldest snapshots beyond `keep`, assuming the caller
    /// already holds the write lock.
    fn prune_locked(&self, keep: u32) -> Result<usize, FlowError> {
        let versions = self.existing_versions()?;
        let excess = versions.len().saturating_sub(keep as usize);
        for v in &versions[..excess] {
            fs::remove_file(self.entry_path(*v))?;
        }
        Ok(excess)
    }

    pub fn prune(&self, keep: u32) -> Result<usize, FlowError> {
        let mut lock = self.lock()?;
        let _guard = lock.write().map_err(FlowError::Io)?;
        self.prune_locked(keep)
    }

    pub fn stats(&self) -> Result<StoreStats, FlowError> {
        let versions = self.existing_versions()?;
        let mut total_bytes = 0u64;
        for v in &versions {
            total_bytes += fs::metadata(self.entry_path(*v))?.len();
        }
        Ok(StoreStats {
            count: versions.len(),
            oldest_version: versions.first().copied(),
            newest_version: versions.last().copied(),
            total_bytes,
        })
    }

    /// Restore protocol (invariant V2): always snapshots `current` before
    /// anything else, so a caller can never lose the pre-restore state
    /// even if the target version is missing or fails validation.
    pub fn restore(
        &self,
        current: &Workflow,
        target_version: u32,
        validate: bool,
        catalog: &Catalog,
        keep_versions: u32,
    ) -> Result<RestoreOutcome, FlowError> {
        let mut metadata = Map::new();
        metadata.insert("note".into(), Value::String("pre-rollback".into()));
        let backup = self.create_backup(current, VersionTrigger::PreRestore, metadata, keep_versions)?;

        let target = match self.read_record(target_version) {
            Ok(Some(record)) => record,
            Ok(None) => {
                return Ok(RestoreOutcome::ValidationFailed {
                    backup,
                    issues: vec![format!("version {target_version} not found")],
                })
            }
            Err(e) => {
                return Ok(RestoreOutcome::ValidationFailed {
                    backup,
                    issues: vec![e.to_string()],
                })
            }
        };

        if validate {
            let result = flowctl_validate::validate(&target.workflow, None, catalog, Profile::Runtime);
            if !result.valid {
                let issues = result.issues.iter().map(|i| format!("{}: {}", i.code, i.message)).collect();
                return Ok(RestoreOutcome::ValidationFailed { backup, issues });
            }
        }

        Ok(RestoreOutcome::Ready { backup, workflow: target.workflow })
    }
}

fn diff_workflows(from: &Workflow, to: &Workflow) -> CompareResult {
    let from_names: std::collections::HashSet<&str> = from.nodes.iter().map(|n| n.name.as_str()).collect();
    let to_names: std::collections::HashSet<&str> = to.nodes.iter().map(|n| n.name.as_str()).collect();

    let added_nodes = to_names.difference(&from_names).map(|s| s.to_string()).collect();
    let removed_nodes = from_names.difference(&to_names).map(|s| s.to_string()).collect();
    let modified_nodes = from_names
        .intersection(&to_names)
        .filter(|name| from.node_by_name(name) != to.node_by_name(name))
        .map(|s| s.to_string())
        .collect();

    let connection_changes = if from.connections == to.connections { 0 } else { 1 };

    let mut setting_changes = Map::new();
    for (key, to_value) in &to.settings {
        if from.settings.get(key) != Some(to_value) {
            setting_changes.insert(key.clone(), to_value.clone());
        }
    }
    for key in from.settings.keys() {
        if !to.settings.contains_key(key) {
            setting_changes.insert(key.clone(), Value::Null);
        }
    }

    CompareResult {
        added_nodes,
        removed_nodes,
        modified_nodes,
        connection_changes,
        setting_changes,
    }
}

fn sanitize(id: &str) -> String {
    id.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' }).collect()
}
