//! User-local configuration file (spec §6 "Persisted state").
//!
//! Lives at `{config_dir}/flowctl/config.toml`. Strict mode rejects a
//! file with permissions looser than 0600, mirroring the teacher's XDG
//! path resolution and validation conventions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FlowError;

pub const APP_NAME: &str = "flowctl";

/// Default validation profile applied when a command omits `--profile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    Minimal,
    Runtime,
    AiFriendly,
    Strict,
}

impl Default for Profile {
    fn default() -> Self {
        Self::Runtime
    }
}

/// Retry tuning, defaults mirror [`crate::retry::RetryPolicy::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_base_ms")]
    pub base_ms: u64,
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_ms() -> u64 {
    1000
}
fn default_max_ms() -> u64 {
    10_000
}
fn default_max_retries() -> u32 {
    3
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_ms: default_base_ms(),
            max_ms: default_max_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlowConfig {
    #[serde(default)]
    pub default_profile: Profile,
    #[serde(default)]
    pub control_plane_url: Option<String>,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub version_store: VersionStoreConfig,
    #[serde(default)]
    pub strict_permissions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionStoreConfig {
    #[serde(default = "default_keep")]
    pub keep_versions: u32,
}

fn default_keep() -> u32 {
    50
}

impl Default for VersionStoreConfig {
    fn default() -> Self {
        Self {
            keep_versions: default_keep(),
        }
    }
}

/// Resolves the config directory, preferring the OS-conventional path.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|d| d.config_dir().to_path_buf())
}

pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|d| d.data_dir().to_path_buf())
}

/// Loads the config file if present, applying defaults for absent keys.
/// In strict mode, a file with permissions looser than 0600 is rejected.
pub fn load(path: &Path) -> Result<FlowConfig, FlowError> {
    if !path.exists() {
        return Ok(FlowConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    let config: FlowConfig =
        toml::from_str(&contents).map_err(|e| FlowError::Config(e.to_string()))?;
    if config.strict_permissions {
        check_permissions(path)?;
    }
    Ok(config)
}

#[cfg(unix)]
fn check_permissions(path: &Path) -> Result<(), FlowError> {
    use std::os::unix::fs::PermissionsExt;
    let meta = std::fs::metadata(path)?;
    let mode = meta.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(FlowError::Config(format!(
            "config file {} has permissions {:o}, expected 0600 or stricter in strict mode",
            path.display(),
            mode
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Result<(), FlowError> {
    Ok(())
}

/// Writes the config file and restricts it to 0600 on Unix.
pub fn save(path: &Path, config: &FlowConfig) -> Result<(), FlowError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config).map_err(|e| FlowError::Config(e.to_string()))?;
    std::fs::write(path, body)?;
    restrict_permissions(path)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), FlowError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), FlowError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = load(&path).unwrap();
        assert_eq!(config.default_profile, Profile::Runtime);
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = FlowConfig::default();
        config.default_profile = Profile::Strict;
        config.control_plane_url = Some("https://example.test".into());
        save(&path, &config).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.default_profile, Profile::Strict);
        assert_eq!(loaded.control_plane_url.as_deref(), Some("https://example.test"));
    }

    #[cfg(unix)]
    #[test]
    fn save_restricts_to_0600() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        save(&path, &FlowConfig::default()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn strict_mode_rejects_lax_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = FlowConfig::default();
        config.strict_permissions = true;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o644);
        std::fs::set_permissions(&path, perms).unwrap();

        let result = load(&path);
        assert!(result.is_err());
    }
}
