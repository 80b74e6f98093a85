use crate::model::store::DuplicatePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment override for [`StoreConfig::duplicate_ids`].
pub const DUPLICATE_IDS_ENV: &str = "REWIND_DUPLICATE_IDS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewindConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub duplicate_ids: DuplicatePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_message")]
    pub message: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            message: default_log_message(),
        }
    }
}

/// Project-level config path under `project_root`.
#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".rewind/config.toml")
}

/// User-level config path, if the platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rewind/config.toml"))
}

/// Parse a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<RewindConfig> {
    if !path.exists() {
        return Ok(RewindConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<RewindConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config.
///
/// Precedence for the file: `explicit` path, then the project file, then
/// the user file, then defaults. `REWIND_DUPLICATE_IDS` then overrides the
/// store policy.
///
/// # Errors
///
/// Returns an error if the chosen file is unreadable or malformed, if an
/// explicit path does not exist, or if the environment override is not a
/// valid policy.
pub fn resolve_config(project_root: &Path, explicit: Option<&Path>) -> Result<RewindConfig> {
    let mut config = if let Some(path) = explicit {
        anyhow::ensure!(path.exists(), "Config file {} not found", path.display());
        load_config_file(path)?
    } else {
        let project = project_config_path(project_root);
        if project.exists() {
            load_config_file(&project)?
        } else if let Some(user) = user_config_path() {
            load_config_file(&user)?
        } else {
            RewindConfig::default()
        }
    };

    let env_policy = env::var(DUPLICATE_IDS_ENV).ok();
    apply_policy_override(&mut config, env_policy.as_deref())?;
    Ok(config)
}

fn apply_policy_override(config: &mut RewindConfig, raw: Option<&str>) -> Result<()> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(());
    };
    config.store.duplicate_ids = raw
        .parse::<DuplicatePolicy>()
        .with_context(|| format!("Invalid {DUPLICATE_IDS_ENV}"))?;
    Ok(())
}

const fn default_true() -> bool {
    true
}

fn default_log_message() -> String {
    "Event Dispatched".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = project_config_path(dir);
        std::fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        std::fs::write(&path, body).expect("write config");
        path
    }

    #[test]
    fn defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_file(&project_config_path(dir.path())).expect("load");
        assert_eq!(config, RewindConfig::default());
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Append);
        assert!(config.log.enabled);
        assert_eq!(config.log.message, "Event Dispatched");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), "[store]\nduplicate_ids = \"reject\"\n");
        let config = load_config_file(&path).expect("load");
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Reject);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn log_section_parses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), "[log]\nenabled = false\nmessage = \"Applied\"\n");
        let config = load_config_file(&path).expect("load");
        assert!(!config.log.enabled);
        assert_eq!(config.log.message, "Applied");
    }

    #[test]
    fn malformed_file_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), "[store]\nduplicate_ids = \"sometimes\"\n");
        let err = load_config_file(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn explicit_path_wins_over_project_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(dir.path(), "[store]\nduplicate_ids = \"reject\"\n");
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[store]\nduplicate_ids = \"ignore\"\n").expect("write");
        let config = resolve_config(dir.path(), Some(&explicit)).expect("resolve");
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Ignore);
    }

    #[test]
    fn policy_override_applies() {
        let mut config = RewindConfig::default();
        apply_policy_override(&mut config, Some("ignore")).expect("valid");
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Ignore);

        apply_policy_override(&mut config, Some("  ")).expect("blank is skipped");
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Ignore);

        assert!(apply_policy_override(&mut config, Some("bogus")).is_err());
    }
}
