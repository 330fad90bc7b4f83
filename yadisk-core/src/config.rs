//! Indicator configuration, stored as YAML.
//!
//! # Storage layout
//!
//! ```text
//! ~/.yadisk-status/
//!   config.yaml   (mode 0600)
//! ```
//!
//! A missing file, or a file missing some keys, falls back to defaults.
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::DaemonProgram;

pub const CONFIG_DIR: &str = ".yadisk-status";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether scheduled refreshes may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TickPolicy {
    /// Every tick starts a refresh, even if the previous one is still running.
    #[default]
    Overlap,
    /// A tick that fires while a refresh is in flight is skipped.
    Serialize,
}

/// What the toggle action decides from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToggleDecision {
    /// The most recently published view.
    #[default]
    Cached,
    /// A fresh `status` call made just before acting.
    Probe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub daemon_program: DaemonProgram,
    pub poll_interval_secs: u64,
    pub tick_policy: TickPolicy,
    pub toggle_decision: ToggleDecision,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            daemon_program: DaemonProgram::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            tick_policy: TickPolicy::default(),
            toggle_decision: ToggleDecision::default(),
        }
    }
}

impl IndicatorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_interval_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.daemon_program.0.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "daemon_program",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.yadisk-status/` — pure, no I/O.
pub fn config_dir_at(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR)
}

/// `<home>/.yadisk-status/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    config_dir_at(home).join(CONFIG_FILE)
}

/// `config_path_at` convenience wrapper.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load and validate the config, or return defaults when the file is absent.
///
/// Returns `ConfigError::Parse` (with path) if the YAML is malformed and
/// `ConfigError::Invalid` if a value is out of range.
pub fn load_at(home: &Path) -> Result<IndicatorConfig, ConfigError> {
    let path = config_path_at(home);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(IndicatorConfig::default());
        }
        Err(err) => return Err(io_err(&path, err)),
    };

    // An empty file deserializes to unit, not to a mapping.
    if contents.trim().is_empty() {
        return Ok(IndicatorConfig::default());
    }

    let config: IndicatorConfig =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
    config.validate()?;
    Ok(config)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<IndicatorConfig, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `config` to `<home>/.yadisk-status/config.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, config: &IndicatorConfig) -> Result<PathBuf, ConfigError> {
    config.validate()?;

    let dir = config_dir_at(home);
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        set_dir_permissions(&dir)?;
    }

    let path = config_path_at(home);
    let tmp_path = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = to_yaml(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path).map_err(|e| io_err(&path, e))?;
    Ok(path)
}

/// Render `config` the way it is written to disk.
pub fn to_yaml(config: &IndicatorConfig) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(config)?)
}

/// `save_at` convenience wrapper.
pub fn save(config: &IndicatorConfig) -> Result<PathBuf, ConfigError> {
    save_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Write a default config file. Refuses to overwrite unless `force` is set.
pub fn init_at(home: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(home);
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists { path });
    }
    save_at(home, &IndicatorConfig::default())
}

/// `init_at` convenience wrapper.
pub fn init(force: bool) -> Result<PathBuf, ConfigError> {
    init_at(&home()?, force)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
