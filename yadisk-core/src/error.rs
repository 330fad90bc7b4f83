//! Error types for yadisk-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// A field parsed fine but holds a value the indicator cannot run with.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// `init` refused to overwrite an existing file.
    #[error("config already exists at {path}")]
    AlreadyExists { path: PathBuf },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
