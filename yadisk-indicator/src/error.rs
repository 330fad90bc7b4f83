//! Errors raised by the indicator runtime.

use thiserror::Error;

use yadisk_core::ConfigError;

/// Error surface for process invocation and the indicator runtime.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// The executable could not be launched (missing, not executable, ...).
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process started but its output could not be collected.
    #[error("failed to collect output of `{program}`: {source}")]
    Capture {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("poll period must be non-zero")]
    ZeroPeriod,

    #[error("empty command line")]
    EmptyCommand,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("runtime error: {0}")]
    Runtime(String),
}

pub(crate) fn spawn_err(program: impl Into<String>, source: std::io::Error) -> IndicatorError {
    IndicatorError::Spawn {
        program: program.into(),
        source,
    }
}
