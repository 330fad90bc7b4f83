//! yadisk-core — domain types, status classification, view reconciliation, config.
//!
//! Public API surface:
//! - [`types`] — daemon, process and view-model types
//! - [`parser`] — status text → [`StatusState`]
//! - [`reconciler`] — [`StatusState`] → [`IndicatorViewModel`]
//! - [`config`] — load / save / init of the indicator config
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod parser;
pub mod reconciler;
pub mod types;

pub use config::{IndicatorConfig, TickPolicy, ToggleDecision};
pub use error::ConfigError;
pub use parser::parse;
pub use reconciler::{reconcile, transition, Transition};
pub use types::{
    ActionLabel, DaemonProgram, DaemonVerb, IconVariant, IndicatorViewModel, ProcessResult,
    StatusState,
};
