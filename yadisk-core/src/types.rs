//! Domain types for the sync-daemon status indicator.
//!
//! Nothing here is persisted: a [`StatusState`] is derived fresh on every
//! refresh, and the only long-lived value is the latest [`IndicatorViewModel`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Name (or path) of the daemon executable, resolved through `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaemonProgram(pub String);

impl DaemonProgram {
    /// Full argv for one daemon subcommand, e.g. `["yandex-disk", "status"]`.
    pub fn argv(&self, verb: DaemonVerb) -> Vec<String> {
        vec![self.0.clone(), verb.as_str().to_owned()]
    }
}

impl Default for DaemonProgram {
    fn default() -> Self {
        Self::from("yandex-disk")
    }
}

impl fmt::Display for DaemonProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DaemonProgram {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DaemonProgram {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Daemon subcommands this indicator issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaemonVerb {
    Status,
    Start,
    Stop,
}

impl DaemonVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            DaemonVerb::Status => "status",
            DaemonVerb::Start => "start",
            DaemonVerb::Stop => "stop",
        }
    }
}

impl fmt::Display for DaemonVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized daemon state, classified from unstructured status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// Running and fully synchronized.
    Idle,
    /// Running and scanning or syncing.
    Indexing,
    /// Unreachable, stopped, or reporting something unrecognized.
    Error,
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusState::Idle => write!(f, "idle"),
            StatusState::Indexing => write!(f, "indexing"),
            StatusState::Error => write!(f, "error"),
        }
    }
}

/// Which of the three icons the rendering host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    Error,
    Idle,
    Indexing,
}

impl fmt::Display for IconVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconVariant::Error => write!(f, "error"),
            IconVariant::Idle => write!(f, "idle"),
            IconVariant::Indexing => write!(f, "indexing"),
        }
    }
}

/// The action offered to the user, not the daemon's current verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionLabel {
    Start,
    Stop,
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionLabel::Start => write!(f, "Start"),
            ActionLabel::Stop => write!(f, "Stop"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Raw capture of one finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal. Logged, never classified.
    pub exit_code: Option<i32>,
}

/// Display-ready representation of the daemon, produced once per refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorViewModel {
    pub icon_variant: IconVariant,
    pub action_label: ActionLabel,
    /// The message used for classification, shown verbatim.
    pub status_text: String,
}

impl IndicatorViewModel {
    /// The view shown before the first refresh lands.
    pub fn initial() -> Self {
        crate::reconciler::reconcile(StatusState::Error, "")
    }

    /// The state this view was reconciled from.
    pub fn state(&self) -> StatusState {
        match self.icon_variant {
            IconVariant::Error => StatusState::Error,
            IconVariant::Idle => StatusState::Idle,
            IconVariant::Indexing => StatusState::Indexing,
        }
    }
}

impl Default for IndicatorViewModel {
    fn default() -> Self {
        Self::initial()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_prefixes_program() {
        let program = DaemonProgram::from("yandex-disk");
        assert_eq!(program.argv(DaemonVerb::Status), ["yandex-disk", "status"]);
        assert_eq!(program.argv(DaemonVerb::Stop), ["yandex-disk", "stop"]);
    }

    #[test]
    fn default_program_is_yandex_disk() {
        assert_eq!(DaemonProgram::default().to_string(), "yandex-disk");
    }

    #[test]
    fn initial_view_is_error_with_start() {
        let view = IndicatorViewModel::initial();
        assert_eq!(view.icon_variant, IconVariant::Error);
        assert_eq!(view.action_label, ActionLabel::Start);
        assert!(view.status_text.is_empty());
        assert_eq!(view.state(), StatusState::Error);
    }

    #[test]
    fn view_serializes_lowercase_variants() {
        let view = IndicatorViewModel {
            icon_variant: IconVariant::Indexing,
            action_label: ActionLabel::Stop,
            status_text: "Indexing: 42 files left".to_string(),
        };
        let yaml = serde_yaml::to_string(&view).expect("serialize");
        assert!(yaml.contains("icon_variant: indexing"));
        assert!(yaml.contains("action_label: stop"));
    }
}
