//! Status text classification.
//!
//! The daemon prints a free-form status line on stderr. Classification is a
//! plain ASCII case-insensitive substring match over an ordered rule list;
//! the first rule that hits wins, and text matching no rule is
//! [`StatusState::Error`]. The daemon prints both `status: index` and
//! `Indexing: 42 files left`, so case is ignored.

use crate::types::{ProcessResult, StatusState};

/// Ordered lowercase keyword rules. `"idle"` is checked before `"index"`.
const RULES: &[(&str, StatusState)] = &[
    ("idle", StatusState::Idle),
    ("index", StatusState::Indexing),
];

/// Classify one `status` invocation. Only `stderr` is consulted.
pub fn parse(result: &ProcessResult) -> StatusState {
    classify(&result.stderr)
}

/// Classify a raw status message.
pub fn classify(message: &str) -> StatusState {
    let message = message.to_ascii_lowercase();
    RULES
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, state)| *state)
        .unwrap_or(StatusState::Error)
}
