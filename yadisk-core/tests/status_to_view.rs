//! Status text → state → view, through the public `yadisk_core` API.
//!
//! Each `#[case]` is isolated — no shared state.

use rstest::rstest;
use yadisk_core::{
    parse, reconcile, ActionLabel, IconVariant, IndicatorViewModel, ProcessResult, StatusState,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn view_for(stderr: &str) -> IndicatorViewModel {
    let result = ProcessResult {
        stdout: String::new(),
        stderr: stderr.to_string(),
        exit_code: Some(0),
    };
    reconcile(parse(&result), result.stderr.clone())
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn idle_daemon_offers_stop() {
    assert_eq!(
        view_for("Sync: idle"),
        IndicatorViewModel {
            icon_variant: IconVariant::Idle,
            action_label: ActionLabel::Stop,
            status_text: "Sync: idle".to_string(),
        }
    );
}

#[test]
fn indexing_daemon_offers_stop() {
    let view = view_for("Indexing: 42 files left");
    assert_eq!(view.icon_variant, IconVariant::Indexing);
    assert_eq!(view.action_label, ActionLabel::Stop);
    assert_eq!(view.status_text, "Indexing: 42 files left");
}

#[rstest]
#[case("Error: daemon not started")]
#[case("")]
#[case("Synchronization core status: busy")]
fn anything_else_offers_start(#[case] stderr: &str) {
    let view = view_for(stderr);
    assert_eq!(view.state(), StatusState::Error);
    assert_eq!(view.icon_variant, IconVariant::Error);
    assert_eq!(view.action_label, ActionLabel::Start);
}

#[rstest]
#[case("idle")]
#[case("xx idle yy")]
#[case("indexing then idle")]
fn any_text_containing_idle_is_idle(#[case] stderr: &str) {
    assert_eq!(view_for(stderr).state(), StatusState::Idle);
}
