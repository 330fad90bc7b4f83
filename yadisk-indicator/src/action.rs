//! The user's start/stop toggle.

use std::sync::Arc;

use serde::Serialize;

use yadisk_core::{DaemonVerb, IndicatorViewModel, StatusState, ToggleDecision};

use crate::invoker::ProcessInvoker;
use crate::refresh::{RefreshPipeline, RefreshSource};

/// Result of one [`ActionController::toggle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// Subcommand that was issued.
    pub verb: DaemonVerb,
    /// State the decision was made from.
    pub decided_from: StatusState,
    /// `false` when the subcommand could not be launched.
    pub launched: bool,
    /// View produced by the follow-up refresh.
    pub view: IndicatorViewModel,
}

/// `Idle` means the daemon is up and quiet, so offer to stop it. Every
/// other state, `Indexing` included, issues `start`.
pub fn decide(state: StatusState) -> DaemonVerb {
    match state {
        StatusState::Idle => DaemonVerb::Stop,
        StatusState::Indexing | StatusState::Error => DaemonVerb::Start,
    }
}

pub struct ActionController<I> {
    pipeline: Arc<RefreshPipeline<I>>,
    decision: ToggleDecision,
}

impl<I: ProcessInvoker> ActionController<I> {
    pub fn new(pipeline: Arc<RefreshPipeline<I>>, decision: ToggleDecision) -> Self {
        Self { pipeline, decision }
    }

    /// Issue `start` or `stop`, then run exactly one refresh.
    ///
    /// The subcommand's exit status and output are ignored. A launch failure
    /// is logged and the refresh still runs.
    pub async fn toggle(&self) -> ToggleOutcome {
        let state = match self.decision {
            ToggleDecision::Cached => self.pipeline.slot().current().await.state(),
            ToggleDecision::Probe => self.pipeline.probe().await.state(),
        };
        let verb = decide(state);
        let program = self.pipeline.program();
        tracing::info!(program = %program, verb = %verb, from = %state, "toggling daemon");

        let launched = match self.pipeline.invoker().run(&program.argv(verb)).await {
            Ok(result) => {
                tracing::debug!(verb = %verb, exit_code = ?result.exit_code, "toggle command finished");
                true
            }
            Err(err) => {
                tracing::warn!(verb = %verb, error = %err, "toggle command failed");
                false
            }
        };

        let view = self.pipeline.refresh(RefreshSource::Action).await;
        ToggleOutcome {
            verb,
            decided_from: state,
            launched,
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use yadisk_core::{reconcile, DaemonProgram};

    use super::*;
    use crate::state::ViewModelSlot;
    use crate::testing::{Reply, ScriptedInvoker};

    fn controller(
        invoker: ScriptedInvoker,
        decision: ToggleDecision,
    ) -> ActionController<ScriptedInvoker> {
        let pipeline = RefreshPipeline::new(
            invoker,
            DaemonProgram::from("yandex-disk"),
            ViewModelSlot::new(),
        );
        ActionController::new(Arc::new(pipeline), decision)
    }

    #[test]
    fn decision_table() {
        assert_eq!(decide(StatusState::Idle), DaemonVerb::Stop);
        assert_eq!(decide(StatusState::Indexing), DaemonVerb::Start);
        assert_eq!(decide(StatusState::Error), DaemonVerb::Start);
    }

    #[tokio::test]
    async fn idle_toggle_stops_then_refreshes_once() {
        let invoker = ScriptedInvoker::new().with_status(Some("Error: daemon not started"));
        let controller = controller(invoker, ToggleDecision::Cached);
        controller
            .pipeline
            .slot()
            .publish(reconcile(StatusState::Idle, "Sync: idle"))
            .await;

        let outcome = controller.toggle().await;

        assert_eq!(outcome.verb, DaemonVerb::Stop);
        assert_eq!(outcome.decided_from, StatusState::Idle);
        assert!(outcome.launched);
        assert_eq!(outcome.view.state(), StatusState::Error);
        assert_eq!(controller.pipeline.invoker().verbs(), ["stop", "status"]);
    }

    #[tokio::test]
    async fn initial_state_toggle_starts() {
        let invoker = ScriptedInvoker::new().with_status(Some("Sync: idle"));
        let controller = controller(invoker, ToggleDecision::Cached);

        let outcome = controller.toggle().await;

        assert_eq!(outcome.verb, DaemonVerb::Start);
        assert_eq!(outcome.view.state(), StatusState::Idle);
        assert_eq!(controller.pipeline.invoker().verbs(), ["start", "status"]);
    }

    #[tokio::test]
    async fn failing_subcommand_output_is_ignored() {
        let invoker = ScriptedInvoker::new().with_status(Some("Sync: idle"));
        invoker.push("start", Reply::Stderr("Error: permission denied".to_string()));
        let controller = controller(invoker, ToggleDecision::Cached);

        let outcome = controller.toggle().await;

        assert!(outcome.launched);
        assert_eq!(controller.pipeline.invoker().verbs(), ["start", "status"]);
    }

    #[tokio::test]
    async fn launch_failure_still_refreshes() {
        let invoker = ScriptedInvoker::new().with_status(None);
        invoker.push("start", Reply::SpawnFails);
        let controller = controller(invoker, ToggleDecision::Cached);

        let outcome = controller.toggle().await;

        assert!(!outcome.launched);
        assert_eq!(outcome.view.state(), StatusState::Error);
        assert!(outcome.view.status_text.contains("failed to launch"));
        assert_eq!(controller.pipeline.invoker().verbs(), ["start", "status"]);
        assert_eq!(controller.pipeline.slot().generation().await, 1);
    }

    #[tokio::test]
    async fn probe_decision_queries_status_first() {
        let invoker = ScriptedInvoker::new().with_status(Some("Error: daemon not started"));
        invoker.push("status", Reply::Stderr("Sync: idle".to_string()));
        let controller = controller(invoker, ToggleDecision::Probe);

        let outcome = controller.toggle().await;

        assert_eq!(outcome.decided_from, StatusState::Idle);
        assert_eq!(outcome.verb, DaemonVerb::Stop);
        assert_eq!(controller.pipeline.invoker().verbs(), ["status", "stop", "status"]);
        assert_eq!(outcome.view.state(), StatusState::Error);
    }
}
