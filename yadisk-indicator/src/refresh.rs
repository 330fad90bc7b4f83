//! One refresh cycle: invoke `status` → parse → reconcile → publish.

use std::fmt;

use serde::Serialize;

use yadisk_core::{parse, reconcile, DaemonProgram, DaemonVerb, IndicatorViewModel, StatusState};

use crate::invoker::ProcessInvoker;
use crate::state::ViewModelSlot;

/// What triggered a refresh. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshSource {
    Poll,
    Action,
    Manual,
}

impl fmt::Display for RefreshSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshSource::Poll => write!(f, "poll"),
            RefreshSource::Action => write!(f, "action"),
            RefreshSource::Manual => write!(f, "manual"),
        }
    }
}

pub struct RefreshPipeline<I> {
    invoker: I,
    program: DaemonProgram,
    slot: ViewModelSlot,
}

impl<I: ProcessInvoker> RefreshPipeline<I> {
    pub fn new(invoker: I, program: DaemonProgram, slot: ViewModelSlot) -> Self {
        Self {
            invoker,
            program,
            slot,
        }
    }

    pub fn slot(&self) -> &ViewModelSlot {
        &self.slot
    }

    pub fn program(&self) -> &DaemonProgram {
        &self.program
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Query the daemon and build a view without publishing it.
    ///
    /// Never fails: a status command that cannot be launched yields the
    /// `Error` view with the launch error as its status text.
    pub async fn probe(&self) -> IndicatorViewModel {
        match self.invoker.run(&self.program.argv(DaemonVerb::Status)).await {
            Ok(result) => {
                let state = parse(&result);
                tracing::debug!(
                    state = %state,
                    exit_code = ?result.exit_code,
                    stdout_len = result.stdout.len(),
                    "status command finished",
                );
                reconcile(state, result.stderr)
            }
            Err(err) => {
                tracing::warn!(program = %self.program, error = %err, "status command failed");
                reconcile(StatusState::Error, err.to_string())
            }
        }
    }

    /// Run one full cycle and publish its view into the slot.
    pub async fn refresh(&self, source: RefreshSource) -> IndicatorViewModel {
        tracing::debug!(source = %source, "refresh started");
        let view = self.probe().await;
        let published = self.slot.publish(view.clone()).await;

        if let Some(change) = published.transition {
            tracing::info!(
                source = %source,
                from = %change.from,
                to = %change.to,
                "daemon state changed",
            );
        }
        tracing::debug!(
            source = %source,
            generation = published.generation,
            rendered = published.rendered,
            "refresh finished",
        );
        view
    }
}
