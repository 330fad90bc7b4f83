//! Cancellable fixed-interval ticker.
//!
//! Each tick runs as its own spawned task, so cancelling the scheduler never
//! aborts a refresh that is already running; it only stops new ones.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use yadisk_core::TickPolicy;

use crate::error::IndicatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Owner of a running ticker. Dropping it cancels the ticker.
pub struct CancellationHandle {
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
    state: SchedulerState,
}

impl CancellationHandle {
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Stop firing ticks. Idempotent.
    pub fn cancel(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        let _ = self.shutdown.send(());
        self.state = SchedulerState::Stopped;
        tracing::debug!("poll scheduler cancelled");
    }

    /// Cancel and wait for the ticker loop (not in-flight ticks) to exit.
    pub async fn join(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "poll scheduler task join failure");
            }
        }
    }
}

impl Drop for CancellationHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct PollScheduler;

impl PollScheduler {
    /// Fire `on_tick` once immediately, then every `period`.
    ///
    /// With [`TickPolicy::Overlap`] every timer fire starts a new tick even if
    /// earlier ones are still running. With [`TickPolicy::Serialize`] a fire
    /// that lands while the previous tick is unfinished is skipped.
    ///
    /// A zero `period` is rejected before anything is spawned.
    pub fn start<F, Fut>(
        period: Duration,
        policy: TickPolicy,
        on_tick: F,
    ) -> Result<CancellationHandle, IndicatorError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if period.is_zero() {
            return Err(IndicatorError::ZeroPeriod);
        }
        let (shutdown, shutdown_rx) = broadcast::channel(1);
        let task = tokio::spawn(tick_loop(period, policy, on_tick, shutdown_rx));
        tracing::debug!(period_secs = period.as_secs_f64(), policy = ?policy, "poll scheduler started");
        Ok(CancellationHandle {
            shutdown,
            task: Some(task),
            state: SchedulerState::Running,
        })
    }

    pub fn cancel(handle: &mut CancellationHandle) {
        handle.cancel();
    }
}

async fn tick_loop<F, Fut>(
    period: Duration,
    policy: TickPolicy,
    on_tick: F,
    mut shutdown_rx: broadcast::Receiver<()>,
) where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut in_flight: JoinHandle<()> = tokio::spawn(on_tick());

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // A closed channel means the handle is gone; stop as well.
            _ = shutdown_rx.recv() => break,
            _ = interval.tick() => {
                if policy == TickPolicy::Serialize && !in_flight.is_finished() {
                    tracing::debug!("previous refresh still running, skipping tick");
                    continue;
                }
                in_flight = tokio::spawn(on_tick());
            }
        }
    }
    // Dropping `in_flight` detaches the last tick; it runs to completion.
}
