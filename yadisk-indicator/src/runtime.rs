//! Indicator lifecycle, the interactive host and one-shot entry points.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use yadisk_core::{IndicatorConfig, IndicatorViewModel};

use crate::action::{ActionController, ToggleOutcome};
use crate::error::IndicatorError;
use crate::invoker::{ProcessInvoker, TokioInvoker};
use crate::refresh::{RefreshPipeline, RefreshSource};
use crate::render::Renderer;
use crate::scheduler::{CancellationHandle, PollScheduler, SchedulerState};
use crate::state::ViewModelSlot;

/// How long runtime shutdown waits for a blocked stdin read.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// A live indicator: the shared slot, the toggle action and the poll ticker.
pub struct Indicator<I> {
    pipeline: Arc<RefreshPipeline<I>>,
    actions: Arc<ActionController<I>>,
    scheduler: CancellationHandle,
    toggles: JoinSet<ToggleOutcome>,
}

impl<I: ProcessInvoker> Indicator<I> {
    /// Bind `renderer`, run the first refresh right away and start polling.
    ///
    /// An invalid config is rejected before the renderer is bound.
    pub async fn enable(
        config: &IndicatorConfig,
        invoker: I,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, IndicatorError> {
        config.validate()?;

        let slot = ViewModelSlot::new();
        slot.bind(renderer).await;

        let pipeline = Arc::new(RefreshPipeline::new(
            invoker,
            config.daemon_program.clone(),
            slot,
        ));
        let actions = Arc::new(ActionController::new(
            pipeline.clone(),
            config.toggle_decision,
        ));

        let ticker = pipeline.clone();
        let scheduler =
            PollScheduler::start(config.poll_interval(), config.tick_policy, move || {
                let pipeline = ticker.clone();
                async move {
                    pipeline.refresh(RefreshSource::Poll).await;
                }
            })?;

        tracing::info!(
            program = %config.daemon_program,
            interval_secs = config.poll_interval_secs,
            "indicator enabled",
        );

        Ok(Self {
            pipeline,
            actions,
            scheduler,
            toggles: JoinSet::new(),
        })
    }

    pub fn slot(&self) -> &ViewModelSlot {
        self.pipeline.slot()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub async fn toggle(&self) -> ToggleOutcome {
        self.actions.toggle().await
    }

    /// Run a toggle in the background, the way a menu click would.
    pub fn spawn_toggle(&mut self) {
        let actions = self.actions.clone();
        self.toggles.spawn(async move { actions.toggle().await });
    }

    pub fn pending_toggles(&self) -> usize {
        self.toggles.len()
    }

    /// Wait for the next background toggle to finish. Panicked toggles are
    /// logged and skipped; `None` once no toggle is left.
    pub async fn next_toggle(&mut self) -> Option<ToggleOutcome> {
        while let Some(joined) = self.toggles.join_next().await {
            match joined {
                Ok(outcome) => return Some(outcome),
                Err(err) => tracing::warn!(error = %err, "toggle task join failure"),
            }
        }
        None
    }

    /// Stop polling and release the renderer. In-flight refreshes and
    /// toggles still finish and update the slot, but nothing is drawn anymore.
    pub async fn disable(mut self) {
        self.scheduler.cancel();
        while let Some(joined) = self.toggles.try_join_next() {
            if let Err(err) = joined {
                tracing::warn!(error = %err, "toggle task join failure");
            }
        }
        // Dropping the set would abort toggles that are still running.
        self.toggles.detach_all();
        if let Some(renderer) = self.pipeline.slot().detach().await {
            renderer.release();
        }
        tracing::info!("indicator disabled");
    }
}

/// Interactive host: every stdin line toggles the daemon, Ctrl-C exits.
pub async fn run(
    config: IndicatorConfig,
    renderer: Arc<dyn Renderer>,
) -> Result<(), IndicatorError> {
    let mut indicator = Indicator::enable(&config, TokioInvoker, renderer).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                match signal {
                    Ok(()) => {
                        tracing::info!("received ctrl-c, disabling indicator");
                        break Ok(());
                    }
                    Err(err) => {
                        break Err(IndicatorError::Runtime(format!(
                            "ctrl-c handler failed: {err}"
                        )));
                    }
                }
            }
            Some(done) = indicator.next_toggle(), if indicator.pending_toggles() > 0 => {
                tracing::debug!(
                    verb = %done.verb,
                    launched = done.launched,
                    "toggle finished",
                );
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(_)) => indicator.spawn_toggle(),
                    Ok(None) => {
                        tracing::debug!("stdin closed, toggling disabled");
                        stdin_open = false;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "stdin read failed, toggling disabled");
                        stdin_open = false;
                    }
                }
            }
        }
    };

    indicator.disable().await;
    outcome
}

/// Start the interactive indicator and block the current thread until it exits.
pub fn start_blocking(
    config: IndicatorConfig,
    renderer: Arc<dyn Renderer>,
) -> Result<(), IndicatorError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| IndicatorError::Runtime(format!("failed to build tokio runtime: {e}")))?;
    let result = runtime.block_on(run(config, renderer));
    // The stdin reader sits on a blocking thread that never returns by itself.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

/// Query the daemon once and return the reconciled view.
pub async fn refresh_once<I: ProcessInvoker>(
    config: &IndicatorConfig,
    invoker: I,
) -> IndicatorViewModel {
    let pipeline = RefreshPipeline::new(
        invoker,
        config.daemon_program.clone(),
        ViewModelSlot::new(),
    );
    pipeline.refresh(RefreshSource::Manual).await
}

/// Refresh once so the decision has a real input, then toggle.
pub async fn toggle_once<I: ProcessInvoker>(
    config: &IndicatorConfig,
    invoker: I,
) -> ToggleOutcome {
    let pipeline = Arc::new(RefreshPipeline::new(
        invoker,
        config.daemon_program.clone(),
        ViewModelSlot::new(),
    ));
    pipeline.refresh(RefreshSource::Manual).await;
    ActionController::new(pipeline, config.toggle_decision)
        .toggle()
        .await
}

pub fn refresh_once_blocking(
    config: &IndicatorConfig,
) -> Result<IndicatorViewModel, IndicatorError> {
    config.validate()?;
    Ok(current_thread_runtime()?.block_on(refresh_once(config, TokioInvoker)))
}

pub fn toggle_once_blocking(config: &IndicatorConfig) -> Result<ToggleOutcome, IndicatorError> {
    config.validate()?;
    Ok(current_thread_runtime()?.block_on(toggle_once(config, TokioInvoker)))
}

/// Install the global `tracing` subscriber. Logs go to stderr; `RUST_LOG`
/// overrides the default `info` filter. Later calls are no-ops.
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime, IndicatorError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| IndicatorError::Runtime(format!("failed to build tokio runtime: {e}")))
}
