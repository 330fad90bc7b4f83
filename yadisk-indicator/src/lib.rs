//! Indicator runtime: process invoker + refresh pipeline + toggle action + poll scheduler.

pub mod action;
mod error;
pub mod invoker;
pub mod refresh;
pub mod render;
mod runtime;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod testing;

pub use action::{decide, ActionController, ToggleOutcome};
pub use error::IndicatorError;
pub use invoker::{ProcessInvoker, TokioInvoker};
pub use refresh::{RefreshPipeline, RefreshSource};
pub use render::Renderer;
pub use runtime::{
    init_tracing, refresh_once, refresh_once_blocking, run, start_blocking, toggle_once,
    toggle_once_blocking, Indicator, LogFormat,
};
pub use scheduler::{CancellationHandle, PollScheduler, SchedulerState};
pub use state::{Published, ViewModelSlot};
