//! `yadisk-status watch`: the live indicator in a terminal.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use yadisk_core::{TickPolicy, ToggleDecision};
use yadisk_indicator::start_blocking;

use super::DaemonArgs;
use crate::display::TerminalRenderer;

/// Arguments for `yadisk-status watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub daemon: DaemonArgs,

    /// Seconds between status polls.
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Skip a poll while the previous one is still running.
    #[arg(long)]
    pub serialize_ticks: bool,

    /// Query the daemon right before toggling instead of trusting the last poll.
    #[arg(long)]
    pub probe_toggle: bool,
}

impl WatchArgs {
    pub fn run(self) -> Result<()> {
        let mut config = self.daemon.load_config()?;
        if let Some(secs) = self.interval {
            config.poll_interval_secs = secs;
        }
        if self.serialize_ticks {
            config.tick_policy = TickPolicy::Serialize;
        }
        if self.probe_toggle {
            config.toggle_decision = ToggleDecision::Probe;
        }
        config.validate().context("invalid watch options")?;

        println!(
            "{}",
            format!(
                "watching `{}` every {}s; Enter toggles, Ctrl-C quits",
                config.daemon_program, config.poll_interval_secs
            )
            .bright_black()
        );

        start_blocking(config, Arc::new(TerminalRenderer)).context("indicator exited with error")?;
        Ok(())
    }
}
