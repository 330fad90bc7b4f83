//! `yadisk-status toggle`: start or stop the daemon, then refresh.

use anyhow::{Context, Result};
use clap::Args;

use yadisk_indicator::toggle_once_blocking;

use super::DaemonArgs;
use crate::display::print_view_table;

/// Arguments for `yadisk-status toggle`.
#[derive(Args, Debug)]
pub struct ToggleArgs {
    #[command(flatten)]
    pub daemon: DaemonArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ToggleArgs {
    pub fn run(self) -> Result<()> {
        let config = self.daemon.load_config()?;
        let outcome = toggle_once_blocking(&config).context("toggle failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome).context("failed to serialize toggle JSON")?
            );
            return Ok(());
        }

        if outcome.launched {
            println!("ran `{} {}`", config.daemon_program, outcome.verb);
        } else {
            println!("could not run `{} {}`", config.daemon_program, outcome.verb);
        }
        print_view_table(&config.daemon_program, &outcome.view);
        Ok(())
    }
}
