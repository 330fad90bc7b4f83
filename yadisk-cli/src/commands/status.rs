//! `yadisk-status status`: one refresh cycle, printed.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use yadisk_core::{IndicatorViewModel, StatusState};
use yadisk_indicator::refresh_once_blocking;

use super::DaemonArgs;
use crate::display::print_view_table;

/// Arguments for `yadisk-status status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub daemon: DaemonArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    daemon: &'a str,
    state: StatusState,
    #[serde(flatten)]
    view: &'a IndicatorViewModel,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config = self.daemon.load_config()?;
        let view = refresh_once_blocking(&config).context("status refresh failed")?;

        if self.json {
            let payload = StatusJson {
                daemon: &config.daemon_program.0,
                state: view.state(),
                view: &view,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_view_table(&config.daemon_program, &view);
        Ok(())
    }
}
