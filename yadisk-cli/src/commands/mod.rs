pub mod config;
pub mod status;
pub mod toggle;
pub mod watch;

use anyhow::{Context, Result};
use clap::Args;

use yadisk_core::{config as indicator_config, DaemonProgram, IndicatorConfig};

/// Flags shared by every subcommand that talks to the daemon.
#[derive(Args, Debug, Default)]
pub struct DaemonArgs {
    /// Daemon executable to run instead of the configured one.
    #[arg(long, value_name = "PROGRAM")]
    pub daemon: Option<String>,
}

impl DaemonArgs {
    /// Load `~/.yadisk-status/config.yaml` (or defaults) and apply overrides.
    pub fn load_config(&self) -> Result<IndicatorConfig> {
        let mut config = indicator_config::load().context("failed to load config")?;
        if let Some(program) = self.daemon.as_ref() {
            config.daemon_program = DaemonProgram::from(program.as_str());
        }
        config.validate().context("invalid daemon override")?;
        Ok(config)
    }
}
