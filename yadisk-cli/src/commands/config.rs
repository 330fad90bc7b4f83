//! `yadisk-status config`: locate, print or create the config file.

use anyhow::{Context, Result};
use clap::Subcommand;

use yadisk_core::config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the config file location.
    Path,
    /// Print the effective config (file values over defaults).
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            let path = config::config_path().context("could not resolve config path")?;
            println!("{}", path.display());
        }
        ConfigCommand::Show => {
            let effective = config::load().context("failed to load config")?;
            let yaml = config::to_yaml(&effective).context("failed to render config")?;
            print!("{yaml}");
        }
        ConfigCommand::Init { force } => {
            let path = config::init(force).context("failed to write config")?;
            println!("wrote default config: {}", path.display());
        }
    }
    Ok(())
}
