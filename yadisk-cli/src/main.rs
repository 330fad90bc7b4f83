//! yadisk-status — status indicator and start/stop toggle for the Yandex.Disk daemon.
//!
//! # Usage
//!
//! ```text
//! yadisk-status watch  [--daemon <program>] [--interval <secs>] [--serialize-ticks] [--probe-toggle]
//! yadisk-status status [--daemon <program>] [--json]
//! yadisk-status toggle [--daemon <program>] [--json]
//! yadisk-status config path|show|init [--force]
//! ```
//!
//! `--log-json` switches log output (stderr) to JSON for any subcommand.

mod commands;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    config::ConfigCommand, status::StatusArgs, toggle::ToggleArgs, watch::WatchArgs,
};
use yadisk_indicator::{init_tracing, LogFormat};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "yadisk-status",
    version,
    about = "Show and toggle the Yandex.Disk sync daemon state",
    long_about = None,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll the daemon and redraw on every refresh; press Enter to toggle.
    Watch(WatchArgs),

    /// Query the daemon once and print the indicator view.
    Status(StatusArgs),

    /// Start or stop the daemon depending on its current state.
    Toggle(ToggleArgs),

    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    match cli.command {
        Commands::Watch(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Toggle(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}
