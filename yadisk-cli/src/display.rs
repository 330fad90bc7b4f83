//! Terminal rendering of indicator views.

use std::io::Write;

use colored::{ColoredString, Colorize};
use tabled::{settings::Style, Table, Tabled};

use yadisk_core::{DaemonProgram, IconVariant, IndicatorViewModel};
use yadisk_indicator::Renderer;

pub fn icon_glyph(icon: IconVariant) -> ColoredString {
    match icon {
        IconVariant::Idle => "■".green().bold(),
        IconVariant::Indexing => "■".yellow().bold(),
        IconVariant::Error => "■".red().bold(),
    }
}

fn icon_label(icon: IconVariant) -> &'static str {
    match icon {
        IconVariant::Idle => "IDLE",
        IconVariant::Indexing => "INDEXING",
        IconVariant::Error => "ERROR",
    }
}

/// Status text on one line: first non-empty line, trimmed.
pub fn status_line(view: &IndicatorViewModel) -> &str {
    view.status_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// One line per delivered view on stdout.
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&self, view: &IndicatorViewModel) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "{} {:<8} {}  {}",
            icon_glyph(view.icon_variant),
            icon_label(view.icon_variant),
            status_line(view),
            format!("[Enter: {}]", view.action_label).bright_black(),
        );
        let _ = out.flush();
    }

    fn release(&self) {
        println!("{}", "indicator stopped".bright_black());
    }
}

#[derive(Tabled)]
struct ViewTableRow {
    #[tabled(rename = "daemon")]
    daemon: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "status")]
    status: String,
}

pub fn print_view_table(program: &DaemonProgram, view: &IndicatorViewModel) {
    let row = ViewTableRow {
        daemon: program.to_string(),
        state: format!("{} {}", icon_glyph(view.icon_variant), icon_label(view.icon_variant)),
        action: view.action_label.to_string(),
        status: status_line(view).to_string(),
    };
    let mut table = Table::new([row]);
    table.with(Style::rounded());
    println!("{table}");
}
