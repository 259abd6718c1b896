//! Output formatting infrastructure for CLI commands.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::models::Sentiment;
use crate::presentation::ChartSeries;
use crate::services::ProgressReporter;

/// Output mode for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Markdown,
}

impl OutputMode {
    pub fn from_flags(json: bool, md: bool) -> Self {
        if json {
            OutputMode::Json
        } else if md {
            OutputMode::Markdown
        } else {
            OutputMode::Human
        }
    }
}

/// Print a single item as pretty-printed JSON.
pub fn output_json<T: Serialize>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize to JSON: {}", e)),
    }
}

/// Print a formatted table with headers and rows.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("{}", "No results found.".dimmed());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers);

    for row in rows {
        table.add_row(row);
    }

    println!("{table}");
}

/// Render a GitHub-flavored Markdown table. Pipes in cells are escaped.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let escape = |s: &str| s.replace('|', "\\|").replace('\n', " ");
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

/// Label colored by polarity.
pub fn colored_sentiment(sentiment: Sentiment) -> ColoredString {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green().bold(),
        Sentiment::Negative => sentiment.as_str().red().bold(),
        Sentiment::Neutral => sentiment.as_str().yellow().bold(),
    }
}

/// Horizontal bar chart as plain text, scaled to `width` cells.
///
/// Bars scale against `y_max` when set, otherwise against the largest value.
pub fn bar_chart(chart: &ChartSeries, width: usize) -> String {
    let max = chart
        .y_max
        .unwrap_or_else(|| chart.values.iter().copied().fold(0.0, f64::max));
    let label_width = chart
        .labels
        .iter()
        .map(|l| l.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{}\n", chart.title);
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let cells = if max > 0.0 {
            ((value / max) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<label_width$} {} {}\n",
            label.as_str(),
            "#".repeat(cells.min(width)),
            value
        ));
    }
    if let Some(y_label) = chart.y_label {
        out.push_str(&format!("({})\n", y_label));
    }
    out
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", "OK".green().bold(), msg);
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

/// Print a bold section header.
pub fn print_header(title: &str) {
    println!("\n{}\n", title.bold());
}

/// Print a key-value pair line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a dimmed hint/suggestion message.
pub fn print_hint(msg: &str) {
    println!("{}", msg.dimmed());
}

/// Spinner on stderr for work with no known length.
pub fn create_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Batch progress drawn as an `indicatif` bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// A reporter that draws nothing, for JSON output.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, done: usize, latest: Sentiment) {
        self.bar.set_position(done as u64);
        self.bar.set_message(latest.as_str());
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
