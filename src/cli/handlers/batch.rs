//! CLI handler for batch classification of tabular files.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{
    bar_chart, markdown_table, output_json, print_header, print_hint, print_success, print_table,
    BarProgress, OutputMode,
};
use crate::init::AppContext;
use crate::models::{Sentiment, SENTIMENT_COLUMN};
use crate::presentation::{BatchResultView, PageView};
use crate::services::{load_dataset, write_dataset, BatchReport, ProgressReporter};

/// JSON payload for `sentiscope batch --json`.
#[derive(Serialize)]
struct BatchOutput<'a> {
    file: String,
    #[serde(flatten)]
    page: PageView,
    total: usize,
    translation_fallbacks: usize,
    overrides: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a crate::models::Dataset>,
}

pub async fn handle_batch(
    ctx: &AppContext,
    file: &Path,
    show_rows: bool,
    output: Option<&Path>,
    mode: OutputMode,
) -> Result<()> {
    let dataset = load_dataset(file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;

    let progress: Arc<dyn ProgressReporter> = if mode == OutputMode::Human {
        Arc::new(BarProgress::new())
    } else {
        Arc::new(BarProgress::hidden())
    };
    let report = ctx.aggregator.aggregate(&dataset, progress).await;

    if let Some(path) = output {
        write_dataset(&report.labeled, path)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
    }

    let page = PageView::new().with_batch(&report.summary, &report.counts, !report.is_empty());

    match mode {
        OutputMode::Json => output_json(&BatchOutput {
            file: file.display().to_string(),
            page,
            total: report.summary.total,
            translation_fallbacks: report.translation_fallbacks(),
            overrides: report.overrides(),
            rows: show_rows.then_some(&report.labeled),
        }),
        OutputMode::Markdown => print!("{}", render_markdown(&report, show_rows)),
        OutputMode::Human => {
            print_header(&format!("Batch Result ({} rows)", report.summary.total));
            if report.is_empty() {
                print_hint("No rows to classify.");
            } else {
                print_table(&["Sentiment", "Count", "Percentage"], summary_rows(&report));
                if let Some(chart) = &page.charts.batch {
                    println!();
                    print!("{}", bar_chart(chart, 30));
                }
                if show_rows {
                    println!();
                    print_table(&["#", "Feedback", SENTIMENT_COLUMN], labeled_rows(&report));
                }
                let fallbacks = report.translation_fallbacks();
                if fallbacks > 0 {
                    print_hint(&format!(
                        "{} row(s) classified untranslated after translation failed.",
                        fallbacks
                    ));
                }
            }
            if let Some(path) = output {
                print_success(&format!("Labeled rows written to {}", path.display()));
            }
        }
    }

    Ok(())
}

/// Markdown rendering of a batch report.
pub fn render_markdown(report: &BatchReport, show_rows: bool) -> String {
    let mut out = format!("## Batch Result ({} rows)\n\n", report.summary.total);
    out.push_str(&markdown_table(
        &["Sentiment", "Count", "Percentage"],
        &summary_rows(report),
    ));
    if show_rows && !report.is_empty() {
        out.push('\n');
        out.push_str(&markdown_table(
            &["#", "Feedback", SENTIMENT_COLUMN],
            &labeled_rows(report),
        ));
    }
    out
}

fn summary_rows(report: &BatchReport) -> Vec<Vec<String>> {
    let view = BatchResultView::from(&report.summary);
    Sentiment::ALL
        .iter()
        .map(|s| {
            let pct = match s {
                Sentiment::Positive => view.positive,
                Sentiment::Negative => view.negative,
                Sentiment::Neutral => view.neutral,
            };
            vec![
                s.to_string(),
                report.counts.get(*s).to_string(),
                format!("{:.2}%", pct),
            ]
        })
        .collect()
}

fn labeled_rows(report: &BatchReport) -> Vec<Vec<String>> {
    report
        .labeled
        .texts()
        .zip(&report.results)
        .enumerate()
        .map(|(i, (text, result))| {
            vec![(i + 1).to_string(), text, result.sentiment.to_string()]
        })
        .collect()
}
