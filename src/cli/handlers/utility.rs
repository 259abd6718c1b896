//! Utility command handlers: rules and config.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{
    markdown_table, output_json, print_header, print_hint, print_kv, print_table, OutputMode,
};
use crate::init::AppContext;
use crate::services::RuleSet;

#[derive(Serialize)]
struct RuleRow {
    name: &'static str,
    phrases: Vec<&'static str>,
    sentiment: String,
    polarity_score: f64,
    confidence_percentage: f64,
}

pub fn handle_rules(mode: OutputMode) -> Result<()> {
    let rules = RuleSet::default();
    let rows: Vec<RuleRow> = rules
        .rules()
        .iter()
        .map(|r| RuleRow {
            name: r.name,
            phrases: r.phrases.to_vec(),
            sentiment: r.forced.sentiment.to_string(),
            polarity_score: r.forced.polarity_score,
            confidence_percentage: r.forced.confidence_percentage,
        })
        .collect();

    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.name.to_string(),
                r.phrases
                    .iter()
                    .map(|p| format!("\"{}\"", p))
                    .collect::<Vec<_>>()
                    .join(", "),
                r.sentiment.clone(),
                format!("{:.1}", r.polarity_score),
                format!("{:.1}", r.confidence_percentage),
            ]
        })
        .collect();
    let headers = ["Rule", "Phrases", "Sentiment", "Score", "Percentage"];

    match mode {
        OutputMode::Json => output_json(&rows),
        OutputMode::Markdown => print!("{}", markdown_table(&headers, &table_rows)),
        OutputMode::Human => {
            print_header("Override rules (checked in order, first match wins)");
            print_table(&headers, table_rows);
            print_hint("Matching is case-insensitive; typographic apostrophes count as '.");
        }
    }
    Ok(())
}

pub fn handle_config(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => output_json(&ctx.config),
        OutputMode::Markdown => {
            println!("```toml\n{}```", ctx.config.to_toml()?);
        }
        OutputMode::Human => {
            print_header("Configuration");
            print_kv("Data path", &ctx.data_path.display().to_string());
            print_kv("Translator", ctx.classifier.translator_name());
            print_kv("Target language", &ctx.classifier.config().target_language);
            print_kv("Estimator", ctx.classifier.estimator_name());
            print_kv("Concurrency", &ctx.aggregator.config().concurrency.to_string());
            println!();
            print!("{}", ctx.config.to_toml()?);
        }
    }
    Ok(())
}
