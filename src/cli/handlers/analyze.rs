//! CLI handler for single-item classification.

use std::io::Read;

use anyhow::Result;

use crate::cli::output::{
    bar_chart, colored_sentiment, create_spinner, markdown_table, output_json, print_header,
    print_hint, print_kv, OutputMode,
};
use crate::init::AppContext;
use crate::models::{AnalysisResult, ScoreSource};
use crate::presentation::{PageView, SingleResultView};

pub async fn handle_analyze(ctx: &AppContext, text: Option<&str>, mode: OutputMode) -> Result<()> {
    let text = match text {
        Some(t) => t.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if text.trim().is_empty() {
        anyhow::bail!("No feedback text given. Pass TEXT or pipe it on stdin.");
    }

    let spinner = (mode == OutputMode::Human).then(|| create_spinner("Classifying..."));
    let result = ctx.classifier.classify(&text).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let page = PageView::new().with_single(&result, true);

    match mode {
        OutputMode::Json => output_json(&page),
        OutputMode::Markdown => print!("{}", render_markdown(&result)),
        OutputMode::Human => {
            let view = SingleResultView::from(&result);
            print_header("Sentiment Result");
            print_kv("Sentiment", &colored_sentiment(view.sentiment).to_string());
            print_kv("Score", &format!("{:.3}", view.score));
            print_kv("Percentage", &format!("{:.2}%", view.percentage));
            print_kv("Translated", &view.translated);
            if let Some(chart) = &page.charts.single {
                println!();
                print!("{}", bar_chart(chart, 30));
            }
            for note in notes(&result) {
                print_hint(&note);
            }
        }
    }

    Ok(())
}

/// Markdown rendering of a single result.
pub fn render_markdown(result: &AnalysisResult) -> String {
    let view = SingleResultView::from(result);
    let mut out = String::from("## Sentiment Result\n\n");
    out.push_str(&markdown_table(
        &["Sentiment", "Score", "Percentage", "Translated"],
        &[vec![
            view.sentiment.to_string(),
            format!("{:.3}", view.score),
            format!("{:.2}", view.percentage),
            view.translated,
        ]],
    ));
    for note in notes(result) {
        out.push_str(&format!("\n> {}\n", note));
    }
    out
}

/// Explanations for degraded or overridden results.
fn notes(result: &AnalysisResult) -> Vec<String> {
    let mut notes = Vec::new();
    if result.translation_fallback {
        notes.push("Translation unavailable; classified the original text.".to_string());
    }
    match &result.source {
        ScoreSource::Override { rule } => {
            notes.push(format!("Override rule '{}' decided this result.", rule))
        }
        ScoreSource::EstimatorFallback => {
            notes.push("Estimator unavailable; scored as neutral.".to_string())
        }
        ScoreSource::Estimator => {}
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_for_override() {
        let result = AnalysisResult {
            sentiment: crate::models::Sentiment::Negative,
            polarity_score: -0.7,
            confidence_percentage: 15.0,
            translated_text: "I don't like it".into(),
            translation_fallback: false,
            source: ScoreSource::Override {
                rule: "negated-like".into(),
            },
        };
        insta::assert_snapshot!(render_markdown(&result), @r"
        ## Sentiment Result

        | Sentiment | Score | Percentage | Translated |
        |---|---|---|---|
        | Negative | -0.700 | 15.00 | I don't like it |

        > Override rule 'negated-like' decided this result.
        ");
    }

    #[test]
    fn test_notes_for_degraded_paths() {
        let result = AnalysisResult::from_score(
            0.0,
            "hola".into(),
            true,
            ScoreSource::EstimatorFallback,
        );
        assert_eq!(notes(&result).len(), 2);
    }
}
