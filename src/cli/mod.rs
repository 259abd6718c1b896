//! CLI interface for Sentiscope.

pub mod handlers;
pub mod output;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use output::OutputMode;

use crate::init::ConfigOverrides;

/// Sentiscope - feedback sentiment classifier
#[derive(Parser)]
#[command(name = "sentiscope", version, about, long_about = None)]
pub struct Cli {
    /// Override data directory (default: ~/.sentiscope)
    #[arg(long, env = "SENTISCOPE_DATA_PATH", global = true)]
    pub data_path: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    /// Output as Markdown
    #[arg(long, global = true)]
    pub md: bool,

    /// Classify input as written, without translating
    #[arg(long, global = true)]
    pub no_translate: bool,

    /// Polarity estimator (lexicon, model, none)
    #[arg(long, global = true)]
    pub estimator: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config adjustments requested on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        let concurrency = match &self.command {
            Commands::Batch { concurrency, .. } => *concurrency,
            _ => None,
        };
        ConfigOverrides {
            no_translate: self.no_translate,
            estimator: self.estimator.clone(),
            concurrency,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single piece of feedback (reads stdin when TEXT is omitted)
    Analyze {
        /// Feedback text in any language
        text: Option<String>,
    },

    /// Classify every row of a tabular file (first column is the feedback)
    Batch {
        /// Input file (.xlsx, .xls, .ods, .csv, .json, .yaml, .yml, .txt)
        file: PathBuf,
        /// Show each row with its label
        #[arg(long)]
        rows: bool,
        /// Write the labeled rows to this file (.csv, .json, .yaml, .yml)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Rows classified at once (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// List override rules applied before the estimator
    Rules,

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether the command needs a configured classifier.
    pub fn needs_context(&self) -> bool {
        !matches!(self, Commands::Completions { .. } | Commands::Rules)
    }
}

/// Execute a CLI command.
pub async fn execute(
    command: &Commands,
    ctx: &crate::init::AppContext,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze { text } => {
            handlers::analyze::handle_analyze(ctx, text.as_deref(), mode).await?
        }
        Commands::Batch {
            file,
            rows,
            output,
            ..
        } => handlers::batch::handle_batch(ctx, file, *rows, output.as_deref(), mode).await?,
        Commands::Rules => handlers::utility::handle_rules(mode)?,
        Commands::Config => handlers::utility::handle_config(ctx, mode)?,
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "sentiscope",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Execute a command that runs without an application context.
pub fn execute_standalone(command: &Commands, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Rules => handlers::utility::handle_rules(mode),
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "sentiscope",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        _ => anyhow::bail!("Command requires an application context"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_batch_concurrency_becomes_override() {
        let cli = Cli::parse_from([
            "sentiscope",
            "--no-translate",
            "batch",
            "survey.csv",
            "--concurrency",
            "8",
        ]);
        let overrides = cli.overrides();
        assert!(overrides.no_translate);
        assert_eq!(overrides.concurrency, Some(8));
        assert!(cli.command.needs_context());
    }

    #[test]
    fn test_analyze_text_is_optional() {
        let cli = Cli::parse_from(["sentiscope", "analyze", "--estimator", "none"]);
        assert!(matches!(cli.command, Commands::Analyze { text: None }));
        assert_eq!(cli.estimator.as_deref(), Some("none"));
    }

    #[test]
    fn test_rules_runs_without_context() {
        let cli = Cli::parse_from(["sentiscope", "rules"]);
        assert!(!cli.command.needs_context());
    }
}
