//! Sentiscope - feedback sentiment classifier
//!
//! Usage:
//!   sentiscope analyze "text"        Classify one piece of feedback
//!   sentiscope batch survey.csv      Classify every row, summarize labels
//!   sentiscope rules                 List override rules
//!   sentiscope config                Show effective configuration
//!   sentiscope --help                Show all commands

use anyhow::Result;
use clap::Parser;

use sentiscope::cli::output::OutputMode;
use sentiscope::cli::Cli;
use sentiscope::init::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sentiscope=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_flags(cli.json, cli.md);

    if cli.command.needs_context() {
        let ctx = AppContext::new(cli.data_path.clone(), &cli.overrides())?;
        sentiscope::cli::execute(&cli.command, &ctx, mode).await?;
    } else {
        sentiscope::cli::execute_standalone(&cli.command, mode)?;
    }

    Ok(())
}
