//! Command-line front end: reads Tamil text from an argument, stdin, or the
//! built-in samples and prints the corrected or summarized result.

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tamil_assist::bootstrap;
use tamil_assist::config::AssistConfig;
use tamil_assist::primitives::Mode;
use tokio::io::AsyncReadExt;
use tracing::debug;

mod samples;

/// Tamil grammar correction and summarization.
#[derive(Debug, Parser)]
#[command(name = "tamil-assist", version, about, long_about = None)]
struct Cli {
    /// Processing mode: grammar, grammar-a, or summarize
    #[arg(short, long, default_value = Mode::GRAMMAR)]
    mode: String,

    /// Summary length tier: 0 (short), 1 (medium), 2 (long)
    #[arg(short, long, value_name = "TIER")]
    length: Option<usize>,

    /// Process built-in sample N for the selected mode instead of TEXT
    #[arg(long, value_name = "N", conflicts_with = "text")]
    sample: Option<usize>,

    /// JSON configuration file; environment variables override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Text to process; read from stdin when omitted
    text: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AssistConfig::load(cli.config.as_deref()).context("loading configuration")?;
    tamil_assist::telemetry::init(config.log_filter()).context("initialising logging")?;
    debug!(?config, "configuration loaded");

    let mode = Mode::parse(&cli.mode, cli.length)?;
    let text = match (cli.sample, cli.text) {
        (Some(index), _) => samples::sample(mode, index).to_owned(),
        (None, Some(text)) => text,
        (None, None) => read_stdin().await?,
    };

    let processor = bootstrap::processor(&config)?;
    match processor.process(&text, mode).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            if let Some(cause) = err.source() {
                debug!(cause = %cause, "request failed");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("reading stdin")?;
    if input.trim().is_empty() {
        bail!("no text given; pass TEXT, --sample N, or pipe text on stdin");
    }
    strip_final_newline(&mut input);
    Ok(input)
}

/// Removes one trailing `\n` or `\r\n`, as left by `echo` or a shell heredoc.
fn strip_final_newline(input: &mut String) {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
}
