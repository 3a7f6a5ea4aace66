//! pdfstitch - Normalize images to PDF pages and merge them with PDFs.

mod cli;

use anyhow::Context;
use clap::Parser;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdfstitch::PdfStitchError;
use pdfstitch::batch;
use pdfstitch::output::{OutputFormatter, display_batch_summary};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(exit_code(&err));
        }
    }
}

/// Run one batch and return the process exit code.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.to_config().context("Invalid arguments")?;
    debug!(
        inputs = config.inputs.len(),
        output = %config.output.display(),
        output_dir = %config.output_dir.display(),
        "resolved job"
    );

    let report = batch::run(&config);

    if cli.json {
        let summary = serde_json::to_string_pretty(&report.summary())
            .context("Failed to serialize summary")?;
        println!("{summary}");
    } else {
        let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
        formatter.section(&format!("{} v{}", pdfstitch::NAME, pdfstitch::VERSION));
        formatter.detail("Inputs", &config.inputs.len().to_string());
        let page = config.page_size;
        formatter.detail("Page size", &format!("{}x{} pt", page.width, page.height));
        formatter.detail("Pages dir", &config.output_dir.display().to_string());
        display_batch_summary(&formatter, &report);
    }

    Ok(report.exit_code())
}

/// Exit code for an error that stopped the run before or around the batch.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PdfStitchError>()
        .map_or(1, PdfStitchError::exit_code)
}
