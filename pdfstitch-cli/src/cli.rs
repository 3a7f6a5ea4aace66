//! CLI argument parsing for pdfstitch.
//!
//! Shared with `build.rs`, which renders the man page from [`Cli`].

use clap::Parser;
use std::path::{Path, PathBuf};

use pdfstitch::input::resolve_inputs;
use pdfstitch::{JobConfig, PageSize, PdfStitchError, Result};

/// Normalize images to PDF pages and merge everything into one PDF.
///
/// Images are turned upright when wider than tall, scaled to fit the page
/// without cropping and centered on white. PDFs are merged as they are.
/// Inputs keep the order they are given in.
#[derive(Parser, Debug)]
#[command(name = "pdfstitch")]
#[command(version)]
#[command(about = "Normalize images to PDF pages and merge them with PDFs", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input files, directories or glob patterns (in merge order)
    ///
    /// Files ending in .pdf are merged directly; anything else is
    /// normalized to a single page first. A directory contributes its
    /// files sorted by name.
    ///
    /// Examples:
    ///   pdfstitch scan.jpg report.pdf -o merged.pdf
    ///   pdfstitch 'photos/*.png' -o album.pdf
    #[arg(value_name = "INPUT", required_unless_present = "config")]
    pub inputs: Vec<String>,

    /// Merged output PDF path
    #[arg(short, long, value_name = "FILE", required_unless_present = "config")]
    pub output: Option<PathBuf>,

    /// Directory for normalized page files
    ///
    /// Defaults to the directory of the output file. Normalized pages are
    /// named after their source with .pdf appended (photo.png -> photo.png.pdf)
    /// and are kept after the merge.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Page size for normalized images: a4, letter, or WIDTHxHEIGHT in points
    #[arg(long, value_name = "SIZE")]
    pub page_size: Option<PageSize>,

    /// Read the job from a JSON file
    ///
    /// Inputs given on the command line are appended after the file's
    /// inputs; --output, --output-dir and --page-size override the file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output - show debug logs and per-step details
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON summary on stdout instead of the human summary
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Build the job configuration from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the job file cannot be read, a glob pattern is
    /// invalid, no output path is known, or the result fails validation.
    pub fn to_config(&self) -> Result<JobConfig> {
        let cli_inputs = resolve_inputs(&self.inputs)?;

        let mut config = match &self.config {
            Some(path) => {
                let mut config = JobConfig::from_json_file(path)?;
                config.inputs.extend(cli_inputs);
                if let Some(output) = &self.output {
                    config.output = output.clone();
                }
                if let Some(output_dir) = &self.output_dir {
                    config.output_dir = output_dir.clone();
                }
                config
            }
            None => {
                let output = self.output.clone().ok_or_else(|| {
                    PdfStitchError::invalid_config("No output file specified (use --output)")
                })?;
                let output_dir = self
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| default_output_dir(&output));
                JobConfig::new(cli_inputs, output_dir, output)
            }
        };

        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }

        config.validate()?;
        Ok(config)
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Parent directory of `output`, or the working directory for a bare name.
fn default_output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
