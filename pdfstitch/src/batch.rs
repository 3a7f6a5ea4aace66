//! Normalize-then-merge batch driver.
//!
//! [`run`] walks a [`JobConfig`] input by input: PDFs pass straight through,
//! everything else goes through the [`PageNormalizer`]. A failing input is
//! recorded and left out; it never stops the batch. The surviving PDFs are
//! then merged in input order.

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::JobConfig;
use crate::error::{ErrorKind, PdfStitchError, Result};
use crate::input::InputFile;
use crate::merge::{DocumentMerger, MergeReport, SkippedInput};
use crate::normalize::{PageNormalizer, normalized_output_path};

/// What happened to one input.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Input was already a PDF.
    PassedThrough,
    /// Input was normalized into `output`.
    Converted {
        /// Path of the normalized page.
        output: PathBuf,
    },
    /// Input could not be normalized.
    Failed(PdfStitchError),
}

/// Per-input entry of a [`BatchReport`].
#[derive(Debug)]
pub struct ItemReport {
    /// Input path as configured.
    pub input: PathBuf,
    /// Outcome for this input.
    pub outcome: ItemOutcome,
}

impl ItemReport {
    /// PDF that this input contributes to the merge, if any.
    pub fn merge_path(&self) -> Option<&Path> {
        match &self.outcome {
            ItemOutcome::PassedThrough => Some(self.input.as_path()),
            ItemOutcome::Converted { output } => Some(output.as_path()),
            ItemOutcome::Failed(_) => None,
        }
    }

    /// Error for this input, if it failed.
    pub fn error(&self) -> Option<&PdfStitchError> {
        match &self.outcome {
            ItemOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Overall state of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Every input made it into the merged output.
    Complete,
    /// Output was written but some inputs were left out.
    Partial,
    /// No output was written.
    Failed,
}

/// Everything a batch did.
#[derive(Debug)]
pub struct BatchReport {
    /// One entry per configured input, in order.
    pub items: Vec<ItemReport>,
    /// Outcome of the final merge.
    pub merge: Result<MergeReport>,
}

impl BatchReport {
    /// Overall batch status.
    pub fn status(&self) -> BatchStatus {
        match &self.merge {
            Err(_) => BatchStatus::Failed,
            Ok(report) if report.is_complete() && self.failed_items().next().is_none() => {
                BatchStatus::Complete
            }
            Ok(_) => BatchStatus::Partial,
        }
    }

    /// Inputs that failed normalization.
    pub fn failed_items(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| item.error().is_some())
    }

    /// Process exit code for this batch.
    ///
    /// 0 when complete. A partial batch reports the first failed input's
    /// code, or 3 when inputs were only skipped by the merger. A failed
    /// batch reports the merge error's code.
    pub fn exit_code(&self) -> i32 {
        match &self.merge {
            Err(err) => err.exit_code(),
            Ok(_) if self.status() == BatchStatus::Complete => 0,
            Ok(_) => self
                .items
                .iter()
                .find_map(ItemReport::error)
                .map(PdfStitchError::exit_code)
                .unwrap_or(3),
        }
    }

    /// Serializable summary of the batch.
    pub fn summary(&self) -> BatchSummary {
        let items = self
            .items
            .iter()
            .map(|item| match &item.outcome {
                ItemOutcome::PassedThrough => ItemSummary {
                    input: item.input.clone(),
                    status: ItemStatus::PassedThrough,
                    output: None,
                    error: None,
                },
                ItemOutcome::Converted { output } => ItemSummary {
                    input: item.input.clone(),
                    status: ItemStatus::Converted,
                    output: Some(output.clone()),
                    error: None,
                },
                ItemOutcome::Failed(err) => ItemSummary {
                    input: item.input.clone(),
                    status: ItemStatus::Failed,
                    output: None,
                    error: Some(ErrorSummary::from(err)),
                },
            })
            .collect();

        let (merge, error) = match &self.merge {
            Ok(report) => (
                Some(MergeSummary {
                    output: report.output_path.clone(),
                    merged: report.merged.clone(),
                    skipped: report.skipped.clone(),
                    total_pages: report.total_pages,
                    file_size: report.file_size,
                }),
                None,
            ),
            Err(err) => (None, Some(ErrorSummary::from(err))),
        };

        BatchSummary {
            status: self.status(),
            exit_code: self.exit_code(),
            items,
            merge,
            error,
        }
    }
}

/// Status of one input in a [`BatchSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Already a PDF.
    PassedThrough,
    /// Normalized into a page.
    Converted,
    /// Normalization failed.
    Failed,
}

/// An error flattened for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorSummary {
    /// Error category.
    pub kind: ErrorKind,
    /// Display message.
    pub message: String,
}

impl From<&PdfStitchError> for ErrorSummary {
    fn from(err: &PdfStitchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// One input in a [`BatchSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    /// Input path.
    pub input: PathBuf,
    /// What happened to it.
    pub status: ItemStatus,
    /// Normalized page, for converted inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Failure, for failed inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorSummary>,
}

/// Merge section of a [`BatchSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    /// Merged document path.
    pub output: PathBuf,
    /// PDFs whose pages were appended.
    pub merged: Vec<PathBuf>,
    /// PDFs skipped by the merger.
    pub skipped: Vec<SkippedInput>,
    /// Page count of the merged document.
    pub total_pages: usize,
    /// Merged document size in bytes.
    pub file_size: u64,
}

/// JSON-friendly view of a [`BatchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Overall status.
    pub status: BatchStatus,
    /// Exit code the CLI returns.
    pub exit_code: i32,
    /// Per-input results.
    pub items: Vec<ItemSummary>,
    /// Merge results when output was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeSummary>,
    /// Merge failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorSummary>,
}

/// Run one batch.
///
/// Never returns early: item failures are recorded in the report and a
/// merge failure ends up in [`BatchReport::merge`]. Call
/// [`JobConfig::validate`] first to reject bad configurations up front.
pub fn run(config: &JobConfig) -> BatchReport {
    let normalizer = PageNormalizer::with_page_size(config.page_size);
    let mut items = Vec::with_capacity(config.inputs.len());

    // Output path -> the input (or merged document) that owns it.
    let mut claimed: HashMap<PathBuf, PathBuf> = config
        .inputs()
        .iter()
        .filter(|path| InputFile::new(path.as_path()).is_pdf())
        .map(|path| (path.clone(), path.clone()))
        .collect();
    claimed.insert(config.output.clone(), config.output.clone());

    for path in config.inputs() {
        let input = InputFile::new(path);

        let outcome = if input.is_pdf() {
            ItemOutcome::PassedThrough
        } else {
            info!(input = %input.path.display(), "converting to PDF");
            match convert(&normalizer, &input.path, &config.output_dir, &mut claimed) {
                Ok(output) => ItemOutcome::Converted { output },
                Err(err) => {
                    warn!(input = %input.path.display(), error = %err, "conversion failed, skipping");
                    ItemOutcome::Failed(err)
                }
            }
        };

        items.push(ItemReport {
            input: input.path,
            outcome,
        });
    }

    let pdfs: Vec<PathBuf> = items
        .iter()
        .filter_map(ItemReport::merge_path)
        .map(Path::to_path_buf)
        .collect();

    let merge = DocumentMerger::new().merge(&pdfs, &config.output);
    if let Err(err) = &merge {
        warn!(error = %err, "merge failed");
    }

    BatchReport { items, merge }
}

/// Normalize `input` unless its page would land on an already claimed path.
fn convert(
    normalizer: &PageNormalizer,
    input: &Path,
    output_dir: &Path,
    claimed: &mut HashMap<PathBuf, PathBuf>,
) -> Result<PathBuf> {
    let target = normalized_output_path(input, output_dir)?;
    if let Some(owner) = claimed.get(&target) {
        return Err(PdfStitchError::duplicate_output(
            input.to_path_buf(),
            target,
            owner.clone(),
        ));
    }

    let output = normalizer.normalize(input, output_dir)?;
    claimed.insert(output.clone(), input.to_path_buf());
    Ok(output)
}
