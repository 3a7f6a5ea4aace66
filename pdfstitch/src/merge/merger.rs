//! Core merge implementation.

use lopdf::{Document, Object, ObjectId, dictionary};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{PdfStitchError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteOptions};
use crate::utils::{format_file_size, has_pdf_extension};

/// Why an input was left out of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The path does not exist.
    Missing,
    /// The path exists but has no `.pdf` extension.
    NotPdf,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("file does not exist"),
            Self::NotPdf => f.write_str("not a PDF"),
        }
    }
}

/// An input that was skipped during filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInput {
    /// Path as given.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Inputs whose pages were appended, in order.
    pub merged: Vec<PathBuf>,

    /// Inputs dropped during filtering.
    pub skipped: Vec<SkippedInput>,

    /// Number of pages in the merged document.
    pub total_pages: usize,

    /// Where the merged document was written.
    pub output_path: PathBuf,

    /// Size of the merged document in bytes.
    pub file_size: u64,

    /// Total time taken for the merge, including the write.
    pub merge_time: Duration,

    /// Time spent serializing and writing the output.
    pub write_time: Duration,
}

impl MergeReport {
    /// Format output size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }

    /// Whether every input made it into the output.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Concatenates PDF files page by page.
#[derive(Debug, Clone)]
pub struct DocumentMerger {
    reader: PdfReader,
    writer: PdfWriter,
}

impl DocumentMerger {
    /// Create a merger with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::with_options(WriteOptions {
                renumber: true,
                ..Default::default()
            }),
        }
    }

    /// Merge `pdf_paths` in order and write the result to `output`.
    ///
    /// Paths that do not exist or lack a `.pdf` extension are skipped and
    /// listed in the report. All pages of each remaining file are appended
    /// in their original order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no input survives filtering ([`PdfStitchError::NoFilesToMerge`]);
    ///   no file is written in that case
    /// - an input cannot be loaded or its pages cannot be appended
    /// - the output cannot be written
    pub fn merge(&self, pdf_paths: &[PathBuf], output: &Path) -> Result<MergeReport> {
        let start = Instant::now();
        let (accepted, skipped) = filter_inputs(pdf_paths);

        if accepted.is_empty() {
            return Err(PdfStitchError::NoFilesToMerge);
        }

        let mut merged = empty_document();
        let root_pages = root_pages_id(&merged)?;

        for path in &accepted {
            info!(path = %path.display(), "adding");

            let loaded = self
                .reader
                .load(path)
                .map_err(|e| PdfStitchError::failed_to_append(path.clone(), e.to_string()))?;

            append_document(&mut merged, root_pages, loaded)
                .map_err(|e| PdfStitchError::failed_to_append(path.clone(), e.to_string()))?;
        }

        merged.prune_objects();
        let total_pages = merged.get_pages().len();

        let stats = self.writer.write(&mut merged, output)?;

        info!(
            output = %stats.output_path.display(),
            pages = total_pages,
            size = %stats.format_file_size(),
            "merge complete"
        );

        Ok(MergeReport {
            merged: accepted,
            skipped,
            total_pages,
            output_path: stats.output_path,
            file_size: stats.file_size,
            merge_time: start.elapsed(),
            write_time: stats.write_time,
        })
    }
}

impl Default for DocumentMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Split inputs into mergeable paths and skipped entries, preserving order.
fn filter_inputs(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<SkippedInput>) {
    let mut accepted = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        let reason = if !path.exists() {
            Some(SkipReason::Missing)
        } else if !has_pdf_extension(path) {
            Some(SkipReason::NotPdf)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                warn!(path = %path.display(), %reason, "skipping input");
                skipped.push(SkippedInput {
                    path: path.clone(),
                    reason,
                });
            }
            None => accepted.push(path.clone()),
        }
    }

    (accepted, skipped)
}

/// Accumulator with a catalog and an empty root page tree.
fn empty_document() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

fn root_pages_id(doc: &Document) -> lopdf::Result<ObjectId> {
    doc.catalog()?.get(b"Pages")?.as_reference()
}

/// Graft the page tree of `loaded` under `root_pages` in `merged`.
///
/// The source's page tree root becomes a child node of the accumulator root,
/// so page attributes inherited from it (MediaBox, Resources, Rotate) keep
/// applying to its pages.
fn append_document(
    merged: &mut Document,
    root_pages: ObjectId,
    loaded: LoadedPdf,
) -> lopdf::Result<()> {
    let mut source = loaded.document;
    source.renumber_objects_with(merged.max_id + 1);
    merged.max_id = source.max_id;

    let page_count = source.get_pages().len() as i64;
    let source_catalog = source.trailer.get(b"Root")?.as_reference()?;
    let source_pages = root_pages_id(&source)?;

    source.objects.remove(&source_catalog);
    source
        .get_object_mut(source_pages)?
        .as_dict_mut()?
        .set("Parent", root_pages);

    merged.objects.extend(source.objects);

    let root = merged.get_object_mut(root_pages)?.as_dict_mut()?;
    root.get_mut(b"Kids")?
        .as_array_mut()?
        .push(Object::Reference(source_pages));
    let count = root.get(b"Count")?.as_i64()?;
    root.set("Count", count + page_count);

    Ok(())
}
