//! Input classification and discovery.
//!
//! Inputs are routed by extension alone: `.pdf` (any case) goes straight to
//! the merger, everything else is treated as a raster image and normalized
//! first.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{PdfStitchError, Result};
use crate::utils::has_pdf_extension;

/// How an input file is routed through a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Already a PDF; merged as-is.
    Pdf,
    /// Anything else; normalized into a single-page PDF first.
    Image,
}

/// A filesystem path plus its inferred kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Kind inferred from the extension.
    pub kind: InputKind,
}

impl InputFile {
    /// Classify a path by its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = if has_pdf_extension(&path) {
            InputKind::Pdf
        } else {
            InputKind::Image
        };
        Self { path, kind }
    }

    /// Whether this input is merged without normalization.
    pub fn is_pdf(&self) -> bool {
        self.kind == InputKind::Pdf
    }
}

/// Expand command-line style input arguments into an ordered path list.
///
/// - a directory expands to its regular files, sorted by name (not recursive)
/// - an existing file is kept verbatim, even if its name contains `*`, `?`
///   or `[`
/// - a glob pattern expands to its matches in `glob` order; a pattern that
///   matches nothing is kept verbatim
/// - anything else is kept verbatim, even if it does not exist
///
/// Order across arguments is preserved.
pub fn resolve_inputs<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let path = Path::new(pattern);

        if path.is_dir() {
            resolved.extend(collect_directory(path)?);
        } else if path.is_file() || !is_glob_pattern(pattern) {
            resolved.push(path.to_path_buf());
        } else {
            let matches = collect_glob(pattern)?;
            if matches.is_empty() {
                // Kept so the merge reports it as skipped.
                warn!(pattern, "glob pattern matched no files");
                resolved.push(path.to_path_buf());
            }
            resolved.extend(matches);
        }
    }

    Ok(resolved)
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn collect_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        PdfStitchError::invalid_config(format!("Invalid glob pattern '{pattern}': {err}"))
    })?;

    let mut resolved = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfStitchError::other(err.to_string()))?;
        if path.is_file() {
            resolved.push(path);
        }
    }

    Ok(resolved)
}

fn collect_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            resolved.push(entry.into_path());
        }
    }

    Ok(resolved)
}
