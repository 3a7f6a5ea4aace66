//! Small helpers shared across modules.

use std::path::Path;

use crate::error::{PdfStitchError, Result};

/// Ensure a path exists and refers to a regular file.
pub fn ensure_regular_file(path: &Path) -> Result<()> {
    let exists = path.try_exists().map_err(|source| PdfStitchError::FailedToRead {
        path: path.to_path_buf(),
        source,
    })?;
    if !exists {
        return Err(PdfStitchError::file_not_found(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(PdfStitchError::not_a_file(path.to_path_buf()));
    }

    Ok(())
}

/// Check whether a path carries a `.pdf` extension, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
