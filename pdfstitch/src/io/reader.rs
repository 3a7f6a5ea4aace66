//! PDF loading.

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{PdfStitchError, Result};
use crate::utils::ensure_regular_file;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader that rejects encrypted and page-less documents.
#[derive(Debug, Clone)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - PDF is encrypted
    /// - File is not a valid PDF
    /// - PDF has no pages
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        ensure_regular_file(path)?;

        let path_buf = path.to_path_buf();
        let bytes = std::fs::read(path)
            .map_err(|e| PdfStitchError::failed_to_load_pdf(path_buf.clone(), e.to_string()))?;

        // Raw scan: lopdf may reject or decrypt the dictionary on its own.
        if references_encrypt(&bytes) {
            return Err(PdfStitchError::encrypted_pdf(path_buf));
        }

        let document = Document::load_mem(&bytes).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfStitchError::encrypted_pdf(path_buf.clone())
            } else {
                PdfStitchError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfStitchError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            file_size: bytes.len() as u64,
        })
    }
}

/// Whether the file carries an `/Encrypt` entry anywhere.
fn references_encrypt(bytes: &[u8]) -> bool {
    const KEY: &[u8] = b"/Encrypt";
    bytes.windows(KEY.len()).any(|window| window == KEY)
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
