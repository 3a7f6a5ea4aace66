//! PDF serialization to disk.

use lopdf::Document;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfStitchError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Flate-compress uncompressed streams before writing.
    pub compress: bool,

    /// Renumber objects densely before writing.
    pub renumber: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            renumber: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without compression (faster but larger files).
    pub fn without_compression() -> Self {
        Self {
            options: WriteOptions {
                compress: false,
                ..Default::default()
            },
        }
    }

    /// Writes the given PDF [`Document`] to the specified file path.
    ///
    /// Missing parent directories are created and an existing file is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// * The parent directories cannot be created (e.g., due to permissions).
    /// * The file cannot be created or opened for writing.
    /// * An I/O error occurs during serialization or flushing to disk.
    pub fn write(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PdfStitchError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        if self.options.renumber {
            doc.renumber_objects();
        }

        if self.options.compress {
            doc.compress();
        }

        let file =
            std::fs::File::create(path).map_err(|e| PdfStitchError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut writer = BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfStitchError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| PdfStitchError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
        })
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing. A missing parent
    /// directory is fine as long as it can be created later; a parent that
    /// exists but is a file or read-only is not.
    pub fn can_write(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(PdfStitchError::invalid_config(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }

        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.exists() {
            return Ok(());
        }

        let metadata = std::fs::metadata(parent)?;
        if !metadata.is_dir() {
            return Err(PdfStitchError::invalid_config(format!(
                "Output parent is not a directory: {}",
                parent.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfStitchError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }
}
