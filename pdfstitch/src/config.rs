//! Configuration for a pdfstitch job.
//!
//! A [`JobConfig`] is the single value injected at the boundary (CLI flags or
//! a JSON job file) that drives one batch: which inputs, where normalized
//! pages go, where the merged document is written, and the page size used
//! for normalization.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PdfStitchError, Result};
use crate::io::PdfWriter;

/// Page size in PDF points (1/72 inch).
///
/// Normalized pages are rasterized at 1 pixel per point, so the same values
/// are also the canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width in points.
    pub width: u32,
    /// Page height in points.
    pub height: u32,
}

impl PageSize {
    /// ISO A4 at 72 dpi.
    pub const A4: Self = Self {
        width: 595,
        height: 842,
    };

    /// US Letter at 72 dpi.
    pub const LETTER: Self = Self {
        width: 612,
        height: 792,
    };

    /// Create a page size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PdfStitchError::invalid_config(format!(
                "Page size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

impl FromStr for PageSize {
    type Err = PdfStitchError;

    /// Parse a page size.
    ///
    /// Accepts `a4`, `letter` (case-insensitive) or `WIDTHxHEIGHT` in points,
    /// e.g. `595x842`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "a4" => return Ok(Self::A4),
            "letter" => return Ok(Self::LETTER),
            _ => {}
        }

        let invalid = || {
            PdfStitchError::invalid_config(format!(
                "Invalid page size: {s}. Expected a4, letter or WIDTHxHEIGHT in points"
            ))
        };

        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height)
    }
}

/// Complete configuration for one normalize-and-merge batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Input files in merge order. PDFs are merged as-is, anything else is
    /// normalized first.
    pub inputs: Vec<PathBuf>,

    /// Directory that receives the normalized page files.
    pub output_dir: PathBuf,

    /// Path of the merged document.
    pub output: PathBuf,

    /// Page size used for normalized pages.
    #[serde(default)]
    pub page_size: PageSize,
}

impl JobConfig {
    /// Create a configuration with the default A4 page size.
    pub fn new(
        inputs: Vec<PathBuf>,
        output_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            inputs,
            output_dir: output_dir.into(),
            output: output.into(),
            page_size: PageSize::default(),
        }
    }

    /// Load a job description from a JSON file.
    ///
    /// ```json
    /// {
    ///   "inputs": ["scan.jpg", "report.pdf"],
    ///   "output_dir": "build/pages",
    ///   "output": "build/merged.pdf",
    ///   "page_size": { "width": 595, "height": 842 }
    /// }
    /// ```
    ///
    /// `page_size` may be omitted.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PdfStitchError::invalid_config(format!(
                "Cannot read job file {}: {e}",
                path.display()
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            PdfStitchError::invalid_config(format!("Invalid job file {}: {e}", path.display()))
        })
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - The page size has a zero dimension
    /// - The output path is also listed as an input
    /// - The output directory exists but is not a directory
    /// - The output path is a directory or sits under a non-directory
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfStitchError::invalid_config("No input files specified"));
        }

        PageSize::new(self.page_size.width, self.page_size.height)?;

        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(PdfStitchError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(PdfStitchError::invalid_config(format!(
                "Output directory is not a directory: {}",
                self.output_dir.display()
            )));
        }

        PdfWriter::new().can_write(&self.output)?;

        Ok(())
    }
}
