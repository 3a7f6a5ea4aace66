//! PDF concatenation.
//!
//! Combines an ordered list of PDF files into one document. Inputs that are
//! missing or do not carry a `.pdf` extension are skipped and reported, not
//! treated as errors.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::merge::DocumentMerger;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let report = DocumentMerger::new().merge(&inputs, Path::new("merged.pdf"))?;
//! println!("{} pages from {} files", report.total_pages, report.merged.len());
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{DocumentMerger, MergeReport, SkipReason, SkippedInput};
