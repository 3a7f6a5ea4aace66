//! pdfstitch - Turn a mixed pile of images and PDFs into one PDF.
//!
//! Images are normalized into page-sized single-page PDFs (landscape
//! sources turned upright, scaled to fit, centered on white), then merged
//! with the PDF inputs in the order given.
//!
//! # Examples
//!
//! ## Whole batch
//!
//! ```no_run
//! use pdfstitch::{JobConfig, batch};
//! use std::path::PathBuf;
//!
//! let config = JobConfig::new(
//!     vec![PathBuf::from("file1.jpg"), PathBuf::from("file2.pdf")],
//!     "build/pages",
//!     "build/merged.pdf",
//! );
//! config.validate()?;
//!
//! let report = batch::run(&config);
//! println!("{:?}: exit code {}", report.status(), report.exit_code());
//! # Ok::<(), pdfstitch::PdfStitchError>(())
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use pdfstitch::merge::DocumentMerger;
//! use pdfstitch::normalize::PageNormalizer;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let page = PageNormalizer::new().normalize(Path::new("scan.png"), Path::new("out"))?;
//! let report = DocumentMerger::new().merge(
//!     &[page, PathBuf::from("report.pdf")],
//!     Path::new("out/merged.pdf"),
//! )?;
//! println!("Wrote {} pages", report.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod error;
pub mod input;
pub mod io;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod utils;


// Re-export commonly used types
pub use batch::{BatchReport, BatchStatus};
pub use config::{JobConfig, PageSize};
pub use error::{ErrorKind, PdfStitchError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
