//! Image normalization.
//!
//! Turns one raster image into one single-page PDF:
//! - flattening to RGB (alpha composited over white)
//! - a quarter turn for landscape sources
//! - aspect-preserving scale-to-fit with Lanczos resampling
//! - centering on a white page-sized canvas
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::normalize::PageNormalizer;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let normalizer = PageNormalizer::new();
//! let page = normalizer.normalize(Path::new("scans/file1.jpg"), Path::new("out"))?;
//! assert_eq!(page, Path::new("out/file1.jpg.pdf"));
//! # Ok(())
//! # }
//! ```

pub mod geometry;
pub mod normalizer;
pub mod page;
pub mod raster;

pub use geometry::Placement;
pub use normalizer::{PageNormalizer, normalized_output_path};
