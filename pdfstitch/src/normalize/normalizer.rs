//! Image to single-page PDF conversion.

use image::{ImageReader, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::PageSize;
use crate::error::{PdfStitchError, Result};
use crate::io::PdfWriter;
use crate::normalize::geometry::Placement;
use crate::normalize::page::build_page_document;
use crate::normalize::raster::{self, WHITE};
use crate::utils::ensure_regular_file;

/// Where the normalized page for `input` is written.
///
/// The `.pdf` suffix is appended to the full file name, so `photo.png`
/// becomes `<output_dir>/photo.png.pdf`.
pub fn normalized_output_path(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = input.file_name().ok_or_else(|| {
        PdfStitchError::failed_to_encode(input.to_path_buf(), "input path has no file name")
    })?;

    let mut name = file_name.to_os_string();
    name.push(".pdf");
    Ok(output_dir.join(name))
}

/// Converts raster images into page-sized single-page PDFs.
#[derive(Debug, Clone)]
pub struct PageNormalizer {
    page_size: PageSize,
    background: Rgb<u8>,
    writer: PdfWriter,
}

impl PageNormalizer {
    /// Create a normalizer for A4 pages on a white background.
    pub fn new() -> Self {
        Self::with_page_size(PageSize::A4)
    }

    /// Create a normalizer for a custom page size.
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            background: WHITE,
            writer: PdfWriter::new(),
        }
    }

    /// Page size this normalizer produces.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Normalize one image into `output_dir`.
    ///
    /// Writes exactly one file and returns its path. The input is never
    /// modified; an existing output file is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error naming `input` if:
    /// - the file is missing or not a regular file
    /// - the file cannot be decoded as an image
    /// - the page cannot be encoded or written
    pub fn normalize(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let output = normalized_output_path(input, output_dir)?;
        let canvas = self.render(input)?;

        let mut doc = build_page_document(&canvas)
            .map_err(|e| PdfStitchError::failed_to_encode(input.to_path_buf(), e.to_string()))?;

        self.writer
            .write(&mut doc, &output)
            .map_err(|e| PdfStitchError::failed_to_encode(input.to_path_buf(), e.to_string()))?;

        info!(
            input = %input.display(),
            output = %output.display(),
            "normalized image"
        );

        Ok(output)
    }

    /// Decode `input` and render it onto a page canvas.
    pub fn render(&self, input: &Path) -> Result<RgbImage> {
        ensure_regular_file(input)?;

        let load_error = |source: image::ImageError| PdfStitchError::FailedToLoadImage {
            path: input.to_path_buf(),
            source,
        };

        let decoded = ImageReader::open(input)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| load_error(image::ImageError::IoError(e)))?
            .decode()
            .map_err(load_error)?;

        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return Err(PdfStitchError::failed_to_encode(
                input.to_path_buf(),
                "image has zero width or height",
            ));
        }

        let placement = Placement::plan(width, height, self.page_size);
        debug!(
            input = %input.display(),
            width,
            height,
            rotated = placement.rotated,
            scaled_width = placement.width,
            scaled_height = placement.height,
            x = placement.x,
            y = placement.y,
            "planned page placement"
        );

        let rgb = raster::flatten(decoded, self.background);
        Ok(raster::compose(&rgb, &placement, self.background))
    }
}

impl Default for PageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
