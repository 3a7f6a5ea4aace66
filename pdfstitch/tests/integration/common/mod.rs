//! Shared helpers for pdfstitch integration tests.
//!
//! Fixtures are generated on the fly with `image` and `lopdf`, so the tests
//! need nothing checked into the repository.

#![allow(dead_code)]

use image::{Rgb, RgbImage, RgbaImage};
use lopdf::Document;
use pdfstitch::io::PdfWriter;
use std::path::{Path, PathBuf};

pub use crate::test_support::page_widths;
use crate::test_support::{encrypted_pdf, sample_pdf};

/// Write a solid-color RGB image; the format follows the extension.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([40, 80, 120]))
        .save(&path)
        .expect("write image fixture");
    path
}

/// Write an image built from a pixel function.
pub fn write_image_with<F>(dir: &Path, name: &str, width: u32, height: u32, f: F) -> PathBuf
where
    F: FnMut(u32, u32) -> Rgb<u8>,
{
    let path = dir.join(name);
    RgbImage::from_fn(width, height, f)
        .save(&path)
        .expect("write image fixture");
    path
}

/// Write an RGBA PNG.
pub fn write_rgba_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("write png fixture");
    path
}

/// Write a PDF with one blank page per entry; each page's MediaBox width is
/// the entry value, so pages can be recognized after merging.
pub fn write_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    let path = dir.join(name);
    PdfWriter::new()
        .write(&mut sample_pdf(widths), &path)
        .expect("write pdf fixture");
    path
}

/// Like [`write_pdf`], with an encryption dictionary in the trailer.
pub fn write_encrypted_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    let path = dir.join(name);
    encrypted_pdf(widths)
        .save(&path)
        .expect("write encrypted pdf fixture");
    path
}

/// MediaBox of every page, in page order.
pub fn media_boxes(doc: &Document) -> Vec<[i64; 4]> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_object(id).unwrap().as_dict().unwrap();
            let values: Vec<i64> = page
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .iter()
                .map(|o| o.as_i64().unwrap())
                .collect();
            [values[0], values[1], values[2], values[3]]
        })
        .collect()
}

/// Decoded page image of a normalized single-page PDF.
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PageImage {
    /// Load the image XObject drawn on the first page of `path`.
    pub fn load(path: &Path) -> Self {
        let doc = Document::load(path).expect("load normalized page");
        let page_id = doc.get_pages()[&1];
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();

        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        let (_, image_ref) = xobjects.iter().next().expect("one XObject");
        let stream = doc
            .get_object(image_ref.as_reference().unwrap())
            .unwrap()
            .as_stream()
            .unwrap();

        let width = stream.dict.get(b"Width").unwrap().as_i64().unwrap() as u32;
        let height = stream.dict.get(b"Height").unwrap().as_i64().unwrap() as u32;
        let pixels = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGB value at `(x, y)`, origin top-left.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * 3) as usize;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

/// Assert two colors match within a small resampling tolerance.
pub fn assert_color_near(actual: [u8; 3], expected: [u8; 3]) {
    let close = actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= 3);
    assert!(close, "expected ~{expected:?}, got {actual:?}");
}
