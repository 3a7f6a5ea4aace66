//! Integration tests for image normalization.

use image::{Rgb, Rgba, RgbaImage};
use pdfstitch::normalize::PageNormalizer;
use pdfstitch::{PageSize, PdfStitchError};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{
    PageImage, assert_color_near, media_boxes, write_image, write_image_with, write_rgba_png,
};

const WHITE: [u8; 3] = [255, 255, 255];

#[rstest]
#[case("tall.png", 120, 900)]
#[case("wide.jpg", 1600, 400)]
#[case("square.bmp", 333, 333)]
#[case("tiny.png", 1, 1)]
#[case("a4.png", 595, 842)]
fn test_page_is_always_a4(#[case] name: &str, #[case] width: u32, #[case] height: u32) {
    let dir = TempDir::new().unwrap();
    let input = write_image(dir.path(), name, width, height);

    let output = PageNormalizer::new().normalize(&input, dir.path()).unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(media_boxes(&doc), vec![[0, 0, 595, 842]]);

    let page = PageImage::load(&output);
    assert_eq!((page.width, page.height), (595, 842));
}

#[test]
fn test_landscape_is_rotated_counter_clockwise() {
    let dir = TempDir::new().unwrap();
    // Left half red, right half blue.
    let input = write_image_with(dir.path(), "landscape.png", 80, 40, |x, _| {
        if x < 40 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });

    let output = PageNormalizer::new().normalize(&input, dir.path()).unwrap();
    let page = PageImage::load(&output);

    // After a counter-clockwise quarter turn the right edge is on top.
    assert_color_near(page.pixel(297, 50), [0, 0, 255]);
    assert_color_near(page.pixel(297, 790), [255, 0, 0]);
    // 40x80 scaled to 421x842, centered with white side margins.
    assert_eq!(page.pixel(10, 421), WHITE);
    assert_eq!(page.pixel(584, 421), WHITE);
}

#[test]
fn test_portrait_is_not_rotated() {
    let dir = TempDir::new().unwrap();
    // Top half green, bottom half black.
    let input = write_image_with(dir.path(), "portrait.png", 40, 80, |_, y| {
        if y < 40 {
            Rgb([0, 255, 0])
        } else {
            Rgb([0, 0, 0])
        }
    });

    let output = PageNormalizer::new().normalize(&input, dir.path()).unwrap();
    let page = PageImage::load(&output);

    assert_color_near(page.pixel(297, 50), [0, 255, 0]);
    assert_color_near(page.pixel(297, 790), [0, 0, 0]);
}

#[test]
fn test_transparency_becomes_white() {
    let dir = TempDir::new().unwrap();
    let mut rgba = RgbaImage::from_pixel(50, 100, Rgba([0, 0, 0, 0]));
    for y in 50..100 {
        for x in 0..50 {
            rgba.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    let input = write_rgba_png(dir.path(), "overlay.png", &rgba);

    let output = PageNormalizer::new().normalize(&input, dir.path()).unwrap();
    let page = PageImage::load(&output);

    assert_color_near(page.pixel(297, 100), WHITE);
    assert_color_near(page.pixel(297, 780), [0, 0, 0]);
}

#[test]
fn test_output_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let input = write_image(dir.path(), "photo.png", 640, 480);
    let normalizer = PageNormalizer::new();

    let output = normalizer.normalize(&input, dir.path()).unwrap();
    let first = std::fs::read(&output).unwrap();

    let again = normalizer.normalize(&input, dir.path()).unwrap();
    assert_eq!(again, output);
    assert_eq!(std::fs::read(&again).unwrap(), first);
}

#[test]
fn test_output_naming_appends_pdf() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_image(src.path(), "photo.png", 10, 10);

    let output = PageNormalizer::new().normalize(&input, out.path()).unwrap();
    assert_eq!(output, out.path().join("photo.png.pdf"));
    assert!(output.exists());
}

#[test]
fn test_creates_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_image(dir.path(), "scan.png", 10, 10);
    let out_dir = dir.path().join("pages").join("nested");

    let output = PageNormalizer::new().normalize(&input, &out_dir).unwrap();
    assert!(output.starts_with(&out_dir));
    assert!(output.exists());
}

#[test]
fn test_custom_page_size() {
    let dir = TempDir::new().unwrap();
    let input = write_image(dir.path(), "scan.png", 100, 50);

    let output = PageNormalizer::with_page_size(PageSize::LETTER)
        .normalize(&input, dir.path())
        .unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(media_boxes(&doc), vec![[0, 0, 612, 792]]);
}

#[test]
fn test_undecodable_input_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "plain text, not pixels").unwrap();

    let err = PageNormalizer::new()
        .normalize(&input, dir.path())
        .unwrap_err();

    assert!(matches!(err, PdfStitchError::FailedToLoadImage { .. }));
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("notes.txt"));
}
