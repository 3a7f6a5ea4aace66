//! Integration tests for PDF merging.

use lopdf::Document;
use pdfstitch::PdfStitchError;
use pdfstitch::merge::{DocumentMerger, SkipReason};
use pdfstitch::normalize::PageNormalizer;
use tempfile::TempDir;

use crate::common::{page_widths, write_image, write_pdf};

#[test]
fn test_merge_order_across_files() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", &[101, 102]);
    let b = write_pdf(dir.path(), "b.pdf", &[201]);
    let c = write_pdf(dir.path(), "c.pdf", &[301, 302, 303]);
    let output = dir.path().join("merged.pdf");

    let report = DocumentMerger::new().merge(&[a, b, c], &output).unwrap();

    assert_eq!(report.total_pages, 6);
    assert!(report.file_size > 0);
    let merged = Document::load(&output).unwrap();
    assert_eq!(page_widths(&merged), vec![101, 102, 201, 301, 302, 303]);
}

#[test]
fn test_merge_skips_nonexistent_and_completes() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", &[100]);
    let b = write_pdf(dir.path(), "b.pdf", &[200]);
    let ghost = dir.path().join("ghost.pdf");
    let output = dir.path().join("merged.pdf");

    let report = DocumentMerger::new()
        .merge(&[a, ghost.clone(), b], &output)
        .unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, ghost);
    assert_eq!(report.skipped[0].reason, SkipReason::Missing);

    let merged = Document::load(&output).unwrap();
    assert_eq!(page_widths(&merged), vec![100, 200]);
}

#[test]
fn test_merge_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", &[100]);
    let output = dir.path().join("merged.pdf");
    std::fs::write(&output, vec![b'x'; 64 * 1024]).unwrap();

    DocumentMerger::new().merge(&[a], &output).unwrap();

    let merged = Document::load(&output).unwrap();
    assert_eq!(merged.get_pages().len(), 1);
}

#[test]
fn test_merge_empty_list_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("merged.pdf");

    let err = DocumentMerger::new()
        .merge(&[dir.path().join("nope.pdf")], &output)
        .unwrap_err();

    assert!(matches!(err, PdfStitchError::NoFilesToMerge));
    assert!(!output.exists());
}

#[test]
fn test_merge_normalized_pages_with_pdfs() {
    let dir = TempDir::new().unwrap();
    let image = write_image(dir.path(), "cover.jpg", 300, 200);
    let page = PageNormalizer::new().normalize(&image, dir.path()).unwrap();
    let body = write_pdf(dir.path(), "body.pdf", &[612, 612]);
    let output = dir.path().join("out").join("book.pdf");

    let report = DocumentMerger::new().merge(&[page, body], &output).unwrap();
    assert_eq!(report.total_pages, 3);

    let merged = Document::load(&output).unwrap();
    assert_eq!(page_widths(&merged), vec![595, 612, 612]);
}
