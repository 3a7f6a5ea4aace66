//! End-to-end batch tests.

use lopdf::Document;
use pdfstitch::batch::{self, ItemOutcome};
use pdfstitch::input::resolve_inputs;
use pdfstitch::{BatchStatus, ErrorKind, JobConfig, PdfStitchError};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{page_widths, write_encrypted_pdf, write_image, write_pdf};

#[test]
fn test_one_corrupt_image_of_three() {
    let dir = TempDir::new().unwrap();
    let first = write_image(dir.path(), "1.png", 30, 40);
    let corrupt = dir.path().join("2.jpg");
    std::fs::write(&corrupt, [0xFF, 0xD8, 0xFF, 0x00, 0x13]).unwrap();
    let third = write_image(dir.path(), "3.png", 60, 20);
    let pages = dir.path().join("pages");
    let output = dir.path().join("merged.pdf");

    let config = JobConfig::new(vec![first, corrupt, third], &pages, &output);
    let report = batch::run(&config);

    assert_eq!(report.status(), BatchStatus::Partial);
    assert!(pages.join("1.png.pdf").exists());
    assert!(!pages.join("2.jpg.pdf").exists());
    assert!(pages.join("3.png.pdf").exists());
    assert!(matches!(report.items[1].outcome, ItemOutcome::Failed(_)));

    let merged = Document::load(&output).unwrap();
    assert_eq!(merged.get_pages().len(), 2);
}

#[test]
fn test_image_followed_by_two_pdfs() {
    // One image followed by two PDFs, normalized pages next to the output.
    let dir = TempDir::new().unwrap();
    let image = write_image(dir.path(), "file1.jpg", 800, 600);
    let pdf2 = write_pdf(dir.path(), "file2.pdf", &[201, 202]);
    let pdf3 = write_pdf(dir.path(), "file3.pdf", &[301]);
    let output = dir.path().join("merged_output.pdf");

    let config = JobConfig::new(vec![image, pdf2, pdf3], dir.path(), &output);
    config.validate().unwrap();
    let report = batch::run(&config);

    assert_eq!(report.status(), BatchStatus::Complete);
    assert_eq!(report.exit_code(), 0);
    assert!(dir.path().join("file1.jpg.pdf").exists());

    let merged = Document::load(&output).unwrap();
    assert_eq!(page_widths(&merged), vec![595, 201, 202, 301]);
}

#[test]
fn test_directory_input_resolution() {
    let dir = TempDir::new().unwrap();
    let scans = dir.path().join("scans");
    std::fs::create_dir(&scans).unwrap();
    write_image(&scans, "b.png", 10, 10);
    write_pdf(&scans, "a.pdf", &[111]);
    write_pdf(&scans, "c.pdf", &[333]);

    let inputs = resolve_inputs([scans.to_str().unwrap()]).unwrap();
    assert_eq!(
        inputs,
        vec![scans.join("a.pdf"), scans.join("b.png"), scans.join("c.pdf")]
    );

    let output = dir.path().join("merged.pdf");
    let report = batch::run(&JobConfig::new(inputs, dir.path().join("pages"), &output));
    assert_eq!(report.status(), BatchStatus::Complete);

    let merged = Document::load(&output).unwrap();
    assert_eq!(page_widths(&merged), vec![111, 595, 333]);
}

#[test]
fn test_summary_json_for_failed_batch() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("merged.pdf");

    let config = JobConfig::new(
        vec![PathBuf::from("/definitely/missing/scan.png")],
        dir.path(),
        &output,
    );
    let report = batch::run(&config);
    let json = serde_json::to_value(report.summary()).unwrap();

    assert_eq!(json["status"], "failed");
    assert_eq!(json["error"]["kind"], "config");
    assert_eq!(json["items"][0]["error"]["kind"], "load");
    assert!(json.get("merge").is_none());
    assert!(!output.exists());
}

#[test]
fn test_encrypted_pdf_fails_the_merge() {
    let dir = TempDir::new().unwrap();
    let image = write_image(dir.path(), "cover.png", 20, 20);
    let locked = write_encrypted_pdf(dir.path(), "locked.pdf", &[300]);
    let output = dir.path().join("merged.pdf");

    let report = batch::run(&JobConfig::new(vec![image, locked], dir.path(), &output));

    assert_eq!(report.status(), BatchStatus::Failed);
    assert_eq!(report.exit_code(), 6);
    let err = report.merge.as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Append);
    assert!(err.to_string().contains("encrypted"));
    assert!(!output.exists());
}

#[test]
fn test_same_image_name_from_two_folders() {
    let dir = TempDir::new().unwrap();
    for sub in ["2023", "2024"] {
        std::fs::create_dir(dir.path().join(sub)).unwrap();
    }
    let older = write_image(dir.path(), "2023/receipt.png", 40, 40);
    let newer = write_image(dir.path(), "2024/receipt.png", 40, 40);
    let pages = dir.path().join("pages");
    let output = dir.path().join("merged.pdf");

    let report = batch::run(&JobConfig::new(vec![older.clone(), newer], &pages, &output));

    assert_eq!(report.status(), BatchStatus::Partial);
    assert!(matches!(
        report.items[1].error(),
        Some(PdfStitchError::DuplicateOutput { first, .. }) if *first == older
    ));
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 1);
}
