//! User-facing output for pdfstitch.
//!
//! Console summaries for a finished batch. Diagnostic logging goes through
//! `tracing` instead; this module only prints what a user asked to see.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::batch::{BatchReport, BatchStatus, ItemOutcome};

/// Display a batch summary to the user.
///
/// Lists every input and what happened to it, then the merge result.
pub fn display_batch_summary(formatter: &OutputFormatter, report: &BatchReport) {
    formatter.section("Inputs");
    for (index, item) in report.items.iter().enumerate() {
        let input = item.input.display();
        match &item.outcome {
            ItemOutcome::PassedThrough => formatter.list_item(index + 1, &format!("{input}")),
            ItemOutcome::Converted { output } => {
                formatter.list_item(index + 1, &format!("{input} -> {}", output.display()))
            }
            ItemOutcome::Failed(err) => {
                formatter.list_item(index + 1, &format!("{input} (failed)"));
                formatter.warning(&err.to_string());
            }
        }
    }

    let converted = report
        .items
        .iter()
        .filter(|item| matches!(item.outcome, ItemOutcome::Converted { .. }))
        .count();
    let passed = report
        .items
        .iter()
        .filter(|item| matches!(item.outcome, ItemOutcome::PassedThrough))
        .count();
    formatter.info(&format!("{converted} image(s) normalized, {passed} PDF(s) passed through"));

    match &report.merge {
        Ok(merge) => {
            for skipped in &merge.skipped {
                formatter.warning(&format!(
                    "Skipped {}: {}",
                    skipped.path.display(),
                    skipped.reason
                ));
            }

            formatter.blank_line();
            let line = format!(
                "Merged {} file(s) into {} ({} pages, {})",
                merge.merged.len(),
                merge.output_path.display(),
                merge.total_pages,
                merge.format_file_size()
            );
            if report.status() == BatchStatus::Complete {
                formatter.success(&line);
            } else {
                formatter.warning(&line);
            }
            formatter.detail("Time", &format!("{:.2}s", merge.merge_time.as_secs_f64()));
            formatter.debug(&format!("Write took {:.2}s", merge.write_time.as_secs_f64()));
        }
        Err(err) => formatter.error(&err.to_string()),
    }
}
