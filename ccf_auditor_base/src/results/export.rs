//! Writing rendered reports to disk

use super::{MarkdownRenderer, Report, ReportError};
use ccf_core::logging::codes;
use ccf_core::{log_error, log_success};
use std::path::{Path, PathBuf};

/// Paths written by [`export_report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
}

/// Write `<stem>.json` and `<stem>.md` into `output_dir`.
///
/// I/O errors are returned as-is; nothing is retried.
pub fn export_report(
    report: &Report,
    output_dir: &Path,
    stem: &str,
) -> Result<ExportedReport, ReportError> {
    let json_path = output_dir.join(format!("{}.json", stem));
    let markdown_path = output_dir.join(format!("{}.md", stem));

    let result = write_json(report, &json_path)
        .and_then(|_| write_markdown(report, &markdown_path))
        .map(|_| ExportedReport {
            json_path,
            markdown_path,
        });

    match &result {
        Ok(exported) => {
            log_success!(codes::success::REPORT_EXPORTED, "Report exported",
                "json" => exported.json_path.display(),
                "markdown" => exported.markdown_path.display()
            );
        }
        Err(err) => {
            log_error!(err.error_code(), &err.to_string(),
                "output_dir" => output_dir.display()
            );
        }
    }

    result
}

pub fn write_json(report: &Report, path: &Path) -> Result<(), ReportError> {
    let json = report.to_json()?;
    std::fs::write(path, json).map_err(|e| ReportError::write(path, e))
}

pub fn write_markdown(report: &Report, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, MarkdownRenderer::render(report)).map_err(|e| ReportError::write(path, e))
}
