//! Aggregated scan results

use super::patterns::SignalCategory;
use ccf_core::config::compile_time::scanner::MAX_REPORTED_MATCHES;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One matching line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    /// Path relative to the scan root
    pub file: PathBuf,
    pub line: usize,
    pub pattern: String,
    pub excerpt: String,
}

/// A file the scan could not examine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a scan observed.
///
/// Counts are exact; retained samples per category are capped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSignals {
    pub files_scanned: usize,
    pub documentation_files: Vec<PathBuf>,
    pub skipped_files: Vec<SkippedFile>,
    /// Walk stopped at the file limit
    pub truncated: bool,
    counts: BTreeMap<SignalCategory, usize>,
    samples: BTreeMap<SignalCategory, Vec<PatternMatch>>,
}

impl ScanSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: SignalCategory, found: PatternMatch) {
        *self.counts.entry(category).or_insert(0) += 1;

        let samples = self.samples.entry(category).or_default();
        if samples.len() < MAX_REPORTED_MATCHES {
            samples.push(found);
        }
    }

    pub fn skip(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.skipped_files.push(SkippedFile {
            path,
            reason: reason.into(),
        });
    }

    pub fn count(&self, category: SignalCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn has(&self, category: SignalCategory) -> bool {
        self.count(category) > 0
    }

    pub fn samples(&self, category: SignalCategory) -> &[PatternMatch] {
        self.samples
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_documentation(&self) -> bool {
        !self.documentation_files.is_empty()
    }

    /// Per-category counts for display
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Files scanned: {}", self.files_scanned)];
        lines.push(format!(
            "Documentation files: {}",
            self.documentation_files.len()
        ));
        for category in SignalCategory::ALL {
            lines.push(format!("{}: {}", category, self.count(category)));
        }
        if !self.skipped_files.is_empty() {
            lines.push(format!("Skipped files: {}", self.skipped_files.len()));
        }
        lines.join("\n")
    }
}
