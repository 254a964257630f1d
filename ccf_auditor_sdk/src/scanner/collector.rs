//! # Source Tree Collector
//!
//! Walks a repository and collects pattern signals line by line.

use super::error::ScanError;
use super::patterns::PatternSet;
use super::signals::{PatternMatch, ScanSignals};
use ccf_core::config::compile_time::scanner::{
    MAX_EXCERPT_LENGTH, MAX_FILES_PER_SCAN, MAX_FILE_SIZE,
};
use ccf_core::logging::codes;
use ccf_core::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into
pub const EXCLUDED_DIRS: [&str; 8] = [
    ".git",
    "node_modules",
    "venv",
    "__pycache__",
    "dist",
    "build",
    ".next",
    "target",
];

/// File extensions treated as source code
pub const SOURCE_EXTENSIONS: [&str; 11] = [
    "py", "js", "ts", "jsx", "tsx", "java", "go", "rb", "php", "cs", "rs",
];

const DOCUMENTATION_PREFIXES: [&str; 2] = ["README", "ARCHITECTURE"];

#[derive(Debug)]
pub struct SourceCollector {
    root: PathBuf,
    patterns: PatternSet,
    max_file_size: u64,
    max_files: usize,
}

impl SourceCollector {
    /// Collector over `root` with the default pattern set
    pub fn new(root: &Path) -> Result<Self, ScanError> {
        Self::with_patterns(root, PatternSet::default_set()?)
    }

    pub fn with_patterns(root: &Path, patterns: PatternSet) -> Result<Self, ScanError> {
        if !root.exists() {
            let err = ScanError::RootNotFound {
                path: root.to_path_buf(),
            };
            log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }
        if !root.is_dir() {
            let err = ScanError::RootNotDirectory {
                path: root.to_path_buf(),
            };
            log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }

        Ok(Self {
            root: root.to_path_buf(),
            patterns,
            max_file_size: MAX_FILE_SIZE,
            max_files: MAX_FILES_PER_SCAN,
        })
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_max_files(mut self, count: usize) -> Self {
        self.max_files = count;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect signals. Per-file failures are recorded, never raised.
    pub fn collect(&self) -> ScanSignals {
        let mut signals = ScanSignals::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|path| self.relative(path))
                        .unwrap_or_else(|| self.root.clone());
                    log_warning!("Skipping unreadable path",
                        "path" => path.display(),
                        "reason" => &err
                    );
                    signals.skip(path, err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if is_documentation(&entry) {
                signals.documentation_files.push(self.relative(entry.path()));
            }

            if !is_source_file(entry.path()) {
                continue;
            }

            if signals.files_scanned >= self.max_files {
                log_warning!("File limit reached, scan truncated",
                    "limit" => self.max_files
                );
                signals.truncated = true;
                break;
            }

            self.scan_file(entry.path(), &mut signals);
        }

        log_success!(codes::success::SCAN_COMPLETED, "Source scan completed",
            "root" => self.root.display(),
            "files" => signals.files_scanned,
            "skipped" => signals.skipped_files.len()
        );

        signals
    }

    fn scan_file(&self, path: &Path, signals: &mut ScanSignals) {
        let relative = self.relative(path);

        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                log_warning!("Skipping unreadable file", "path" => relative.display(), "reason" => &e);
                signals.skip(relative, e.to_string());
                return;
            }
        };
        if size > self.max_file_size {
            log_warning!("Skipping oversized file",
                "path" => relative.display(),
                "size" => size,
                "limit" => self.max_file_size
            );
            signals.skip(
                relative,
                format!("{} bytes exceeds limit of {}", size, self.max_file_size),
            );
            return;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log_warning!("Skipping unreadable file", "path" => relative.display(), "reason" => &e);
                signals.skip(relative, e.to_string());
                return;
            }
        };
        // Invalid UTF-8 is replaced, not rejected
        let content = String::from_utf8_lossy(&bytes);

        for (index, line) in content.lines().enumerate() {
            for pattern in self.patterns.matches(line) {
                signals.record(
                    pattern.category,
                    PatternMatch {
                        file: relative.clone(),
                        line: index + 1,
                        pattern: pattern.name.to_string(),
                        excerpt: line.trim().chars().take(MAX_EXCERPT_LENGTH).collect(),
                    },
                );
            }
        }

        signals.files_scanned += 1;
        log_debug!("Scanned file", "path" => relative.display());
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| EXCLUDED_DIRS.contains(&name))
}

fn is_documentation(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map_or(false, |name| {
            DOCUMENTATION_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix))
        })
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| SOURCE_EXTENSIONS.contains(&extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::SignalCategory;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str, content: &str) {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collects_signals_from_source_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "README.md", "# Service");
        write(&dir, "src/crypto.py", "import hashlib\nh = md5(data)\nx = 1\n");
        write(&dir, "src/net.js", "fetch('https://api.example.com')\n");
        write(&dir, "notes.txt", "md5(data) in a text file");

        let signals = SourceCollector::new(dir.path()).unwrap().collect();

        assert_eq!(signals.files_scanned, 2);
        assert_eq!(signals.documentation_files, vec![PathBuf::from("README.md")]);
        assert_eq!(signals.count(SignalCategory::WeakCrypto), 1);
        assert!(signals.has(SignalCategory::TransportEncryption));

        let sample = &signals.samples(SignalCategory::WeakCrypto)[0];
        assert_eq!(sample.file, PathBuf::from("src").join("crypto.py"));
        assert_eq!(sample.line, 2);
        assert_eq!(sample.excerpt, "h = md5(data)");
    }

    #[test]
    fn test_excluded_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "node_modules/lib/index.js", "password = \"secret\"\n");
        write(&dir, "target/debug/build.rs", "md5(x)\n");
        write(&dir, "src/main.rs", "fn main() {}\n");

        let signals = SourceCollector::new(dir.path()).unwrap().collect();

        assert_eq!(signals.files_scanned, 1);
        assert!(!signals.has(SignalCategory::AuthenticationIssue));
        assert!(!signals.has(SignalCategory::WeakCrypto));
    }

    #[test]
    fn test_oversized_file_is_skipped_and_reported() {
        let dir = TempDir::new().unwrap();
        write(&dir, "big.js", &"x".repeat(2048));
        write(&dir, "small.js", "console.log('hi')\n");

        let signals = SourceCollector::new(dir.path())
            .unwrap()
            .with_max_file_size(1024)
            .collect();

        assert_eq!(signals.files_scanned, 1);
        assert_eq!(signals.skipped_files.len(), 1);
        assert_eq!(signals.skipped_files[0].path, PathBuf::from("big.js"));
        assert!(signals.has(SignalCategory::Logging));
    }

    #[test]
    fn test_invalid_utf8_is_scanned_lossily() {
        let dir = TempDir::new().unwrap();
        let mut bytes = b"h = md5(data)\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(dir.path().join("bin.py"), bytes).unwrap();

        let signals = SourceCollector::new(dir.path()).unwrap().collect();
        assert_eq!(signals.files_scanned, 1);
        assert!(signals.has(SignalCategory::WeakCrypto));
    }

    #[test]
    fn test_file_limit_truncates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.py", "x = 1\n");
        write(&dir, "b.py", "x = 2\n");

        let signals = SourceCollector::new(dir.path())
            .unwrap()
            .with_max_files(1)
            .collect();

        assert_eq!(signals.files_scanned, 1);
        assert!(signals.truncated);
    }

    #[test]
    fn test_invalid_roots() {
        let dir = TempDir::new().unwrap();
        assert_matches!(
            SourceCollector::new(&dir.path().join("missing")),
            Err(ScanError::RootNotFound { .. })
        );

        write(&dir, "file.py", "");
        let err = SourceCollector::new(&dir.path().join("file.py")).err().unwrap();
        assert_matches!(err, ScanError::RootNotDirectory { .. });
        assert_eq!(err.error_code(), codes::scanner::SCAN_ROOT_INVALID);
    }
}
