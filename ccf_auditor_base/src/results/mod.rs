//! # Audit Report Module
//!
//! Report synthesis and rendering.
//!
//! ## Core Types
//! - [`Report`] - point-in-time audit report snapshot
//! - [`ReportSynthesizer`] - stateless builder for reports, summaries and recommendations
//! - [`MarkdownRenderer`] - long-form human-readable rendering
//! - [`ReportError`] - serialization and export failures
//!
//! The structured rendering is the serde JSON form of [`Report`]
//! (`Report::to_json` / `Report::from_json`).

pub mod error;
pub mod export;
pub mod generator;
pub mod markdown;
pub mod types;

pub use error::ReportError;
pub use export::{export_report, ExportedReport};
pub use generator::{ReportSynthesizer, SynthesisInputs};
pub use markdown::MarkdownRenderer;
pub use types::Report;
