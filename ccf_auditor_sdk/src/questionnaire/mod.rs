//! # Interactive Evidence Producer
//!
//! Question bank, answer interpretation and the interview flow that turns a
//! human's answers into assessments and findings.
//!
//! ## Core Types
//! - [`QuestionBank`] - scoping and per-domain questions, embedded as TOML
//! - [`Interpretation`] - status and score resolved from one answer
//! - [`Interview`] - drives a session over any reader and writer

pub mod bank;
pub mod gaps;
pub mod interpret;
pub mod interview;

pub use bank::{DomainQuestions, Question, QuestionBank, QuestionBankError, ScopeField, ScopingQuestion};
pub use gaps::finding_for_gap;
pub use interpret::{interpret_response, resolve_option, Interpretation};
pub use interview::{Interview, InterviewError, ReviewSummary};
