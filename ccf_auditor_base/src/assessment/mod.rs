//! Assessment store and scoring engine

pub mod scoring;
pub mod store;

pub use scoring::{domain_score, domain_scores, mean_of_domain_scores, overall_score};
pub use store::AssessmentStore;
