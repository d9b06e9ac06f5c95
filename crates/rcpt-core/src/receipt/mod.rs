//! Receipt field extraction and validation.

mod extractor;
mod pipeline;
pub mod rules;
mod validator;

pub use extractor::ReceiptExtractor;
pub use pipeline::{BatchReport, DocumentOutcome, ReceiptPipeline};
pub use validator::RecordValidator;

use crate::models::receipt::CandidateFields;

/// Trait for receipt field extractors.
///
/// Extraction is total: unknown or missing values come back as defaults
/// and are left for the validator to reject.
pub trait CandidateExtractor {
    /// Derive candidate fields from recognized text.
    fn extract(&self, text: &str) -> CandidateFields;
}
