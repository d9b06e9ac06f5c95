//! Error types for the rcpt-core library.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Candidate fields were rejected by the validator.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The document could not be turned into text.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A single violated record constraint.
///
/// Validation stops at the first violation, so exactly one of these is
/// reported per document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Vendor name is too short or too long.
    #[error("vendor must be between {min} and {max} characters, got {length}")]
    VendorLength { length: usize, min: usize, max: usize },

    /// Date matches none of the accepted formats.
    #[error("date '{value}' must be in DD-MM-YYYY or DD/MM/YYYY format")]
    DateFormat { value: String },

    /// Amount is zero or negative.
    #[error("amount must be greater than 0, got {amount}")]
    AmountRange { amount: Decimal },

    /// Category is too short.
    #[error("category must be at least {min} characters, got {length}")]
    CategoryLength { length: usize, min: usize },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::VendorLength { .. } => "vendor",
            ValidationError::DateFormat { .. } => "date",
            ValidationError::AmountRange { .. } => "amount",
            ValidationError::CategoryLength { .. } => "category",
        }
    }
}

/// Errors raised while turning a document into text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to extract embedded text from a PDF.
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),

    /// The file extension is not one we know how to read.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// An image was supplied but no text recognizer is configured.
    #[error("no text recognizer configured for image file {0}")]
    RecognizerUnavailable(String),

    /// The text recognizer failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
