//! Core library for receipt processing.
//!
//! This crate provides:
//! - Document loading (plain text, embedded PDF text, pluggable image recognition)
//! - Receipt field extraction (vendor, date, amount, category)
//! - Record validation with one precise error per rejected document
//! - Search, sorting, and statistics over accepted records

pub mod clock;
pub mod error;
pub mod ledger;
pub mod models;
pub mod receipt;
pub mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RcptError, Result, SourceError, ValidationError};
pub use ledger::{LedgerStats, SortKey};
pub use models::config::RcptConfig;
pub use models::receipt::{CandidateFields, ValidatedRecord};
pub use receipt::{
    BatchReport, CandidateExtractor, DocumentOutcome, ReceiptExtractor, ReceiptPipeline,
    RecordValidator,
};
pub use source::{Document, DocumentLoader, SourceKind, TextRecognizer};
