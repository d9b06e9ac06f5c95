//! Extraction followed by validation, per document and per batch.

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::{RcptError, ValidationError};
use crate::models::config::RcptConfig;
use crate::models::receipt::{CandidateFields, ValidatedRecord};
use crate::source::{Document, DocumentLoader};

use super::{CandidateExtractor, ReceiptExtractor, RecordValidator};

/// What happened to one document.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Document (file) name.
    pub name: String,
    /// Extracted fields, absent when the document could not be read.
    pub candidate: Option<CandidateFields>,
    /// The accepted record, or why the document could not be processed.
    pub result: Result<ValidatedRecord, RcptError>,
}

impl DocumentOutcome {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }

    pub fn record(&self) -> Option<&ValidatedRecord> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&RcptError> {
        self.result.as_ref().err()
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
    /// Wall time for the whole batch.
    pub processing_time_ms: u64,
}

impl BatchReport {
    pub fn accepted(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| o.is_accepted())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_accepted())
    }

    /// Accepted records, in input order.
    pub fn records(&self) -> Vec<ValidatedRecord> {
        self.outcomes.iter().filter_map(|o| o.record().cloned()).collect()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }
}

/// Runs the extractor and validator over receipt text.
#[derive(Debug, Clone, Default)]
pub struct ReceiptPipeline<E = ReceiptExtractor> {
    extractor: E,
    validator: RecordValidator,
}

impl ReceiptPipeline<ReceiptExtractor> {
    /// Build a pipeline from configuration, using the system clock.
    pub fn from_config(config: &RcptConfig) -> Self {
        Self::new(
            ReceiptExtractor::new(&config.extraction),
            RecordValidator::with_config(config.validation.clone()),
        )
    }
}

impl<E: CandidateExtractor> ReceiptPipeline<E> {
    pub fn new(extractor: E, validator: RecordValidator) -> Self {
        Self {
            extractor,
            validator,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn validator(&self) -> &RecordValidator {
        &self.validator
    }

    /// Extract candidate fields without validating them.
    pub fn extract(&self, text: &str) -> CandidateFields {
        self.extractor.extract(text)
    }

    /// Extract and validate.
    pub fn process(&self, text: &str) -> Result<ValidatedRecord, ValidationError> {
        self.validator.validate(self.extractor.extract(text))
    }

    /// Process one document, logging a rejection against its name.
    pub fn process_document(&self, document: &Document) -> DocumentOutcome {
        info!(
            "Processing {} ({} characters)",
            document.name,
            document.text.len()
        );

        let candidate = self.extractor.extract(&document.text);
        let result = self.validator.validate(candidate.clone());

        if let Err(e) = &result {
            warn!("Could not process {}: {}", document.name, e);
        }

        DocumentOutcome {
            name: document.name.clone(),
            candidate: Some(candidate),
            result: result.map_err(RcptError::from),
        }
    }

    /// Process documents independently; a rejection never stops the batch.
    pub fn process_batch<I>(&self, documents: I) -> BatchReport
    where
        I: IntoIterator<Item = Document>,
    {
        let start = Instant::now();
        let outcomes = documents
            .into_iter()
            .map(|doc| self.process_document(&doc))
            .collect();

        finish(outcomes, start)
    }

    /// Load and process files; unreadable files are reported like rejections.
    pub fn process_files<I, P>(&self, loader: &DocumentLoader, paths: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let start = Instant::now();
        let outcomes = paths
            .into_iter()
            .map(|path| self.process_path(loader, path.as_ref()))
            .collect();

        finish(outcomes, start)
    }

    /// Load and process a single file; a read failure becomes the outcome.
    pub fn process_path(&self, loader: &DocumentLoader, path: &Path) -> DocumentOutcome {
        match loader.load(path) {
            Ok(doc) => self.process_document(&doc),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                DocumentOutcome {
                    name: path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or_default()
                        .to_string(),
                    candidate: None,
                    result: Err(e.into()),
                }
            }
        }
    }
}

fn finish(outcomes: Vec<DocumentOutcome>, start: Instant) -> BatchReport {
    let report = BatchReport {
        outcomes,
        processing_time_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Batch finished: {} accepted, {} rejected",
        report.accepted_count(),
        report.rejected_count()
    );

    report
}
