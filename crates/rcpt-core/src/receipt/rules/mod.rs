//! Rule-based field detectors for receipt text.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod vendors;

pub use amounts::{detect_amount, parse_amount, AmountRule};
pub use dates::{detect_date, DateRule, CANONICAL_DATE_FORMAT};
pub use patterns::*;
pub use vendors::{detect_vendor, VendorRule};

/// Trait for single-field detectors.
pub trait FieldRule {
    /// The type of value this rule produces.
    type Output;

    /// The match this rule selects from the text, if any.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// All matches in the order the rule considers them.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A detected value together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<T> {
    /// Detected value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> RuleMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
