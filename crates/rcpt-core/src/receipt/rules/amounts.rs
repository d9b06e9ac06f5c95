//! Amount detection for receipts.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_WITH_MARKER;
use super::{FieldRule, RuleMatch};

/// Amount field detector.
///
/// Every number in the text is a candidate, with or without a rupee
/// marker. The last one is selected, on the assumption that the grand total
/// is printed after the itemized lines.
pub struct AmountRule;

impl AmountRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for AmountRule {
    /// The numeric token as written, e.g. `"1,250.50"`.
    type Output = RuleMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).pop()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_WITH_MARKER
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let number = caps.get(2)?;
                Some(
                    RuleMatch::new(number.as_str().to_string(), full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Smallest positive amount a `Decimal` can hold.
fn smallest_amount() -> Decimal {
    Decimal::new(1, 28)
}

/// Parse a numeric token, treating every comma as a thousands separator.
///
/// Values beyond `Decimal`'s 96-bit range saturate instead of failing: too
/// large becomes [`Decimal::MAX`], and a positive value too small for 28
/// decimal places becomes the smallest positive amount. `None` means the
/// token is not a number at all.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    let approx: f64 = cleaned.parse().ok()?;

    let value = match Decimal::from_str(&cleaned) {
        Ok(value) => value,
        Err(_) if approx >= 1.0 => Decimal::from_f64_retain(approx).unwrap_or(Decimal::MAX),
        Err(_) => Decimal::ZERO,
    };

    if value.is_zero() && approx > 0.0 {
        return Some(smallest_amount());
    }
    Some(value)
}

/// Detect the receipt amount, or zero when there is no usable number.
pub fn detect_amount(text: &str) -> Decimal {
    AmountRule::new()
        .extract(text)
        .and_then(|m| parse_amount(&m.value))
        .unwrap_or(Decimal::ZERO)
}
