//! Rule-based receipt field extractor.

use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::models::config::ExtractionConfig;
use crate::models::receipt::CandidateFields;

use super::rules::{detect_amount, detect_date, detect_vendor, VendorRule};
use super::CandidateExtractor;

/// Extracts vendor, date, amount, and category candidates from receipt text.
///
/// The vendor list and the clock are fixed at construction, so the output
/// depends only on the text and the clock's current date.
#[derive(Clone)]
pub struct ReceiptExtractor {
    vendors: VendorRule,
    unknown_vendor: String,
    clock: Arc<dyn Clock>,
}

impl ReceiptExtractor {
    /// Create an extractor from configuration, using the system clock.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            vendors: VendorRule::new(config.vendors.iter().cloned()),
            unknown_vendor: config.unknown_vendor.clone(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for the date fallback.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the reference vendor list.
    pub fn with_vendors<I, S>(mut self, vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vendors = VendorRule::new(vendors);
        self
    }

    /// Reference vendor names in priority order.
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.vendors.vendors()
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl std::fmt::Debug for ReceiptExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptExtractor")
            .field("vendors", &self.vendors)
            .field("unknown_vendor", &self.unknown_vendor)
            .finish_non_exhaustive()
    }
}

impl CandidateExtractor for ReceiptExtractor {
    fn extract(&self, text: &str) -> CandidateFields {
        let vendor = detect_vendor(&self.vendors, text, &self.unknown_vendor);
        let date = detect_date(text, self.clock.today());
        let amount = detect_amount(text);

        let fields = CandidateFields {
            category: vendor.clone(),
            vendor,
            date,
            amount,
        };

        debug!(
            "Extracted vendor={} date={} amount={} from {} characters",
            fields.vendor,
            fields.date,
            fields.amount,
            text.len()
        );

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use crate::clock::FixedClock;

    fn extractor() -> ReceiptExtractor {
        ReceiptExtractor::default()
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()))
    }

    #[test]
    fn test_extract_full_receipt() {
        let fields = extractor().extract("Reliance Store Bill Date: 15-03-2024 Total Rs. 499.00");

        assert_eq!(
            fields,
            CandidateFields {
                vendor: "Reliance".to_string(),
                date: "15-03-2024".to_string(),
                amount: Decimal::new(49900, 2),
                category: "Reliance".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_defaults() {
        let fields = extractor().extract("random noise with no markers");

        assert_eq!(
            fields,
            CandidateFields {
                vendor: "Unknown".to_string(),
                date: "05-07-2024".to_string(),
                amount: Decimal::ZERO,
                category: "Unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_empty_text() {
        let fields = extractor().extract("");
        assert_eq!(fields.vendor, "Unknown");
        assert_eq!(fields.date, "05-07-2024");
        assert_eq!(fields.amount, Decimal::ZERO);
    }

    #[test]
    fn test_category_follows_vendor() {
        let fields = extractor().extract("flipkart invoice 200");
        assert_eq!(fields.vendor, "Flipkart");
        assert_eq!(fields.category, fields.vendor);
    }

    #[test]
    fn test_injected_vendors() {
        let extractor = extractor().with_vendors(["Zomato", "Swiggy"]);
        assert_eq!(
            extractor.vendors().collect::<Vec<_>>(),
            vec!["Zomato", "Swiggy"]
        );

        let fields = extractor.extract("Swiggy order, Amazon pay, Zomato coupon");
        assert_eq!(fields.vendor, "Zomato");
    }

    #[test]
    fn test_deterministic() {
        let extractor = extractor();
        let text = "Tata 01/02/2023 Item Rs 10 Item Rs 250";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_custom_unknown_vendor() {
        let config = ExtractionConfig {
            vendors: vec![],
            unknown_vendor: "Misc".to_string(),
        };
        let fields = ReceiptExtractor::new(&config).extract("Amazon 10");
        assert_eq!(fields.vendor, "Misc");
        assert_eq!(fields.category, "Misc");
    }
}
