//! Receipt field models: extractor candidates and validated records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw field values derived from receipt text, before validation.
///
/// Values may be defaulted (`"Unknown"` vendor, today's date, zero amount)
/// and are not guaranteed to satisfy any record constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFields {
    /// Vendor name from the reference list, or the unknown sentinel.
    pub vendor: String,

    /// Date in `DD-MM-YYYY` form.
    pub date: String,

    /// Detected amount, zero when nothing usable was found.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Category (currently the vendor).
    pub category: String,
}

impl CandidateFields {
    /// Override the vendor.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Override the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Override the amount.
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Override the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// A receipt record that passed validation.
///
/// Only [`RecordValidator`](crate::receipt::RecordValidator) can create one,
/// so holding a value means every field satisfied its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedRecord {
    vendor: String,
    date: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: String,
}

impl ValidatedRecord {
    pub(crate) fn new(fields: CandidateFields) -> Self {
        Self {
            vendor: fields.vendor,
            date: fields.date,
            amount: fields.amount,
            category: fields.category,
        }
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Date exactly as it was accepted (`-` or `/` separated).
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Field values as candidates, e.g. for operator edits and re-validation.
    pub fn to_candidate(&self) -> CandidateFields {
        CandidateFields {
            vendor: self.vendor.clone(),
            date: self.date.clone(),
            amount: self.amount,
            category: self.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate() -> CandidateFields {
        CandidateFields {
            vendor: "Tata".to_string(),
            date: "01-02-2023".to_string(),
            amount: Decimal::new(4999, 2),
            category: "Tata".to_string(),
        }
    }

    #[test]
    fn test_overrides() {
        let fields = candidate()
            .with_vendor("Amazon")
            .with_amount(Decimal::new(10, 0))
            .with_category("Shopping");

        assert_eq!(fields.vendor, "Amazon");
        assert_eq!(fields.date, "01-02-2023");
        assert_eq!(fields.amount, Decimal::new(10, 0));
        assert_eq!(fields.category, "Shopping");
    }

    #[test]
    fn test_record_serializes_four_fields() {
        let record = ValidatedRecord::new(candidate());
        let json = serde_json::to_value(&record).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["vendor"], "Tata");
        assert_eq!(object["date"], "01-02-2023");
        assert_eq!(object["category"], "Tata");
        assert_eq!(object["amount"].as_f64(), Some(49.99));
    }

    #[test]
    fn test_candidate_amount_is_a_json_number() {
        let json = serde_json::to_string(&candidate()).unwrap();
        assert!(json.contains(r#""amount":49.99"#), "{json}");

        let back: CandidateFields = serde_json::from_str(&json).unwrap();
        assert_eq!(back, candidate());
    }

    #[test]
    fn test_record_round_trips_to_candidate() {
        let record = ValidatedRecord::new(candidate());
        assert_eq!(record.to_candidate(), candidate());
    }
}
