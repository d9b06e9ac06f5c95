//! Record validation.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::config::ValidationConfig;
use crate::models::receipt::{CandidateFields, ValidatedRecord};

/// Checks candidate fields and turns them into a [`ValidatedRecord`].
///
/// Fields are checked in the order vendor, date, amount, category and the
/// first violation is returned. Accepted values are stored unchanged.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    config: ValidationConfig,
    /// One entry per configured date format, with the exact text shape it
    /// accepts. chrono alone is lenient about year width and sign.
    date_shapes: Vec<(String, Option<Regex>)>,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::with_config(ValidationConfig::default())
    }
}

impl RecordValidator {
    /// Create a validator with the default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom bounds.
    pub fn with_config(config: ValidationConfig) -> Self {
        let date_shapes = config
            .date_formats
            .iter()
            .map(|format| (format.clone(), date_shape(format)))
            .collect();
        Self {
            config,
            date_shapes,
        }
    }

    /// Validate candidate fields.
    pub fn validate(&self, fields: CandidateFields) -> Result<ValidatedRecord, ValidationError> {
        self.check_vendor(&fields.vendor)?;
        self.check_date(&fields.date)?;
        check_amount(fields.amount)?;
        self.check_category(&fields.category)?;

        Ok(ValidatedRecord::new(fields))
    }

    fn check_vendor(&self, vendor: &str) -> Result<(), ValidationError> {
        let length = vendor.chars().count();
        let (min, max) = (self.config.vendor_min_len, self.config.vendor_max_len);

        if length < min || length > max {
            return Err(ValidationError::VendorLength { length, min, max });
        }
        Ok(())
    }

    fn check_date(&self, date: &str) -> Result<(), ValidationError> {
        let parses = self.date_shapes.iter().any(|(format, shape)| {
            shape.as_ref().is_none_or(|re| re.is_match(date))
                && NaiveDate::parse_from_str(date, format).is_ok()
        });

        if !parses {
            return Err(ValidationError::DateFormat {
                value: date.to_string(),
            });
        }
        Ok(())
    }

    fn check_category(&self, category: &str) -> Result<(), ValidationError> {
        let length = category.chars().count();
        let min = self.config.category_min_len;

        if length < min {
            return Err(ValidationError::CategoryLength { length, min });
        }
        Ok(())
    }
}

/// Anchored regex for the text a chrono date format may match: `%d` and
/// `%m` take two ASCII digits, `%Y` four and `%y` two. Other specifiers
/// fall back to chrono's own parsing.
fn date_shape(format: &str) -> Option<Regex> {
    let mut pattern = String::from("^");
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            continue;
        }
        match chars.next()? {
            'd' | 'm' | 'y' => pattern.push_str("[0-9]{2}"),
            'Y' => pattern.push_str("[0-9]{4}"),
            '%' => pattern.push('%'),
            _ => return None,
        }
    }

    pattern.push('$');
    Regex::new(&pattern).ok()
}

fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountRange { amount });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn fields() -> CandidateFields {
        CandidateFields {
            vendor: "Reliance".to_string(),
            date: "15-03-2024".to_string(),
            amount: Decimal::new(49900, 2),
            category: "Reliance".to_string(),
        }
    }

    fn validate(fields: CandidateFields) -> Result<ValidatedRecord, ValidationError> {
        RecordValidator::new().validate(fields)
    }

    #[test]
    fn test_valid_record_is_unchanged() {
        let record = validate(fields()).unwrap();
        assert_eq!(record.vendor(), "Reliance");
        assert_eq!(record.date(), "15-03-2024");
        assert_eq!(record.amount(), Decimal::new(49900, 2));
        assert_eq!(record.category(), "Reliance");
    }

    #[test]
    fn test_vendor_bounds() {
        assert!(validate(fields().with_vendor("Ab")).is_ok());
        assert!(validate(fields().with_vendor("A".repeat(50))).is_ok());

        assert_eq!(
            validate(fields().with_vendor("A")).unwrap_err(),
            ValidationError::VendorLength { length: 1, min: 2, max: 50 }
        );
        assert_eq!(
            validate(fields().with_vendor("A".repeat(51))).unwrap_err(),
            ValidationError::VendorLength { length: 51, min: 2, max: 50 }
        );
    }

    #[test]
    fn test_vendor_length_counts_characters() {
        assert!(validate(fields().with_vendor("ñé")).is_ok());
    }

    #[test]
    fn test_date_formats() {
        let record = validate(fields().with_date("15/03/2024")).unwrap();
        assert_eq!(record.date(), "15/03/2024");

        for bad in [
            "2024-03-15",
            "15.03.2024",
            "31-02-2024",
            "",
            "today",
            "15-03-24",
            "15/03/24",
            "15-03-+2024",
            "15-03-02024",
            "15-03-2024 ",
            "5-3-2024",
        ] {
            assert_eq!(
                validate(fields().with_date(bad)).unwrap_err(),
                ValidationError::DateFormat { value: bad.to_string() },
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_date_shape() {
        assert!(date_shape("%d-%m-%Y").unwrap().is_match("15-03-2024"));
        assert!(!date_shape("%d-%m-%Y").unwrap().is_match("15-03-20245"));
        assert!(date_shape("%d.%m.%y").unwrap().is_match("15.03.24"));
        assert!(!date_shape("%d.%m.%y").unwrap().is_match("15x03x24"));
        assert!(date_shape("%d %b %Y").is_none());
    }

    #[test]
    fn test_custom_date_formats() {
        let validator = RecordValidator::with_config(ValidationConfig {
            date_formats: vec!["%Y-%m-%d".to_string(), "%d %b %Y".to_string()],
            ..ValidationConfig::default()
        });
        assert!(validator.validate(fields().with_date("2024-03-15")).is_ok());
        assert!(validator.validate(fields().with_date("15 Mar 2024")).is_ok());
        assert!(validator.validate(fields().with_date("+2024-03-15")).is_err());
        assert!(validator.validate(fields()).is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(validate(fields().with_amount(Decimal::from_str("0.01").unwrap())).is_ok());

        assert_eq!(
            validate(fields().with_amount(Decimal::ZERO)).unwrap_err(),
            ValidationError::AmountRange { amount: Decimal::ZERO }
        );
        assert_eq!(
            validate(fields().with_amount(Decimal::new(-5, 0))).unwrap_err().field(),
            "amount"
        );
    }

    #[test]
    fn test_category_bounds() {
        assert!(validate(fields().with_category("Fo")).is_ok());
        assert!(validate(fields().with_category("F".repeat(200))).is_ok());
        assert_eq!(
            validate(fields().with_category("F")).unwrap_err(),
            ValidationError::CategoryLength { length: 1, min: 2 }
        );
    }

    #[test]
    fn test_first_violation_reported() {
        let all_bad = CandidateFields {
            vendor: "X".to_string(),
            date: "nope".to_string(),
            amount: Decimal::ZERO,
            category: "".to_string(),
        };
        assert_eq!(validate(all_bad.clone()).unwrap_err().field(), "vendor");
        assert_eq!(
            validate(all_bad.clone().with_vendor("Tata")).unwrap_err().field(),
            "date"
        );
        assert_eq!(
            validate(all_bad.with_vendor("Tata").with_date("01-01-2024"))
                .unwrap_err()
                .field(),
            "amount"
        );
    }

    #[test]
    fn test_revalidation_succeeds() {
        let record = validate(fields().with_date("01/02/2023")).unwrap();
        let again = validate(record.to_candidate()).unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn test_custom_bounds() {
        let validator = RecordValidator::with_config(ValidationConfig {
            vendor_max_len: 5,
            ..ValidationConfig::default()
        });
        assert!(validator.validate(fields().with_vendor("Tata")).is_ok());
        assert!(validator.validate(fields()).is_err());
    }
}
