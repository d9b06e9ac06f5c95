//! Search, ordering, and spending statistics over accepted records.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::receipt::ValidatedRecord;

/// Record ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Largest amount first.
    Amount,
    /// Most recent first.
    Date,
    /// Alphabetical by vendor.
    Vendor,
}

/// Aggregate spending figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    /// Number of records.
    pub count: usize,
    /// Sum of all amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Average amount, zero for no records.
    #[serde(with = "rust_decimal::serde::float")]
    pub mean: Decimal,
    /// Most frequent vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_vendor: Option<String>,
}

/// Records whose vendor contains `query`, ignoring case.
pub fn search<'a>(records: &'a [ValidatedRecord], query: &str) -> Vec<&'a ValidatedRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.vendor().to_lowercase().contains(&query))
        .collect()
}

/// Sort records in place by `key`. The sort is stable.
pub fn sort(records: &mut [ValidatedRecord], key: SortKey) {
    match key {
        SortKey::Amount => records.sort_by_key(|r| Reverse(r.amount())),
        SortKey::Date => records.sort_by_key(|r| Reverse(calendar_date(r.date()))),
        SortKey::Vendor => records.sort_by(|a, b| a.vendor().cmp(b.vendor())),
    }
}

/// Total, mean, and most frequent vendor.
pub fn statistics(records: &[ValidatedRecord]) -> LedgerStats {
    let count = records.len();
    let total: Decimal = records.iter().map(|r| r.amount()).sum();
    let mean = if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    };

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *frequency.entry(record.vendor()).or_default() += 1;
    }

    // Highest count, then alphabetically first
    let top_vendor = frequency
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(vendor, _)| vendor.to_string());

    LedgerStats {
        count,
        total,
        mean,
        top_vendor,
    }
}

fn calendar_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(date, "%d/%m/%Y"))
        .ok()
}
