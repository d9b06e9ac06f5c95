//! Regex patterns for receipt field detection.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD-MM-YYYY or DD/MM/YYYY, separators may be mixed
    pub static ref DATE_DMY: Regex = Regex::new(
        r"[0-9]{2}[/-][0-9]{2}[/-][0-9]{4}"
    ).unwrap();

    // Optional rupee marker, then ASCII digits with comma groups of any
    // size (1,250.50 and 1,25,000.00 alike) and an optional decimal part
    pub static ref AMOUNT_WITH_MARKER: Regex = Regex::new(
        r"(?i)(₹|Rs\.?|INR)?\s*([0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?)"
    ).unwrap();
}
