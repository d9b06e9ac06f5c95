//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

/// Vendors recognized out of the box, in match-priority order.
pub const DEFAULT_VENDORS: &[&str] = &["Amazon", "Flipkart", "Reliance", "Big Bazaar", "Tata"];

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Record validation configuration.
    pub validation: ValidationConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Known vendor names. Earlier entries win when several appear in the text.
    pub vendors: Vec<String>,

    /// Vendor value used when no known vendor is found.
    pub unknown_vendor: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendors: DEFAULT_VENDORS.iter().map(|v| v.to_string()).collect(),
            unknown_vendor: "Unknown".to_string(),
        }
    }
}

/// Record validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum vendor length in characters.
    pub vendor_min_len: usize,

    /// Maximum vendor length in characters.
    pub vendor_max_len: usize,

    /// Minimum category length in characters.
    pub category_min_len: usize,

    /// Accepted date formats (chrono syntax), tried in order.
    pub date_formats: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            vendor_min_len: 2,
            vendor_max_len: 50,
            category_min_len: 2,
            date_formats: vec!["%d-%m-%Y".to_string(), "%d/%m/%Y".to_string()],
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
