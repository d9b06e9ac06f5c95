//! Vendor detection against a reference list of known names.

use super::{FieldRule, RuleMatch};

/// Vendor detector.
///
/// Matching is a case-insensitive substring test. When several vendors
/// appear in the text, the one listed first wins, regardless of where each
/// occurs in the text.
#[derive(Debug, Clone)]
pub struct VendorRule {
    /// Reference names paired with their lower-cased form.
    vendors: Vec<(String, String)>,
}

impl VendorRule {
    /// Create a detector for the given vendors, keeping their order.
    ///
    /// Blank entries are dropped since they would match any text.
    pub fn new<I, S>(vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vendors = vendors
            .into_iter()
            .map(Into::into)
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                let lowered = v.to_lowercase();
                (v, lowered)
            })
            .collect();

        Self { vendors }
    }

    /// Reference names in priority order.
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.vendors.iter().map(|(name, _)| name.as_str())
    }
}

impl FieldRule for VendorRule {
    type Output = RuleMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let haystack = text.to_lowercase();

        self.vendors
            .iter()
            .filter_map(|(name, lowered)| {
                haystack.find(lowered.as_str()).map(|start| {
                    RuleMatch::new(name.clone(), &haystack[start..start + lowered.len()])
                })
            })
            .collect()
    }
}

/// Detect the vendor in `text`, falling back to `unknown`.
pub fn detect_vendor(rule: &VendorRule, text: &str, unknown: &str) -> String {
    rule.extract(text)
        .map(|m| m.value)
        .unwrap_or_else(|| unknown.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_order_wins_over_text_order() {
        let rule = VendorRule::new(["Amazon", "Flipkart"]);
        assert_eq!(detect_vendor(&rule, "Flipkart Amazon", "Unknown"), "Amazon");
    }

    #[test]
    fn test_case_insensitive_match_keeps_reference_spelling() {
        let rule = VendorRule::new(["Big Bazaar"]);
        assert_eq!(
            detect_vendor(&rule, "WELCOME TO BIG BAZAAR, MUMBAI", "Unknown"),
            "Big Bazaar"
        );
    }

    #[test]
    fn test_substring_match() {
        let rule = VendorRule::new(["Tata"]);
        assert_eq!(detect_vendor(&rule, "TataCliq order", "Unknown"), "Tata");
    }

    #[test]
    fn test_unknown_fallback() {
        let rule = VendorRule::new(["Amazon"]);
        assert_eq!(detect_vendor(&rule, "corner shop", "Unknown"), "Unknown");
        assert_eq!(detect_vendor(&rule, "", "Unknown"), "Unknown");
    }

    #[test]
    fn test_blank_entries_ignored() {
        let rule = VendorRule::new(["", "  ", "Reliance"]);
        assert_eq!(rule.vendors().collect::<Vec<_>>(), vec!["Reliance"]);
        assert_eq!(detect_vendor(&rule, "anything", "Unknown"), "Unknown");
    }

    #[test]
    fn test_extract_all_in_list_order() {
        let rule = VendorRule::new(["Amazon", "Flipkart", "Tata"]);
        let matches = rule.extract_all("tata then flipkart");

        let names: Vec<_> = matches.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(names, vec!["Flipkart", "Tata"]);
        assert_eq!(matches[0].source, "flipkart");
    }
}
