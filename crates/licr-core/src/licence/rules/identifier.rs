//! Licence number extraction.

use super::patterns::{ID_ALPHANUMERIC, ID_NUMERIC};
use super::{DocumentText, ExtractionMatch, FieldExtractor};

/// Licence number extractor.
///
/// A nine-digit number takes priority; a 14-16 character alphanumeric card
/// number is only used when no nine-digit number exists.
pub struct IdentifierExtractor;

impl IdentifierExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentifierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdentifierExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        let (m, confidence) = match ID_NUMERIC.find(&doc.text) {
            Some(m) => (m, 0.9),
            None => (ID_ALPHANUMERIC.find(&doc.text)?, 0.7),
        };

        Some(
            ExtractionMatch::new(m.as_str().trim().to_string(), confidence, m.as_str())
                .with_position(m.start(), m.end()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str) -> Option<String> {
        IdentifierExtractor::new()
            .extract(&DocumentText::from_text(text))
            .map(|m| m.value)
    }

    #[test]
    fn test_nine_digit_preferred() {
        assert_eq!(id("P1234567ABCDEFG\nLicence No 012345678"), Some("012345678".to_string()));
    }

    #[test]
    fn test_alphanumeric_fallback() {
        assert_eq!(id("Card P1234567ABCDEFG"), Some("P1234567ABCDEFG".to_string()));
    }

    #[test]
    fn test_lengths_outside_range_ignored() {
        assert_eq!(id("12345678\n1234567890"), None);
        assert_eq!(id("ABC123"), None);
    }
}
