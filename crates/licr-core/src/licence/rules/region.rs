//! Issuing region and postcode extraction.

use std::sync::Arc;

use super::library::PatternLibrary;
use super::patterns::{region_postcode, FOUR_DIGITS};
use super::{DocumentText, ExtractionMatch, FieldExtractor};

/// Issuing region extractor.
///
/// Region codes are searched as plain substrings in library priority order.
pub struct RegionExtractor {
    library: Arc<PatternLibrary>,
}

impl RegionExtractor {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }
}

impl FieldExtractor for RegionExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        self.extract_all(doc).into_iter().next()
    }

    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        self.library
            .region_codes
            .iter()
            .filter_map(|code| {
                let start = doc.text.find(code.as_str())?;
                Some(
                    ExtractionMatch::new(code.clone(), 0.7, code.as_str())
                        .with_position(start, start + code.len()),
                )
            })
            .collect()
    }
}

/// Postcode extractor.
///
/// A four-digit group right after the issuing region code wins. Otherwise the
/// last standalone four-digit token that does not look like a year
/// (`19xx`/`20xx`) is taken, since postcodes sit late on the card.
pub struct PostcodeExtractor {
    regions: RegionExtractor,
}

impl PostcodeExtractor {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self {
            regions: RegionExtractor::new(library),
        }
    }

    fn after_region(&self, doc: &DocumentText) -> Option<ExtractionMatch<String>> {
        let region = self.regions.extract(doc)?;
        let caps = region_postcode(&region.value).captures(&doc.text)?;
        let code = caps.get(1)?;
        let full_match = caps.get(0)?;

        Some(
            ExtractionMatch::new(code.as_str().to_string(), 0.9, full_match.as_str())
                .with_position(code.start(), code.end()),
        )
    }
}

impl FieldExtractor for PostcodeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        if let Some(found) = self.after_region(doc) {
            return Some(found);
        }
        self.extract_all(doc).pop()
    }

    /// Standalone non-year four-digit tokens, in document order.
    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        FOUR_DIGITS
            .find_iter(&doc.text)
            .filter(|m| !m.as_str().starts_with("19") && !m.as_str().starts_with("20"))
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), 0.5, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Arc<PatternLibrary> {
        Arc::new(PatternLibrary::australia())
    }

    fn region(text: &str) -> Option<String> {
        RegionExtractor::new(library())
            .extract(&DocumentText::from_text(text))
            .map(|m| m.value)
    }

    fn postcode(text: &str) -> Option<String> {
        PostcodeExtractor::new(library())
            .extract(&DocumentText::from_text(text))
            .map(|m| m.value)
    }

    #[test]
    fn test_region_priority_order() {
        assert_eq!(region("MELBOURNE VIC 3000"), Some("VIC".to_string()));
        assert_eq!(region("PERTH WA 6000\nQLD"), Some("QLD".to_string()));
        assert_eq!(region("no code here"), None);
    }

    #[test]
    fn test_region_is_a_substring_search() {
        // Codes are not word-bounded.
        assert_eq!(region("SANDRA"), Some("SA".to_string()));
    }

    #[test]
    fn test_postcode_after_region() {
        let text = "JOHN ROW\nMELBOURNE VIC 3000\nDOB 1990\n4120";
        assert_eq!(postcode(text), Some("3000".to_string()));
    }

    #[test]
    fn test_postcode_fallback_takes_last_non_year() {
        assert_eq!(postcode("1985\n4120\n2019\n0870\n1999"), Some("0870".to_string()));
    }

    #[test]
    fn test_postcode_falls_back_when_region_has_no_digits() {
        assert_eq!(postcode("VIC\nPOSTCODE 4120"), Some("4120".to_string()));
    }

    #[test]
    fn test_postcode_absent() {
        assert_eq!(postcode("1990\n2024"), None);
        assert_eq!(postcode("12345"), None);
    }
}
