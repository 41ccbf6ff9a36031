//! Residential address extraction.

use std::sync::Arc;

use super::library::PatternLibrary;
use super::patterns::{ADDRESS, WHITESPACE_RUN};
use super::{DocumentText, ExtractionMatch, FieldExtractor};

/// Address extractor.
///
/// Matches street tokens followed by an uppercase suburb, a two- or
/// three-letter region code and a four-digit postcode. Matches may span OCR
/// lines. Exclusion keywords are blanked out of each match before its
/// whitespace is collapsed.
pub struct AddressExtractor {
    library: Arc<PatternLibrary>,
}

impl AddressExtractor {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }

    fn clean(&self, raw: &str) -> String {
        let mut cleaned = raw.to_string();
        for keyword in &self.library.exclude_keywords {
            if cleaned.contains(keyword.as_str()) {
                cleaned = cleaned.replace(keyword.as_str(), " ");
            }
        }
        WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = ExtractionMatch<String>;

    /// All addresses joined with newlines.
    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        let all = self.extract_all(doc);
        let first = all.first()?;
        let position = first.position;

        let value = all.iter().map(|m| m.value.as_str()).collect::<Vec<_>>().join("\n");
        let source = all.iter().map(|m| m.source.as_str()).collect::<Vec<_>>().join("\n");

        let mut joined = ExtractionMatch::new(value, 0.8, source);
        joined.position = position;
        Some(joined)
    }

    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        ADDRESS
            .find_iter(&doc.text)
            .filter_map(|m| {
                let address = self.clean(m.as_str());
                if address.is_empty() {
                    return None;
                }
                Some(ExtractionMatch::new(address, 0.8, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect()
    }
}
