//! Single-purpose attribute extractors: gender, licence class, height, eye colour.

use std::sync::Arc;

use super::library::PatternLibrary;
use super::patterns::{EYE_COLOR, GENDER_FEMALE, GENDER_MALE, HEIGHT};
use super::{DocumentText, ExtractionMatch, FieldExtractor};

/// Gender extractor.
///
/// Gender tokens are matched against whole lines, so a line must consist of
/// nothing but `male`/`Male`/`SexM` or `female`/`Female`/`SexF`.
pub struct GenderExtractor;

impl GenderExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Classify a single isolated token.
    pub fn classify(token: &str) -> Option<&'static str> {
        if GENDER_MALE.is_match(token) {
            Some("Male")
        } else if GENDER_FEMALE.is_match(token) {
            Some("Female")
        } else {
            None
        }
    }
}

impl Default for GenderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GenderExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        self.extract_all(doc).into_iter().next()
    }

    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        doc.lines
            .iter()
            .filter_map(|line| {
                let token = line.trim();
                Self::classify(token).map(|g| ExtractionMatch::new(g.to_string(), 0.9, token))
            })
            .collect()
    }
}

/// Licence class extractor.
///
/// Types are tried in library order and the first one present anywhere in the
/// document wins, regardless of which line it sits on.
pub struct LicenceTypeExtractor {
    library: Arc<PatternLibrary>,
}

impl LicenceTypeExtractor {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }
}

impl FieldExtractor for LicenceTypeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        self.extract_all(doc).into_iter().next()
    }

    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        self.library
            .license_types
            .iter()
            .filter_map(|license_type| {
                let line = doc
                    .lines
                    .iter()
                    .find(|line| line.contains(license_type.as_str()))?;
                Some(ExtractionMatch::new(license_type.clone(), 0.8, line.as_str()))
            })
            .collect()
    }
}

/// Height extractor (`Hgt` marker).
pub struct HeightExtractor;

impl FieldExtractor for HeightExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        let m = HEIGHT.find(&doc.text)?;
        let value = m
            .as_str()
            .replace("Hgt", "")
            .replace('"', "")
            .replace('\\', "")
            .trim()
            .to_string();

        Some(ExtractionMatch::new(value, 0.9, m.as_str()).with_position(m.start(), m.end()))
    }
}

/// Eye colour extractor (`Eyes` marker).
pub struct EyeColorExtractor;

impl FieldExtractor for EyeColorExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        let m = EYE_COLOR.find(&doc.text)?;
        let value = m.as_str().replace("Eyes", "").trim().to_string();

        Some(ExtractionMatch::new(value, 0.9, m.as_str()).with_position(m.start(), m.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<E: FieldExtractor<Output = ExtractionMatch<String>>>(
        extractor: &E,
        lines: &[&str],
    ) -> Option<String> {
        extractor
            .extract(&DocumentText::from_lines(lines.iter().copied()))
            .map(|m| m.value)
    }

    #[test]
    fn test_gender_exact_tokens() {
        let extractor = GenderExtractor::new();
        assert_eq!(value(&extractor, &["SMITH", "SexM"]), Some("Male".to_string()));
        assert_eq!(value(&extractor, &["Female"]), Some("Female".to_string()));
        assert_eq!(value(&extractor, &["  female  "]), Some("Female".to_string()));
    }

    #[test]
    fn test_gender_rejects_substrings() {
        let extractor = GenderExtractor::new();
        assert_eq!(value(&extractor, &["Sex M"]), None);
        assert_eq!(value(&extractor, &["MALE"]), None);
        assert_eq!(value(&extractor, &["Sex: Female"]), None);
    }

    #[test]
    fn test_license_type_follows_list_order() {
        let extractor = LicenceTypeExtractor::new(Arc::new(PatternLibrary::australia()));
        assert_eq!(
            value(&extractor, &["HEAVY TRUCK", "CAR DRIVER LICENCE"]),
            Some("CAR".to_string())
        );
        assert_eq!(value(&extractor, &["CLASS MOTORCYCLE"]), Some("MOTORCYCLE".to_string()));
        assert_eq!(value(&extractor, &["Driver Licence"]), None);
    }

    #[test]
    fn test_license_type_extract_all() {
        let extractor = LicenceTypeExtractor::new(Arc::new(PatternLibrary::australia()));
        let doc = DocumentText::from_lines(["TRUCK", "CAR"]);
        let all: Vec<String> = extractor.extract_all(&doc).into_iter().map(|m| m.value).collect();
        assert_eq!(all, vec!["CAR", "TRUCK"]);
    }

    #[test]
    fn test_height() {
        assert_eq!(value(&HeightExtractor, &["Hgt5'-11\""]), Some("5'-11".to_string()));
        assert_eq!(value(&HeightExtractor, &["Hgt 175"]), None);
    }

    #[test]
    fn test_eye_color() {
        assert_eq!(value(&EyeColorExtractor, &["Hgt180 EyesBLU"]), Some("BLU".to_string()));
        assert_eq!(value(&EyeColorExtractor, &["Eyes blue"]), None);
    }
}
