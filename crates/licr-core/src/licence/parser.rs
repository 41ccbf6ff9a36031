//! Extraction pipeline assembling a licence record from OCR lines.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::LicenceRecord;
use crate::ocr::OcrResult;

use super::rules::{
    dates::extract_dates_detailed, AddressExtractor, DocumentText, ExtractionMatch,
    EyeColorExtractor, FieldExtractor, GenderExtractor, HeightExtractor, IdentifierExtractor,
    LicenceTypeExtractor, NameExtractor, PatternLibrary, PostcodeExtractor, RegionExtractor,
};
use super::LicenceExtractor;

/// Result of licence extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted licence record.
    pub record: LicenceRecord,
    /// One entry per field that could not be extracted.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Runs every field extractor over one OCR line sequence.
///
/// The parser holds no per-document state, so one instance can serve any
/// number of documents concurrently.
pub struct LicenceParser {
    library: Arc<PatternLibrary>,
    name: NameExtractor,
    license_type: LicenceTypeExtractor,
    region: RegionExtractor,
    postcode: PostcodeExtractor,
    address: AddressExtractor,
    /// Re-sort OCR boxes before extraction.
    sort_reading_order: bool,
    /// Minimum recognition score for OCR boxes.
    min_recognition_score: f32,
}

impl LicenceParser {
    /// Create a parser sharing the given vocabulary.
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self {
            name: NameExtractor::new(library.clone()),
            license_type: LicenceTypeExtractor::new(library.clone()),
            region: RegionExtractor::new(library.clone()),
            postcode: PostcodeExtractor::new(library.clone()),
            address: AddressExtractor::new(library.clone()),
            library,
            sort_reading_order: false,
            min_recognition_score: 0.0,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(Arc::new(config.patterns.clone()))
            .with_reading_order(config.sort_reading_order)
            .with_min_recognition_score(config.min_recognition_score)
    }

    /// Set whether OCR boxes are re-sorted into reading order.
    pub fn with_reading_order(mut self, sort: bool) -> Self {
        self.sort_reading_order = sort;
        self
    }

    /// Set the minimum OCR recognition score.
    pub fn with_min_recognition_score(mut self, score: f32) -> Self {
        self.min_recognition_score = score;
        self
    }

    /// The vocabulary this parser was built with.
    pub fn library(&self) -> &Arc<PatternLibrary> {
        &self.library
    }

    /// Extract a licence record from an OCR line sequence.
    pub fn parse(&self, lines: &[String]) -> ExtractionResult {
        let start = Instant::now();

        info!("Extracting licence fields from {} OCR lines", lines.len());

        let doc = DocumentText::new(lines.to_vec());
        let mut record = LicenceRecord::new(lines.to_vec());

        record.name = value(&self.name, &doc).unwrap_or_default();
        record.id = value(&IdentifierExtractor, &doc).unwrap_or_default();

        let dates = extract_dates_detailed(&doc.text);
        record.expiry_date = dates.expiry_date.map(|m| m.value);
        record.dob = dates.dob.map(|m| m.value);
        record.issue_date = dates.issue_date.map(|m| m.value);

        record.gender = value(&GenderExtractor, &doc).unwrap_or_default();
        record.license_type = value(&self.license_type, &doc).unwrap_or_default();
        record.height = value(&HeightExtractor, &doc).unwrap_or_default();
        record.eyes_color = value(&EyeColorExtractor, &doc).unwrap_or_default();
        record.address = value(&self.address, &doc).unwrap_or_default();
        record.issuing_state = value(&self.region, &doc);
        record.post_code = value(&self.postcode, &doc);

        let missing = record.missing_fields();
        debug!(
            "Extracted {} of {} fields, missing: {:?}",
            LicenceRecord::FIELD_NAMES.len() - 1 - missing.len(),
            LicenceRecord::FIELD_NAMES.len() - 1,
            missing
        );

        let warnings = missing
            .iter()
            .map(|field| format!("could not extract {}", field))
            .collect();

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Apply score filtering and ordering, then extract.
    pub fn parse_ocr(&self, ocr_result: &OcrResult) -> ExtractionResult {
        let mut ocr_result = ocr_result.clone();
        if self.min_recognition_score > 0.0 {
            ocr_result.filter_by_score(self.min_recognition_score);
        }
        if self.sort_reading_order {
            ocr_result.sort_by_reading_order();
        }
        self.parse(&ocr_result.lines())
    }
}

impl Default for LicenceParser {
    fn default() -> Self {
        Self::new(Arc::new(PatternLibrary::default()))
    }
}

impl LicenceExtractor for LicenceParser {
    fn extract(&self, ocr_result: &OcrResult) -> LicenceRecord {
        self.parse_ocr(ocr_result).record
    }

    fn extract_from_text(&self, text: &str) -> LicenceRecord {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.parse(&lines).record
    }
}

fn value<E>(extractor: &E, doc: &DocumentText) -> Option<String>
where
    E: FieldExtractor<Output = ExtractionMatch<String>>,
{
    extractor.extract(doc).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_licence() -> Vec<String> {
        lines(&[
            "DRIVER LICENCE",
            "SMITH",
            "JOHN ROBERT",
            "12 MAIN ST",
            "RICHMOND VIC 3121",
            "LICENCE NO 012345678",
            "10-05-1990, DATE OF BIRTH",
            "ISSUED 01-02-2020",
            "LICENCE EXPIRY 01-02-2030",
            "CAR",
            "SexM",
            "Hgt180 EyesBRN",
        ])
    }

    #[test]
    fn test_parse_full_licence() {
        let input = sample_licence();
        let result = LicenceParser::default().parse(&input);

        let expected = LicenceRecord {
            name: "SMITH JOHN".to_string(),
            expiry_date: Some("01-02-2030".to_string()),
            dob: Some("10-05-1990".to_string()),
            issue_date: Some("01-02-2020".to_string()),
            gender: "Male".to_string(),
            address: "12 MAIN ST RICHMOND VIC 3121".to_string(),
            id: "012345678".to_string(),
            height: "180".to_string(),
            eyes_color: "BRN".to_string(),
            license_type: "CAR".to_string(),
            issuing_state: Some("VIC".to_string()),
            post_code: Some("3121".to_string()),
            extracted_text: input.clone(),
        };

        assert_eq!(result.record, expected);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_input_yields_complete_record() {
        let result = LicenceParser::default().parse(&[]);

        assert_eq!(result.record, LicenceRecord::default());
        assert_eq!(result.warnings.len(), 12);

        let json = serde_json::to_value(&result.record).unwrap();
        assert_eq!(json.as_object().unwrap().len(), LicenceRecord::FIELD_NAMES.len());
    }

    #[test]
    fn test_labeled_dob_with_positional_expiry() {
        let input = lines(&["10-05-1990, DATE OF BIRTH", "20-06-2025"]);
        let record = LicenceParser::default().parse(&input).record;

        assert_eq!(record.dob.as_deref(), Some("10-05-1990"));
        assert_eq!(record.expiry_date.as_deref(), Some("20-06-2025"));
        assert_eq!(record.issue_date, None);
    }

    #[test]
    fn test_postcode_anchored_to_region() {
        let input = lines(&["MELBOURNE VIC 3000", "DOB 1990", "4120"]);
        let record = LicenceParser::default().parse(&input).record;

        assert_eq!(record.issuing_state.as_deref(), Some("VIC"));
        assert_eq!(record.post_code.as_deref(), Some("3000"));
    }

    #[test]
    fn test_license_type_by_list_order() {
        let input = lines(&["HEAVY TRUCK", "CAR DRIVER LICENCE"]);
        let record = LicenceParser::default().parse(&input).record;
        assert_eq!(record.license_type, "CAR");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let parser = LicenceParser::default();
        let input = sample_licence();

        let first = parser.parse(&input).record;
        let second = parser.parse(&input).record;
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_parser_shared_across_threads() {
        let parser = Arc::new(LicenceParser::default());
        let expected = parser.parse(&sample_licence()).record;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = Arc::clone(&parser);
                std::thread::spawn(move || parser.parse(&sample_licence()).record)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_custom_jurisdiction() {
        let mut library = PatternLibrary::australia();
        library.region_codes = vec!["ON".to_string(), "QC".to_string()];
        library.license_types = vec!["G2".to_string(), "G".to_string()];
        let parser = LicenceParser::new(Arc::new(library));

        let input = lines(&["CLASS G", "TORONTO ON 4321"]);
        let record = parser.parse(&input).record;

        assert_eq!(record.issuing_state.as_deref(), Some("ON"));
        assert_eq!(record.post_code.as_deref(), Some("4321"));
        assert_eq!(record.license_type, "G");
    }

    #[test]
    fn test_extract_from_ocr_result_applies_config() {
        let json = r#"[[
            [[[0, 40], [100, 40], [100, 60], [0, 60]], ["JOHN", 0.95]],
            [[[0, 0], [100, 0], [100, 20], [0, 20]], ["SMITH", 0.99]],
            [[[0, 80], [100, 80], [100, 100], [0, 100]], ["SexF", 0.2]]
        ]]"#;
        let ocr = OcrResult::from_paddle_json(json).unwrap();

        let mut config = ExtractionConfig::default();
        config.sort_reading_order = true;
        config.min_recognition_score = 0.5;
        let parser = LicenceParser::from_config(&config);

        let record = parser.extract(&ocr);
        assert_eq!(record.name, "SMITH JOHN");
        assert_eq!(record.gender, "");
        assert_eq!(record.extracted_text, vec!["SMITH", "JOHN"]);

        let unsorted = LicenceParser::default().extract(&ocr);
        assert_eq!(unsorted.name, "JOHN SMITH");
        assert_eq!(unsorted.gender, "Female");
    }

    #[test]
    fn test_extract_from_text() {
        let record = LicenceParser::default().extract_from_text("SMITH\nJOHN\nSexF");
        assert_eq!(record.name, "SMITH JOHN");
        assert_eq!(record.gender, "Female");
    }
}
