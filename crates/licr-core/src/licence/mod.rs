//! Licence field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, LicenceParser};

use crate::models::record::LicenceRecord;
use crate::ocr::OcrResult;

/// Trait for licence field extractors.
///
/// Extraction never fails: fields that cannot be recovered keep their empty
/// value in the returned record.
pub trait LicenceExtractor {
    /// Extract licence data from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> LicenceRecord;

    /// Extract licence data from newline-separated text.
    fn extract_from_text(&self, text: &str) -> LicenceRecord;
}
