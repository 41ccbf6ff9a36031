//! Core library for driver licence OCR processing.
//!
//! This crate provides:
//! - An OCR input model (recognized text boxes and line sequences)
//! - A configurable pattern library (licence types, exclusion keywords, region codes)
//! - Heuristic field extractors (name, dates, gender, address, identifiers, region, postcode)
//! - An extraction pipeline assembling a fixed-shape licence record

pub mod error;
pub mod models;
pub mod ocr;
pub mod licence;

pub use error::{LicrError, InputError, Result};
pub use models::config::LicrConfig;
pub use models::record::LicenceRecord;
pub use ocr::{OcrResult, TextBox};
pub use licence::{ExtractionResult, LicenceExtractor, LicenceParser};
pub use licence::rules::PatternLibrary;
