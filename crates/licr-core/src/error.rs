//! Error types for the licr-core library.

use thiserror::Error;

/// Main error type for the licr library.
///
/// Field extraction never fails; these errors only arise while loading OCR
/// output or configuration.
#[derive(Error, Debug)]
pub enum LicrError {
    /// OCR input could not be turned into a line sequence.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to OCR input.
#[derive(Error, Debug)]
pub enum InputError {
    /// The OCR output contained no text lines.
    #[error("no text lines in OCR output")]
    Empty,

    /// The OCR output did not have the expected shape.
    #[error("malformed OCR output: {0}")]
    Malformed(String),

    /// The input file type is not supported.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for the licr library.
pub type Result<T> = std::result::Result<T, LicrError>;
