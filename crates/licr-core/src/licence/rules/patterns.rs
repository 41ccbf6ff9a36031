//! Common regex patterns for licence field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dates (DD-MM-YYYY)
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2}-\d{2}-\d{4})\b"
    ).unwrap();

    // Looser date shape found inside noisy issue labels
    pub static ref DATE_LOOSE: Regex = Regex::new(
        r"\d{2}[-/]\d{2}[-/]\d{4}"
    ).unwrap();

    // Labeled dates
    pub static ref DOB_LABELED: Regex = Regex::new(
        r"(?i)\b(\d{2}-\d{2}-\d{4})\s*,*\s*DATE\s*O?F?\s*BIRTH\b"
    ).unwrap();

    pub static ref ISSUED_LABELED: Regex = Regex::new(
        r"(?i)\bISSUED\s*(\d{2}-\d{2}-\d{4})"
    ).unwrap();

    pub static ref ISS_NOISY: Regex = Regex::new(
        r"(?i)ISS\s*([\d/-]+)"
    ).unwrap();

    pub static ref EXPIRY_LABELED: Regex = Regex::new(
        r"(?i)\bLICENCE\s*EXPIRY\s*(\d{2}-\d{2}-\d{4})"
    ).unwrap();

    // Name lines: uppercase letters and whitespace only
    pub static ref UPPERCASE_LINE: Regex = Regex::new(
        r"^[A-Z\s]+$"
    ).unwrap();

    // Gender tokens
    pub static ref GENDER_MALE: Regex = Regex::new(
        r"^(male|Male|SexM)$"
    ).unwrap();

    pub static ref GENDER_FEMALE: Regex = Regex::new(
        r"^(female|Female|SexF)$"
    ).unwrap();

    // Physical attributes
    pub static ref HEIGHT: Regex = Regex::new(
        r#"Hgt[\d'\-"]+"#
    ).unwrap();

    pub static ref EYE_COLOR: Regex = Regex::new(
        r"Eyes[A-Z]+"
    ).unwrap();

    // Street tokens, suburb, region code, postcode
    pub static ref ADDRESS: Regex = Regex::new(
        r"\b[A-Z0-9]+\s*[A-Z0-9]*\s*[A-Z]+\s+[A-Z]+\s+[A-Z]{2,3}\s+\d{4}\b"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Standalone four-digit tokens (postcode candidates)
    pub static ref FOUR_DIGITS: Regex = Regex::new(
        r"\b\d{4}\b"
    ).unwrap();

    // Licence numbers
    pub static ref ID_NUMERIC: Regex = Regex::new(
        r"\b[0-9]{9}\b"
    ).unwrap();

    pub static ref ID_ALPHANUMERIC: Regex = Regex::new(
        r"\b[A-Z0-9]{14,16}\b"
    ).unwrap();
}

/// Build the pattern for a region code followed by a four-digit postcode.
pub fn region_postcode(region: &str) -> Regex {
    Regex::new(&format!(r"{}\s+(\d{{4}})", regex::escape(region)))
        .expect("escaped region code is a valid pattern")
}
