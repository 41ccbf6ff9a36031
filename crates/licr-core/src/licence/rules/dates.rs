//! Date extraction and role assignment for licences.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_LOOSE, DOB_LABELED, EXPIRY_LABELED, ISSUED_LABELED, ISS_NOISY};
use super::{DocumentText, ExtractionMatch, FallbackChain, FieldExtractor};

const DATE_FORMAT: &str = "%d-%m-%Y";

/// Date field extractor.
///
/// Yields every `DD-MM-YYYY` token that parses as a calendar date, sorted
/// ascending. Tokens that do not parse are skipped.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse_all(text: &str) -> Vec<ExtractionMatch<NaiveDate>> {
        let mut results: Vec<ExtractionMatch<NaiveDate>> = DATE_DMY
            .find_iter(text)
            .filter_map(|m| {
                let date = NaiveDate::parse_from_str(m.as_str(), DATE_FORMAT).ok()?;
                Some(
                    ExtractionMatch::new(date, 0.9, m.as_str())
                        .with_position(m.start(), m.end()),
                )
            })
            .collect();

        results.sort_by_key(|r| r.value);
        results
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        self.extract_all(doc).into_iter().next()
    }

    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        Self::parse_all(&doc.text)
    }
}

/// Inputs shared by the date role strategies.
pub struct DateContext<'a> {
    /// Full document text.
    pub text: &'a str,
    /// Distinct parsed dates, ascending.
    pub sorted: Vec<NaiveDate>,
}

impl<'a> DateContext<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut sorted: Vec<NaiveDate> = DateExtractor::parse_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        sorted.dedup();
        Self { text, sorted }
    }
}

/// Dates assigned to their roles on a licence.
#[derive(Debug, Clone, Default)]
pub struct LicenceDates {
    /// Licence expiry date.
    pub expiry_date: Option<ExtractionMatch<String>>,
    /// Date of birth.
    pub dob: Option<ExtractionMatch<String>>,
    /// Issue date.
    pub issue_date: Option<ExtractionMatch<String>>,
}

/// Date of birth: birth-date label, then the earliest date.
pub fn dob_chain<'a>() -> FallbackChain<DateContext<'a>, String> {
    FallbackChain::<DateContext<'a>, String>::new()
        .then("dob_label", dob_from_label)
        .then("earliest_date", earliest_date)
}

/// Issue date: `ISSUED` label, then a date buried in a noisy `ISS` label.
pub fn issue_chain<'a>() -> FallbackChain<DateContext<'a>, String> {
    FallbackChain::<DateContext<'a>, String>::new()
        .then("issued_label", issue_from_label)
        .then("iss_label_noisy", issue_from_noisy_label)
}

/// Expiry date: `LICENCE EXPIRY` label, then the latest of two or more dates.
pub fn expiry_chain<'a>() -> FallbackChain<DateContext<'a>, String> {
    FallbackChain::<DateContext<'a>, String>::new()
        .then("licence_expiry_label", expiry_from_label)
        .then("latest_date", latest_date)
}

/// Assign date roles from document text, keeping provenance.
///
/// Text without any date-shaped token yields no dates at all.
pub fn extract_dates_detailed(text: &str) -> LicenceDates {
    if !DATE_DMY.is_match(text) {
        return LicenceDates::default();
    }

    let ctx = DateContext::new(text);

    LicenceDates {
        expiry_date: expiry_chain().resolve(&ctx),
        dob: dob_chain().resolve(&ctx),
        issue_date: issue_chain().resolve(&ctx),
    }
}

/// Assign date roles from document text.
///
/// Returns `(expiry, dob, issue)`.
pub fn extract_dates(text: &str) -> (Option<String>, Option<String>, Option<String>) {
    let dates = extract_dates_detailed(text);
    (
        dates.expiry_date.map(|m| m.value),
        dates.dob.map(|m| m.value),
        dates.issue_date.map(|m| m.value),
    )
}

fn labeled(ctx: &DateContext, pattern: &regex::Regex) -> Option<ExtractionMatch<String>> {
    let caps = pattern.captures(ctx.text)?;
    let date = caps.get(1)?;
    let full_match = caps.get(0)?;
    NaiveDate::parse_from_str(date.as_str(), DATE_FORMAT).ok()?;
    Some(
        ExtractionMatch::new(date.as_str().to_string(), 0.95, full_match.as_str())
            .with_position(date.start(), date.end()),
    )
}

fn dob_from_label(ctx: &DateContext) -> Option<ExtractionMatch<String>> {
    labeled(ctx, &DOB_LABELED)
}

fn issue_from_label(ctx: &DateContext) -> Option<ExtractionMatch<String>> {
    labeled(ctx, &ISSUED_LABELED)
}

fn expiry_from_label(ctx: &DateContext) -> Option<ExtractionMatch<String>> {
    labeled(ctx, &EXPIRY_LABELED)
}

fn issue_from_noisy_label(ctx: &DateContext) -> Option<ExtractionMatch<String>> {
    let caps = ISS_NOISY.captures(ctx.text)?;
    let span = caps.get(1)?;
    let date = DATE_LOOSE.find(span.as_str())?;
    let start = span.start() + date.start();
    Some(
        ExtractionMatch::new(date.as_str().to_string(), 0.8, span.as_str())
            .with_position(start, start + date.len()),
    )
}

fn earliest_date(ctx: &DateContext) -> Option<ExtractionMatch<String>> {
    let date = ctx.sorted.first()?;
    let value = date.format(DATE_FORMAT).to_string();
    Some(ExtractionMatch::new(value.clone(), 0.6, value))
}

fn latest_date(ctx: &DateContext) -> Option<ExtractionMatch<String>> {
    // A lone date is taken to be the date of birth.
    if ctx.sorted.len() < 2 {
        return None;
    }
    let date = ctx.sorted.last()?;
    let value = date.format(DATE_FORMAT).to_string();
    Some(ExtractionMatch::new(value.clone(), 0.6, value))
}
