//! Rule-based field extractors for driver licences.

pub mod library;
pub mod patterns;
pub mod dates;
pub mod names;
pub mod attributes;
pub mod region;
pub mod address;
pub mod identifier;

pub use library::PatternLibrary;
pub use dates::{extract_dates, extract_dates_detailed, DateExtractor, LicenceDates};
pub use names::{extract_name, NameExtractor};
pub use attributes::{
    EyeColorExtractor, GenderExtractor, HeightExtractor, LicenceTypeExtractor,
};
pub use region::{PostcodeExtractor, RegionExtractor};
pub use address::AddressExtractor;
pub use identifier::IdentifierExtractor;

/// OCR lines together with their newline-joined form.
///
/// Some extractors need line positions, others match across lines; both views
/// are built once per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText {
    /// OCR line sequence, top to bottom.
    pub lines: Vec<String>,
    /// Lines joined with `\n`.
    pub text: String,
}

impl DocumentText {
    pub fn new(lines: Vec<String>) -> Self {
        let text = lines.join("\n");
        Self { lines, text }
    }

    /// Build from any sequence of line-like values.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(Into::into).collect())
    }

    /// Split newline-separated text into lines.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a document.
    fn extract(&self, doc: &DocumentText) -> Option<Self::Output>;

    /// Extract all candidate values for the field, in document order.
    fn extract_all(&self, doc: &DocumentText) -> Vec<Self::Output> {
        self.extract(doc).into_iter().collect()
    }
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
    /// Name of the fallback step that produced the value, if any.
    pub strategy: Option<&'static str>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
            strategy: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn with_strategy(mut self, strategy: &'static str) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            confidence: self.confidence,
            position: self.position,
            source: self.source,
            strategy: self.strategy,
        }
    }
}

/// A single step in a [`FallbackChain`].
pub type Strategy<C, T> = fn(&C) -> Option<ExtractionMatch<T>>;

/// Ordered list of strategies; the first one yielding a value wins.
pub struct FallbackChain<C, T> {
    steps: Vec<(&'static str, Strategy<C, T>)>,
}

impl<C, T> FallbackChain<C, T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a strategy tried after all previous ones.
    pub fn then(mut self, name: &'static str, strategy: Strategy<C, T>) -> Self {
        self.steps.push((name, strategy));
        self
    }

    /// Strategy names in the order they are tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(name, _)| *name).collect()
    }

    /// Run the strategies in order and return the first result.
    pub fn resolve(&self, ctx: &C) -> Option<ExtractionMatch<T>> {
        self.steps.iter().find_map(|(name, strategy)| {
            let found = strategy(ctx)?;
            tracing::trace!("fallback step '{}' matched", name);
            Some(found.with_strategy(name))
        })
    }
}

impl<C, T> Default for FallbackChain<C, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &&str) -> Option<ExtractionMatch<String>> {
        None
    }

    fn echo(input: &&str) -> Option<ExtractionMatch<String>> {
        Some(ExtractionMatch::new(input.to_string(), 0.5, *input))
    }

    fn shout(input: &&str) -> Option<ExtractionMatch<String>> {
        Some(ExtractionMatch::new(input.to_uppercase(), 0.9, *input))
    }

    #[test]
    fn test_chain_takes_first_present_result() {
        let chain = FallbackChain::<&str, String>::new()
            .then("never", never)
            .then("echo", echo)
            .then("shout", shout);

        let found = chain.resolve(&"abc").unwrap();
        assert_eq!(found.value, "abc");
        assert_eq!(found.strategy, Some("echo"));
        assert_eq!(chain.names(), vec!["never", "echo", "shout"]);
    }

    #[test]
    fn test_empty_chain_resolves_to_none() {
        let chain = FallbackChain::<&str, String>::new().then("never", never);
        assert!(chain.resolve(&"abc").is_none());
    }

    #[test]
    fn test_document_text_joins_lines() {
        let doc = DocumentText::from_lines(["SMITH", "JOHN"]);
        assert_eq!(doc.text, "SMITH\nJOHN");
        assert_eq!(DocumentText::from_text("SMITH\nJOHN"), doc);
    }
}
