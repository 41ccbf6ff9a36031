//! Holder name extraction.

use std::sync::Arc;

use super::library::PatternLibrary;
use super::patterns::UPPERCASE_LINE;
use super::{DocumentText, ExtractionMatch, FallbackChain, FieldExtractor};

/// Maximum number of name tokens kept (surname + given name).
const MAX_NAME_TOKENS: usize = 2;

/// Inputs shared by the name heuristics.
pub struct NameContext<'a> {
    pub lines: &'a [String],
    pub library: &'a PatternLibrary,
}

/// Name extractor built on two competing line heuristics.
pub struct NameExtractor {
    library: Arc<PatternLibrary>,
}

impl NameExtractor {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }

    /// Heuristics in precedence order.
    pub fn chain<'a>() -> FallbackChain<NameContext<'a>, Vec<String>> {
        FallbackChain::<NameContext<'a>, Vec<String>>::new()
            .then("context_clues", context_clue_lines)
            .then("simple_pattern", simple_pattern_lines)
    }

    /// Extract the name along with the heuristic that produced it.
    pub fn extract_detailed(&self, lines: &[String]) -> Option<ExtractionMatch<String>> {
        let ctx = NameContext {
            lines,
            library: &self.library,
        };

        let found = Self::chain().resolve(&ctx)?;
        let full_name = found.value.join(" ");
        let tokens: Vec<&str> = full_name.split_whitespace().take(MAX_NAME_TOKENS).collect();
        if tokens.is_empty() {
            return None;
        }

        let name = tokens.join(" ");
        Some(found.map(|_| name))
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new(Arc::new(PatternLibrary::default()))
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &DocumentText) -> Option<Self::Output> {
        self.extract_detailed(&doc.lines)
    }
}

/// Extract a holder name from OCR lines with the default vocabulary.
pub fn extract_name(lines: &[String]) -> String {
    NameExtractor::default()
        .extract_detailed(lines)
        .map(|m| m.value)
        .unwrap_or_default()
}

fn is_uppercase_line(line: &str) -> bool {
    UPPERCASE_LINE.is_match(line)
}

fn candidates(lines: Vec<&String>, confidence: f32) -> Option<ExtractionMatch<Vec<String>>> {
    if lines.is_empty() {
        return None;
    }
    let source = lines
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let values = lines.iter().map(|l| l.trim().to_string()).collect();
    Some(ExtractionMatch::new(values, confidence, source))
}

/// Uppercase lines free of exclusion keywords that sit directly above or
/// below another uppercase line.
fn context_clue_lines(ctx: &NameContext) -> Option<ExtractionMatch<Vec<String>>> {
    let lines = ctx.lines;
    let selected: Vec<&String> = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| {
            if !is_uppercase_line(line) || ctx.library.has_excluded_keyword(line) {
                return false;
            }
            let above = *i > 0 && is_uppercase_line(&lines[i - 1]);
            let below = i + 1 < lines.len() && is_uppercase_line(&lines[i + 1]);
            above || below
        })
        .map(|(_, line)| line)
        .collect();

    candidates(selected, 0.9)
}

/// Uppercase lines that carry none of the licence label markers.
fn simple_pattern_lines(ctx: &NameContext) -> Option<ExtractionMatch<Vec<String>>> {
    let selected: Vec<&String> = ctx
        .lines
        .iter()
        .filter(|line| is_uppercase_line(line) && !ctx.library.has_name_label(line))
        .collect();

    candidates(selected, 0.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_context_clues_truncate_to_two_tokens() {
        let extractor = NameExtractor::default();
        let found = extractor
            .extract_detailed(&lines(&["SMITH", "JOHN ROBERT", "LICENCE"]))
            .unwrap();

        assert_eq!(found.value, "SMITH JOHN");
        assert_eq!(found.strategy, Some("context_clues"));
    }

    #[test]
    fn test_simple_pattern_when_no_adjacent_uppercase() {
        let input = lines(&["Driver Licence", "SMITH", "12-03-1990", "Victoria"]);
        let found = NameExtractor::default().extract_detailed(&input).unwrap();

        assert_eq!(found.value, "SMITH");
        assert_eq!(found.strategy, Some("simple_pattern"));
    }

    #[test]
    fn test_excluded_lines_are_skipped() {
        let input = lines(&["DRIVER LICENCE", "JONES", "MARY ANNE", "Hgt175"]);
        assert_eq!(extract_name(&input), "JONES MARY");
    }

    #[test]
    fn test_neighbour_may_be_a_label() {
        // The adjacent uppercase line only has to be uppercase, not a name.
        let input = lines(&["AUSTRALIA", "NGUYEN", "3000 VIC"]);
        assert_eq!(extract_name(&input), "NGUYEN");
    }

    #[test]
    fn test_no_name() {
        let input = lines(&["Driver Licence", "12-03-1990", "DOB", "Exp 2030"]);
        assert_eq!(extract_name(&input), "");
        assert!(NameExtractor::default().extract_detailed(&[]).is_none());
    }

    #[test]
    fn test_custom_library() {
        let mut library = PatternLibrary::australia();
        library.exclude_keywords.push("PERMIT".to_string());
        let extractor = NameExtractor::new(Arc::new(library));

        let input = lines(&["LEARNER PERMIT", "BROWN"]);
        let found = extractor.extract_detailed(&input).unwrap();
        assert_eq!(found.value, "BROWN");
    }
}
