//! Jurisdiction vocabulary shared by the field extractors.

use serde::{Deserialize, Serialize};

/// Fixed vocabulary of tokens recognized on a licence.
///
/// The library is read-only once built. [`crate::LicenceParser`] holds it
/// behind an `Arc` so every extractor reads the same instance. The default is
/// the Australian driver licence vocabulary; other jurisdictions are loaded
/// from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternLibrary {
    /// Licence class keywords. Order matters: the first listed type found wins.
    pub license_types: Vec<String>,

    /// Keywords that disqualify a line as a name candidate and are blanked
    /// out of address matches.
    pub exclude_keywords: Vec<String>,

    /// Smaller label set used by the simple name heuristic.
    pub name_label_keywords: Vec<String>,

    /// Issuing region codes in priority order.
    pub region_codes: Vec<String>,
}

impl PatternLibrary {
    /// Vocabulary for Australian driver licences.
    pub fn australia() -> Self {
        Self {
            license_types: to_strings(&[
                "CAR",
                "MOTORCYCLE",
                "TRUCK",
                "BUS",
                "TRACTOR",
                "VAN",
                "TAXI",
                "LORRY",
                "COACH",
            ]),
            exclude_keywords: to_strings(&[
                "DRIVER",
                "LICENCE",
                "EXP",
                "DATE",
                "OF",
                "BIRTH",
                "CONDITIONS",
                "TYPE",
                "AUSTRALIA",
            ]),
            name_label_keywords: to_strings(&["DRIVER", "LICENSE", "EXP", "DOB", "ISS"]),
            region_codes: to_strings(&["ACT", "NSW", "NT", "QLD", "SA", "TAS", "VIC", "WA"]),
        }
    }

    /// Whether `text` contains any exclusion keyword as a substring.
    pub fn has_excluded_keyword(&self, text: &str) -> bool {
        self.exclude_keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Whether `text` contains any name label keyword as a substring.
    pub fn has_name_label(&self, text: &str) -> bool {
        self.name_label_keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::australia()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_australia() {
        let library = PatternLibrary::default();
        assert_eq!(library.license_types.first().map(String::as_str), Some("CAR"));
        assert_eq!(library.region_codes.len(), 8);
    }

    #[test]
    fn test_keyword_checks() {
        let library = PatternLibrary::australia();
        assert!(library.has_excluded_keyword("DRIVER LICENCE"));
        assert!(!library.has_excluded_keyword("SMITH"));
        assert!(library.has_name_label("DOB"));
        assert!(!library.has_name_label("LICENCE"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let library: PatternLibrary =
            serde_json::from_str(r#"{"region_codes": ["ON", "QC"]}"#).unwrap();
        assert_eq!(library.region_codes, vec!["ON", "QC"]);
        assert_eq!(library.license_types, PatternLibrary::australia().license_types);
    }
}
