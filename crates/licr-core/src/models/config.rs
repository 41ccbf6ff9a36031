//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LicrError, Result};
use crate::licence::rules::PatternLibrary;

/// Main configuration for licr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicrConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Jurisdiction vocabulary (licence types, keywords, region codes).
    pub patterns: PatternLibrary,

    /// Re-sort OCR boxes top-to-bottom, left-to-right before extraction.
    /// Off by default: the OCR engine's line order is trusted.
    pub sort_reading_order: bool,

    /// Drop OCR boxes whose recognition score is below this (0.0 - 1.0).
    pub min_recognition_score: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            patterns: PatternLibrary::default(),
            sort_reading_order: false,
            min_recognition_score: 0.0,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl LicrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges and required vocabulary.
    pub fn validate(&self) -> Result<()> {
        let score = self.extraction.min_recognition_score;
        if !(0.0..=1.0).contains(&score) {
            return Err(LicrError::Config(format!(
                "min_recognition_score must be between 0 and 1, got {}",
                score
            )));
        }

        let patterns = &self.extraction.patterns;
        for (name, list) in [
            ("license_types", &patterns.license_types),
            ("exclude_keywords", &patterns.exclude_keywords),
            ("name_label_keywords", &patterns.name_label_keywords),
            ("region_codes", &patterns.region_codes),
        ] {
            if list.iter().any(|item| item.trim().is_empty()) {
                return Err(LicrError::Config(format!("{} contains an empty entry", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LicrConfig::default();
        assert!(!config.extraction.sort_reading_order);
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LicrConfig =
            serde_json::from_str(r#"{"extraction": {"min_recognition_score": 0.5}}"#).unwrap();
        assert_eq!(config.extraction.min_recognition_score, 0.5);
        assert_eq!(config.extraction.patterns, PatternLibrary::australia());
    }

    #[test]
    fn test_validate_rejects_bad_score() {
        let mut config = LicrConfig::default();
        config.extraction.min_recognition_score = 1.5;
        assert!(matches!(config.validate(), Err(LicrError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_region_code() {
        let mut config = LicrConfig::default();
        config.extraction.patterns.region_codes.push(" ".to_string());
        assert!(matches!(config.validate(), Err(LicrError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_exclude_keyword() {
        let config: LicrConfig = serde_json::from_str(
            r#"{"extraction": {"patterns": {"exclude_keywords": ["DRIVER", ""]}}}"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exclude_keywords"));
    }

    #[test]
    fn test_validate_rejects_empty_name_label_keyword() {
        let mut config = LicrConfig::default();
        config.extraction.patterns.name_label_keywords = vec![String::new()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("name_label_keywords"));
    }

    #[test]
    fn test_from_file_rejects_blank_keywords() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"extraction": {"patterns": {"exclude_keywords": ["DRIVER", ""], "name_label_keywords": [""]}}}"#,
        )
        .unwrap();

        assert!(matches!(LicrConfig::from_file(&path), Err(LicrError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LicrConfig::default();
        config.output.pretty = false;
        config.save(&path).unwrap();

        let loaded = LicrConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
