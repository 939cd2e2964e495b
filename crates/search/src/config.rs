use crate::error::{Result, SearchError};
use crate::fuzzy::DEFAULT_FUZZY_THRESHOLD;
use crate::vector::DEFAULT_VECTOR_THRESHOLD;
use answer_corpus::DEFAULT_TEXT_COLUMN;
use answer_language::DEFAULT_MAX_EDIT_DISTANCE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Configuration for query resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Which matchers run, and in which order
    pub mode: MatchMode,

    /// Minimum partial-similarity score (0-100, inclusive)
    pub fuzzy_threshold: u8,

    /// Cosine similarity the best sentence must exceed (strictly)
    pub vector_threshold: f64,

    /// Sentence text fed into the TF-IDF fit
    pub vector_text: VectorText,

    /// Table column holding document text
    pub text_column: String,

    /// Spelling correction of the query
    pub spelling: SpellingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::FuzzyVector,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            vector_threshold: DEFAULT_VECTOR_THRESHOLD,
            vector_text: VectorText::Raw,
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            spelling: SpellingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| SearchError::invalid_config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fuzzy_threshold > 100 {
            return Err(SearchError::invalid_config(format!(
                "fuzzy_threshold ({}) cannot exceed 100",
                self.fuzzy_threshold
            )));
        }

        if !(0.0..1.0).contains(&self.vector_threshold) {
            return Err(SearchError::invalid_config(format!(
                "vector_threshold ({}) must be in [0, 1)",
                self.vector_threshold
            )));
        }

        if self.text_column.trim().is_empty() {
            return Err(SearchError::invalid_config("text_column must not be empty"));
        }

        if self.spelling.max_edit_distance > 3 {
            return Err(SearchError::invalid_config(format!(
                "spelling.max_edit_distance ({}) cannot exceed 3",
                self.spelling.max_edit_distance
            )));
        }

        Ok(())
    }
}

/// Order in which matchers are consulted; the first non-empty tier wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Exact lemma containment only
    Lexical,

    /// Fuzzy partial similarity, then TF-IDF cosine fallback
    FuzzyVector,

    /// Exact containment, then fuzzy, then TF-IDF
    Tiered,
}

impl MatchMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::FuzzyVector => "fuzzy_vector",
            Self::Tiered => "tiered",
        }
    }
}

impl FromStr for MatchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lexical" | "exact" => Ok(Self::Lexical),
            "fuzzy_vector" | "fuzzy" => Ok(Self::FuzzyVector),
            "tiered" => Ok(Self::Tiered),
            other => Err(SearchError::invalid_config(format!(
                "unknown match mode '{other}' (expected lexical, fuzzy_vector or tiered)"
            ))),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which form of each sentence the TF-IDF space is fitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorText {
    /// Sentence text as loaded
    Raw,
    /// Lemmatized sentence text
    Normalized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingConfig {
    pub enabled: bool,

    /// Maximum edits between a query word and its correction
    pub max_edit_distance: usize,

    /// Never correct query words that occur in the loaded corpus
    pub protect_corpus_vocabulary: bool,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            protect_corpus_vocabulary: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fuzzy_threshold, 90);
        assert_eq!(config.vector_threshold, 0.15);
        assert_eq!(config.text_column, "text");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
mode = "tiered"

[spelling]
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(config.mode, MatchMode::Tiered);
        assert!(!config.spelling.enabled);
        assert_eq!(config.spelling.max_edit_distance, 2);
        assert_eq!(config.fuzzy_threshold, 90);
        assert_eq!(config.vector_text, VectorText::Raw);
    }

    #[test]
    fn test_config_validation() {
        let mut config = PipelineConfig::default();

        config.fuzzy_threshold = 101;
        assert!(config.validate().is_err());

        config.fuzzy_threshold = 80;
        config.vector_threshold = 1.0;
        assert!(config.validate().is_err());

        config.vector_threshold = -0.1;
        assert!(config.validate().is_err());

        config.vector_threshold = 0.3;
        config.text_column = " ".to_string();
        assert!(config.validate().is_err());

        config.text_column = "body".to_string();
        config.spelling.max_edit_distance = 4;
        assert!(config.validate().is_err());

        config.spelling.max_edit_distance = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(PipelineConfig::from_toml_str("mode = \"magic\"").is_err());
        assert!(PipelineConfig::from_toml_str("fuzzy_threshold = 150").is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("lexical".parse::<MatchMode>().unwrap(), MatchMode::Lexical);
        assert_eq!("Fuzzy-Vector".parse::<MatchMode>().unwrap(), MatchMode::FuzzyVector);
        assert_eq!("tiered".parse::<MatchMode>().unwrap(), MatchMode::Tiered);
        assert!("vector".parse::<MatchMode>().is_err());
        assert_eq!(MatchMode::FuzzyVector.to_string(), "fuzzy_vector");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.toml");
        std::fs::write(&path, "vector_text = \"normalized\"\ntext_column = \"body\"\n").unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.vector_text, VectorText::Normalized);
        assert_eq!(config.text_column, "body");
    }
}
