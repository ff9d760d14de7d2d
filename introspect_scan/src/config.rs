// Reflection configuration: vocabulary, emotion labels, and numeric knobs.
//
// Every constant the report depends on lives in `ReflectionConfig`, with
// defaults matching the classic introspection run (eleven keywords, the
// four scanned extensions, divisor 100, five words per line, four lines,
// smoothing 1). A JSON file can override any subset of fields; omitted
// fields keep their defaults.
//
// `Vocabulary` validates itself on construction and on deserialization, so
// a `Vocabulary` value always satisfies: non-empty, lowercase, no empty
// keywords, no duplicates. Order is significant: it is the tie-break order
// for dominant-concept selection and the expansion order of the poem's
// token multiset.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ReflectError;

/// The ordered keyword list the scan counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    keywords: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting empty lists, empty or non-lowercase
    /// keywords, and duplicates.
    pub fn new<I, S>(keywords: I) -> Result<Self, ReflectError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if keywords.is_empty() {
            return Err(ReflectError::invalid_config("vocabulary is empty"));
        }
        let mut seen = BTreeSet::new();
        for keyword in &keywords {
            if keyword.is_empty() {
                return Err(ReflectError::invalid_config("vocabulary contains an empty keyword"));
            }
            if keyword.to_lowercase() != *keyword {
                return Err(ReflectError::invalid_config(format!(
                    "keyword '{keyword}' is not lowercase"
                )));
            }
            if !seen.insert(keyword.as_str()) {
                return Err(ReflectError::invalid_config(format!(
                    "keyword '{keyword}' appears twice"
                )));
            }
        }
        Ok(Self { keywords })
    }

    /// Keywords in vocabulary order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Always false for a constructed vocabulary.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.position(keyword).is_some()
    }

    /// Index of `keyword` in vocabulary order.
    pub fn position(&self, keyword: &str) -> Option<usize> {
        self.keywords.iter().position(|k| k == keyword)
    }

    /// Length in chars of the shortest keyword.
    pub fn shortest_len(&self) -> usize {
        self.keywords
            .iter()
            .map(|k| k.chars().count())
            .min()
            .unwrap_or(0)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            keywords: [
                "life", "death", "kill", "feed", "particle", "void", "error", "null", "function",
                "return", "canvas",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = ReflectError;

    fn try_from(keywords: Vec<String>) -> Result<Self, Self::Error> {
        Vocabulary::new(keywords)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.keywords
    }
}

/// Keyword to emotional label, used to annotate the dominant concept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionMap {
    labels: BTreeMap<String, String>,
}

impl EmotionMap {
    pub fn new(labels: BTreeMap<String, String>) -> Self {
        Self { labels }
    }

    pub fn label(&self, keyword: &str) -> Option<&str> {
        self.labels.get(keyword).map(String::as_str)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

impl Default for EmotionMap {
    fn default() -> Self {
        let labels = [
            ("life", "hope"),
            ("death", "fear"),
            ("kill", "aggression"),
            ("feed", "desire"),
            ("void", "peace"),
            ("error", "confusion"),
            ("null", "emptiness"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { labels }
    }
}

/// All tunable parameters of a reflection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    /// Keywords to count, in tie-break order.
    pub vocabulary: Vocabulary,
    /// Optional narrative labels for keywords.
    pub emotions: EmotionMap,
    /// File extensions (without the dot) eligible for scanning.
    pub extensions: Vec<String>,
    /// Characters per density-bar segment.
    pub density_divisor: usize,
    /// Maximum words drawn per poem line.
    pub poem_sample_size: usize,
    /// Number of poem lines.
    pub poem_line_count: usize,
    /// Added to the destruction count before dividing.
    pub ratio_smoothing: u64,
    /// Reported when nothing was counted at all.
    pub sentinel: String,
    /// Numerator keyword of the creation/destruction ratio.
    pub creation_keyword: String,
    /// Denominator keyword of the creation/destruction ratio.
    pub destruction_keyword: String,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            emotions: EmotionMap::default(),
            extensions: ["js", "html", "css", "md"].into_iter().map(String::from).collect(),
            density_divisor: 100,
            poem_sample_size: 5,
            poem_line_count: 4,
            ratio_smoothing: 1,
            sentinel: "void".into(),
            creation_keyword: "feed".into(),
            destruction_keyword: "kill".into(),
        }
    }
}

impl ReflectionConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ReflectError> {
        let config: ReflectionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ReflectError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReflectError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the invariants serde cannot express.
    ///
    /// Emotion labels for keywords outside the vocabulary are tolerated
    /// but logged.
    pub fn validate(&self) -> Result<(), ReflectError> {
        if self.density_divisor == 0 {
            return Err(ReflectError::invalid_config("density_divisor must be positive"));
        }
        if self.ratio_smoothing == 0 {
            return Err(ReflectError::invalid_config("ratio_smoothing must be positive"));
        }
        if self.sentinel.is_empty() {
            return Err(ReflectError::invalid_config("sentinel must not be empty"));
        }
        for keyword in self.emotions.keywords() {
            if !self.vocabulary.contains(keyword) {
                warn!(keyword, "emotion label for a keyword outside the vocabulary");
            }
        }
        Ok(())
    }

    /// Whether a file name passes the extension and hidden-file filters.
    pub fn is_eligible(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') {
            return false;
        }
        match file_name.rsplit_once('.') {
            Some((_, ext)) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = ReflectionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored = ReflectionConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn defaults_match_classic_run() {
        let config = ReflectionConfig::default();
        assert_eq!(config.vocabulary.len(), 11);
        assert_eq!(config.vocabulary.keywords()[0], "life");
        assert_eq!(config.vocabulary.keywords()[10], "canvas");
        assert_eq!(config.density_divisor, 100);
        assert_eq!(config.poem_sample_size, 5);
        assert_eq!(config.poem_line_count, 4);
        assert_eq!(config.ratio_smoothing, 1);
        assert_eq!(config.sentinel, "void");
        assert_eq!(config.emotions.label("life"), Some("hope"));
        assert_eq!(config.emotions.label("canvas"), None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ReflectionConfig::from_json(r#"{"poem_line_count": 2}"#).unwrap();
        assert_eq!(config.poem_line_count, 2);
        assert_eq!(config.poem_sample_size, 5);
        assert_eq!(config.vocabulary, Vocabulary::default());
    }

    #[test]
    fn vocabulary_rejects_duplicates() {
        let err = Vocabulary::new(["life", "kill", "life"]).unwrap_err();
        assert!(matches!(err, ReflectError::InvalidConfig { .. }));
    }

    #[test]
    fn vocabulary_rejects_uppercase_and_empty() {
        assert!(Vocabulary::new(["Life"]).is_err());
        assert!(Vocabulary::new([""]).is_err());
        assert!(Vocabulary::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn invalid_vocabulary_in_json_fails_to_parse() {
        let err = ReflectionConfig::from_json(r#"{"vocabulary": ["a", "a"]}"#).unwrap_err();
        assert!(matches!(err, ReflectError::ConfigParse(_)));
    }

    #[test]
    fn zero_divisor_rejected() {
        let err = ReflectionConfig::from_json(r#"{"density_divisor": 0}"#).unwrap_err();
        assert!(matches!(err, ReflectError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_smoothing_rejected() {
        let err = ReflectionConfig::from_json(r#"{"ratio_smoothing": 0}"#).unwrap_err();
        assert!(matches!(err, ReflectError::InvalidConfig { .. }));
    }

    #[test]
    fn huge_smoothing_accepted() {
        let json = format!(r#"{{"ratio_smoothing": {}}}"#, u64::MAX);
        let config = ReflectionConfig::from_json(&json).unwrap();
        assert_eq!(config.ratio_smoothing, u64::MAX);
    }

    #[test]
    fn vocabulary_position_and_shortest() {
        let vocab = Vocabulary::new(["particle", "kill", "canvas"]).unwrap();
        assert_eq!(vocab.position("kill"), Some(1));
        assert_eq!(vocab.position("life"), None);
        assert_eq!(vocab.shortest_len(), 4);
    }

    #[test]
    fn eligibility_filter() {
        let config = ReflectionConfig::default();
        assert!(config.is_eligible("script.js"));
        assert!(config.is_eligible("index.html"));
        assert!(config.is_eligible("style.css"));
        assert!(config.is_eligible("README.md"));
        assert!(!config.is_eligible(".hidden.md"));
        assert!(!config.is_eligible("introspect.py"));
        assert!(!config.is_eligible("Makefile"));
        assert!(!config.is_eligible("notes.md.bak"));
    }
}
