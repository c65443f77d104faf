use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language override; when absent the value from the XLIFF file
    /// element is used
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language override
    #[serde(default)]
    pub target_language: Option<String>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Inline tag vocabulary
    #[serde(default)]
    pub tags: TagVocabulary,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation pass settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Fuzzy match threshold on the 0-100 percentage scale (exclusive lower bound)
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Number of concurrent segment workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum engine retries per segment
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Delay between engine retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_fuzzy_threshold() -> f64 {
    80.0
}

fn default_workers() -> usize {
    4
}

fn default_max_retries() -> usize {
    10
}

fn default_retry_delay_ms() -> u64 {
    3000
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            workers: default_workers(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// How a recognized inline tag may appear in segment text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TagCapability {
    /// Only the self-closing form occurs (`<mq:ch .../>`)
    SelfClosing,
    /// Opening and closing forms occur (`<bpt ...>` / `</bpt>`)
    Paired,
}

/// Closed vocabulary of recognized inline markup tag names.
///
/// The table maps a tag identifier to its capability. Tag-like substrings
/// whose name is not in the table pass through the codec untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TagVocabulary {
    /// Recognized tag names and their capabilities
    pub tags: BTreeMap<String, TagCapability>,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        let mut tags = BTreeMap::new();
        for name in [
            "tw:it",
            "st:it",
            "mq:nt",
            "mq:it",
            "mq:ch",
            "mq:gap",
            "mq:rxt-req",
            "mq:rxt",
            "mq:txml-ut",
            "mq:pi",
        ] {
            tags.insert(name.to_string(), TagCapability::SelfClosing);
        }
        for name in ["bpt", "ept", "ph", "it"] {
            tags.insert(name.to_string(), TagCapability::Paired);
        }
        Self { tags }
    }
}

impl TagVocabulary {
    /// Build the regex alternation matching every vocabulary form.
    ///
    /// Names are sorted longest-first so that `mq:rxt-req` wins over `mq:rxt`
    /// in the alternation.
    pub fn pattern(&self) -> String {
        let mut names: Vec<&str> = self.tags.keys().map(|s| s.as_str()).collect();
        names.sort_by_key(|n| std::cmp::Reverse(n.len()));

        let paired: Vec<String> = names
            .iter()
            .filter(|n| self.tags[**n] == TagCapability::Paired)
            .map(|n| regex::escape(n))
            .collect();
        let self_closing: Vec<String> = names
            .iter()
            .filter(|n| self.tags[**n] == TagCapability::SelfClosing)
            .map(|n| regex::escape(n))
            .collect();

        let mut alternatives = Vec::new();
        if !paired.is_empty() {
            alternatives.push(format!(r"</?(?:{})(?:\s[^>]*)?/?>", paired.join("|")));
        }
        if !self_closing.is_empty() {
            // Trailing /? covers attribute-less self-closing forms (<mq:gap/>)
            alternatives.push(format!(r"<(?:{})(?:\s[^>]*)?/?>", self_closing.join("|")));
        }
        alternatives.join("|")
    }

    /// Check whether the vocabulary contains a tag name
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: None,
            target_language: None,
            translation: TranslationConfig::default(),
            tags: TagVocabulary::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| anyhow!("Invalid config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.translation.fuzzy_threshold) {
            return Err(anyhow!(
                "fuzzy_threshold must be between 0 and 100, got {}",
                self.translation.fuzzy_threshold
            ));
        }
        if self.translation.workers == 0 {
            return Err(anyhow!("workers must be at least 1"));
        }
        if self.tags.tags.is_empty() {
            return Err(anyhow!("tag vocabulary must not be empty"));
        }
        Ok(())
    }
}
