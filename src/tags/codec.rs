/*!
 * Reversible extraction and restoration of inline markup.
 *
 * Recognized memoQ inline tags are replaced by opaque `<UTAG{n}/>`
 * placeholders so that an external translation engine cannot corrupt them.
 * The original markup is kept, HTML-entity-decoded, in a per-segment
 * dictionary and substituted back once the translated text returns.
 */

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::TagVocabulary;

// @const: Digits embedded in a placeholder token
static PLACEHOLDER_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Ordered placeholder -> original-markup mapping, scoped to a single
/// segment's processing lifetime. Never merged across segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDictionary {
    entries: Vec<(String, String)>,
}

impl TagDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a placeholder with its decoded markup
    pub fn insert(&mut self, placeholder: String, markup: String) {
        self.entries.push((placeholder, markup));
    }

    /// Look up the markup stored under a placeholder
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == placeholder)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate placeholder keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate (placeholder, markup) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of stored placeholders
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Codec turning recognized inline markup into placeholders and back.
///
/// The recognized vocabulary comes from configuration; tag-like substrings
/// outside the vocabulary pass through untouched. That pass-through is
/// deliberate, not an error.
#[derive(Debug, Clone)]
pub struct TagCodec {
    pattern: Regex,
}

impl TagCodec {
    /// Build a codec for a tag vocabulary.
    ///
    /// An empty vocabulary is rejected: its pattern would be the empty
    /// regex, which matches at every position.
    pub fn new(vocabulary: &TagVocabulary) -> Result<Self> {
        if vocabulary.tags.is_empty() {
            return Err(anyhow!("Tag vocabulary must not be empty"));
        }
        let pattern = Regex::new(&vocabulary.pattern())
            .map_err(|e| anyhow!("Invalid tag vocabulary pattern: {}", e))?;
        Ok(Self { pattern })
    }

    /// Build a codec for the default memoQ vocabulary
    pub fn with_default_vocabulary() -> Self {
        // The default vocabulary always compiles
        Self::new(&TagVocabulary::default()).unwrap_or_else(|_| unreachable!())
    }

    /// Replace recognized inline tags with `<UTAG{n}/>` placeholders.
    ///
    /// Placeholders are minted in left-to-right scan order starting at 1.
    /// Returns the cleaned text and the per-segment tag dictionary; text
    /// without recognized markup comes back unchanged with an empty
    /// dictionary.
    pub fn extract(&self, text: &str) -> (String, TagDictionary) {
        let mut dict = TagDictionary::new();
        let mut counter = 1u32;

        let cleaned = self
            .pattern
            .replace_all(text, |caps: &regex::Captures| {
                let full_tag = &caps[0];
                let decoded = decode_entities(full_tag);
                let placeholder = format!("<UTAG{}/>", counter);
                dict.insert(placeholder.clone(), decoded);
                counter += 1;
                placeholder
            })
            .into_owned();

        (cleaned, dict)
    }

    /// Restore placeholders in a segment to their original markup.
    ///
    /// Substitution runs in ascending order of the number embedded in the
    /// placeholder, not in lexical key order; placeholders without a
    /// parseable number sort last. With an empty dictionary the text is
    /// returned unchanged.
    pub fn restore(&self, cleaned_text: &str, dict: &TagDictionary) -> String {
        let mut keys: Vec<&str> = dict.keys().collect();
        keys.sort_by_key(|key| placeholder_number(key));

        let mut text = cleaned_text.to_string();
        for key in keys {
            if let Some(markup) = dict.get(key) {
                text = text.replace(key, markup);
            }
        }
        text
    }

    /// Check that every placeholder of a dictionary survived in `text`.
    ///
    /// Safety gate before `restore` on text produced by an external engine
    /// that might drop or mangle placeholders.
    pub fn check_for_tags(&self, text: &str, dict: &TagDictionary) -> bool {
        dict.keys().all(|key| text.contains(key))
    }
}

/// Numeric sort key for a placeholder token; unparseable tokens sort last
fn placeholder_number(placeholder: &str) -> u64 {
    PLACEHOLDER_NUMBER_REGEX
        .find(placeholder)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(u64::MAX)
}

/// Decode HTML/XML character entities into their canonical form
pub fn decode_entities(text: &str) -> String {
    match quick_xml::escape::unescape(text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}
