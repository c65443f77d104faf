/*!
 * Translation provider abstraction.
 *
 * A provider is anything that can turn a prompt into translated text. The
 * pipeline only depends on the `Translator` trait plus the response
 * correction and retry logic in this module, so providers can be swapped
 * without touching the rest of the system.
 */

use std::fmt::Debug;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::segment::{is_bracketed_number, is_numbered_list};

pub mod mock;

/// One translation request handed to a provider.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// System role content
    pub system_prompt: String,
    /// Fully rendered user prompt
    pub prompt: String,
    /// Placeholder-substituted source text, for echo detection
    pub source_text: String,
}

/// Common trait for all translation providers
///
/// Implementations must be shareable across worker tasks, so the trait
/// requires Send + Sync.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Complete a translation request
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw model output or an error
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;

    /// Short provider name used in logs
    fn name(&self) -> &str;
}

// @const: label prefixes models tend to echo back despite instructions
const ECHOED_LABELS: [&str; 5] = [
    "Source Text:",
    "Improved Translation:",
    "***Improved Translation:***",
    "Translation:",
    "Translated Text:",
];

/// Clean a raw model response into usable translated text.
///
/// Strips the first occurrence of each known label, a leading echo of the
/// source text, and one layer of wrapping quotes, then trims whitespace.
pub fn correct_response(raw: &str, source_text: &str) -> String {
    let mut text = raw.to_string();
    for label in ECHOED_LABELS {
        if let Some(pos) = text.find(label) {
            text.replace_range(pos..pos + label.len(), "");
        }
    }
    // An echo of the source next to the translation gets removed; output
    // that IS the source stays, since identical text is a valid translation
    // for names, numbers and the like.
    if !source_text.is_empty() && text.trim() != source_text.trim() {
        if let Some(pos) = text.find(source_text) {
            text.replace_range(pos..pos + source_text.len(), "");
        }
    }
    let trimmed = text.trim();
    let unquoted = strip_wrapping_quotes(trimmed);
    unquoted.trim().to_string()
}

fn strip_wrapping_quotes(text: &str) -> &str {
    for quote in ['\'', '"'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Decide whether a corrected response warrants another attempt.
///
/// Returns the reason when the output is unusable, None when it can be kept.
pub fn retry_reason(source_text: &str, corrected: &str) -> Option<String> {
    if is_numbered_list(source_text) && corrected.is_empty() {
        return Some("Source starts with a list number but the translation is empty.".to_string());
    }
    if is_bracketed_number(source_text) && !is_bracketed_number(corrected) {
        return Some(
            "Source contains a bracketed number but the translation does not.".to_string(),
        );
    }
    if !source_text.trim().is_empty() && corrected.trim().is_empty() {
        return Some("Source text is not empty, but the translation is empty.".to_string());
    }
    None
}
