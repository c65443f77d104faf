/*!
 * Prompt construction for translation and memory-based revision.
 *
 * Prompts are plain text with a fixed directive block, optional heuristics
 * for numbered lists and bracketed numbers, an optional glossary section,
 * and the segment context when the document carries one.
 */

use crate::segment::{is_bracketed_number, is_numbered_list};
use crate::termbase::TermEntry;

/// System prompt shared by translation and revision requests.
pub const SYSTEM_PROMPT: &str = "You are a localization & translation expert.";

/// Builder for per-segment prompts.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    source_language: String,
    target_language: String,
}

impl PromptBuilder {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Prompt asking for a fresh translation of `source_text` (placeholders
    /// already substituted for raw tags).
    pub fn translation_prompt(
        &self,
        source_text: &str,
        context: &str,
        glossary: &[&TermEntry],
    ) -> String {
        let mut prompt = format!(
            "Translate the following text from {} to {}. You MUST provide a translation.",
            self.source_language, self.target_language
        );
        self.push_directives(&mut prompt, source_text, glossary);
        prompt.push_str("\nRespond after 'Translation:' with nothing but your translation.");
        push_context(&mut prompt, context);
        prompt.push_str("\nText:");
        prompt.push('\n');
        prompt.push_str(source_text);
        prompt.push_str("\nTranslation:");
        prompt
    }

    /// Prompt asking for a revision of a fuzzy memory match.
    pub fn revision_prompt(
        &self,
        source_text: &str,
        memory_target: &str,
        context: &str,
        glossary: &[&TermEntry],
    ) -> String {
        let mut prompt = format!(
            "Revise the translation of the text below from {} to {}. You MUST provide a revised translation.",
            self.source_language, self.target_language
        );
        prompt.push_str(
            "\nThe translation provided is from the translation memory. Do not change the sentence structure or word order if possible.",
        );
        prompt.push_str(
            "\nOnly revise the incorrect parts, make sure the translation is similar to translation memory.",
        );
        self.push_directives(&mut prompt, source_text, glossary);
        prompt.push_str(
            "\nRespond after 'Revised Translation:' with nothing but your revised translation.",
        );
        push_context(&mut prompt, context);
        prompt.push_str("\nText:");
        prompt.push('\n');
        prompt.push_str(source_text);
        prompt.push_str("\nTranslation (from translation memory):");
        prompt.push('\n');
        prompt.push_str(memory_target);
        prompt.push_str("\nRevised Translation:");
        prompt
    }

    fn push_directives(&self, prompt: &mut String, source_text: &str, glossary: &[&TermEntry]) {
        if is_numbered_list(source_text) {
            prompt.push_str(
                "\nSource text starts with a numbered list, your translation must start with the same numbered list.",
            );
        }
        if is_bracketed_number(source_text) {
            prompt.push_str(
                "\nSource text contains numbers in brackets, your translation must include the same numbers in same brackets in correct positions.",
            );
        }
        if !glossary.is_empty() {
            prompt.push_str("\nStrictly use this termbase:\n");
            for term in glossary {
                prompt.push_str(&format!("- {} = {}.\n", term.source, term.target));
            }
        }
    }
}

fn push_context(prompt: &mut String, context: &str) {
    let trimmed = context.trim();
    if !trimmed.is_empty() && trimmed != "N/A" {
        prompt.push_str(&format!(
            "\nAdditional info about the segment to help you translate: \n{trimmed}"
        ));
    }
}
