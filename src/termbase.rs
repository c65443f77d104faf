/*!
 * Termbase support for glossary-constrained translation.
 *
 * memoQ exports termbases as CSV with one column per language plus a
 * matching `{language}_Def` definition column. Only the language pair of
 * the current document is retained; rows missing either cell are dropped.
 */

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::debug;

/// A single glossary pair for the active language direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub source: String,
    pub target: String,
}

/// In-memory termbase filtered to one language pair.
#[derive(Debug, Clone, Default)]
pub struct Termbase {
    entries: Vec<TermEntry>,
}

impl Termbase {
    /// Load a memoQ CSV termbase, keeping the columns named after the given
    /// languages. Falls back to tab separation when the header does not
    /// split on commas.
    pub fn from_csv<P: AsRef<Path>>(path: P, source_lang: &str, target_lang: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read termbase {}", path.as_ref().display()))?;
        Self::from_csv_str(&content, source_lang, target_lang)
    }

    /// Parse termbase content already in memory
    pub fn from_csv_str(content: &str, source_lang: &str, target_lang: &str) -> Result<Self> {
        let mut lines = content.lines();
        let header_line = lines.next().ok_or_else(|| anyhow!("Termbase is empty"))?;
        let delimiter = detect_delimiter(header_line);
        let header = split_row(header_line, delimiter);

        let source_idx = column_index(&header, source_lang)
            .ok_or_else(|| anyhow!("Termbase has no '{}' column", source_lang))?;
        let target_idx = column_index(&header, target_lang)
            .ok_or_else(|| anyhow!("Termbase has no '{}' column", target_lang))?;

        let mut entries = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells = split_row(line, delimiter);
            let source = cells.get(source_idx).map(|s| s.trim()).unwrap_or("");
            let target = cells.get(target_idx).map(|s| s.trim()).unwrap_or("");
            if source.is_empty() || target.is_empty() {
                continue;
            }
            entries.push(TermEntry {
                source: source.to_string(),
                target: target.to_string(),
            });
        }

        debug!(
            "Loaded {} termbase entries for {} -> {}",
            entries.len(),
            source_lang,
            target_lang
        );
        Ok(Self { entries })
    }

    /// Glossary pairs whose source term occurs in the text, ordered by first
    /// occurrence. Matching is case-insensitive; when two terms start at the
    /// same position the one seen first in the termbase wins.
    pub fn relevant_terms(&self, text: &str) -> Vec<&TermEntry> {
        let haystack = text.to_lowercase();
        let mut by_position: BTreeMap<usize, &TermEntry> = BTreeMap::new();
        for entry in &self.entries {
            let needle = entry.source.to_lowercase();
            if needle.is_empty() {
                continue;
            }
            let mut start = 0;
            while let Some(offset) = haystack[start..].find(&needle) {
                let index = start + offset;
                by_position.entry(index).or_insert(entry);
                start = index + needle.len();
            }
        }
        by_position.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// List the languages a termbase covers, derived from its `_Def` columns.
pub fn language_columns<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read termbase {}", path.as_ref().display()))?;
    let header_line = content.lines().next().ok_or_else(|| anyhow!("Termbase is empty"))?;
    let header = split_row(header_line, detect_delimiter(header_line));
    Ok(header
        .iter()
        .filter_map(|col| col.strip_suffix("_Def"))
        .map(str::to_string)
        .collect())
}

fn detect_delimiter(header_line: &str) -> char {
    if header_line.contains(',') { ',' } else { '\t' }
}

fn column_index(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|col| col == name)
}

/// Quote-aware row split for memoQ's CSV dialect
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    cells.push(current);
    cells
}
