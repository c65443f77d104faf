/*!
 * Shared reuse-memory store.
 *
 * The memory is append-mostly state read and extended by every translation
 * worker: each successfully translated segment is appended back for reuse by
 * subsequent segments. Reads and appends go through one lock so concurrent
 * workers never observe torn state or lose an update.
 */

use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use super::fuzzy::{FuzzyMatcher, MatchDecision, TmMatch};

/// One (source, target) pair in the reuse memory
#[derive(Debug, Clone, PartialEq)]
pub struct TmEntry {
    /// Source text, raw inline markup included
    pub source: String,

    /// Stored translation
    pub target: String,
}

impl TmEntry {
    /// Create a new entry
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Shared, ordered reuse memory guarded by a single lock
pub struct TmStore {
    entries: Arc<RwLock<Vec<TmEntry>>>,
}

impl TmStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store seeded with existing entries
    pub fn from_entries(entries: Vec<TmEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Append a newly translated pair, skipping duplicate sources.
    ///
    /// Returns false when an entry with the same source already exists.
    pub fn append(&self, source: &str, target: &str) -> bool {
        let mut entries = self.entries.write();
        if entries.iter().any(|entry| entry.source == source) {
            debug!("Duplicate memory entry skipped for source '{}'", truncate_text(source, 40));
            return false;
        }
        entries.push(TmEntry::new(source, target));
        debug!("Memory extended to {} entries", entries.len());
        true
    }

    /// Score the memory against a segment and return the best qualifier
    pub fn best_match<F>(&self, segment: &str, matcher: &FuzzyMatcher, normalize: F) -> Option<TmMatch>
    where
        F: Fn(&str) -> String,
    {
        let entries = self.entries.read();
        matcher.best_match_with(segment, &entries, normalize)
    }

    /// Score the memory against a segment and return the reuse decision
    pub fn decide<F>(&self, segment: &str, matcher: &FuzzyMatcher, normalize: F) -> MatchDecision
    where
        F: Fn(&str) -> String,
    {
        let entries = self.entries.read();
        matcher.decide(segment, &entries, normalize)
    }

    /// Number of entries in the memory
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the memory is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of the current entries, in order
    pub fn snapshot(&self) -> Vec<TmEntry> {
        self.entries.read().clone()
    }
}

impl Default for TmStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TmStore {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}
