/*!
 * Fuzzy matching against the reuse memory.
 *
 * Provides Levenshtein distance-based similarity scoring on the 0-100
 * percentage scale, and selection of the best qualifying memory entry.
 * Scoring runs over placeholder-substituted text so inline markup does not
 * distort the metric.
 */

use super::store::TmEntry;

/// Default similarity threshold (percentage scale, exclusive lower bound)
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 80.0;

/// A memory entry that qualified against a segment, with its score
#[derive(Debug, Clone, PartialEq)]
pub struct TmMatch {
    /// Source text of the memory entry
    pub source: String,

    /// Target text of the memory entry
    pub target: String,

    /// Similarity score in [0, 100]
    pub score: f64,
}

/// What the pipeline should do with a segment given its best memory match
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision {
    /// Score of exactly 100: reuse the stored target, skip translation
    Exact(TmMatch),

    /// Score strictly between the threshold and 100: revise the stored target
    Revise(TmMatch),

    /// No entry cleared the threshold: translate from scratch
    NoMatch,
}

/// Fuzzy matcher using Levenshtein distance
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Similarity threshold (0-100, exclusive lower bound)
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    /// Create a new fuzzy matcher with a custom threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 100.0),
        }
    }

    /// The configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Calculate similarity between two strings on the 0-100 scale.
    ///
    /// `(1 - distance / max_len) * 100` with classic Levenshtein distance.
    /// Symmetric in its arguments; either string empty yields 0 rather than
    /// a division by zero.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let distance = levenshtein_distance(&a_chars, &b_chars);
        let max_len = a_chars.len().max(b_chars.len());

        (1.0 - distance as f64 / max_len as f64) * 100.0
    }

    /// Find the best memory entry scoring strictly above the threshold.
    ///
    /// Every entry is scored; ties are broken by first-encountered order.
    /// Returns `None` for an empty memory or when nothing qualifies.
    pub fn best_match(&self, segment: &str, memory: &[TmEntry]) -> Option<TmMatch> {
        self.best_match_with(segment, memory, |source| source.to_string())
    }

    /// Like `best_match`, but entry sources are passed through `normalize`
    /// before scoring. Used to score placeholder-substituted text while the
    /// memory keeps raw markup.
    pub fn best_match_with<F>(&self, segment: &str, memory: &[TmEntry], normalize: F) -> Option<TmMatch>
    where
        F: Fn(&str) -> String,
    {
        let mut best: Option<TmMatch> = None;

        for entry in memory {
            let score = self.similarity(&normalize(&entry.source), segment);
            if score <= self.threshold {
                continue;
            }
            let better = match &best {
                Some(current) => score > current.score,
                None => true,
            };
            if better {
                best = Some(TmMatch {
                    source: entry.source.clone(),
                    target: entry.target.clone(),
                    score,
                });
            }
        }

        best
    }

    /// Turn the best match into a reuse decision.
    ///
    /// Exactly 100 means exact reuse; between the threshold and 100 the
    /// stored target is revised instead of translating from scratch.
    pub fn decide<F>(&self, segment: &str, memory: &[TmEntry], normalize: F) -> MatchDecision
    where
        F: Fn(&str) -> String,
    {
        match self.best_match_with(segment, memory, normalize) {
            Some(m) if m.score >= 100.0 => MatchDecision::Exact(m),
            Some(m) => MatchDecision::Revise(m),
            None => MatchDecision::NoMatch,
        }
    }
}

/// Classic Levenshtein distance over chars.
///
/// Two-row formulation: O(n*m) time, O(min(n,m)) space.
fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    // Keep the shorter string in the inner loop
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return longer.len();
    }

    let mut prev_row: Vec<usize> = (0..=shorter.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; shorter.len() + 1];

    for (i, c1) in longer.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in shorter.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[shorter.len()]
}
