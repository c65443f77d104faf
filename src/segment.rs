use once_cell::sync::Lazy;
use regex::Regex;

// @module: Segment record and skip heuristics

// @const: Number-only segment regex ("12", "3.", "4)")
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d*)?[).]?$").unwrap());

// @const: Numbered list prefix regex ("1.", "2)")
static NUMBERED_LIST_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]").unwrap());

// @const: Bracketed number regex ("{1}", "{2>", "<3}")
static BRACKETED_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\{\d+[}>]|<\d+\})").unwrap());

// @const: URL-only segment regex
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// One translatable unit of a bilingual document.
///
/// Immutable once read from the source document; the translated text is
/// carried separately by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Trans-unit id
    pub id: u32,

    /// Raw source text, inline tags included
    pub source: String,

    /// Target text already present in the document
    pub target: String,

    /// Context note attached to the unit
    pub context: String,

    /// Lock flag; locked segments are never touched
    pub locked: bool,
}

impl Segment {
    /// Creates a new segment
    pub fn new(id: u32, source: String, target: String, context: String, locked: bool) -> Self {
        Segment {
            id,
            source,
            target,
            context,
            locked,
        }
    }

    /// Whether the pipeline should consider this segment at all
    pub fn is_translatable(&self) -> bool {
        !self.locked && !self.source.trim().is_empty()
    }
}

/// Why a segment is copied instead of translated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The segment is a bare number
    NumberOnly,
    /// The segment is a URL and nothing else
    LinkOnly,
}

/// Check if a segment consists of a single number
pub fn is_number(text: &str) -> bool {
    NUMBER_REGEX.is_match(text)
}

/// Check if a segment starts with a numbered list marker (e.g. 1., 2., 3. ...)
pub fn is_numbered_list(text: &str) -> bool {
    NUMBERED_LIST_REGEX.is_match(text)
}

/// Check if a segment contains a bracketed number (e.g. {1}, {2}, {3} ...)
pub fn is_bracketed_number(text: &str) -> bool {
    BRACKETED_NUMBER_REGEX.is_match(text)
}

/// Check if the segment is a link and only a link
pub fn is_link(text: &str) -> bool {
    LINK_REGEX.is_match(text.trim())
}

/// Classify text that needs no translation at all
pub fn skip_reason(text: &str) -> Option<SkipReason> {
    if is_number(text) {
        Some(SkipReason::NumberOnly)
    } else if is_link(text) {
        Some(SkipReason::LinkOnly)
    } else {
        None
    }
}
