/*!
 * mqxliff document analyzer.
 *
 * Parses a bilingual memoQ XLIFF into the flat event list used for lossless
 * write-back, plus one analyzed segment per trans-unit: flattened source and
 * target text, the note as context, the locked flag, and the structured
 * source fragment that reconstruction later needs.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::errors::XliffError;
use crate::segment::Segment;

use super::events::{XmlEvent, parse_events, unescape_attr};
use super::fragment::{ChildElement, Fragment};

/// One trans-unit: the analyzed segment plus its structured source content.
#[derive(Debug, Clone)]
pub struct SegmentUnit {
    pub segment: Segment,
    pub source_fragment: Fragment,
}

/// A parsed mqxliff document.
#[derive(Debug, Clone)]
pub struct XliffDocument {
    pub source_language: String,
    pub target_language: String,
    pub original_file: String,
    pub events: Vec<XmlEvent>,
    pub segments: Vec<SegmentUnit>,
}

impl XliffDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let events = parse_events(bytes)?;
        analyze(events)
    }

    pub fn unit(&self, id: u32) -> Option<&SegmentUnit> {
        self.segments.iter().find(|u| u.segment.id == id)
    }
}

/// Element name without its namespace prefix
pub(crate) fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn analyze(events: Vec<XmlEvent>) -> Result<XliffDocument> {
    let mut source_language: Option<String> = None;
    let mut target_language: Option<String> = None;
    let mut original_file = String::new();

    for event in &events {
        if let XmlEvent::Start { name, .. } | XmlEvent::Empty { name, .. } = event {
            if local_name(name) == "file" {
                if let Some(original) = event.attr("original") {
                    original_file = original;
                }
                source_language = event.attr("source-language");
                target_language = event.attr("target-language");
                break;
            }
        }
    }

    let (source_language, target_language) = match (source_language, target_language) {
        (Some(s), Some(t)) => (s, t),
        _ => {
            return Err(XliffError::MissingLanguages { original_file }.into());
        }
    };

    let mut segments = Vec::new();
    let mut index = 0;
    while index < events.len() {
        if let XmlEvent::Start { name, .. } = &events[index] {
            if local_name(name) == "trans-unit" {
                let (unit, next) = read_trans_unit(&events, index);
                if let Some(unit) = unit {
                    segments.push(unit);
                }
                index = next;
                continue;
            }
        }
        index += 1;
    }

    Ok(XliffDocument {
        source_language,
        target_language,
        original_file,
        events,
        segments,
    })
}

/// Parse one trans-unit starting at `start`. Returns the analyzed unit (None
/// when the id is unusable) and the index just past the closing tag.
fn read_trans_unit(events: &[XmlEvent], start: usize) -> (Option<SegmentUnit>, usize) {
    let open = &events[start];
    let id = open.attr("id").and_then(|raw| raw.parse::<u32>().ok());
    let locked = match open {
        XmlEvent::Start { attrs, .. } => attrs
            .iter()
            .any(|(k, _)| local_name(k) == "locked"),
        _ => false,
    };

    let mut source_fragment = Fragment::default();
    let mut target = String::new();
    let mut note = String::new();

    let mut index = start + 1;
    let mut depth = 0usize;
    while index < events.len() {
        match &events[index] {
            XmlEvent::Start { name, .. } if depth == 0 => match local_name(name) {
                "source" => {
                    let (fragment, next) = read_fragment(events, index + 1, name);
                    source_fragment = fragment;
                    index = next;
                    continue;
                }
                "target" => {
                    let (text, next) = read_flat_text(events, index + 1, name);
                    target = text;
                    index = next;
                    continue;
                }
                "note" => {
                    let (text, next) = read_flat_text(events, index + 1, name);
                    note = text;
                    index = next;
                    continue;
                }
                _ => depth += 1,
            },
            XmlEvent::Start { .. } => depth += 1,
            XmlEvent::End { name } => {
                if depth == 0 && local_name(name) == "trans-unit" {
                    index += 1;
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        index += 1;
    }

    let Some(id) = id else {
        warn!("Skipping trans-unit with missing or non-numeric id");
        return (None, index);
    };

    let segment = Segment::new(id, source_fragment.flat_text(), target, note, locked);
    (Some(SegmentUnit { segment, source_fragment }), index)
}

/// Build the mixed-content view of a source element. Starts just past the
/// opening tag; returns the fragment and the index past the closing tag.
fn read_fragment(events: &[XmlEvent], start: usize, element_name: &str) -> (Fragment, usize) {
    let mut fragment = Fragment::default();
    let mut index = start;
    let mut depth = 0usize;
    while index < events.len() {
        match &events[index] {
            XmlEvent::Text { text } | XmlEvent::CData { text } => {
                if depth == 0 {
                    fragment.push_text(text);
                } else if let Some(child) = fragment.children.last_mut() {
                    match child.text.as_mut() {
                        Some(existing) => existing.push_str(text),
                        None => child.text = Some(text.clone()),
                    }
                }
            }
            XmlEvent::Start { name, attrs } => {
                if depth == 0 {
                    fragment.children.push(child_from(name, attrs));
                }
                depth += 1;
            }
            XmlEvent::Empty { name, attrs } => {
                if depth == 0 {
                    fragment.children.push(child_from(name, attrs));
                }
            }
            XmlEvent::End { name } => {
                if depth == 0 && name == element_name {
                    return (fragment, index + 1);
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        index += 1;
    }
    (fragment, index)
}

fn child_from(name: &str, attrs: &[(String, String)]) -> ChildElement {
    ChildElement {
        name: name.to_string(),
        attrs: attrs
            .iter()
            .map(|(k, v)| (k.clone(), unescape_attr(v)))
            .collect(),
        text: None,
        tail: None,
    }
}

/// Flatten all text inside an element, inline elements included
fn read_flat_text(events: &[XmlEvent], start: usize, element_name: &str) -> (String, usize) {
    let mut out = String::new();
    let mut index = start;
    let mut depth = 0usize;
    while index < events.len() {
        match &events[index] {
            XmlEvent::Text { text } | XmlEvent::CData { text } => out.push_str(text),
            XmlEvent::Start { .. } => depth += 1,
            XmlEvent::End { name } => {
                if depth == 0 && name == element_name {
                    return (out, index + 1);
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        index += 1;
    }
    (out, index)
}
