/*!
 * Inline element catalogue for structural reconstruction.
 *
 * Before a segment is sent out for translation, the inline elements of its
 * source are catalogued under `{type}_{id}` keys. After translation the
 * catalogue is what turns serialized tag text back into real child elements.
 */

use log::debug;

use super::fragment::{ChildElement, Fragment};

// @const: inline element kinds, catalogued in this fixed order
const KINDS: [InlineTagKind; 4] = [
    InlineTagKind::Phrase,
    InlineTagKind::Italic,
    InlineTagKind::EndPaired,
    InlineTagKind::BeginPaired,
];

/// The four XLIFF 1.2 inline element types memoQ emits inside segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTagKind {
    Phrase,
    Italic,
    EndPaired,
    BeginPaired,
}

impl InlineTagKind {
    pub fn xliff_name(self) -> &'static str {
        match self {
            InlineTagKind::Phrase => "ph",
            InlineTagKind::Italic => "it",
            InlineTagKind::EndPaired => "ept",
            InlineTagKind::BeginPaired => "bpt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ph" => Some(InlineTagKind::Phrase),
            "it" => Some(InlineTagKind::Italic),
            "ept" => Some(InlineTagKind::EndPaired),
            "bpt" => Some(InlineTagKind::BeginPaired),
            _ => None,
        }
    }
}

/// One catalogued inline element. Attributes and text are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineElement {
    pub kind: InlineTagKind,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
}

impl InlineElement {
    /// Materialize a target-side child carrying this element's attributes.
    /// The text comes from the translated fragment, not the catalogue, so
    /// translatable tag content follows the translation.
    pub fn to_child(&self, text: &str) -> ChildElement {
        ChildElement {
            name: self.kind.xliff_name().to_string(),
            attrs: self.attrs.clone(),
            text: if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            },
            tail: None,
        }
    }
}

/// Ordered catalogue of a segment's inline elements, keyed `{type}_{id}`.
///
/// Insertion order is preserved; re-inserting an existing key replaces the
/// element in place, so duplicated ids resolve to the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineElementMap {
    entries: Vec<(String, InlineElement)>,
}

impl InlineElementMap {
    pub fn insert(&mut self, key: String, element: InlineElement) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = element,
            None => self.entries.push((key, element)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&InlineElement> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, element)| element)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InlineElement)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogue the inline elements of a source fragment.
///
/// Elements are grouped by type in a fixed order (ph, it, ept, bpt), each
/// keyed by its `id` attribute. Elements without an id get synthetic
/// `no_id_{n}` ids from a single counter shared across all types.
pub fn extract(fragment: &Fragment) -> InlineElementMap {
    let mut map = InlineElementMap::default();
    let mut no_id_counter = 1usize;

    for kind in KINDS {
        for child in &fragment.children {
            if child.name != kind.xliff_name() {
                continue;
            }
            let id = match child.attrs.iter().find(|(k, _)| k == "id") {
                Some((_, id)) => id.clone(),
                None => {
                    let id = format!("no_id_{no_id_counter}");
                    no_id_counter += 1;
                    id
                }
            };
            let key = format!("{}_{}", kind.xliff_name(), id);
            map.insert(
                key,
                InlineElement {
                    kind,
                    attrs: child.attrs.clone(),
                    text: child.text.clone(),
                },
            );
        }
    }

    if !map.is_empty() {
        debug!("Catalogued {} inline elements", map.len());
    }
    map
}
