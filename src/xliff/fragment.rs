/*!
 * ElementTree-style view of a segment's mixed content.
 *
 * A fragment mirrors how memoQ stores a source or target element: optional
 * leading text, then child inline elements, each carrying its own text and
 * an optional tail of plain text that follows it. All strings here are
 * decoded; escaping happens when the fragment is serialized back to events.
 */

use super::events::{XmlEvent, escape_attr};

/// One inline child element with its trailing text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChildElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
}

impl ChildElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append plain text after this element
    pub fn push_tail(&mut self, part: &str) {
        match self.tail.as_mut() {
            Some(tail) => tail.push_str(part),
            None => self.tail = Some(part.to_string()),
        }
    }
}

/// Mixed content of a `<source>` or `<target>` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub text: Option<String>,
    pub children: Vec<ChildElement>,
}

impl Fragment {
    /// Fragment holding only plain text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.text = None;
        self.children.clear();
    }

    /// Append plain text to whatever came last, the way ElementTree does:
    /// the fragment's own text before any child, the last child's tail after.
    pub fn push_text(&mut self, part: &str) {
        match self.children.last_mut() {
            Some(child) => child.push_tail(part),
            None => match self.text.as_mut() {
                Some(text) => text.push_str(part),
                None => self.text = Some(part.to_string()),
            },
        }
    }

    /// Flattened text content in document order
    pub fn flat_text(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            if let Some(text) = &child.text {
                out.push_str(text);
            }
            if let Some(tail) = &child.tail {
                out.push_str(tail);
            }
        }
        out
    }

    /// Serialize into events suitable for splicing inside an element
    pub fn to_events(&self) -> Vec<XmlEvent> {
        let mut events = Vec::new();
        if let Some(text) = &self.text {
            events.push(XmlEvent::Text { text: text.clone() });
        }
        for child in &self.children {
            let attrs: Vec<(String, String)> = child
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), escape_attr(v)))
                .collect();
            match &child.text {
                Some(text) => {
                    events.push(XmlEvent::Start {
                        name: child.name.clone(),
                        attrs,
                    });
                    events.push(XmlEvent::Text { text: text.clone() });
                    events.push(XmlEvent::End {
                        name: child.name.clone(),
                    });
                }
                None => {
                    events.push(XmlEvent::Empty {
                        name: child.name.clone(),
                        attrs,
                    });
                }
            }
            if let Some(tail) = &child.tail {
                events.push(XmlEvent::Text { text: tail.clone() });
            }
        }
        events
    }
}
