/*!
 * mqxliff write-back.
 *
 * Replays the document's event list verbatim, swapping the content of each
 * translated trans-unit's `<target>` for the reconstructed fragment. Nothing
 * outside those targets is touched, so formatting, namespaces and attribute
 * escaping survive unchanged.
 */

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::events::{XmlEvent, write_event_into};
use super::inline;
use super::reader::{XliffDocument, local_name};
use super::reconstruct;

/// Serialize the document with the given translations written into targets.
///
/// `translations` maps trans-unit ids to final translated text (inline tags
/// still serialized as literal text). Units absent from the map keep their
/// original target content.
pub fn update_document(
    document: &XliffDocument,
    translations: &HashMap<u32, String>,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut current_unit: Option<u32> = None;
    let mut index = 0;

    while index < document.events.len() {
        let event = &document.events[index];
        match event {
            XmlEvent::Start { name, .. } if local_name(name) == "trans-unit" => {
                current_unit = event.attr("id").and_then(|raw| raw.parse::<u32>().ok());
            }
            XmlEvent::End { name } if local_name(name) == "trans-unit" => {
                current_unit = None;
            }
            XmlEvent::Start { name, .. } | XmlEvent::Empty { name, .. }
                if local_name(name) == "target" =>
            {
                if let Some((unit, translation)) = current_unit
                    .and_then(|id| document.unit(id).zip(translations.get(&id)))
                {
                    let catalogue = inline::extract(&unit.source_fragment);
                    let fragment = reconstruct::rebuild(translation, &catalogue);

                    let (attrs, skip_to) = match event {
                        XmlEvent::Start { attrs, .. } => {
                            (attrs.clone(), end_of_element(&document.events, index, name))
                        }
                        XmlEvent::Empty { attrs, .. } => (attrs.clone(), index + 1),
                        _ => unreachable!(),
                    };

                    write_event_into(
                        &mut out,
                        &XmlEvent::Start {
                            name: name.clone(),
                            attrs,
                        },
                    )?;
                    for ev in fragment.to_events() {
                        write_event_into(&mut out, &ev)?;
                    }
                    write_event_into(&mut out, &XmlEvent::End { name: name.clone() })?;

                    index = skip_to;
                    continue;
                }
            }
            _ => {}
        }
        write_event_into(&mut out, event)?;
        index += 1;
    }

    Ok(out)
}

/// Index just past the End event closing the element opened at `start`
fn end_of_element(events: &[XmlEvent], start: usize, name: &str) -> usize {
    let mut depth = 0usize;
    let mut index = start + 1;
    while index < events.len() {
        match &events[index] {
            XmlEvent::Start { .. } => depth += 1,
            XmlEvent::End { name: end_name } => {
                if depth == 0 && end_name == name {
                    return index + 1;
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        index += 1;
    }
    index
}

/// Write the updated document to disk
pub fn write_file<P: AsRef<Path>>(
    path: P,
    document: &XliffDocument,
    translations: &HashMap<u32, String>,
) -> Result<()> {
    let bytes = update_document(document, translations)?;
    std::fs::write(path.as_ref(), bytes)
        .with_context(|| format!("Failed to write {}", path.as_ref().display()))
}
