/*!
 * TMX reuse-memory loader.
 *
 * Reads `<tu>/<tuv>/<seg>` pairs for a language pair into initial memory
 * entries. Inline elements inside a seg contribute their text content, so a
 * segment's flattened text matches what the analyzer produces for XLIFF
 * sources.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;

use super::store::TmEntry;

/// Load a TMX file into memory entries for the given language pair.
///
/// Language matching is case-insensitive and ignores region subtags, so a
/// document pair (`en`, `fr`) picks up `en-US` / `fr-FR` variants. Trans
/// units missing either language are skipped with a warning.
pub fn load_tmx<P: AsRef<Path>>(path: P, source_lang: &str, target_lang: &str) -> Result<Vec<TmEntry>> {
    let bytes = std::fs::read(path.as_ref())
        .with_context(|| format!("Failed to read TMX file {}", path.as_ref().display()))?;
    load_tmx_bytes(&bytes, source_lang, target_lang)
}

/// Load TMX content from a byte buffer
pub fn load_tmx_bytes(bytes: &[u8], source_lang: &str, target_lang: &str) -> Result<Vec<TmEntry>> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(false);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut current_lang: Option<String> = None;
    let mut in_seg = false;
    let mut seg_text = String::new();
    let mut tu_source: Option<String> = None;
    let mut tu_target: Option<String> = None;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf).context("read TMX event")?;
        match event {
            Event::Eof => break,
            Event::Start(start) => match start.name().as_ref() {
                b"tu" => {
                    tu_source = None;
                    tu_target = None;
                }
                b"tuv" => {
                    current_lang = tuv_lang(&start)?;
                }
                b"seg" => {
                    in_seg = true;
                    seg_text.clear();
                }
                _ => {}
            },
            Event::End(end) => match end.name().as_ref() {
                b"tu" => match (tu_source.take(), tu_target.take()) {
                    (Some(source), Some(target)) => entries.push(TmEntry { source, target }),
                    _ => skipped += 1,
                },
                b"tuv" => {
                    current_lang = None;
                }
                b"seg" => {
                    in_seg = false;
                    if let Some(lang) = current_lang.as_deref() {
                        if languages_match(lang, source_lang) {
                            tu_source = Some(seg_text.clone());
                        } else if languages_match(lang, target_lang) {
                            tu_target = Some(seg_text.clone());
                        }
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if in_seg {
                    seg_text.push_str(&text.unescape().context("unescape TMX text")?);
                }
            }
            Event::CData(cdata) => {
                if in_seg {
                    seg_text.push_str(&String::from_utf8_lossy(cdata.as_ref()));
                }
            }
            _ => {}
        }
    }

    if skipped > 0 {
        warn!(
            "Skipped {} TMX units without a complete {}/{} pair",
            skipped, source_lang, target_lang
        );
    }
    debug!("Loaded {} memory entries from TMX", entries.len());
    Ok(entries)
}

/// Read the xml:lang (or lang) attribute of a tuv element
fn tuv_lang(start: &quick_xml::events::BytesStart<'_>) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr.context("TMX attribute")?;
        let key = attr.key.as_ref();
        if key == b"xml:lang" || key == b"lang" {
            return Ok(Some(String::from_utf8_lossy(attr.value.as_ref()).into_owned()));
        }
    }
    Ok(None)
}

/// Case-insensitive language comparison ignoring region subtags
fn languages_match(a: &str, b: &str) -> bool {
    let primary = |code: &str| {
        code.split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase()
    };
    primary(a) == primary(b)
}
