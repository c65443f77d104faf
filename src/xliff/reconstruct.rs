/*!
 * Target-side structural reconstruction.
 *
 * Translated text arrives with inline elements serialized as literal tag
 * text (`<b>`, `</b>`, `{}`). The reconstructor splits the translation on
 * those tokens and rebuilds a mixed-content fragment, turning each token
 * back into the catalogued child element whose text it matches. Plain text
 * between tokens becomes element text or the previous child's tail.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::fragment::Fragment;
use super::inline::InlineElementMap;

// @const: serialized inline tokens inside a translation: markup-shaped runs
// and the bare placeholder form memoQ uses for ph content
static TAG_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]+>|\{\}").unwrap());

/// Rebuild a target fragment from translated text and the source catalogue.
///
/// Each token is resolved against the first catalogue entry with the same
/// trimmed text; tokens matching nothing are dropped with a warning so a
/// hallucinated tag can never corrupt the document. The fragment gains
/// exactly one child or one text extension per part.
pub fn rebuild(translation: &str, catalogue: &InlineElementMap) -> Fragment {
    let mut fragment = Fragment::default();
    let text = translation.trim_start();

    let mut cursor = 0;
    for token in TAG_SPLIT_REGEX.find_iter(text) {
        if token.start() > cursor {
            fragment.push_text(&text[cursor..token.start()]);
        }
        append_token(&mut fragment, token.as_str(), catalogue);
        cursor = token.end();
    }
    if cursor < text.len() {
        fragment.push_text(&text[cursor..]);
    }

    fragment
}

fn append_token(fragment: &mut Fragment, token: &str, catalogue: &InlineElementMap) {
    let cleaned = token.replace('\n', "");
    let wanted = normalize(&cleaned);
    let matched = catalogue
        .iter()
        .find(|(_, element)| {
            element
                .text
                .as_deref()
                .is_some_and(|text| normalize(text) == wanted)
        })
        .map(|(_, element)| element);

    match matched {
        Some(element) => fragment.children.push(element.to_child(&cleaned)),
        None => warn!("Dropping unmatched inline token in translation: {token}"),
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_string()
}
