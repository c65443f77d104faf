/*!
 * Unit tests for rebuilding target fragments from translated text
 */

use mqxlate::xliff::{XliffDocument, inline, rebuild};

use crate::common::sample_mqxliff;

fn catalogue_from(source_inner: &str) -> (XliffDocument, mqxlate::xliff::InlineElementMap) {
    let xml = sample_mqxliff(&[&format!(
        "        <source>{source_inner}</source>\n        <target/>"
    )]);
    let document = XliffDocument::from_bytes(xml.as_bytes()).unwrap();
    let catalogue = inline::extract(&document.unit(1).unwrap().source_fragment);
    (document, catalogue)
}

#[test]
fn test_rebuild_pairedTags_shouldAlternateChildrenAndTails() {
    let (_, catalogue) =
        catalogue_from("<bpt id=\"1\">&lt;b&gt;</bpt>bold<ept id=\"1\">&lt;/b&gt;</ept> rest");
    let fragment = rebuild("<b>gras</b> reste", &catalogue);

    assert!(fragment.text.is_none());
    assert_eq!(fragment.children.len(), 2);
    assert_eq!(fragment.children[0].name, "bpt");
    assert_eq!(fragment.children[0].tail.as_deref(), Some("gras"));
    assert_eq!(fragment.children[1].name, "ept");
    assert_eq!(fragment.children[1].tail.as_deref(), Some(" reste"));
    assert_eq!(fragment.flat_text(), "<b>gras</b> reste");
}

#[test]
fn test_rebuild_placeholderToken_shouldMatchPhContent() {
    let (_, catalogue) = catalogue_from("Press <ph id=\"7\">{}</ph> now.");
    let fragment = rebuild("Appuyez sur {} maintenant.", &catalogue);

    assert_eq!(fragment.text.as_deref(), Some("Appuyez sur "));
    assert_eq!(fragment.children.len(), 1);
    assert_eq!(fragment.children[0].name, "ph");
    assert_eq!(fragment.children[0].text.as_deref(), Some("{}"));
    assert_eq!(fragment.children[0].tail.as_deref(), Some(" maintenant."));
}

#[test]
fn test_rebuild_leadingWhitespace_shouldBeTrimmed() {
    let (_, catalogue) = catalogue_from("Plain.");
    let fragment = rebuild("\n  Traduction.", &catalogue);
    assert_eq!(fragment.text.as_deref(), Some("Traduction."));
}

#[test]
fn test_rebuild_hallucinatedTag_shouldBeDroppedNotInvented() {
    let (_, catalogue) = catalogue_from("Press <ph id=\"7\">{}</ph> now.");
    let fragment = rebuild("Texte <made-up/> {} fin", &catalogue);

    // Only the catalogued token becomes an element
    assert_eq!(fragment.children.len(), 1);
    assert_eq!(fragment.children[0].name, "ph");
    assert_eq!(fragment.text.as_deref(), Some("Texte  "));
}

#[test]
fn test_rebuild_eachFragmentPart_shouldAppendExactlyOnce() {
    // Two catalogued elements with identical text must not both fire per token
    let (_, catalogue) = catalogue_from("<ph id=\"1\">&lt;br/&gt;</ph>a<ph id=\"2\">&lt;br/&gt;</ph>");
    let fragment = rebuild("x<br/>y<br/>z", &catalogue);

    assert_eq!(fragment.children.len(), 2);
    // Both tokens resolve to the first matching catalogue entry
    assert!(
        fragment
            .children
            .iter()
            .all(|c| c.attrs.contains(&("id".to_string(), "1".to_string())))
    );
    assert_eq!(fragment.flat_text(), "x<br/>y<br/>z");
}

#[test]
fn test_rebuild_emptyTranslation_shouldYieldEmptyFragment() {
    let (_, catalogue) = catalogue_from("Plain.");
    let fragment = rebuild("", &catalogue);
    assert!(fragment.text.is_none());
    assert!(fragment.children.is_empty());
}
