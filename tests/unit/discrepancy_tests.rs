/*!
 * Unit tests for tag-set discrepancy handling after translation
 */

use mqxlate::tags::{TagCodec, TagDictionary, diff, strip};

#[test]
fn test_diff_afterEngineDroppedPlaceholder_shouldReportIt() {
    let codec = TagCodec::with_default_vocabulary();
    let (cleaned, source_dict) = codec.extract(r#"<bpt id="1"/>bold<ept id="1"/> tail"#);
    // Simulate the engine losing the closing placeholder
    let translated = cleaned.replace("<UTAG2/>", "");

    let mut surviving = TagDictionary::new();
    for (key, value) in source_dict.iter() {
        if translated.contains(key) {
            surviving.insert(key.to_string(), value.to_string());
        }
    }
    let discrepancies = diff(&source_dict, &surviving);
    assert_eq!(
        discrepancies.missing_in_target.iter().collect::<Vec<_>>(),
        vec!["<UTAG2/>"]
    );
    assert!(discrepancies.missing_in_source.is_empty());
}

#[test]
fn test_stripThenRestore_shouldDropOnlyAffectedMarkup() {
    let codec = TagCodec::with_default_vocabulary();
    let (cleaned, dict) = codec.extract(r#"<mq:ch val="tab"/>indent <mq:ch val="nbsp"/>word"#);
    assert_eq!(cleaned, "<UTAG1/>indent <UTAG2/>word");

    // Engine mangled the first placeholder beyond recognition
    let translated = "UTAG gone indent <UTAG2/>mot";
    assert!(!codec.check_for_tags(translated, &dict));

    let mut surviving = TagDictionary::new();
    for (key, value) in dict.iter() {
        if translated.contains(key) {
            surviving.insert(key.to_string(), value.to_string());
        }
    }
    let restored = codec.restore(translated, &surviving);
    assert_eq!(restored, r#"UTAG gone indent <mq:ch val="nbsp"/>mot"#);
}

#[test]
fn test_strip_withSeveralKeys_shouldRemoveAllOccurrences() {
    let stripped = strip(
        "a <UTAG1/> b <UTAG2/> c <UTAG1/>",
        ["<UTAG1/>", "<UTAG2/>"],
    );
    assert_eq!(stripped, "a  b  c ");
}

#[test]
fn test_diff_withExtraTargetKey_shouldReportMissingInSource() {
    let mut source = TagDictionary::new();
    source.insert("<UTAG1/>".to_string(), "<bpt id=\"1\"/>".to_string());
    let mut target = TagDictionary::new();
    target.insert("<UTAG1/>".to_string(), "<bpt id=\"1\"/>".to_string());
    target.insert("<UTAG2/>".to_string(), "<ept id=\"1\"/>".to_string());

    let discrepancies = diff(&source, &target);
    assert!(discrepancies.missing_in_target.is_empty());
    assert!(discrepancies.missing_in_source.contains("<UTAG2/>"));
}
