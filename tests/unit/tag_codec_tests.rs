/*!
 * Unit tests for inline tag extraction and restoration
 */

use mqxlate::app_config::TagVocabulary;
use mqxlate::tags::{TagCodec, TagDictionary};

#[test]
fn test_extract_withMemoqSelfClosingPair_shouldMintTwoPlaceholders() {
    // memoQ serializes paired formatting as two self-closing elements
    let codec = TagCodec::with_default_vocabulary();
    let (cleaned, dict) = codec.extract(r#"<bpt id="1"/>bold<ept id="1"/>"#);
    assert_eq!(cleaned, "<UTAG1/>bold<UTAG2/>");
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("<UTAG1/>"), Some(r#"<bpt id="1"/>"#));
    assert_eq!(dict.get("<UTAG2/>"), Some(r#"<ept id="1"/>"#));
}

#[test]
fn test_extract_placeholders_shouldBeUniqueAndIncreasing() {
    let codec = TagCodec::with_default_vocabulary();
    let (_, dict) = codec.extract(
        r#"<mq:ch val="tab"/>a<ph id="1">x</ph>b<mq:ch val="nbsp"/>c<mq:gap/>"#,
    );
    let keys: Vec<&str> = dict.keys().collect();
    assert_eq!(
        keys,
        vec!["<UTAG1/>", "<UTAG2/>", "<UTAG3/>", "<UTAG4/>", "<UTAG5/>"]
    );
}

#[test]
fn test_roundTrip_withMixedMarkup_shouldReproduceInput() {
    let codec = TagCodec::with_default_vocabulary();
    let original = r#"Read <bpt id="2"/>the manual<ept id="2"/> before <mq:ch val="nbsp"/>use."#;
    let (cleaned, dict) = codec.extract(original);
    assert!(!cleaned.contains("bpt"));
    assert_eq!(codec.restore(&cleaned, &dict), original);
}

#[test]
fn test_restore_withEmptyDictionary_shouldBeIdempotent() {
    let codec = TagCodec::with_default_vocabulary();
    let text = "No placeholders here, <UTAG3/> is opaque.";
    let once = codec.restore(text, &TagDictionary::new());
    let twice = codec.restore(&once, &TagDictionary::new());
    assert_eq!(once, text);
    assert_eq!(twice, text);
}

#[test]
fn test_restore_withTranslationReorderedPlaceholders_shouldFollowNumbers() {
    let codec = TagCodec::with_default_vocabulary();
    let (_, dict) = codec.extract(r#"<bpt id="1"/>one<ept id="1"/>"#);
    // The external engine may move placeholders around; each token still
    // maps to its own markup
    let restored = codec.restore("<UTAG2/>deux<UTAG1/>", &dict);
    assert_eq!(restored, r#"<ept id="1"/>deux<bpt id="1"/>"#);
}

#[test]
fn test_extract_withEscapedEntitiesInAttrs_shouldStoreDecodedMarkup() {
    let codec = TagCodec::with_default_vocabulary();
    let (_, dict) = codec.extract(r#"<ph id="3" x="a&amp;b">t</ph>"#);
    assert_eq!(dict.get("<UTAG1/>"), Some(r#"<ph id="3" x="a&b">"#));
}

#[test]
fn test_codec_withCustomVocabulary_shouldOnlyMatchItsTags() {
    let mut vocabulary = TagVocabulary::default();
    vocabulary.tags.clear();
    vocabulary.tags.insert(
        "ph".to_string(),
        mqxlate::app_config::TagCapability::Paired,
    );
    let codec = TagCodec::new(&vocabulary).unwrap();
    let (cleaned, dict) = codec.extract(r#"<ph id="1">x</ph> and <mq:ch val="tab"/>"#);
    assert_eq!(cleaned, r#"<UTAG1/>x<UTAG2/> and <mq:ch val="tab"/>"#);
    assert_eq!(dict.len(), 2);
}

#[test]
fn test_checkForTags_shouldGateRestoration() {
    let codec = TagCodec::with_default_vocabulary();
    let (cleaned, dict) = codec.extract(r#"<bpt id="1"/>bold<ept id="1"/> rest"#);
    assert!(codec.check_for_tags(&cleaned, &dict));
    let mangled = cleaned.replace("<UTAG2/>", "<UTAG 2/>");
    assert!(!codec.check_for_tags(&mangled, &dict));
}
