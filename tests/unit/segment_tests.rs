/*!
 * Unit tests for segment skip heuristics
 */

use mqxlate::segment::{
    Segment, SkipReason, is_bracketed_number, is_link, is_number, is_numbered_list, skip_reason,
};

#[test]
fn test_isNumber_decoratedForms_shouldMatch() {
    for text in ["7", "7.", "7)", "3.14", "100."] {
        assert!(is_number(text), "{text} should read as a bare number");
    }
    for text in ["7a", "v7", "7 items", "seven"] {
        assert!(!is_number(text), "{text} should not read as a bare number");
    }
}

#[test]
fn test_isNumberedList_shouldOnlyMatchPrefix() {
    assert!(is_numbered_list("3. Attach the cover."));
    assert!(is_numbered_list("12) Optional step."));
    assert!(!is_numbered_list("Attach cover 3."));
}

#[test]
fn test_isBracketedNumber_allThreeForms_shouldMatch() {
    assert!(is_bracketed_number("Insert {0} here"));
    assert!(is_bracketed_number("range {2> marker"));
    assert!(is_bracketed_number("range <3} marker"));
    assert!(!is_bracketed_number("plain {placeholder}"));
}

#[test]
fn test_isLink_partialUrls_shouldNotMatch() {
    assert!(is_link("https://docs.example.com/install"));
    assert!(!is_link("See https://docs.example.com/install for details"));
    assert!(!is_link("ftp://example.com"));
}

#[test]
fn test_skipReason_shouldPreferNumberOverLink() {
    assert_eq!(skip_reason("42"), Some(SkipReason::NumberOnly));
    assert_eq!(skip_reason("https://example.com"), Some(SkipReason::LinkOnly));
    assert_eq!(skip_reason("42 things"), None);
}

#[test]
fn test_isTranslatable_shouldExcludeLockedAndBlank() {
    let plain = Segment::new(1, "Text".into(), String::new(), String::new(), false);
    assert!(plain.is_translatable());

    let locked = Segment::new(2, "Text".into(), String::new(), String::new(), true);
    assert!(!locked.is_translatable());

    let blank = Segment::new(3, "  \t ".into(), String::new(), String::new(), false);
    assert!(!blank.is_translatable());
}
