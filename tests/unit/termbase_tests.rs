/*!
 * Unit tests for memoQ CSV termbase loading and term lookup
 */

use mqxlate::termbase::{Termbase, language_columns};

use crate::common::{create_temp_dir, create_test_file};

const CSV: &str = "\
English,English_Def,French,French_Def,German,German_Def
firmware,device software,micrologiciel,logiciel embarqué,Firmware,Gerätesoftware
power supply,,alimentation,,Netzteil,
reset,,réinitialisation,,Zurücksetzen,
";

#[test]
fn test_fromCsv_file_shouldLoadLanguagePair() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "terms.csv", CSV).unwrap();
    let termbase = Termbase::from_csv(&path, "English", "French").unwrap();
    assert_eq!(termbase.len(), 3);
}

#[test]
fn test_languageColumns_shouldListDefMarkedLanguages() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "terms.csv", CSV).unwrap();
    let languages = language_columns(&path).unwrap();
    assert_eq!(languages, vec!["English", "French", "German"]);
}

#[test]
fn test_relevantTerms_shouldMatchCaseInsensitiveInOrder() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "terms.csv", CSV).unwrap();
    let termbase = Termbase::from_csv(&path, "English", "German").unwrap();

    let terms = termbase.relevant_terms("Reset the device, then check the FIRMWARE version.");
    let sources: Vec<&str> = terms.iter().map(|t| t.source.as_str()).collect();
    assert_eq!(sources, vec!["reset", "firmware"]);
    assert_eq!(terms[1].target, "Firmware");
}

#[test]
fn test_relevantTerms_withRepeatedTerm_shouldReportOnePerPosition() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "terms.csv", CSV).unwrap();
    let termbase = Termbase::from_csv(&path, "English", "French").unwrap();

    let terms = termbase.relevant_terms("reset now, reset later");
    assert_eq!(terms.len(), 2);
    assert!(terms.iter().all(|t| t.source == "reset"));
}

#[test]
fn test_fromCsv_missingLanguage_shouldError() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "terms.csv", CSV).unwrap();
    assert!(Termbase::from_csv(&path, "English", "Spanish").is_err());
}
