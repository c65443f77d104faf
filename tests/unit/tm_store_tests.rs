/*!
 * Unit tests for the shared reuse memory and TMX loading
 */

use std::sync::Arc;

use mqxlate::tm::{FuzzyMatcher, TmEntry, TmStore, load_tmx};

use crate::common::{create_temp_dir, create_test_file, sample_tmx};

#[test]
fn test_append_newPairs_shouldGrowInOrder() {
    let store = TmStore::new();
    assert!(store.append("One.", "Un."));
    assert!(store.append("Two.", "Deux."));
    let entries = store.snapshot();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], TmEntry::new("One.", "Un."));
    assert_eq!(entries[1], TmEntry::new("Two.", "Deux."));
}

#[test]
fn test_append_duplicateSource_shouldKeepFirstTranslation() {
    let store = TmStore::new();
    store.append("Hello.", "Bonjour.");
    assert!(!store.append("Hello.", "Salut."));
    assert_eq!(store.snapshot()[0].target, "Bonjour.");
}

#[tokio::test]
async fn test_append_fromConcurrentWorkers_shouldLoseNothing() {
    let store = Arc::new(TmStore::new());
    let mut handles = Vec::new();
    for worker in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                store.append(&format!("segment {worker}-{i}"), "translated");
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(store.len(), 8 * 25);
}

#[tokio::test]
async fn test_append_sameSourceFromConcurrentWorkers_shouldStoreOnce() {
    let store = Arc::new(TmStore::new());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.append("contested source", "translated");
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn test_bestMatch_shouldSeeEntriesAppendedDuringRun() {
    let store = TmStore::new();
    let matcher = FuzzyMatcher::default();
    assert!(store.best_match("Fresh sentence.", &matcher, |s| s.to_string()).is_none());
    store.append("Fresh sentence.", "Phrase fraîche.");
    let m = store
        .best_match("Fresh sentence.", &matcher, |s| s.to_string())
        .unwrap();
    assert_eq!(m.target, "Phrase fraîche.");
}

#[test]
fn test_loadTmx_fromFile_shouldSeedStore() {
    let dir = create_temp_dir().unwrap();
    let tmx = sample_tmx(&[
        ("The cat sat.", "Le chat était assis."),
        ("Good morning.", "Bonjour."),
    ]);
    let path = create_test_file(&dir.path().to_path_buf(), "memory.tmx", &tmx).unwrap();

    let entries = load_tmx(&path, "en", "fr").unwrap();
    assert_eq!(entries.len(), 2);
    let store = TmStore::from_entries(entries);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_loadTmx_withWrongLanguagePair_shouldYieldNothing() {
    let dir = create_temp_dir().unwrap();
    let tmx = sample_tmx(&[("The cat sat.", "Le chat était assis.")]);
    let path = create_test_file(&dir.path().to_path_buf(), "memory.tmx", &tmx).unwrap();
    let entries = load_tmx(&path, "de", "it").unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_loadTmx_missingFile_shouldError() {
    assert!(load_tmx("/nonexistent/memory.tmx", "en", "fr").is_err());
}
