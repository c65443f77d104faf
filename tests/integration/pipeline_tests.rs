/*!
 * Integration tests for the full pretranslation flow: document analysis,
 * memory reuse, provider translation and reconstructed write-back
 */

use std::collections::HashMap;
use std::sync::Arc;

use tokio_test;

use mqxlate::app_config::Config;
use mqxlate::pipeline::Pipeline;
use mqxlate::providers::mock::MockTranslator;
use mqxlate::tm::{TmStore, load_tmx};
use mqxlate::xliff::{XliffDocument, update_document};

use crate::common::{create_temp_dir, create_test_file, plain_unit, sample_mqxliff, sample_tmx};

fn test_config() -> Config {
    let mut config = Config::default();
    config.translation.workers = 2;
    config.translation.max_retries = 2;
    config.translation.retry_delay_ms = 1;
    config
}

fn sample_document() -> XliffDocument {
    let xml = sample_mqxliff(&[
        &plain_unit("Hello world."),
        "        <source>Press <ph id=\"7\">{}</ph> now.</source>\n        <target/>",
        "        <source><bpt id=\"1\">&lt;b&gt;</bpt>bold<ept id=\"1\">&lt;/b&gt;</ept> text</source>\n        <target/>",
        &plain_unit("42"),
    ]);
    XliffDocument::from_bytes(xml.as_bytes()).unwrap()
}

fn scripted_translator() -> Arc<MockTranslator> {
    let mut answers = HashMap::new();
    answers.insert(
        "Press {} now.".to_string(),
        "Appuyez sur {} maintenant.".to_string(),
    );
    answers.insert(
        "<b>bold</b> text".to_string(),
        "<b>gras</b> texte".to_string(),
    );
    Arc::new(MockTranslator::scripted(answers))
}

#[tokio::test]
async fn test_pretranslate_endToEnd_shouldFillEveryTarget() {
    let dir = create_temp_dir().unwrap();
    let tmx = sample_tmx(&[("Hello world.", "Bonjour le monde.")]);
    let tmx_path = create_test_file(&dir.path().to_path_buf(), "memory.tmx", &tmx).unwrap();

    let document = sample_document();
    let entries = load_tmx(&tmx_path, &document.source_language, &document.target_language).unwrap();
    let pipeline = Pipeline::new(&test_config(), "English", "French")
        .unwrap()
        .with_memory(TmStore::from_entries(entries))
        .with_translator(scripted_translator());

    let segments: Vec<_> = document.segments.iter().map(|u| u.segment.clone()).collect();
    let run = pipeline.run(&segments, None).await;

    assert_eq!(run.summary.total, 4);
    assert_eq!(run.summary.reused, 1);
    assert_eq!(run.summary.translated, 2);
    assert_eq!(run.summary.skipped, 1);
    assert_eq!(run.summary.failed, 0);

    let out = update_document(&document, &run.translations).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("<target>Bonjour le monde.</target>"));
    assert!(text.contains(r#"<target>Appuyez sur <ph id="7">{}</ph> maintenant.</target>"#));
    assert!(text.contains(
        r#"<target><bpt id="1">&lt;b&gt;</bpt>gras<ept id="1">&lt;/b&gt;</ept> texte</target>"#
    ));
    assert!(text.contains("<target>42</target>"));
    // Sources are untouched by write-back
    assert!(text.contains(r#"<source>Press <ph id="7">{}</ph> now.</source>"#));
}

#[tokio::test]
async fn test_pretranslate_shouldExtendMemoryWithProviderOutput() {
    let document = sample_document();
    let pipeline = Pipeline::new(&test_config(), "English", "French")
        .unwrap()
        .with_memory(TmStore::from_entries(vec![]))
        .with_translator(scripted_translator());

    let segments: Vec<_> = document.segments.iter().map(|u| u.segment.clone()).collect();
    let run = pipeline.run(&segments, None).await;

    // "Hello world." echoes through the provider; the tagged units get their
    // scripted answers; the number-only unit never reaches the memory
    assert_eq!(run.summary.translated, 3);
    let memory = pipeline.memory().snapshot();
    assert_eq!(memory.len(), 3);
    assert!(memory.iter().any(|e| e.source == "Hello world."));
    assert!(memory.iter().any(|e| e.target == "<b>gras</b> texte"));
}

#[test]
fn test_pretranslate_memoryOnly_shouldFillExactMatchesOnly() {
    let document = sample_document();
    let memory = TmStore::new();
    memory.append("Hello world.", "Bonjour le monde.");
    let pipeline = Pipeline::new(&test_config(), "English", "French")
        .unwrap()
        .with_memory(memory);

    let segments: Vec<_> = document.segments.iter().map(|u| u.segment.clone()).collect();
    let run = tokio_test::block_on(async { pipeline.run(&segments, None).await });

    assert_eq!(run.summary.reused, 1);
    assert_eq!(run.summary.skipped, 1);
    assert_eq!(run.summary.untranslated, 2);
    assert_eq!(run.translations.len(), 2);

    let out = update_document(&document, &run.translations).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("<target>Bonjour le monde.</target>"));
    // Unfilled units keep their empty targets
    assert!(text.contains(r#"<source>Press <ph id="7">{}</ph> now.</source>"#));
}

#[test]
fn test_pretranslate_withFailingProvider_shouldLeaveDocumentIntact() {
    let document = sample_document();
    let pipeline = Pipeline::new(&test_config(), "English", "French")
        .unwrap()
        .with_translator(Arc::new(MockTranslator::failing()));

    let segments: Vec<_> = document.segments.iter().map(|u| u.segment.clone()).collect();
    let run = tokio_test::block_on(async { pipeline.run(&segments, None).await });

    assert_eq!(run.summary.failed, 3);
    assert_eq!(run.summary.skipped, 1);

    let out = update_document(&document, &run.translations).unwrap();
    let text = String::from_utf8(out).unwrap();
    // Only the skipped unit produced text; every other target stays as read
    assert!(text.contains("<target>42</target>"));
    assert!(text.contains("<target/>"));
}
