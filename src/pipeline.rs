/*!
 * Pretranslation pipeline.
 *
 * Orchestrates the per-segment flow: skip heuristics, tag protection,
 * reuse-memory lookup, provider translation or revision with retries, tag
 * restoration, and extension of the shared memory. Segments are processed
 * concurrently by a bounded worker pool; the reconstruction and write-back
 * of the document itself stays single-threaded in the xliff layer.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use tokio::sync::Semaphore;
use tokio::sync::mpsc::UnboundedSender;

use crate::app_config::Config;
use crate::prompts::{PromptBuilder, SYSTEM_PROMPT};
use crate::providers::{TranslationRequest, Translator, correct_response, retry_reason};
use crate::segment::{Segment, SkipReason, skip_reason};
use crate::tags::{TagCodec, TagDictionary, diff};
use crate::tm::{FuzzyMatcher, MatchDecision, TmStore};
use crate::termbase::Termbase;

/// How a segment left the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    /// Exact memory match, stored target reused
    Reused,
    /// Fuzzy memory match revised by the provider
    Revised,
    /// Translated from scratch by the provider
    Translated,
    /// Source copied verbatim, nothing to translate
    Skipped(SkipReason),
    /// Provider attempts exhausted
    Failed(String),
    /// No qualifying memory match and no provider configured
    LeftUntranslated,
}

/// Per-segment record of what happened
#[derive(Debug, Clone)]
pub struct SegmentLog {
    pub id: u32,
    pub outcome: SegmentOutcome,
    /// Best memory score, when one qualified
    pub score: Option<f64>,
}

/// Progress notifications emitted while a run is in flight
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    SegmentDone { id: u32, outcome: SegmentOutcome },
}

/// Aggregate counts over one document run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub reused: usize,
    pub revised: usize,
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub untranslated: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &SegmentOutcome) {
        match outcome {
            SegmentOutcome::Reused => self.reused += 1,
            SegmentOutcome::Revised => self.revised += 1,
            SegmentOutcome::Translated => self.translated += 1,
            SegmentOutcome::Skipped(_) => self.skipped += 1,
            SegmentOutcome::Failed(_) => self.failed += 1,
            SegmentOutcome::LeftUntranslated => self.untranslated += 1,
        }
    }
}

/// Result of running the pipeline over a document's segments
#[derive(Debug, Clone)]
pub struct DocumentRun {
    /// Final translated text per trans-unit id, tags restored
    pub translations: HashMap<u32, String>,
    pub summary: RunSummary,
    pub log: Vec<SegmentLog>,
}

/// The per-document translation pipeline
pub struct Pipeline {
    codec: TagCodec,
    matcher: FuzzyMatcher,
    prompts: PromptBuilder,
    memory: TmStore,
    termbase: Option<Termbase>,
    translator: Option<Arc<dyn Translator>>,
    workers: usize,
    max_retries: usize,
    retry_delay: Duration,
}

impl Pipeline {
    /// Build a pipeline from configuration and the document's language pair
    pub fn new(config: &Config, source_language: &str, target_language: &str) -> Result<Self> {
        Ok(Self {
            codec: TagCodec::new(&config.tags)?,
            matcher: FuzzyMatcher::new(config.translation.fuzzy_threshold),
            prompts: PromptBuilder::new(source_language, target_language),
            memory: TmStore::new(),
            termbase: None,
            translator: None,
            workers: config.translation.workers.max(1),
            max_retries: config.translation.max_retries.max(1),
            retry_delay: Duration::from_millis(config.translation.retry_delay_ms),
        })
    }

    /// Seed the shared reuse memory
    pub fn with_memory(mut self, memory: TmStore) -> Self {
        self.memory = memory;
        self
    }

    /// Attach a termbase for glossary-constrained prompts
    pub fn with_termbase(mut self, termbase: Termbase) -> Self {
        self.termbase = Some(termbase);
        self
    }

    /// Attach a translation provider. Without one the pipeline runs in
    /// memory-only mode and fills exact matches only.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// The memory the pipeline reads and extends
    pub fn memory(&self) -> &TmStore {
        &self.memory
    }

    /// Process a document's segments concurrently.
    ///
    /// Locked and empty segments are never touched. The returned map holds
    /// final text only for segments that produced one; everything else is
    /// accounted for in the log and summary.
    pub async fn run(
        &self,
        segments: &[Segment],
        progress: Option<UnboundedSender<ProgressEvent>>,
    ) -> DocumentRun {
        let workload: Vec<&Segment> = segments.iter().filter(|s| s.is_translatable()).collect();
        info!(
            "Pipeline starting: {} of {} segments to process with {} workers",
            workload.len(),
            segments.len(),
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let results: Vec<SegmentResult> = stream::iter(workload)
            .map(|segment| {
                let semaphore = semaphore.clone();
                let progress = progress.clone();
                async move {
                    let _permit = semaphore.acquire().await.unwrap();
                    let result = self.process_segment(segment).await;
                    if let Some(sender) = progress {
                        let _ = sender.send(ProgressEvent::SegmentDone {
                            id: result.id,
                            outcome: result.outcome.clone(),
                        });
                    }
                    result
                }
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        let mut translations = HashMap::new();
        let mut summary = RunSummary {
            total: segments.len(),
            ..RunSummary::default()
        };
        let mut log = Vec::with_capacity(results.len());
        let mut sorted = results;
        sorted.sort_by_key(|r| r.id);
        for result in sorted {
            summary.record(&result.outcome);
            if let Some(text) = result.translation {
                translations.insert(result.id, text);
            }
            log.push(SegmentLog {
                id: result.id,
                outcome: result.outcome,
                score: result.score,
            });
        }

        info!(
            "Pipeline finished: {} reused, {} revised, {} translated, {} skipped, {} failed, {} left untranslated",
            summary.reused,
            summary.revised,
            summary.translated,
            summary.skipped,
            summary.failed,
            summary.untranslated
        );
        DocumentRun {
            translations,
            summary,
            log,
        }
    }

    async fn process_segment(&self, segment: &Segment) -> SegmentResult {
        if let Some(reason) = skip_reason(&segment.source) {
            debug!("Segment {} skipped ({:?}), copying source", segment.id, reason);
            return SegmentResult {
                id: segment.id,
                outcome: SegmentOutcome::Skipped(reason),
                translation: Some(segment.source.clone()),
                score: None,
            };
        }

        let (clean_source, tag_dict) = self.codec.extract(&segment.source);
        let decision = self
            .memory
            .decide(&clean_source, &self.matcher, |s| self.codec.extract(s).0);

        match decision {
            MatchDecision::Exact(m) => {
                debug!("Segment {} reused from memory (score 100)", segment.id);
                SegmentResult {
                    id: segment.id,
                    outcome: SegmentOutcome::Reused,
                    translation: Some(m.target),
                    score: Some(m.score),
                }
            }
            MatchDecision::Revise(m) => {
                let Some(translator) = &self.translator else {
                    return SegmentResult {
                        id: segment.id,
                        outcome: SegmentOutcome::LeftUntranslated,
                        translation: None,
                        score: Some(m.score),
                    };
                };
                let memory_target = self.codec.extract(&m.target).0;
                let glossary_terms = self.glossary_for(&clean_source);
                let prompt = self.prompts.revision_prompt(
                    &clean_source,
                    &memory_target,
                    &segment.context,
                    &glossary_terms,
                );
                let score = m.score;
                self.attempt(segment, translator.as_ref(), prompt, &clean_source, &tag_dict)
                    .await
                    .into_result(segment.id, SegmentOutcome::Revised, Some(score))
            }
            MatchDecision::NoMatch => {
                let Some(translator) = &self.translator else {
                    return SegmentResult {
                        id: segment.id,
                        outcome: SegmentOutcome::LeftUntranslated,
                        translation: None,
                        score: None,
                    };
                };
                let glossary_terms = self.glossary_for(&clean_source);
                let prompt =
                    self.prompts
                        .translation_prompt(&clean_source, &segment.context, &glossary_terms);
                self.attempt(segment, translator.as_ref(), prompt, &clean_source, &tag_dict)
                    .await
                    .into_result(segment.id, SegmentOutcome::Translated, None)
            }
        }
    }

    fn glossary_for<'a>(&'a self, clean_source: &str) -> Vec<&'a crate::termbase::TermEntry> {
        self.termbase
            .as_ref()
            .map(|tb| tb.relevant_terms(clean_source))
            .unwrap_or_default()
    }

    /// Drive the provider with retries until the output is usable
    async fn attempt(
        &self,
        segment: &Segment,
        translator: &dyn Translator,
        prompt: String,
        clean_source: &str,
        tag_dict: &TagDictionary,
    ) -> AttemptResult {
        let request = TranslationRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            prompt,
            source_text: clean_source.to_string(),
        };

        let mut last_reason = String::new();
        for attempt in 1..=self.max_retries {
            match translator.translate(&request).await {
                Ok(raw) => {
                    let corrected = correct_response(&raw, clean_source);
                    if let Some(reason) = retry_reason(clean_source, &corrected) {
                        warn!(
                            "Segment {} attempt {}/{} rejected: {}",
                            segment.id, attempt, self.max_retries, reason
                        );
                        last_reason = reason;
                    } else {
                        let final_text = self.finalize_tags(&corrected, tag_dict, segment.id);
                        if self.memory.append(&segment.source, &final_text) {
                            debug!("Segment {} appended to memory", segment.id);
                        }
                        return AttemptResult::Done(final_text);
                    }
                }
                Err(e) => {
                    warn!(
                        "Segment {} attempt {}/{} failed via {}: {}",
                        segment.id,
                        attempt,
                        self.max_retries,
                        translator.name(),
                        e
                    );
                    last_reason = e.to_string();
                }
            }
            if attempt < self.max_retries {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
        AttemptResult::Exhausted(last_reason)
    }

    /// Restore protected tags into a corrected translation.
    ///
    /// When every placeholder survived, restoration is a straight
    /// substitution. Otherwise the survivors are restored and the missing
    /// ones reported; their markup is dropped rather than guessed back in.
    fn finalize_tags(&self, corrected: &str, tag_dict: &TagDictionary, id: u32) -> String {
        if tag_dict.is_empty() {
            return corrected.to_string();
        }
        if self.codec.check_for_tags(corrected, tag_dict) {
            return self.codec.restore(corrected, tag_dict);
        }

        let mut survivors = TagDictionary::new();
        for (key, value) in tag_dict.iter() {
            if corrected.contains(key) {
                survivors.insert(key.to_string(), value.to_string());
            }
        }
        let discrepancies = diff(tag_dict, &survivors);
        warn!(
            "Segment {}: translation lost placeholders {:?}, restoring survivors only",
            id, discrepancies.missing_in_target
        );
        self.codec.restore(corrected, &survivors)
    }
}

/// Outcome of the retry loop for one segment
enum AttemptResult {
    Done(String),
    Exhausted(String),
}

impl AttemptResult {
    fn into_result(self, id: u32, success: SegmentOutcome, score: Option<f64>) -> SegmentResult {
        match self {
            AttemptResult::Done(text) => SegmentResult {
                id,
                outcome: success,
                translation: Some(text),
                score,
            },
            AttemptResult::Exhausted(reason) => SegmentResult {
                id,
                outcome: SegmentOutcome::Failed(reason),
                translation: None,
                score,
            },
        }
    }
}

struct SegmentResult {
    id: u32,
    outcome: SegmentOutcome,
    translation: Option<String>,
    score: Option<f64>,
}
