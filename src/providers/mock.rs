/*!
 * Mock translation provider for testing.
 *
 * Behaviors cover the paths the pipeline has to handle:
 * - `MockTranslator::echo()` - returns the source text, placeholders intact
 * - `MockTranslator::scripted(..)` - fixed answers per source text
 * - `MockTranslator::failing()` - every request errors
 * - `MockTranslator::dropping_first_tag()` - loses the first placeholder
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::{TranslationRequest, Translator};

/// Behavior mode for the mock translator
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the source text unchanged
    Echo,
    /// Return a fixed answer per source text, echoing unknown sources
    Scripted(HashMap<String, String>),
    /// Fail every request
    Failing,
    /// Echo the source with its first placeholder removed
    DropFirstTag,
}

/// Mock provider for exercising pipeline behavior without a real model
#[derive(Debug)]
pub struct MockTranslator {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Translator that parrots the source text back
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Translator with canned answers keyed by source text
    pub fn scripted(answers: HashMap<String, String>) -> Self {
        Self::new(MockBehavior::Scripted(answers))
    }

    /// Translator that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Translator that drops the first placeholder from its output
    pub fn dropping_first_tag() -> Self {
        Self::new(MockBehavior::DropFirstTag)
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Echo => Ok(request.source_text.clone()),
            MockBehavior::Scripted(answers) => Ok(answers
                .get(&request.source_text)
                .cloned()
                .unwrap_or_else(|| request.source_text.clone())),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::DropFirstTag => Ok(request.source_text.replacen("<UTAG1/>", "", 1)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
