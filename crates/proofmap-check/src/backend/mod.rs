// Backend boundary: language detection, grammar backends and the adapter
// that runs them per chunk.

pub mod registry;

use std::sync::Arc;

use proofmap_core::range::TextRange;
use proofmap_core::typo::{Language, RawIssue, Typo};
use tracing::{debug, warn};

use crate::chunker::Chunk;

pub use registry::{BackendFactory, BackendRegistry};

/// Failures reported by backends and language detectors.
///
/// These never abort a check: the adapter logs them and the affected chunk
/// contributes no issues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("language detection failed: {0}")]
    Detection(String),

    #[error("{language} backend failed: {message}")]
    Check { language: Language, message: String },

    #[error("failed to build {language} backend: {message}")]
    Build { language: Language, message: String },
}

/// A grammar and spelling checker for natural language text.
///
/// Issue ranges are relative to the `text` passed in.
pub trait GrammarBackend: Send + Sync {
    fn check(&self, language: &Language, text: &str) -> Result<Vec<RawIssue>, BackendError>;
}

/// Shared handle to a backend instance.
pub type BackendHandle = Arc<dyn GrammarBackend>;

/// Guesses the language of a piece of text.
pub trait LanguageDetector: Send + Sync {
    /// `Ok(None)` means the language could not be determined.
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError>;
}

/// Detector for callers that already know the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLanguage(pub Language);

impl LanguageDetector for FixedLanguage {
    fn detect(&self, _text: &str) -> Result<Option<Language>, BackendError> {
        Ok(Some(self.0.clone()))
    }
}

impl<F> LanguageDetector for F
where
    F: Fn(&str) -> Option<Language> + Send + Sync,
{
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError> {
        Ok(self(text))
    }
}

// ---------------------------------------------------------------------------
// BackendAdapter
// ---------------------------------------------------------------------------

/// Runs language detection and the matching backend for one chunk at a time.
pub struct BackendAdapter {
    detector: Box<dyn LanguageDetector>,
    registry: Arc<BackendRegistry>,
}

impl BackendAdapter {
    pub fn new(detector: impl LanguageDetector + 'static, registry: Arc<BackendRegistry>) -> Self {
        Self {
            detector: Box::new(detector),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    /// Check one chunk and return its typos in canonical coordinates.
    ///
    /// Detection failures, unknown languages and backend errors all yield an
    /// empty list.
    pub fn check_chunk(&self, chunk: &Chunk) -> Vec<Typo> {
        let language = match self.detector.detect(&chunk.text) {
            Ok(Some(language)) => language,
            Ok(None) => {
                debug!(
                    chunk_start = chunk.range.start,
                    chunk_end = chunk.range.end,
                    "language not detected"
                );
                return Vec::new();
            }
            Err(error) => {
                warn!(
                    chunk_start = chunk.range.start,
                    chunk_end = chunk.range.end,
                    %error,
                    "language detection failed"
                );
                return Vec::new();
            }
        };

        let Some(backend) = self.registry.get(&language) else {
            debug!(%language, "no backend registered");
            return Vec::new();
        };

        let issues = match backend.check(&language, &chunk.text) {
            Ok(issues) => issues,
            Err(error) => {
                warn!(
                    %language,
                    chunk_start = chunk.range.start,
                    chunk_end = chunk.range.end,
                    %error,
                    "grammar check failed"
                );
                return Vec::new();
            }
        };

        let bounds = TextRange::new(0, chunk.range.len());
        issues
            .into_iter()
            .filter(|issue| {
                let inside = bounds.contains_range(&issue.error_range)
                    && bounds.contains_range(&issue.pattern_range);
                if !inside {
                    warn!(
                        %language,
                        rule = %issue.rule_id,
                        error_range = %issue.error_range,
                        chunk_len = bounds.end,
                        "backend issue outside chunk"
                    );
                }
                inside
            })
            .map(|issue| Typo::from_raw(issue, chunk.range.start, language.clone()))
            .collect()
    }
}
