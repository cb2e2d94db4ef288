//! Configuration for the checker.
//!
//! [`CheckerConfig`] collects the chunking thresholds, the languages the
//! backend registry should load, and the globally suppressed rules and
//! categories. It is plain data: cheap to clone, serializable, and meant to be
//! read once at startup (see [`CheckerConfig::from_json`]) and validated
//! before use.
//!
//! ```json
//! {
//!   "chunking": { "too_big_chars": 50000, "max_chars": 10000, "min_chars": 2, "min_words": 3 },
//!   "registry": { "languages": ["en", "de"] },
//!   "suppressed_rules": ["WHITESPACE_RULE"],
//!   "suppressed_categories": []
//! }
//! ```

use hashbrown::HashSet;
use proofmap_core::typo::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// ChunkLimits
// ---------------------------------------------------------------------------

/// Size thresholds used to split canonical text into backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkLimits {
    /// Texts longer than this are not checked at all.
    pub too_big_chars: usize,
    /// Upper bound (exclusive) on the length of a single chunk.
    pub max_chars: usize,
    /// Chunks shorter than this are not worth checking.
    pub min_chars: usize,
    /// Chunks with fewer words than this are not worth checking.
    pub min_words: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            too_big_chars: 50_000,
            max_chars: 10_000,
            min_chars: 2,
            min_words: 3,
        }
    }
}

impl ChunkLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chars == 0 {
            return Err(ConfigError::Invalid(
                "chunking.max_chars must be greater than zero".into(),
            ));
        }
        if self.min_chars > self.max_chars {
            return Err(ConfigError::Invalid(format!(
                "chunking.min_chars ({}) exceeds chunking.max_chars ({})",
                self.min_chars, self.max_chars
            )));
        }
        if self.max_chars > self.too_big_chars {
            return Err(ConfigError::Invalid(format!(
                "chunking.max_chars ({}) exceeds chunking.too_big_chars ({})",
                self.max_chars, self.too_big_chars
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Which backends the registry builds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Languages to load a backend for. Duplicates are ignored.
    pub languages: Vec<Language>,
}

impl RegistryConfig {
    pub fn with_languages<I, L>(languages: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Language>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// CheckerConfig
// ---------------------------------------------------------------------------

/// Top-level checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub chunking: ChunkLimits,
    pub registry: RegistryConfig,
    /// Rule ids never reported, whatever the tokens say.
    pub suppressed_rules: HashSet<String>,
    /// Categories never reported, whatever the tokens say.
    pub suppressed_categories: HashSet<String>,
}

impl CheckerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CheckerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunking.validate()?;
        if self.suppressed_rules.iter().any(|r| r.is_empty()) {
            return Err(ConfigError::Invalid(
                "suppressed_rules contains an empty rule id".into(),
            ));
        }
        Ok(())
    }
}
