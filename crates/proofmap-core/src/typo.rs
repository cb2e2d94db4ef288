// Issue types flowing out of the grammar backend and out of the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::range::TextRange;
use crate::token::SourceRef;

/// A natural language identifier such as `en` or `de-CH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

// ---------------------------------------------------------------------------
// RawIssue
// ---------------------------------------------------------------------------

/// An issue as reported by a grammar backend, in the coordinates of the text
/// the backend was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawIssue {
    /// Precise span to underline.
    pub error_range: TextRange,
    /// Broader span the rule matched against.
    pub pattern_range: TextRange,
    pub rule_id: String,
    pub category: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl RawIssue {
    /// Create an issue with no suggestions.
    pub fn new(
        error_range: TextRange,
        pattern_range: TextRange,
        rule_id: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            error_range,
            pattern_range,
            rule_id: rule_id.into(),
            category: category.into(),
            suggestions: Vec::new(),
        }
    }

    /// Attach suggested replacements.
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

// ---------------------------------------------------------------------------
// Typo
// ---------------------------------------------------------------------------

/// A backend issue positioned in canonical-text coordinates, tagged with the
/// language it was checked in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Typo {
    pub error_range: TextRange,
    pub pattern_range: TextRange,
    pub rule_id: String,
    pub category: String,
    pub language: Language,
    pub suggestions: Vec<String>,
}

impl Typo {
    /// Position a raw issue by moving both of its ranges right by `offset`.
    pub fn from_raw(issue: RawIssue, offset: usize, language: Language) -> Self {
        Self {
            error_range: issue.error_range.shifted(offset),
            pattern_range: issue.pattern_range.shifted(offset),
            rule_id: issue.rule_id,
            category: issue.category,
            language,
            suggestions: issue.suggestions,
        }
    }

    /// Same typo with both ranges moved right by `delta`.
    pub fn shifted(&self, delta: usize) -> Self {
        Self {
            error_range: self.error_range.shifted(delta),
            pattern_range: self.pattern_range.shifted(delta),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// RemappedTypo
// ---------------------------------------------------------------------------

/// A typo whose ranges point into the original document. This is what the
/// engine hands to reporting layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemappedTypo {
    /// Root element the check ran on.
    pub root: SourceRef,
    /// Span to highlight, in document coordinates.
    pub error_range: TextRange,
    /// Span the rule matched against, in document coordinates.
    pub pattern_range: TextRange,
    pub rule_id: String,
    pub category: String,
    pub language: Language,
    pub suggestions: Vec<String>,
}

impl RemappedTypo {
    /// Re-home a canonical typo onto document ranges.
    pub fn new(
        root: SourceRef,
        typo: Typo,
        error_range: TextRange,
        pattern_range: TextRange,
    ) -> Self {
        Self {
            root,
            error_range,
            pattern_range,
            rule_id: typo.rule_id,
            category: typo.category,
            language: typo.language,
            suggestions: typo.suggestions,
        }
    }

    /// The highlighted text, taken from `document` by character offsets.
    ///
    /// Returns `None` if the document no longer covers the range.
    pub fn highlighted<'a>(&self, document: &'a str) -> Option<&'a str> {
        let mut indices = document
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(document.len()));
        let start = indices.nth(self.error_range.start)?;
        let end = if self.error_range.is_empty() {
            start
        } else {
            indices.nth(self.error_range.len() - 1)?
        };
        document.get(start..end)
    }
}
