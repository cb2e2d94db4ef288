// Text token model: source fragments handed to the canonical text builder.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::range::TextRange;

// ---------------------------------------------------------------------------
// TokenBehavior
// ---------------------------------------------------------------------------

/// How a token takes part in the canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBehavior {
    /// Text is appended to the canonical string and mapped back.
    #[default]
    Normal,
    /// Text is left out of the canonical string; its source span becomes a gap.
    Stealth,
}

// ---------------------------------------------------------------------------
// SourceRef
// ---------------------------------------------------------------------------

/// Weak handle back to the document element a token (or a whole check) came
/// from.
///
/// The engine only carries it through to the results. Downstream code
/// re-resolves `element_id` against the current document, which may have
/// changed since the check ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    /// Caller-defined identifier of the element.
    pub element_id: String,
    /// Full source range of the element.
    pub range: TextRange,
}

impl SourceRef {
    pub fn new(element_id: impl Into<String>, range: TextRange) -> Self {
        Self {
            element_id: element_id.into(),
            range,
        }
    }
}

// ---------------------------------------------------------------------------
// TextToken
// ---------------------------------------------------------------------------

/// A fragment of source text produced by a token provider.
///
/// Tokens are immutable once built, ordered by `source_offset` and never
/// overlap in source coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextToken {
    /// Element the fragment belongs to.
    pub source: SourceRef,
    /// The fragment text exactly as it appears in the document.
    pub text: String,
    /// Character offset of the fragment in the document.
    pub source_offset: usize,
    #[serde(default)]
    pub behavior: TokenBehavior,
    /// Rule ids that must not be reported for typos touching this token.
    #[serde(default)]
    pub ignored_rules: HashSet<String>,
    /// Categories that must not be reported for typos touching this token.
    #[serde(default)]
    pub ignored_categories: HashSet<String>,
}

impl TextToken {
    /// A `Normal` token whose source element is the fragment itself.
    pub fn normal(text: impl Into<String>, source_offset: usize) -> Self {
        Self::with_behavior(text.into(), source_offset, TokenBehavior::Normal)
    }

    /// A `Stealth` token whose source element is the fragment itself.
    pub fn stealth(text: impl Into<String>, source_offset: usize) -> Self {
        Self::with_behavior(text.into(), source_offset, TokenBehavior::Stealth)
    }

    fn with_behavior(text: String, source_offset: usize, behavior: TokenBehavior) -> Self {
        let len = text.chars().count();
        let source = SourceRef::new(
            format!("@{source_offset}"),
            TextRange::new(source_offset, source_offset + len),
        );
        Self {
            source,
            text,
            source_offset,
            behavior,
            ignored_rules: HashSet::new(),
            ignored_categories: HashSet::new(),
        }
    }

    /// Replace the source element handle.
    pub fn in_element(mut self, source: SourceRef) -> Self {
        self.source = source;
        self
    }

    /// Add a rule id to the ignore set.
    pub fn ignoring_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.ignored_rules.insert(rule_id.into());
        self
    }

    /// Add a category to the ignore set.
    pub fn ignoring_category(mut self, category: impl Into<String>) -> Self {
        self.ignored_categories.insert(category.into());
        self
    }

    pub fn is_normal(&self) -> bool {
        self.behavior == TokenBehavior::Normal
    }

    /// Length of the fragment in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Source span covered by the fragment.
    pub fn source_range(&self) -> TextRange {
        TextRange::new(self.source_offset, self.source_offset + self.char_len())
    }
}

// ---------------------------------------------------------------------------
// Token stream validation
// ---------------------------------------------------------------------------

/// Malformed token streams.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// A token starts before the token preceding it.
    #[error("token {index} at offset {offset} starts before the previous token at {previous}")]
    OutOfOrder {
        index: usize,
        offset: usize,
        previous: usize,
    },

    /// A token starts inside the span of the token preceding it.
    #[error("token {index} at offset {offset} overlaps the previous token ending at {previous_end}")]
    Overlapping {
        index: usize,
        offset: usize,
        previous_end: usize,
    },
}

/// Check that tokens are ordered by `source_offset` and do not overlap.
pub fn validate_token_order(tokens: &[TextToken]) -> Result<(), TokenError> {
    for (index, pair) in tokens.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.source_offset < prev.source_offset {
            return Err(TokenError::OutOfOrder {
                index: index + 1,
                offset: next.source_offset,
                previous: prev.source_offset,
            });
        }
        let previous_end = prev.source_range().end;
        if next.source_offset < previous_end {
            return Err(TokenError::Overlapping {
                index: index + 1,
                offset: next.source_offset,
                previous_end,
            });
        }
    }
    Ok(())
}
