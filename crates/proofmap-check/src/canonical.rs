// Canonical text builder: flattens tokens into the single string a grammar
// backend checks, and records where each token ended up.

use proofmap_core::character::{is_whitespace, leading_trim_len, trailing_trim_len};
use proofmap_core::range::TextRange;
use proofmap_core::token::TextToken;

use crate::rewrite::{RewriteRule, apply_rules};

/// Number of leading characters of a token eligible for whitespace collapsing.
const COLLAPSE_WINDOW: usize = 2;

// ---------------------------------------------------------------------------
// TokenMapping
// ---------------------------------------------------------------------------

/// Where a `Normal` token landed in the canonical buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMapping {
    /// Index of the token in the list given to the builder.
    pub token_index: usize,
    /// Range in the untrimmed canonical buffer.
    pub range: TextRange,
    /// Characters dropped from the start of the token by whitespace collapsing.
    pub shift: usize,
}

// ---------------------------------------------------------------------------
// CanonicalText
// ---------------------------------------------------------------------------

/// The checkable string plus the bookkeeping needed to map back.
///
/// `text` is trimmed; mapping ranges are not. A position `i` in `text`
/// corresponds to position `i + offset` in mapping coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalText {
    text: Vec<char>,
    offset: usize,
    mappings: Vec<TokenMapping>,
}

impl CanonicalText {
    /// Trimmed canonical characters.
    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// Trimmed canonical text as a string.
    pub fn as_string(&self) -> String {
        self.text.iter().collect()
    }

    /// Number of characters removed from the front by trimming.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Mappings of `Normal` tokens, in canonical order.
    pub fn mappings(&self) -> &[TokenMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if there is nothing to send to a backend.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Convert a range in trimmed text to mapping coordinates.
    pub fn untrimmed(&self, range: TextRange) -> TextRange {
        range.shifted(self.offset)
    }
}

// ---------------------------------------------------------------------------
// CanonicalTextBuilder
// ---------------------------------------------------------------------------

/// Builds [`CanonicalText`] from a token list.
#[derive(Default)]
pub struct CanonicalTextBuilder {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl CanonicalTextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rewrite rule. Rules run in the order they were added.
    pub fn with_rule(mut self, rule: impl RewriteRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Flatten `tokens` into canonical text.
    ///
    /// `Stealth` tokens contribute nothing. Each `Normal` token is rewritten,
    /// then appended with its first two characters dropped when they are
    /// whitespace following whitespace (or following nothing). Finally the
    /// buffer is trimmed of surrounding quotes and whitespace, end first.
    pub fn build(&self, tokens: &[TextToken]) -> CanonicalText {
        let mut buffer: Vec<char> = Vec::new();
        let mut mappings = Vec::new();

        for (token_index, token) in tokens.iter().enumerate() {
            if !token.is_normal() {
                continue;
            }
            let rewritten = apply_rules(&token.text, &self.rules);
            let start = buffer.len();
            let mut shift = 0;

            for (i, c) in rewritten.chars().enumerate() {
                let after_whitespace = buffer.last().is_none_or(|&last| is_whitespace(last));
                if i < COLLAPSE_WINDOW && is_whitespace(c) && after_whitespace {
                    shift += 1;
                    continue;
                }
                buffer.push(c);
            }

            mappings.push(TokenMapping {
                token_index,
                range: TextRange::new(start, buffer.len()),
                shift,
            });
        }

        let trailing = trailing_trim_len(&buffer);
        buffer.truncate(buffer.len() - trailing);
        let offset = leading_trim_len(&buffer);
        let text = buffer.split_off(offset);

        CanonicalText {
            text,
            offset,
            mappings,
        }
    }
}
