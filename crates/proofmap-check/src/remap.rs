// Range remapper: canonical-text ranges back to source-document ranges.

use proofmap_core::range::TextRange;
use proofmap_core::token::TextToken;
use proofmap_core::typo::Typo;

use crate::canonical::TokenMapping;
use crate::error::CheckError;

/// Maps canonical ranges (untrimmed buffer coordinates) onto the document
/// using the token mappings recorded by the canonical text builder.
#[derive(Debug, Clone, Copy)]
pub struct Remapper<'a> {
    tokens: &'a [TextToken],
    mappings: &'a [TokenMapping],
}

impl<'a> Remapper<'a> {
    pub fn new(tokens: &'a [TextToken], mappings: &'a [TokenMapping]) -> Self {
        Self { tokens, mappings }
    }

    /// Mappings whose canonical range touches `range`, in canonical order.
    ///
    /// A token starting exactly at `range.end` counts as touching.
    pub fn mappings_for(&self, range: TextRange) -> impl Iterator<Item = &'a TokenMapping> + use<'a> {
        self.mappings
            .iter()
            .filter(move |m| m.range.end > range.start && m.range.start <= range.end)
    }

    /// Tokens whose canonical range touches `range`.
    pub fn tokens_for(&self, range: TextRange) -> impl Iterator<Item = &'a TextToken> + use<'a> {
        let tokens = self.tokens;
        self.mappings_for(range).map(move |m| &tokens[m.token_index])
    }

    /// Map one canonical range to document coordinates.
    ///
    /// The start is measured from the first touching token and the end from
    /// the last token holding a character of the range, so ranges spanning
    /// several tokens stretch over whatever lies between them in the
    /// document. A token that merely starts at `range.end` does not move the
    /// end.
    pub fn remap_range(&self, range: TextRange) -> Result<TextRange, CheckError> {
        let mut touching = self.mappings_for(range);
        let first = touching.next().ok_or(CheckError::NoTokensForRange { range })?;
        let last = touching
            .filter(|m| range.is_empty() || m.range.start < range.end)
            .last()
            .unwrap_or(first);

        let start = self.source_position(first, range.start, range)?;
        let end = self.source_position(last, range.end, range)?;
        if end < start {
            return Err(CheckError::NoTokensForRange { range });
        }
        Ok(TextRange::new(start, end))
    }

    /// Map both ranges of a typo. Returns `(error_range, pattern_range)`.
    pub fn remap_typo(&self, typo: &Typo) -> Result<(TextRange, TextRange), CheckError> {
        Ok((
            self.remap_range(typo.error_range)?,
            self.remap_range(typo.pattern_range)?,
        ))
    }

    fn source_position(
        &self,
        mapping: &TokenMapping,
        canonical: usize,
        range: TextRange,
    ) -> Result<usize, CheckError> {
        let within = canonical
            .checked_sub(mapping.range.start)
            .ok_or(CheckError::NoTokensForRange { range })?;
        Ok(self.tokens[mapping.token_index].source_offset + within + mapping.shift)
    }
}
