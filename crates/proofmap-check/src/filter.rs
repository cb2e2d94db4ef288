// Absorption and rule filtering of remapped typos.

use hashbrown::HashSet;
use proofmap_core::range::TextRange;
use proofmap_core::token::{SourceRef, TextToken};
use proofmap_core::typo::{RemappedTypo, Typo};
use tracing::{trace, warn};

use crate::error::CheckError;
use crate::remap::Remapper;

// ---------------------------------------------------------------------------
// AcceptancePolicy
// ---------------------------------------------------------------------------

/// Per-document-kind veto over typos, applied after remapping.
///
/// Ranges are in document coordinates.
pub trait AcceptancePolicy: Send + Sync {
    fn accepts(&self, root: &SourceRef, error_range: TextRange, pattern_range: TextRange) -> bool;
}

/// Policy that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AcceptancePolicy for AcceptAll {
    fn accepts(&self, _root: &SourceRef, _error: TextRange, _pattern: TextRange) -> bool {
        true
    }
}

impl<F> AcceptancePolicy for F
where
    F: Fn(&SourceRef, TextRange, TextRange) -> bool + Send + Sync,
{
    fn accepts(&self, root: &SourceRef, error_range: TextRange, pattern_range: TextRange) -> bool {
        self(root, error_range, pattern_range)
    }
}

// ---------------------------------------------------------------------------
// Gaps
// ---------------------------------------------------------------------------

/// Parts of `root` not covered by any `Normal` token, in document order.
pub fn compute_gaps(root: TextRange, tokens: &[TextToken]) -> Vec<TextRange> {
    let mut gaps = Vec::new();
    let mut cursor = root.start;
    for token in tokens.iter().filter(|t| t.is_normal()) {
        let range = token.source_range();
        if range.start > cursor {
            gaps.push(TextRange::new(cursor, range.start.min(root.end)));
        }
        cursor = cursor.max(range.end);
    }
    if cursor < root.end {
        gaps.push(TextRange::new(cursor, root.end));
    }
    gaps.retain(|gap| !gap.is_empty());
    gaps
}

/// True if a pattern range reaches into a gap.
pub fn overlaps_gap(pattern: TextRange, gap: TextRange) -> bool {
    pattern.contains(gap.start) || gap.contains(pattern.start) || pattern.intersects(&gap)
}

// ---------------------------------------------------------------------------
// TypoFilter
// ---------------------------------------------------------------------------

/// Remaps typos for one check and drops the ones that must not be reported.
pub struct TypoFilter<'a> {
    root: &'a SourceRef,
    remapper: Remapper<'a>,
    gaps: Vec<TextRange>,
    policy: &'a dyn AcceptancePolicy,
    suppressed_rules: Option<&'a HashSet<String>>,
    suppressed_categories: Option<&'a HashSet<String>>,
}

impl<'a> TypoFilter<'a> {
    pub fn new(
        root: &'a SourceRef,
        tokens: &'a [TextToken],
        remapper: Remapper<'a>,
        policy: &'a dyn AcceptancePolicy,
    ) -> Self {
        Self {
            root,
            remapper,
            gaps: compute_gaps(root.range, tokens),
            policy,
            suppressed_rules: None,
            suppressed_categories: None,
        }
    }

    /// Rules and categories to drop regardless of token ignore sets.
    pub fn with_suppressed(
        mut self,
        rules: &'a HashSet<String>,
        categories: &'a HashSet<String>,
    ) -> Self {
        self.suppressed_rules = Some(rules);
        self.suppressed_categories = Some(categories);
        self
    }

    pub fn gaps(&self) -> &[TextRange] {
        &self.gaps
    }

    /// Remap `typo` and decide whether to keep it.
    ///
    /// `typo` must be in untrimmed canonical coordinates. Returns `Ok(None)`
    /// for typos that land outside the root, are absorbed, are rejected by
    /// the policy or are suppressed.
    pub fn admit(&self, typo: Typo) -> Result<Option<RemappedTypo>, CheckError> {
        let (error_range, pattern_range) = self.remapper.remap_typo(&typo)?;
        if let Some(range) = [error_range, pattern_range]
            .into_iter()
            .find(|range| !self.root.range.contains_range(range))
        {
            // Char-to-string rewrites can push positions past the source text.
            warn!(
                rule = %typo.rule_id,
                %range,
                root = %self.root.range,
                "remapped range outside root"
            );
            return Ok(None);
        }

        if let Some(gap) = self.gaps.iter().find(|gap| overlaps_gap(pattern_range, **gap)) {
            trace!(rule = %typo.rule_id, %pattern_range, %gap, "absorbed");
            return Ok(None);
        }
        if !self.policy.accepts(self.root, error_range, pattern_range) {
            trace!(rule = %typo.rule_id, %error_range, "rejected by policy");
            return Ok(None);
        }
        if self.is_suppressed(&typo) {
            trace!(rule = %typo.rule_id, category = %typo.category, "suppressed");
            return Ok(None);
        }

        Ok(Some(RemappedTypo::new(
            self.root.clone(),
            typo,
            error_range,
            pattern_range,
        )))
    }

    fn is_suppressed(&self, typo: &Typo) -> bool {
        if self.suppressed_rules.is_some_and(|rules| rules.contains(&typo.rule_id))
            || self
                .suppressed_categories
                .is_some_and(|categories| categories.contains(&typo.category))
        {
            return true;
        }
        let touched = typo.error_range.union(&typo.pattern_range);
        self.remapper.tokens_for(touched).any(|token| {
            token.ignored_rules.contains(&typo.rule_id)
                || token.ignored_categories.contains(&typo.category)
        })
    }
}
