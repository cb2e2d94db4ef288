// Checker facade: one call turns a token list into remapped, filtered typos.
//
// Pipeline: canonical text -> chunks -> backend per chunk -> dedupe ->
// remap -> absorption and rule filtering.

use indexmap::IndexSet;
use proofmap_core::token::{SourceRef, TextToken, validate_token_order};
use proofmap_core::typo::{RemappedTypo, Typo};
use tracing::{debug, debug_span};

use crate::backend::BackendAdapter;
use crate::cancel::CancellationToken;
use crate::canonical::CanonicalTextBuilder;
use crate::chunker::Chunker;
use crate::config::{CheckerConfig, ConfigError};
use crate::error::CheckError;
use crate::filter::{AcceptAll, AcceptancePolicy, TypoFilter};
use crate::remap::Remapper;
use crate::rewrite::RewriteRule;

/// Grammar-check orchestrator for document subtrees.
///
/// Holds no per-check state: the same checker can serve concurrent checks
/// from several threads.
pub struct Checker {
    config: CheckerConfig,
    chunker: Chunker,
    builder: CanonicalTextBuilder,
    adapter: BackendAdapter,
    policy: Box<dyn AcceptancePolicy>,
}

impl Checker {
    /// Create a checker. Fails if `config` does not validate.
    pub fn new(config: CheckerConfig, adapter: BackendAdapter) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            chunker: Chunker::new(config.chunking),
            config,
            builder: CanonicalTextBuilder::new(),
            adapter,
            policy: Box::new(AcceptAll),
        })
    }

    /// Replace the acceptance policy.
    pub fn with_policy(mut self, policy: impl AcceptancePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Add a character rewrite rule for canonical text.
    pub fn with_rule(mut self, rule: impl RewriteRule + 'static) -> Self {
        self.builder = self.builder.with_rule(rule);
        self
    }

    /// Check the tokens of `root` and return the typos to report, in the
    /// order the backend found them.
    ///
    /// Cancellation is polled on entry and before every backend call.
    pub fn check(
        &self,
        root: &SourceRef,
        tokens: &[TextToken],
        cancel: &CancellationToken,
    ) -> Result<IndexSet<RemappedTypo>, CheckError> {
        cancel.check()?;
        validate_token_order(tokens)?;
        let _span = debug_span!("check", root = %root.element_id, tokens = tokens.len()).entered();

        let canonical = self.builder.build(tokens);
        if canonical.is_empty() {
            debug!("nothing to check");
            return Ok(IndexSet::new());
        }

        let mut typos: IndexSet<Typo> = IndexSet::new();
        for chunk in self.chunker.chunks(canonical.chars()) {
            cancel.check()?;
            typos.extend(self.adapter.check_chunk(&chunk));
        }

        let remapper = Remapper::new(tokens, canonical.mappings());
        let filter = TypoFilter::new(root, tokens, remapper, self.policy.as_ref())
            .with_suppressed(
                &self.config.suppressed_rules,
                &self.config.suppressed_categories,
            );

        let mut result = IndexSet::with_capacity(typos.len());
        for typo in typos {
            if let Some(remapped) = filter.admit(typo.shifted(canonical.offset()))? {
                result.insert(remapped);
            }
        }
        debug!(
            canonical_len = canonical.len(),
            reported = result.len(),
            "check finished"
        );
        Ok(result)
    }
}
