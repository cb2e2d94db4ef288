// Error types for a single check invocation.

use proofmap_core::range::TextRange;
use proofmap_core::token::TokenError;

/// Errors that abort a check.
///
/// Backend failures are not in this list: they are absorbed per chunk by the
/// backend adapter and only reduce the number of issues found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The caller cancelled the check. No partial result is produced.
    #[error("check cancelled")]
    Cancelled,

    /// A canonical range matched no token. Indicates broken token mapping or
    /// chunk offsetting.
    #[error("no tokens for canonical range {range}")]
    NoTokensForRange { range: TextRange },

    /// The token stream handed to the checker is malformed.
    #[error("invalid token stream: {0}")]
    InvalidTokens(#[from] TokenError),
}

impl CheckError {
    /// True for the variants that point at a bug in token construction or
    /// offset bookkeeping rather than at the input or the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, CheckError::NoTokensForRange { .. })
    }
}
