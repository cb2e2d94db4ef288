// proofmap-core: shared types for grammar-check text mapping.
//
// All offsets in this crate are character (Unicode scalar value) indices.

pub mod character;
pub mod range;
pub mod token;
pub mod typo;

pub use range::TextRange;
pub use token::{SourceRef, TextToken, TokenBehavior, TokenError};
pub use typo::{Language, RawIssue, RemappedTypo, Typo};
