// proofmap-check: grammar-check text mapping engine.
//
// Flattens document tokens into canonical text, chunks it, runs a grammar
// backend per chunk and maps every reported issue back onto the document.

pub mod backend;
pub mod cancel;
pub mod canonical;
pub mod checker;
pub mod chunker;
pub mod config;
pub mod error;
pub mod filter;
pub mod remap;
pub mod rewrite;

pub use backend::{
    BackendAdapter, BackendError, BackendFactory, BackendHandle, BackendRegistry, FixedLanguage,
    GrammarBackend, LanguageDetector,
};
pub use cancel::CancellationToken;
pub use checker::Checker;
pub use config::{CheckerConfig, ChunkLimits, ConfigError, RegistryConfig};
pub use error::CheckError;
pub use filter::{AcceptAll, AcceptancePolicy};
pub use rewrite::RewriteRule;
