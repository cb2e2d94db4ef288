// Backend registry: one backend instance per configured language, built
// once from configuration and rebuilt only on an explicit reload.

use hashbrown::HashMap;
use parking_lot::RwLock;
use proofmap_core::typo::Language;
use tracing::{debug, warn};

use super::{BackendError, BackendHandle};
use crate::config::RegistryConfig;

/// Builds a backend for a language.
pub trait BackendFactory: Send + Sync {
    fn build(&self, language: &Language) -> Result<BackendHandle, BackendError>;
}

impl<F> BackendFactory for F
where
    F: Fn(&Language) -> Result<BackendHandle, BackendError> + Send + Sync,
{
    fn build(&self, language: &Language) -> Result<BackendHandle, BackendError> {
        self(language)
    }
}

struct RegistryState {
    config: RegistryConfig,
    backends: HashMap<Language, BackendHandle>,
}

/// Holds the backend instances shared by every check.
///
/// Constructed once and injected into the checker. Lookups take a read lock
/// and clone an `Arc`, so checks on different threads do not contend.
pub struct BackendRegistry {
    factory: Box<dyn BackendFactory>,
    state: RwLock<RegistryState>,
}

impl BackendRegistry {
    /// Build backends for every language in `config`.
    ///
    /// A language whose backend fails to build is logged and left out.
    pub fn new(config: RegistryConfig, factory: impl BackendFactory + 'static) -> Self {
        let factory: Box<dyn BackendFactory> = Box::new(factory);
        let backends = load(factory.as_ref(), &config);
        Self {
            factory,
            state: RwLock::new(RegistryState { config, backends }),
        }
    }

    /// Backend for `language`, if one is loaded.
    pub fn get(&self, language: &Language) -> Option<BackendHandle> {
        self.state.read().backends.get(language).cloned()
    }

    /// Loaded languages, sorted.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.state.read().backends.keys().cloned().collect();
        languages.sort();
        languages
    }

    /// The configuration the current backends were built from.
    pub fn config(&self) -> RegistryConfig {
        self.state.read().config.clone()
    }

    /// Drop every backend and rebuild from `config`.
    ///
    /// Building happens before the write lock is taken; checks already
    /// holding a handle finish on the old instance.
    pub fn reload(&self, config: RegistryConfig) {
        let backends = load(self.factory.as_ref(), &config);
        debug!(languages = backends.len(), "backend registry reloaded");
        *self.state.write() = RegistryState { config, backends };
    }
}

fn load(factory: &dyn BackendFactory, config: &RegistryConfig) -> HashMap<Language, BackendHandle> {
    let mut backends = HashMap::new();
    for language in &config.languages {
        if backends.contains_key(language) {
            continue;
        }
        match factory.build(language) {
            Ok(backend) => {
                backends.insert(language.clone(), backend);
            }
            Err(error) => {
                warn!(%language, %error, "backend unavailable");
            }
        }
    }
    backends
}
