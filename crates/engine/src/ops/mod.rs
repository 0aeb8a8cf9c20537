use std::sync::Arc;

use crate::{
    EngineError, ResultEngine,
    locks::LockRegistry,
    repository::Repository,
    store::{MemoryStore, Store},
};

mod accounts;
mod auth;
mod banks;
mod notifications;
mod reports;
mod transfers;
mod users;

pub use reports::Report;
pub use users::Contact;

/// The funds-transfer and ledger-consistency engine.
///
/// Every operation fetches fresh records through the repository, mutates
/// local values under the per-key locks, and persists the result; the
/// engine holds no long-lived entity state.
pub struct Engine {
    pub(crate) repository: Repository,
    pub(crate) locks: LockRegistry,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn require_field(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn Store>>,
}

impl EngineBuilder {
    /// Pass the backing store; defaults to an in-process [`MemoryStore`].
    pub fn store(mut self, store: Arc<dyn Store>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Engine {
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        Engine {
            repository: Repository::new(store),
            locks: LockRegistry::new(),
        }
    }
}
