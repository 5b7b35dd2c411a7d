pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Failures of the durable key-value collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error")]
    Io(#[from] std::io::Error),

    #[error("Store document is corrupt")]
    Corrupt(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value store that survives process restarts.
///
/// Calls are synchronous and treated as reliable; every read reflects writes
/// made by other handles (or other processes) sharing the same backing store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn clear_all(&self) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        (**self).clear_all()
    }
}
