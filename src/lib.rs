pub mod cli;
pub mod client;
pub mod config;
pub mod routes;
pub mod session;
pub mod store;
pub mod types;

pub use session::{Session, SessionError, SessionGate, SessionState, Verdict};
pub use store::{FileStore, MemoryStore, SessionStore, StoreError};
pub use types::Role;
