pub mod authorize;
pub mod error;

pub use authorize::{authorize, Verdict};
pub use error::SessionError;

use std::fmt;

use crate::store::{SessionStore, StoreError};
use crate::types::Role;

/// Store key holding the opaque credential token
pub const TOKEN_KEY: &str = "token";
/// Store key holding the session role
pub const ROLE_KEY: &str = "role";

/// An authenticated session: a token always paired with its role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Gate status. `Unresolved` holds only until `initialize` has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unresolved,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(Session::role)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Unresolved => write!(f, "unresolved"),
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated(session) => write!(f, "authenticated ({})", session.role),
        }
    }
}

/// Build a session from the two store keys. Anything short of a non-empty
/// token plus a recognised role reads as no session.
fn read_session<S: SessionStore>(store: &S) -> Result<Option<Session>, StoreError> {
    let token = store.get(TOKEN_KEY)?.filter(|t| !t.trim().is_empty());
    let role = store.get(ROLE_KEY)?;

    let role = match role {
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!("Ignoring stored role: {}", e);
                None
            }
        },
        None => None,
    };

    match (token, role) {
        (Some(token), Some(role)) => Ok(Some(Session { token, role })),
        (None, None) => Ok(None),
        (token, role) => {
            tracing::warn!(
                "Stored session is partial (token present: {}, role present: {})",
                token.is_some(),
                role.is_some()
            );
            Ok(None)
        }
    }
}

/// Single source of truth for who, if anyone, is logged in.
///
/// The gate is the only writer of the `token` and `role` keys in its store.
/// Everything else asks the gate.
pub struct SessionGate<S> {
    store: S,
    state: SessionState,
}

impl<S: SessionStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Unresolved,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Restore the session persisted by a previous process.
    ///
    /// Fails closed: a store error leaves the gate `Anonymous` and is returned.
    pub fn initialize(&mut self) -> Result<&SessionState, SessionError> {
        match read_session(&self.store) {
            Ok(Some(session)) => {
                tracing::info!("Restored {} session from store", session.role);
                self.state = SessionState::Authenticated(session);
            }
            Ok(None) => {
                self.state = SessionState::Anonymous;
                self.store.clear_all()?;
            }
            Err(e) => {
                self.state = SessionState::Anonymous;
                return Err(e.into());
            }
        }

        Ok(&self.state)
    }

    /// Replace whatever session exists with `token`/`role`.
    ///
    /// A token that is empty or only whitespace is rejected with
    /// `InvalidCredential`, the same rule `initialize` applies to a stored
    /// token. Memory only changes once every store write has succeeded, and a
    /// failed role write takes the token back out so the store never holds a
    /// token without its role.
    pub fn login(&mut self, token: &str, role: Role) -> Result<(), SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::InvalidCredential);
        }

        self.clear_store()?;
        self.store.set(TOKEN_KEY, token)?;
        if let Err(e) = self.store.set(ROLE_KEY, role.as_str()) {
            if let Err(cleanup) = self.store.remove(TOKEN_KEY) {
                tracing::warn!("Could not remove token after failed role write: {}", cleanup);
            }
            return Err(e.into());
        }

        self.state = SessionState::Authenticated(Session::new(token, role));
        tracing::info!("Logged in with role {}", role);
        Ok(())
    }

    /// Drop the session. Memory is cleared even when the store write fails.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if self.state.is_authenticated() {
            tracing::info!("Logging out");
        }
        self.state = SessionState::Anonymous;
        self.clear_store()
    }

    /// True when memory holds a session and the store still carries the same
    /// token and role. A disagreement (another process logged out or in as
    /// someone else) moves the gate to `Anonymous`.
    pub fn is_authenticated(&mut self) -> Result<bool, SessionError> {
        let session = match &self.state {
            SessionState::Authenticated(session) => session,
            _ => return Ok(false),
        };

        let stored = read_session(&self.store)?;
        if stored.as_ref() == Some(session) {
            return Ok(true);
        }

        tracing::warn!("Stored session no longer matches memory, treating as logged out");
        self.state = SessionState::Anonymous;
        Ok(false)
    }

    pub fn has_role(&mut self, candidate: Role) -> Result<bool, SessionError> {
        Ok(self.is_authenticated()? && self.state.role() == Some(candidate))
    }

    /// Reconcile with the store, then evaluate the route verdict
    pub fn authorize(&mut self, required: Option<Role>) -> Result<Verdict, SessionError> {
        self.is_authenticated()?;
        Ok(authorize(&self.state, required))
    }

    /// Remove both keys. When the store cannot do that (an unreadable
    /// document, say) wipe it instead so a broken store can still be reset.
    fn clear_store(&self) -> Result<(), SessionError> {
        let removed = self
            .store
            .remove(TOKEN_KEY)
            .and_then(|_| self.store.remove(ROLE_KEY));

        if let Err(e) = removed {
            tracing::warn!("Removing session keys failed, clearing store: {:?}", e);
            self.store.clear_all()?;
        }
        Ok(())
    }
}
