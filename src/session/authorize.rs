use serde::{Deserialize, Serialize};

use super::SessionState;
use crate::types::Role;

/// Outcome of guarding a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allow,
    RedirectToLogin,
    RedirectToDefault,
}

/// Decide whether a session in `state` may reach a destination that requires
/// `required` (`None` means any authenticated user).
///
/// Pure: the caller is responsible for reconciling the gate first.
pub fn authorize(state: &SessionState, required: Option<Role>) -> Verdict {
    match state {
        SessionState::Unresolved | SessionState::Anonymous => Verdict::RedirectToLogin,
        SessionState::Authenticated(session) => match required {
            Some(role) if session.role() != role => Verdict::RedirectToDefault,
            _ => Verdict::Allow,
        },
    }
}
