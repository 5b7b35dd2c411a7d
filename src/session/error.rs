use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by the session gate
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credential: token must not be empty")]
    InvalidCredential,

    #[error("Session store unavailable")]
    StoreUnavailable(#[from] StoreError),
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::InvalidCredential => "INVALID_CREDENTIAL",
            SessionError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_chain_names_each_cause_once() {
        let parse = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let detail = parse.to_string();
        let err = SessionError::from(StoreError::from(parse));

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert!(chain.starts_with("Session store unavailable: Store document is corrupt: "), "{}", chain);
        assert_eq!(chain.matches("Store document is corrupt").count(), 1);
        assert_eq!(chain.matches(detail.as_str()).count(), 1);
    }
}
