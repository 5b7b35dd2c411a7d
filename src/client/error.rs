use thiserror::Error;

/// Why a credential submission did not produce a session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid username or password: {0}")]
    BadCredentials(String),

    #[error("Cannot reach the server, check that it is running: {0}")]
    ServerUnreachable(String),

    #[error("Login request failed: {0}")]
    Unexpected(String),
}

impl LoginError {
    /// Stable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            LoginError::BadCredentials(_) => "BAD_CREDENTIALS",
            LoginError::ServerUnreachable(_) => "SERVER_UNREACHABLE",
            LoginError::Unexpected(_) => "UNEXPECTED",
        }
    }
}

/// Failures of authenticated resource requests
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Server rejected the request ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotAuthenticated => "NOT_AUTHENTICATED",
            ApiError::Status { .. } => "REQUEST_FAILED",
            ApiError::Http(_) => "HTTP_ERROR",
            ApiError::Url(_) => "INVALID_URL",
        }
    }
}

/// Failure of the whole credential submission flow
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Session(#[from] crate::session::SessionError),
}
