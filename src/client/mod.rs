pub mod error;

pub use error::{ApiError, LoginError, SubmitError};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::session::SessionGate;
use crate::store::SessionStore;
use crate::types::Role;

/// What a successful `/api/login` call hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
    role: Option<String>,
}

/// Remote credential check. The gate never talks to the network itself.
#[async_trait]
pub trait Authenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginGrant, LoginError>;
}

/// Collections served by the shop API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Customers,
    Therapists,
    Reservations,
    ManagementRecords,
}

impl Resource {
    pub fn api_path(&self) -> &'static str {
        match self {
            Resource::Customers => "api/customers",
            Resource::Therapists => "api/therapists",
            Resource::Reservations => "api/reservations",
            Resource::ManagementRecords => "api/management-records",
        }
    }

    /// Destination that guards this collection
    pub fn route_path(&self) -> &'static str {
        match self {
            Resource::Customers => "/customers",
            Resource::Therapists => "/therapists",
            Resource::Reservations => "/",
            Resource::ManagementRecords => "/management-records",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch a whole collection with the session's bearer token.
    /// `date` filters reservations to one day (YYYY-MM-DD).
    pub async fn list(
        &self,
        resource: Resource,
        token: &str,
        date: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.base_url.join(resource.api_path())?;
        tracing::debug!("GET {}", url);

        let mut request = self.http.get(url).bearer_auth(token);
        if let (Resource::Reservations, Some(date)) = (resource, date) {
            request = request.query(&[("date", date)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Pull `message` out of an error body, falling back to the status text
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string();

    match response.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

#[async_trait]
impl Authenticator for ApiClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginGrant, LoginError> {
        let url = self
            .base_url
            .join("api/login")
            .map_err(|e| LoginError::Unexpected(e.to_string()))?;
        tracing::debug!("POST {} as {}", url, username);

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    LoginError::ServerUnreachable(e.to_string())
                } else {
                    LoginError::Unexpected(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LoginError::BadCredentials(error_message(response).await));
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(LoginError::Unexpected(format!("{}: {}", status.as_u16(), message)));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| LoginError::Unexpected(format!("invalid login response: {}", e)))?;

        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LoginError::Unexpected("server response has no token".to_string()))?;
        let role = body
            .role
            .ok_or_else(|| LoginError::Unexpected("server response has no role".to_string()))?
            .parse::<Role>()
            .map_err(LoginError::Unexpected)?;

        Ok(LoginGrant { token, role })
    }
}

/// Ask the server, and only on success hand the grant to the gate.
/// A failed attempt leaves the current session exactly as it was.
pub async fn submit_login<A, S>(
    gate: &mut SessionGate<S>,
    authenticator: &A,
    username: &str,
    password: &str,
) -> Result<Role, SubmitError>
where
    A: Authenticator + Sync + ?Sized,
    S: SessionStore,
{
    let grant = authenticator
        .authenticate(username, password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed for {}: {}", username, e))?;

    gate.login(&grant.token, grant.role)?;
    Ok(grant.role)
}
