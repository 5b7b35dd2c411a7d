use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub routes: RouteConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Base URL with a trailing `/`, so joining `api/...` keeps any
    /// path prefix the backend is mounted under
    pub fn url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// Where guarded navigation sends people. Kept configurable because the
/// login screen and landing page move between deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub login_path: String,
    pub default_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub config_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: 10,
            },
            routes: RouteConfig {
                login_path: "/login".to_string(),
                default_path: "/".to_string(),
            },
            storage: StorageConfig { config_dir: None },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("MASSAGE_API_URL") {
            match Url::parse(&v) {
                Ok(_) => self.api.base_url = v,
                Err(e) => tracing::warn!("Ignoring MASSAGE_API_URL '{}': {}", v, e),
            }
        }
        if let Ok(v) = env::var("MASSAGE_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }

        // Route overrides
        if let Ok(v) = env::var("MASSAGE_LOGIN_PATH") {
            self.routes.login_path = normalize_path(&v);
        }
        if let Ok(v) = env::var("MASSAGE_DEFAULT_PATH") {
            self.routes.default_path = normalize_path(&v);
        }

        // Storage overrides
        if let Ok(v) = env::var("MASSAGE_CLI_CONFIG_DIR") {
            if !v.is_empty() {
                self.storage.config_dir = Some(PathBuf::from(v));
            }
        }

        self
    }
}

/// Route paths always start with a single `/` and carry no trailing slash
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{}", trimmed)
}

// Global singleton config - initialized on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
