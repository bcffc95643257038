//! # Harness Configuration Module
//!
//! Connection and credential settings for the portal API under test.
//!
//! Values are layered lowest to highest:
//! 1. Built-in defaults
//! 2. `PORTAL_QA__<SECTION>__<FIELD>` environment variables
//! 3. The flat variables used by existing CI profiles (`API_BASE_URL`, `API_USERNAME`, ...)
//!
//! `profile/.env.<ENV>` and `.env` are loaded into the process environment first.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{HarnessError, Result};

/// Client id sent with every password-grant exchange
pub const DEFAULT_CLIENT_ID: &str = "1STPARTY.APP";

/// Scopes requested with every password-grant exchange
pub const DEFAULT_SCOPE: &str = "resourceApi offline_access profile fileServiceApi notificationApi";

/// `system-id` header values selecting a portal's password store
pub struct SystemId;

impl SystemId {
    pub const ADMIN: &'static str = "4";
    pub const MEMBER: &'static str = "4";
    pub const PARTNER: &'static str = "5";
}

/// Main harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// API endpoint configuration
    pub api: ApiConfig,
    /// Default credentials
    pub auth: AuthConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Version segment inserted before relative paths; `1` and `v1` are equivalent
    pub api_version: String,
    pub timeout_seconds: u64,
    /// Key for the identity endpoints that take no bearer token
    pub api_key: Option<String>,
}

/// Default credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub system_id: String,
    /// Pre-issued token; skips the password grant when set
    pub token: Option<String>,
    pub client_id: String,
    pub scope: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_version: "v1".to_string(),
            timeout_seconds: 30,
            api_key: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            system_id: SystemId::ADMIN.to_string(),
            token: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// `v`-prefixed version segment
    pub fn version_segment(&self) -> String {
        let version = self.api_version.trim().trim_matches('/');
        if version.starts_with('v') || version.starts_with('V') {
            version.to_string()
        } else {
            format!("v{}", version)
        }
    }
}

impl HarnessConfig {
    /// Configuration pointing at `base_url` with default settings otherwise
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config
    }

    /// Load configuration from the profile files and the environment
    pub fn from_env() -> Result<Self> {
        let profile = std::env::var("ENV").unwrap_or_else(|_| "qa".to_string());
        let profile_file = format!("profile/.env.{}", profile);
        match dotenvy::from_filename(&profile_file) {
            Ok(path) => debug!(path = %path.display(), "Loaded environment profile"),
            Err(err) => debug!(file = %profile_file, error = %err, "No environment profile loaded"),
        }
        dotenvy::dotenv().ok();

        let mut cfg = config::Config::builder();

        // Start with default configuration
        cfg = cfg.add_source(config::Config::try_from(&HarnessConfig::default())?);

        // Add environment variables with prefix
        cfg = cfg.add_source(
            config::Environment::with_prefix("PORTAL_QA")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: HarnessConfig = cfg.build()?.try_deserialize()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the flat variables used by CI profiles
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));

        if let Some(base_url) = first(&["API_BASE_URL", "BASE_URL"]) {
            self.api.base_url = base_url;
        }
        if let Some(version) = first(&["API_VERSION"]) {
            self.api.api_version = version;
        }
        if let Some(timeout) = first(&["API_TIMEOUT_SECONDS"]) {
            self.api.timeout_seconds = timeout.parse().map_err(|_| {
                HarnessError::config(format!("API_TIMEOUT_SECONDS is not a number: {}", timeout))
            })?;
        }
        if let Some(api_key) = first(&["API_KEY"]) {
            self.api.api_key = Some(api_key);
        }
        if let Some(username) = first(&["API_USERNAME", "ADMIN_USERNAME"]) {
            self.auth.username = username;
        }
        if let Some(password) = first(&["API_PASSWORD", "ADMIN_PASSWORD"]) {
            self.auth.password = password;
        }
        if let Some(system_id) = first(&["SYSTEM_ID"]) {
            self.auth.system_id = system_id;
        }
        if let Some(token) = first(&["API_TOKEN"]) {
            self.auth.token = Some(token).filter(|token| !token.is_empty());
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(HarnessError::config("API base URL must be set"));
        }
        Url::parse(&self.api.base_url)?;
        if self.api.api_version.trim().is_empty() {
            return Err(HarnessError::config("API version must not be empty"));
        }
        if self.api.timeout_seconds == 0 {
            return Err(HarnessError::config(
                "Request timeout must be greater than 0",
            ));
        }
        Ok(())
    }
}
