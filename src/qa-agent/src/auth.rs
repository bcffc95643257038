//! # Authentication
//!
//! Password-grant token exchange against the identity server, plus the two
//! identity maintenance calls that authenticate with an API key instead of a
//! bearer token.

use std::sync::Arc;
use tracing::{debug, info};

use portal_qa_shared::{EmailConfirmRequest, PasswordResetRequest, TokenRequest, TokenResponse};

use crate::config::{AuthConfig, HarnessConfig};
use crate::error::{HarnessError, Result};
use crate::gateway::{ApiRequest, RequestGateway, ResponseBody};
use crate::services::endpoints::identity;

const SYSTEM_ID_HEADER: &str = "system-id";
const API_KEY_HEADER: &str = "API-KEY";
const JSON_PATCH: &str = "application/json-patch+json";

/// Username/password pair for one portal's password store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Overrides the provider's default `system-id`
    pub system_id: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            system_id: None,
        }
    }

    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }

    /// Configured default credentials, if both parts are set
    pub fn from_config(auth: &AuthConfig) -> Option<Self> {
        if auth.username.is_empty() || auth.password.is_empty() {
            return None;
        }
        Some(Self::new(&auth.username, &auth.password).with_system_id(&auth.system_id))
    }
}

/// Obtains bearer tokens through the password grant
#[derive(Debug, Clone)]
pub struct AuthTokenProvider {
    gateway: Arc<RequestGateway>,
    client_id: String,
    scope: String,
    default_system_id: String,
    api_key: Option<String>,
}

impl AuthTokenProvider {
    pub fn new(gateway: Arc<RequestGateway>, config: &HarnessConfig) -> Self {
        Self {
            gateway,
            client_id: config.auth.client_id.clone(),
            scope: config.auth.scope.clone(),
            default_system_id: config.auth.system_id.clone(),
            api_key: config.api.api_key.clone(),
        }
    }

    /// Exchange `username`/`password` for an access token.
    ///
    /// `system_id` selects the portal's password store; the configured
    /// default is used when it is `None`.
    pub async fn get_token(
        &self,
        username: &str,
        password: &str,
        system_id: Option<&str>,
    ) -> Result<String> {
        let system_id = system_id.unwrap_or(&self.default_system_id);
        debug!(username, system_id, "Requesting access token");

        let body = TokenRequest {
            username: username.to_string(),
            password: password.to_string(),
            client_id: self.client_id.clone(),
            grant_type: "password".to_string(),
            scope: self.scope.clone(),
        };

        let response: TokenResponse = self
            .gateway
            .send_json(
                ApiRequest::post(identity::TOKEN)
                    .unversioned()
                    .anonymous()
                    .header(SYSTEM_ID_HEADER, system_id)
                    .json(&body),
            )
            .await?;

        info!(username, system_id, "Obtained access token");
        Ok(response.access_token)
    }

    pub async fn token_for(&self, credentials: &Credentials) -> Result<String> {
        self.get_token(
            &credentials.username,
            &credentials.password,
            credentials.system_id.as_deref(),
        )
        .await
    }

    /// Set a password without the emailed reset token
    pub async fn reset_password_without_token(
        &self,
        username: &str,
        password: &str,
        system_id: Option<&str>,
    ) -> Result<ResponseBody> {
        let body = PasswordResetRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.maintenance_request(ApiRequest::put(identity::RESET_PASSWORD), system_id)?;
        self.gateway.send(request.json(&body)).await
    }

    /// Mark an email address as confirmed without the emailed token
    pub async fn confirm_email_without_token(
        &self,
        email: &str,
        system_id: Option<&str>,
    ) -> Result<ResponseBody> {
        let body = EmailConfirmRequest {
            email: email.to_string(),
        };
        let request = self.maintenance_request(ApiRequest::post(identity::CONFIRM_EMAIL), system_id)?;
        self.gateway.send(request.json(&body)).await
    }

    fn maintenance_request(&self, request: ApiRequest, system_id: Option<&str>) -> Result<ApiRequest> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            HarnessError::config("API key is required for identity maintenance calls")
        })?;
        Ok(request
            .anonymous()
            .header(API_KEY_HEADER, api_key)
            .header(SYSTEM_ID_HEADER, system_id.unwrap_or(&self.default_system_id))
            .header("Content-Type", JSON_PATCH))
    }
}
