//! Per-test wiring of gateway, auth and portal services

use std::sync::Arc;
use tracing::info;

use crate::auth::{AuthTokenProvider, Credentials};
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::gateway::RequestGateway;
use crate::reference::ReferenceDataProvider;
use crate::services::{AdminPortalService, MemberPortalService, PartnerPortalService};

/// Everything a test needs to talk to the portals.
///
/// Build one per test. Nothing inside is shared with other contexts.
pub struct HarnessContext {
    pub config: HarnessConfig,
    pub gateway: Arc<RequestGateway>,
    pub auth: AuthTokenProvider,
    pub admin: Arc<AdminPortalService>,
    pub member: MemberPortalService,
    pub partner: PartnerPortalService,
}

impl HarnessContext {
    pub async fn from_env() -> Result<Self> {
        Self::new(HarnessConfig::from_env()?).await
    }

    /// Wire the services. A configured token is installed on the gateway;
    /// otherwise an admin token is fetched with the configured credentials,
    /// and a failed fetch leaves the context without one.
    pub async fn new(config: HarnessConfig) -> Result<Self> {
        let gateway = Arc::new(RequestGateway::new(&config.api)?);
        let auth = AuthTokenProvider::new(gateway.clone(), &config);

        let admin = match &config.auth.token {
            Some(token) => {
                gateway.set_auth_token(token.clone());
                AdminPortalService::new(gateway.clone())
            }
            None => {
                let credentials = Credentials::from_config(&config.auth);
                AdminPortalService::create(gateway.clone(), Some(&auth), credentials.as_ref()).await
            }
        };

        info!(
            base_url = %gateway.base_url(),
            authenticated = admin.auth_token().is_some() || gateway.auth_token().is_some(),
            "Harness context ready"
        );

        Ok(Self {
            member: MemberPortalService::new(gateway.clone()),
            partner: PartnerPortalService::new(gateway.clone()),
            admin: Arc::new(admin),
            auth,
            gateway,
            config,
        })
    }

    /// Fresh provider with its own empty caches
    pub fn reference_data(&self) -> ReferenceDataProvider {
        ReferenceDataProvider::new(self.admin.clone())
    }
}
