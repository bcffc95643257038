//! Shared setup for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use portal_qa_agent::logging::init_test_logging;
use portal_qa_agent::{HarnessConfig, RequestGateway};
use wiremock::MockServer;

/// Configuration pointing at `server`
pub fn config_for(server: &MockServer) -> HarnessConfig {
    init_test_logging();
    let mut config = HarnessConfig::for_base_url(server.uri());
    config.auth.username = "qa-admin".to_string();
    config.auth.password = "qa-secret".to_string();
    config.api.api_key = Some("test-api-key".to_string());
    config
}

pub fn gateway_for(server: &MockServer) -> Arc<RequestGateway> {
    Arc::new(RequestGateway::new(&config_for(server).api).expect("gateway"))
}
