//! Shared helpers for the integration tests.

#![allow(dead_code)]

use jira_api::{ClientConfig, JiraClient, SiteUrl};
use wiremock::MockServer;

/// Builds a configuration pointing at the mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .site(SiteUrl::new(server.uri()).unwrap())
        .basic_auth("admin", "admin")
        .build()
        .unwrap()
}

/// Creates a client backed by the real HTTP transport, talking to `server`.
pub fn client_for(server: &MockServer) -> JiraClient {
    JiraClient::new(config_for(server)).unwrap()
}

/// Creates a client with a retry budget.
pub fn client_with_tries(server: &MockServer, tries: u32) -> JiraClient {
    let config = ClientConfig::builder()
        .site(SiteUrl::new(server.uri()).unwrap())
        .tries(tries)
        .build()
        .unwrap();
    JiraClient::new(config).unwrap()
}
