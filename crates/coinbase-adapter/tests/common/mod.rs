/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for coinbase-adapter tests

#![allow(dead_code)]

use coinbase_adapter::{ApiGeneration, ClientConfig, CoinbaseClient, Credentials, RateLimit};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";
pub const TEST_SECRET: &str = "test-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Credentials pointing at the mock server
pub fn mock_credentials(server: &MockServer) -> Credentials {
    Credentials::new(TEST_KEY, TEST_SECRET, server.uri(), "ws://127.0.0.1:0")
}

/// Config without the inter-request delay
pub fn fast_config() -> ClientConfig {
    ClientConfig {
        rate_limit: RateLimit::disabled(),
        ..ClientConfig::default()
    }
}

/// Client for the mock server with rate limiting disabled
pub fn mock_client(server: &MockServer, generation: ApiGeneration) -> CoinbaseClient {
    CoinbaseClient::with_config(mock_credentials(server), generation, fast_config())
        .expect("client init")
}
