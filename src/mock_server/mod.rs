//! Mock Cloud Foundry API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the v2 API
//! and its login server for integration and end-to-end testing. Unlike
//! wiremock which mocks at the HTTP level per-test, this server maintains
//! state across requests, so provisioning followed by listing behaves as it
//! would against a real target.
//!
//! # Example
//!
//! ```ignore
//! use cfapi::mock_server::MockServer;
//! use cfapi::{CfClient, QueryOptions};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = CfClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let orgs = cfapi::get_organizations(&client, &QueryOptions::default()).await.unwrap();
//!     assert_eq!(orgs[0].entity.name, "acme");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{guids, DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
