//! Mock Lunch Money API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Lunch
//! Money API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, so grouping a set of transactions is visible to the next
//! listing call.
//!
//! # Example
//!
//! ```ignore
//! use lunchmoney::mock_server::MockServer;
//! use lunchmoney::{LunchMoney, LunchMoneyClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await.unwrap();
//!     let client = LunchMoneyClient::new("test-token", server.url()).unwrap();
//!     let lm = LunchMoney::new(client);
//!
//!     // Server comes with default fixtures
//!     let group = lm.groups().group([10, 11]).await.unwrap();
//!     assert_eq!(group.amount.to_string(), "8.00");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, StateError};
