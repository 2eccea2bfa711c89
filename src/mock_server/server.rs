//! Mock Lunch Money API server.
//!
//! Provides an axum-based HTTP server that simulates the Lunch Money API.

use std::io;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, error_response, SharedState};
use super::state::MockState;

/// A mock Lunch Money API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start() -> io::Result<Self> {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start_empty() -> io::Result<Self> {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn with_state(state: MockState) -> io::Result<Self> {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock server stopped");
            }
        });

        Ok(Self {
            url: format!("http://{addr}"),
            handle,
            state: shared_state,
        })
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `LunchMoneyClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for transaction in scenario.transactions {
            state = state.with_transaction(transaction);
        }

        for asset in scenario.assets {
            state = state.with_asset(asset);
        }

        for budget in scenario.budgets {
            state = state.with_budget(budget);
        }

        for holding in scenario.crypto {
            state = state.with_crypto(holding);
        }

        for expense in scenario.recurring_expenses {
            state = state.with_recurring_expense(expense);
        }

        for account in scenario.plaid_accounts {
            state = state.with_plaid_account(account);
        }

        for tag in scenario.tags {
            state = state.with_tag(tag);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: SharedState) -> Router {
        Router::new()
            // Transaction routes
            .route(
                "/transactions",
                get(handlers::list_transactions).post(handlers::insert_transactions),
            )
            .route(
                "/transactions/:id",
                get(handlers::get_transaction)
                    .put(handlers::update_transaction)
                    .delete(handlers::delete_transaction),
            )
            // Transaction group routes
            .route("/transactions/group", post(handlers::group_transactions))
            .route(
                "/transactions/group/:id",
                delete(handlers::ungroup_transactions),
            )
            // Budget routes
            .route(
                "/budgets",
                get(handlers::get_budgets)
                    .put(handlers::upsert_budget)
                    .delete(handlers::remove_budget),
            )
            // Asset routes
            .route(
                "/assets",
                get(handlers::list_assets).post(handlers::create_asset),
            )
            .route("/assets/:id", put(handlers::update_asset))
            // Crypto routes
            .route("/crypto", get(handlers::list_crypto))
            .route("/crypto/manual/:id", put(handlers::update_crypto))
            // Recurring expense routes
            .route(
                "/recurring_expenses",
                get(handlers::list_recurring_expenses),
            )
            // Plaid account routes
            .route("/plaid_accounts", get(handlers::list_plaid_accounts))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_token,
            ))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests whose bearer token does not match the required one.
async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);

    if !state.read().await.is_authorized(bearer.as_deref()) {
        return error_response(StatusCode::UNAUTHORIZED, "Access token does not exist.");
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Get, List, LunchMoneyClient, Transaction};
    use axum::body::Body;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await.unwrap();

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_rejects_wrong_token() {
        let state = MockState::new().with_required_token("secret").shared();
        let app = MockServer::create_router(state);

        let response = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/transactions")
                    .header(header::AUTHORIZATION, "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Health is open
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_transaction_with_client() {
        let server = MockServer::start().await.unwrap();
        let client = LunchMoneyClient::new("test-token", server.url()).unwrap();

        let transaction = Transaction::get(&client, 10)
            .await
            .expect("Failed to get transaction");

        assert_eq!(transaction.payee.as_deref(), Some("Bakery"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_transactions_pages() {
        let server = MockServer::start().await.unwrap();
        let client = LunchMoneyClient::new("test-token", server.url()).unwrap();

        let page = Transaction::list_page(&client, &Default::default(), 0, 4)
            .await
            .expect("Failed to list transactions");
        assert_eq!(page.len(), 4);
        assert!(page.has_more);

        let all = Transaction::list_all(&client, &Default::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 6);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_rejects_unknown_tag() {
        let app = MockServer::create_router(MockServer::default_state().shared());

        let body = serde_json::json!({
            "transactions": [{"date": "2024-02-01", "amount": "1.00", "tag_ids": [404]}]
        });
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/transactions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await.unwrap();
        let client = LunchMoneyClient::new("test-token", server.url()).unwrap();

        let result = Transaction::get(&client, 1).await;

        assert!(matches!(
            result,
            Err(crate::LunchMoneyError::NotFound { .. })
        ));

        server.shutdown().await;
    }
}
