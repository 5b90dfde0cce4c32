//! Mock Cloud Foundry API server.
//!
//! Provides an axum-based HTTP server that simulates the v2 API and the
//! login server's token endpoint.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// An in-process Cloud Foundry API bound to a loopback port.
///
/// Serves both the v2 API and the token endpoint, so a client can log in
/// and then use the issued token against the same address.
pub struct MockServer {
    url: String,
    handle: JoinHandle<()>,
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Serve [`Fixtures::default_scenario`] on an ephemeral port.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Serve a target with no organizations, spaces or services.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve `state`, typically a tweaked [`MockServer::default_state`].
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// API base URL, e.g. `http://127.0.0.1:54321`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Live state; writes are visible to the next request.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Abort the serving task and wait for it to finish.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// The default scenario state.
    pub fn default_state() -> MockState {
        MockState::from_scenario(Fixtures::default_scenario())
    }

    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Login routes
            .route("/info", get(handlers::get_info))
            .route("/oauth/token", post(handlers::create_token))
            // Tenancy routes
            .route("/v2/organizations", get(handlers::list_organizations))
            .route(
                "/v2/organizations/:guid/spaces",
                get(handlers::list_org_spaces),
            )
            .route("/v2/spaces/:guid/apps", get(handlers::list_space_apps))
            .route("/v2/apps", get(handlers::list_apps))
            // Marketplace routes
            .route(
                "/v2/spaces/:guid/services",
                get(handlers::list_space_services),
            )
            .route("/v2/services/:guid", get(handlers::get_service))
            .route(
                "/v2/services/:guid/service_plans",
                get(handlers::list_service_plans),
            )
            .route("/v2/service_plans/:guid", get(handlers::get_service_plan))
            // Instance routes
            .route(
                "/v2/spaces/:guid/service_instances",
                get(handlers::list_space_instances),
            )
            .route(
                "/v2/service_instances",
                get(handlers::list_instances).post(handlers::create_instance),
            )
            .route("/v2/service_bindings", post(handlers::create_binding))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

async fn health_check() -> &'static str {
    "ok"
}
