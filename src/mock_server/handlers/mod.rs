//! HTTP request handlers for the mock server.

pub mod auth;
pub mod instances;
pub mod organizations;
pub mod services;

pub use auth::*;
pub use instances::*;
pub use organizations::*;
pub use services::*;

use std::sync::Arc;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::ResourceList;

/// State handle passed to every handler.
pub type SharedState = Arc<RwLock<MockState>>;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    #[serde(rename = "results-per-page")]
    pub results_per_page: Option<usize>,
}

impl ListQuery {
    /// Value of a `<field>:<value>` filter.
    pub fn filter(&self, field: &str) -> Option<&str> {
        self.q
            .as_deref()
            .and_then(|q| q.strip_prefix(field))
            .and_then(|rest| rest.strip_prefix(':'))
    }
}

/// Error body in the platform's format.
pub fn cf_error(status: StatusCode, code: u32, error_code: &str, description: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "code": code,
            "description": description,
            "error_code": error_code,
        })),
    )
        .into_response()
}

pub fn not_found(entity: &str, guid: &str) -> Response {
    cf_error(
        StatusCode::NOT_FOUND,
        10010,
        "CF-ResourceNotFound",
        &format!("The {entity} could not be found: {guid}"),
    )
}

/// Check the bearer token if the state requires one.
#[allow(clippy::result_large_err)]
pub fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(required) = &state.required_token else {
        return Ok(());
    };
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token);
    if presented == Some(required.as_str()) {
        Ok(())
    } else {
        Err(cf_error(
            StatusCode::UNAUTHORIZED,
            1000,
            "CF-InvalidAuthToken",
            "Invalid Auth Token",
        ))
    }
}

/// A single-page list envelope.
pub fn envelope<T: Serialize + Clone>(items: Vec<&T>) -> Json<ResourceList<T>> {
    Json(ResourceList {
        total_results: Some(items.len() as u64),
        total_pages: Some(1),
        prev_url: None,
        next_url: None,
        resources: items.into_iter().cloned().collect(),
    })
}
