//! Discovery document and token endpoint handlers.

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, HOST},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;

use super::SharedState;

/// Basic credentials of the `cf` client with an empty secret.
const CF_CLIENT_BASIC: &str = "Basic Y2Y6";

/// Form body of a token request.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub grant_type: String,
    pub client_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub passcode: Option<String>,
}

/// GET /info
///
/// The server doubles as its own authorization endpoint.
pub async fn get_info(headers: HeaderMap) -> impl IntoResponse {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    Json(serde_json::json!({
        "name": "mock",
        "api_version": "2.75.0",
        "authorization_endpoint": format!("http://{host}"),
    }))
}

/// POST /oauth/token
pub async fn create_token(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<TokenForm>,
) -> Response {
    let client_ok = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == CF_CLIENT_BASIC);
    if !client_ok || form.grant_type != "password" {
        return unauthorized("Bad client credentials");
    }

    let state = state.read().await;
    let accepted = match (&form.passcode, &form.username, &form.password) {
        (Some(passcode), _, _) => state.passcode_login.as_deref() == Some(passcode.as_str()),
        (None, Some(user), Some(pass)) => state
            .password_login
            .as_ref()
            .is_some_and(|(u, p)| u == user && p == pass),
        _ => false,
    };
    if !accepted {
        return unauthorized("Bad credentials");
    }

    let token = state
        .required_token
        .clone()
        .unwrap_or_else(|| "mock-access-token".to_string());
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "refresh_token": "mock-refresh-token",
            "expires_in": 1199,
            "scope": "cloud_controller.read cloud_controller.write",
            "jti": "mock-jti",
        })),
    )
        .into_response()
}

fn unauthorized(description: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "error_description": description,
        })),
    )
        .into_response()
}
