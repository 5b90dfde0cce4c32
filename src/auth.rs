//! Password and passcode login against the platform's UAA.
//!
//! The handshake reads `authorization_endpoint` from the API's `/info`
//! document and then requests a token from `<endpoint>/oauth/token`.

use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{build_http, check_response, read_json, DEFAULT_API_URL};
use crate::error::Result;
use crate::session::Session;

/// Authorization server used when `/info` names none.
pub const DEFAULT_AUTH_URL: &str = "https://login.ng.bluemix.net/UAALoginServerWAR";

/// OAuth client id of the platform CLI. Its secret is empty.
const CLIENT_ID: &str = "cf";

/// What to exchange for a token.
#[derive(Clone)]
pub enum LoginCredentials {
    /// Username and password.
    Password { username: String, password: String },
    /// One-time passcode from the single-sign-on page.
    Passcode(String),
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginCredentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .finish_non_exhaustive(),
            LoginCredentials::Passcode(_) => f.write_str("Passcode(..)"),
        }
    }
}

impl LoginCredentials {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        LoginCredentials::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn passcode(passcode: impl Into<String>) -> Self {
        LoginCredentials::Passcode(passcode.into())
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![("grant_type", "password"), ("client_id", CLIENT_ID)];
        match self {
            LoginCredentials::Password { username, password } => {
                form.push(("username", username));
                form.push(("password", password));
            }
            LoginCredentials::Passcode(passcode) => form.push(("passcode", passcode)),
        }
        form
    }
}

/// Where to log in.
#[derive(Debug, Clone, Default)]
pub struct LoginOptions {
    /// API base URL (`https://api.ng.bluemix.net` when unset).
    pub api_base_url: Option<String>,
    /// Discovery document URL (`<api>/info` when unset).
    pub info_url: Option<String>,
}

impl LoginOptions {
    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    pub fn info_url(&self) -> String {
        self.info_url
            .clone()
            .unwrap_or_else(|| format!("{}/info", self.api_base_url()))
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,

    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub jti: Option<String>,

    /// Any other fields of the response.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenResponse {
    /// A session holding this token for `api_url`, without a target.
    pub fn into_session(self, api_url: &str) -> Session {
        Session {
            api_url: Some(api_url.to_string()),
            access_token: Some(self.access_token),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct InfoDocument {
    #[serde(default)]
    authorization_endpoint: Option<String>,
}

/// Token endpoint named by an info document, or under [`DEFAULT_AUTH_URL`].
fn token_url(info: Value) -> String {
    let auth_url = serde_json::from_value::<InfoDocument>(info)
        .ok()
        .and_then(|info| info.authorization_endpoint)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
    format!("{}/oauth/token", auth_url.trim_end_matches('/'))
}

/// Exchange credentials for a token.
///
/// # Errors
///
/// Fails with the request's transport or status error. Invalid credentials
/// come back as a plain 401 [`CfError::ApiError`](crate::CfError::ApiError).
#[tracing::instrument(skip(credentials))]
pub async fn login(options: &LoginOptions, credentials: &LoginCredentials) -> Result<TokenResponse> {
    let http = build_http()?;

    let info_url = options.info_url();
    tracing::debug!(url = %info_url, "fetching info document");
    let response = http
        .get(&info_url)
        .header(ACCEPT, "application/json")
        .send()
        .await?;
    let info = read_json(check_response(response).await?).await?;
    let token_url = token_url(info);
    tracing::debug!(url = %token_url, ?credentials, "requesting token");
    let response = http
        .post(&token_url)
        .basic_auth(CLIENT_ID, Some(""))
        .header(ACCEPT, "application/json")
        .form(&credentials.form())
        .send()
        .await?;
    let token = read_json(check_response(response).await?).await?;
    Ok(serde_json::from_value(token)?)
}
