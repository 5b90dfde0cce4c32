//! Cloud Foundry API client.
//!
//! Low-level HTTP client that handles authentication, URL building and
//! error translation. Higher-level operations are implemented via traits on
//! entity types and the functions in [`crate::models`].

use std::env;
use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{CfError, Result};
use crate::options::QueryOptions;
use crate::session::Session;

/// API endpoint used when neither the caller nor the session names one.
pub const DEFAULT_API_URL: &str = "https://api.ng.bluemix.net";

/// Platform name used in synthesized error messages.
const PLATFORM_NAME: &str = "Cloud Foundry";

const USER_AGENT: &str = concat!("cfapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Cloud Foundry API client.
///
/// Holds the access token and, when built from a [`Session`], the targeted
/// organization and space. Constructed once per process and passed by
/// reference; clones share the same connection pool.
///
/// # Example
///
/// ```no_run
/// use cfapi::{CfClient, Session};
///
/// # fn example() -> cfapi::Result<()> {
/// // From a saved login session
/// let client = CfClient::from_session(&Session::discover())?;
///
/// // Or configure manually
/// let client = CfClient::new("access-token", "https://api.ng.bluemix.net")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CfClient {
    http: Client,
    base_url: Arc<str>,
    token: String,
    session: Arc<Session>,
}

impl std::fmt::Debug for CfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfClient")
            .field("base_url", &&*self.base_url)
            .field("space_guid", &self.session.space_guid)
            .finish_non_exhaustive()
    }
}

impl CfClient {
    /// Create a client from environment variables and the saved session.
    ///
    /// `CF_ACCESS_TOKEN` and `CF_API_URL` take precedence over the
    /// discovered session. The API URL falls back to
    /// `https://api.ng.bluemix.net`.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::ConfigMissing`] if no token is available.
    pub fn from_env() -> Result<Self> {
        let mut session = Session::discover();
        if let Ok(token) = env::var("CF_ACCESS_TOKEN") {
            session.access_token = Some(token);
        }
        if let Ok(url) = env::var("CF_API_URL") {
            session.api_url = Some(url);
        }
        Self::from_session(&session)
    }

    /// Create a client from a discovered session.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::ConfigMissing`] when the session carries no token.
    pub fn from_session(session: &Session) -> Result<Self> {
        let token = session.access_token.as_deref().ok_or_else(|| {
            CfError::ConfigMissing("no access token; log in first".to_string())
        })?;
        let base_url = session.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let mut client = Self::new(token, base_url)?;
        client.session = Arc::new(session.clone());
        Ok(client)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;

        Ok(Self {
            http: build_http()?,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: token.to_string(),
            session: Arc::new(Session::default()),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session this client was built from (empty for manual clients).
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Guid of the targeted space.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::ConfigMissing`] when no space is targeted.
    pub fn space_guid(&self) -> Result<&str> {
        self.session
            .space_guid
            .as_deref()
            .ok_or_else(|| CfError::ConfigMissing("no target space".to_string()))
    }

    /// Build the absolute URL for `path`.
    ///
    /// Absolute URLs (as returned in `next_url` or `_url` links that carry a
    /// host) are used unmodified; everything else is appended to the base.
    pub fn resolve_url(&self, path: &str, options: &QueryOptions) -> Result<Url> {
        if is_absolute(path) {
            return Ok(Url::parse(path)?);
        }
        let base = options
            .api_base_url
            .as_deref()
            .map(|b| b.trim_end_matches('/'))
            .unwrap_or(&self.base_url);
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Issue one authenticated request and return the parsed JSON body.
    ///
    /// A successful response with an empty body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`CfError::HttpError`] on transport failure
    /// - [`CfError::ApiError`] on a non-2xx status
    /// - [`CfError::ParseError`] if a 2xx body is not JSON
    #[tracing::instrument(skip(self, options), fields(method = %options.method()))]
    pub async fn invoke(&self, path: &str, options: &QueryOptions) -> Result<Value> {
        let mut url = self.resolve_url(path, options)?;
        let filters = options.filters.pairs();
        if !filters.is_empty() {
            url.query_pairs_mut().extend_pairs(filters);
        }

        tracing::debug!(url = %url, "sending request");

        let mut request = self
            .http
            .request(options.method(), url)
            .header(
                AUTHORIZATION,
                format!("{} {}", options.token_type(), self.token),
            )
            .header(ACCEPT, "application/json");
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(CfError::HttpError)?;
        let response = check_response(response).await?;
        read_json(response).await
    }

    /// Make a request and decode the body into `T`.
    pub async fn get_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &QueryOptions,
    ) -> Result<T> {
        let value = self.invoke(path, options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Make a GET request with default options.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_resource(path, &QueryOptions::default()).await
    }
}

/// Shared transport configuration. No client-side timeout is set.
pub(crate) fn build_http() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .brotli(true)
        .gzip(true)
        .deflate(true)
        .build()
        .map_err(CfError::HttpError)
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Read a 2xx body as JSON, mapping an empty body to `null`.
pub(crate) async fn read_json(response: Response) -> Result<Value> {
    let body = response.text().await.map_err(CfError::HttpError)?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

/// Check response status and convert errors.
pub(crate) async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

/// Translate a failed response into [`CfError::ApiError`].
///
/// The message is `description`, then `error_description`, then a
/// synthesized `"<platform> api error: <status>"`.
pub(crate) fn api_error(status: StatusCode, body: &str) -> CfError {
    let details: Map<String, Value> = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default();

    let message = ["description", "error_description"]
        .iter()
        .find_map(|key| details.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{PLATFORM_NAME} api error: {}", status.as_u16()));

    tracing::debug!(status = status.as_u16(), %message, "api error");

    CfError::ApiError {
        message,
        status_code: status.as_u16(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = CfClient::new("test-token", "https://api.example.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("CfClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = CfClient::new("token", "https://api.example.com").unwrap();
        let client2 = CfClient::new("token", "https://api.example.com/").unwrap();
        assert_eq!(client1.base_url(), client2.base_url());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            CfClient::new("token", "not a url"),
            Err(CfError::UrlError(_))
        ));
    }

    #[test]
    fn test_resolve_url_appends_path() {
        let client = CfClient::new("token", "https://api.example.com").unwrap();
        let url = client
            .resolve_url("/v2/organizations", &QueryOptions::default())
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/organizations");
    }

    #[test]
    fn test_resolve_url_keeps_absolute() {
        let client = CfClient::new("token", "https://api.example.com").unwrap();
        let next = "https://other.example.com/v2/spaces/s1/services?page=2";
        let url = client.resolve_url(next, &QueryOptions::default()).unwrap();
        assert_eq!(url.as_str(), next);
    }

    #[test]
    fn test_resolve_url_override() {
        let client = CfClient::new("token", "https://api.example.com").unwrap();
        let opts = QueryOptions::new().with_api_base_url("http://localhost:9000/");
        let url = client.resolve_url("/v2/apps", &opts).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v2/apps");
    }

    #[test]
    fn test_api_error_prefers_description() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            r#"{"description": "not found", "error_description": "other", "code": 10000}"#,
        );
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.detail("code"), Some(&serde_json::json!(10000)));
    }

    #[test]
    fn test_api_error_falls_back_to_error_description() {
        let err = api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error": "invalid_token", "error_description": "Invalid auth token"}"#,
        );
        assert_eq!(err.to_string(), "Invalid auth token");
        assert!(err.is_unauthorized());
        assert_eq!(err.detail("error"), Some(&serde_json::json!("invalid_token")));
    }

    #[test]
    fn test_api_error_synthesized_for_non_json() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "Cloud Foundry api error: 500");

        let err = api_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "Cloud Foundry api error: 502");
    }

    #[test]
    fn test_from_session_requires_token() {
        let err = CfClient::from_session(&Session::default()).unwrap_err();
        assert!(matches!(err, CfError::ConfigMissing(_)));
    }

    #[test]
    fn test_from_session_uses_target_and_space() {
        let session = Session {
            api_url: Some("https://api.example.com".to_string()),
            access_token: Some("tok".to_string()),
            space_guid: Some("s1".to_string()),
            ..Default::default()
        };
        let client = CfClient::from_session(&session).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.space_guid().unwrap(), "s1");
    }
}
