//! Per-request options for the request primitive.

use reqwest::Method;
use serde_json::Value;

/// Default authorization scheme word.
pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Query-string filters passed through to list endpoints unmodified.
///
/// Parameter names follow the API: `q`, `page`, `results-per-page`,
/// `order-direction`. `q` may be repeated, so these are sent as pairs
/// rather than through a serialized struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    pub q: Vec<String>,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
    pub order_direction: Option<OrderDirection>,
}

impl QueryFilters {
    /// True when no filter would be sent.
    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
            && self.page.is_none()
            && self.results_per_page.is_none()
            && self.order_direction.is_none()
    }

    /// Key/value pairs in the order they are appended to the URL.
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> =
            self.q.iter().map(|q| ("q", q.clone())).collect();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(count) = self.results_per_page {
            pairs.push(("results-per-page", count.to_string()));
        }
        if let Some(direction) = self.order_direction {
            let direction = match direction {
                OrderDirection::Asc => "asc",
                OrderDirection::Desc => "desc",
            };
            pairs.push(("order-direction", direction.to_string()));
        }
        pairs
    }
}

/// Options recognized by [`CfClient::invoke`](crate::CfClient::invoke).
///
/// Every field is optional; the defaults are a `GET` with a `bearer`
/// token against the client's base URL and no body.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Overrides the client's API base URL for this request.
    pub api_base_url: Option<String>,
    /// Authorization scheme word (`bearer` when unset).
    pub token_type: Option<String>,
    /// HTTP verb (`GET` when unset).
    pub method: Option<Method>,
    /// JSON request body.
    pub body: Option<Value>,
    /// Query-string filters.
    pub filters: QueryFilters,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `POST` carrying `body` as JSON.
    pub fn post(body: Value) -> Self {
        Self {
            method: Some(Method::POST),
            body: Some(body),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a `q` filter such as `name:my-app`.
    #[must_use]
    pub fn with_q(mut self, q: impl Into<String>) -> Self {
        self.filters.q.push(q.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.filters.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_results_per_page(mut self, count: u32) -> Self {
        self.filters.results_per_page = Some(count);
        self
    }

    #[must_use]
    pub fn with_order_direction(mut self, direction: OrderDirection) -> Self {
        self.filters.order_direction = Some(direction);
        self
    }

    /// The effective HTTP method.
    pub fn method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    pub fn token_type(&self) -> &str {
        self.token_type.as_deref().unwrap_or(DEFAULT_TOKEN_TYPE)
    }

    /// Same options minus the filters, used when following `next_url`
    /// links which already carry their own query string.
    pub(crate) fn without_filters(&self) -> Self {
        Self {
            filters: QueryFilters::default(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = QueryOptions::new();
        assert_eq!(opts.method(), Method::GET);
        assert_eq!(opts.token_type(), "bearer");
        assert!(opts.body.is_none());
        assert!(opts.filters.is_empty());
    }

    #[test]
    fn test_post_sets_method_and_body() {
        let opts = QueryOptions::post(serde_json::json!({"name": "db"}));
        assert_eq!(opts.method(), Method::POST);
        assert_eq!(opts.body, Some(serde_json::json!({"name": "db"})));
    }

    #[test]
    fn test_filter_pairs_keep_order_and_names() {
        let opts = QueryOptions::new()
            .with_q("name:app")
            .with_q("space_guid:s1")
            .with_page(2)
            .with_results_per_page(50)
            .with_order_direction(OrderDirection::Desc);

        assert_eq!(
            opts.filters.pairs(),
            vec![
                ("q", "name:app".to_string()),
                ("q", "space_guid:s1".to_string()),
                ("page", "2".to_string()),
                ("results-per-page", "50".to_string()),
                ("order-direction", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_without_filters_keeps_other_fields() {
        let opts = QueryOptions::new()
            .with_token_type("Bearer")
            .with_page(3)
            .with_api_base_url("http://localhost");
        let stripped = opts.without_filters();
        assert!(stripped.filters.is_empty());
        assert_eq!(stripped.token_type(), "Bearer");
        assert_eq!(stripped.api_base_url.as_deref(), Some("http://localhost"));
    }
}
