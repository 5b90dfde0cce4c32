//! Pagination utilities for Cloud Foundry list responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::error::Result;
use crate::options::QueryOptions;

/// Maximum pages to follow (safety limit).
pub const MAX_PAGES: u32 = 1000;

/// One page of a list response.
///
/// Pages link forward through `next_url`; the last page has none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct ResourceList<T> {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub prev_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

impl<T> ResourceList<T> {
    /// Whether there are more pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_url.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ResourceList<U> {
        ResourceList {
            total_results: self.total_results,
            total_pages: self.total_pages,
            prev_url: self.prev_url,
            next_url: self.next_url,
            resources: self.resources.into_iter().map(f).collect(),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.resources.iter()
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

/// Fetch `path` and every page after it, concatenating `resources` in the
/// order returned.
///
/// Each `next_url` is requested exactly as given. Filters in `options` apply
/// to the first request only since later links embed their own query.
pub async fn collect_pages<T: DeserializeOwned>(
    client: &CfClient,
    path: &str,
    options: &QueryOptions,
) -> Result<Vec<T>> {
    let mut all_items = Vec::new();
    let mut page: ResourceList<T> = client.get_resource(path, options).await?;
    let follow_options = options.without_filters();
    let mut pages = 1;

    loop {
        all_items.extend(page.resources);

        let Some(next) = page.next_url else {
            break;
        };

        // Safety limit to prevent infinite loops
        if pages >= MAX_PAGES {
            tracing::warn!(
                "Reached pagination limit of {} pages, stopping",
                MAX_PAGES
            );
            break;
        }

        tracing::debug!(next_url = %next, page = pages + 1, "following next page");
        page = client.get_resource(&next, &follow_options).await?;
        pages += 1;
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_envelope() {
        let page: ResourceList<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "total_results": 3,
            "total_pages": 2,
            "prev_url": null,
            "next_url": "/v2/apps?page=2",
            "resources": [{"a": 1}, {"a": 2}]
        }))
        .unwrap();

        assert!(page.has_more());
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_pages, Some(2));
    }

    #[test]
    fn test_last_page_has_no_more() {
        let page: ResourceList<i32> =
            serde_json::from_value(serde_json::json!({"resources": [1]})).unwrap();
        assert!(!page.has_more());
        assert!(page.prev_url.is_none());
    }

    #[test]
    fn test_missing_resources_defaults_empty() {
        let page: ResourceList<i32> = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_map() {
        let page: ResourceList<i32> =
            serde_json::from_value(serde_json::json!({"resources": [1, 2, 3]})).unwrap();
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.resources, vec![2, 4, 6]);
    }
}
