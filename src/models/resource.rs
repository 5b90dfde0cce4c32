//! Resource envelope shared by every entity type.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity block present on every resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Resource guid.
    pub guid: String,

    /// Path of this resource (e.g., "/v2/apps/<guid>").
    pub url: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A resource entry: `metadata` plus a typed `entity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

impl<E> Resource<E> {
    pub fn guid(&self) -> &str {
        &self.metadata.guid
    }
}

/// Entity fields the typed struct does not name.
///
/// Navigable sub-resources arrive here as `<child>_url` fields whose values
/// can be fetched as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Value>);

impl Links {
    /// The `<child>_url` link, if present and a string.
    pub fn child_url(&self, child: &str) -> Option<&str> {
        self.0
            .get(&format!("{child}_url"))
            .and_then(Value::as_str)
    }

    /// Any other unnamed field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Links {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Links(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Entities that expose their sub-resource links.
pub trait Linked {
    fn links(&self) -> &Links;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_child_url() {
        let links: Links = [
            ("spaces_url", "/v2/organizations/o1/spaces"),
            ("name", "not-a-link"),
        ]
        .into_iter()
        .collect();

        assert_eq!(links.child_url("spaces"), Some("/v2/organizations/o1/spaces"));
        assert_eq!(links.child_url("apps"), None);
    }

    #[test]
    fn test_links_ignore_non_string_values() {
        let mut links = Links::default();
        links.insert("quota_url", serde_json::json!(42));
        assert_eq!(links.child_url("quota"), None);
        assert_eq!(links.get("quota_url"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_metadata_parses_timestamps() {
        let meta: Metadata = serde_json::from_value(serde_json::json!({
            "guid": "g1",
            "url": "/v2/apps/g1",
            "created_at": "2017-03-01T10:00:00Z",
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(meta.guid, "g1");
        assert!(meta.created_at.is_some());
        assert!(meta.updated_at.is_none());
    }
}
