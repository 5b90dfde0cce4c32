//! Supported data-service registry.
//!
//! Maps a connector identifier (e.g., `mongodb`) to the marketplace label of
//! the service it can wire up. The registry is supplied by the caller,
//! usually loaded from the `supportedServices` key of a
//! `datasources-config.json` file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::Service;

/// Tag that marked data services before label matching was introduced.
pub const LEGACY_DATA_TAG: &str = "data_management";

/// A registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Marketplace label of the service (e.g., `cloudantNoSQLDB`).
    pub label: String,

    /// Any additional connector settings.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extra: Map::new(),
        }
    }
}

/// Connector identifier to service descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedServices(BTreeMap<String, ServiceDescriptor>);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasourcesConfig {
    supported_services: SupportedServices,
}

impl SupportedServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connector mapped to `label`.
    #[must_use]
    pub fn with(mut self, connector: impl Into<String>, label: impl Into<String>) -> Self {
        self.0
            .insert(connector.into(), ServiceDescriptor::new(label));
        self
    }

    /// Parse the `supportedServices` object of a datasources config.
    pub fn from_datasources_json(json: &str) -> Result<Self> {
        let config: DatasourcesConfig = serde_json::from_str(json)?;
        Ok(config.supported_services)
    }

    /// Load from a `datasources-config.json` file.
    pub fn from_datasources_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_datasources_json(&contents)
    }

    pub fn get(&self, connector: &str) -> Option<&ServiceDescriptor> {
        self.0.get(connector)
    }

    /// True if any connector maps to `label`.
    pub fn supports_label(&self, label: &str) -> bool {
        self.0.values().any(|d| d.label == label)
    }

    /// Connector handling services with `label`.
    pub fn connector_for_label(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, d)| d.label == label)
            .map(|(connector, _)| connector.as_str())
    }

    /// All labels, in connector order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(|d| d.label.as_str())
    }

    pub fn connectors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which services count as data services.
#[derive(Debug, Clone, Copy)]
pub enum ServiceFilter<'a> {
    /// Label is in the supported-service registry.
    Labels(&'a SupportedServices),
    /// Service tags intersect the set (legacy policy).
    Tags(&'a BTreeSet<String>),
}

impl ServiceFilter<'_> {
    pub fn matches(&self, service: &Service) -> bool {
        match self {
            ServiceFilter::Labels(registry) => registry.supports_label(&service.label),
            ServiceFilter::Tags(tags) => service.tags.iter().any(|t| tags.contains(t)),
        }
    }
}

/// The legacy tag set: `{"data_management"}`.
pub fn legacy_data_tags() -> BTreeSet<String> {
    BTreeSet::from([LEGACY_DATA_TAG.to_string()])
}
