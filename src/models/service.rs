//! Marketplace service and service plan models.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::CfClient;
use crate::error::{CfError, Result};
use crate::models::{Linked, Links, Resource};
use crate::options::QueryOptions;
use crate::path::ResourceParent;
use crate::traits::{Collection, Get, List};

/// A marketplace service offering (e.g., a key-value store).
///
/// An explicit `null` for `active`, `bindable` or `tags` reads as the default.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Marketplace label, matched against the supported-service registry.
    pub label: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub active: bool,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub bindable: bool,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub unique_id: Option<String>,

    /// Links (`service_plans_url`, ...) and other fields.
    #[serde(flatten)]
    pub links: Links,
}

/// A tier of a service offering.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePlan {
    pub name: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub free: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub service_guid: Option<String>,

    #[serde(default)]
    pub public: Option<bool>,

    #[serde(default)]
    pub unique_id: Option<String>,

    /// Links (`service_url`, `service_instances_url`, ...) and other fields.
    #[serde(flatten)]
    pub links: Links,
}

impl ServicePlan {
    /// Plan name with a `*` suffix for free plans.
    pub fn display_name(&self) -> String {
        if self.free {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}

impl Linked for Service {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Linked for ServicePlan {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Collection for Service {
    const COLLECTION: &'static str = "services";
}

impl Collection for ServicePlan {
    const COLLECTION: &'static str = "service_plans";
}

impl Get for Service {}
impl List for Service {}
impl Get for ServicePlan {}
impl List for ServicePlan {}

impl Resource<Service> {
    /// Plans of this service, via its `service_plans_url`.
    pub async fn plans(&self, client: &CfClient) -> Result<Vec<Resource<ServicePlan>>> {
        get_service_plans(client, self, &QueryOptions::default()).await
    }
}

impl Resource<ServicePlan> {
    /// The service this plan belongs to, via its `service_url`.
    pub async fn service(&self, client: &CfClient) -> Result<Resource<Service>> {
        let url = self
            .entity
            .links
            .child_url("service")
            .ok_or_else(|| CfError::MissingLink {
                child: "service".to_string(),
            })?;
        Service::fetch(client, url).await
    }
}

/// Get services under `parent`.
pub async fn get_services<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    options: &QueryOptions,
) -> Result<Vec<Resource<Service>>> {
    Service::list(client, parent.into(), options).await
}

/// Get service plans under `parent` (usually a service entry).
pub async fn get_service_plans<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    options: &QueryOptions,
) -> Result<Vec<Resource<ServicePlan>>> {
    ServicePlan::list(client, parent.into(), options).await
}
