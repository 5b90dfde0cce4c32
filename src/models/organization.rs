//! Organization and space models.

use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::error::Result;
use crate::models::{Linked, Links, Resource};
use crate::options::QueryOptions;
use crate::path::ResourceParent;
use crate::traits::{Collection, Get, List};

/// An organization: the top-level tenancy unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,

    /// Lifecycle status (e.g., "active", "suspended").
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub billing_enabled: Option<bool>,

    #[serde(default)]
    pub quota_definition_guid: Option<String>,

    /// Links (`spaces_url`, `users_url`, ...) and other fields.
    #[serde(flatten)]
    pub links: Links,
}

/// A space within an organization. Spaces hold apps and service instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,

    #[serde(default)]
    pub organization_guid: Option<String>,

    /// Links (`apps_url`, `service_instances_url`, ...) and other fields.
    #[serde(flatten)]
    pub links: Links,
}

impl Linked for Organization {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Linked for Space {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Collection for Organization {
    const COLLECTION: &'static str = "organizations";
}

impl Collection for Space {
    const COLLECTION: &'static str = "spaces";
}

impl Get for Organization {}
impl List for Organization {}
impl Get for Space {}
impl List for Space {}

impl Resource<Organization> {
    /// Spaces of this organization.
    pub async fn spaces(&self, client: &CfClient) -> Result<Vec<Resource<Space>>> {
        get_spaces(client, self, &QueryOptions::default()).await
    }
}

/// Get all organizations visible to the token.
#[tracing::instrument(skip(client, options))]
pub async fn get_organizations(
    client: &CfClient,
    options: &QueryOptions,
) -> Result<Vec<Resource<Organization>>> {
    Organization::list(client, ResourceParent::Root, options).await
}

/// Get spaces under `parent` (an organization entry, a path, or the root).
pub async fn get_spaces<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    options: &QueryOptions,
) -> Result<Vec<Resource<Space>>> {
    Space::list(client, parent.into(), options).await
}
