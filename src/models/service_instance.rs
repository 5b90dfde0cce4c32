//! Service instances and the instance → plan → service join.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::CfClient;
use crate::error::{CfError, Result};
use crate::models::{Linked, Links, Resource, Service, ServicePlan};
use crate::options::QueryOptions;
use crate::path::ResourceParent;
use crate::registry::ServiceFilter;
use crate::traits::{Collection, Create, Get, List};

/// A provisioned backing service within a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub name: String,

    #[serde(default)]
    pub credentials: Option<Value>,

    #[serde(default)]
    pub service_plan_guid: Option<String>,

    #[serde(default)]
    pub space_guid: Option<String>,

    #[serde(default)]
    pub dashboard_url: Option<String>,

    /// "managed_service_instance" or "user_provided_service_instance".
    #[serde(rename = "type", default)]
    pub instance_type: Option<String>,

    /// Links (`service_plan_url`, `service_bindings_url`, ...) and other fields.
    #[serde(flatten)]
    pub links: Links,
}

/// Body of a provision request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionParams {
    pub name: String,
    pub service_plan_guid: String,
    pub space_guid: String,
}

/// An instance together with its plan and the plan's service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceJoin {
    pub instance: Resource<ServiceInstance>,
    pub service: Resource<Service>,
    pub plan: Resource<ServicePlan>,
}

impl ServiceInstanceJoin {
    pub fn name(&self) -> &str {
        &self.instance.entity.name
    }

    pub fn label(&self) -> &str {
        &self.service.entity.label
    }
}

impl Linked for ServiceInstance {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Collection for ServiceInstance {
    const COLLECTION: &'static str = "service_instances";
}

impl Get for ServiceInstance {}
impl List for ServiceInstance {}

impl Create for ServiceInstance {
    type Params = ProvisionParams;
}

/// Provision a new service instance (`POST /v2/service_instances`).
#[tracing::instrument(skip(client))]
pub async fn provision_service(
    client: &CfClient,
    params: &ProvisionParams,
) -> Result<Resource<ServiceInstance>> {
    ServiceInstance::create(client, ResourceParent::Root, params).await
}

/// Get service instances under `parent` without resolving plans.
pub async fn list_service_instances<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    options: &QueryOptions,
) -> Result<Vec<Resource<ServiceInstance>>> {
    ServiceInstance::list(client, parent.into(), options).await
}

/// Resolve one instance's plan and service.
///
/// Either lookup failing fails the whole join.
pub async fn join_service_instance(
    client: &CfClient,
    instance: Resource<ServiceInstance>,
) -> Result<ServiceInstanceJoin> {
    let plan_url = instance
        .entity
        .links
        .child_url("service_plan")
        .ok_or_else(|| CfError::MissingLink {
            child: "service_plan".to_string(),
        })?;
    let plan = ServicePlan::fetch(client, plan_url).await?;
    let service = plan.service(client).await?;

    tracing::debug!(
        "{} ({}:{})",
        instance.entity.name,
        service.entity.label,
        plan.entity.display_name()
    );

    Ok(ServiceInstanceJoin {
        instance,
        service,
        plan,
    })
}

/// Get service instances under `parent`, each joined with its plan and
/// service.
///
/// Instances are resolved concurrently. The first failure aborts the whole
/// call; no partial list is returned. Results keep the listing order.
#[tracing::instrument(skip(client, parent, options))]
pub async fn get_service_instances<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    options: &QueryOptions,
) -> Result<Vec<ServiceInstanceJoin>> {
    let instances = ServiceInstance::list(client, parent.into(), options).await?;
    tracing::debug!(count = instances.len(), "resolving service instances");
    try_join_all(
        instances
            .into_iter()
            .map(|instance| join_service_instance(client, instance)),
    )
    .await
}

/// Get joined service instances whose service passes `filter`.
pub async fn get_data_service_instances<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    filter: ServiceFilter<'_>,
    options: &QueryOptions,
) -> Result<Vec<ServiceInstanceJoin>> {
    let joined = get_service_instances(client, parent, options).await?;
    Ok(joined
        .into_iter()
        .filter(|j| filter.matches(&j.service.entity))
        .collect())
}
