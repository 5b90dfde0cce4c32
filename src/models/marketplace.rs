//! Marketplace listing across pages.

use crate::client::CfClient;
use crate::error::Result;
use crate::models::{Resource, Service};
use crate::options::QueryOptions;
use crate::pagination::collect_pages;
use crate::path::ResourceParent;
use crate::registry::SupportedServices;

/// All services in a space's marketplace, following `next_url` until the
/// last page.
#[tracing::instrument(skip(client, options))]
pub async fn get_marketplace(
    client: &CfClient,
    space_guid: &str,
    options: &QueryOptions,
) -> Result<Vec<Resource<Service>>> {
    let path = ResourceParent::space(space_guid).child_path("services")?;
    collect_pages(client, &path, options).await
}

/// Marketplace services whose label is in `registry`, in API order.
pub async fn get_supported_services(
    client: &CfClient,
    space_guid: &str,
    registry: &SupportedServices,
) -> Result<Vec<Resource<Service>>> {
    let services = get_marketplace(client, space_guid, &QueryOptions::default()).await?;
    Ok(services
        .into_iter()
        .filter(|s| registry.supports_label(&s.entity.label))
        .collect())
}

/// [`get_supported_services`] for the client's targeted space.
pub async fn get_target_supported_services(
    client: &CfClient,
    registry: &SupportedServices,
) -> Result<Vec<Resource<Service>>> {
    let space_guid = client.space_guid()?.to_string();
    get_supported_services(client, &space_guid, registry).await
}
