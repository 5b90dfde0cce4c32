//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::CfClient;
use crate::error::Result;
use crate::models::Resource;
use crate::options::QueryOptions;
use crate::pagination::{collect_pages, ResourceList};
use crate::path::ResourceParent;
use crate::traits::Collection;

/// List entities under a parent, with optional query filters.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, List, QueryOptions, ResourceParent, Space};
///
/// let client = CfClient::from_env()?;
///
/// // First page only
/// let spaces = Space::list(&client, ResourceParent::Root, &QueryOptions::default()).await?;
///
/// // Every page
/// let all = Space::list_all(&client, ResourceParent::Root, &QueryOptions::default()).await?;
/// ```
#[async_trait]
pub trait List: Collection + DeserializeOwned + Send + 'static {
    /// Fetch one page and return its envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent has no link for this collection or
    /// the request fails.
    async fn list_page(
        client: &CfClient,
        parent: ResourceParent<'_>,
        options: &QueryOptions,
    ) -> Result<ResourceList<Resource<Self>>> {
        let path = parent.child_path(Self::COLLECTION)?;
        client.get_resource(&path, options).await
    }

    /// Fetch one page and return its `resources`.
    async fn list(
        client: &CfClient,
        parent: ResourceParent<'_>,
        options: &QueryOptions,
    ) -> Result<Vec<Resource<Self>>> {
        Ok(Self::list_page(client, parent, options).await?.resources)
    }

    /// Fetch every page by following `next_url`.
    async fn list_all(
        client: &CfClient,
        parent: ResourceParent<'_>,
        options: &QueryOptions,
    ) -> Result<Vec<Resource<Self>>> {
        let path = parent.child_path(Self::COLLECTION)?;
        collect_pages(client, &path, options).await
    }
}
