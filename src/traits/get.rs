//! Get trait for fetching single entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::CfClient;
use crate::error::Result;
use crate::models::Resource;
use crate::path::API_ROOT;
use crate::traits::Collection;

/// Fetch a single entity by guid or by a link returned from another
/// resource.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Get, ServicePlan};
///
/// let client = CfClient::from_env()?;
/// let plan = ServicePlan::get(&client, "plan-guid").await?;
/// let same = ServicePlan::fetch(&client, &plan.metadata.url).await?;
/// ```
#[async_trait]
pub trait Get: Collection + DeserializeOwned + Send + 'static {
    /// Fetch `/v2/<collection>/<guid>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &CfClient, guid: &str) -> Result<Resource<Self>> {
        let path = format!(
            "{API_ROOT}/{}/{}",
            Self::COLLECTION,
            urlencoding::encode(guid)
        );
        Self::fetch(client, &path).await
    }

    /// Fetch the entity at `url`, used unmodified.
    async fn fetch(client: &CfClient, url: &str) -> Result<Resource<Self>> {
        client.get(url).await
    }
}
