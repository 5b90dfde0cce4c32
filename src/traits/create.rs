//! Create trait for provisioning entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::CfClient;
use crate::error::Result;
use crate::models::Resource;
use crate::options::QueryOptions;
use crate::path::ResourceParent;
use crate::traits::Collection;

/// Create a new entity by POSTing its parameters to the collection.
///
/// # Example
///
/// ```ignore
/// use cfapi::{BindParams, CfClient, Create, ResourceParent, ServiceBinding};
///
/// let client = CfClient::from_env()?;
/// let binding = ServiceBinding::create(
///     &client,
///     ResourceParent::Root,
///     &BindParams {
///         app_guid: "app-guid".to_string(),
///         service_instance_guid: "instance-guid".to_string(),
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Collection + DeserializeOwned + Send + 'static {
    /// Request body.
    type Params: Serialize + Send + Sync;

    /// Create the entity and return it as the API reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the platform's error fields
    /// are available through [`CfError::detail`](crate::CfError::detail).
    async fn create(
        client: &CfClient,
        parent: ResourceParent<'_>,
        params: &Self::Params,
    ) -> Result<Resource<Self>> {
        let path = parent.child_path(Self::COLLECTION)?;
        let body = serde_json::to_value(params)?;
        client.get_resource(&path, &QueryOptions::post(body)).await
    }
}
