//! Service binding model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::CfClient;
use crate::error::Result;
use crate::models::{Linked, Links, Resource};
use crate::path::ResourceParent;
use crate::traits::{Collection, Create, Get, List};

/// Grants an app access to a service instance's credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBinding {
    pub app_guid: String,
    pub service_instance_guid: String,

    #[serde(default)]
    pub credentials: Option<Value>,

    #[serde(flatten)]
    pub links: Links,
}

/// Body of a bind request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindParams {
    pub app_guid: String,
    pub service_instance_guid: String,
}

impl Linked for ServiceBinding {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Collection for ServiceBinding {
    const COLLECTION: &'static str = "service_bindings";
}

impl Get for ServiceBinding {}
impl List for ServiceBinding {}

impl Create for ServiceBinding {
    type Params = BindParams;
}

/// Bind a service instance to an app.
///
/// `parent` is normally the root (`POST /v2/service_bindings`). An existing
/// binding fails with an error for which
/// [`CfError::is_already_bound`](crate::CfError::is_already_bound) is true.
#[tracing::instrument(skip(client, parent))]
pub async fn bind_service<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    params: &BindParams,
) -> Result<Resource<ServiceBinding>> {
    ServiceBinding::create(client, parent.into(), params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_params_body() {
        let params = BindParams {
            app_guid: "a1".to_string(),
            service_instance_guid: "i1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"app_guid": "a1", "service_instance_guid": "i1"})
        );
    }
}
