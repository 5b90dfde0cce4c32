//! App model.

use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::error::Result;
use crate::models::{Linked, Links, Resource};
use crate::options::QueryOptions;
use crate::path::ResourceParent;
use crate::traits::{Collection, Get, List};

/// A deployed application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub name: String,

    #[serde(default)]
    pub space_guid: Option<String>,

    /// Desired state ("STARTED" or "STOPPED").
    #[serde(default)]
    pub state: Option<String>,

    /// Memory in MB.
    #[serde(default)]
    pub memory: Option<u64>,

    #[serde(default)]
    pub instances: Option<u32>,

    #[serde(default)]
    pub buildpack: Option<String>,

    /// Links (`service_bindings_url`, `routes_url`, ...) and other fields.
    #[serde(flatten)]
    pub links: Links,
}

impl App {
    pub fn is_started(&self) -> bool {
        self.state.as_deref() == Some("STARTED")
    }
}

impl Linked for App {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Collection for App {
    const COLLECTION: &'static str = "apps";
}

impl Get for App {}
impl List for App {}

/// Get apps under `parent`.
pub async fn get_apps<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    options: &QueryOptions,
) -> Result<Vec<Resource<App>>> {
    App::list(client, parent.into(), options).await
}

/// Find an app by exact name under `parent`.
///
/// Sends a `name:<name>` filter and re-checks the name locally, so it
/// behaves the same against endpoints that ignore `q`.
pub async fn find_app_by_name<'a>(
    client: &CfClient,
    parent: impl Into<ResourceParent<'a>>,
    name: &str,
) -> Result<Option<Resource<App>>> {
    let options = QueryOptions::new().with_q(format!("name:{name}"));
    let apps = App::list_all(client, parent.into(), &options).await?;
    Ok(apps.into_iter().find(|app| app.entity.name == name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_app() {
        let app: App = serde_json::from_value(serde_json::json!({
            "name": "web",
            "space_guid": "s1",
            "state": "STARTED",
            "memory": 256,
            "instances": 2,
            "buildpack": null,
            "service_bindings_url": "/v2/apps/a1/service_bindings"
        }))
        .unwrap();

        assert!(app.is_started());
        assert_eq!(app.memory, Some(256));
        assert_eq!(
            app.links.child_url("service_bindings"),
            Some("/v2/apps/a1/service_bindings")
        );
    }

    #[test]
    fn test_minimal_app() {
        let app: App = serde_json::from_value(serde_json::json!({"name": "worker"})).unwrap();
        assert!(!app.is_started());
        assert!(app.space_guid.is_none());
    }
}
