//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Cloud Foundry API server.

use std::sync::Arc;
use tokio::sync::RwLock;

use serde_json::json;

use super::fixtures::{DefaultScenario, Fixtures};
use crate::{
    App, BindParams, Links, Metadata, Organization, ProvisionParams, Resource, Service,
    ServiceBinding, ServiceInstance, ServicePlan, Space,
};

/// Why a bind request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindRejection {
    AlreadyBound,
    UnknownTarget,
}

/// Marketplace page size used when the request does not name one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Collections keep
/// insertion order, which is the order the API returns them in.
#[derive(Debug, Default)]
pub struct MockState {
    pub organizations: Vec<Resource<Organization>>,
    pub spaces: Vec<Resource<Space>>,
    pub apps: Vec<Resource<App>>,
    /// Marketplace services; every space sees all of them.
    pub services: Vec<Resource<Service>>,
    pub plans: Vec<Resource<ServicePlan>>,
    pub instances: Vec<Resource<ServiceInstance>>,
    pub bindings: Vec<Resource<ServiceBinding>>,

    /// Optional authentication token. If set, API requests must carry
    /// `Authorization: bearer <token>`.
    pub required_token: Option<String>,

    /// Username and password accepted by the token endpoint.
    pub password_login: Option<(String, String)>,

    /// Passcode accepted by the token endpoint.
    pub passcode_login: Option<String>,

    /// Plan guids whose lookup answers 500, for failure-path tests.
    pub failing_plans: Vec<String>,

    /// Marketplace page size when the request names none
    /// (`DEFAULT_PAGE_SIZE` when unset).
    pub marketplace_page_size: Option<usize>,

    next_guid: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Create state holding a scenario.
    pub fn from_scenario(scenario: DefaultScenario) -> Self {
        Self {
            organizations: scenario.organizations,
            spaces: scenario.spaces,
            apps: scenario.apps,
            services: scenario.services,
            plans: scenario.plans,
            instances: scenario.instances,
            ..Self::default()
        }
    }

    /// Add a service to the marketplace.
    pub fn with_service(mut self, service: Resource<Service>) -> Self {
        self.services.push(service);
        self
    }

    /// Add a service plan.
    pub fn with_plan(mut self, plan: Resource<ServicePlan>) -> Self {
        self.plans.push(plan);
        self
    }

    /// Add a service instance.
    pub fn with_instance(mut self, instance: Resource<ServiceInstance>) -> Self {
        self.instances.push(instance);
        self
    }

    /// Add an app.
    pub fn with_app(mut self, app: Resource<App>) -> Self {
        self.apps.push(app);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Accept this username and password at the token endpoint.
    pub fn with_password_login(mut self, username: &str, password: &str) -> Self {
        self.password_login = Some((username.to_string(), password.to_string()));
        self
    }

    /// Accept this passcode at the token endpoint.
    pub fn with_passcode_login(mut self, passcode: &str) -> Self {
        self.passcode_login = Some(passcode.to_string());
        self
    }

    /// Make lookups of this plan fail with a 500.
    pub fn with_failing_plan(mut self, plan_guid: &str) -> Self {
        self.failing_plans.push(plan_guid.to_string());
        self
    }

    /// Split the marketplace into pages of `size`.
    pub fn with_marketplace_page_size(mut self, size: usize) -> Self {
        self.marketplace_page_size = Some(size);
        self
    }

    pub fn get_service(&self, guid: &str) -> Option<&Resource<Service>> {
        self.services.iter().find(|s| s.guid() == guid)
    }

    pub fn get_plan(&self, guid: &str) -> Option<&Resource<ServicePlan>> {
        self.plans.iter().find(|p| p.guid() == guid)
    }

    /// Spaces of an organization.
    pub fn spaces_in_org(&self, org_guid: &str) -> Vec<&Resource<Space>> {
        self.spaces
            .iter()
            .filter(|s| s.entity.organization_guid.as_deref() == Some(org_guid))
            .collect()
    }

    /// Apps, optionally restricted to a space and an exact name.
    pub fn list_apps(&self, space_guid: Option<&str>, name: Option<&str>) -> Vec<&Resource<App>> {
        self.apps
            .iter()
            .filter(|a| space_guid.map_or(true, |s| a.entity.space_guid.as_deref() == Some(s)))
            .filter(|a| name.map_or(true, |n| a.entity.name == n))
            .collect()
    }

    /// Plans of a service.
    pub fn plans_for_service(&self, service_guid: &str) -> Vec<&Resource<ServicePlan>> {
        self.plans
            .iter()
            .filter(|p| p.entity.service_guid.as_deref() == Some(service_guid))
            .collect()
    }

    /// Instances, optionally restricted to a space.
    pub fn list_instances(&self, space_guid: Option<&str>) -> Vec<&Resource<ServiceInstance>> {
        self.instances
            .iter()
            .filter(|i| space_guid.map_or(true, |s| i.entity.space_guid.as_deref() == Some(s)))
            .collect()
    }

    fn next_guid(&mut self, prefix: &str) -> String {
        self.next_guid += 1;
        format!("{prefix}-{}", self.next_guid)
    }

    /// Provision an instance. Returns `None` if the plan does not exist.
    pub fn provision(&mut self, params: &ProvisionParams) -> Option<&Resource<ServiceInstance>> {
        self.get_plan(&params.service_plan_guid)?;
        let guid = self.next_guid("inst");
        self.instances.push(Fixtures::instance(
            &guid,
            &params.name,
            &params.service_plan_guid,
            &params.space_guid,
        ));
        self.instances.last()
    }

    /// Bind an app to an instance.
    pub fn bind(
        &mut self,
        params: &BindParams,
    ) -> Result<&Resource<ServiceBinding>, BindRejection> {
        if self.bindings.iter().any(|b| {
            b.entity.app_guid == params.app_guid
                && b.entity.service_instance_guid == params.service_instance_guid
        }) {
            return Err(BindRejection::AlreadyBound);
        }
        let known_app = self.apps.iter().any(|a| a.guid() == params.app_guid);
        let known_instance = self
            .instances
            .iter()
            .any(|i| i.guid() == params.service_instance_guid);
        if !known_app || !known_instance {
            return Err(BindRejection::UnknownTarget);
        }

        let guid = self.next_guid("binding");
        let links: Links = [
            ("app_url", format!("/v2/apps/{}", params.app_guid)),
            (
                "service_instance_url",
                format!("/v2/service_instances/{}", params.service_instance_guid),
            ),
        ]
        .into_iter()
        .collect();
        self.bindings.push(Resource {
            metadata: Metadata {
                url: format!("/v2/service_bindings/{guid}"),
                guid,
                created_at: None,
                updated_at: None,
            },
            entity: ServiceBinding {
                app_guid: params.app_guid.clone(),
                service_instance_guid: params.service_instance_guid.clone(),
                credentials: Some(json!({})),
                links,
            },
        });
        self.bindings.last().ok_or(BindRejection::UnknownTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::fixtures::guids;

    fn default_state() -> MockState {
        MockState::from_scenario(Fixtures::default_scenario())
    }

    #[test]
    fn test_state_filters_by_space() {
        let state = default_state();
        assert_eq!(state.list_instances(Some(guids::SPACE)).len(), 3);
        assert!(state.list_instances(Some("elsewhere")).is_empty());
        assert_eq!(state.list_apps(None, Some("web")).len(), 1);
        assert!(state.list_apps(None, Some("api")).is_empty());
    }

    #[test]
    fn test_state_provision() {
        let mut state = default_state();
        let params = ProvisionParams {
            name: "orders-db".to_string(),
            service_plan_guid: "plan-redis-standard".to_string(),
            space_guid: guids::SPACE.to_string(),
        };
        let created = state.provision(&params).unwrap();
        assert_eq!(created.entity.name, "orders-db");
        assert_eq!(state.instances.len(), 4);

        let bad = ProvisionParams {
            service_plan_guid: "nope".to_string(),
            ..params
        };
        assert!(state.provision(&bad).is_none());
    }

    #[test]
    fn test_state_bind_twice() {
        let mut state = default_state();
        let params = BindParams {
            app_guid: guids::APP.to_string(),
            service_instance_guid: "inst-cloudant".to_string(),
        };
        assert!(state.bind(&params).is_ok());
        assert_eq!(state.bind(&params).unwrap_err(), BindRejection::AlreadyBound);

        let unknown = BindParams {
            app_guid: "ghost".to_string(),
            service_instance_guid: "inst-cloudant".to_string(),
        };
        assert_eq!(state.bind(&unknown).unwrap_err(), BindRejection::UnknownTarget);
    }
}
