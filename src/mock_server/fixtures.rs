//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data. Every
//! entity carries the `_url` links the real API returns, so link-following
//! code paths work against the mock.

use serde_json::json;

use crate::{
    App, Links, Metadata, Organization, Resource, Service, ServiceInstance, ServicePlan, Space,
};

/// Guids of the default scenario.
pub mod guids {
    pub const ORG: &str = "org-acme";
    pub const SPACE: &str = "space-dev";
    pub const APP: &str = "app-web";
    pub const CLOUDANT: &str = "svc-cloudant";
    pub const REDIS: &str = "svc-redis";
    pub const RABBIT: &str = "svc-rabbit";
    pub const AUTOSCALING: &str = "svc-autoscaling";
}

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data the default server starts with.
pub struct DefaultScenario {
    pub organizations: Vec<Resource<Organization>>,
    pub spaces: Vec<Resource<Space>>,
    pub apps: Vec<Resource<App>>,
    pub services: Vec<Resource<Service>>,
    pub plans: Vec<Resource<ServicePlan>>,
    pub instances: Vec<Resource<ServiceInstance>>,
}

fn metadata(collection: &str, guid: &str) -> Metadata {
    Metadata {
        guid: guid.to_string(),
        url: format!("/v2/{collection}/{guid}"),
        created_at: None,
        updated_at: None,
    }
}

fn links<const N: usize>(pairs: [(&str, String); N]) -> Links {
    pairs.into_iter().collect()
}

impl Fixtures {
    // =========================================================================
    // Tenancy Fixtures
    // =========================================================================

    pub fn organization(guid: &str, name: &str) -> Resource<Organization> {
        Resource {
            metadata: metadata("organizations", guid),
            entity: Organization {
                name: name.to_string(),
                status: Some("active".to_string()),
                billing_enabled: Some(false),
                quota_definition_guid: None,
                links: links([("spaces_url", format!("/v2/organizations/{guid}/spaces"))]),
            },
        }
    }

    pub fn space(guid: &str, name: &str, org_guid: &str) -> Resource<Space> {
        Resource {
            metadata: metadata("spaces", guid),
            entity: Space {
                name: name.to_string(),
                organization_guid: Some(org_guid.to_string()),
                links: links([
                    ("apps_url", format!("/v2/spaces/{guid}/apps")),
                    (
                        "service_instances_url",
                        format!("/v2/spaces/{guid}/service_instances"),
                    ),
                    ("organization_url", format!("/v2/organizations/{org_guid}")),
                ]),
            },
        }
    }

    pub fn app(guid: &str, name: &str, space_guid: &str) -> Resource<App> {
        Resource {
            metadata: metadata("apps", guid),
            entity: App {
                name: name.to_string(),
                space_guid: Some(space_guid.to_string()),
                state: Some("STARTED".to_string()),
                memory: Some(256),
                instances: Some(1),
                buildpack: None,
                links: links([(
                    "service_bindings_url",
                    format!("/v2/apps/{guid}/service_bindings"),
                )]),
            },
        }
    }

    // =========================================================================
    // Marketplace Fixtures
    // =========================================================================

    pub fn service(guid: &str, label: &str, tags: &[&str]) -> Resource<Service> {
        Resource {
            metadata: metadata("services", guid),
            entity: Service {
                label: label.to_string(),
                description: Some(format!("{label} service")),
                active: true,
                bindable: true,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                unique_id: Some(format!("{guid}-id")),
                links: links([(
                    "service_plans_url",
                    format!("/v2/services/{guid}/service_plans"),
                )]),
            },
        }
    }

    pub fn plan(guid: &str, name: &str, service_guid: &str, free: bool) -> Resource<ServicePlan> {
        Resource {
            metadata: metadata("service_plans", guid),
            entity: ServicePlan {
                name: name.to_string(),
                free,
                description: None,
                service_guid: Some(service_guid.to_string()),
                public: Some(true),
                unique_id: None,
                links: links([("service_url", format!("/v2/services/{service_guid}"))]),
            },
        }
    }

    pub fn instance(
        guid: &str,
        name: &str,
        plan_guid: &str,
        space_guid: &str,
    ) -> Resource<ServiceInstance> {
        Resource {
            metadata: metadata("service_instances", guid),
            entity: ServiceInstance {
                name: name.to_string(),
                credentials: Some(json!({})),
                service_plan_guid: Some(plan_guid.to_string()),
                space_guid: Some(space_guid.to_string()),
                dashboard_url: None,
                instance_type: Some("managed_service_instance".to_string()),
                links: links([
                    ("service_plan_url", format!("/v2/service_plans/{plan_guid}")),
                    ("space_url", format!("/v2/spaces/{space_guid}")),
                    (
                        "service_bindings_url",
                        format!("/v2/service_instances/{guid}/service_bindings"),
                    ),
                ]),
            },
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// One org with one space and app; four marketplace services of which
    /// three are tagged as data services; one instance per
    /// cloudant/rabbit/autoscaling plan.
    pub fn default_scenario() -> DefaultScenario {
        use guids::*;

        let data = ["data_management", "ibm_created"];
        DefaultScenario {
            organizations: vec![Self::organization(ORG, "acme")],
            spaces: vec![Self::space(SPACE, "dev", ORG)],
            apps: vec![Self::app(APP, "web", SPACE)],
            services: vec![
                Self::service(CLOUDANT, "cloudantNoSQLDB", &data),
                Self::service(REDIS, "compose-for-redis", &data),
                Self::service(RABBIT, "compose-for-rabbitmq", &data),
                Self::service(AUTOSCALING, "Auto-Scaling", &["ibm_created"]),
            ],
            plans: vec![
                Self::plan("plan-cloudant-lite", "Lite", CLOUDANT, true),
                Self::plan("plan-redis-standard", "Standard", REDIS, false),
                Self::plan("plan-rabbit-standard", "Standard", RABBIT, false),
                Self::plan("plan-autoscaling-free", "free", AUTOSCALING, true),
            ],
            instances: vec![
                Self::instance("inst-cloudant", "cloudantFixture", "plan-cloudant-lite", SPACE),
                Self::instance("inst-rabbit", "rabbitFixture", "plan-rabbit-standard", SPACE),
                Self::instance("inst-nondata", "nonDataFixture", "plan-autoscaling-free", SPACE),
            ],
        }
    }
}
