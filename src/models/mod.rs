//! Entity models for the Cloud Foundry v2 API.

mod app;
mod marketplace;
mod organization;
mod resource;
mod service;
mod service_binding;
mod service_instance;

pub use app::{find_app_by_name, get_apps, App};
pub use marketplace::{get_marketplace, get_supported_services, get_target_supported_services};
pub use organization::{get_organizations, get_spaces, Organization, Space};
pub use resource::{Linked, Links, Metadata, Resource};
pub use service::{get_service_plans, get_services, Service, ServicePlan};
pub use service_binding::{bind_service, BindParams, ServiceBinding};
pub use service_instance::{
    get_data_service_instances, get_service_instances, join_service_instance,
    list_service_instances, provision_service, ProvisionParams, ServiceInstance,
    ServiceInstanceJoin,
};
