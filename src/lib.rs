//! Cloud Foundry API client library.
//!
//! A Rust library for the Cloud Foundry v2 API as used by project
//! generators that wire data services (databases, key-value stores,
//! messaging) into new apps: listing organizations, spaces, apps and
//! services, provisioning and binding instances, and finding the data
//! services a generator knows how to configure.
//!
//! # Quick Start
//!
//! ```no_run
//! use cfapi::{CfClient, QueryOptions, ResourceParent, SupportedServices, ServiceFilter};
//!
//! #[tokio::main]
//! async fn main() -> cfapi::Result<()> {
//!     // Token and target from the saved login session (or CF_ACCESS_TOKEN)
//!     let client = CfClient::from_env()?;
//!
//!     let orgs = cfapi::get_organizations(&client, &QueryOptions::default()).await?;
//!     println!("Found {} organizations", orgs.len());
//!
//!     // Data service instances in the targeted space
//!     let registry = SupportedServices::new().with("mongodb", "compose-for-mongodb");
//!     let space = ResourceParent::space(client.space_guid()?);
//!     let instances = cfapi::get_data_service_instances(
//!         &client,
//!         space,
//!         ServiceFilter::Labels(&registry),
//!         &QueryOptions::default(),
//!     )
//!     .await?;
//!     for joined in &instances {
//!         println!("{} ({})", joined.name(), joined.label());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! [`CfClient::invoke`] is the single request primitive: it builds the URL,
//! attaches the token and translates non-2xx responses into
//! [`CfError::ApiError`]. Entity types implement the operation traits:
//!
//! - [`Get`] - Fetch a single entity by guid or link
//! - [`List`] - Fetch a collection under a [`ResourceParent`]
//! - [`Create`] - Provision or bind
//!
//! # Configuration
//!
//! - `CF_ACCESS_TOKEN` / `CF_API_URL` - override the saved session
//! - `BLUEMIX_HOME` / `CF_HOME` - where saved sessions are looked up
//!   (see [`Session::discover`])

mod auth;
mod client;
mod error;
mod models;
mod options;
mod pagination;
mod path;
mod registry;
mod session;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{login, LoginCredentials, LoginOptions, TokenResponse, DEFAULT_AUTH_URL};
pub use client::{CfClient, DEFAULT_API_URL};
pub use error::{CfError, Result};
pub use options::{OrderDirection, QueryFilters, QueryOptions, DEFAULT_TOKEN_TYPE};
pub use pagination::{collect_pages, ResourceList, MAX_PAGES};
pub use path::{ResourceParent, API_ROOT};
pub use registry::{
    legacy_data_tags, ServiceDescriptor, ServiceFilter, SupportedServices, LEGACY_DATA_TAG,
};
pub use session::{Session, SessionLocations, LOGIN_HINT};

// Re-export traits
pub use traits::{Collection, Create, Get, List};

// Re-export models
pub use models::{
    App, BindParams, Linked, Links, Metadata, Organization, ProvisionParams, Resource, Service,
    ServiceBinding, ServiceInstance, ServiceInstanceJoin, ServicePlan, Space,
};

// Re-export convenience functions
pub use models::{
    bind_service, find_app_by_name, get_apps, get_data_service_instances, get_marketplace,
    get_organizations, get_service_instances, get_service_plans, get_services, get_spaces,
    get_supported_services, get_target_supported_services, join_service_instance,
    list_service_instances, provision_service,
};
