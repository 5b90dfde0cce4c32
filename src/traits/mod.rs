//! Trait definitions for Cloud Foundry operations.
//!
//! Each entity type implements the traits its endpoints support. The
//! default method bodies build paths from [`Collection::COLLECTION`] and
//! the [`ResourceParent`](crate::ResourceParent) addressing rules.

mod create;
mod get;
mod list;

pub use create::Create;
pub use get::Get;
pub use list::List;

/// Name of the API collection an entity lives in (e.g., `service_plans`).
pub trait Collection {
    const COLLECTION: &'static str;
}
