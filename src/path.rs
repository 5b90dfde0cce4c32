//! Nested resource addressing.
//!
//! Child collections are reached either under a raw path, through the
//! `<child>_url` link of a previously fetched entry, or from the API root.

use std::borrow::Cow;

use crate::error::{CfError, Result};
use crate::models::{Linked, Links, Resource};

/// API version prefix for root collections.
pub const API_ROOT: &str = "/v2";

/// Where a child collection hangs from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceParent<'a> {
    /// Top-level collection: `/v2/<child>`.
    #[default]
    Root,
    /// Raw parent path: `<path>/<child>`.
    Path(Cow<'a, str>),
    /// A fetched entry: its `<child>_url` link.
    Entry(&'a Links),
}

impl<'a> ResourceParent<'a> {
    /// Parent for a space by guid (`/v2/spaces/<guid>`).
    pub fn space(guid: &str) -> ResourceParent<'static> {
        ResourceParent::Path(Cow::Owned(format!(
            "{API_ROOT}/spaces/{}",
            urlencoding::encode(guid)
        )))
    }

    /// Parent for an organization by guid (`/v2/organizations/<guid>`).
    pub fn organization(guid: &str) -> ResourceParent<'static> {
        ResourceParent::Path(Cow::Owned(format!(
            "{API_ROOT}/organizations/{}",
            urlencoding::encode(guid)
        )))
    }

    /// Resolve the path of the `child` collection.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::MissingLink`] when an entry parent has no
    /// `<child>_url` link.
    pub fn child_path(&self, child: &str) -> Result<String> {
        match self {
            ResourceParent::Root => Ok(format!("{API_ROOT}/{child}")),
            ResourceParent::Path(parent) => Ok(format!("{parent}/{child}")),
            ResourceParent::Entry(links) => links
                .child_url(child)
                .map(str::to_string)
                .ok_or_else(|| CfError::MissingLink {
                    child: child.to_string(),
                }),
        }
    }
}

impl<'a> From<&'a str> for ResourceParent<'a> {
    fn from(path: &'a str) -> Self {
        ResourceParent::Path(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a String> for ResourceParent<'a> {
    fn from(path: &'a String) -> Self {
        ResourceParent::Path(Cow::Borrowed(path.as_str()))
    }
}

impl From<String> for ResourceParent<'static> {
    fn from(path: String) -> Self {
        ResourceParent::Path(Cow::Owned(path))
    }
}

impl<'a, E: Linked> From<&'a Resource<E>> for ResourceParent<'a> {
    fn from(entry: &'a Resource<E>) -> Self {
        ResourceParent::Entry(entry.entity.links())
    }
}

impl<'a, T: Into<ResourceParent<'a>>> From<Option<T>> for ResourceParent<'a> {
    fn from(parent: Option<T>) -> Self {
        parent.map(Into::into).unwrap_or_default()
    }
}
