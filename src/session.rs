//! Saved login session discovery.
//!
//! A session is read once at startup from the first readable of three
//! locations:
//!
//! 1. `$BLUEMIX_HOME/.bluemix/.cf/config.json` (the platform tool's managed CLI config)
//! 2. `$CF_HOME/.cf/config.json` (legacy CLI config)
//! 3. `$BLUEMIX_HOME/.bluemix/config.json` (holds an `IAMToken`)
//!
//! `BLUEMIX_HOME` and `CF_HOME` default to the user's home directory.
//! Discovery never fails: with no usable file it reports a hint through a
//! callback and yields an empty [`Session`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Hint reported when no session file could be read.
pub const LOGIN_HINT: &str = "Please use `cf login` or `bx login` to log in first.";

/// Credentials and target derived from a saved session.
///
/// All fields are `None` when nothing was discovered; such a session is
/// "not authenticated", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub organization_name: Option<String>,
    pub organization_guid: Option<String>,
    pub space_name: Option<String>,
    pub space_guid: Option<String>,
    /// API base URL the session targets.
    pub api_url: Option<String>,
    /// Access token without its scheme word.
    pub access_token: Option<String>,
}

impl Session {
    /// Discover the session from the default locations, logging a warning
    /// if none is usable.
    pub fn discover() -> Self {
        Self::discover_with(&SessionLocations::from_env(), |msg| {
            tracing::warn!("{msg}");
        })
    }

    /// Discover the session from `locations`, calling `warn` with a login
    /// hint if every location fails.
    pub fn discover_with(locations: &SessionLocations, warn: impl FnOnce(&str)) -> Self {
        match read_cf_config(&locations.primary) {
            Ok(session) => return session,
            Err(e) => tracing::debug!(path = %locations.primary.display(), error = %e, "primary session unusable"),
        }
        match read_cf_config(&locations.legacy) {
            Ok(session) => return session,
            Err(e) => tracing::debug!(path = %locations.legacy.display(), error = %e, "legacy session unusable"),
        }
        match read_iam_config(&locations.secondary) {
            Ok(session) => return session,
            Err(e) => tracing::debug!(path = %locations.secondary.display(), error = %e, "secondary session unusable"),
        }
        warn(LOGIN_HINT);
        Self::default()
    }

    /// True when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// The three files consulted by [`Session::discover_with`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLocations {
    pub primary: PathBuf,
    pub legacy: PathBuf,
    pub secondary: PathBuf,
}

impl SessionLocations {
    /// Locations under explicit home directories.
    pub fn new(bluemix_home: &Path, cf_home: &Path) -> Self {
        let bluemix = bluemix_home.join(".bluemix");
        Self {
            primary: bluemix.join(".cf").join("config.json"),
            legacy: cf_home.join(".cf").join("config.json"),
            secondary: bluemix.join("config.json"),
        }
    }

    /// Locations honoring `BLUEMIX_HOME` and `CF_HOME`, falling back to the
    /// user's home directory.
    pub fn from_env() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        let bluemix_home = env::var_os("BLUEMIX_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.clone());
        let cf_home = env::var_os("CF_HOME").map(PathBuf::from).unwrap_or(home);
        Self::new(&bluemix_home, &cf_home)
    }
}

impl Default for SessionLocations {
    fn default() -> Self {
        Self::from_env()
    }
}

/// CLI config file layout (`AccessToken`, `OrganizationFields`, ...).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CfConfigFile {
    access_token: String,
    #[serde(default)]
    organization_fields: Option<TargetFields>,
    #[serde(default)]
    space_fields: Option<TargetFields>,
    #[serde(default)]
    target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetFields {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "GUID", default)]
    guid: Option<String>,
}

/// Alternate config layout carrying an `IAMToken`.
#[derive(Debug, Deserialize)]
struct IamConfigFile {
    #[serde(rename = "IAMToken")]
    iam_token: String,
    #[serde(rename = "APIEndpoint", default)]
    api_endpoint: Option<String>,
}

fn read_cf_config(path: &Path) -> Result<Session> {
    let contents = fs::read_to_string(path)?;
    let config: CfConfigFile = serde_json::from_str(&contents)?;
    let (organization_name, organization_guid) = split_fields(config.organization_fields);
    let (space_name, space_guid) = split_fields(config.space_fields);
    Ok(Session {
        organization_name,
        organization_guid,
        space_name,
        space_guid,
        api_url: config.target.filter(|t| !t.is_empty()),
        access_token: Some(strip_scheme(&config.access_token).to_string()),
    })
}

fn read_iam_config(path: &Path) -> Result<Session> {
    let contents = fs::read_to_string(path)?;
    let config: IamConfigFile = serde_json::from_str(&contents)?;
    Ok(Session {
        api_url: config.api_endpoint.filter(|t| !t.is_empty()),
        access_token: Some(strip_scheme(&config.iam_token).to_string()),
        ..Default::default()
    })
}

fn split_fields(fields: Option<TargetFields>) -> (Option<String>, Option<String>) {
    fields
        .map(|f| (f.name.filter(|s| !s.is_empty()), f.guid.filter(|s| !s.is_empty())))
        .unwrap_or((None, None))
}

/// Drop a leading scheme word such as `bearer ` from a stored token.
fn strip_scheme(token: &str) -> &str {
    match token.split_once(' ') {
        Some((scheme, rest)) if scheme.chars().all(|c| c.is_ascii_alphabetic()) => rest.trim(),
        _ => token.trim(),
    }
}
