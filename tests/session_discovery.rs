//! Saved session discovery tests against temporary home directories.

use std::fs;
use std::path::Path;

use cfapi::{Session, SessionLocations, LOGIN_HINT};
use serde_json::json;
use tempfile::TempDir;

fn write_json(path: &Path, value: serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn cf_config(token: &str, target: &str) -> serde_json::Value {
    json!({
        "ConfigVersion": 3,
        "Target": target,
        "AccessToken": token,
        "RefreshToken": "refresh",
        "OrganizationFields": {"GUID": "org-1", "Name": "acme"},
        "SpaceFields": {"GUID": "space-1", "Name": "dev", "AllowSSH": true}
    })
}

struct Homes {
    bluemix: TempDir,
    cf: TempDir,
}

impl Homes {
    fn new() -> Self {
        Self {
            bluemix: TempDir::new().unwrap(),
            cf: TempDir::new().unwrap(),
        }
    }

    fn locations(&self) -> SessionLocations {
        SessionLocations::new(self.bluemix.path(), self.cf.path())
    }
}

fn discover(locations: &SessionLocations) -> (Session, Vec<String>) {
    let mut warnings = Vec::new();
    let session = Session::discover_with(locations, |msg| warnings.push(msg.to_string()));
    (session, warnings)
}

#[test]
fn test_primary_location_wins() {
    let homes = Homes::new();
    let locations = homes.locations();
    write_json(
        &locations.primary,
        cf_config("bearer primary-token", "https://api.eu-gb.bluemix.net"),
    );
    write_json(&locations.legacy, cf_config("bearer legacy-token", "https://legacy"));
    write_json(&locations.secondary, json!({"IAMToken": "Bearer iam"}));

    let (session, warnings) = discover(&locations);

    assert!(warnings.is_empty());
    assert_eq!(
        session,
        Session {
            organization_name: Some("acme".to_string()),
            organization_guid: Some("org-1".to_string()),
            space_name: Some("dev".to_string()),
            space_guid: Some("space-1".to_string()),
            api_url: Some("https://api.eu-gb.bluemix.net".to_string()),
            access_token: Some("primary-token".to_string()),
        }
    );
}

#[test]
fn test_discovery_is_repeatable() {
    let homes = Homes::new();
    let locations = homes.locations();
    write_json(&locations.primary, cf_config("bearer tok", "https://api.example.com"));

    let (first, _) = discover(&locations);
    let (second, _) = discover(&locations);
    assert_eq!(first, second);
}

#[test]
fn test_legacy_location_when_primary_missing() {
    let homes = Homes::new();
    let locations = homes.locations();
    write_json(&locations.legacy, cf_config("bearer legacy-token", "https://legacy"));

    let (session, warnings) = discover(&locations);

    assert!(warnings.is_empty());
    assert_eq!(session.access_token.as_deref(), Some("legacy-token"));
    assert_eq!(session.api_url.as_deref(), Some("https://legacy"));
    assert_eq!(session.space_guid.as_deref(), Some("space-1"));
}

#[test]
fn test_corrupt_primary_falls_through() {
    let homes = Homes::new();
    let locations = homes.locations();
    fs::create_dir_all(locations.primary.parent().unwrap()).unwrap();
    fs::write(&locations.primary, "{not json").unwrap();
    write_json(&locations.legacy, cf_config("bearer legacy-token", "https://legacy"));

    let (session, _) = discover(&locations);
    assert_eq!(session.access_token.as_deref(), Some("legacy-token"));
}

#[test]
fn test_secondary_iam_config() {
    let homes = Homes::new();
    let locations = homes.locations();
    write_json(
        &locations.secondary,
        json!({
            "IAMToken": "Bearer iam-token",
            "APIEndpoint": "https://api.ng.bluemix.net",
            "Region": "us-south"
        }),
    );

    let (session, warnings) = discover(&locations);

    assert!(warnings.is_empty());
    assert!(session.is_authenticated());
    assert_eq!(session.access_token.as_deref(), Some("iam-token"));
    assert_eq!(session.api_url.as_deref(), Some("https://api.ng.bluemix.net"));
    assert!(session.space_guid.is_none());
    assert!(session.organization_name.is_none());
}

#[test]
fn test_no_session_reports_hint() {
    let homes = Homes::new();

    let (session, warnings) = discover(&homes.locations());

    assert_eq!(session, Session::default());
    assert!(!session.is_authenticated());
    assert_eq!(warnings, vec![LOGIN_HINT.to_string()]);
}

#[test]
fn test_config_without_token_is_unusable() {
    let homes = Homes::new();
    let locations = homes.locations();
    write_json(&locations.primary, json!({"Target": "https://api.example.com"}));

    let (session, warnings) = discover(&locations);
    assert!(!session.is_authenticated());
    assert_eq!(warnings.len(), 1);
}
