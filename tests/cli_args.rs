//! CLI argument parsing tests.

use clap::Parser;
use cfapi::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_target_subcommand() {
    let cli = Cli::parse_from(["cfapi", "target"]);

    assert!(!cli.json);
    assert!(matches!(cli.command, Command::Target));
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["cfapi", "list", "apps"]);

    match cli.command {
        Command::List {
            entity,
            parent,
            q,
            page,
            results_per_page,
        } => {
            assert_eq!(entity, Entity::App);
            assert!(parent.is_none());
            assert!(q.is_empty());
            assert!(page.is_none());
            assert!(results_per_page.is_none());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_list_with_filters_and_parent() {
    let cli = Cli::parse_from([
        "cfapi",
        "list",
        "instances",
        "--parent",
        "/v2/spaces/s1",
        "--q",
        "name:db",
        "--q",
        "space_guid:s1",
        "--page",
        "2",
        "--results-per-page",
        "10",
    ]);

    match cli.command {
        Command::List {
            entity,
            parent,
            q,
            page,
            results_per_page,
        } => {
            assert_eq!(entity, Entity::ServiceInstance);
            assert_eq!(parent.as_deref(), Some("/v2/spaces/s1"));
            assert_eq!(q, vec!["name:db", "space_guid:s1"]);
            assert_eq!(page, Some(2));
            assert_eq!(results_per_page, Some(10));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_entity_aliases() {
    for (arg, expected) in [
        ("org", Entity::Organization),
        ("orgs", Entity::Organization),
        ("organization", Entity::Organization),
        ("spaces", Entity::Space),
        ("services", Entity::Service),
        ("plans", Entity::ServicePlan),
        ("service-plan", Entity::ServicePlan),
        ("service-instances", Entity::ServiceInstance),
    ] {
        let cli = Cli::parse_from(["cfapi", "list", arg]);
        match cli.command {
            Command::List { entity, .. } => assert_eq!(entity, expected, "alias {arg}"),
            _ => panic!("Expected List command"),
        }
    }
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["cfapi", "list", "routes"]);
    assert!(result.is_err());
}

#[test]
fn test_json_flag_is_global() {
    let cli = Cli::parse_from(["cfapi", "marketplace", "--json"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["cfapi", "--json", "target"]);
    assert!(cli.json);
}

#[test]
fn test_login_with_password() {
    let cli = Cli::parse_from([
        "cfapi",
        "login",
        "--api",
        "https://api.example.com",
        "-u",
        "me",
        "-p",
        "secret",
    ]);

    match cli.command {
        Command::Login {
            api,
            username,
            password,
            sso,
            passcode,
        } => {
            assert_eq!(api.as_deref(), Some("https://api.example.com"));
            assert_eq!(username.as_deref(), Some("me"));
            assert_eq!(password.as_deref(), Some("secret"));
            assert!(!sso);
            assert!(passcode.is_none());
        }
        _ => panic!("Expected Login command"),
    }
}

#[test]
fn test_passcode_requires_sso() {
    let result = Cli::try_parse_from(["cfapi", "login", "--passcode", "abc"]);
    assert!(result.is_err());

    let cli = Cli::parse_from(["cfapi", "login", "--sso", "--passcode", "abc"]);
    match cli.command {
        Command::Login { sso, passcode, .. } => {
            assert!(sso);
            assert_eq!(passcode.as_deref(), Some("abc"));
        }
        _ => panic!("Expected Login command"),
    }
}

#[test]
fn test_data_services_registry_conflicts_with_legacy_tags() {
    let result = Cli::try_parse_from([
        "cfapi",
        "data-services",
        "--registry",
        "datasources-config.json",
        "--legacy-tags",
    ]);
    assert!(result.is_err());

    let cli = Cli::parse_from(["cfapi", "data-services", "--legacy-tags"]);
    match cli.command {
        Command::DataServices {
            registry,
            legacy_tags,
        } => {
            assert!(registry.is_none());
            assert!(legacy_tags);
        }
        _ => panic!("Expected DataServices command"),
    }
}

#[test]
fn test_bind_requires_app_and_instance() {
    assert!(Cli::try_parse_from(["cfapi", "bind", "--app", "web"]).is_err());

    let cli = Cli::parse_from(["cfapi", "bind", "--app", "web", "--instance", "i1"]);
    match cli.command {
        Command::Bind { app, instance } => {
            assert_eq!(app, "web");
            assert_eq!(instance, "i1");
        }
        _ => panic!("Expected Bind command"),
    }
}

#[test]
fn test_provision_defaults_to_target_space() {
    let cli = Cli::parse_from(["cfapi", "provision", "--name", "db", "--plan", "p1"]);
    match cli.command {
        Command::Provision { name, plan, space } => {
            assert_eq!(name, "db");
            assert_eq!(plan, "p1");
            assert!(space.is_none());
        }
        _ => panic!("Expected Provision command"),
    }
}
