//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cfapi binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Cloud Foundry API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cfapi", about = "Cloud Foundry API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the discovered login session.
    Target,

    /// Log in and print the token response.
    Login {
        /// API endpoint.
        #[arg(long, env = "CF_API_URL")]
        api: Option<String>,

        /// Username (ignored with --sso).
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Password (ignored with --sso).
        #[arg(long, short = 'p', env = "CF_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Log in with a one-time passcode instead of a password.
        #[arg(long)]
        sso: bool,

        /// One-time passcode (requires --sso).
        #[arg(long, requires = "sso")]
        passcode: Option<String>,
    },

    /// List entities under a parent.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Parent path (e.g., /v2/spaces/<guid>); defaults to the API root.
        #[arg(long)]
        parent: Option<String>,

        /// Filter such as `name:my-app` (repeatable).
        #[arg(long = "q")]
        q: Vec<String>,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        results_per_page: Option<u32>,
    },

    /// List data service instances in the targeted space.
    DataServices {
        /// datasources-config.json holding `supportedServices`.
        #[arg(long, conflicts_with = "legacy_tags")]
        registry: Option<PathBuf>,

        /// Match on the `data_management` tag instead of registry labels
        /// (the default without --registry).
        #[arg(long)]
        legacy_tags: bool,
    },

    /// List marketplace services for a space.
    Marketplace {
        /// Space guid; defaults to the targeted space.
        #[arg(long)]
        space: Option<String>,

        /// Only services whose label is in this datasources-config.json.
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Bind a service instance to an app.
    Bind {
        /// App name.
        #[arg(long)]
        app: String,

        /// Service instance guid.
        #[arg(long)]
        instance: String,
    },

    /// Provision a service instance.
    Provision {
        /// Instance name.
        #[arg(long)]
        name: String,

        /// Service plan guid.
        #[arg(long)]
        plan: String,

        /// Space guid; defaults to the targeted space.
        #[arg(long)]
        space: Option<String>,
    },
}

/// Entity types that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An organization.
    #[value(alias = "organizations", alias = "orgs", alias = "org")]
    Organization,
    /// A space.
    #[value(alias = "spaces")]
    Space,
    /// An app.
    #[value(alias = "apps")]
    App,
    /// A marketplace service.
    #[value(alias = "services")]
    Service,
    /// A service plan.
    #[value(alias = "service-plans", alias = "plans")]
    ServicePlan,
    /// A service instance, joined with its plan and service.
    #[value(alias = "service-instances", alias = "instances")]
    ServiceInstance,
}
