//! Cloud Foundry API CLI binary.
//!
//! A command-line interface for inspecting a Cloud Foundry target and
//! wiring data services.

use std::path::Path;
use std::process::ExitCode;

use cfapi::cli::{Cli, Command, Entity};
use cfapi::output::PrettyPrint;
use cfapi::{
    legacy_data_tags, App, BindParams, CfClient, CfError, List, LoginCredentials, LoginOptions,
    Organization, ProvisionParams, QueryOptions, Resource, ResourceParent, Service,
    ServiceFilter, ServicePlan, Session, Space, SupportedServices,
};
use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_unauthorized() {
                eprintln!("Hint: Log in to get a new token");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> cfapi::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Target => {
            let session = Session::discover();
            output_single(&session, json)
        }
        Command::Login {
            api,
            username,
            password,
            sso,
            passcode,
        } => handle_login(api, username, password, sso, passcode).await,
        Command::List {
            entity,
            parent,
            q,
            page,
            results_per_page,
        } => {
            let client = connect()?;
            let mut options = QueryOptions::new();
            options.filters.q = q;
            options.filters.page = page;
            options.filters.results_per_page = results_per_page;
            handle_list(&client, entity, parent.as_deref(), &options, json).await
        }
        Command::DataServices {
            registry,
            legacy_tags,
        } => {
            let client = connect()?;
            let space = ResourceParent::space(client.space_guid()?);
            let tags = legacy_data_tags();
            let registry = load_registry(registry.as_deref())?;
            // Without a registry there are no labels to match
            let filter = if legacy_tags || registry.is_empty() {
                ServiceFilter::Tags(&tags)
            } else {
                ServiceFilter::Labels(&registry)
            };
            let joined =
                cfapi::get_data_service_instances(&client, space, filter, &QueryOptions::default())
                    .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&joined)?);
            } else {
                let rows: Vec<InstanceRow> = joined.iter().map(|j| InstanceRow::from(j)).collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }
        Command::Marketplace { space, registry } => {
            let client = connect()?;
            let space = match space {
                Some(s) => s,
                None => client.space_guid()?.to_string(),
            };
            let services = match registry {
                Some(path) => {
                    let registry = SupportedServices::from_datasources_file(&path)?;
                    cfapi::get_supported_services(&client, &space, &registry).await?
                }
                None => cfapi::get_marketplace(&client, &space, &QueryOptions::default()).await?,
            };
            output_list(&services, json, |s| ServiceRow::from(s))
        }
        Command::Bind { app, instance } => {
            let client = connect()?;
            let parent = ResourceParent::space(client.space_guid()?);
            let found = cfapi::find_app_by_name(&client, parent, &app)
                .await?
                .ok_or(CfError::NotFound {
                    entity_type: "App",
                    id: app,
                })?;
            let params = BindParams {
                app_guid: found.metadata.guid,
                service_instance_guid: instance,
            };
            match cfapi::bind_service(&client, ResourceParent::Root, &params).await {
                Ok(binding) => output_single(&binding, json),
                Err(e) if e.is_already_bound() => {
                    println!("Service already bound to app");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Command::Provision { name, plan, space } => {
            let client = connect()?;
            let space_guid = match space {
                Some(s) => s,
                None => client.space_guid()?.to_string(),
            };
            let params = ProvisionParams {
                name,
                service_plan_guid: plan,
                space_guid,
            };
            let instance = cfapi::provision_service(&client, &params).await?;
            output_single(&instance, json)
        }
    }
}

/// Client from the saved session and environment.
fn connect() -> cfapi::Result<CfClient> {
    CfClient::from_env().inspect_err(|_| {
        eprintln!("Hint: Run 'cfapi login' or set CF_ACCESS_TOKEN");
    })
}

async fn handle_login(
    api: Option<String>,
    username: Option<String>,
    password: Option<String>,
    sso: bool,
    passcode: Option<String>,
) -> cfapi::Result<()> {
    let credentials = if sso {
        let passcode = passcode.ok_or_else(|| {
            CfError::ConfigMissing("--passcode is required with --sso".to_string())
        })?;
        LoginCredentials::passcode(passcode)
    } else {
        match (username, password) {
            (Some(u), Some(p)) => LoginCredentials::password(u, p),
            _ => {
                return Err(CfError::ConfigMissing(
                    "--username and --password are required".to_string(),
                ))
            }
        }
    };
    let options = LoginOptions {
        api_base_url: api,
        info_url: None,
    };
    let token = cfapi::login(&options, &credentials).await?;
    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}

async fn handle_list(
    client: &CfClient,
    entity: Entity,
    parent: Option<&str>,
    options: &QueryOptions,
    json: bool,
) -> cfapi::Result<()> {
    let parent = ResourceParent::from(parent);
    match entity {
        Entity::Organization => {
            let orgs = Organization::list(client, parent, options).await?;
            output_list(&orgs, json, |o| NamedRow::from(o))
        }
        Entity::Space => {
            let spaces = Space::list(client, parent, options).await?;
            output_list(&spaces, json, |s| NamedRow::from(s))
        }
        Entity::App => {
            let apps = App::list(client, parent, options).await?;
            output_list(&apps, json, |a| AppRow::from(a))
        }
        Entity::Service => {
            let services = Service::list(client, parent, options).await?;
            output_list(&services, json, |s| ServiceRow::from(s))
        }
        Entity::ServicePlan => {
            let plans = ServicePlan::list(client, parent, options).await?;
            output_list(&plans, json, |p| NamedRow::from(p))
        }
        Entity::ServiceInstance => {
            let joined = cfapi::get_service_instances(client, parent, options).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&joined)?);
            } else {
                for j in &joined {
                    println!("{}\n", j.pretty_print());
                }
            }
            Ok(())
        }
    }
}

fn load_registry(path: Option<&Path>) -> cfapi::Result<SupportedServices> {
    match path {
        Some(path) => SupportedServices::from_datasources_file(path),
        None => Ok(SupportedServices::default()),
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> cfapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> cfapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct NamedRow {
    guid: String,
    name: String,
}

impl From<&Resource<Organization>> for NamedRow {
    fn from(r: &Resource<Organization>) -> Self {
        Self {
            guid: r.guid().to_string(),
            name: r.entity.name.clone(),
        }
    }
}

impl From<&Resource<Space>> for NamedRow {
    fn from(r: &Resource<Space>) -> Self {
        Self {
            guid: r.guid().to_string(),
            name: r.entity.name.clone(),
        }
    }
}

impl From<&Resource<ServicePlan>> for NamedRow {
    fn from(r: &Resource<ServicePlan>) -> Self {
        Self {
            guid: r.guid().to_string(),
            name: r.entity.display_name(),
        }
    }
}

#[derive(Tabled)]
struct AppRow {
    guid: String,
    name: String,
    state: String,
}

impl From<&Resource<App>> for AppRow {
    fn from(r: &Resource<App>) -> Self {
        Self {
            guid: r.guid().to_string(),
            name: r.entity.name.clone(),
            state: r.entity.state.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ServiceRow {
    guid: String,
    label: String,
    description: String,
}

impl From<&Resource<Service>> for ServiceRow {
    fn from(r: &Resource<Service>) -> Self {
        Self {
            guid: r.guid().to_string(),
            label: r.entity.label.clone(),
            description: r.entity.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct InstanceRow {
    name: String,
    service: String,
    plan: String,
    guid: String,
}

impl From<&cfapi::ServiceInstanceJoin> for InstanceRow {
    fn from(j: &cfapi::ServiceInstanceJoin) -> Self {
        Self {
            name: j.name().to_string(),
            service: j.label().to_string(),
            plan: j.plan.entity.display_name(),
            guid: j.instance.guid().to_string(),
        }
    }
}
