//! Basic example demonstrating the Cloud Foundry API client.
//!
//! Uses the saved `cf login` session, or run with:
//! ```
//! CF_ACCESS_TOKEN=your-token CF_API_URL=https://api.ng.bluemix.net cargo run --example basic
//! ```

use cfapi::{
    get_data_service_instances, get_organizations, get_target_supported_services, CfClient,
    QueryOptions, ResourceParent, ServiceFilter, SupportedServices,
};

#[tokio::main]
async fn main() -> cfapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from the saved session and environment variables
    println!("Creating Cloud Foundry client...");
    let client = CfClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List organizations and their spaces
    println!("\n--- Organizations ---");
    let orgs = get_organizations(&client, &QueryOptions::default()).await?;
    println!("Found {} organizations", orgs.len());

    for org in &orgs {
        println!("  - {} ({})", org.entity.name, org.guid());
        for space in org.spaces(&client).await? {
            println!("      space {} ({})", space.entity.name, space.guid());
        }
    }

    // The rest needs a targeted space
    let Ok(space_guid) = client.space_guid() else {
        println!("\nNo space targeted; run `cf target -s <space>` to see services.");
        return Ok(());
    };

    let registry = SupportedServices::new()
        .with("cloudant", "cloudantNoSQLDB")
        .with("mongodb", "compose-for-mongodb")
        .with("redis", "compose-for-redis")
        .with("rabbitmq", "compose-for-rabbitmq");

    // Marketplace services this registry can wire up
    println!("\n--- Supported Marketplace Services ---");
    let services = get_target_supported_services(&client, &registry).await?;
    for service in &services {
        let connector = registry
            .connector_for_label(&service.entity.label)
            .unwrap_or("?");
        println!("  - {} [{}]", service.entity.label, connector);

        for plan in service.plans(&client).await? {
            println!("      plan {}", plan.entity.display_name());
        }
    }

    // Provisioned data service instances
    println!("\n--- Data Service Instances ---");
    let instances = get_data_service_instances(
        &client,
        ResourceParent::space(space_guid),
        ServiceFilter::Labels(&registry),
        &QueryOptions::default(),
    )
    .await?;
    println!("Found {} data service instances", instances.len());

    for joined in &instances {
        println!(
            "  - {} ({}:{})",
            joined.name(),
            joined.label(),
            joined.plan.entity.display_name()
        );
    }

    println!("\nDone!");
    Ok(())
}
