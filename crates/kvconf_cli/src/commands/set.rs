//! Set command implementation.

use kvconf_client::ConfigClient;
use tracing::info;

/// Runs the set command.
pub async fn run(
    client: &ConfigClient,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let object = client.set(key, value).await?;
    info!(key = %object.key, server = %client.base_url(), "Stored");
    println!("{} = {}", object.key, object.value);
    Ok(())
}
