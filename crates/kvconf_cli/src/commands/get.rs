//! Get command implementation.

use kvconf_client::ConfigClient;

/// Runs the get command.
pub async fn run(
    client: &ConfigClient,
    key: &str,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if raw {
        println!("{}", client.get_raw(key).await?);
    } else {
        let object = client.get(key).await?;
        println!("{}", serde_json::to_string_pretty(&object)?);
    }
    Ok(())
}
