//! List command implementation.

use clap::ValueEnum;
use kvconf_client::{ConfigClient, ConfigObject, ConfigObjectList, PageQuery};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key = value` lines
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Runs the list command.
pub async fn run(
    client: &ConfigClient,
    pattern: &str,
    limit: u32,
    offset: Option<String>,
    all: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if all {
        let objects = client.list_all(pattern, limit).await?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&objects)?),
            OutputFormat::Text => print!("{}", render_objects(&objects)),
        }
        return Ok(());
    }

    let mut query = PageQuery::new().with_match(pattern).with_limit(limit);
    if let Some(offset) = offset {
        query = query.with_offset(offset);
    }

    let page = client.list(&query).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Text => print!("{}", render_page(&page)),
    }
    Ok(())
}

fn render_objects(objects: &[ConfigObject]) -> String {
    objects
        .iter()
        .map(|object| format!("{} = {}\n", object.key, object.value))
        .collect()
}

fn render_page(page: &ConfigObjectList) -> String {
    let mut out = render_objects(&page.items);
    if page.is_last_page() {
        out.push_str(&format!("-- {} shown, end of listing\n", page.items.len()));
    } else {
        out.push_str(&format!(
            "-- {} shown, next page: --offset {}\n",
            page.items.len(),
            page.offset
        ));
    }
    out
}
