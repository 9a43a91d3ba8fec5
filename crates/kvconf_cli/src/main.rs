//! kvconf CLI
//!
//! Runs the configuration server and manages configuration remotely.
//!
//! # Commands
//!
//! - `serve` - Run the HTTP configuration service
//! - `list` - List configuration objects
//! - `get` - Read one object
//! - `set` - Create or overwrite an object
//! - `delete` - Remove an object

mod commands;

use clap::{Parser, Subcommand};
use commands::list::OutputFormat;
use commands::serve::ServeArgs;
use kvconf_client::ConfigClient;
use tracing_subscriber::EnvFilter;

/// kvconf configuration service and admin tool.
#[derive(Parser)]
#[command(name = "kvconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the server to manage
    #[arg(
        global = true,
        short,
        long,
        env = "KVCONF_URL",
        default_value = "http://localhost:8000"
    )]
    server: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP configuration service
    Serve(ServeArgs),

    /// List configuration objects
    List {
        /// Glob pattern keys must match
        #[arg(short, long = "match", default_value = "*")]
        pattern: String,

        /// Page size (1-100)
        #[arg(short, long, default_value = "20")]
        limit: u32,

        /// Cursor returned by the previous page
        #[arg(short, long)]
        offset: Option<String>,

        /// Follow cursors and print every match
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Read one configuration object
    Get {
        /// Key to read
        key: String,

        /// Print only the value
        #[arg(short, long)]
        raw: bool,
    },

    /// Create or overwrite a configuration object
    Set {
        /// Key to write
        key: String,

        /// Value to store
        value: String,
    },

    /// Remove a configuration object
    Delete {
        /// Key to remove
        key: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve(args) => {
            commands::serve::run(args).await?;
        }
        Commands::List {
            pattern,
            limit,
            offset,
            all,
            format,
        } => {
            let client = ConfigClient::new(&cli.server)?;
            commands::list::run(&client, &pattern, limit, offset, all, format).await?;
        }
        Commands::Get { key, raw } => {
            let client = ConfigClient::new(&cli.server)?;
            commands::get::run(&client, &key, raw).await?;
        }
        Commands::Set { key, value } => {
            let client = ConfigClient::new(&cli.server)?;
            commands::set::run(&client, &key, &value).await?;
        }
        Commands::Delete { key, yes } => {
            let client = ConfigClient::new(&cli.server)?;
            commands::delete::run(&client, &key, yes).await?;
        }
        Commands::Version => {
            println!("kvconf CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("kvconf Core v{}", kvconf_core::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_defaults() {
        let cli = Cli::try_parse_from(["kvconf", "list"]).unwrap();
        match cli.command {
            Commands::List {
                pattern,
                limit,
                offset,
                all,
                format,
            } => {
                assert_eq!(pattern, "*");
                assert_eq!(limit, 20);
                assert!(offset.is_none());
                assert!(!all);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn global_server_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["kvconf", "get", "app.name", "--server", "http://cfg:9000"])
                .unwrap();
        assert_eq!(cli.server, "http://cfg:9000");
        assert!(matches!(cli.command, Commands::Get { raw: false, .. }));
    }

    #[test]
    fn delete_requires_key() {
        assert!(Cli::try_parse_from(["kvconf", "delete"]).is_err());
        let cli = Cli::try_parse_from(["kvconf", "delete", "k", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { yes: true, .. }));
    }
}
