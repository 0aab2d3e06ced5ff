//! Platform API
//!
//! Serves the project inventory and cost accounting API. Can also print the
//! OpenAPI document or the build version without starting the server.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::Result;
use tracing::info;

mod app;
mod config;
mod openapi;
mod server;

use config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "platform-api")]
#[command(about = "Inventory and cost accounting for platform projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to listen on (overrides HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Log at debug level (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print the OpenAPI document as JSON
    Openapi,

    /// Print the version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let cli = Cli::parse();
    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(overrides).await,
        Commands::Openapi => {
            println!("{}", openapi::render()?);
            Ok(())
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn serve(overrides: Overrides) -> Result<()> {
    // Environment first, command-line flags on top
    let config = Config::from_env()?.with_overrides(overrides)?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment, &config.logging);

    observability::init_metrics();

    let instance = app::build_instance(&config)?;
    let router = app::router(instance, config.instance_name.clone(), &config.server);

    info!(
        instance = %config.instance_name,
        environment = ?config.environment,
        "Starting platform API"
    );

    server::serve(router, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Platform API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_server_flags() {
        let cli = Cli::parse_from([
            "platform-api",
            "serve",
            "--host",
            "127.0.0.1",
            "-p",
            "3000",
            "--debug",
        ]);

        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(3000));
        assert!(cli.debug);
    }

    #[test]
    fn test_flags_without_subcommand() {
        let cli = Cli::parse_from(["platform-api", "--port", "9000"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.port, Some(9000));
        assert!(!cli.debug);
    }
}
