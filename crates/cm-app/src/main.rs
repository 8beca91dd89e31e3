//! contact-manager: Contact Manager Main Binary
//!
//! Usage:
//!   contact-manager           - Start server mode (in-memory contacts API)
//!   contact-manager --cli     - Start interactive CLI mode
//!   contact-manager --help    - Show help

mod cli;
mod error;

use cm_core::Config;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    /// Server mode (contacts HTTP API)
    Server,
    /// Interactive CLI mode
    Cli,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1));

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("contact-manager {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Keep the REPL readable unless RUST_LOG asks for more
    let default_level = match mode {
        RunMode::Cli => "warn",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    match mode {
        RunMode::Cli => {
            tracing::info!("Running in CLI mode against {}", config.client.base_url);
            cli::run_cli(&config).await
        }
        RunMode::Server => run_server(config).await,
        _ => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args(args: impl IntoIterator<Item = String>) -> RunMode {
    for arg in args {
        match arg.as_str() {
            "--cli" | "-c" => return RunMode::Cli,
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("contact-manager - Contact Manager");
    println!();
    println!("Usage:");
    println!("  contact-manager           Start server mode (in-memory contacts API)");
    println!("  contact-manager --cli     Start interactive CLI mode");
    println!("  contact-manager --help    Show this help message");
    println!("  contact-manager --version Show version");
    println!();
    println!("Configuration is read from contact-manager.toml when present.");
    println!();
    println!("Environment Variables:");
    println!("  API_PORT                HTTP API port (default: 3000)");
    println!("  API_ALLOWED_ORIGINS     Comma-separated CORS origins (default: any)");
    println!("  CONTACTS_SEED_PATH      JSON file with the initial contacts");
    println!("  CONTACTS_BASE_URL       Backend used by the CLI (default: http://localhost:3000)");
    println!("  CONTACTS_TIMEOUT_SECS   Request timeout for the CLI (default: 30)");
    println!("  VALIDATION_DEBOUNCE_MS  Quiet window before re-validating (default: 800)");
}

/// Run server mode until Ctrl+C
async fn run_server(config: Config) -> anyhow::Result<()> {
    let api_config = config.api.clone();
    let handle = tokio::spawn(async move {
        if let Err(e) = cm_api::start_server(&api_config).await {
            tracing::error!("HTTP API error: {}", e);
        }
    });
    tracing::info!("HTTP API server starting on port {}", config.api.port);
    tracing::info!("Press Ctrl+C to exit");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    handle.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}
