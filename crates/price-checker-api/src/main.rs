//! Price Checker API server — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use price_checker_api::config::{build_provider_set, resolve_listen_addr, ProviderMode};
use price_checker_api::http::{self, AppState};

#[derive(Parser)]
#[command(
    name = "price-checker-api",
    about = "HTTP backend for the Price Checker extension — compares product prices across retail platforms",
    version
)]
struct Cli {
    /// Listen address (host:port).
    #[arg(long)]
    addr: Option<String>,

    /// Provider selection.
    #[arg(long, value_enum, default_value_t = ProviderMode::Auto)]
    providers: ProviderMode,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default).
    Serve {
        /// Listen address (host:port).
        #[arg(long)]
        addr: Option<String>,

        /// Provider selection.
        #[arg(long, value_enum)]
        providers: Option<ProviderMode>,
    },

    /// Print platforms and routes as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   price-checker-api completions bash > ~/.local/share/bash-completion/completions/price-checker-api
    ///   price-checker-api completions zsh > ~/.zfunc/_price-checker-api
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve { addr: None, providers: None }) {
        Commands::Serve { addr, providers } => {
            let addr = resolve_listen_addr(addr.or(cli.addr).as_deref());
            let mode = providers.unwrap_or(cli.providers);
            let providers = build_provider_set(mode)?;
            let state = AppState { providers: Arc::new(providers) };
            http::serve(&addr, state).await?;
        }

        Commands::Info => {
            let info = serde_json::json!({
                "name": "price-checker-api",
                "version": env!("CARGO_PKG_VERSION"),
                "platforms": price_checker::Platform::ALL
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>(),
                "routes": ["POST /api/prices", "GET /api/health"],
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "price-checker-api",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
