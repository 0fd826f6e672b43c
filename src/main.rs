use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use cdroot::config::loader::load_or_default;
use cdroot::lifecycle::{signals, startup, Shutdown};
use cdroot::observability::{logging, metrics};
use cdroot::store::catalog::Catalog;
use cdroot::store::RecordStore;

#[derive(Parser)]
#[command(name = "cdroot")]
#[command(about = "Blog backend serving pages, categories and entries", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site (default)
    Serve,
    /// Import categories and articles from a catalog file
    Seed {
        /// Catalog TOML file
        catalog: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init(&config.observability.log_level).map_err(|e| e as Box<dyn std::error::Error>)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cdroot starting");

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Seed { catalog } => {
            let store =
                RecordStore::open(&config.store.path, config.store.statement_cache_capacity)?;
            let summary = Catalog::load(&catalog)?.import(&store)?;
            tracing::info!(
                catalog = %catalog.display(),
                categories = summary.categories,
                new_articles = summary.new_articles,
                tags = summary.tags,
                "catalog imported"
            );
        }
        Commands::Serve => {
            tracing::info!(
                bind_address = %config.listener.bind_address,
                mode = ?config.site.mode,
                request_timeout_secs = config.timeouts.request_secs,
                "Configuration loaded"
            );

            if config.observability.metrics_enabled {
                match config.observability.metrics_address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(_) => tracing::error!(
                        metrics_address = %config.observability.metrics_address,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let shutdown = Arc::new(Shutdown::new());
            signals::forward_signals(shutdown.clone());

            let (server, listener) = startup::start(config).await?;
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
