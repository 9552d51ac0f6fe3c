//! wasm-site command line.
//!
//! ```text
//! wasm-site stage     copy the ffmpeg WebAssembly build into static/wasm
//! wasm-site serve     serve static/ with cross-origin isolation headers
//! wasm-site headers   print the response header set
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use wasm_site::config::{load_config, SiteConfig};
use wasm_site::lifecycle::Shutdown;
use wasm_site::observability::init_logging;
use wasm_site::{stage_assets, HttpServer, SecurityHeaders, StageConfig};

#[derive(Parser)]
#[command(name = "wasm-site")]
#[command(about = "Asset staging and isolation headers for the WebAssembly media site", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the WebAssembly build artifacts into the static directory
    Stage {
        /// Override the source distribution directory
        #[arg(long)]
        source: Option<PathBuf>,
        /// Override the destination directory
        #[arg(long)]
        dest: Option<PathBuf>,
    },
    /// Serve the static directory with the security headers applied
    Serve {
        /// Override the bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print the header set applied to every response
    Headers {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };

    init_logging(&config.observability.log_level);

    match cli.command {
        Commands::Stage { source, dest } => {
            let mut stage = StageConfig::from(&config.staging);
            if let Some(source) = source {
                stage.source_dir = source;
            }
            if let Some(dest) = dest {
                stage.dest_dir = dest;
            }

            let report = stage_assets(&stage)?;
            tracing::info!(
                files = report.assets.len(),
                bytes = report.total_bytes(),
                dest = %stage.dest_dir.display(),
                "Staging complete"
            );
        }
        Commands::Serve { bind } => {
            let bind_address = bind.unwrap_or_else(|| config.listener.bind_address.clone());
            let listener = TcpListener::bind(&bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");

            let shutdown = Shutdown::new();
            shutdown.trigger_on_signal();

            HttpServer::new(config).run(listener, shutdown.listen()).await?;
            tracing::info!("Shutdown complete");
        }
        Commands::Headers { json } => {
            let headers = SecurityHeaders::from_config(&config.security);
            if json {
                let map: serde_json::Map<String, serde_json::Value> = headers
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.to_string(),
                            serde_json::Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
                        )
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (name, value) in headers.iter() {
                    println!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
                }
            }
        }
    }

    Ok(())
}
