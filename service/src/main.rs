//! `prospect-service` entry point.
//!
//! ## Modes
//!
//! - **`serve`** (default): bind the HTTP listener and serve until Ctrl+C.
//! - **`ping`**: call `/healthz` on a running service and exit non-zero if
//!   it does not answer.
//! - **`generate`**: run the pipeline once without the server and print the
//!   JSON summary.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use prospect_core::{GenerateRequest, ProspectConfig, ProspectPipeline};
use prospect_service::SERVICE_VERSION;
use prospect_service::commands;
use prospect_service::http::{self, AppState};
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "prospect-service", version, about = "Sales prospect sheets from a grounded Gemini search")]
struct Cli {
    /// Config file (defaults to $PROSPECT_CONFIG or ~/.config/prospect/prospect.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Check that a running service answers
    Ping {
        /// Base URL of the service (defaults to http://<server.bind>)
        #[arg(long)]
        url: Option<String>,
    },
    /// Research one geography and publish the sheet
    Generate {
        #[arg(long)]
        country: String,
        #[arg(long)]
        area: String,
        #[arg(long)]
        region: Option<String>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProspectConfig> {
    let config = match path {
        Some(path) => ProspectConfig::load_from(path),
        None => ProspectConfig::load(),
    };
    config.context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => run_service(config, bind).await,
        Command::Ping { url } => ping(&config, url).await,
        Command::Generate {
            country,
            area,
            region,
        } => generate(&config, GenerateRequest::new(&area, &country, region.as_deref())).await,
    }
}

async fn run_service(mut config: ProspectConfig, bind: Option<String>) -> anyhow::Result<()> {
    tracing::info!("prospect-service v{SERVICE_VERSION} starting");

    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let pipeline = ProspectPipeline::from_config(&config)?;
    let state = AppState::new(pipeline, config.server.request_timeout());

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    // Shutdown coordination via watch channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Signal received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    http::serve(listener, state, shutdown_rx).await?;

    tracing::info!("prospect-service exiting cleanly");
    Ok(())
}

async fn ping(config: &ProspectConfig, url: Option<String>) -> anyhow::Result<()> {
    let base = url.unwrap_or_else(|| format!("http://{}", config.server.bind));
    let health = commands::ping(&base).await?;
    eprintln!("ping: service is alive (v{})", health.version);
    Ok(())
}

async fn generate(config: &ProspectConfig, request: GenerateRequest) -> anyhow::Result<()> {
    let summary = commands::generate_once(config, &request).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
