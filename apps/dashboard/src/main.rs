use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpOrderGateway, OrderGateway};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::config::{load_settings, CliOverrides};
use crate::controller::events::UiEvent;
use crate::ui::{terminal, DashboardApp};

/// Terminal dashboard for browsing and managing orders.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Base URL of the orders API, e.g. https://localhost:7043
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file (defaults to ./dashboard.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Trust self-signed development certificates
    #[arg(long)]
    accept_invalid_certs: bool,
    /// tracing filter directive, e.g. "info" or "client_core=debug"
    #[arg(long)]
    log_filter: Option<String>,
    #[arg(long)]
    no_color: bool,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            api_url: args.api_url,
            accept_invalid_certs: args.accept_invalid_certs,
            log_filter: args.log_filter,
            no_color: args.no_color,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.into())?;

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let http = reqwest::Client::builder()
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .build()
        .context("failed to build HTTP client")?;
    let gateway: Arc<dyn OrderGateway> =
        Arc::new(HttpOrderGateway::with_client(http, &settings.api_base_url));
    tracing::info!(api_url = %settings.api_base_url, "starting order dashboard");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let worker = runtime::launch(gateway, cmd_rx, ui_tx);

    let (mut app, initial) = DashboardApp::new(settings.api_base_url.clone());
    let result = terminal::run(&mut app, initial, &cmd_tx, &ui_rx, settings.color);

    drop(cmd_tx);
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    result
}
