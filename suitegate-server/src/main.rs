//! SuiteGate gateway
//!
//! Serves the entity CRUD API and the purchase-order approval action over
//! HTTP, backed by the ERP's REST record service or an in-memory store.
//!
//! Usage:
//!   suitegate --config suitegate.toml --port 8080
//!   suitegate --store memory --verbose

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use suitegate_facade::LogNotifier;
use suitegate_server::{AppState, GatewayConfig, StoreKind, build_router};
use suitegate_store::{MemoryStore, RecordStore, RestRecordStore};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "suitegate")]
#[command(about = "Entity CRUD gateway for the ERP record service")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "suitegate.toml")]
    config: PathBuf,

    /// HTTP port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Record store backend (overrides the config file)
    #[arg(long, value_enum)]
    store: Option<StoreKind>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("SuiteGate starting...");
    let mut config = GatewayConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(store) = args.store {
        config.store = store;
    }

    let store: Arc<dyn RecordStore> = match config.store {
        StoreKind::Memory => {
            warn!("Using in-memory record store; data will not persist");
            Arc::new(MemoryStore::new())
        }
        StoreKind::Rest => Arc::new(
            RestRecordStore::new(config.rest.clone()).context("Failed to create REST record store")?,
        ),
    };
    info!("Record store: {}", store.provider_name());

    let state = Arc::new(AppState::new(store, Arc::new(LogNotifier), config.facade.clone()));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", config.port))?;

    println!("\n========================================");
    println!("  SuiteGate Running");
    println!("========================================");
    println!("  HTTP Port:  {}", config.port);
    println!("  Store:      {:?}", config.store);
    println!("  Page size:  {}", config.facade.page_size);
    println!("  Approval:   > {:.2}", config.facade.approval_threshold);
    println!("========================================\n");

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
