//! snaphunt-qm - Quest Matcher Microservice
//!
//! **Module Identity:**
//! - Name: snaphunt-qm (Quest Matcher)
//! - Port: 5731
//!
//! Accepts photo uploads from the scavenger-hunt client, matches them against
//! the location catalogue via a vision-capable language model, and returns a
//! structured match result.

use anyhow::Result;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use snaphunt_common::config::{default_config_path, load_toml_config, TomlConfig};
use snaphunt_common::Catalogue;
use snaphunt_qm::services::OpenAiClient;
use snaphunt_qm::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Step 1: Load bootstrap configuration
    let config = match default_config_path("snaphunt-qm") {
        Some(path) => load_toml_config(&path)?,
        None => TomlConfig::default(),
    };

    // Step 2: Initialize tracing at the configured level
    let level = Level::from_str(&config.logging.level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting snaphunt-qm (Quest Matcher) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 3: Load the location catalogue (file override or built-in)
    let catalogue = match &config.catalogue_path {
        Some(path) => {
            info!("Catalogue: {}", path.display());
            Catalogue::from_json_file(path)?
        }
        None => {
            info!("Catalogue: built-in");
            Catalogue::builtin()
        }
    };
    info!("Catalogue loaded: {} locations", catalogue.len());

    // Step 4: Resolve the provider credential (never logged)
    let api_key = snaphunt_qm::config::resolve_openai_api_key(&config)?;

    // Step 5: Construct the shared provider client
    let client = OpenAiClient::with_options(
        api_key,
        config.model.clone(),
        config.api_base_url.clone(),
    )?;

    // Create application state
    let state = AppState::new(Arc::new(catalogue), Arc::new(client));

    // Build router
    let app = snaphunt_qm::build_router(state);

    // Start server
    let bind_addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
