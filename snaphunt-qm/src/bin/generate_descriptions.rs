//! Catalogue description generator
//!
//! Deployment-time companion tool: walks the catalogue, reads each location's
//! first reference photo, asks the vision model for a discriminating visual
//! description, and writes a `name -> description` JSON map. The output is
//! reviewed by hand before being folded into a catalogue file; descriptions
//! are what the matcher compares user photos against, so they are curated,
//! not applied blindly.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use snaphunt_common::config::{default_config_path, load_toml_config, TomlConfig};
use snaphunt_common::Catalogue;
use snaphunt_qm::services::OpenAiClient;

#[derive(Parser)]
#[command(
    name = "generate-descriptions",
    about = "Generate location descriptions from catalogue reference photos"
)]
struct Args {
    /// Directory holding reference images (catalogue image paths are
    /// resolved relative to it)
    #[arg(long, default_value = "public")]
    assets_dir: PathBuf,

    /// Catalogue JSON file (defaults to the built-in catalogue)
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// Output path for the generated description map
    #[arg(long, default_value = "descriptions.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match default_config_path("snaphunt-qm") {
        Some(path) => load_toml_config(&path)?,
        None => TomlConfig::default(),
    };
    let api_key = snaphunt_qm::config::resolve_openai_api_key(&config)?;
    let client =
        OpenAiClient::with_options(api_key, config.model.clone(), config.api_base_url.clone())?;

    let catalogue = match &args.catalogue {
        Some(path) => Catalogue::from_json_file(path)?,
        None => Catalogue::builtin(),
    };
    info!("Generating descriptions for {} locations", catalogue.len());

    let mut descriptions = serde_json::Map::new();

    for location in catalogue.locations() {
        let Some(first_image) = location.images.first() else {
            warn!(name = %location.name, "no reference images, skipping");
            continue;
        };

        let image_path = args.assets_dir.join(first_image);
        let bytes = match std::fs::read(&image_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %image_path.display(), error = %e, "could not read reference image");
                continue;
            }
        };

        let mime = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("image/jpeg");
        let data_url = format!("data:{};base64,{}", mime, BASE64.encode(&bytes));

        match client.describe_image(&data_url).await {
            Ok(description) => {
                info!(name = %location.name, "description generated");
                descriptions.insert(
                    location.name.clone(),
                    serde_json::Value::String(description),
                );
            }
            Err(e) => {
                warn!(name = %location.name, error = %e, "description generation failed");
            }
        }
    }

    let json = serde_json::to_string_pretty(&descriptions)?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!("Descriptions saved to {}", args.output.display());

    Ok(())
}
