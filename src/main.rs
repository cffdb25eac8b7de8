//! opdeck - driver assistance settings console

use std::path::PathBuf;

use clap::Parser;
use opdeck_app::Settings;
use opdeck_core::prelude::*;

/// On-device default parameter store location.
const DEFAULT_PARAMS_DIR: &str = "/data/params/d";

#[derive(Parser, Debug)]
#[command(name = "opdeck", version, about = "Driver assistance settings console")]
struct Args {
    /// Parameter store directory (defaults to the on-device location)
    params_dir: Option<PathBuf>,

    /// Config file path (defaults to ~/.config/opdeck/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    opdeck_core::logging::init()?;

    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let params_dir = args
        .params_dir
        .or_else(|| settings.device.params_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_DIR));
    info!(params_dir = %params_dir.display(), "starting settings console");

    opdeck_tui::run(params_dir, settings).await?;
    Ok(())
}
