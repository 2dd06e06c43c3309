//! Sheetcraft command-line binary.

mod cli;

use clap::Parser;
use cli::{
    Cli, Commands, handle_activities_command, handle_generate_command, handle_repair_command,
};
use sheetcraft::{Sheetcraft, SheetcraftConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading API keys or configuration overrides
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    #[cfg(feature = "metrics")]
    sheetcraft_core::init_observability(
        "sheetcraft",
        sheetcraft_core::MetricsExporter::from_env(),
        30,
    )?;

    let config = match &cli.config {
        Some(path) => SheetcraftConfig::load_from(path)?,
        None => SheetcraftConfig::load()?,
    };

    let result = match cli.command {
        Commands::Generate(args) => handle_generate_command(config, args).await,
        Commands::Activities => handle_activities_command(&Sheetcraft::from_config(config)?),
        Commands::Repair { file } => handle_repair_command(file),
    };

    #[cfg(feature = "metrics")]
    sheetcraft_core::shutdown_observability();

    result
}
