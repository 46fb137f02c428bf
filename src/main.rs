use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use eco_snake::game::{GameConfig, GameEngine, ItemCatalog, ItemDefinition};
use eco_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "eco_snake")]
#[command(version, about = "Snake game with environmental-awareness collectibles")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Chance that a spawned item is positive, in [0, 1]
    #[arg(long)]
    positive_probability: Option<f64>,

    /// JSON game configuration; flags above override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON item catalog replacing the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Seed for a reproducible item and food sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is owned by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard or mouse-drag controls
    Human,
    /// Print the active item catalog as JSON
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    let catalog = match &cli.catalog {
        Some(path) => ItemCatalog::from_json_file(path)?,
        None => ItemCatalog::default(),
    };

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let engine = match cli.seed {
                Some(seed) => GameEngine::seeded(config, catalog, seed),
                None => GameEngine::with_catalog(config, catalog),
            }
            .context("Invalid game configuration")?;

            info!(version = env!("CARGO_PKG_VERSION"), "starting human mode");
            let mut human_mode = HumanMode::new(engine)?;
            human_mode.run().await?;
        }
        Mode::Catalog => {
            let items: Vec<&ItemDefinition> = catalog.items().collect();
            let json =
                serde_json::to_string_pretty(&items).context("Failed to serialize catalog")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(probability) = cli.positive_probability {
        config.positive_probability = probability;
    }

    Ok(config)
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(EnvFilter::from_default_env().add_directive("eco_snake=info".parse()?))
        .init();

    Ok(())
}
