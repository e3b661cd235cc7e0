//! # Smoothlife Main Entry Point
//!
//! Parses the command line, sets up logging and hands the terminal to the scene loop.

use clap::Parser;
use log::{error, info};
use smoothlife::{generation::utils::clock_seed, GameConfig, SceneManager, SmoothlifeResult};

/// Command line arguments for Smoothlife.
#[derive(Parser, Debug)]
#[command(name = "smoothlife")]
#[command(about = "Polish a rough number until it ends in zeros")]
#[command(version)]
struct Args {}

#[tokio::main]
async fn main() -> SmoothlifeResult<()> {
    let _args = Args::parse();

    initialize_logging();

    info!("Starting Smoothlife v{}", smoothlife::VERSION);

    let seed = clock_seed();
    info!("Session seed: {}", seed);

    let result = run(GameConfig::new(seed)).await;
    if let Err(err) = &result {
        error!("Smoothlife stopped: {}", err);
    }
    result
}

/// Initializes the logging system.
///
/// The terminal belongs to the game while it runs, so only warnings and errors are
/// shown unless `RUST_LOG` asks for more.
fn initialize_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();
}

async fn run(config: GameConfig) -> SmoothlifeResult<()> {
    let mut scenes = SceneManager::new(config)?;
    scenes.run().await?;
    info!("Game loop ended");
    Ok(())
}
