//! # Smoothlife
//!
//! A small terminal puzzle game about polishing a rough number until it is round.
//!
//! ## Architecture Overview
//!
//! The player walks a token across a grid of operator tiles. Every tile applies one
//! arithmetic step to the "surface" value, and the exit rewards the player by how many
//! trailing zero digits the surface has when they arrive.
//!
//! - **Game State**: the session that owns the board, progress and event log
//! - **Generation System**: builds each level backwards from a round target value
//! - **Input System**: maps terminal key events onto core commands
//! - **Rendering System**: a read-only view model plus a ratatui terminal display
//! - **Scenes**: the interactive loop that serializes input and timer commands
//!
//! The core never touches the terminal; everything it exposes to the outer layers is a
//! command method or a read-only projection.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Smoothlife game engine.
#[derive(thiserror::Error, Debug)]
pub enum SmoothlifeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Smoothlife codebase.
pub type SmoothlifeResult<T> = Result<T, SmoothlifeError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Number base used to measure roundness
    pub const BASE: i64 = 10;

    /// Default board width in tiles
    pub const DEFAULT_BOARD_WIDTH: usize = 7;

    /// Default board height in tiles
    pub const DEFAULT_BOARD_HEIGHT: usize = 5;

    /// Number of recent events kept for display
    pub const EVENT_LOG_LENGTH: usize = 4;

    /// Energy the player starts with and can never exceed
    pub const MAX_ENERGY: u32 = 100;

    /// Lives the player starts with
    pub const STARTING_LIVES: u32 = 3;

    /// Seconds between two energy decay ticks
    pub const ENERGY_DECAY_SECS: u64 = 5;

    /// Score needed at the end of a session to count as a win
    pub const MIN_WINNING_SCORE: u64 = 1000;

    /// Frames per second target for the render loop
    pub const TARGET_FPS: u64 = 30;
}
