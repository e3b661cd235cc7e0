//! # Game Configuration
//!
//! Gameplay tuning for one session.

use crate::{config, GenerationConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board
    pub board_width: usize,
    /// Height of the board
    pub board_height: usize,
    /// Energy at the start and the cap for any refill
    pub max_energy: u32,
    /// Lives at the start of a session
    pub starting_lives: u32,
    /// Time between two energy decay ticks
    pub energy_decay_interval: Duration,
    /// Number of narrative events kept for display
    pub event_log_length: usize,
    /// Score that counts as a win when the session ends
    pub min_winning_score: u64,

    // Energy rewards for leaving a level
    /// Reward for a surface with one trailing zero
    pub energy_reward_ok: u32,
    /// Reward for two trailing zeros
    pub energy_reward_fine: u32,
    /// Reward for three or more trailing zeros
    pub energy_reward_masterpiece: u32,

    /// Level generation settings
    pub generation: GenerationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: config::DEFAULT_BOARD_WIDTH,
            board_height: config::DEFAULT_BOARD_HEIGHT,
            max_energy: config::MAX_ENERGY,
            starting_lives: config::STARTING_LIVES,
            energy_decay_interval: Duration::from_secs(config::ENERGY_DECAY_SECS),
            event_log_length: config::EVENT_LOG_LENGTH,
            min_winning_score: config::MIN_WINNING_SCORE,
            energy_reward_ok: 10,
            energy_reward_fine: 25,
            energy_reward_masterpiece: 50,
            generation: GenerationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Creates a default configuration whose levels come from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::new(seed),
            ..Default::default()
        }
    }

    /// Create a small, fast configuration for testing
    pub fn for_testing(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::for_testing(seed),
            energy_decay_interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Energy granted for leaving a level with the given roundness.
    pub fn energy_reward(&self, roundness: u32) -> u32 {
        match roundness {
            0 => 0,
            1 => self.energy_reward_ok,
            2 => self.energy_reward_fine,
            _ => self.energy_reward_masterpiece,
        }
    }
}
