//! # Generation Module
//!
//! Procedural level generation.
//!
//! A level is built backwards: the generator picks a round goal value, places a chain
//! of operator tiles, and applies the inverse of each tile to the goal. What is left
//! after the whole chain is the rough starting surface the player has to polish.

pub mod level;
pub mod random;

pub use level::*;
pub use random::*;

use crate::{SmoothlifeError, SmoothlifeResult, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for level generation.
///
/// Controls how large the goal value gets, how long the operator chain is at each
/// level, and how hard the generator tries before giving up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Number base roundness is measured in
    pub base: Surface,
    /// Smallest leading digit of the goal value
    pub min_goal_digit: Surface,
    /// Largest leading digit of the goal value
    pub max_goal_digit: Surface,
    /// Smallest tile operand
    pub min_operand: Surface,
    /// Largest tile operand
    pub max_operand: Surface,
    /// Trailing zeros of the goal on the first tier
    pub base_exponent: u32,
    /// Upper bound on trailing zeros of the goal
    pub max_exponent: u32,
    /// Operator tiles on the first tier
    pub base_chain_length: usize,
    /// Extra operator tiles per tier
    pub chain_growth: usize,
    /// Upper bound on operator tiles per level
    pub max_chain_length: usize,
    /// Levels that share one difficulty tier
    pub levels_per_tier: u32,
    /// Whole-board attempts before generation fails
    pub max_generation_attempts: u32,
    /// Multiply operand redraws before falling back to a known divisor
    pub max_operand_resamples: u32,
    /// Random cell probes before an attempt is abandoned
    pub max_cell_attempts: u32,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert_eq!(config.chain_length_for(0), 3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            base: crate::config::BASE,
            min_goal_digit: 1,
            max_goal_digit: 9,
            min_operand: 1,
            max_operand: 9,
            base_exponent: 2,
            max_exponent: 9,
            base_chain_length: 3,
            chain_growth: 1,
            max_chain_length: 8,
            levels_per_tier: 3,
            max_generation_attempts: 1000,
            max_operand_resamples: 32,
            max_cell_attempts: 256,
        }
    }

    /// Creates a configuration for testing with short chains and small values.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            max_exponent: 4,
            max_chain_length: 5,
            ..Self::new(seed)
        }
    }

    fn tier(&self, level_index: u32) -> u32 {
        level_index / self.levels_per_tier.max(1)
    }

    /// Trailing zeros of the goal value at a level.
    pub fn exponent_for(&self, level_index: u32) -> u32 {
        self.base_exponent
            .saturating_add(self.tier(level_index))
            .min(self.max_exponent)
    }

    /// Number of operator tiles placed at a level.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::GenerationConfig;
    ///
    /// let config = GenerationConfig::default();
    /// assert_eq!(config.chain_length_for(2), 3);
    /// assert_eq!(config.chain_length_for(3), 4);
    /// assert_eq!(config.chain_length_for(500), 8);
    /// ```
    pub fn chain_length_for(&self, level_index: u32) -> usize {
        let growth = self.chain_growth.saturating_mul(self.tier(level_index) as usize);
        self.base_chain_length
            .saturating_add(growth)
            .min(self.max_chain_length)
    }

    /// The longest chain any level will ask for.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::GenerationConfig;
    ///
    /// let config = GenerationConfig::default();
    /// assert_eq!(config.longest_chain_length(), 8);
    ///
    /// let flat = GenerationConfig { chain_growth: 0, ..GenerationConfig::default() };
    /// assert_eq!(flat.longest_chain_length(), 3);
    /// ```
    pub fn longest_chain_length(&self) -> usize {
        if self.chain_growth == 0 {
            self.base_chain_length.min(self.max_chain_length)
        } else {
            self.max_chain_length
        }
    }

    /// Rejects settings the generator could never satisfy.
    pub fn validate(&self) -> SmoothlifeResult<()> {
        let fail = |reason: &str| Err(SmoothlifeError::GenerationFailed(reason.to_string()));

        if self.base < 2 {
            return fail("base must be at least 2");
        }
        if self.min_goal_digit < 1 || self.min_goal_digit > self.max_goal_digit {
            return fail("goal digit range must be positive and non-empty");
        }
        if self.min_operand < 1 || self.min_operand > self.max_operand {
            return fail("operand range must be positive and non-empty");
        }
        if self.max_generation_attempts == 0 || self.max_cell_attempts == 0 {
            return fail("attempt caps must be at least 1");
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content for a level index using the provided random source.
    fn generate<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        level_index: u32,
        rng: &mut R,
    ) -> SmoothlifeResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> SmoothlifeResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Picks a seed for a new session from the wall clock.
    pub fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(42)
    }
}
