//! # Utilities Module
//!
//! Numeric helpers shared by the game and the level generator.

pub mod math;

pub use math::*;
