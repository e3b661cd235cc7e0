//! # Random Sources
//!
//! The generator only ever asks for uniform integers in an inclusive range. Keeping
//! that behind a small trait lets a seeded [`StdRng`] drive real play while a
//! [`ScriptedRolls`] replays an exact sequence to reproduce a particular level.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Returns an integer in `low..=high`.
    fn roll(&mut self, low: i64, high: i64) -> i64;
}

impl RandomSource for StdRng {
    fn roll(&mut self, low: i64, high: i64) -> i64 {
        self.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of rolls.
///
/// # Examples
///
/// ```
/// use smoothlife::{RandomSource, ScriptedRolls};
///
/// let mut rolls = ScriptedRolls::new([4, 0]);
/// assert_eq!(rolls.roll(1, 9), 4);
/// assert_eq!(rolls.roll(0, 3), 0);
/// assert!(rolls.is_exhausted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<i64>,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = i64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Number of rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.rolls.is_empty()
    }
}

impl RandomSource for ScriptedRolls {
    /// # Panics
    ///
    /// Panics when the script runs out or the next value lies outside `low..=high`;
    /// either means the script no longer matches the code consuming it.
    fn roll(&mut self, low: i64, high: i64) -> i64 {
        match self.rolls.pop_front() {
            Some(value) if (low..=high).contains(&value) => value,
            Some(value) => panic!("scripted roll {} is outside {}..={}", value, low, high),
            None => panic!("scripted rolls exhausted while rolling {}..={}", low, high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = rng.roll(1, 9);
            assert!((1..=9).contains(&value));
        }
        assert_eq!(rng.roll(5, 5), 5);
    }

    #[test]
    fn test_scripted_rolls_replay_in_order() {
        let mut rolls = ScriptedRolls::new(vec![3, 1, 4]);
        assert_eq!(rolls.remaining(), 3);
        assert_eq!(rolls.roll(0, 9), 3);
        assert_eq!(rolls.roll(0, 9), 1);
        assert_eq!(rolls.roll(0, 9), 4);
        assert!(rolls.is_exhausted());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_scripted_roll_out_of_range() {
        let mut rolls = ScriptedRolls::new([12]);
        rolls.roll(1, 9);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_rolls_exhausted() {
        let mut rolls = ScriptedRolls::default();
        rolls.roll(1, 9);
    }
}
