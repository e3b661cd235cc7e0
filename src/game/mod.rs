//! # Game Module
//!
//! Core game state: tiles, the board, player progress and the session that ties
//! them together.
//!
//! Nothing in here performs I/O. The session is driven entirely through command
//! methods and read back through plain data, so the same core serves the terminal
//! front end and the tests.

pub mod board;
pub mod config;
pub mod events;
pub mod progress;
pub mod state;
pub mod tile;

pub use board::*;
pub use config::*;
pub use events::*;
pub use progress::*;
pub use state::*;
pub use tile::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the board.
///
/// # Examples
///
/// ```
/// use smoothlife::{Direction, Position};
///
/// let pos = Position::new(2, 3);
/// assert_eq!(pos.x, 2);
/// assert_eq!(pos.y, 3);
/// assert_eq!(pos.moved(Direction::East), Position::new(3, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// The neighbouring position one step in `direction`.
    pub fn moved(self, direction: Direction) -> Self {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Directions the player can step in.
///
/// Row 0 is drawn at the top, so North decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
        assert_eq!(Position::origin(), Position::default());
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
        assert_eq!(Direction::South.to_delta(), Position::new(0, 1));
        assert_eq!(Direction::East.to_delta(), Position::new(1, 0));
        assert_eq!(Direction::West.to_delta(), Position::new(-1, 0));
    }

    #[test]
    fn test_moves_cancel_out() {
        let start = Position::new(3, 3);
        let end = start
            .moved(Direction::North)
            .moved(Direction::East)
            .moved(Direction::South)
            .moved(Direction::West);
        assert_eq!(start, end);
    }
}
