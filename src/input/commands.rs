//! # Command Definitions
//!
//! The closed set of commands the game session accepts.

use crate::Direction;

/// A single request to change the game session.
///
/// Commands come from two producers, the keyboard and the energy decay timer. Both
/// funnel into one queue so the session sees them strictly one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Step the player one cell
    Move(Direction),
    /// Trigger the tile under the player again
    Interact,
    /// Continue past the current dialog
    AdvanceStage,
    /// One tick of energy decay
    DecayTick,
    /// Leave the game
    Quit,
}

impl Command {
    /// Whether this command came from the player rather than the clock.
    pub fn is_player_command(self) -> bool {
        !matches!(self, Command::DecayTick)
    }
}
