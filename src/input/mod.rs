//! # Input Module
//!
//! Input handling for player interactions.
//!
//! Terminal key events are first mapped onto [`PlayerInput`], which knows nothing
//! about the game state. [`InputHandler::input_to_command`] then turns that into a
//! core [`Command`] for the current stage.

pub mod commands;

pub use commands::*;

use crate::{Direction, GameStage};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input handler for processing player key presses.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    /// use smoothlife::{Direction, InputHandler, PlayerInput};
    ///
    /// let handler = InputHandler::new();
    /// let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
    /// assert_eq!(handler.handle_key_event(key), Some(PlayerInput::Move(Direction::North)));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Maps a terminal key event to a player input.
    ///
    /// Key releases and repeats reported by some terminals are ignored.
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<PlayerInput> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(PlayerInput::Quit);
        }

        match key.code {
            KeyCode::Esc => Some(PlayerInput::Quit),

            // Movement - Arrow keys
            KeyCode::Up => Some(PlayerInput::Move(Direction::North)),
            KeyCode::Down => Some(PlayerInput::Move(Direction::South)),
            KeyCode::Left => Some(PlayerInput::Move(Direction::West)),
            KeyCode::Right => Some(PlayerInput::Move(Direction::East)),

            KeyCode::Enter | KeyCode::Char(' ') => Some(PlayerInput::Confirm),

            KeyCode::Char(c) => self.handle_char(c.to_ascii_lowercase()),

            _ => None,
        }
    }

    fn handle_char(&self, c: char) -> Option<PlayerInput> {
        match c {
            'q' => Some(PlayerInput::Quit),
            'e' => Some(PlayerInput::Interact),

            // Movement - WASD
            'w' => Some(PlayerInput::Move(Direction::North)),
            's' => Some(PlayerInput::Move(Direction::South)),
            'a' => Some(PlayerInput::Move(Direction::West)),
            'd' => Some(PlayerInput::Move(Direction::East)),

            // Movement - Vi style (hjkl) if enabled
            'k' if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::North)),
            'j' if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::South)),
            'h' if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::West)),
            'l' if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::East)),

            _ => None,
        }
    }

    /// Converts player input to a core command for the given stage.
    ///
    /// Dialog stages only listen for "continue" and quit; active play ignores
    /// "continue". The ending forwards "continue" so the caller can offer a retry.
    pub fn input_to_command(&self, input: PlayerInput, stage: GameStage) -> Option<Command> {
        match input {
            PlayerInput::Quit => Some(Command::Quit),
            PlayerInput::Confirm if stage != GameStage::Active => Some(Command::AdvanceStage),
            PlayerInput::Move(direction) if stage == GameStage::Active => {
                Some(Command::Move(direction))
            }
            PlayerInput::Interact if stage == GameStage::Active => Some(Command::Interact),
            _ => None,
        }
    }
}

/// Player input types that can be produced by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step in a direction
    Move(Direction),
    /// Use the tile under the player again
    Interact,
    /// Continue past a dialog, or start over after the ending
    Confirm,
    /// Quit the game
    Quit,
}
