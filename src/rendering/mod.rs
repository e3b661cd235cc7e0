//! # Rendering Module
//!
//! Read-only projection of a game session plus the ratatui terminal display.
//!
//! [`ViewModel`] is built fresh from a [`GameSession`] each frame. The display only
//! ever sees the view model, never the session itself.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::{
    GameSession, GameStage, LogEntry, Outcome, Position, Surface, TileKind,
};

/// What a single board cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub kind: TileKind,
    pub operand: Surface,
    /// Whether the player stands on this cell
    pub has_player: bool,
}

impl CellView {
    /// Text shown inside the cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::{CellView, TileKind};
    ///
    /// let cell = CellView { kind: TileKind::Multiply, operand: 3, has_player: false };
    /// assert_eq!(cell.label(), "×3");
    /// ```
    pub fn label(&self) -> String {
        if self.has_player {
            PLAYER_GLYPH.to_string()
        } else if self.kind.is_operator() {
            format!("{}{}", self.kind.symbol(), self.operand)
        } else {
            self.kind.symbol().to_string()
        }
    }
}

/// Glyph drawn for the player token.
pub const PLAYER_GLYPH: &str = "@";

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub width: usize,
    pub height: usize,
    /// Board cells in row-major order, row 0 first
    pub cells: Vec<CellView>,
    pub player: Position,
    pub energy: u32,
    pub max_energy: u32,
    pub surface: Surface,
    pub roundness: u32,
    pub score: u64,
    pub lives: u32,
    /// One-based level number for display
    pub level: u32,
    pub stage: GameStage,
    /// Recent events, newest first
    pub events: Vec<LogEntry>,
    /// Set once the session has ended
    pub outcome: Option<Outcome>,
}

impl ViewModel {
    /// Projects the current state of `session`.
    pub fn from_session(session: &GameSession) -> Self {
        let cells = session
            .board
            .iter()
            .map(|(pos, tile)| CellView {
                kind: tile.kind,
                operand: tile.operand,
                has_player: pos == session.player,
            })
            .collect();

        Self {
            width: session.board.width(),
            height: session.board.height(),
            cells,
            player: session.player,
            energy: session.progress.energy,
            max_energy: session.config.max_energy,
            surface: session.surface,
            roundness: session.roundness(),
            score: session.progress.score,
            lives: session.progress.lives,
            level: session.progress.level_index + 1,
            stage: session.progress.stage,
            events: session.events.entries().cloned().collect(),
            outcome: session.outcome(),
        }
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[CellView] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// The dialog to show over the board, if any.
    pub fn dialog(&self) -> Option<Dialog> {
        Dialog::for_stage(self.stage, self.outcome, self.score)
    }
}
