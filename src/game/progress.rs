//! # Player Progress
//!
//! Energy, lives, score and the coarse phase of a play session.

use serde::{Deserialize, Serialize};

/// The phases of a play session, in the order they are visited.
///
/// Stages only move forward; `Ending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameStage {
    /// Opening dialog
    Intro,
    /// First tutorial page: moving and operator tiles
    TutorialMoves,
    /// Second tutorial page: the exit and scoring
    TutorialExit,
    /// Active play: movement, interaction and energy decay are live
    Active,
    /// Session is over
    Ending,
}

impl GameStage {
    /// The stage that follows this one, saturating at `Ending`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::GameStage;
    ///
    /// assert_eq!(GameStage::Intro.next(), GameStage::TutorialMoves);
    /// assert_eq!(GameStage::Active.next(), GameStage::Ending);
    /// assert_eq!(GameStage::Ending.next(), GameStage::Ending);
    /// ```
    pub fn next(self) -> GameStage {
        match self {
            GameStage::Intro => GameStage::TutorialMoves,
            GameStage::TutorialMoves => GameStage::TutorialExit,
            GameStage::TutorialExit => GameStage::Active,
            GameStage::Active | GameStage::Ending => GameStage::Ending,
        }
    }

    /// Dialog stages advance on an explicit "continue" from the player.
    pub fn is_dialog(self) -> bool {
        matches!(
            self,
            GameStage::Intro | GameStage::TutorialMoves | GameStage::TutorialExit
        )
    }

    pub fn is_terminal(self) -> bool {
        self == GameStage::Ending
    }
}

/// How an ended session is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Counters tracked across a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Current level index, never decreases
    pub level_index: u32,
    /// Remaining energy; moving and time both drain it
    pub energy: u32,
    /// Remaining lives; lost on a rough exit
    pub lives: u32,
    /// Accumulated score, never decreases
    pub score: u64,
    /// Steps taken on the current level
    pub steps: u32,
    /// Current stage of the session
    pub stage: GameStage,
}

impl Progress {
    /// Fresh progress at the start of a session.
    pub fn new(energy: u32, lives: u32) -> Self {
        Self {
            level_index: 0,
            energy,
            lives,
            score: 0,
            steps: 0,
            stage: GameStage::Intro,
        }
    }

    /// Adds energy without exceeding `max_energy`.
    pub fn restore_energy(&mut self, amount: u32, max_energy: u32) {
        self.energy = self.energy.saturating_add(amount).min(max_energy);
    }

    /// Spends one unit of energy. Returns false if there was none left.
    pub fn spend_energy(&mut self) -> bool {
        if self.energy == 0 {
            return false;
        }
        self.energy -= 1;
        true
    }

    /// Takes one life. Returns true if that was the last one.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Moves on to the next level.
    pub fn advance_level(&mut self) {
        self.level_index += 1;
        self.steps = 0;
    }

    /// Judges the session against the winning score threshold.
    pub fn outcome(&self, min_winning_score: u64) -> Outcome {
        if self.score >= min_winning_score {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let mut stage = GameStage::Intro;
        let mut visited = vec![stage];
        while !stage.is_terminal() {
            stage = stage.next();
            visited.push(stage);
        }
        assert_eq!(
            visited,
            vec![
                GameStage::Intro,
                GameStage::TutorialMoves,
                GameStage::TutorialExit,
                GameStage::Active,
                GameStage::Ending,
            ]
        );
        assert!(visited.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_dialog_stages() {
        assert!(GameStage::Intro.is_dialog());
        assert!(GameStage::TutorialExit.is_dialog());
        assert!(!GameStage::Active.is_dialog());
        assert!(!GameStage::Ending.is_dialog());
    }

    #[test]
    fn test_energy_bounds() {
        let mut progress = Progress::new(1, 3);
        assert!(progress.spend_energy());
        assert!(!progress.spend_energy());
        assert_eq!(progress.energy, 0);

        progress.restore_energy(150, 100);
        assert_eq!(progress.energy, 100);
    }

    #[test]
    fn test_lives() {
        let mut progress = Progress::new(100, 2);
        assert!(!progress.lose_life());
        assert!(progress.lose_life());
        assert!(progress.lose_life());
        assert_eq!(progress.lives, 0);
    }

    #[test]
    fn test_outcome() {
        let mut progress = Progress::new(100, 3);
        assert_eq!(progress.outcome(1000), Outcome::Lost);
        progress.score = 1000;
        assert_eq!(progress.outcome(1000), Outcome::Won);
    }

    #[test]
    fn test_advance_level_resets_steps() {
        let mut progress = Progress::new(100, 3);
        progress.steps = 12;
        progress.advance_level();
        assert_eq!(progress.level_index, 1);
        assert_eq!(progress.steps, 0);
    }
}
