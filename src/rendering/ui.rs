//! # User Interface Elements
//!
//! Dialog texts shown over the board outside active play.

use crate::{GameStage, Outcome};

/// A modal text box with a title, a body and a key hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub prompt: &'static str,
}

impl Dialog {
    /// The dialog for a stage, or None during active play.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::{Dialog, GameStage};
    ///
    /// assert!(Dialog::for_stage(GameStage::Intro, None, 0).is_some());
    /// assert!(Dialog::for_stage(GameStage::Active, None, 0).is_none());
    /// ```
    pub fn for_stage(stage: GameStage, outcome: Option<Outcome>, score: u64) -> Option<Self> {
        let dialog = match stage {
            GameStage::Intro => Self {
                title: " smoothlife ",
                lines: text(&[
                    "You are a craftsman with a rough piece on the bench.",
                    "Its surface is a number. The more zeros it ends in,",
                    "the smoother it is.",
                ]),
                prompt: CONTINUE,
            },
            GameStage::TutorialMoves => Self {
                title: " Tools ",
                lines: text(&[
                    "Walk with the arrow keys, WASD or hjkl.",
                    "Every step costs energy, and so does waiting.",
                    "Stepping on a tool applies it to the surface once:",
                    "+ adds, - subtracts, × multiplies, ÷ divides.",
                    "Each tool works once. On the exit, press e to deliver again.",
                ]),
                prompt: CONTINUE,
            },
            GameStage::TutorialExit => Self {
                title: " Delivery ",
                lines: text(&[
                    "Bring the piece to the exit ⋒ when it is round.",
                    "Each trailing zero earns points and energy.",
                    "A piece with no trailing zero costs a life.",
                ]),
                prompt: CONTINUE,
            },
            GameStage::Active => return None,
            GameStage::Ending => {
                let title = match outcome {
                    Some(Outcome::Won) => " Master craftsman ",
                    _ => " Workshop closed ",
                };
                Self {
                    title,
                    lines: vec![
                        "The session is over.".to_string(),
                        format!("Final score: {}", score),
                    ],
                    prompt: "Enter to start over, q to quit",
                }
            }
        };
        Some(dialog)
    }
}

const CONTINUE: &str = "Enter to continue, q to quit";

fn text(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dialog_stage_has_text() {
        for stage in [
            GameStage::Intro,
            GameStage::TutorialMoves,
            GameStage::TutorialExit,
        ] {
            let dialog = Dialog::for_stage(stage, None, 0).unwrap();
            assert!(!dialog.lines.is_empty());
            assert_eq!(dialog.prompt, CONTINUE);
        }
    }

    #[test]
    fn test_tools_tutorial_ties_interact_to_the_exit() {
        let dialog = Dialog::for_stage(GameStage::TutorialMoves, None, 0).unwrap();
        let interact = dialog
            .lines
            .iter()
            .find(|l| l.contains("press e"))
            .unwrap();
        assert!(interact.contains("exit"));
        assert!(dialog.lines.iter().any(|l| l.contains("works once")));
    }

    #[test]
    fn test_ending_shows_outcome_and_score() {
        let won = Dialog::for_stage(GameStage::Ending, Some(Outcome::Won), 1500).unwrap();
        assert_eq!(won.title, " Master craftsman ");
        assert!(won.lines.iter().any(|l| l.contains("1500")));

        let lost = Dialog::for_stage(GameStage::Ending, Some(Outcome::Lost), 3).unwrap();
        assert_eq!(lost.title, " Workshop closed ");
    }
}
