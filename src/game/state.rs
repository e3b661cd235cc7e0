//! # Game State Module
//!
//! The play session: owns the board, the player position, the surface value and
//! progress, and dispatches every interaction.
//!
//! The session is the only writer of game state. Input handlers and the energy decay
//! timer never touch it directly; they hand [`Command`]s to whoever owns the session,
//! which applies them one at a time.

use crate::generation::utils::create_rng;
use crate::{
    roundness, Board, Command, Direction, EventLog, GameConfig, GameStage,
    Generator, Level, LevelGenerator, LogTone, Outcome, Position, Progress, SmoothlifeResult,
    Surface, TileError, TileKind,
};
use log::{debug, info};
use rand::rngs::StdRng;

/// What happened when the player tried to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped onto the target cell
    Moved,
    /// The target cell is off the board; nothing changed
    Blocked,
    /// The player was out of energy and the session ended instead
    FellAsleep,
    /// Movement is not live in the current stage
    Ignored,
}

/// Central game state for one play session.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session configuration
    pub config: GameConfig,
    /// Tile layout of the current level
    pub board: Board,
    /// Player position on the board
    pub player: Position,
    /// The value being polished
    pub surface: Surface,
    /// Energy, lives, score and stage
    pub progress: Progress,
    /// Recent narrative events, newest first
    pub events: EventLog,
    /// Round value the current level was built from
    pub goal: Surface,
    generator: LevelGenerator,
    rng: StdRng,
}

impl GameSession {
    /// Creates a new session and generates its first level.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::{GameConfig, GameSession, GameStage};
    ///
    /// let session = GameSession::new(GameConfig::new(12345)).unwrap();
    /// assert_eq!(session.progress.stage, GameStage::Intro);
    /// assert_eq!(session.progress.level_index, 0);
    /// assert_eq!(session.player, session.level_start());
    /// ```
    ///
    /// Fails up front if the board cannot hold the longest chain any later level uses.
    pub fn new(config: GameConfig) -> SmoothlifeResult<Self> {
        let mut rng = create_rng(&config.generation);
        let generator = LevelGenerator::new(config.board_width, config.board_height);
        generator.check_fits(config.generation.longest_chain_length())?;
        let level = generator.generate(&config.generation, 0, &mut rng)?;
        Ok(Self::assemble(config, generator, rng, level))
    }

    /// Creates a session that starts on a prepared level.
    ///
    /// Later levels are still generated from the configured seed.
    pub fn with_level(config: GameConfig, level: Level) -> Self {
        let rng = create_rng(&config.generation);
        let generator = LevelGenerator::new(config.board_width, config.board_height);
        Self::assemble(config, generator, rng, level)
    }

    fn assemble(config: GameConfig, generator: LevelGenerator, rng: StdRng, level: Level) -> Self {
        let progress = Progress::new(config.max_energy, config.starting_lives);
        let events = EventLog::new(config.event_log_length);
        let mut session = Self {
            board: Board::new(config.board_width, config.board_height),
            player: level.player_start,
            surface: level.initial_surface,
            progress,
            events,
            goal: level.goal,
            generator,
            rng,
            config,
        };
        session.load_level(level);
        session
            .events
            .post("Welcome to the workshop.", LogTone::Neutral);
        session
    }

    /// Where the player starts each level.
    pub fn level_start(&self) -> Position {
        self.generator.player_start()
    }

    /// Roundness of the current surface.
    pub fn roundness(&self) -> u32 {
        roundness(self.surface, self.config.generation.base)
    }

    pub fn stage(&self) -> GameStage {
        self.progress.stage
    }

    /// Whether the session has reached its terminal stage.
    pub fn is_over(&self) -> bool {
        self.progress.stage.is_terminal()
    }

    /// Win or loss, once the session is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_over() {
            Some(self.progress.outcome(self.config.min_winning_score))
        } else {
            None
        }
    }

    /// Applies one command from the input layer or the decay timer.
    pub fn execute(&mut self, command: Command) -> SmoothlifeResult<()> {
        match command {
            Command::Move(direction) => {
                self.try_move(direction)?;
            }
            Command::Interact => self.interact()?,
            Command::AdvanceStage => {
                self.advance_stage();
            }
            Command::DecayTick => {
                self.decay_tick();
            }
            Command::Quit => {}
        }
        Ok(())
    }

    /// Moves past a dialog stage on the player's "continue".
    ///
    /// Active play and the ending are left alone; they only change through play.
    pub fn advance_stage(&mut self) -> GameStage {
        let stage = self.progress.stage;
        if stage.is_dialog() {
            self.progress.stage = stage.next();
            info!("Stage {:?} -> {:?}", stage, self.progress.stage);
            if self.progress.stage == GameStage::Active {
                self.post_level_banner();
            }
        }
        self.progress.stage
    }

    /// Steps the player one cell in `direction`.
    pub fn try_move(&mut self, direction: Direction) -> SmoothlifeResult<MoveOutcome> {
        if self.progress.stage != GameStage::Active {
            return Ok(MoveOutcome::Ignored);
        }
        if self.progress.energy == 0 {
            self.fall_asleep();
            return Ok(MoveOutcome::FellAsleep);
        }

        let target = self.player.moved(direction);
        if !self.board.contains(target) {
            return Ok(MoveOutcome::Blocked);
        }

        self.progress.spend_energy();
        self.progress.steps += 1;
        self.player = target;
        self.on_player_enter(target)?;
        Ok(MoveOutcome::Moved)
    }

    /// Triggers the tile under the player again.
    pub fn interact(&mut self) -> SmoothlifeResult<()> {
        if self.progress.stage != GameStage::Active {
            return Ok(());
        }
        if self.progress.energy == 0 {
            self.fall_asleep();
            return Ok(());
        }
        self.on_player_enter(self.player)
    }

    /// Resolves the tile at `pos` after the player arrives there.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board.
    pub fn on_player_enter(&mut self, pos: Position) -> SmoothlifeResult<()> {
        if self.progress.stage != GameStage::Active {
            return Ok(());
        }

        let kind = self.board[pos].kind;
        match kind {
            TileKind::Empty => Ok(()),
            TileKind::Exit => self.leave_level(),
            _ => {
                self.apply_tile(pos);
                Ok(())
            }
        }
    }

    /// One tick of the energy decay timer. Returns true if anything changed.
    ///
    /// The tick that drains the last unit of energy ends the session.
    pub fn decay_tick(&mut self) -> bool {
        if self.progress.stage != GameStage::Active {
            return false;
        }
        self.progress.spend_energy();
        if self.progress.energy == 0 {
            self.fall_asleep();
        }
        true
    }

    /// Generates a fresh board for the current level index.
    ///
    /// On failure the current board stays in place.
    pub fn generate_level(&mut self) -> SmoothlifeResult<()> {
        let level = self.roll_level(self.progress.level_index)?;
        self.load_level(level);
        self.post_level_banner();
        Ok(())
    }

    fn roll_level(&mut self, level_index: u32) -> SmoothlifeResult<Level> {
        self.generator
            .generate(&self.config.generation, level_index, &mut self.rng)
    }

    /// Replaces the board and puts the player back at the start.
    pub fn load_level(&mut self, level: Level) {
        debug!(
            "Loading level {} with start surface {}",
            level.index, level.initial_surface
        );
        self.board = level.board;
        self.player = level.player_start;
        self.surface = level.initial_surface;
        self.goal = level.goal;
        self.progress.steps = 0;
    }

    fn post_level_banner(&mut self) {
        self.events.post(
            format!(
                "Level {}: polish {}.",
                self.progress.level_index + 1,
                self.surface
            ),
            LogTone::Neutral,
        );
    }

    fn apply_tile(&mut self, pos: Position) {
        let tile = self.board[pos];
        let before = self.roundness();

        match tile.apply(self.surface) {
            Ok(surface) => {
                self.surface = surface;
                self.board[pos].consume();
            }
            Err(TileError::InexactDivision { surface, divisor }) => {
                debug!("{} does not split into {} parts", surface, divisor);
                self.events
                    .post("The parts won't come apart cleanly.", LogTone::Bad);
                return;
            }
            Err(err) => {
                debug!("Tile {} refused: {}", tile, err);
                self.events.post("That would crack the piece.", LogTone::Bad);
                return;
            }
        }

        if let Some(text) = tile.kind.narration() {
            self.events.post(text, LogTone::Neutral);
        }

        let change = self.roundness() as i64 - before as i64;
        let (text, tone) = match change {
            2.. => ("Great, so smooth and shiny!", LogTone::Amazing),
            1 => ("Nice, it's getting smooth!", LogTone::Good),
            0 => ("No visible change.", LogTone::Neutral),
            -1 => ("Hmm, a bit rougher now.", LogTone::Bad),
            _ => ("Damn, what a mess!", LogTone::Bad),
        };
        self.events.post(text, tone);
    }

    /// Judges the surface at the exit.
    ///
    /// The next board is generated before any counter changes, so a failed
    /// generation leaves the session exactly as it was.
    fn leave_level(&mut self) -> SmoothlifeResult<()> {
        let r = self.roundness();
        let remaining = self.config.max_energy.saturating_sub(self.progress.steps);
        let score_delta = u64::from(r + self.progress.level_index) * u64::from(remaining);
        let reward = self.config.energy_reward(r);

        if r == 0 {
            let last_life = self.progress.lives <= 1;
            let retry = if last_life {
                None
            } else {
                Some(self.roll_level(self.progress.level_index)?)
            };

            self.progress.lose_life();
            self.progress.restore_energy(reward, self.config.max_energy);
            self.events.post("Still rough. Start over.", LogTone::Bad);
            info!(
                "Left level {} with a rough surface {}, {} lives left",
                self.progress.level_index, self.surface, self.progress.lives
            );

            match retry {
                Some(level) => {
                    self.load_level(level);
                    self.post_level_banner();
                }
                None => {
                    self.progress.stage = self.progress.stage.next();
                    info!("Out of lives, session over");
                }
            }
            return Ok(());
        }

        let next = self.roll_level(self.progress.level_index + 1)?;

        self.progress.restore_energy(reward, self.config.max_energy);
        self.progress.score += score_delta;
        let (text, tone) = match r {
            1 => ("Smooth enough.", LogTone::Good),
            2 => ("Fine work!", LogTone::Good),
            _ => ("A masterpiece!", LogTone::Amazing),
        };
        self.events
            .post(format!("{} +{} points", text, score_delta), tone);
        info!(
            "Finished level {} with roundness {} for {} points",
            self.progress.level_index, r, score_delta
        );

        self.progress.advance_level();
        self.load_level(next);
        self.post_level_banner();
        Ok(())
    }

    fn fall_asleep(&mut self) {
        self.progress.stage = self.progress.stage.next();
        self.events
            .post("Out of energy, you fall asleep at the bench.", LogTone::Bad);
        info!("Player fell asleep with score {}", self.progress.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OperatorTile, SmoothlifeError};

    fn active_session() -> GameSession {
        let mut session = GameSession::new(GameConfig::for_testing(12345)).unwrap();
        while session.advance_stage() != GameStage::Active {}
        session.board = Board::new(7, 5);
        session.board.set(Position::new(6, 4), OperatorTile::exit());
        session.player = Position::origin();
        session
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(GameConfig::for_testing(1)).unwrap();
        assert_eq!(session.stage(), GameStage::Intro);
        assert_eq!(session.progress.energy, 100);
        assert_eq!(session.progress.lives, 3);
        assert_eq!(session.roundness(), 0);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_dialog_stages_need_continue() {
        let mut session = GameSession::new(GameConfig::for_testing(1)).unwrap();
        assert_eq!(session.try_move(Direction::East).unwrap(), MoveOutcome::Ignored);
        assert_eq!(session.advance_stage(), GameStage::TutorialMoves);
        assert_eq!(session.advance_stage(), GameStage::TutorialExit);
        assert_eq!(session.advance_stage(), GameStage::Active);
        // continue does nothing during play
        assert_eq!(session.advance_stage(), GameStage::Active);
    }

    #[test]
    fn test_move_spends_energy() {
        let mut session = active_session();
        assert_eq!(session.try_move(Direction::East).unwrap(), MoveOutcome::Moved);
        assert_eq!(session.player, Position::new(1, 0));
        assert_eq!(session.progress.energy, 99);
        assert_eq!(session.progress.steps, 1);
    }

    #[test]
    fn test_move_off_board_is_blocked() {
        let mut session = active_session();
        assert_eq!(session.try_move(Direction::North).unwrap(), MoveOutcome::Blocked);
        assert_eq!(session.try_move(Direction::West).unwrap(), MoveOutcome::Blocked);
        assert_eq!(session.player, Position::origin());
        assert_eq!(session.progress.energy, 100);
        assert_eq!(session.progress.steps, 0);
    }

    #[test]
    fn test_operator_tile_is_single_use() {
        let mut session = active_session();
        session.surface = 95;
        session.board.set(Position::new(1, 0), OperatorTile::add(5));

        session.try_move(Direction::East).unwrap();
        assert_eq!(session.surface, 100);
        assert!(session.board[Position::new(1, 0)].is_empty());

        let texts: Vec<_> = session.events.entries().map(|e| e.text.clone()).collect();
        assert_eq!(texts[0], "Great, so smooth and shiny!");
        assert_eq!(texts[1], "Add polishing paste.");

        session.try_move(Direction::West).unwrap();
        session.try_move(Direction::East).unwrap();
        assert_eq!(session.surface, 100);
    }

    #[test]
    fn test_roughening_is_reported() {
        let mut session = active_session();
        session.surface = 100;
        session.board.set(Position::new(1, 0), OperatorTile::add(1));
        session.try_move(Direction::East).unwrap();
        let latest = session.events.latest().unwrap();
        assert_eq!(latest.text, "Damn, what a mess!");
        assert_eq!(latest.tone, LogTone::Bad);
    }

    #[test]
    fn test_inexact_division_leaves_tile() {
        let mut session = active_session();
        session.surface = 101;
        session.board.set(Position::new(1, 0), OperatorTile::divide(2));
        session.try_move(Direction::East).unwrap();
        assert_eq!(session.surface, 101);
        assert_eq!(session.board[Position::new(1, 0)], OperatorTile::divide(2));
        assert_eq!(session.events.latest().unwrap().tone, LogTone::Bad);
    }

    #[test]
    fn test_interact_retriggers_exit() {
        let mut session = active_session();
        session.player = Position::new(6, 4);
        session.surface = 10;
        session.interact().unwrap();
        assert_eq!(session.progress.level_index, 1);
        assert_eq!(session.player, session.level_start());
    }

    #[test]
    fn test_decay_tick_only_while_active() {
        let mut session = GameSession::new(GameConfig::for_testing(5)).unwrap();
        assert!(!session.decay_tick());
        assert_eq!(session.progress.energy, 100);

        while session.advance_stage() != GameStage::Active {}
        assert!(session.decay_tick());
        assert_eq!(session.progress.energy, 99);
    }

    #[test]
    fn test_decay_tick_draining_last_energy_ends_session() {
        let mut session = active_session();
        session.progress.energy = 1;
        assert!(session.decay_tick());
        assert_eq!(session.progress.energy, 0);
        assert_eq!(session.stage(), GameStage::Ending);
    }

    /// A 3x3 session on a prepared level. The board fits early chains but not the
    /// eight-tile chains the default settings reach from level 15 on.
    fn cramped_session(level_index: u32) -> GameSession {
        let config = GameConfig {
            board_width: 3,
            board_height: 3,
            ..GameConfig::new(21)
        };
        let mut board = Board::new(3, 3);
        board.set(Position::new(2, 2), OperatorTile::exit());
        let level = Level {
            index: level_index,
            board,
            initial_surface: 7,
            goal: 10,
            player_start: Position::origin(),
            exit: Position::new(2, 2),
            chain: Vec::new(),
            attempts: 1,
        };

        let mut session = GameSession::with_level(config, level);
        while session.advance_stage() != GameStage::Active {}
        session.progress.level_index = level_index;
        session.player = Position::new(1, 2);
        session
    }

    #[test]
    fn test_failed_generation_on_round_exit_changes_nothing() {
        let mut session = cramped_session(14);
        session.surface = 100;

        let result = session.try_move(Direction::East);
        assert!(matches!(result, Err(SmoothlifeError::GenerationFailed(_))));
        assert_eq!(session.progress.level_index, 14);
        assert_eq!(session.progress.score, 0);
        assert_eq!(session.progress.energy, 99);
        assert_eq!(session.progress.lives, 3);
        assert_eq!(session.surface, 100);
        assert_eq!(session.player, Position::new(2, 2));
        assert!(session.board[Position::new(2, 2)].is_exit());
        assert_eq!(session.stage(), GameStage::Active);

        // delivering again tries again, with the same result
        assert!(session.interact().is_err());
        assert_eq!(session.progress.score, 0);
    }

    #[test]
    fn test_failed_generation_on_rough_exit_keeps_lives() {
        let mut session = cramped_session(15);

        let result = session.try_move(Direction::East);
        assert!(matches!(result, Err(SmoothlifeError::GenerationFailed(_))));
        assert_eq!(session.progress.lives, 3);
        assert_eq!(session.progress.level_index, 15);
        assert_eq!(session.stage(), GameStage::Active);
    }

    #[test]
    fn test_rough_exit_on_last_life_needs_no_new_board() {
        let mut session = cramped_session(15);
        session.progress.lives = 1;

        session.try_move(Direction::East).unwrap();
        assert_eq!(session.progress.lives, 0);
        assert_eq!(session.stage(), GameStage::Ending);
    }

    #[test]
    fn test_board_must_fit_longest_chain() {
        let config = GameConfig {
            board_width: 3,
            board_height: 3,
            ..GameConfig::new(21)
        };
        // the first level would fit, level 15 would not
        assert_eq!(config.generation.chain_length_for(0), 3);
        let result = GameSession::new(config);
        assert!(matches!(result, Err(SmoothlifeError::GenerationFailed(_))));

        let roomy = GameConfig {
            board_width: 5,
            board_height: 2,
            ..GameConfig::new(21)
        };
        assert!(GameSession::new(roomy).is_ok());
    }

    #[test]
    fn test_decay_tick_at_zero_ends_session() {
        let mut session = active_session();
        session.progress.energy = 0;
        assert!(session.decay_tick());
        assert_eq!(session.stage(), GameStage::Ending);
        assert_eq!(session.outcome(), Some(Outcome::Lost));
        assert!(!session.decay_tick());
    }

    #[test]
    fn test_execute_dispatch() {
        let mut session = GameSession::new(GameConfig::for_testing(9)).unwrap();
        for _ in 0..3 {
            session.execute(Command::AdvanceStage).unwrap();
        }
        session.board = Board::new(7, 5);
        session.board.set(Position::new(6, 4), OperatorTile::exit());
        session.execute(Command::Move(Direction::South)).unwrap();
        assert_eq!(session.player, Position::new(0, 1));
        session.execute(Command::DecayTick).unwrap();
        assert_eq!(session.progress.energy, 98);
        session.execute(Command::Quit).unwrap();
        assert_eq!(session.stage(), GameStage::Active);
    }
}
