//! # Level Generation
//!
//! Builds a board by walking backwards from a round goal value.
//!
//! Each attempt:
//! 1. reserves the player start corner and the opposite exit corner,
//! 2. rolls a goal `digit * base^exponent`, where the exponent grows with the level tier,
//! 3. places the operator chain one tile at a time, applying each tile's inverse to the
//!    working value,
//! 4. rejects the whole board if the resulting start value is already round.
//!
//! Applying the chain forwards in reverse build order takes the start value back to the
//! goal. Other orders may or may not; the player has to find a good route.

use crate::{
    roundness, Board, GenerationConfig, Generator, OperatorTile, Position, RandomSource,
    SmoothlifeError, SmoothlifeResult, Surface, TileKind,
};
use log::{debug, warn};

/// One operator tile placed during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    pub position: Position,
    pub tile: OperatorTile,
}

/// A generated level, ready to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// Level index this board was generated for
    pub index: u32,
    /// Tile layout, including the exit
    pub board: Board,
    /// Rough surface value the player starts with
    pub initial_surface: Surface,
    /// Round value the chain was built from
    pub goal: Surface,
    /// Where the player starts
    pub player_start: Position,
    /// Where the exit sits
    pub exit: Position,
    /// Operator tiles in the order they were placed
    pub chain: Vec<ChainLink>,
    /// Whole-board attempts it took to find this level
    pub attempts: u32,
}

impl Level {
    /// The chain in the order that restores the goal exactly.
    pub fn solution(&self) -> impl Iterator<Item = &ChainLink> {
        self.chain.iter().rev()
    }
}

/// Generator placing a reverse-built operator chain on a rectangular board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGenerator {
    pub width: usize,
    pub height: usize,
}

impl LevelGenerator {
    /// Creates a generator for boards of the given size.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::{roundness, GenerationConfig, Generator, LevelGenerator};
    /// use smoothlife::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::new(7);
    /// let generator = LevelGenerator::new(7, 5);
    /// let level = generator.generate(&config, 0, &mut create_rng(&config)).unwrap();
    /// assert_eq!(roundness(level.initial_surface, 10), 0);
    /// assert!(level.board[level.exit].is_exit());
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Creates a generator for the default board size.
    pub fn for_testing() -> Self {
        Self::new(
            crate::config::DEFAULT_BOARD_WIDTH,
            crate::config::DEFAULT_BOARD_HEIGHT,
        )
    }

    /// The corner the player starts every level in.
    pub fn player_start(&self) -> Position {
        Position::origin()
    }

    /// The corner opposite the player start.
    pub fn exit_position(&self) -> Position {
        Position::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    fn offset(&self, pos: Position) -> usize {
        pos.x as usize + self.width * pos.y as usize
    }

    /// Checks that the board can hold a start, an exit and a chain of `chain_length`.
    pub fn check_fits(&self, chain_length: usize) -> SmoothlifeResult<()> {
        if self.width == 0 || self.height == 0 || self.width * self.height < 2 {
            return Err(SmoothlifeError::GenerationFailed(format!(
                "a {}x{} board has no room for both a start and an exit",
                self.width, self.height
            )));
        }
        let free_cells = self.width * self.height - 2;
        if chain_length > free_cells {
            return Err(SmoothlifeError::GenerationFailed(format!(
                "a chain of {} tiles does not fit the {} free cells of a {}x{} board",
                chain_length, free_cells, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Rolls the round value the chain is built back from.
    fn roll_goal<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        level_index: u32,
        rng: &mut R,
    ) -> SmoothlifeResult<Surface> {
        let digit = rng.roll(config.min_goal_digit, config.max_goal_digit);
        let exponent = config.exponent_for(level_index);

        config
            .base
            .checked_pow(exponent)
            .and_then(|scale| scale.checked_mul(digit))
            .ok_or_else(|| {
                SmoothlifeError::GenerationFailed(format!(
                    "goal {} * {}^{} does not fit a surface value",
                    digit, config.base, exponent
                ))
            })
    }

    /// Draws a multiply operand that divides `working`.
    ///
    /// Redraws up to `max_operand_resamples` times, then picks among the operands that
    /// are known to divide. Returns None only if no operand in range divides.
    fn roll_multiply_operand<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        first_draw: Surface,
        working: Surface,
        rng: &mut R,
    ) -> Option<Surface> {
        let mut operand = first_draw;
        let mut resamples = 0;
        while working % operand != 0 {
            if resamples == config.max_operand_resamples {
                let divisors: Vec<Surface> = (config.min_operand..=config.max_operand)
                    .filter(|d| working % d == 0)
                    .collect();
                if divisors.is_empty() {
                    return None;
                }
                let pick = rng.roll(0, divisors.len() as i64 - 1);
                return Some(divisors[pick as usize]);
            }
            operand = rng.roll(config.min_operand, config.max_operand);
            resamples += 1;
        }
        Some(operand)
    }

    /// Probes random cells until a free one turns up.
    fn roll_free_cell<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        occupied: &[bool],
        rng: &mut R,
    ) -> Option<Position> {
        for _ in 0..config.max_cell_attempts {
            let x = rng.roll(0, self.width as i64 - 1);
            let y = rng.roll(0, self.height as i64 - 1);
            let pos = Position::new(x as i32, y as i32);
            if !occupied[self.offset(pos)] {
                return Some(pos);
            }
        }
        None
    }

    /// Makes one attempt at a level. Ok(None) means the attempt was rejected.
    fn try_generate<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        level_index: u32,
        chain_length: usize,
        rng: &mut R,
    ) -> SmoothlifeResult<Option<Level>> {
        let mut board = Board::new(self.width, self.height);
        let mut occupied = vec![false; self.width * self.height];

        let player_start = self.player_start();
        let exit = self.exit_position();
        occupied[self.offset(player_start)] = true;
        occupied[self.offset(exit)] = true;
        board.set(exit, OperatorTile::exit());

        let goal = self.roll_goal(config, level_index, rng)?;
        let mut working = goal;
        let mut chain = Vec::with_capacity(chain_length);

        for _ in 0..chain_length {
            let kind = TileKind::OPERATORS[rng.roll(0, 3) as usize];
            let mut operand = rng.roll(config.min_operand, config.max_operand);

            if kind == TileKind::Multiply {
                match self.roll_multiply_operand(config, operand, working, rng) {
                    Some(divisor) => operand = divisor,
                    None => {
                        debug!("No multiply operand divides {}", working);
                        return Ok(None);
                    }
                }
            }

            let Some(position) = self.roll_free_cell(config, &occupied, rng) else {
                debug!(
                    "No free cell found in {} probes",
                    config.max_cell_attempts
                );
                return Ok(None);
            };

            let tile = OperatorTile::new(kind, operand);
            board.set(position, tile);
            occupied[self.offset(position)] = true;
            chain.push(ChainLink { position, tile });

            working = match tile.inverse().apply(working) {
                Ok(value) => value,
                Err(err) => {
                    debug!("Roughening with {:?} failed: {}", tile.inverse(), err);
                    return Ok(None);
                }
            };
        }

        if roundness(working, config.base) > 0 {
            debug!(
                "Start value {} is already round (goal {}), rejecting board",
                working, goal
            );
            return Ok(None);
        }

        Ok(Some(Level {
            index: level_index,
            board,
            initial_surface: working,
            goal,
            player_start,
            exit,
            chain,
            attempts: 0,
        }))
    }
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::for_testing()
    }
}

impl Generator<Level> for LevelGenerator {
    fn generate<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        level_index: u32,
        rng: &mut R,
    ) -> SmoothlifeResult<Level> {
        config.validate()?;
        let chain_length = config.chain_length_for(level_index);
        self.check_fits(chain_length)?;

        for attempt in 1..=config.max_generation_attempts {
            if let Some(mut level) = self.try_generate(config, level_index, chain_length, rng)? {
                level.attempts = attempt;
                self.validate(&level, config)?;
                debug!(
                    "Generated level {} in {} attempt(s): start {} goal {} chain {}",
                    level_index, attempt, level.initial_surface, level.goal, chain_length
                );
                return Ok(level);
            }
        }

        warn!(
            "Giving up on level {} after {} attempts",
            level_index, config.max_generation_attempts
        );
        Err(SmoothlifeError::GenerationFailed(format!(
            "no playable level {} after {} attempts",
            level_index, config.max_generation_attempts
        )))
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> SmoothlifeResult<()> {
        let fail = |reason: String| Err(SmoothlifeError::GenerationFailed(reason));

        if level.player_start == level.exit {
            return fail("player start and exit share a cell".to_string());
        }
        let exits = level.board.positions_of(TileKind::Exit);
        if exits != vec![level.exit] {
            return fail(format!("expected one exit at {:?}, found {:?}", level.exit, exits));
        }
        if !level.board[level.player_start].is_empty() {
            return fail("player start cell is not empty".to_string());
        }
        if level.board.occupied_count() != level.chain.len() + 1 {
            return fail("chain tiles overlap".to_string());
        }
        if let Some(link) = level
            .chain
            .iter()
            .find(|link| level.board[link.position] != link.tile)
        {
            return fail(format!("chain tile at {:?} is missing", link.position));
        }
        if roundness(level.initial_surface, config.base) != 0 {
            return fail(format!("start value {} is already round", level.initial_surface));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "LevelGenerator"
    }
}
