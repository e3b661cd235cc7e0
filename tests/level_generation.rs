//! Integration tests for level generation invariants and the fixed-roll fixture.

use smoothlife::generation::utils::create_rng;
use smoothlife::{
    roundness, ChainLink, GenerationConfig, Generator, Level, LevelGenerator, OperatorTile,
    Position, ScriptedRolls, SmoothlifeError, TileKind,
};

/// Rolls for a 7x5 board at level 0 with the default settings.
///
/// The first attempt builds 100 -> 200 -> 1000 -> 250 and is rejected because 250 is
/// already round. The second builds 300 -> 293 -> 586 -> 293 and is kept.
const FIXTURE_ROLLS: [i64; 29] = [
    1, // goal digit
    3, 2, 1, 1, // ÷2 at (1,1)
    3, 5, 2, 2, // ÷5 at (2,2)
    2, 4, 3, 3, // ×4 at (3,3)
    3, // goal digit
    0, 7, 2, 1, // +7 at (2,1)
    3, 2, 4, 3, // ÷2 at (4,3)
    2, 4, 2, 0, 0, 5, 2, // ×4 redrawn to ×2, (0,0) taken, placed at (5,2)
];

fn fixture_level() -> (Level, ScriptedRolls) {
    let config = GenerationConfig::default();
    let mut rolls = ScriptedRolls::new(FIXTURE_ROLLS);
    let level = LevelGenerator::new(7, 5)
        .generate(&config, 0, &mut rolls)
        .unwrap();
    (level, rolls)
}

#[test]
fn test_fixture_layout() {
    let (level, rolls) = fixture_level();

    assert!(rolls.is_exhausted());
    assert_eq!(level.attempts, 2);
    assert_eq!(level.goal, 300);
    assert_eq!(level.initial_surface, 293);
    assert_eq!(level.player_start, Position::new(0, 0));
    assert_eq!(level.exit, Position::new(6, 4));

    let expected = [
        (Position::new(2, 1), OperatorTile::add(7)),
        (Position::new(4, 3), OperatorTile::divide(2)),
        (Position::new(5, 2), OperatorTile::multiply(2)),
        (Position::new(6, 4), OperatorTile::exit()),
    ];
    for (pos, tile) in expected {
        assert_eq!(level.board[pos], tile, "tile at {:?}", pos);
    }
    assert_eq!(level.board.occupied_count(), expected.len());

    let chain: Vec<ChainLink> = level.chain.clone();
    assert_eq!(
        chain.iter().map(|link| link.position).collect::<Vec<_>>(),
        vec![Position::new(2, 1), Position::new(4, 3), Position::new(5, 2)]
    );
}

#[test]
fn test_fixture_solution_order() {
    let (level, _) = fixture_level();
    let mut surface = level.initial_surface;
    let mut visited = Vec::new();
    for link in level.solution() {
        surface = link.tile.apply(surface).unwrap();
        visited.push(surface);
    }
    assert_eq!(visited, vec![586, 293, 300]);
    assert_eq!(roundness(surface, 10), 2);
}

#[test]
fn test_attempt_cap_reports_failure() {
    let config = GenerationConfig {
        max_generation_attempts: 1,
        ..GenerationConfig::default()
    };
    let mut rolls = ScriptedRolls::new(FIXTURE_ROLLS[..13].iter().copied());
    let result = LevelGenerator::new(7, 5).generate(&config, 0, &mut rolls);

    assert!(matches!(result, Err(SmoothlifeError::GenerationFailed(_))));
    assert!(rolls.is_exhausted());
}

#[test]
fn test_thousand_levels_hold_invariants() {
    let config = GenerationConfig::new(20_240_611);
    let generator = LevelGenerator::new(7, 5);
    let mut rng = create_rng(&config);

    for level_index in 0..1000 {
        let level = generator.generate(&config, level_index, &mut rng).unwrap();

        assert_eq!(roundness(level.initial_surface, config.base), 0);
        assert_ne!(level.player_start, level.exit);
        assert_eq!(level.board.positions_of(TileKind::Exit), vec![level.exit]);
        assert!(level.board[level.player_start].is_empty());

        // one cell per chain tile, plus the exit
        assert_eq!(
            level.chain.len(),
            config.chain_length_for(level_index),
            "level {}",
            level_index
        );
        assert_eq!(level.board.occupied_count(), level.chain.len() + 1);
        for link in &level.chain {
            assert_ne!(link.position, level.player_start);
            assert_ne!(link.position, level.exit);
            assert!(link.tile.operand >= config.min_operand);
            assert!(link.tile.operand <= config.max_operand);
        }
    }
}

#[test]
fn test_levels_get_longer_and_rounder() {
    let config = GenerationConfig::new(5);
    let generator = LevelGenerator::new(7, 5);
    let mut rng = create_rng(&config);

    let first = generator.generate(&config, 0, &mut rng).unwrap();
    let later = generator.generate(&config, 9, &mut rng).unwrap();

    assert_eq!(roundness(first.goal, 10), 2);
    assert_eq!(roundness(later.goal, 10), 5);
    assert_eq!(first.chain.len(), 3);
    assert_eq!(later.chain.len(), 6);
}

#[test]
fn test_same_seed_reproduces_sequence() {
    let config = GenerationConfig::new(8128);
    let generator = LevelGenerator::new(7, 5);

    let mut first_rng = create_rng(&config);
    let mut second_rng = create_rng(&config);
    for level_index in 0..20 {
        let a = generator.generate(&config, level_index, &mut first_rng).unwrap();
        let b = generator.generate(&config, level_index, &mut second_rng).unwrap();
        assert_eq!(a, b);
    }
}
