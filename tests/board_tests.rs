//! Board rule verification tests.
//!
//! Scenario tests for the pattern library, the mutation ops and a full
//! controller turn, built from text layouts so every board is exact.

use match3_engine::{
    Board, BoardConfig, ConfigError, GemType, MatchLine, Offset, Orientation, PatternSpec, Position,
    RandomSource, SpecialKey,
};

fn layout(rows: &[&str]) -> Board {
    let config = BoardConfig::new(rows.len() as i32, rows[0].len() as i32);
    Board::from_rows_seeded(config, rows, 42).unwrap()
}

/// Replays a fixed script of draws, then repeats the last one.
#[derive(Clone, Debug)]
struct ScriptedRng {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    fn new(draws: &[usize]) -> Self {
        Self {
            draws: draws.to_vec(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn gen_index(&mut self, len: usize) -> usize {
        let draw = self.draws[self.cursor.min(self.draws.len() - 1)];
        self.cursor += 1;
        draw % len
    }
}

// =============================================================================
// Pattern Expansion
// =============================================================================

fn pairs(line: &MatchLine) -> Vec<Vec<(i32, i32)>> {
    line.windows()
        .iter()
        .map(|window| window.iter().map(|o| (o.col, o.row)).collect())
        .collect()
}

#[test]
fn test_horizontal_line_windows() {
    let line = MatchLine::new(-2, 0, 3, Orientation::Horizontal).unwrap();

    assert_eq!(
        pairs(&line),
        vec![
            vec![(-2, 0), (-1, 0), (0, 0)],
            vec![(-1, 0), (0, 0), (1, 0)],
            vec![(0, 0), (1, 0), (2, 0)],
        ]
    );
}

#[test]
fn test_square_windows() {
    let line = MatchLine::new(-1, -1, 2, Orientation::Both).unwrap();

    assert_eq!(
        pairs(&line),
        vec![
            vec![(-1, -1), (0, -1), (-1, 0), (0, 0)],
            vec![(0, -1), (1, -1), (0, 0), (1, 0)],
            vec![(-1, 0), (0, 0), (-1, 1), (0, 1)],
            vec![(0, 0), (1, 0), (0, 1), (1, 1)],
        ]
    );
}

#[test]
fn test_every_window_contains_origin() {
    for (col, row, magnitude, orientation) in [
        (-4, 0, 5, Orientation::Horizontal),
        (0, -3, 4, Orientation::Vertical),
        (-1, -1, 2, Orientation::Both),
    ] {
        let line = MatchLine::new(col, row, magnitude, orientation).unwrap();
        assert!(line
            .windows()
            .iter()
            .all(|window| window.iter().any(|offset| offset.is_origin())));
    }
}

#[test]
fn test_windows_outside_origin_are_dropped() {
    let forward = MatchLine::new(0, 0, 3, Orientation::Horizontal).unwrap();
    assert_eq!(pairs(&forward), vec![vec![(0, 0), (1, 0), (2, 0)]]);

    let far = MatchLine::new(-4, 0, 3, Orientation::Horizontal).unwrap();
    assert_eq!(pairs(&far), vec![vec![(-2, 0), (-1, 0), (0, 0)]]);
}

#[test]
fn test_oversized_line_is_rejected() {
    let err = MatchLine::new(0, 0, 3_000_000_000, Orientation::Horizontal).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedPattern(_)));
}

#[test]
fn test_board_with_forward_pattern() {
    let config = BoardConfig::new(1, 3).with_patterns([PatternSpec {
        col_offset: 0,
        row_offset: 0,
        magnitude: 3,
        orientation: Orientation::Horizontal,
    }]);
    let mut board = Board::from_rows_seeded(config, &["RRR"], 11).unwrap();

    let groups = board.match_lines(0, 0);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert!(groups[0].promoted.is_none());
    assert_eq!(board.to_string(), "...");
}

// =============================================================================
// Swap
// =============================================================================

#[test]
fn test_swap_preserves_ids_and_is_reversible() {
    let mut board = layout(&["RGB", "YPO"]);
    let before = board.clone();
    let a = Position::new(0, 1);
    let b = Position::new(1, 1);
    let green = board.tile_at(a).unwrap().id;
    let purple = board.tile_at(b).unwrap().id;

    let moved = board.swap(a, b);

    assert_eq!(moved[0].id, green);
    assert_eq!(moved[1].id, purple);
    assert_eq!(board.tile_at(b).unwrap().id, green);
    assert_eq!(board.tile_at(a).unwrap().id, purple);

    board.swap(a, b);
    assert_eq!(board.grid(), before.grid());
}

#[test]
fn test_swap_then_match() {
    let mut board = layout(&["RRGR", "BGBY"]);

    assert!(board.can_swap(Position::new(0, 2), Position::new(0, 3)));
    board.swap(Position::new(0, 2), Position::new(0, 3));
    let groups = board.match_lines(1, 0);

    assert_eq!(groups.len(), 1);
    assert_eq!(board.to_string(), "...G\nBGBY");
}

// =============================================================================
// Make Block
// =============================================================================

#[test]
fn test_block_budget_is_monotonic() {
    let mut board = layout(&["@RGBYPRG"]);
    let source = Position::new(0, 0);
    let mut last = board.tile_at(source).unwrap().endurance_for_block;

    for col in 1..8 {
        board.make_block(source, Position::new(0, col));
        let budget = board.tile_at(source).unwrap().endurance_for_block;
        assert!(budget <= last);
        last = budget;
    }

    assert_eq!(last, 0);
    assert_eq!(board.to_string(), "#####PRG");
}

#[test]
fn test_exhausted_block_stops_spreading() {
    let config = BoardConfig::new(1, 3).with_block_budget(1);
    let mut board = Board::from_rows_seeded(config, &["R@G"], 1).unwrap();
    let source = Position::new(0, 1);

    assert_eq!(board.make_block(source, Position::new(0, 0)).len(), 2);
    assert!(board.make_block(source, Position::new(0, 2)).is_empty());
    assert_eq!(board.to_string(), "##G");
}

// =============================================================================
// Crunch
// =============================================================================

#[test]
fn test_crunch_terminates_after_endurance() {
    let mut board = layout(&["@RGBYP"]);
    let choco = board.tile_at(Position::new(0, 0)).unwrap().id;

    let mut relocations = 0;
    for col in 0..5 {
        let crunched = board
            .crunch(Position::new(0, col), Position::new(0, col + 1))
            .unwrap();
        assert_eq!(crunched.source.id, choco);
        if !crunched.removed.is_empty() {
            relocations += 1;
        }
    }

    assert_eq!(relocations, 4);
    assert_eq!(board.to_string(), ".....P");
}

// =============================================================================
// Initial Fill
// =============================================================================

#[test]
fn test_fill_is_match_free() {
    let config = BoardConfig::new(8, 10)
        .with_border(1)
        .with_fixed(Position::new(3, 3))
        .with_cell(Position::new(0, 4), GemType::Spawner);

    for seed in 0..10 {
        let mut board = Board::with_seed(config.clone(), seed).unwrap();
        board.put_initial_gems().unwrap();

        assert!(board.scan_matches().is_empty());
        for pos in board.grid().shape().positions() {
            let gem = board.tile_at(pos).unwrap();
            assert_eq!(gem.gem_type.is_colored(), board.grid().shape().is_movable_index(pos));
        }
    }
}

#[test]
fn test_single_type_fill_is_fatal() {
    let config = BoardConfig::new(1, 3).with_matching_types([GemType::Red]);
    let mut board = Board::with_seed(config, 7).unwrap();

    let err = board.put_initial_gems().unwrap_err();

    assert_eq!(err, ConfigError::Unsatisfiable(Position::new(0, 2)));
    assert!(err.to_string().contains("(0, 2)"));
}

#[test]
fn test_seeded_fill_is_reproducible() {
    let fill = |seed| {
        let mut board = Board::with_seed(BoardConfig::default(), seed).unwrap();
        board.put_initial_gems().unwrap();
        board.to_string()
    };

    assert_eq!(fill(99), fill(99));
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_single_type_row_makes_one_super() {
    let mut board = layout(&["RRRRR"]);

    let groups = board.match_lines(0, 0);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 5);
    let promoted = groups[0].promoted.as_ref().unwrap();
    assert_eq!(promoted.gem_type, GemType::Super);
    assert_eq!(board.grid().empty_count(), 4);
}

#[test]
fn test_scan_is_idempotent() {
    let board = layout(&["RRRG", "BRYG", "BRYG", "PPOB"]);

    let first = board.scan_matches();
    let second = board.scan_matches();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(!first[0].intersects(&first[1]));
}

#[test]
fn test_match_lines_is_reproducible() {
    let rows = ["RRRRG", "BGYBY"];
    let mut first = layout(&rows);
    let mut second = layout(&rows);

    let first_groups = first.match_lines(1, 0);
    let second_groups = second.match_lines(1, 0);

    assert_eq!(first_groups, second_groups);
    assert_eq!(first.to_string(), second.to_string());

    let promoted = first_groups[0].promoted.as_ref().unwrap();
    let again = second_groups[0].promoted.as_ref().unwrap();
    assert_eq!(promoted.gem_type, GemType::Red);
    assert_eq!(promoted.special_key, Some(SpecialKey::Horizontal));
    assert_eq!(promoted.position, Position::new(0, 3));
    assert_eq!(
        (again.gem_type, again.special_key, again.position),
        (promoted.gem_type, promoted.special_key, promoted.position)
    );
}

#[test]
fn test_cross_group() {
    let mut board = layout(&["RRR", "BRG", "YRB"]);

    let groups = board.match_lines(0, 0);

    let promoted = groups[0].promoted.as_ref().unwrap();
    assert_eq!(promoted.gem_type, GemType::Red);
    assert_eq!(promoted.special_key, Some(SpecialKey::Cross));
}

#[test]
fn test_four_orientation_follows_swap() {
    let mut horizontal = layout(&["GGGG"]);
    let groups = horizontal.match_lines(1, 0);
    assert_eq!(groups[0].promoted.as_ref().unwrap().special_key, Some(SpecialKey::Horizontal));

    let mut vertical = layout(&["GGGG"]);
    let groups = vertical.match_lines(0, 1);
    assert_eq!(groups[0].promoted.as_ref().unwrap().special_key, Some(SpecialKey::Vertical));
}

// =============================================================================
// Spawn & Gravity
// =============================================================================

#[test]
fn test_feed_uses_random_source() {
    let config = BoardConfig::new(2, 1).with_matching_types([GemType::Red, GemType::Blue, GemType::Green]);
    let mut board = Board::from_rows(config, &["S", "."], ScriptedRng::new(&[2])).unwrap();

    let fed = board.feed();

    assert_eq!(fed[0].gem_type, GemType::Green);
}

#[test]
fn test_fall_reaches_fixed_point() {
    let mut board = layout(&["RGB.", ".#..", "Y...", "...."]);

    let mut ticks = 0;
    while !board.fall().is_empty() {
        ticks += 1;
        assert!(ticks < 32);
    }

    assert!(!board.has_pending_fall());
    assert_eq!(board.grid().empty_count(), 11);
}

#[test]
fn test_sideways_gravity_settles_against_wall() {
    let config = BoardConfig::new(2, 3).with_gravity(Offset::new(-1, 0));
    let mut board = Board::from_rows_seeded(config, &["..R", ".G."], 3).unwrap();

    while board.has_pending_fall() {
        board.fall();
    }

    assert_eq!(board.to_string(), "R..\nG..");
}

// =============================================================================
// Full Turn
// =============================================================================

#[test]
fn test_full_turn_cycle() {
    let config = BoardConfig::new(7, 7)
        .with_border(1)
        .with_cell(Position::new(0, 2), GemType::Spawner)
        .with_cell(Position::new(0, 4), GemType::Spawner);
    let mut board = Board::with_seed(config, 2024).unwrap();
    board.put_initial_gems().unwrap();

    for _ in 0..5 {
        let Some(&(a, b)) = board.legal_swaps().first() else {
            break;
        };
        board.swap(a, b);
        let delta = a.delta_to(b);
        let mut groups = board.match_lines(delta.col, delta.row);
        assert!(!groups.is_empty());

        // Cascade until the board is quiet.
        while !groups.is_empty() {
            let mut ticks = 0;
            while !board.is_settled() {
                board.feed();
                board.fall();
                ticks += 1;
                assert!(ticks < 200);
            }
            groups = board.match_lines(0, 0);
        }
        board.advance_turn();
    }

    for gem in board.grid().iter() {
        assert_eq!(board.tile_at(gem.position).unwrap().id, gem.id);
    }
}
