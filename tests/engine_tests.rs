//! Integration tests for the reedbed engine and its search strategies.
//!
//! Each section exercises one slice of the rules: tile rotation, placement
//! legality, the house pools, village detection across tile boundaries,
//! end-of-game detection with its tie-breaks, and the guarantee that every
//! strategy only ever returns enumerated legal moves.

use std::time::Duration;

use reedbed::catalog::builtin_catalog;
use reedbed::constants::HOUSE_POOL;
use reedbed::game::GameState;
use reedbed::moves::{legal_moves, Move};
use reedbed::strategy::{BotConfig, Strategy, StrategyKind};
use reedbed::tile::{PlayerColor, Tile, TileId};

// =============================================================================
// Helpers for building test tiles and games
// =============================================================================

/// Build a tile from 0/1 rows, padding with water cells to a square grid
/// the way the catalog loader does.
fn tile_from(id: TileId, name: &str, rows: Vec<Vec<u8>>) -> Tile {
    let side = rows.len().max(rows[0].len());
    let mut shape = vec![vec![false; side]; side];
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            shape[r][c] = v == 1;
        }
    }
    Tile::new(id, name, shape)
}

/// A 2-cell domino: `[[1, 1]]`.
fn domino(id: TileId) -> Tile {
    tile_from(id, "domino", vec![vec![1, 1]])
}

/// A 3-cell bar: `[[1, 1, 1]]`.
fn bar(id: TileId) -> Tile {
    tile_from(id, "bar", vec![vec![1, 1, 1]])
}

// =============================================================================
// Rotation
// =============================================================================

#[test]
fn test_rotate_four_times_restores_tile() {
    let mut game = GameState::new(vec![tile_from(0, "corner", vec![vec![1, 0], vec![1, 1]])]);
    assert!(game.place_house(0, 1, 1, PlayerColor::Red));
    let original = game.reedbed()[0].clone();

    for _ in 0..4 {
        assert!(game.rotate_tile(0, 1));
    }
    assert_eq!(game.reedbed()[0], original);

    for _ in 0..4 {
        assert!(game.rotate_tile(0, -1));
    }
    assert_eq!(game.reedbed()[0], original);
}

#[test]
fn test_rotation_carries_houses_in_lockstep() {
    let mut game = GameState::new(vec![tile_from(0, "corner", vec![vec![1, 0], vec![1, 1]])]);
    assert!(game.place_house(0, 1, 1, PlayerColor::Red));

    assert!(game.rotate_tile(0, 1));
    let tile = game.reedbed_tile(0).expect("tile still in reedbed");
    // Counter-clockwise moves (1, 1) to (0, 1); the house must still sit on
    // an island cell.
    assert_eq!(tile.house_at(0, 1), Some(PlayerColor::Red));
    assert!(tile.is_island(0, 1));
    assert_eq!(tile.rotation(), 1);
}

// =============================================================================
// Tile placement (Scenario A and legality properties)
// =============================================================================

#[test]
fn test_scenario_a_domino_occupies_two_cells() {
    let mut game = GameState::new(vec![domino(0)]);
    assert!(game.place_tile(0, 0, 0, 0, 0));

    assert_eq!(game.board().get(0, 0), Some(0));
    assert_eq!(game.board().get(0, 1), Some(0));
    assert_eq!(game.board().occupied(), 2);
    assert!(game.reedbed().is_empty());
    assert_eq!(game.placed().len(), 1);
}

#[test]
fn test_water_cells_may_overhang_the_board() {
    // Padded domino: row 1 is all water, so the tile fits on the bottom
    // row even though its grid hangs off the edge.
    let mut game = GameState::new(vec![domino(0)]);
    assert!(game.place_tile(0, 5, 0, 0, 0));
    assert_eq!(game.board().get(5, 0), Some(0));
    assert_eq!(game.board().get(5, 1), Some(0));
}

#[test]
fn test_placement_fails_closed() {
    let mut game = GameState::new(vec![domino(0), domino(1)]);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    let snapshot = game.clone();

    // Out of bounds: the second island cell would land on column 6.
    assert!(!game.place_tile(1, 0, 5, 0, 0));
    // Overlap with the already placed domino.
    assert!(!game.place_tile(1, 0, 1, 0, 0));
    // Unknown tile id.
    assert!(!game.place_tile(7, 3, 3, 0, 0));
    assert_eq!(game, snapshot, "failed placements must not mutate anything");
}

#[test]
fn test_can_place_implies_place_succeeds() {
    let mut game = GameState::new(vec![domino(0), bar(1), domino(2)]);
    assert!(game.place_tile(0, 2, 2, 0, 0));

    for tile in game.reedbed() {
        for (tr, tc) in tile.island_cells() {
            for br in 0..6 {
                for bc in 0..6 {
                    if game.can_place_tile(tile, br, bc, tr, tc) {
                        let mut copy = game.clone();
                        assert!(
                            copy.place_tile(tile.id(), br, bc, tr, tc),
                            "can_place_tile promised ({br}, {bc}) via ({tr}, {tc})"
                        );
                    }
                }
            }
        }
    }
}

// =============================================================================
// House placement and conservation
// =============================================================================

#[test]
fn test_house_rules() {
    let mut game = GameState::new(vec![bar(0)]);
    // Water cell (padded row) is not buildable.
    assert!(!game.place_house(0, 1, 0, PlayerColor::Red));
    // Island cell works, once.
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(!game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(!game.place_house(0, 0, 0, PlayerColor::Blue));
}

#[test]
fn test_house_count_conservation() {
    let mut game = GameState::new(vec![domino(0), domino(1)]);
    let conserved = |game: &GameState| {
        for color in [PlayerColor::Red, PlayerColor::Blue] {
            assert_eq!(
                game.houses_placed_by(color) + game.player(color).houses_remaining,
                HOUSE_POOL
            );
        }
    };

    conserved(&game);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    conserved(&game);
    assert!(game.place_house(0, 0, 0, PlayerColor::Blue));
    conserved(&game);
    // Houses on reedbed tiles count too.
    assert!(game.place_house(1, 0, 1, PlayerColor::Red));
    conserved(&game);
    // Failed placements change nothing.
    assert!(!game.place_house(0, 0, 0, PlayerColor::Red));
    conserved(&game);
}

// =============================================================================
// Village detection (Scenarios B and C)
// =============================================================================

#[test]
fn test_scenario_b_two_adjacent_houses_one_island() {
    let mut game = GameState::new(vec![bar(0)]);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_house(0, 0, 1, PlayerColor::Red));

    let villages = game.villages(PlayerColor::Red);
    assert_eq!(villages.len(), 1);
    assert_eq!(villages[0].size(), 2);
    assert_eq!(villages[0].islands(), 1);
    assert!(game.villages(PlayerColor::Blue).is_empty());
}

#[test]
fn test_scenario_c_villages_merge_across_tiles() {
    let mut game = GameState::new(vec![domino(0), domino(1)]);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    assert!(game.place_tile(1, 1, 0, 0, 0));
    // Touching cells: board (0, 0) on tile 0 and board (1, 0) on tile 1.
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_house(1, 0, 0, PlayerColor::Red));

    let villages = game.placed_villages(PlayerColor::Red);
    assert_eq!(villages.len(), 1);
    assert_eq!(villages[0].size(), 2);
    assert_eq!(villages[0].islands(), 2);
}

#[test]
fn test_reedbed_tiles_never_merge() {
    // Houses on two different reedbed tiles stay two villages no matter
    // what; unplaced tiles have no position to be adjacent from.
    let mut game = GameState::new(vec![domino(0), domino(1)]);
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_house(1, 0, 0, PlayerColor::Red));

    let villages = game.villages(PlayerColor::Red);
    assert_eq!(villages.len(), 2);
    assert!(villages.iter().all(|v| v.size() == 1));
    // And none of them counts toward a result.
    assert!(game.placed_villages(PlayerColor::Red).is_empty());
}

#[test]
fn test_village_detection_is_deterministic() {
    let mut game = GameState::new(vec![domino(0), domino(1), bar(2)]);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    assert!(game.place_tile(1, 1, 0, 0, 0));
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_house(1, 0, 0, PlayerColor::Red));
    assert!(game.place_house(1, 0, 1, PlayerColor::Blue));
    assert!(game.place_house(2, 0, 2, PlayerColor::Blue));

    for color in [PlayerColor::Red, PlayerColor::Blue] {
        assert_eq!(game.villages(color), game.villages(color));
        assert_eq!(game.placed_villages(color), game.placed_villages(color));
    }
}

// =============================================================================
// End of game (Scenario D)
// =============================================================================

#[test]
fn test_scenario_d_winner_by_village_size() {
    let mut game = GameState::with_pool(vec![domino(0), domino(1)], 2);

    // Red opens with a tile; the first turn takes a single placement.
    assert!(game.place_tile(0, 0, 0, 0, 0));
    // Blue spends both houses on the placed domino.
    assert!(game.place_house(0, 0, 0, PlayerColor::Blue));
    assert!(game.place_house(0, 0, 1, PlayerColor::Blue));
    assert!(!game.is_over(), "red can still move");
    // Red places the last tile and one house.
    assert!(game.place_tile(1, 2, 0, 0, 0));
    assert!(game.place_house(1, 0, 0, PlayerColor::Red));

    // Blue is about to move with no houses and an empty reedbed.
    assert!(game.is_over());
    let result = game.result().expect("result latched");
    assert_eq!(result.winner, Some(PlayerColor::Blue));
    assert_eq!((result.blue.size, result.blue.islands), (2, 1));
    assert_eq!((result.red.size, result.red.islands), (1, 1));
}

#[test]
fn test_scenario_d_island_count_breaks_ties() {
    let mut game = GameState::with_pool(vec![domino(0), domino(1), domino(2)], 2);

    assert!(game.place_tile(0, 0, 0, 0, 0));
    assert!(game.place_tile(1, 1, 0, 0, 0));
    assert!(game.place_house(1, 0, 0, PlayerColor::Blue));
    // Red builds a 2-house village on a single island.
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_house(0, 0, 1, PlayerColor::Red));
    assert!(!game.is_over(), "blue still has a house and a tile");
    // Blue builds a 2-house village spanning two islands.
    assert!(game.place_tile(2, 2, 0, 0, 0));
    assert!(game.place_house(2, 0, 0, PlayerColor::Blue));

    assert!(game.is_over());
    let result = game.result().expect("result latched");
    assert_eq!((result.red.size, result.red.islands), (2, 1));
    assert_eq!((result.blue.size, result.blue.islands), (2, 2));
    assert_eq!(result.winner, Some(PlayerColor::Blue));
}

#[test]
fn test_scenario_d_full_tie_is_a_draw() {
    let mut game = GameState::with_pool(vec![domino(0)], 1);

    // Red builds on the tile while it still sits in the reedbed.
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    // Blue places the tile (the house must survive the move) and builds
    // next to it.
    assert!(game.place_tile(0, 3, 3, 0, 0));
    assert_eq!(
        game.placed_tile(0).expect("tile placed").tile.house_at(0, 0),
        Some(PlayerColor::Red)
    );
    assert!(game.place_house(0, 0, 1, PlayerColor::Blue));

    assert!(game.is_over());
    let result = game.result().expect("result latched");
    assert_eq!(result.winner, None);
    assert_eq!(result.red, result.blue);
}

#[test]
fn test_finished_game_refuses_moves() {
    let mut game = GameState::with_pool(vec![domino(0)], 1);
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_tile(0, 3, 3, 0, 0));
    assert!(game.place_house(0, 0, 1, PlayerColor::Blue));
    assert!(game.is_over());

    let result = game.result().cloned();
    assert!(!game.place_house(0, 0, 1, PlayerColor::Red));
    assert!(!game.rotate_tile(0, 1));
    assert!(legal_moves(&game).is_empty());
    assert_eq!(game.result().cloned(), result, "result stays frozen");
}

// =============================================================================
// Move enumeration
// =============================================================================

#[test]
fn test_every_enumerated_move_is_playable() {
    let mut game = GameState::new(vec![domino(0), bar(1)]);
    assert!(game.place_tile(0, 2, 2, 0, 0));
    assert!(game.place_house(0, 0, 0, PlayerColor::Blue));

    let moves = legal_moves(&game);
    assert!(!moves.is_empty());
    for mv in &moves {
        let mut copy = game.clone();
        assert!(copy.apply(mv), "enumerated move must apply: {mv}");
    }
}

#[test]
fn test_house_moves_vanish_without_houses() {
    let mut game = GameState::with_pool(vec![domino(0), domino(1)], 1);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    // Blue burns its only house.
    assert!(game.place_house(0, 0, 0, PlayerColor::Blue));

    // Blue is still to move; only tile placements remain.
    assert_eq!(game.current_player(), PlayerColor::Blue);
    let moves = legal_moves(&game);
    assert!(!moves.is_empty());
    assert!(moves
        .iter()
        .all(|m| matches!(m, Move::PlaceTile { .. })));
}

// =============================================================================
// Strategies (Scenario E)
// =============================================================================

fn all_bots(seed: u64) -> Vec<(StrategyKind, Box<dyn Strategy>)> {
    [
        StrategyKind::Deterministic,
        StrategyKind::Random,
        StrategyKind::Minimax,
        StrategyKind::MinimaxRandom,
        StrategyKind::MonteCarlo,
    ]
    .into_iter()
    .map(|kind| {
        let mut config = BotConfig::new(kind);
        config.think_time = Duration::from_millis(50);
        config.seed = Some(seed);
        (kind, config.build())
    })
    .collect()
}

#[test]
fn test_scenario_e_strategies_return_enumerated_moves() {
    let mut game = GameState::new(builtin_catalog());
    assert!(game.place_tile(0, 0, 0, 0, 0));
    assert!(game.place_house(0, 0, 0, PlayerColor::Blue));

    let moves = legal_moves(&game);
    for (kind, mut bot) in all_bots(42) {
        let mv = bot
            .choose(&game)
            .unwrap_or_else(|| panic!("{kind:?} must find a move"));
        assert!(moves.contains(&mv), "{kind:?} returned a stale move: {mv}");
    }
}

#[test]
fn test_strategies_report_no_moves_on_finished_games() {
    let mut game = GameState::with_pool(vec![domino(0)], 1);
    assert!(game.place_house(0, 0, 0, PlayerColor::Red));
    assert!(game.place_tile(0, 3, 3, 0, 0));
    assert!(game.place_house(0, 0, 1, PlayerColor::Blue));
    assert!(game.is_over());

    for (kind, mut bot) in all_bots(42) {
        assert!(bot.choose(&game).is_none(), "{kind:?} moved after the end");
    }
}

#[test]
fn test_deterministic_strategy_matches_enumeration_order() {
    let game = GameState::new(builtin_catalog());
    let mut bot = BotConfig::new(StrategyKind::Deterministic).build();
    assert_eq!(bot.choose(&game), legal_moves(&game).into_iter().next());
}

#[test]
fn test_seeded_random_strategy_repeats() {
    let game = GameState::new(builtin_catalog());
    let pick = |seed| {
        let mut config = BotConfig::new(StrategyKind::Random);
        config.seed = Some(seed);
        config.build().choose(&game).expect("moves exist")
    };
    assert_eq!(pick(7), pick(7));
}

// =============================================================================
// Simulation harness
// =============================================================================

#[test]
fn test_clone_isolates_speculative_play() {
    let mut game = GameState::new(vec![domino(0), bar(1)]);
    assert!(game.place_tile(0, 0, 0, 0, 0));
    let canonical = game.clone();

    // Speculate wildly on a clone.
    let mut clone = game.clone();
    for mv in legal_moves(&clone) {
        let mut branch = clone.clone();
        branch.apply(&mv);
    }
    assert!(clone.place_house(0, 0, 0, PlayerColor::Blue));
    assert!(clone.place_tile(1, 3, 0, 0, 0));

    assert_eq!(game, canonical, "speculation must never leak back");
}
