//! Position evaluation shared by the search strategies.
//!
//! A single pure function over [`GameState`], so every strategy scores
//! positions identically. The score is from the given player's perspective;
//! larger is better. Village terms come from placed tiles only, since only
//! placed-tile villages ever decide a result; reedbed houses still count
//! through the islands-touched term.

use std::collections::HashSet;

use crate::constants::{
    HOUSE_POOL, PROGRESS_FLOOR, W_BLOCKING, W_EXPANSION, W_HOUSES_LEFT, W_ISLANDS_TOUCHED,
    W_LARGEST_ISLANDS, W_LARGEST_SIZE, W_OPP_ISLANDS_TOUCHED, W_OPP_LARGEST_ISLANDS,
    W_OPP_LARGEST_SIZE, W_VILLAGE_COUNT,
};
use crate::game::GameState;
use crate::tile::{PlayerColor, TileId};
use crate::village::{self, board_neighbors};

/// Evaluate a position for `player`.
pub fn evaluate(state: &GameState, player: PlayerColor) -> f64 {
    let opponent = player.other();
    let own = village::placed_villages(state, player);
    let theirs = village::placed_villages(state, opponent);

    let (own_size, own_islands) = largest_keys(&own);
    let (opp_size, opp_islands) = largest_keys(&theirs);

    let mut score = 0.0;
    score += W_LARGEST_SIZE * own_size + W_LARGEST_ISLANDS * own_islands;
    score -= W_OPP_LARGEST_SIZE * opp_size + W_OPP_LARGEST_ISLANDS * opp_islands;
    score += W_VILLAGE_COUNT * own.len() as f64;
    score += W_HOUSES_LEFT * state.player(player).houses_remaining as f64;
    score += W_ISLANDS_TOUCHED * islands_touched(state, player) as f64;
    score -= W_OPP_ISLANDS_TOUCHED * islands_touched(state, opponent) as f64;
    // Open cells next to own houses are room to grow; open cells next to
    // opponent houses are chances to block them.
    score += W_EXPANSION * open_adjacent_cells(state, player) as f64;
    score += W_BLOCKING * open_adjacent_cells(state, opponent) as f64;

    score * progress_scale(state)
}

/// Positions matter more the closer the game is to its end: scale by the
/// fraction of all houses already placed.
fn progress_scale(state: &GameState) -> f64 {
    let total_pool = (2 * HOUSE_POOL).max(1) as f64;
    PROGRESS_FLOOR + state.houses_placed_total() as f64 / total_pool
}

fn largest_keys(villages: &[village::Village]) -> (f64, f64) {
    village::largest(villages)
        .map(|v| (v.size() as f64, v.islands() as f64))
        .unwrap_or((0.0, 0.0))
}

/// Distinct islands (tiles, placed or not) carrying at least one of the
/// player's houses.
fn islands_touched(state: &GameState, player: PlayerColor) -> usize {
    state
        .reedbed()
        .iter()
        .chain(state.placed().iter().map(|p| &p.tile))
        .filter(|t| t.houses_of(player) > 0)
        .count()
}

/// Distinct unowned island cells on the board orthogonally adjacent to one
/// of the player's houses, counted across tile boundaries.
fn open_adjacent_cells(state: &GameState, player: PlayerColor) -> usize {
    let mut open: HashSet<(TileId, usize, usize)> = HashSet::new();
    for placed in state.placed() {
        let side = placed.tile.side();
        for row in 0..side {
            for col in 0..side {
                if placed.tile.house_at(row, col) != Some(player) {
                    continue;
                }
                for (id, nr, nc) in board_neighbors(state, placed, row, col) {
                    let tile = match state.placed_tile(id) {
                        Some(p) => &p.tile,
                        None => continue,
                    };
                    if tile.house_at(nr, nc).is_none() {
                        open.insert((id, nr, nc));
                    }
                }
            }
        }
    }
    open.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    fn domino(id: TileId) -> Tile {
        Tile::new(
            id,
            format!("domino-{id}"),
            vec![vec![true, true], vec![false, false]],
        )
    }

    #[test]
    fn test_house_improves_own_evaluation() {
        let mut game = GameState::new(vec![domino(0), domino(1)]);
        assert!(game.place_tile(0, 0, 0, 0, 0));
        let before = evaluate(&game, PlayerColor::Blue);
        assert!(game.place_house(0, 0, 0, PlayerColor::Blue));
        let after = evaluate(&game, PlayerColor::Blue);
        assert!(after > before, "placing a house must help: {before} -> {after}");
    }

    #[test]
    fn test_evaluation_is_adversarial() {
        let mut game = GameState::new(vec![domino(0), domino(1)]);
        assert!(game.place_tile(0, 0, 0, 0, 0));
        assert!(game.place_house(0, 0, 0, PlayerColor::Red));
        assert!(game.place_house(0, 0, 1, PlayerColor::Red));
        // A strong red position must read as weak for blue.
        assert!(evaluate(&game, PlayerColor::Red) > evaluate(&game, PlayerColor::Blue));
    }
}
