//! Game state and move execution.
//!
//! This module provides the core rules of the game:
//! - Tile placement legality and execution
//! - House placement with per-player house pools
//! - The turn state machine (one placement on the first turn, two after)
//! - End-of-game detection with a latched, never-recomputed result
//!
//! Illegal move requests are not errors: every mutator validates first and
//! returns `false` without touching any state, so a driver can simply try a
//! different move. Only structural invariant violations abort.
//!
//! [`GameState`] implements `Clone` as a full structural deep copy (all
//! grids, counters, and tile lists are owned values). Search strategies
//! clone the state before every speculative move and never mutate the
//! canonical copy.

use crate::board::Board;
use crate::constants::{BOARD_SIZE, FIRST_TURN_PLACEMENTS, HOUSE_POOL, TURN_PLACEMENTS};
use crate::moves::Move;
use crate::tile::{PlayerColor, Tile, TileId};
use crate::village::{self, Village};

/// A player: color identity and houses still in hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub color: PlayerColor,
    pub houses_remaining: u32,
}

impl Player {
    fn new(color: PlayerColor, pool: u32) -> Self {
        Self {
            color,
            houses_remaining: pool,
        }
    }
}

/// A tile pinned to the board: the cell (tile_row, tile_col) of the tile
/// sits at board position (board_row, board_col), and every other cell
/// follows from that offset.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTile {
    pub tile: Tile,
    pub board_row: usize,
    pub board_col: usize,
    pub tile_row: usize,
    pub tile_col: usize,
}

impl PlacedTile {
    /// Board coordinates of the local cell (row, col). May be off-board for
    /// water cells.
    pub fn board_pos_of(&self, row: usize, col: usize) -> (isize, isize) {
        (
            self.board_row as isize + row as isize - self.tile_row as isize,
            self.board_col as isize + col as isize - self.tile_col as isize,
        )
    }

    /// Local coordinates of a board cell, if it falls inside this tile's
    /// grid.
    pub fn local_pos_of(&self, board_row: usize, board_col: usize) -> Option<(usize, usize)> {
        let r = board_row as isize - self.board_row as isize + self.tile_row as isize;
        let c = board_col as isize - self.board_col as isize + self.tile_col as isize;
        let side = self.tile.side() as isize;
        if r >= 0 && c >= 0 && r < side && c < side {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }
}

/// The two keys that decide victory: largest-village house count, tie-broken
/// by the number of distinct islands it spans.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct VillageScore {
    pub size: usize,
    pub islands: usize,
}

impl VillageScore {
    pub fn of(village: &Village) -> Self {
        Self {
            size: village.size(),
            islands: village.islands(),
        }
    }
}

/// The frozen outcome of a finished game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameResult {
    /// `None` means a draw on both keys.
    pub winner: Option<PlayerColor>,
    pub red: VillageScore,
    pub blue: VillageScore,
}

/// The authoritative game state.
///
/// Mutated only through [`GameState::apply`] (or the underlying
/// [`place_tile`](GameState::place_tile) and
/// [`place_house`](GameState::place_house) operations) and the turn advance
/// they trigger. Once the game-over result is latched the state refuses all
/// further moves.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    board: Board,
    placed: Vec<PlacedTile>,
    reedbed: Vec<Tile>,
    players: [Player; 2],
    current: PlayerColor,
    first_turn: bool,
    placements_made: u32,
    placements_required: u32,
    result: Option<GameResult>,
}

impl GameState {
    /// Start a fresh game from a tile catalog, red to move first.
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self::with_pool(tiles, HOUSE_POOL)
    }

    /// Start a fresh game with a custom house pool per player.
    pub fn with_pool(tiles: Vec<Tile>, pool: u32) -> Self {
        Self {
            board: Board::new(),
            placed: Vec::new(),
            reedbed: tiles,
            players: [
                Player::new(PlayerColor::Red, pool),
                Player::new(PlayerColor::Blue, pool),
            ],
            current: PlayerColor::Red,
            first_turn: true,
            placements_made: 0,
            placements_required: FIRST_TURN_PLACEMENTS,
            result: None,
        }
    }

    fn idx(color: PlayerColor) -> usize {
        match color {
            PlayerColor::Red => 0,
            PlayerColor::Blue => 1,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn placed(&self) -> &[PlacedTile] {
        &self.placed
    }

    pub fn reedbed(&self) -> &[Tile] {
        &self.reedbed
    }

    pub fn player(&self, color: PlayerColor) -> &Player {
        &self.players[Self::idx(color)]
    }

    pub fn current_player(&self) -> PlayerColor {
        self.current
    }

    pub fn is_first_turn(&self) -> bool {
        self.first_turn
    }

    pub fn placements_made(&self) -> u32 {
        self.placements_made
    }

    pub fn placements_required(&self) -> u32 {
        self.placements_required
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// The frozen result, once the game is over.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Look up a tile wherever it currently lives.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.reedbed
            .iter()
            .chain(self.placed.iter().map(|p| &p.tile))
            .find(|t| t.id() == id)
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        let GameState {
            reedbed, placed, ..
        } = self;
        reedbed
            .iter_mut()
            .chain(placed.iter_mut().map(|p| &mut p.tile))
            .find(|t| t.id() == id)
    }

    pub fn placed_tile(&self, id: TileId) -> Option<&PlacedTile> {
        self.placed.iter().find(|p| p.tile.id() == id)
    }

    pub fn reedbed_tile(&self, id: TileId) -> Option<&Tile> {
        self.reedbed.iter().find(|t| t.id() == id)
    }

    /// Total houses `player` has placed, across board and reedbed tiles.
    pub fn houses_placed_by(&self, player: PlayerColor) -> u32 {
        self.reedbed
            .iter()
            .chain(self.placed.iter().map(|p| &p.tile))
            .map(|t| t.houses_of(player))
            .sum()
    }

    /// Total houses placed by both players.
    pub fn houses_placed_total(&self) -> u32 {
        self.houses_placed_by(PlayerColor::Red) + self.houses_placed_by(PlayerColor::Blue)
    }

    /// Check whether `tile` could be placed with its cell (tile_row,
    /// tile_col) pinned at board position (board_row, board_col): every
    /// island cell must land on an empty board cell. Water cells are never
    /// checked and may overhang the board. Pure; no side effects.
    pub fn can_place_tile(
        &self,
        tile: &Tile,
        board_row: usize,
        board_col: usize,
        tile_row: usize,
        tile_col: usize,
    ) -> bool {
        for (r, c) in tile.island_cells() {
            let br = board_row as isize + r as isize - tile_row as isize;
            let bc = board_col as isize + c as isize - tile_col as isize;
            if !Board::in_bounds(br, bc) {
                return false;
            }
            if !self.board.is_empty_cell(br as usize, bc as usize) {
                return false;
            }
        }
        true
    }

    /// Place a reedbed tile on the board. Re-validates the placement and
    /// fails closed: on any violation nothing changes and `false` comes
    /// back. Houses already placed on the tile while it sat in the reedbed
    /// are preserved verbatim.
    pub fn place_tile(
        &mut self,
        tile_id: TileId,
        board_row: usize,
        board_col: usize,
        tile_row: usize,
        tile_col: usize,
    ) -> bool {
        if self.result.is_some() {
            return false;
        }
        let Some(pos) = self.reedbed.iter().position(|t| t.id() == tile_id) else {
            return false;
        };
        if !self.can_place_tile(&self.reedbed[pos], board_row, board_col, tile_row, tile_col) {
            return false;
        }
        let tile = self.reedbed.remove(pos);
        let placed = PlacedTile {
            tile,
            board_row,
            board_col,
            tile_row,
            tile_col,
        };
        for (r, c) in placed.tile.island_cells() {
            let (br, bc) = placed.board_pos_of(r, c);
            self.board.set(br as usize, bc as usize, tile_id);
        }
        log::debug!(
            "placed tile {} `{}` at ({board_row}, {board_col}) via ({tile_row}, {tile_col})",
            tile_id,
            placed.tile.name()
        );
        self.placed.push(placed);
        self.finish_placement();
        true
    }

    /// Place a house for `player` on the island cell (row, col) of a tile,
    /// wherever that tile lives. Fails without mutation if the cell is
    /// water, already owned, or the player has no houses left.
    pub fn place_house(
        &mut self,
        tile_id: TileId,
        row: usize,
        col: usize,
        player: PlayerColor,
    ) -> bool {
        if self.result.is_some() {
            return false;
        }
        if self.players[Self::idx(player)].houses_remaining == 0 {
            return false;
        }
        {
            let Some(tile) = self.tile_mut(tile_id) else {
                return false;
            };
            if !tile.is_island(row, col) || tile.house_at(row, col).is_some() {
                return false;
            }
            tile.set_house(row, col, player);
        }
        self.players[Self::idx(player)].houses_remaining -= 1;
        log::debug!("{player} placed a house on tile {tile_id} at ({row}, {col})");
        self.finish_placement();
        true
    }

    /// Rotate a reedbed tile by one 90-degree step (+1 counter-clockwise,
    /// -1 clockwise). Rotation is free: it is not a placement and does not
    /// advance the turn. Placed tiles never rotate.
    pub fn rotate_tile(&mut self, tile_id: TileId, direction: i8) -> bool {
        if self.result.is_some() {
            return false;
        }
        let Some(tile) = self.reedbed.iter_mut().find(|t| t.id() == tile_id) else {
            return false;
        };
        tile.rotate(direction);
        true
    }

    /// Apply a move for the current player. Returns `false` on any illegal
    /// move, with no partial effects.
    pub fn apply(&mut self, mv: &Move) -> bool {
        match *mv {
            Move::PlaceTile {
                tile_id,
                board_row,
                board_col,
                tile_row,
                tile_col,
            } => self.place_tile(tile_id, board_row, board_col, tile_row, tile_col),
            Move::PlaceHouse { tile_id, row, col } => {
                let player = self.current;
                self.place_house(tile_id, row, col, player)
            }
        }
    }

    /// Villages of `player`, across placed tiles (with cross-tile merging)
    /// and reedbed tiles (each an island unto itself).
    pub fn villages(&self, player: PlayerColor) -> Vec<Village> {
        village::villages(self, player)
    }

    /// Villages of `player` on placed tiles only. These are the villages
    /// that decide the final result.
    pub fn placed_villages(&self, player: PlayerColor) -> Vec<Village> {
        village::placed_villages(self, player)
    }

    /// Book-keeping after every successful placement: advance the per-turn
    /// counter, and on reaching the turn's requirement hand over to the
    /// other player and test for the end of the game.
    fn finish_placement(&mut self) {
        self.placements_made += 1;
        if self.placements_made < self.placements_required {
            return;
        }
        self.placements_made = 0;
        self.placements_required = TURN_PLACEMENTS;
        self.first_turn = false;
        self.current = self.current.other();
        log::debug!("turn passes to {}", self.current);
        self.check_game_over();
    }

    /// Whether any reedbed tile still has a legal placement somewhere on
    /// the board, at its current rotation.
    fn any_reedbed_placement(&self) -> bool {
        self.reedbed.iter().any(|tile| {
            tile.island_cells().any(|(tr, tc)| {
                (0..BOARD_SIZE).any(|br| {
                    (0..BOARD_SIZE).any(|bc| self.can_place_tile(tile, br, bc, tr, tc))
                })
            })
        })
    }

    /// The game ends the moment a player about to move has no houses left
    /// and no reedbed tile can be placed anywhere. The result is computed
    /// from placed-tile villages only, latched, and never recomputed.
    fn check_game_over(&mut self) {
        if self.players[Self::idx(self.current)].houses_remaining > 0 {
            return;
        }
        if self.any_reedbed_placement() {
            return;
        }
        let red = best_score(&village::placed_villages(self, PlayerColor::Red));
        let blue = best_score(&village::placed_villages(self, PlayerColor::Blue));
        let winner = match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Some(PlayerColor::Red),
            std::cmp::Ordering::Less => Some(PlayerColor::Blue),
            std::cmp::Ordering::Equal => None,
        };
        match winner {
            Some(color) => {
                let (win, lose) = match color {
                    PlayerColor::Red => (&red, &blue),
                    PlayerColor::Blue => (&blue, &red),
                };
                log::info!(
                    "game over: {color} wins, {} houses over {} islands vs {} over {}",
                    win.size,
                    win.islands,
                    lose.size,
                    lose.islands
                );
            }
            None => log::info!(
                "game over: draw at {} houses over {} islands",
                red.size,
                red.islands
            ),
        }
        self.result = Some(GameResult { winner, red, blue });
    }
}

/// Largest-village score keys for a village list, `(0, 0)` when there are
/// no villages.
fn best_score(villages: &[Village]) -> VillageScore {
    village::largest(villages)
        .map(VillageScore::of)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;

    #[test]
    fn test_fresh_game_state() {
        let game = GameState::new(builtin_catalog());
        assert_eq!(game.current_player(), PlayerColor::Red);
        assert!(game.is_first_turn());
        assert_eq!(game.placements_required(), 1);
        assert_eq!(game.player(PlayerColor::Red).houses_remaining, HOUSE_POOL);
        assert_eq!(game.reedbed().len(), 10);
        assert!(!game.is_over());
    }

    #[test]
    fn test_first_turn_needs_one_placement() {
        let mut game = GameState::new(builtin_catalog());
        assert!(game.place_tile(0, 0, 0, 0, 0));
        assert_eq!(game.current_player(), PlayerColor::Blue);
        assert!(!game.is_first_turn());
        assert_eq!(game.placements_required(), 2);
    }

    #[test]
    fn test_rotation_is_not_a_placement() {
        let mut game = GameState::new(builtin_catalog());
        assert!(game.rotate_tile(0, 1));
        assert!(game.rotate_tile(0, -1));
        assert_eq!(game.placements_made(), 0);
        assert_eq!(game.current_player(), PlayerColor::Red);
    }

    #[test]
    fn test_placed_tiles_do_not_rotate() {
        let mut game = GameState::new(builtin_catalog());
        assert!(game.place_tile(0, 0, 0, 0, 0));
        assert!(!game.rotate_tile(0, 1));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut game = GameState::new(builtin_catalog());
        let snapshot = game.clone();
        assert!(game.place_tile(0, 0, 0, 0, 0));
        assert!(game.place_house(0, 0, 0, PlayerColor::Blue));
        assert_eq!(snapshot.placed().len(), 0);
        assert_eq!(snapshot.reedbed().len(), 10);
        assert_eq!(snapshot.player(PlayerColor::Blue).houses_remaining, HOUSE_POOL);
        assert!(snapshot.board().is_empty_cell(0, 0));
    }
}
