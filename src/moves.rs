//! Move representation and exhaustive legal-move enumeration.
//!
//! The enumerator is the single source of truth for what a player may do;
//! search quality is bounded by its completeness. Enumeration order is
//! deterministic: tile placements first (reedbed order, anchors and board
//! positions row-major), then house placements (placed tiles before reedbed
//! tiles, cells row-major).

use std::fmt;

use crate::constants::BOARD_SIZE;
use crate::game::GameState;
use crate::tile::TileId;

/// Either act of a turn: placing a reedbed tile on the board, or placing a
/// house on an eligible island cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    PlaceTile {
        tile_id: TileId,
        board_row: usize,
        board_col: usize,
        tile_row: usize,
        tile_col: usize,
    },
    PlaceHouse {
        tile_id: TileId,
        row: usize,
        col: usize,
    },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::PlaceTile {
                tile_id,
                board_row,
                board_col,
                tile_row,
                tile_col,
            } => write!(
                f,
                "tile {tile_id} at ({board_row}, {board_col}) via ({tile_row}, {tile_col})"
            ),
            Move::PlaceHouse { tile_id, row, col } => {
                write!(f, "house on tile {tile_id} at ({row}, {col})")
            }
        }
    }
}

/// Every legal move for the current player. Empty once the game is over or
/// no placement of either kind remains.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.is_over() {
        return Vec::new();
    }
    let mut moves = Vec::new();

    // One tile placement per (reedbed tile, island-cell anchor, board
    // position) that keeps every island cell on an empty board cell.
    for tile in state.reedbed() {
        for (tile_row, tile_col) in tile.island_cells() {
            for board_row in 0..BOARD_SIZE {
                for board_col in 0..BOARD_SIZE {
                    if state.can_place_tile(tile, board_row, board_col, tile_row, tile_col) {
                        moves.push(Move::PlaceTile {
                            tile_id: tile.id(),
                            board_row,
                            board_col,
                            tile_row,
                            tile_col,
                        });
                    }
                }
            }
        }
    }

    // One house placement per unowned island cell, board and reedbed alike,
    // while the current player still has houses.
    if state.player(state.current_player()).houses_remaining > 0 {
        let tiles = state
            .placed()
            .iter()
            .map(|p| &p.tile)
            .chain(state.reedbed().iter());
        for tile in tiles {
            for (row, col) in tile.island_cells() {
                if tile.house_at(row, col).is_none() {
                    moves.push(Move::PlaceHouse {
                        tile_id: tile.id(),
                        row,
                        col,
                    });
                }
            }
        }
    }

    moves
}
