use std::fmt;

use crate::constants::BOARD_SIZE;
use crate::tile::TileId;

/// The MxM board. Each cell is either empty or occupied by one island cell
/// of a placed tile, identified by the tile's id.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Vec<Option<TileId>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    /// Whether signed coordinates land on the board.
    pub fn in_bounds(row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE
    }

    pub fn get(&self, row: usize, col: usize) -> Option<TileId> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        self.cells[Self::idx(row, col)]
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, id: TileId) {
        self.cells[Self::idx(row, col)] = Some(id);
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match self.get(row, col) {
                    Some(id) => write!(f, "{} ", (b'a' + (id % 26) as u8) as char)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
