//! Tile shapes, house grids, and rotation.
//!
//! A tile is a square NxN grid of cells. Cells marked as islands are the
//! only cells that can occupy board positions or carry houses; water cells
//! are inert and may overhang the board edge once the tile is placed.
//!
//! The shape grid and the houses grid always have identical dimensions and
//! rotate in lock-step, so every house keeps pointing at the same island
//! cell through any number of rotations.

use std::fmt;

/// Stable tile identifier, assigned by catalog order.
pub type TileId = u32;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    /// The opposing player.
    pub fn other(self) -> Self {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Red,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerColor::Red => write!(f, "red"),
            PlayerColor::Blue => write!(f, "blue"),
        }
    }
}

/// A game tile: identity, display name, shape grid, houses grid, and the
/// current rotation counter in {0, 1, 2, 3}.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    id: TileId,
    name: String,
    shape: Vec<Vec<bool>>,
    houses: Vec<Vec<Option<PlayerColor>>>,
    rotation: u8,
}

impl Tile {
    /// Create a tile from a square shape grid with all houses unowned and
    /// rotation 0.
    ///
    /// # Panics
    /// Panics if the grid is empty, not square, or has no island cells.
    /// Those are construction bugs, not recoverable conditions; the catalog
    /// loader reports malformed input as errors before getting here.
    pub fn new(id: TileId, name: impl Into<String>, shape: Vec<Vec<bool>>) -> Self {
        let side = shape.len();
        assert!(side > 0, "tile shape grid must not be empty");
        assert!(
            shape.iter().all(|row| row.len() == side),
            "tile shape grid must be square"
        );
        assert!(
            shape.iter().flatten().any(|&cell| cell),
            "tile must have at least one island cell"
        );
        let houses = vec![vec![None; side]; side];
        Tile {
            id,
            name: name.into(),
            shape,
            houses,
            rotation: 0,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Side length of the (square) grids.
    pub fn side(&self) -> usize {
        self.shape.len()
    }

    /// Current rotation counter in {0, 1, 2, 3}.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether the cell at (row, col) is an island cell. Out-of-grid
    /// coordinates are not islands.
    pub fn is_island(&self, row: usize, col: usize) -> bool {
        row < self.side() && col < self.side() && self.shape[row][col]
    }

    /// Owner of the house at (row, col), if any.
    pub fn house_at(&self, row: usize, col: usize) -> Option<PlayerColor> {
        if row < self.side() && col < self.side() {
            self.houses[row][col]
        } else {
            None
        }
    }

    pub(crate) fn set_house(&mut self, row: usize, col: usize, owner: PlayerColor) {
        self.houses[row][col] = Some(owner);
    }

    /// Iterate over all island cells in row-major order.
    pub fn island_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let side = self.side();
        (0..side)
            .flat_map(move |r| (0..side).map(move |c| (r, c)))
            .filter(|&(r, c)| self.shape[r][c])
    }

    /// Number of island cells.
    pub fn island_count(&self) -> usize {
        self.island_cells().count()
    }

    /// Number of houses owned by `player` on this tile.
    pub fn houses_of(&self, player: PlayerColor) -> u32 {
        self.houses
            .iter()
            .flatten()
            .filter(|&&h| h == Some(player))
            .count() as u32
    }

    /// Rotate the tile by a single 90-degree step: `+1` counter-clockwise,
    /// `-1` clockwise. Shape and houses grids rotate together and the
    /// rotation counter advances mod 4.
    ///
    /// # Panics
    /// Panics on any direction other than +1 or -1, and if the two grids
    /// ever diverge in dimensions. Both are programming errors.
    pub fn rotate(&mut self, direction: i8) {
        match direction {
            1 => {
                self.shape = rotate_ccw(&self.shape);
                self.houses = rotate_ccw(&self.houses);
                self.rotation = (self.rotation + 1) % 4;
            }
            -1 => {
                self.shape = rotate_cw(&self.shape);
                self.houses = rotate_cw(&self.houses);
                self.rotation = (self.rotation + 3) % 4;
            }
            other => panic!("rotation direction must be +1 or -1, got {other}"),
        }
        assert_eq!(
            self.shape.len(),
            self.houses.len(),
            "shape and houses grids diverged after rotation"
        );
    }
}

/// Rotate a square grid 90 degrees counter-clockwise: transpose, then
/// reverse the row order.
fn rotate_ccw<T: Copy>(grid: &[Vec<T>]) -> Vec<Vec<T>> {
    let side = grid.len();
    (0..side)
        .map(|r| (0..side).map(|c| grid[c][side - 1 - r]).collect())
        .collect()
}

/// Rotate a square grid 90 degrees clockwise: transpose, then reverse each
/// row.
fn rotate_cw<T: Copy>(grid: &[Vec<T>]) -> Vec<Vec<T>> {
    let side = grid.len();
    (0..side)
        .map(|r| (0..side).map(|c| grid[side - 1 - c][r]).collect())
        .collect()
}
