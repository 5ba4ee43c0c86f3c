//! Village detection: cross-tile flood fill over same-owner houses.
//!
//! A village is a maximal set of one player's houses connected through
//! island cells. Within a tile, connectivity follows the four orthogonal
//! neighbors of the local grid. For tiles on the board, connectivity also
//! crosses tile boundaries: a local cell maps to its absolute board
//! coordinate through the tile's anchor, and the neighboring board cell
//! maps back into the neighboring tile's local grid through that tile's own
//! anchor. Reedbed tiles are islands unto themselves; their houses never
//! connect across tiles.
//!
//! Traversal is breadth-first and visits each cell at most once per search,
//! keyed by (tile id, local row, local col). Re-running the search on an
//! unchanged state always yields the same partition in the same order.

use std::collections::{HashSet, VecDeque};

use crate::board::Board;
use crate::game::{GameState, PlacedTile};
use crate::tile::{PlayerColor, TileId};

/// Orthogonal neighbor offsets: north, east, south, west.
const DELTA: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// A maximal connected group of one player's houses.
#[derive(Clone, Debug, PartialEq)]
pub struct Village {
    owner: PlayerColor,
    cells: Vec<(TileId, usize, usize)>,
    islands: usize,
}

impl Village {
    fn new(owner: PlayerColor, cells: Vec<(TileId, usize, usize)>) -> Self {
        let mut ids: Vec<TileId> = cells.iter().map(|&(id, _, _)| id).collect();
        ids.sort_unstable();
        ids.dedup();
        let islands = ids.len();
        Self {
            owner,
            cells,
            islands,
        }
    }

    pub fn owner(&self) -> PlayerColor {
        self.owner
    }

    /// The houses of the village as (tile id, local row, local col).
    pub fn cells(&self) -> &[(TileId, usize, usize)] {
        &self.cells
    }

    /// Number of houses in the village. The primary victory key.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of distinct islands (tile ids) the village spans. Breaks ties
    /// between equal-sized villages.
    pub fn islands(&self) -> usize {
        self.islands
    }
}

/// All villages of `owner`: placed-tile villages (cross-tile merged)
/// followed by reedbed-tile villages (local only).
pub fn villages(state: &GameState, owner: PlayerColor) -> Vec<Village> {
    let mut out = placed_villages(state, owner);
    out.extend(reedbed_villages(state, owner));
    out
}

/// Villages of `owner` over the placed tiles, merging across tile
/// boundaries wherever owned island cells touch on the board.
pub fn placed_villages(state: &GameState, owner: PlayerColor) -> Vec<Village> {
    let mut visited: HashSet<(TileId, usize, usize)> = HashSet::new();
    let mut out = Vec::new();
    for placed in state.placed() {
        let side = placed.tile.side();
        for row in 0..side {
            for col in 0..side {
                let key = (placed.tile.id(), row, col);
                if placed.tile.house_at(row, col) != Some(owner) || visited.contains(&key) {
                    continue;
                }
                out.push(flood_placed(state, owner, key, &mut visited));
            }
        }
    }
    out
}

/// Villages of `owner` over reedbed tiles. No cross-tile adjacency exists
/// for unplaced tiles, so each search stays inside one local grid.
pub fn reedbed_villages(state: &GameState, owner: PlayerColor) -> Vec<Village> {
    let mut out = Vec::new();
    for tile in state.reedbed() {
        let mut visited: HashSet<(usize, usize)> = HashSet::new();
        let side = tile.side();
        for row in 0..side {
            for col in 0..side {
                if tile.house_at(row, col) != Some(owner) || visited.contains(&(row, col)) {
                    continue;
                }
                let mut cells = Vec::new();
                let mut queue = VecDeque::new();
                visited.insert((row, col));
                queue.push_back((row, col));
                while let Some((r, c)) = queue.pop_front() {
                    cells.push((tile.id(), r, c));
                    for (dr, dc) in DELTA {
                        let nr = r as isize + dr;
                        let nc = c as isize + dc;
                        if nr < 0 || nc < 0 || nr >= side as isize || nc >= side as isize {
                            continue;
                        }
                        let next = (nr as usize, nc as usize);
                        if !visited.contains(&next) && tile.house_at(next.0, next.1) == Some(owner)
                        {
                            visited.insert(next);
                            queue.push_back(next);
                        }
                    }
                }
                out.push(Village::new(owner, cells));
            }
        }
    }
    out
}

/// Breadth-first search over placed tiles from one owned cell.
fn flood_placed(
    state: &GameState,
    owner: PlayerColor,
    start: (TileId, usize, usize),
    visited: &mut HashSet<(TileId, usize, usize)>,
) -> Village {
    let mut cells = Vec::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    while let Some((id, row, col)) = queue.pop_front() {
        cells.push((id, row, col));
        let placed = state
            .placed_tile(id)
            .expect("occupied board cell points at a placed tile");
        for neighbor in board_neighbors(state, placed, row, col) {
            let (nid, nr, nc) = neighbor;
            let tile = &state
                .placed_tile(nid)
                .expect("occupied board cell points at a placed tile")
                .tile;
            if tile.house_at(nr, nc) == Some(owner) && !visited.contains(&neighbor) {
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }
    Village::new(owner, cells)
}

/// The island cells orthogonally adjacent on the board to the local cell
/// (row, col) of a placed tile, expressed in each neighboring tile's local
/// coordinates. Same-tile neighbors come back through the same mapping,
/// since every occupied board cell belongs to exactly one placed tile.
pub(crate) fn board_neighbors(
    state: &GameState,
    placed: &PlacedTile,
    row: usize,
    col: usize,
) -> Vec<(TileId, usize, usize)> {
    let (br, bc) = placed.board_pos_of(row, col);
    let mut out = Vec::with_capacity(4);
    for (dr, dc) in DELTA {
        let nr = br + dr;
        let nc = bc + dc;
        if !Board::in_bounds(nr, nc) {
            continue;
        }
        let Some(id) = state.board().get(nr as usize, nc as usize) else {
            continue;
        };
        let neighbor = state
            .placed_tile(id)
            .expect("occupied board cell points at a placed tile");
        if let Some((lr, lc)) = neighbor.local_pos_of(nr as usize, nc as usize) {
            out.push((id, lr, lc));
        }
    }
    out
}

/// The largest village by house count, tie-broken by distinct island count.
pub fn largest(villages: &[Village]) -> Option<&Village> {
    villages.iter().max_by_key(|v| (v.size(), v.islands()))
}
