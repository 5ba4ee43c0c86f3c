//! Constants for board geometry, turn structure, evaluation weights, and
//! search parameters.
//!
//! This module contains all the configuration constants for the game engine
//! and the move-search strategies. Evaluation weights are plain multipliers
//! over the position features computed in [`crate::eval`], tuned for a 6x6
//! board with the built-in tile set.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length (MxM).
pub const BOARD_SIZE: usize = 6;

// =============================================================================
// Turn Structure
// =============================================================================

/// Houses each player starts with.
pub const HOUSE_POOL: u32 = 10;

/// Placements required on the very first turn of the game.
pub const FIRST_TURN_PLACEMENTS: u32 = 1;

/// Placements required on every turn after the first.
pub const TURN_PLACEMENTS: u32 = 2;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default thinking-time budget per move, in milliseconds.
pub const DEFAULT_THINK_MS: u64 = 1000;

/// Default relative tolerance for randomized best-move selection.
/// Moves scoring within this fraction of the best score are eligible.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Hard cap on iterative-deepening depth. The wall clock is the real limit;
/// this only bounds the loop on trivially small positions.
pub const MAX_SEARCH_DEPTH: u32 = 32;

/// Maximum number of moves played out in a single Monte-Carlo simulation.
pub const MAX_PLAYOUT_MOVES: usize = 128;

/// Minimum simulations per candidate move before convergence is tested.
pub const MC_MIN_SIMS: u32 = 8;

/// Size of the per-move window of running win-rate samples used by the
/// convergence test. Must be even; the test compares the two halves.
pub const MC_WINDOW: usize = 16;

/// A candidate move counts as converged when the averages of the first and
/// second half of its sample window differ by less than this.
pub const MC_CONVERGENCE_DELTA: f64 = 0.02;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Weight of the acting player's largest-village house count.
pub const W_LARGEST_SIZE: f64 = 10.0;

/// Weight of the acting player's largest-village island count.
pub const W_LARGEST_ISLANDS: f64 = 4.0;

/// Weight of the opponent's largest-village house count (subtracted).
pub const W_OPP_LARGEST_SIZE: f64 = 8.0;

/// Weight of the opponent's largest-village island count (subtracted).
pub const W_OPP_LARGEST_ISLANDS: f64 = 3.0;

/// Bonus per distinct village owned.
pub const W_VILLAGE_COUNT: f64 = 1.5;

/// Minor bonus per house still in hand.
pub const W_HOUSES_LEFT: f64 = 0.25;

/// Bonus per distinct island carrying at least one of the player's houses.
pub const W_ISLANDS_TOUCHED: f64 = 1.0;

/// Penalty per distinct island carrying at least one opponent house.
pub const W_OPP_ISLANDS_TOUCHED: f64 = 0.75;

/// Bonus per open island cell adjacent to one of the player's houses
/// (room to grow the villages).
pub const W_EXPANSION: f64 = 0.5;

/// Bonus per open island cell adjacent to an opponent house
/// (opportunities to block their growth).
pub const W_BLOCKING: f64 = 0.75;

/// Base of the game-progress scale factor. The evaluation is multiplied by
/// `PROGRESS_FLOOR + progress`, where progress is the fraction of all houses
/// already placed, so scores weigh more as the game nears its end.
pub const PROGRESS_FLOOR: f64 = 0.5;
