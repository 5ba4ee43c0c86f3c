//! Reedbed: a territory tile game engine with move-search AI.
//!
//! Two players take turns placing polyomino island tiles from a shared
//! reedbed onto a 6x6 board and building houses on island cells. Houses of
//! one color connected through island cells form villages; the player whose
//! largest village holds the most houses (ties broken by the number of
//! islands it spans) wins when the game runs out of moves.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, turn structure, and search parameters
//! - [`tile`] - Tile shapes, house grids, and rotation
//! - [`catalog`] - Tile catalog input and the built-in fallback shapes
//! - [`board`] - Board occupancy grid
//! - [`game`] - Game state, placement rules, turns, end-of-game detection
//! - [`village`] - Cross-tile village flood fill and scoring
//! - [`moves`] - Legal-move enumeration
//! - [`rng`] - Seeded random source for reproducible strategies
//! - [`eval`] - Position evaluation shared by the search strategies
//! - [`strategy`] - Strategy registry and the baseline strategies
//! - [`minimax`] - Alpha-beta minimax with iterative deepening
//! - [`montecarlo`] - Time-boxed Monte-Carlo playout search
//!
//! ## Example
//!
//! ```
//! use reedbed::catalog::builtin_catalog;
//! use reedbed::game::GameState;
//! use reedbed::moves::legal_moves;
//!
//! // Start a game and play the first legal move.
//! let mut game = GameState::new(builtin_catalog());
//! let moves = legal_moves(&game);
//! assert!(game.apply(&moves[0]));
//! ```

pub mod board;
pub mod catalog;
pub mod constants;
pub mod eval;
pub mod game;
pub mod minimax;
pub mod montecarlo;
pub mod moves;
pub mod rng;
pub mod strategy;
pub mod tile;
pub mod village;
