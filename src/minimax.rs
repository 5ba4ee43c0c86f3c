//! Alpha-beta minimax with iterative deepening under a wall-clock budget.
//!
//! The search deepens one ply at a time starting from depth 1. Each depth
//! iteration scores every root move with standard alpha-beta over
//! cloned-state lookahead; the deadline is threaded through the recursion
//! and checked on every entry. When the deadline passes mid-iteration the
//! whole iteration is abandoned (a cancelled search returns `None`, never a
//! partial score) and the best move of the last fully-completed depth is
//! kept.
//!
//! Plies are single placements, not whole turns, so consecutive plies may
//! belong to the same player; whether a node maximizes or minimizes follows
//! from whose placement it is.

use std::time::{Duration, Instant};

use crate::constants::MAX_SEARCH_DEPTH;
use crate::eval::evaluate;
use crate::game::GameState;
use crate::moves::{legal_moves, Move};
use crate::rng::GameRng;
use crate::strategy::{pick_best, Strategy};
use crate::tile::PlayerColor;

pub struct Minimax {
    think_time: Duration,
    randomize: bool,
    tolerance: f64,
    rng: GameRng,
}

impl Minimax {
    pub fn new(think_time: Duration, randomize: bool, tolerance: f64, rng: GameRng) -> Self {
        Self {
            think_time,
            randomize,
            tolerance,
            rng,
        }
    }
}

impl Strategy for Minimax {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }
        let deadline = Instant::now() + self.think_time;
        let player = state.current_player();

        let mut completed: Option<Vec<(Move, f64)>> = None;
        for depth in 1..=MAX_SEARCH_DEPTH {
            match search_root(state, &moves, depth, player, deadline) {
                Some(scored) => {
                    log::debug!("minimax completed depth {depth}");
                    completed = Some(scored);
                }
                // Out of time mid-iteration: the partial results are
                // discarded, not merged.
                None => break,
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        match completed {
            Some(scored) => pick_best(&scored, self.randomize, self.tolerance, &mut self.rng),
            // The budget expired before even depth 1 finished. That is a
            // cancellation, not an empty move list; fall back to the first
            // legal move.
            None => {
                log::debug!("minimax budget expired before depth 1; falling back");
                moves.into_iter().next()
            }
        }
    }
}

/// Score every root move at the given depth. `None` when the deadline
/// expired before the iteration finished.
fn search_root(
    state: &GameState,
    moves: &[Move],
    depth: u32,
    player: PlayerColor,
    deadline: Instant,
) -> Option<Vec<(Move, f64)>> {
    let mut scored = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut child = state.clone();
        child.apply(mv);
        // A full window at the root keeps every root score exact, which the
        // tolerance-randomized pick depends on.
        let score = alphabeta(
            &child,
            depth.saturating_sub(1),
            f64::NEG_INFINITY,
            f64::INFINITY,
            player,
            deadline,
        )?;
        scored.push((mv.clone(), score));
    }
    Some(scored)
}

/// Alpha-beta over single placements. Returns `None` the moment the
/// deadline passes; `?` propagates the cancellation straight up without
/// recording anything.
fn alphabeta(
    state: &GameState,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    player: PlayerColor,
    deadline: Instant,
) -> Option<f64> {
    if Instant::now() >= deadline {
        return None;
    }
    if depth == 0 || state.is_over() {
        return Some(evaluate(state, player));
    }
    let moves = legal_moves(state);
    if moves.is_empty() {
        return Some(evaluate(state, player));
    }

    if state.current_player() == player {
        let mut best = f64::NEG_INFINITY;
        for mv in &moves {
            let mut child = state.clone();
            child.apply(mv);
            let score = alphabeta(&child, depth - 1, alpha, beta, player, deadline)?;
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        Some(best)
    } else {
        let mut best = f64::INFINITY;
        for mv in &moves {
            let mut child = state.clone();
            child.apply(mv);
            let score = alphabeta(&child, depth - 1, alpha, beta, player, deadline)?;
            best = best.min(score);
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TOLERANCE;
    use crate::tile::Tile;

    fn domino(id: u32) -> Tile {
        Tile::new(
            id,
            format!("domino-{id}"),
            vec![vec![true, true], vec![false, false]],
        )
    }

    #[test]
    fn test_returns_a_legal_move() {
        let game = GameState::new(vec![domino(0)]);
        let mut bot = Minimax::new(
            Duration::from_millis(50),
            false,
            DEFAULT_TOLERANCE,
            GameRng::seeded(1),
        );
        let mv = bot.choose(&game).expect("moves exist");
        assert!(legal_moves(&game).contains(&mv));
    }

    #[test]
    fn test_zero_budget_still_moves() {
        let game = GameState::new(vec![domino(0)]);
        let mut bot = Minimax::new(
            Duration::ZERO,
            false,
            DEFAULT_TOLERANCE,
            GameRng::seeded(1),
        );
        // An expired budget is a cancellation, not "no moves".
        assert!(bot.choose(&game).is_some());
    }
}
