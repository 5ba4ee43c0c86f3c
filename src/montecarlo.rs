//! Time-boxed Monte-Carlo playout search with convergence-based early
//! stopping.
//!
//! Within the budget the search repeatedly picks the candidate move with
//! the fewest simulations so far (ties broken randomly), applies it to a
//! clone of the state, and plays uniformly-random legal moves from there to
//! completion or a move cap. The terminal position scores +1/-1 for a win
//! or loss on largest-village size, +0.5/-0.5 when only the island
//! tie-break decides it, and 0 for a full draw, always from the acting
//! player's perspective.
//!
//! Every candidate keeps a window of its recent running-average samples.
//! Once each candidate has a minimum number of simulations and a full
//! window, the search stops early if, for every candidate, the averages of
//! the window's two halves agree to within a fixed threshold; the move
//! averages have stopped moving, so more playouts will not change the
//! ranking. One playout is the unit of work: the deadline is checked
//! between playouts, and a playout cut off by the deadline is discarded
//! rather than recorded.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::constants::{MAX_PLAYOUT_MOVES, MC_CONVERGENCE_DELTA, MC_MIN_SIMS, MC_WINDOW};
use crate::game::{GameState, VillageScore};
use crate::moves::{legal_moves, Move};
use crate::rng::GameRng;
use crate::strategy::{pick_best, Strategy};
use crate::tile::PlayerColor;
use crate::village;

pub struct MonteCarlo {
    think_time: Duration,
    randomize: bool,
    tolerance: f64,
    rng: GameRng,
}

struct Candidate {
    mv: Move,
    sims: u32,
    total: f64,
    /// Recent running-average samples, newest last.
    window: VecDeque<f64>,
}

impl Candidate {
    fn new(mv: Move) -> Self {
        Self {
            mv,
            sims: 0,
            total: 0.0,
            window: VecDeque::with_capacity(MC_WINDOW),
        }
    }

    fn mean(&self) -> f64 {
        if self.sims == 0 {
            0.0
        } else {
            self.total / self.sims as f64
        }
    }

    fn record(&mut self, score: f64) {
        self.sims += 1;
        self.total += score;
        if self.window.len() == MC_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(self.mean());
    }

    /// Whether this candidate's running average has settled: full window
    /// and the two half-window averages within the threshold.
    fn settled(&self) -> bool {
        if self.window.len() < MC_WINDOW {
            return false;
        }
        let half = MC_WINDOW / 2;
        let first: f64 = self.window.iter().take(half).sum::<f64>() / half as f64;
        let second: f64 = self.window.iter().skip(half).sum::<f64>() / half as f64;
        (first - second).abs() < MC_CONVERGENCE_DELTA
    }
}

impl MonteCarlo {
    pub fn new(think_time: Duration, randomize: bool, tolerance: f64, rng: GameRng) -> Self {
        Self {
            think_time,
            randomize,
            tolerance,
            rng,
        }
    }
}

impl Strategy for MonteCarlo {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }
        let deadline = Instant::now() + self.think_time;
        let player = state.current_player();
        let mut candidates: Vec<Candidate> = moves.into_iter().map(Candidate::new).collect();

        let mut playouts = 0u32;
        while Instant::now() < deadline {
            let idx = self.least_simulated(&candidates);
            let mut sim = state.clone();
            sim.apply(&candidates[idx].mv);
            let score = random_playout(&mut sim, player, &mut self.rng);
            candidates[idx].record(score);
            playouts += 1;

            if candidates.iter().all(|c| c.sims >= MC_MIN_SIMS)
                && candidates.iter().all(Candidate::settled)
            {
                log::debug!("montecarlo converged after {playouts} playouts");
                break;
            }
        }
        log::debug!("montecarlo ran {playouts} playouts");

        let simulated: Vec<(Move, f64)> = candidates
            .iter()
            .filter(|c| c.sims > 0)
            .map(|c| (c.mv.clone(), c.mean()))
            .collect();
        if simulated.is_empty() {
            // The budget expired before a single playout finished; a
            // cancellation, not an empty move list.
            log::debug!("montecarlo budget expired before any playout; falling back");
            return candidates.into_iter().next().map(|c| c.mv);
        }
        pick_best(&simulated, self.randomize, self.tolerance, &mut self.rng)
    }
}

impl MonteCarlo {
    /// Index of the candidate with the fewest simulations, ties broken
    /// uniformly at random.
    fn least_simulated(&mut self, candidates: &[Candidate]) -> usize {
        let min = candidates
            .iter()
            .map(|c| c.sims)
            .min()
            .unwrap_or(0);
        let tied: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.sims == min)
            .map(|(i, _)| i)
            .collect();
        tied[self.rng.index(tied.len())]
    }
}

/// Play uniformly-random legal moves until the game ends or the move cap is
/// reached, then score the final position for `player`.
fn random_playout(sim: &mut GameState, player: PlayerColor, rng: &mut GameRng) -> f64 {
    for _ in 0..MAX_PLAYOUT_MOVES {
        if sim.is_over() {
            break;
        }
        let moves = legal_moves(sim);
        let Some(mv) = rng.choose(&moves) else {
            break;
        };
        let mv = mv.clone();
        sim.apply(&mv);
    }
    terminal_score(sim, player)
}

/// Score a finished (or cut-off) position: +1/-1 on largest-village size,
/// +0.5/-0.5 when only the island count separates the players, 0 on a full
/// draw. Placed-tile villages only, matching the end-of-game rule.
fn terminal_score(state: &GameState, player: PlayerColor) -> f64 {
    let (mine, theirs) = match state.result() {
        Some(result) => match player {
            PlayerColor::Red => (result.red, result.blue),
            PlayerColor::Blue => (result.blue, result.red),
        },
        None => {
            let score = |color| {
                village::largest(&village::placed_villages(state, color))
                    .map(VillageScore::of)
                    .unwrap_or_default()
            };
            (score(player), score(player.other()))
        }
    };
    if mine.size != theirs.size {
        if mine.size > theirs.size { 1.0 } else { -1.0 }
    } else if mine.islands != theirs.islands {
        if mine.islands > theirs.islands { 0.5 } else { -0.5 }
    } else {
        0.0
    }
}
