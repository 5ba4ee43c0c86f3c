//! Move-selection strategies and the bot configuration registry.
//!
//! Every strategy implements the single [`Strategy`] capability: choose a
//! move given read access to the game state. Strategies never mutate the
//! canonical state; lookahead always happens on clones.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_THINK_MS, DEFAULT_TOLERANCE};
use crate::game::GameState;
use crate::minimax::Minimax;
use crate::montecarlo::MonteCarlo;
use crate::moves::{legal_moves, Move};
use crate::rng::GameRng;

/// A move-selection strategy. `None` means no legal move exists.
pub trait Strategy {
    fn choose(&mut self, state: &GameState) -> Option<Move>;
}

/// The fixed strategy registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    Deterministic,
    Random,
    Minimax,
    MinimaxRandom,
    MonteCarlo,
}

#[derive(Debug, Error)]
#[error("unknown strategy `{0}`")]
pub struct UnknownStrategy(String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deterministic" => Ok(Self::Deterministic),
            "random" => Ok(Self::Random),
            "minimax" => Ok(Self::Minimax),
            "minimax-random" => Ok(Self::MinimaxRandom),
            "montecarlo" | "monte-carlo" => Ok(Self::MonteCarlo),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Per-bot options: which strategy to run and with what budget. Not
/// persisted anywhere; the driver passes one in per bot.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub kind: StrategyKind,
    /// Wall-clock thinking budget per move.
    pub think_time: Duration,
    /// Pick uniformly among moves scoring within `tolerance` of the best.
    pub randomize: bool,
    /// Relative tolerance for the randomized pick.
    pub tolerance: f64,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl BotConfig {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            think_time: Duration::from_millis(DEFAULT_THINK_MS),
            randomize: false,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }

    fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::new(),
        }
    }

    /// Build the configured strategy.
    pub fn build(&self) -> Box<dyn Strategy> {
        match self.kind {
            StrategyKind::Deterministic => Box::new(Deterministic),
            StrategyKind::Random => Box::new(Random::new(self.rng())),
            StrategyKind::Minimax => Box::new(Minimax::new(
                self.think_time,
                self.randomize,
                self.tolerance,
                self.rng(),
            )),
            StrategyKind::MinimaxRandom => Box::new(Minimax::new(
                self.think_time,
                true,
                self.tolerance,
                self.rng(),
            )),
            StrategyKind::MonteCarlo => Box::new(MonteCarlo::new(
                self.think_time,
                self.randomize,
                self.tolerance,
                self.rng(),
            )),
        }
    }
}

/// Always plays the first move in enumeration order.
pub struct Deterministic;

impl Strategy for Deterministic {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        legal_moves(state).into_iter().next()
    }
}

/// Plays a uniformly random legal move.
pub struct Random {
    rng: GameRng,
}

impl Random {
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Strategy for Random {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        let moves = legal_moves(state);
        self.rng.choose(&moves).cloned()
    }
}

/// Pick the best-scoring move. With `randomize` on, every move scoring
/// within `tolerance * |best|` of the best score is a candidate and one is
/// chosen uniformly at random; otherwise the strict best (first in scoring
/// order) wins.
pub(crate) fn pick_best(
    scored: &[(Move, f64)],
    randomize: bool,
    tolerance: f64,
    rng: &mut GameRng,
) -> Option<Move> {
    let best = scored
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::NEG_INFINITY, f64::max);
    if !best.is_finite() {
        return scored.first().map(|(m, _)| m.clone());
    }
    if randomize {
        let margin = best.abs() * tolerance;
        let candidates: Vec<&Move> = scored
            .iter()
            .filter(|&&(_, s)| s >= best - margin)
            .map(|(m, _)| m)
            .collect();
        rng.choose(&candidates).map(|&m| m.clone())
    } else {
        scored
            .iter()
            .find(|&&(_, s)| s == best)
            .map(|(m, _)| m.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(tile_id: u32) -> Move {
        Move::PlaceHouse {
            tile_id,
            row: 0,
            col: 0,
        }
    }

    #[test]
    fn test_strategy_registry_names() {
        assert_eq!(
            "deterministic".parse::<StrategyKind>().unwrap(),
            StrategyKind::Deterministic
        );
        assert_eq!(
            "minimax-random".parse::<StrategyKind>().unwrap(),
            StrategyKind::MinimaxRandom
        );
        assert_eq!(
            "monte-carlo".parse::<StrategyKind>().unwrap(),
            StrategyKind::MonteCarlo
        );
        assert!("alphago".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_pick_best_strict() {
        let scored = vec![(house(0), 1.0), (house(1), 3.0), (house(2), 2.0)];
        let mut rng = GameRng::seeded(1);
        assert_eq!(pick_best(&scored, false, 0.1, &mut rng), Some(house(1)));
    }

    #[test]
    fn test_pick_best_tolerance_window() {
        // 2.9 is within 10% of 3.0; 1.0 is not.
        let scored = vec![(house(0), 1.0), (house(1), 3.0), (house(2), 2.9)];
        let mut rng = GameRng::seeded(1);
        for _ in 0..64 {
            let picked = pick_best(&scored, true, 0.1, &mut rng).unwrap();
            assert_ne!(picked, house(0));
        }
    }
}
