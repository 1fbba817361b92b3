//! Iterated Prisoner's Dilemma simulator
//!
//! Repeated two-party games: each round both players privately choose to
//! cooperate or defect against the same shared history, the joint outcome is
//! scored from a fixed payoff table, and strategies are ranked by running
//! every ordered pair through a round-robin tournament.
//!
//! The strategy family ranges from the classic stateless players up to a
//! belief-driven family that infers the opponent's defect propensity with a
//! discretized Bayesian update (binomial likelihood over a probability grid)
//! and thresholds the posterior mean into a decision. All randomness comes
//! from seeded streams, so every match and tournament replays exactly.

mod belief;
mod error;
mod game;
mod random;
mod strategy;
mod tournament;

pub use belief::{BayesPolicy, OpponentBelief, DEFAULT_GRID_POINTS};
pub use error::ConfigError;
pub use game::{run_match, MatchSummary};
pub use random::SeededRng;
pub use strategy::{Choice, Player, Round, Slot, StrategySpec};
pub use tournament::{run_tournament, TournamentResult};

/// Payoff table for the Prisoner's Dilemma.
///
/// Returns `(payoff_a, payoff_b)`. Single source of truth for round scoring:
/// both the match engine and player bookkeeping go through this lookup.
pub fn payoff(a: Choice, b: Choice) -> (i32, i32) {
    match (a, b) {
        (Choice::Cooperate, Choice::Cooperate) => (-1, -1),
        (Choice::Cooperate, Choice::Defect) => (-3, 0),
        (Choice::Defect, Choice::Cooperate) => (0, -3),
        (Choice::Defect, Choice::Defect) => (-2, -2),
    }
}
