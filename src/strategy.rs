//! Strategy definitions and player state
//!
//! A `StrategySpec` is the factory input: a type tag plus whatever
//! configuration that type needs. `Player::new` validates the configuration
//! and produces a `Player` bound to one slot of one match, carrying its own
//! score bookkeeping and, for belief-driven types, its opponent model.

use serde::{Deserialize, Serialize};

use crate::belief::{BayesPolicy, OpponentBelief, DEFAULT_GRID_POINTS};
use crate::error::ConfigError;
use crate::payoff;
use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Cooperate,
    Defect,
}

/// Which of the two match positions a player occupies.
///
/// The same strategy type can sit in either slot across matches; the slot
/// determines which side of each history entry is "self" vs "opponent".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// The other slot.
    pub fn opponent(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Joint outcome of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub a: Choice,
    pub b: Choice,
}

impl Round {
    /// The choice made by the player in `slot` this round.
    pub fn of(self, slot: Slot) -> Choice {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
        }
    }
}

/// Strategy type tag plus per-type configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrategySpec {
    /// Defect every round.
    AlwaysDefect,
    /// Cooperate every round.
    AlwaysCooperate,
    /// Defect with probability `p_defect`, independently each round.
    Random { p_defect: f64 },
    /// Cooperate first, then mirror the opponent's previous choice.
    TitForTat,
    /// Defect first, then play the opponent's majority choice so far
    /// (defect on an exact 50% split).
    Mimic,
    /// Belief-driven: Bayesian opponent model plus a decision policy.
    Bayes {
        policy: BayesPolicy,
        initial_choice: Choice,
        opp_thres: f64,
    },
}

impl StrategySpec {
    /// Display name; indexes the tournament score matrix.
    pub fn name(&self) -> &'static str {
        match self {
            StrategySpec::AlwaysDefect => "always_defect",
            StrategySpec::AlwaysCooperate => "always_cooperate",
            StrategySpec::Random { .. } => "random",
            StrategySpec::TitForTat => "tit_for_tat",
            StrategySpec::Mimic => "mimic",
            StrategySpec::Bayes { policy, .. } => match policy {
                BayesPolicy::Static => "bayes_static",
                BayesPolicy::Recursive => "bayes_recursive",
                BayesPolicy::RecursiveStochasticA => "bayes_stochastic_a",
                BayesPolicy::RecursiveStochasticB => "bayes_stochastic_b",
            },
        }
    }

    /// Reject out-of-range configuration before any round is played.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            StrategySpec::Random { p_defect } => {
                if !(0.0..=1.0).contains(&p_defect) || p_defect.is_nan() {
                    return Err(ConfigError::ProbabilityOutOfRange {
                        strategy: self.name(),
                        value: p_defect,
                    });
                }
            }
            StrategySpec::Bayes { opp_thres, .. } => {
                if !(0.0..=1.0).contains(&opp_thres) || opp_thres.is_nan() {
                    return Err(ConfigError::ThresholdOutOfRange {
                        strategy: self.name(),
                        value: opp_thres,
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Per-match mutable state behind each strategy type.
#[derive(Clone, Debug)]
enum State {
    AlwaysDefect,
    AlwaysCooperate,
    Random {
        p_defect: f64,
    },
    TitForTat,
    Mimic,
    Bayes {
        policy: BayesPolicy,
        initial_choice: Choice,
        opp_thres: f64,
        belief: OpponentBelief,
    },
}

/// One participant in one match: a strategy instance bound to a slot,
/// with cumulative score bookkeeping. Fresh per match, never reused.
#[derive(Clone, Debug)]
pub struct Player {
    name: &'static str,
    slot: Slot,
    score: i64,
    score_history: Vec<i32>,
    state: State,
    rng: SeededRng,
}

impl Player {
    /// Build a player from a validated spec, bound to `slot`.
    pub fn new(spec: &StrategySpec, slot: Slot, rng: SeededRng) -> Result<Player, ConfigError> {
        spec.validate()?;
        let state = match *spec {
            StrategySpec::AlwaysDefect => State::AlwaysDefect,
            StrategySpec::AlwaysCooperate => State::AlwaysCooperate,
            StrategySpec::Random { p_defect } => State::Random { p_defect },
            StrategySpec::TitForTat => State::TitForTat,
            StrategySpec::Mimic => State::Mimic,
            StrategySpec::Bayes {
                policy,
                initial_choice,
                opp_thres,
            } => State::Bayes {
                policy,
                initial_choice,
                opp_thres,
                belief: OpponentBelief::new(DEFAULT_GRID_POINTS),
            },
        };
        Ok(Player {
            name: spec.name(),
            slot,
            score: 0,
            score_history: Vec::new(),
            state,
            rng,
        })
    }

    /// Choose this round's move given the shared history of rounds 0..k−1.
    pub fn choose(&mut self, history: &[Round]) -> Choice {
        let opponent = self.slot.opponent();
        match &mut self.state {
            State::AlwaysDefect => Choice::Defect,
            State::AlwaysCooperate => Choice::Cooperate,
            State::Random { p_defect } => {
                if self.rng.bernoulli(*p_defect) {
                    Choice::Defect
                } else {
                    Choice::Cooperate
                }
            }
            State::TitForTat => match history.last() {
                None => Choice::Cooperate,
                Some(round) => round.of(opponent),
            },
            State::Mimic => {
                if history.is_empty() {
                    return Choice::Defect;
                }
                let defections = count_defections(history, opponent);
                // round-half-up: an exact 50% split defects
                if 2 * defections >= history.len() {
                    Choice::Defect
                } else {
                    Choice::Cooperate
                }
            }
            State::Bayes {
                policy,
                initial_choice,
                opp_thres,
                belief,
            } => {
                if history.is_empty() {
                    return *initial_choice;
                }
                let defections = count_defections(history, opponent);
                belief.observe(history.len(), defections, policy.carries_prior());
                policy.decide(belief.mean(), *opp_thres, &mut self.rng)
            }
        }
    }

    /// Record this player's payoff for a completed round.
    ///
    /// Must be called exactly once per round with the actual joint outcome.
    pub fn update_score(&mut self, round: Round) {
        let (pay_a, pay_b) = payoff(round.a, round.b);
        let own = match self.slot {
            Slot::A => pay_a,
            Slot::B => pay_b,
        };
        self.score_history.push(own);
        self.score += own as i64;
    }

    /// Display name of the underlying strategy.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The slot this player occupies.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Cumulative score over all completed rounds.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Per-round payoffs, one entry per completed round.
    pub fn score_history(&self) -> &[i32] {
        &self.score_history
    }

    /// Read-only view of the opponent model, for belief-driven players only.
    pub fn belief(&self) -> Option<&OpponentBelief> {
        match &self.state {
            State::Bayes { belief, .. } => Some(belief),
            _ => None,
        }
    }
}

fn count_defections(history: &[Round], slot: Slot) -> usize {
    history
        .iter()
        .filter(|round| round.of(slot) == Choice::Defect)
        .count()
}
