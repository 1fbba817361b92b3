//! Bayesian opponent model
//!
//! A belief-driven player maintains a discretized distribution over the
//! opponent's per-round defect probability. Each round it re-scores every
//! candidate probability `q` on the grid with a binomial likelihood — the
//! chance of the observed defection count if `q` were the truth — multiplies
//! by the prior, and renormalizes. The four decision policies share this one
//! inference core and differ only in prior handling and thresholding.

use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;

use crate::random::SeededRng;
use crate::strategy::Choice;

/// Default number of candidate probabilities on the [0, 1] grid.
pub const DEFAULT_GRID_POINTS: usize = 1000;

/// How a belief-driven player turns its posterior into a choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BayesPolicy {
    /// Uniform prior every round; defect iff posterior mean ≥ threshold.
    Static,
    /// Previous posterior becomes the next prior; same threshold rule.
    Recursive,
    /// Recursive prior; below threshold, defect with probability equal to
    /// the posterior mean instead of cooperating outright.
    RecursiveStochasticA,
    /// Recursive prior; at or above threshold, defect with probability equal
    /// to the posterior mean; below it, always cooperate.
    RecursiveStochasticB,
}

impl BayesPolicy {
    /// Whether the posterior is carried forward as the next round's prior.
    pub fn carries_prior(self) -> bool {
        !matches!(self, BayesPolicy::Static)
    }

    /// Map a posterior mean to a choice.
    pub fn decide(self, posterior_mean: f64, opp_thres: f64, rng: &mut SeededRng) -> Choice {
        let above = posterior_mean >= opp_thres;
        match self {
            BayesPolicy::Static | BayesPolicy::Recursive => {
                if above {
                    Choice::Defect
                } else {
                    Choice::Cooperate
                }
            }
            BayesPolicy::RecursiveStochasticA => {
                if above || rng.bernoulli(posterior_mean) {
                    Choice::Defect
                } else {
                    Choice::Cooperate
                }
            }
            BayesPolicy::RecursiveStochasticB => {
                if above && rng.bernoulli(posterior_mean) {
                    Choice::Defect
                } else {
                    Choice::Cooperate
                }
            }
        }
    }
}

/// Discretized belief over the opponent's defect probability.
///
/// `prior` holds density values (uniform = 1.0 at every point); `posterior`
/// is normalized to sum to 1 over the grid after every update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpponentBelief {
    grid: Vec<f64>,
    prior: Vec<f64>,
    posterior: Vec<f64>,
    mean: f64,
    mode: f64,
}

impl OpponentBelief {
    /// Uniform belief over `points` grid values spanning [0, 1] inclusive.
    pub fn new(points: usize) -> Self {
        assert!(points >= 2, "belief grid needs at least two points");
        let step = 1.0 / (points - 1) as f64;
        let grid: Vec<f64> = (0..points).map(|i| i as f64 * step).collect();
        OpponentBelief {
            prior: vec![1.0; points],
            posterior: vec![1.0; points],
            grid,
            mean: 0.5,
            mode: 0.5,
        }
    }

    /// Fold one summary of the opponent's record into the belief.
    ///
    /// `observed` is the number of rounds seen so far, `defections` how many
    /// of them were defections. Round 0 never reaches this point; an empty
    /// record here is a contract violation.
    pub fn observe(&mut self, observed: usize, defections: usize, carry_prior: bool) {
        assert!(observed > 0, "belief update requires at least one observed round");
        assert!(defections <= observed, "defection count exceeds observed rounds");

        for (i, &q) in self.grid.iter().enumerate() {
            self.posterior[i] = binomial_pmf(observed, defections, q) * self.prior[i];
        }

        let total: f64 = self.posterior.iter().sum();
        debug_assert!(total > 0.0, "posterior mass vanished (grid underflow)");
        for p in &mut self.posterior {
            *p /= total;
        }

        self.mean = self
            .grid
            .iter()
            .zip(&self.posterior)
            .map(|(q, p)| q * p)
            .sum();

        let (argmax, _) = self
            .posterior
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });
        self.mode = self.grid[argmax];

        if carry_prior {
            self.prior.copy_from_slice(&self.posterior);
        }
    }

    /// Candidate defect probabilities, ascending over [0, 1].
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Normalized posterior density aligned with `grid()`.
    pub fn posterior(&self) -> &[f64] {
        &self.posterior
    }

    /// Expected defect probability under the posterior.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Grid value with maximum posterior density.
    pub fn mode(&self) -> f64 {
        self.mode
    }
}

/// Binomial pmf `P[X = d]` for `X ~ Binomial(n, q)`, evaluated in log space.
///
/// Endpoints are handled exactly: q = 0 puts all mass on d = 0, q = 1 on
/// d = n, so the grid's inclusive endpoints never produce NaN.
fn binomial_pmf(n: usize, d: usize, q: f64) -> f64 {
    if q <= 0.0 {
        return if d == 0 { 1.0 } else { 0.0 };
    }
    if q >= 1.0 {
        return if d == n { 1.0 } else { 0.0 };
    }
    let (n, d) = (n as f64, d as f64);
    let ln_coef = ln_gamma(n + 1.0) - ln_gamma(d + 1.0) - ln_gamma(n - d + 1.0);
    (ln_coef + d * q.ln() + (n - d) * (1.0 - q).ln()).exp()
}
