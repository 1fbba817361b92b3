//! Round-robin tournament engine
//!
//! Every ordered pair of distinct roster entries plays one match with fresh
//! player instances, so no belief or score state leaks between pairings.
//! The score matrix records each strategy's slot-A score against each
//! opponent; the diagonal is left undefined rather than zeroed, since a
//! self-play score of 0 would carry false game-theoretic meaning.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::run_match;
use crate::random::SeededRng;
use crate::strategy::{Player, Slot, StrategySpec};

/// Score matrix and derived rankings for one completed round robin.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentResult {
    names: Vec<String>,
    /// Row-major m×m; `cells[i][j]` is roster[i]'s slot-A score against
    /// roster[j]. Diagonal cells are `None`.
    cells: Vec<Option<i64>>,
}

impl TournamentResult {
    /// Strategy display names, in roster order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Slot-A score of `roster[i]` against `roster[j]`; `None` on the
    /// diagonal or out of range.
    pub fn score(&self, i: usize, j: usize) -> Option<i64> {
        let m = self.names.len();
        if i >= m || j >= m {
            return None;
        }
        self.cells[i * m + j]
    }

    /// Score looked up by strategy names instead of roster indices.
    pub fn score_by_name(&self, name_i: &str, name_j: &str) -> Option<i64> {
        let i = self.names.iter().position(|n| n == name_i)?;
        let j = self.names.iter().position(|n| n == name_j)?;
        self.score(i, j)
    }

    /// Mean score per strategy: its slot-A scores summed over all m−1
    /// opponents, divided by m−1. Self-play contributes nothing.
    pub fn mean_scores(&self) -> Vec<(String, f64)> {
        let m = self.names.len();
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let total: i64 = (0..m).filter_map(|j| self.cells[i * m + j]).sum();
                (name.clone(), total as f64 / (m - 1) as f64)
            })
            .collect()
    }

    /// Name of the strategy with the highest mean score.
    pub fn winner(&self) -> String {
        self.mean_scores()
            .into_iter()
            .max_by(|(_, x), (_, y)| x.total_cmp(y))
            .map(|(name, _)| name)
            .expect("tournament has at least two strategies")
    }
}

/// Run one match per ordered pair of distinct roster entries.
///
/// The whole roster is validated before any match runs; bad configuration
/// never gets as far as round 0. The pairing at ordered index k seeds its
/// slot-A player from stream 2k and its slot-B player from stream 2k+1, so
/// a repeat run over the same seed replays every match exactly.
pub fn run_tournament(
    roster: &[StrategySpec],
    rounds: usize,
    seed: &[u8; 32],
) -> Result<TournamentResult, ConfigError> {
    let m = roster.len();
    if m < 2 {
        return Err(ConfigError::RosterTooSmall { got: m });
    }
    for spec in roster {
        spec.validate()?;
    }

    let names: Vec<String> = roster.iter().map(|s| s.name().to_string()).collect();
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(ConfigError::DuplicateName { name: name.clone() });
        }
    }

    let mut cells: Vec<Option<i64>> = vec![None; m * m];
    let mut pairing: u64 = 0;

    for i in 0..m {
        for j in 0..m {
            if i == j {
                continue;
            }
            let mut player_a =
                Player::new(&roster[i], Slot::A, SeededRng::new(seed, 2 * pairing))?;
            let mut player_b =
                Player::new(&roster[j], Slot::B, SeededRng::new(seed, 2 * pairing + 1))?;

            run_match(&mut player_a, &mut player_b, rounds);
            debug!(
                "pairing {}: {} vs {} -> {}",
                pairing,
                names[i],
                names[j],
                player_a.score()
            );

            cells[i * m + j] = Some(player_a.score());
            pairing += 1;
        }
    }

    Ok(TournamentResult { names, cells })
}
