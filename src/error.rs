//! Configuration error taxonomy
//!
//! Construction-time errors only. A strategy that misbehaves mid-match
//! (choice outside the domain, degenerate inference input) is a broken
//! implementation and panics rather than returning one of these.

use thiserror::Error;

/// Errors raised while building players or a tournament roster.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `p_defect` for the random strategy is outside [0, 1] or not finite.
    #[error("defect probability {value} outside [0, 1] for strategy '{strategy}'")]
    ProbabilityOutOfRange { strategy: &'static str, value: f64 },

    /// `opp_thres` for a belief-driven strategy is outside [0, 1] or not finite.
    #[error("opponent threshold {value} outside [0, 1] for strategy '{strategy}'")]
    ThresholdOutOfRange { strategy: &'static str, value: f64 },

    /// A round robin needs at least two participants.
    #[error("roster needs at least two strategies, got {got}")]
    RosterTooSmall { got: usize },

    /// Display names index the score matrix, so they must be unique.
    #[error("duplicate strategy name '{name}' in roster")]
    DuplicateName { name: String },
}
