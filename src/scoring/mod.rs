//! Bid viability scoring.
//!
//! A five-factor weighted model producing a 0-100 score, a letter grade,
//! and a textual recommendation:
//!
//! | factor                | weight |
//! |-----------------------|--------|
//! | technical match       | 0.35   |
//! | price competitiveness | 0.25   |
//! | delivery capability   | 0.15   |
//! | compliance            | 0.15   |
//! | risk assessment       | 0.10   |
//!
//! Every component function returns 0 for an empty match list — that is the
//! defined "no matches" result, not an error. The scorer is pure: the clock
//! (`as_of`) is an explicit input, never read from the environment.

mod config;
mod curves;
mod viability;

pub use config::{ComponentWeights, ScoringParams};
pub use curves::{exp_decay_weight, logistic_band_score};
pub use viability::{
    estimate_contract_value, ComponentScores, Grade, ViabilityScore, ViabilityScorer,
};
