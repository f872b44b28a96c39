//! Scoring weights and curve parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weights for the five viability components (sum to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComponentWeights {
    /// Weight for technical match
    pub technical_match: f64,
    /// Weight for price competitiveness
    pub price_competitiveness: f64,
    /// Weight for delivery capability
    pub delivery_capability: f64,
    /// Weight for compliance
    pub compliance: f64,
    /// Weight for risk assessment
    pub risk_assessment: f64,
}

impl ComponentWeights {
    /// Return weights as an array for iteration, in component order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 5] {
        [
            self.technical_match,
            self.price_competitiveness,
            self.delivery_capability,
            self.compliance,
            self.risk_assessment,
        ]
    }

    /// Check if weights are properly normalized (sum to ~1.0).
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        let sum: f64 = self.as_array().iter().sum();
        (sum - 1.0).abs() < 0.001
    }

    /// Normalize weights to sum to 1.0.
    pub fn normalize(&mut self) {
        let sum: f64 = self.as_array().iter().sum();
        if sum > 0.0 {
            self.technical_match /= sum;
            self.price_competitiveness /= sum;
            self.delivery_capability /= sum;
            self.compliance /= sum;
            self.risk_assessment /= sum;
        }
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            technical_match: 0.35,
            price_competitiveness: 0.25,
            delivery_capability: 0.15,
            compliance: 0.15,
            risk_assessment: 0.10,
        }
    }
}

/// Parameters of the scoring curves.
///
/// Kept explicit so the curves can be exercised across parameter ranges in
/// tests; the defaults are the production calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringParams {
    /// Exponential decay rate across ranked technical matches
    pub rank_decay: f64,
    /// Number of ranked matches the technical mean considers
    pub technical_depth: usize,
    /// Match percentage counted as a "good" match for the bonus
    pub good_match_threshold: f64,
    /// Bonus per additional good match beyond the first
    pub good_match_bonus: f64,
    /// Cap on the good-match bonus multiplier
    pub good_match_bonus_cap: f64,
    /// Profit-margin benchmark the price curve is centered on
    pub ideal_margin: f64,
    /// Tolerance band around the margin benchmark
    pub margin_tolerance: f64,
    /// Steepness of the logistic margin penalty
    pub margin_steepness: f64,
}

impl ScoringParams {
    /// Set the margin benchmark.
    #[must_use]
    pub const fn with_ideal_margin(mut self, ideal_margin: f64) -> Self {
        self.ideal_margin = ideal_margin;
        self
    }

    /// Set the decay rate across ranked matches.
    #[must_use]
    pub const fn with_rank_decay(mut self, rank_decay: f64) -> Self {
        self.rank_decay = rank_decay;
        self
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            rank_decay: 0.3,
            technical_depth: 5,
            good_match_threshold: 70.0,
            good_match_bonus: 0.05,
            good_match_bonus_cap: 1.15,
            ideal_margin: 0.25,
            margin_tolerance: 0.10,
            margin_steepness: 10.0,
        }
    }
}
