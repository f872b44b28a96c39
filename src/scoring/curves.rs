//! Named scoring curves.
//!
//! The decay and logistic shapes take their parameters explicitly so the
//! curves can be property-tested across parameter ranges instead of being
//! baked into the component functions as literals.

/// Exponential decay weight for a ranked position: `e^(−decay_rate · rank)`.
///
/// With the default decay rate of 0.3 the first five ranks weigh roughly
/// 1.0, 0.74, 0.55, 0.41, 0.30.
#[must_use]
pub fn exp_decay_weight(decay_rate: f64, rank: usize) -> f64 {
    (-decay_rate * rank as f64).exp()
}

/// Logistic penalty curve over a deviation from target:
/// `100 / (1 + e^(steepness · (deviation − tolerance)))`.
///
/// Scores near 100 while the deviation stays inside the tolerance band and
/// falls off sharply beyond it.
#[must_use]
pub fn logistic_band_score(deviation: f64, tolerance: f64, steepness: f64) -> f64 {
    100.0 / (1.0 + (steepness * (deviation - tolerance)).exp())
}
