//! Small shared helpers.

/// Round to 2 decimal places. Used for percentages and money values so that
/// every stage rounds the same way and per-line values can be summed without
/// drift.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 4 decimal places. Used for normalized 0-1 scores.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_half_up() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(60_000.0), 60_000.0);
    }

    #[test]
    fn round4_normalized_scores() {
        assert_eq!(round4(0.123_456), 0.1235);
    }
}
