//! Five-factor bid viability scorer.
//!
//! Scores one opportunity against its candidate matches. Component scores
//! live in [0, 100]; the final score is their weighted sum. Every component
//! returns 0 for an empty match list.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{ComponentWeights, ScoringParams};
use super::curves::{exp_decay_weight, logistic_band_score};
use crate::matching::SpecMatch;
use crate::model::ProductCatalog;
use crate::utils::{round2, round4};

/// Markup applied over estimated material cost when projecting a contract
/// value from quick matches.
const ESTIMATE_MARKUP: f64 = 1.25;

/// Assumed cost ratio when no matched product has catalog pricing.
const FALLBACK_COST_RATIO: f64 = 0.70;

/// Margin floor below which the price score is halved.
const THIN_MARGIN: f64 = 0.05;
const THIN_MARGIN_PENALTY: f64 = 0.5;

/// Margin ceiling above which the quoted price is treated as unrealistic.
const RICH_MARGIN: f64 = 0.50;
const RICH_MARGIN_PENALTY: f64 = 0.6;

/// Lead time assumed when no matched product has catalog data.
const FALLBACK_LEAD_TIME_DAYS: f64 = 30.0;
/// Lead time at which the delivery base score starts dropping.
const COMFORT_LEAD_TIME_DAYS: f64 = 15.0;
const LEAD_TIME_SLOPE: f64 = 0.8;
const DELIVERY_FLOOR: f64 = 40.0;
/// Fraction of the remaining days a lead time may consume before the
/// deadline penalty applies.
const DEADLINE_PRESSURE_RATIO: f64 = 0.7;
const DEADLINE_PENALTY: f64 = 0.7;

/// Standards bodies recognized by the compliance factor.
const STANDARD_KEYWORDS: [&str; 4] = ["is", "iec", "ieee", "iso"];
const WARRANTY_CAP_YEARS: f64 = 5.0;

/// MOQ above which a product counts against supply consistency.
const HIGH_MOQ_METERS: u32 = 500;

/// The five component scores, 0-100 each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentScores {
    pub technical_match: f64,
    pub price_competitiveness: f64,
    pub delivery_capability: f64,
    pub compliance: f64,
    pub risk_assessment: f64,
}

impl ComponentScores {
    /// Component values in weight order.
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
}

/// Discrete grade band for a final score.
///
/// The bands partition [0, 100]: lower bounds are inclusive, so every score
/// maps to exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[non_exhaustive]
pub enum Grade {
    /// Excellent: 85+
    #[serde(rename = "A+")]
    APlus,
    /// Very good: 75-85
    A,
    /// Good: 65-75
    #[serde(rename = "B+")]
    BPlus,
    /// Satisfactory: 55-65
    B,
    /// Marginal: 45-55
    C,
    /// Poor: below 45
    D,
}

impl Grade {
    /// Grade band for a final score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::APlus
        } else if score >= 75.0 {
            Self::A
        } else if score >= 65.0 {
            Self::BPlus
        } else if score >= 55.0 {
            Self::B
        } else if score >= 45.0 {
            Self::C
        } else {
            Self::D
        }
    }

    /// Letter form.
    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Qualitative description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::APlus => "Excellent",
            Self::A => "Very Good",
            Self::BPlus => "Good",
            Self::B => "Satisfactory",
            Self::C => "Marginal",
            Self::D => "Poor",
        }
    }

    /// Combined report label, e.g. `"A+ (Excellent)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.letter(), self.description())
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Complete viability assessment for one opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[must_use]
pub struct ViabilityScore {
    /// Weighted final score, 0-100, rounded to 2 decimals
    pub final_score: f64,
    /// Final score scaled to 0-1 for sorting, rounded to 4 decimals
    pub normalized_score: f64,
    /// Grade band of the final score
    pub grade: Grade,
    /// Per-factor scores, 0-100 each
    pub component_scores: ComponentScores,
    /// Per-factor score times its weight
    pub weighted_contributions: ComponentScores,
    /// Deterministic action recommendation
    pub recommendation: String,
}

/// Bid viability scorer over an immutable product catalog.
#[derive(Debug, Clone)]
pub struct ViabilityScorer<'a> {
    catalog: &'a ProductCatalog,
    weights: ComponentWeights,
    params: ScoringParams,
}

impl<'a> ViabilityScorer<'a> {
    #[must_use]
    pub fn new(catalog: &'a ProductCatalog) -> Self {
        Self {
            catalog,
            weights: ComponentWeights::default(),
            params: ScoringParams::default(),
        }
    }

    /// Override the component weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: ComponentWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Override the curve parameters.
    #[must_use]
    pub const fn with_params(mut self, params: ScoringParams) -> Self {
        self.params = params;
        self
    }

    // ── Factor 1: technical match ───────────────────────────────────────

    /// Decay-weighted mean of the ranked match percentages, with a bonus
    /// for multiple strong matches.
    #[must_use]
    pub fn technical_match(&self, matches: &[SpecMatch]) -> f64 {
        let valid: Vec<&SpecMatch> = matches.iter().filter(|m| m.match_percent > 0.0).collect();
        if valid.is_empty() {
            return 0.0;
        }

        let mut total_score = 0.0;
        let mut total_weight = 0.0;
        for (rank, m) in valid.iter().take(self.params.technical_depth).enumerate() {
            let weight = exp_decay_weight(self.params.rank_decay, rank);
            total_score += m.match_percent * weight;
            total_weight += weight;
        }
        let mean = if total_weight > 0.0 {
            total_score / total_weight
        } else {
            0.0
        };

        let good = valid
            .iter()
            .filter(|m| m.match_percent >= self.params.good_match_threshold)
            .count();
        let multiplier = (1.0 + (good as f64 - 1.0) * self.params.good_match_bonus)
            .min(self.params.good_match_bonus_cap);

        (mean * multiplier).min(100.0)
    }

    // ── Factor 2: price competitiveness ─────────────────────────────────

    /// Margin quality versus the benchmark, via a logistic band around the
    /// ideal margin plus hard penalties for thin or implausible margins.
    #[must_use]
    pub fn price_competitiveness(&self, estimated_price: f64, matches: &[SpecMatch]) -> f64 {
        if estimated_price <= 0.0 || matches.is_empty() {
            return 0.0;
        }

        let mut actual_cost: f64 = matches
            .iter()
            .filter_map(|m| self.catalog.get(&m.product_id))
            .map(|p| p.unit_price_inr * f64::from(p.min_order_qty_m))
            .sum();
        if actual_cost <= 0.0 {
            actual_cost = estimated_price * FALLBACK_COST_RATIO;
        }

        let margin = (estimated_price - actual_cost) / estimated_price;
        let deviation = (margin - self.params.ideal_margin).abs();

        let mut score = logistic_band_score(
            deviation,
            self.params.margin_tolerance,
            self.params.margin_steepness,
        );
        if margin < THIN_MARGIN {
            score *= THIN_MARGIN_PENALTY;
        } else if margin > RICH_MARGIN {
            score *= RICH_MARGIN_PENALTY;
        }

        score.clamp(0.0, 100.0)
    }

    // ── Factor 3: delivery capability ───────────────────────────────────

    /// Match-weighted average lead time against the submission deadline.
    ///
    /// `as_of` is the evaluation date the remaining window is measured
    /// from.
    #[must_use]
    pub fn delivery_capability(
        &self,
        matches: &[SpecMatch],
        deadline: Option<NaiveDate>,
        as_of: NaiveDate,
    ) -> f64 {
        if matches.is_empty() {
            return 0.0;
        }

        let mut weighted_lead_time = 0.0;
        let mut total_weight = 0.0;
        for m in matches {
            if let Some(product) = self.catalog.get(&m.product_id) {
                weighted_lead_time += f64::from(product.lead_time_days) * m.match_percent;
                total_weight += m.match_percent;
            }
        }
        let avg_lead_time = if total_weight > 0.0 {
            weighted_lead_time / total_weight
        } else {
            FALLBACK_LEAD_TIME_DAYS
        };

        let mut base =
            (100.0 - (avg_lead_time - COMFORT_LEAD_TIME_DAYS) * LEAD_TIME_SLOPE).max(DELIVERY_FLOOR);

        if let Some(deadline) = deadline {
            let days_remaining = (deadline - as_of).num_days() as f64;
            if avg_lead_time > days_remaining * DEADLINE_PRESSURE_RATIO {
                base *= DEADLINE_PENALTY;
            }
        }

        base.clamp(0.0, 100.0)
    }

    // ── Factor 4: compliance ────────────────────────────────────────────

    /// Certification, standards coverage, and warranty depth across the
    /// matched products.
    #[must_use]
    pub fn compliance(&self, matches: &[SpecMatch]) -> f64 {
        let mut certified = 0u32;
        let mut with_standards = 0u32;
        let mut warranty_sum = 0.0;
        let mut total = 0u32;

        for m in matches {
            let Some(product) = self.catalog.get(&m.product_id) else {
                continue;
            };
            total += 1;
            if product.bis_certified {
                certified += 1;
            }
            let standards = product.standards_compliance.to_lowercase();
            if STANDARD_KEYWORDS.iter().any(|k| standards.contains(k)) {
                with_standards += 1;
            }
            warranty_sum += product.warranty_years.min(WARRANTY_CAP_YEARS);
        }

        if total == 0 {
            return 0.0;
        }

        let total = f64::from(total);
        let score = (f64::from(certified) / total) * 40.0
            + (f64::from(with_standards) / total) * 40.0
            + (warranty_sum / total / WARRANTY_CAP_YEARS) * 20.0;
        score.min(100.0)
    }

    // ── Factor 5: risk assessment ───────────────────────────────────────

    /// Availability, category diversity, and MOQ exposure. Higher is lower
    /// risk.
    #[must_use]
    pub fn risk_assessment(&self, matches: &[SpecMatch]) -> f64 {
        if matches.is_empty() {
            return 0.0;
        }

        let availability = ((matches.len() * 20) as f64).min(50.0);

        let categories: std::collections::HashSet<&str> =
            matches.iter().map(|m| m.category.as_str()).collect();
        let diversity = ((categories.len() * 15) as f64).min(30.0);

        let high_moq = matches
            .iter()
            .filter_map(|m| self.catalog.get(&m.product_id))
            .filter(|p| p.min_order_qty_m > HIGH_MOQ_METERS)
            .count();
        let consistency = (20.0 - high_moq as f64 * 5.0).max(0.0);

        (availability + diversity + consistency).min(100.0)
    }

    // ── Final score ─────────────────────────────────────────────────────

    /// Weighted final score with full breakdown.
    pub fn score(
        &self,
        matches: &[SpecMatch],
        estimated_price: f64,
        deadline: Option<NaiveDate>,
        as_of: NaiveDate,
    ) -> ViabilityScore {
        let technical = self.technical_match(matches);
        let price = self.price_competitiveness(estimated_price, matches);
        let delivery = self.delivery_capability(matches, deadline, as_of);
        let compliance = self.compliance(matches);
        let risk = self.risk_assessment(matches);

        let w = &self.weights;
        let final_score = technical * w.technical_match
            + price * w.price_competitiveness
            + delivery * w.delivery_capability
            + compliance * w.compliance
            + risk * w.risk_assessment;

        let grade = Grade::from_score(final_score);
        let recommendation = recommendation(final_score, technical, price);

        debug!(
            final_score,
            grade = grade.letter(),
            technical,
            price,
            delivery,
            compliance,
            risk,
            "viability scored"
        );

        ViabilityScore {
            final_score: round2(final_score),
            normalized_score: round4(final_score / 100.0),
            grade,
            component_scores: ComponentScores {
                technical_match: round2(technical),
                price_competitiveness: round2(price),
                delivery_capability: round2(delivery),
                compliance: round2(compliance),
                risk_assessment: round2(risk),
            },
            weighted_contributions: ComponentScores {
                technical_match: round2(technical * w.technical_match),
                price_competitiveness: round2(price * w.price_competitiveness),
                delivery_capability: round2(delivery * w.delivery_capability),
                compliance: round2(compliance * w.compliance),
                risk_assessment: round2(risk * w.risk_assessment),
            },
            recommendation,
        }
    }
}

/// Project a contract value from quick matches: the summed material cost of
/// every matched product, marked up by the benchmark margin.
#[must_use]
pub fn estimate_contract_value(matches: &[SpecMatch], catalog: &ProductCatalog) -> f64 {
    let material: f64 = matches
        .iter()
        .filter_map(|m| catalog.get(&m.product_id))
        .map(|p| p.unit_price_inr * f64::from(p.min_order_qty_m))
        .sum();
    material * ESTIMATE_MARKUP
}

/// Action recommendation from the final score, with a conditional tier that
/// names the weak component.
fn recommendation(final_score: f64, technical: f64, price: f64) -> String {
    let text = if final_score >= 75.0 {
        "STRONGLY RECOMMEND — Proceed with bid preparation"
    } else if final_score >= 60.0 {
        if technical < 60.0 {
            "CONDITIONAL — Technical gaps identified, assess feasibility"
        } else if price < 60.0 {
            "CONDITIONAL — Pricing optimisation needed, review cost structure"
        } else {
            "RECOMMEND — Good opportunity with minor optimisation potential"
        }
    } else if final_score >= 45.0 {
        "CAUTION — Significant gaps, evaluate strategic value before proceeding"
    } else {
        "DO NOT PURSUE — Poor fit, resources better allocated elsewhere"
    };
    text.to_string()
}
