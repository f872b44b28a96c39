//! Final report payload.
//!
//! [`FinalReport`] is the consolidated, JSON-serializable output of one
//! pipeline run. Rendering beyond JSON (PDF, HTML) belongs to downstream
//! consumers; this module only defines the contract shape and its
//! serializer.

mod json;

pub use json::JsonReporter;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::matching::SpecMatch;
use crate::pricing::TestCharge;
use crate::scoring::{ComponentScores, ViabilityScore};

/// Bid viability section of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BidViability {
    /// Final weighted score, 0-100
    pub score: f64,
    /// Grade label, e.g. "A+ (Excellent)"
    pub grade: String,
    pub recommendation: String,
    pub component_scores: ComponentScores,
    pub weighted_contributions: ComponentScores,
}

impl From<&ViabilityScore> for BidViability {
    fn from(score: &ViabilityScore) -> Self {
        Self {
            score: score.final_score,
            grade: score.grade.label(),
            recommendation: score.recommendation.clone(),
            component_scores: score.component_scores,
            weighted_contributions: score.weighted_contributions,
        }
    }
}

/// One consolidated line-item row: specs, recommendations, and costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineItemRow {
    pub line_item: String,
    /// Requirement fields extracted at intake
    pub rfp_specs: IndexMap<String, String>,
    /// Leading ranked matches for the item
    pub top_3_recommendations: Vec<SpecMatch>,
    /// Best candidate, absent when nothing matched
    pub selected_sku: Option<SpecMatch>,
    pub unit_price_inr: f64,
    pub moq_meters: u32,
    pub material_cost_inr: f64,
    pub applicable_tests: Vec<TestCharge>,
    pub test_cost_inr: f64,
    pub line_total_inr: f64,
}

/// Aggregate cost totals, copied from the pricing engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostSummary {
    pub total_material_cost_inr: f64,
    pub total_test_cost_inr: f64,
    pub grand_total_inr: f64,
}

/// The complete consolidated output for one selected opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[must_use]
pub struct FinalReport {
    pub project_name: String,
    pub issued_by: String,
    /// Submission deadline as received
    pub deadline: String,
    pub bid_viability: BidViability,
    pub line_items: Vec<LineItemRow>,
    pub summary: CostSummary,
}
