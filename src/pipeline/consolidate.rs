//! Merge of matcher and pricing output into the final report.
//!
//! The join key is the synthetic line-item id, never the raw text; a line
//! item with no pricing row is surfaced as a zero-cost row, not dropped.
//! Aggregate totals are copied from the pricing engine verbatim so the
//! summary cannot drift from the per-line rounding.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::matching::LineItemResult;
use crate::model::{LineItemId, Opportunity};
use crate::pricing::{ConsolidatedPricing, PricingRow};
use crate::reports::{BidViability, CostSummary, FinalReport, LineItemRow};
use crate::scoring::ViabilityScore;

/// Ranked matches emitted per report row.
pub const REPORT_TOP_N: usize = 3;

/// Join line-item results with pricing rows and assemble the report.
#[must_use]
pub fn consolidate(
    opportunity: &Opportunity,
    score: &ViabilityScore,
    items: &[LineItemResult],
    pricing: &ConsolidatedPricing,
) -> FinalReport {
    let pricing_by_id: IndexMap<LineItemId, &PricingRow> = pricing
        .line_item_pricing
        .iter()
        .map(|row| (row.item_id, row))
        .collect();

    let line_items = items
        .iter()
        .map(|item| {
            let row = pricing_by_id.get(&item.id).copied();
            if row.is_none() {
                // The item had no pricing output upstream; keep it visible
                // with zero costs
                warn!(item = %item.id, "line item has no pricing row");
            }
            merge_row(item, row)
        })
        .collect();

    debug!(
        project = %opportunity.project_name,
        items = items.len(),
        grand_total = pricing.grand_total_inr,
        "report consolidated"
    );

    FinalReport {
        project_name: opportunity.project_name.clone(),
        issued_by: opportunity.issued_by.clone(),
        deadline: opportunity.submission_deadline.clone(),
        bid_viability: BidViability::from(score),
        line_items,
        summary: CostSummary {
            total_material_cost_inr: pricing.total_material_cost_inr,
            total_test_cost_inr: pricing.total_test_cost_inr,
            grand_total_inr: pricing.grand_total_inr,
        },
    }
}

fn merge_row(item: &LineItemResult, pricing: Option<&PricingRow>) -> LineItemRow {
    let top = item
        .top_matches
        .iter()
        .take(REPORT_TOP_N)
        .cloned()
        .collect();

    match pricing {
        Some(row) => LineItemRow {
            line_item: item.line_item.clone(),
            rfp_specs: item.specs.clone(),
            top_3_recommendations: top,
            selected_sku: item.selected.clone(),
            unit_price_inr: row.unit_price_inr,
            moq_meters: row.moq_meters,
            material_cost_inr: row.material_cost_inr,
            applicable_tests: row.applicable_tests.clone(),
            test_cost_inr: row.test_cost_inr,
            line_total_inr: row.line_total_inr,
        },
        None => LineItemRow {
            line_item: item.line_item.clone(),
            rfp_specs: item.specs.clone(),
            top_3_recommendations: top,
            selected_sku: item.selected.clone(),
            unit_price_inr: 0.0,
            moq_meters: 0,
            material_cost_inr: 0.0,
            applicable_tests: Vec::new(),
            test_cost_inr: 0.0,
            line_total_inr: 0.0,
        },
    }
}
