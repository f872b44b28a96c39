//! Coarse whole-document matcher used for pre-scoring.
//!
//! Scans the combined scope-of-supply and technical-specification text for
//! at most three signals (voltage token, conductor family, insulation
//! family). Each signal that is present adds one point to the denominator,
//! so the percentage reflects only the dimensions the tender actually
//! talks about. Products with no evaluable dimension are skipped; an empty
//! result means "insufficient signal", never an error.

use tracing::debug;

use super::text;
use super::SpecMatch;
use crate::model::{CatalogProduct, Opportunity, ProductCatalog};
use crate::utils::round2;

/// Maximum number of coarse matches retained for scoring.
pub const QUICK_MATCH_LIMIT: usize = 10;

/// Coarse spec matcher feeding the bid viability scorer.
#[derive(Debug, Clone)]
pub struct QuickMatcher {
    limit: usize,
}

impl QuickMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: QUICK_MATCH_LIMIT,
        }
    }

    /// Override the retained-match cap.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Match an opportunity's combined text against the whole catalog.
    ///
    /// Returns up to [`QUICK_MATCH_LIMIT`] matches, percentage descending.
    #[must_use]
    pub fn match_opportunity(
        &self,
        opportunity: &Opportunity,
        catalog: &ProductCatalog,
    ) -> Vec<SpecMatch> {
        let combined = text::strip_punctuation(&opportunity.matching_text());
        let rfp_voltage = text::extract_voltage_token(&combined);

        let mut matches: Vec<SpecMatch> = catalog
            .iter()
            .filter_map(|product| score_product(&combined, rfp_voltage.as_deref(), product))
            .collect();

        matches.sort_by(|a, b| {
            b.match_percent
                .partial_cmp(&a.match_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(self.limit);

        debug!(
            project = %opportunity.project_name,
            candidates = matches.len(),
            voltage = rfp_voltage.as_deref().unwrap_or("-"),
            "quick match complete"
        );
        matches
    }
}

impl Default for QuickMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Score one product against the stripped tender text. Returns `None` when
/// no dimension is evaluable or the product matches nothing.
fn score_product(
    combined: &str,
    rfp_voltage: Option<&str>,
    product: &CatalogProduct,
) -> Option<SpecMatch> {
    let mut matched = 0u32;
    let mut total = 0u32;

    // Voltage: containment either way, after collapsing both sides
    if let Some(voltage) = rfp_voltage {
        total += 1;
        let product_voltage = text::compact(&product.voltage_rating);
        if product_voltage.contains(voltage) || voltage.contains(&product_voltage) {
            matched += 1;
        }
    }

    // Conductor material family
    let conductor = product.conductor_material.to_lowercase();
    if text::contains_any(combined, &["copper", "cu "]) {
        total += 1;
        if conductor.contains("copper") {
            matched += 1;
        }
    } else if text::contains_any(combined, &["aluminium", "aluminum", "al "]) {
        total += 1;
        if conductor.contains("alum") || conductor.contains("al") {
            matched += 1;
        }
    }

    // Insulation family
    let insulation = product.insulation_type.to_lowercase();
    if text::contains_any(combined, &["xlpe", "cross linked"]) {
        total += 1;
        if insulation.contains("xlpe") {
            matched += 1;
        }
    } else if combined.contains("pvc") {
        total += 1;
        if insulation.contains("pvc") {
            matched += 1;
        }
    }

    if total == 0 {
        return None;
    }

    let percent = round2(f64::from(matched) / f64::from(total) * 100.0);
    if percent <= 0.0 {
        return None;
    }

    Some(SpecMatch {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        match_percent: percent,
        category: product.category.clone(),
        comparison: Vec::new(),
    })
}
