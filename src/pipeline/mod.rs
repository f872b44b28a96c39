//! Pipeline orchestration: select → match → price → consolidate.
//!
//! The stages are synchronous, pure transformations over the opportunity
//! text and the two reference catalogs. Collaborators the crate does not
//! implement (intake extraction, persistence, rendering) plug in at the
//! seams: line-item splitting enters through [`LineItemSource`], and the
//! loaded catalogs are passed in explicitly.

mod briefs;
mod consolidate;
mod select;

pub use briefs::{PricingBrief, TechnicalBrief};
pub use consolidate::{consolidate, REPORT_TOP_N};
pub use select::{
    filter_upcoming, score_candidates, select_opportunity, ScoredCandidate, Selection,
    SelectionStrategy, DEFAULT_WINDOW_DAYS,
};

use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

use crate::matching::LineItemMatcher;
use crate::model::{LineItem, ProductCatalog, TestServiceCatalog};
use crate::pricing::PricingEngine;
use crate::reports::{FinalReport, JsonReporter};
use crate::scoring::{ComponentWeights, ScoringParams};

/// Structured pipeline error types for boundary failures.
///
/// Everything inside the pipeline math degrades gracefully; these errors
/// cover the two places a run can genuinely fail — loading reference data
/// and serializing the report.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a reference catalog
    #[error("Catalog load failed for {path}: {source}")]
    CatalogFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Report serialization failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// The seam to the excluded text-structuring collaborator: splits a
/// tender's scope into discrete line items with stable ids.
pub trait LineItemSource {
    fn split(&self, brief: &TechnicalBrief) -> Vec<LineItem>;
}

impl<F> LineItemSource for F
where
    F: Fn(&TechnicalBrief) -> Vec<LineItem>,
{
    fn split(&self, brief: &TechnicalBrief) -> Vec<LineItem> {
        self(brief)
    }
}

/// Run-level configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// How the selector picks among candidates
    pub strategy: SelectionStrategy,
    /// Deadline window filter; `None` evaluates all given candidates
    pub window_days: Option<i64>,
    /// Viability component weights
    pub weights: ComponentWeights,
    /// Scoring curve parameters
    pub params: ScoringParams,
}

impl PipelineConfig {
    /// Restrict candidates to deadlines within the default 90-day window.
    #[must_use]
    pub const fn with_default_window(mut self) -> Self {
        self.window_days = Some(DEFAULT_WINDOW_DAYS);
        self
    }

    /// Set the selection strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Load both reference catalogs from JSON files.
pub fn load_reference_data(
    products_path: &Path,
    services_path: &Path,
) -> Result<(ProductCatalog, TestServiceCatalog), PipelineError> {
    let products =
        ProductCatalog::from_json_file(products_path).map_err(|e| PipelineError::CatalogFailed {
            path: products_path.display().to_string(),
            source: e.into(),
        })?;
    let services = TestServiceCatalog::from_json_file(services_path).map_err(|e| {
        PipelineError::CatalogFailed {
            path: services_path.display().to_string(),
            source: e.into(),
        }
    })?;
    info!(
        products = products.len(),
        services = services.len(),
        "reference data loaded"
    );
    Ok((products, services))
}

/// Serialize a final report to JSON.
pub fn render_report_json(report: &FinalReport, pretty: bool) -> Result<String, PipelineError> {
    JsonReporter::new()
        .pretty(pretty)
        .render(report)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })
}

/// Run the full pipeline over a set of candidate opportunities.
///
/// Returns `None` when no opportunity survives selection (empty input, or
/// nothing inside the deadline window). That is the defined empty-input
/// result, not a failure.
#[must_use]
pub fn run_pipeline(
    opportunities: &[crate::model::Opportunity],
    splitter: &dyn LineItemSource,
    products: &ProductCatalog,
    services: &TestServiceCatalog,
    config: &PipelineConfig,
    as_of: NaiveDate,
) -> Option<FinalReport> {
    let candidates: Vec<&crate::model::Opportunity> = match config.window_days {
        Some(window) => filter_upcoming(opportunities, as_of, window),
        None => opportunities.iter().collect(),
    };
    if candidates.is_empty() {
        info!("no candidate opportunities to evaluate");
        return None;
    }

    let selection = select_opportunity(&candidates, products, config, as_of)?;
    let selected = selection.opportunity;

    let technical_brief = TechnicalBrief::from(selected);
    let pricing_brief = PricingBrief::from(selected);

    let items = splitter.split(&technical_brief);
    info!(
        project = %selected.project_name,
        line_items = items.len(),
        "line items received from splitter"
    );

    let results = LineItemMatcher::new().match_all(&items, products);
    let pricing = PricingEngine::new(products, services)
        .price_line_items(&results, &pricing_brief.testing_requirements);

    Some(consolidate(selected, &selection.score, &results, &pricing))
}
