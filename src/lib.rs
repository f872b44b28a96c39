//! **Bid viability scoring and cost estimation for procurement tenders.**
//!
//! `rfp-tools` evaluates competing procurement opportunities ("RFPs")
//! against a catalog of sellable products and testing services. For a set of
//! candidate tenders it produces a ranked bid-viability score per
//! opportunity, a best-effort mapping from each requested line item to the
//! top-matching catalog products, and a cost estimate combining material
//! and test charges.
//!
//! ## Key Features
//!
//! - **Opportunity selection**: scores every candidate with a five-factor
//!   weighted model (technical match, price competitiveness, delivery
//!   capability, compliance, risk) and selects the best one, or falls back
//!   to the nearest deadline.
//! - **Spec matching**: a coarse whole-document pass for pre-scoring and a
//!   fine six-dimension pass per line item, both strict substring matchers
//!   over normalized text.
//! - **Test extraction & pricing**: keyword rules map free-text testing
//!   requirements to test codes, filtered by the selected product's voltage
//!   class and priced against the services table.
//! - **Consolidation**: per-line matcher and pricing outputs merge by a
//!   stable line-item id into one JSON-serializable [`FinalReport`].
//!
//! Scoring favors graceful degradation over failure: missing signal
//! resolves to conservative fallbacks, and empty inputs propagate as empty
//! results. Hard errors exist only at the boundary (catalog loading, report
//! serialization).
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the read-only inputs — [`Opportunity`], [`LineItem`],
//!   and the two reference catalogs, passed explicitly through every call.
//! - **[`matching`]**: the [`QuickMatcher`] and [`LineItemMatcher`].
//! - **[`scoring`]**: the [`ViabilityScorer`] with its named curves and
//!   explicit weights.
//! - **[`pricing`]**: the keyword rule table and the [`PricingEngine`].
//! - **[`pipeline`]**: orchestration of select → match → price →
//!   consolidate, plus the [`LineItemSource`] seam for the external
//!   text-structuring collaborator.
//! - **[`reports`]**: the [`FinalReport`] payload and its JSON renderer.
//!
//! ## Getting Started
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rfp_tools::{
//!     load_reference_data, run_pipeline, LineItem, PipelineConfig, TechnicalBrief,
//! };
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (products, services) = load_reference_data(
//!         Path::new("products.json"),
//!         Path::new("test_services.json"),
//!     )?;
//!
//!     let opportunities: Vec<rfp_tools::Opportunity> = vec![/* from intake */];
//!     let splitter = |brief: &TechnicalBrief| -> Vec<LineItem> {
//!         // the external extraction collaborator goes here
//!         vec![LineItem::new(0, brief.scope_of_supply.clone())]
//!     };
//!
//!     let as_of = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
//!     if let Some(report) = run_pipeline(
//!         &opportunities,
//!         &splitter,
//!         &products,
//!         &services,
//!         &PipelineConfig::default(),
//!         as_of,
//!     ) {
//!         println!(
//!             "{}: {}/100 ({})",
//!             report.project_name, report.bid_viability.score, report.bid_viability.grade
//!         );
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize/u32 to f64 casts are pervasive in the scoring
    // math - all values are bounded in practice
    clippy::cast_precision_loss,
    // Variable names like `m`/`w` follow the scoring formulas
    clippy::similar_names
)]

pub mod error;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod pricing;
pub mod reports;
pub mod scoring;
pub mod utils;

// Re-export main types for convenience
pub use error::{ErrorContext, OptionContext, Result, RfpError};
pub use matching::{
    ComparisonRow, LineItemMatcher, LineItemResult, QuickMatcher, SpecDimension, SpecMatch,
};
pub use model::{
    CatalogProduct, LineItem, LineItemId, Opportunity, ProductCatalog, TestService,
    TestServiceCatalog, VoltageClass,
};
pub use pipeline::{
    consolidate, filter_upcoming, load_reference_data, render_report_json, run_pipeline,
    LineItemSource, PipelineConfig, PipelineError, PricingBrief, Selection, SelectionStrategy,
    TechnicalBrief,
};
pub use pricing::{
    extract_required_tests, ConsolidatedPricing, PricingEngine, PricingRow, TestCharge,
};
pub use reports::{BidViability, CostSummary, FinalReport, JsonReporter, LineItemRow};
pub use scoring::{
    estimate_contract_value, ComponentScores, ComponentWeights, Grade, ScoringParams,
    ViabilityScore, ViabilityScorer,
};
