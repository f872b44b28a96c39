//! Test-requirement extraction and cost assembly.
//!
//! The testing-requirements section of a tender is free text; an ordered
//! table of lexical rules maps it to test codes in the services price
//! table. The engine then prices material (unit price times MOQ) and tests
//! per line item and computes the run totals.
//!
//! Extraction is deliberately forgiving: empty text falls back to a minimal
//! default set, codes missing from the price table are synthesized with an
//! estimated price, and a line item without a selected SKU produces an
//! explicit zero-cost row instead of disappearing.

mod engine;
mod rules;

pub use engine::{
    extract_required_tests, resolve_test_charges, ConsolidatedPricing, PricingEngine, PricingRow,
    TestCharge, FALLBACK_MOQ_METERS,
};
pub use rules::{TestRule, DEFAULT_TEST_CODES, HIGH_VOLTAGE_WITHSTAND_CODES, TEST_KEYWORD_RULES};
