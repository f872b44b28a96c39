//! Test resolution and per-line cost assembly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules;
use crate::matching::LineItemResult;
use crate::model::{LineItemId, ProductCatalog, TestServiceCatalog, VoltageClass};
use crate::utils::round2;

/// Order quantity assumed when a selected product has no catalog row.
pub const FALLBACK_MOQ_METERS: u32 = 100;

/// Price and duration synthesized for codes absent from the price table.
const ESTIMATED_TEST_PRICE_INR: f64 = 10_000.0;
const ESTIMATED_TEST_DURATION_HOURS: f64 = 2.0;

/// One priced test applied to a line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestCharge {
    #[serde(rename = "test_code")]
    pub code: String,
    #[serde(rename = "test_name")]
    pub name: String,
    pub price_inr: f64,
    pub duration_hours: f64,
}

/// Full cost breakdown for one line item.
///
/// `line_total_inr` is always `material_cost_inr + test_cost_inr`, each
/// rounded to 2 decimals before the sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PricingRow {
    /// Join key back to the matcher's line item
    pub item_id: LineItemId,
    /// The requested scope text, for display
    pub line_item: String,
    /// Selected SKU, absent when no product matched
    pub sku: Option<String>,
    pub product_name: String,
    pub unit_price_inr: f64,
    pub moq_meters: u32,
    pub material_cost_inr: f64,
    pub applicable_tests: Vec<TestCharge>,
    pub test_cost_inr: f64,
    pub line_total_inr: f64,
    /// Set when the row degraded to a fallback (e.g. no product matched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Aggregated pricing output for one pipeline run.
///
/// The totals are sums of the already-rounded per-line values; the
/// consolidator copies them verbatim instead of recomputing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConsolidatedPricing {
    pub line_item_pricing: Vec<PricingRow>,
    pub total_material_cost_inr: f64,
    pub total_test_cost_inr: f64,
    pub grand_total_inr: f64,
}

/// Extract the applicable test codes from a tender's testing-requirements
/// text, filtered to the selected product's voltage class.
///
/// The result is deduplicated and sorted, so resolution is idempotent and
/// independent of rule-match order. Missing or unmatched text resolves to
/// the default minimal set, never an error.
#[must_use]
pub fn extract_required_tests(testing_requirements: &str, voltage: VoltageClass) -> Vec<String> {
    if testing_requirements.trim().is_empty() {
        return sorted_defaults();
    }

    let lower = testing_requirements.to_lowercase();
    let mut codes = rules::matching_codes(&lower);

    // Keep only the withstand test matching the product's voltage class
    let has_hv = codes
        .iter()
        .any(|c| rules::HIGH_VOLTAGE_WITHSTAND_CODES.contains(&c.as_str()));
    if has_hv {
        match voltage {
            VoltageClass::Kv11 => {
                codes.remove("HVWT-1.1KV");
                codes.remove("HVWT-3.5KV");
            }
            VoltageClass::Kv1_1 => {
                codes.remove("HVWT-11KV");
                codes.remove("HVWT-3.5KV");
            }
            VoltageClass::LowVoltage => {
                codes.remove("HVWT-11KV");
            }
            VoltageClass::Unclassified => {}
        }
    }

    // Documentation is always part of a bid package
    if !codes.iter().any(|c| c.starts_with("DOC")) {
        codes.insert("DOC-01".to_string());
    }

    // A documentation-only result is degenerate; widen to the default
    // non-HV tests
    if codes.len() == 1 {
        codes.insert("RT-01".to_string());
        codes.insert("IRT-10M".to_string());
    }

    codes.into_iter().collect()
}

fn sorted_defaults() -> Vec<String> {
    let mut defaults: Vec<String> = rules::DEFAULT_TEST_CODES
        .iter()
        .map(|c| (*c).to_string())
        .collect();
    defaults.sort();
    defaults
}

/// Price each resolved code against the services table. A code with no
/// catalog row is synthesized with an estimated price rather than failing.
#[must_use]
pub fn resolve_test_charges(codes: &[String], services: &TestServiceCatalog) -> Vec<TestCharge> {
    codes
        .iter()
        .map(|code| match services.get(code) {
            Some(service) => TestCharge {
                code: service.code.clone(),
                name: service.name.clone(),
                price_inr: service.price_inr,
                duration_hours: service.duration_hours,
            },
            None => {
                debug!(%code, "test code not in price table, using estimate");
                TestCharge {
                    code: code.clone(),
                    name: format!("Test {code} (estimated)"),
                    price_inr: ESTIMATED_TEST_PRICE_INR,
                    duration_hours: ESTIMATED_TEST_DURATION_HOURS,
                }
            }
        })
        .collect()
}

/// Prices matched line items: material from the product catalog, tests from
/// the services table.
#[derive(Debug, Clone)]
pub struct PricingEngine<'a> {
    products: &'a ProductCatalog,
    services: &'a TestServiceCatalog,
}

impl<'a> PricingEngine<'a> {
    #[must_use]
    pub const fn new(products: &'a ProductCatalog, services: &'a TestServiceCatalog) -> Self {
        Self { products, services }
    }

    /// Build the cost breakdown for every line item and the run totals.
    #[must_use]
    pub fn price_line_items(
        &self,
        items: &[LineItemResult],
        testing_requirements: &str,
    ) -> ConsolidatedPricing {
        let mut rows = Vec::with_capacity(items.len());
        let mut total_material = 0.0;
        let mut total_tests = 0.0;

        for item in items {
            let Some(selected) = &item.selected else {
                rows.push(PricingRow {
                    item_id: item.id,
                    line_item: item.line_item.clone(),
                    sku: None,
                    product_name: String::new(),
                    unit_price_inr: 0.0,
                    moq_meters: 0,
                    material_cost_inr: 0.0,
                    applicable_tests: Vec::new(),
                    test_cost_inr: 0.0,
                    line_total_inr: 0.0,
                    note: Some("No matching product found".to_string()),
                });
                continue;
            };

            let (unit_price, moq, voltage_rating, note) =
                match self.products.get(&selected.product_id) {
                    Some(product) => (
                        product.unit_price_inr,
                        product.min_order_qty_m,
                        product.voltage_rating.clone(),
                        None,
                    ),
                    None => (
                        0.0,
                        FALLBACK_MOQ_METERS,
                        String::new(),
                        Some("Selected product missing from catalog".to_string()),
                    ),
                };

            let material_cost = round2(unit_price * f64::from(moq));

            let codes = extract_required_tests(
                testing_requirements,
                VoltageClass::from_rating(&voltage_rating),
            );
            let tests = resolve_test_charges(&codes, self.services);
            let test_cost = round2(tests.iter().map(|t| t.price_inr).sum());
            let line_total = round2(material_cost + test_cost);

            total_material += material_cost;
            total_tests += test_cost;

            debug!(
                item = %item.id,
                sku = %selected.product_id,
                material_cost,
                test_cost,
                line_total,
                "line item priced"
            );

            rows.push(PricingRow {
                item_id: item.id,
                line_item: item.line_item.clone(),
                sku: Some(selected.product_id.clone()),
                product_name: selected.product_name.clone(),
                unit_price_inr: unit_price,
                moq_meters: moq,
                material_cost_inr: material_cost,
                applicable_tests: tests,
                test_cost_inr: test_cost,
                line_total_inr: line_total,
                note,
            });
        }

        let total_material = round2(total_material);
        let total_tests = round2(total_tests);
        ConsolidatedPricing {
            line_item_pricing: rows,
            total_material_cost_inr: total_material,
            total_test_cost_inr: total_tests,
            grand_total_inr: round2(total_material + total_tests),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::SpecMatch;
    use crate::model::{CatalogProduct, TestService};
    use indexmap::IndexMap;

    fn product(id: &str, voltage: &str, unit_price: f64, moq: u32) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: format!("Cable {id}"),
            category: "HT Power Cable".to_string(),
            voltage_rating: voltage.to_string(),
            conductor_material: "Copper".to_string(),
            insulation_type: "XLPE".to_string(),
            core_count: "3 Core".to_string(),
            armoring: "Galvanized Steel Wire".to_string(),
            standards_compliance: "IS 7098".to_string(),
            bis_certified: true,
            unit_price_inr: unit_price,
            min_order_qty_m: moq,
            lead_time_days: 30,
            warranty_years: 2.0,
        }
    }

    fn services() -> TestServiceCatalog {
        TestServiceCatalog::new(vec![
            TestService {
                code: "RT-01".to_string(),
                name: "Routine Insulation Test".to_string(),
                price_inr: 8_000.0,
                duration_hours: 1.0,
            },
            TestService {
                code: "IRT-10M".to_string(),
                name: "Insulation Resistance Test".to_string(),
                price_inr: 12_000.0,
                duration_hours: 1.0,
            },
            TestService {
                code: "DOC-01".to_string(),
                name: "Documentation and Certification".to_string(),
                price_inr: 10_000.0,
                duration_hours: 4.0,
            },
            TestService {
                code: "HVWT-11KV".to_string(),
                name: "High Voltage Withstand 11kV".to_string(),
                price_inr: 25_000.0,
                duration_hours: 3.0,
            },
            TestService {
                code: "ET-01".to_string(),
                name: "Electrical Test".to_string(),
                price_inr: 9_000.0,
                duration_hours: 2.0,
            },
        ])
        .unwrap()
    }

    fn result_with_selection(id: u32, product_id: &str) -> LineItemResult {
        let m = SpecMatch {
            product_id: product_id.to_string(),
            product_name: format!("Cable {product_id}"),
            match_percent: 100.0,
            category: "HT Power Cable".to_string(),
            comparison: Vec::new(),
        };
        LineItemResult {
            id: LineItemId(id),
            line_item: format!("line item {id}"),
            specs: IndexMap::new(),
            top_matches: vec![m.clone()],
            selected: Some(m),
        }
    }

    #[test]
    fn empty_text_yields_default_codes() {
        let codes = extract_required_tests("", VoltageClass::Kv11);
        assert_eq!(codes, ["DOC-01", "IRT-10M", "RT-01"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "Routine tests and insulation resistance per IS.";
        let first = extract_required_tests(text, VoltageClass::Unclassified);
        let second = extract_required_tests(text, VoltageClass::Unclassified);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] < w[1]), "sorted, deduplicated");
    }

    #[test]
    fn hv_filter_keeps_only_matching_class() {
        let text = "High voltage withstand test required, plus documentation.";

        let kv11 = extract_required_tests(text, VoltageClass::Kv11);
        assert!(kv11.contains(&"HVWT-11KV".to_string()));
        assert!(!kv11.contains(&"HVWT-1.1KV".to_string()));
        assert!(!kv11.contains(&"HVWT-3.5KV".to_string()));

        let kv1_1 = extract_required_tests(text, VoltageClass::Kv1_1);
        assert!(kv1_1.contains(&"HVWT-1.1KV".to_string()));
        assert!(!kv1_1.contains(&"HVWT-11KV".to_string()));

        // Unclassified ratings leave all variants in place
        let unknown = extract_required_tests(text, VoltageClass::Unclassified);
        assert!(unknown.contains(&"HVWT-11KV".to_string()));
        assert!(unknown.contains(&"HVWT-1.1KV".to_string()));
    }

    #[test]
    fn documentation_only_result_is_widened() {
        let codes = extract_required_tests(
            "Full documentation package required.",
            VoltageClass::Unclassified,
        );
        assert_eq!(codes, ["DOC-01", "IRT-10M", "RT-01"]);
    }

    #[test]
    fn no_hv_codes_without_withstand_language() {
        let codes = extract_required_tests(
            "Insulation resistance test required. Routine tests per IS standard.",
            VoltageClass::Unclassified,
        );
        assert!(codes.iter().all(|c| !c.starts_with("HVWT")));
        assert!(codes.contains(&"IRT-10M".to_string()));
        assert!(codes.contains(&"RT-01".to_string()));
        assert!(codes.contains(&"DOC-01".to_string()));
    }

    #[test]
    fn unknown_codes_are_synthesized() {
        let charges =
            resolve_test_charges(&["TT-01".to_string()], &services());
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].name, "Test TT-01 (estimated)");
        assert_eq!(charges[0].price_inr, 10_000.0);
    }

    #[test]
    fn material_cost_is_unit_price_times_moq() {
        let products = ProductCatalog::new(vec![product("A", "11 kV", 120.0, 500)]).unwrap();
        let services = services();
        let engine = PricingEngine::new(&products, &services);

        let pricing = engine.price_line_items(&[result_with_selection(1, "A")], "");
        let row = &pricing.line_item_pricing[0];
        assert_eq!(row.material_cost_inr, 60_000.0);
        assert_eq!(row.line_total_inr, row.material_cost_inr + row.test_cost_inr);
    }

    #[test]
    fn unselected_item_produces_zero_row() {
        let products = ProductCatalog::new(vec![product("A", "11 kV", 120.0, 500)]).unwrap();
        let services = services();
        let engine = PricingEngine::new(&products, &services);

        let item = LineItemResult {
            id: LineItemId(7),
            line_item: "unmatched item".to_string(),
            specs: IndexMap::new(),
            top_matches: Vec::new(),
            selected: None,
        };
        let pricing = engine.price_line_items(&[item], "routine tests");
        let row = &pricing.line_item_pricing[0];
        assert_eq!(row.sku, None);
        assert_eq!(row.line_total_inr, 0.0);
        assert_eq!(row.note.as_deref(), Some("No matching product found"));
        assert_eq!(pricing.grand_total_inr, 0.0);
    }

    #[test]
    fn missing_catalog_row_uses_fallback_moq() {
        let products = ProductCatalog::new(vec![product("A", "11 kV", 120.0, 500)]).unwrap();
        let services = services();
        let engine = PricingEngine::new(&products, &services);

        let pricing = engine.price_line_items(&[result_with_selection(1, "GHOST")], "");
        let row = &pricing.line_item_pricing[0];
        assert_eq!(row.sku.as_deref(), Some("GHOST"));
        assert_eq!(row.unit_price_inr, 0.0);
        assert_eq!(row.moq_meters, FALLBACK_MOQ_METERS);
        assert_eq!(row.material_cost_inr, 0.0);
        // Tests still priced from the default set
        assert!(row.test_cost_inr > 0.0);
    }

    #[test]
    fn totals_sum_rounded_lines() {
        let products = ProductCatalog::new(vec![
            product("A", "11 kV", 120.0, 500),
            product("B", "1.1 kV", 85.5, 300),
        ])
        .unwrap();
        let services = services();
        let engine = PricingEngine::new(&products, &services);

        let items = vec![result_with_selection(1, "A"), result_with_selection(2, "B")];
        let pricing = engine.price_line_items(&items, "routine tests and insulation resistance");

        let material: f64 = pricing
            .line_item_pricing
            .iter()
            .map(|r| r.material_cost_inr)
            .sum();
        let tests: f64 = pricing
            .line_item_pricing
            .iter()
            .map(|r| r.test_cost_inr)
            .sum();
        assert_eq!(pricing.total_material_cost_inr, round2(material));
        assert_eq!(pricing.total_test_cost_inr, round2(tests));
        assert_eq!(
            pricing.grand_total_inr,
            round2(pricing.total_material_cost_inr + pricing.total_test_cost_inr)
        );
    }
}
