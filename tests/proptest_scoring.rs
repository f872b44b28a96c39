//! Property-based tests for the scoring, matching, and pricing laws.
//!
//! Ensures the score bounds, the weighted-sum law, the grade partition,
//! match-percentage monotonicity, and test-resolution idempotence hold
//! across random inputs.

use chrono::NaiveDate;
use proptest::prelude::*;
use rfp_tools::{
    extract_required_tests, CatalogProduct, ComponentWeights, Grade, LineItem, LineItemMatcher,
    ProductCatalog, SpecMatch, ViabilityScorer, VoltageClass,
};

// ============================================================================
// Fixtures and strategies
// ============================================================================

fn product(id: &str, unit_price: f64, moq: u32, lead_time: u32, certified: bool) -> CatalogProduct {
    CatalogProduct {
        id: id.to_string(),
        name: format!("Cable {id}"),
        category: if certified {
            "HT Power Cable".to_string()
        } else {
            "LT Control Cable".to_string()
        },
        voltage_rating: "11 kV".to_string(),
        conductor_material: "Copper".to_string(),
        insulation_type: "XLPE".to_string(),
        core_count: "3 Core".to_string(),
        armoring: "Galvanized Steel Wire".to_string(),
        standards_compliance: "IS 7098".to_string(),
        bis_certified: certified,
        unit_price_inr: unit_price,
        min_order_qty_m: moq,
        lead_time_days: lead_time,
        warranty_years: 2.5,
    }
}

fn fixture_catalog() -> ProductCatalog {
    ProductCatalog::new(vec![
        product("P0", 80.0, 300, 15, true),
        product("P1", 120.0, 500, 25, true),
        product("P2", 200.0, 800, 45, false),
        product("P3", 45.0, 1200, 10, false),
    ])
    .unwrap()
}

/// A match referencing either a known catalog product or an unknown id.
fn spec_match_strategy() -> impl Strategy<Value = SpecMatch> {
    (0usize..6, 0.0f64..=100.0).prop_map(|(idx, percent)| {
        let product_id = if idx < 4 {
            format!("P{idx}")
        } else {
            format!("UNKNOWN-{idx}")
        };
        SpecMatch {
            product_id,
            product_name: "Cable".to_string(),
            match_percent: (percent * 100.0).round() / 100.0,
            category: if idx % 2 == 0 {
                "HT Power Cable".to_string()
            } else {
                "LT Control Cable".to_string()
            },
            comparison: Vec::new(),
        }
    })
}

fn voltage_class_strategy() -> impl Strategy<Value = VoltageClass> {
    prop_oneof![
        Just(VoltageClass::Kv11),
        Just(VoltageClass::Kv1_1),
        Just(VoltageClass::LowVoltage),
        Just(VoltageClass::Unclassified),
    ]
}

/// Testing-requirements text assembled from known trigger phrases and
/// noise.
fn testing_text_strategy() -> impl Strategy<Value = String> {
    let phrases = prop::sample::subsequence(
        vec![
            "high voltage withstand test",
            "insulation resistance measurement",
            "tensile strength verification",
            "routine tests as per standard",
            "acceptance testing at site",
            "type test certificates",
            "electrical testing",
            "full documentation package",
            "delivery within 8 weeks",
            "packing in wooden drums",
        ],
        0..6,
    );
    phrases.prop_map(|parts| parts.join(". "))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn component_and_final_scores_are_bounded(
        matches in prop::collection::vec(spec_match_strategy(), 0..12),
        estimated_price in 0.0f64..5_000_000.0,
        deadline_offset in -30i64..365,
    ) {
        let catalog = fixture_catalog();
        let scorer = ViabilityScorer::new(&catalog);
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let deadline = Some(as_of + chrono::Duration::days(deadline_offset));

        let components = [
            scorer.technical_match(&matches),
            scorer.price_competitiveness(estimated_price, &matches),
            scorer.delivery_capability(&matches, deadline, as_of),
            scorer.compliance(&matches),
            scorer.risk_assessment(&matches),
        ];
        for (i, score) in components.iter().enumerate() {
            prop_assert!((0.0..=100.0).contains(score), "component {i} out of range: {score}");
        }

        let score = scorer.score(&matches, estimated_price, deadline, as_of);
        prop_assert!((0.0..=100.0).contains(&score.final_score));
        prop_assert!((0.0..=1.0).contains(&score.normalized_score));
    }

    #[test]
    fn final_score_is_the_weighted_component_sum(
        matches in prop::collection::vec(spec_match_strategy(), 0..12),
        estimated_price in 0.0f64..5_000_000.0,
    ) {
        let catalog = fixture_catalog();
        let scorer = ViabilityScorer::new(&catalog);
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        let score = scorer.score(&matches, estimated_price, None, as_of);
        let weights = ComponentWeights::default().as_array();
        let expected: f64 = [
            scorer.technical_match(&matches),
            scorer.price_competitiveness(estimated_price, &matches),
            scorer.delivery_capability(&matches, None, as_of),
            scorer.compliance(&matches),
            scorer.risk_assessment(&matches),
        ]
        .iter()
        .zip(weights.iter())
        .map(|(s, w)| s * w)
        .sum();

        prop_assert!(
            (score.final_score - expected).abs() <= 0.01,
            "final {} vs weighted sum {}",
            score.final_score,
            expected
        );
    }

    #[test]
    fn empty_matches_always_score_zero(
        estimated_price in 0.0f64..5_000_000.0,
        deadline_offset in -30i64..365,
    ) {
        let catalog = fixture_catalog();
        let scorer = ViabilityScorer::new(&catalog);
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let deadline = Some(as_of + chrono::Duration::days(deadline_offset));

        let score = scorer.score(&[], estimated_price, deadline, as_of);
        prop_assert_eq!(score.final_score, 0.0);
        prop_assert_eq!(score.grade, Grade::D);
        prop_assert_eq!(score.component_scores.as_array(), [0.0; 5]);
    }

    #[test]
    fn grade_partition_is_total_and_exclusive(score in 0.0f64..=100.0) {
        let grade = Grade::from_score(score);
        let expected = if score >= 85.0 {
            Grade::APlus
        } else if score >= 75.0 {
            Grade::A
        } else if score >= 65.0 {
            Grade::BPlus
        } else if score >= 55.0 {
            Grade::B
        } else if score >= 45.0 {
            Grade::C
        } else {
            Grade::D
        };
        prop_assert_eq!(grade, expected);
        // Exactly one band claims the score
        let claims = [
            score >= 85.0,
            (75.0..85.0).contains(&score),
            (65.0..75.0).contains(&score),
            (55.0..65.0).contains(&score),
            (45.0..55.0).contains(&score),
            score < 45.0,
        ];
        prop_assert_eq!(claims.iter().filter(|c| **c).count(), 1);
    }

    #[test]
    fn line_item_match_is_monotonic_in_dimensions(dims in prop::sample::subsequence(
        vec!["11 kv", "copper", "xlpe", "3 core", "galvanized steel wire", "is 7098"],
        0..=6,
    )) {
        let catalog = ProductCatalog::new(vec![product("P0", 80.0, 300, 15, true)]).unwrap();
        let text = format!("requirement: {}", dims.join(", "));
        let item = LineItem::new(0, text);

        let result = LineItemMatcher::new().match_line_item(&item, &catalog);
        if dims.is_empty() {
            // 0/6 dimensions: the product must not be listed at all
            prop_assert!(result.top_matches.is_empty());
            prop_assert!(result.selected.is_none());
        } else {
            prop_assert_eq!(result.top_matches.len(), 1);
            let expected = (dims.len() as f64 / 6.0 * 100.0 * 100.0).round() / 100.0;
            prop_assert_eq!(result.top_matches[0].match_percent, expected);
        }
    }

    #[test]
    fn test_resolution_is_idempotent_and_sorted(
        text in testing_text_strategy(),
        voltage in voltage_class_strategy(),
    ) {
        let first = extract_required_tests(&text, voltage);
        let second = extract_required_tests(&text, voltage);
        prop_assert_eq!(&first, &second);

        // Sorted and deduplicated
        prop_assert!(first.windows(2).all(|w| w[0] < w[1]));

        // Documentation is always present
        prop_assert!(first.iter().any(|c| c.starts_with("DOC")));

        // Never a degenerate documentation-only set
        prop_assert!(first.len() >= 2);

        // At most one withstand variant survives a classified voltage
        if voltage != VoltageClass::Unclassified {
            let hv = first.iter().filter(|c| c.starts_with("HVWT")).count();
            prop_assert!(hv <= 2, "unexpected withstand codes: {:?}", first);
            if voltage == VoltageClass::Kv11 {
                prop_assert!(!first.contains(&"HVWT-1.1KV".to_string()));
                prop_assert!(!first.contains(&"HVWT-3.5KV".to_string()));
            }
        }
    }
}
