//! Lexical rules mapping tender testing language to test codes.
//!
//! The table is data, not code: an ordered list of (pattern, code-set)
//! pairs evaluated top to bottom with set-union accumulation. A pattern
//! matching anywhere in the lower-cased text activates all its codes.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// One keyword rule: a pattern over lower-cased tender text and the test
/// codes it activates.
#[derive(Debug, Clone, Copy)]
pub struct TestRule {
    /// Regex over lower-cased text
    pub pattern: &'static str,
    /// Codes activated by the pattern
    pub codes: &'static [&'static str],
}

/// The high-voltage withstand variants; at most one survives the voltage
/// filter.
pub const HIGH_VOLTAGE_WITHSTAND_CODES: [&str; 3] =
    ["HVWT-1.1KV", "HVWT-3.5KV", "HVWT-11KV"];

/// Minimal set applied when the testing section is empty or matches no
/// rule.
pub const DEFAULT_TEST_CODES: [&str; 3] = ["RT-01", "IRT-10M", "DOC-01"];

/// Keyword-to-code rules, in evaluation order.
pub const TEST_KEYWORD_RULES: &[TestRule] = &[
    // High voltage withstand tests
    TestRule {
        pattern: r"high\s*voltage\s*withstand",
        codes: &["HVWT-1.1KV", "HVWT-3.5KV", "HVWT-11KV"],
    },
    TestRule {
        pattern: r"hv\s*withstand",
        codes: &["HVWT-1.1KV", "HVWT-3.5KV", "HVWT-11KV"],
    },
    TestRule {
        pattern: r"voltage\s*withstand",
        codes: &["HVWT-1.1KV", "HVWT-3.5KV", "HVWT-11KV"],
    },
    // Insulation resistance
    TestRule {
        pattern: r"insulation\s*resistance",
        codes: &["IRT-10M"],
    },
    TestRule {
        pattern: r"\birt\b",
        codes: &["IRT-10M"],
    },
    // Tensile / mechanical
    TestRule {
        pattern: r"tensile\s*strength",
        codes: &["TST-360", "TST-350"],
    },
    TestRule {
        pattern: r"mechanical\s*(?:test|testing|strength)",
        codes: &["TST-360", "MI-01"],
    },
    TestRule {
        pattern: r"mechanical\s*installation",
        codes: &["MII-01"],
    },
    TestRule {
        pattern: r"mechanical\s*inspection",
        codes: &["MI-01"],
    },
    // Documentation / certification
    TestRule {
        pattern: r"documentation",
        codes: &["DOC-01"],
    },
    TestRule {
        pattern: r"certif(?:icate|ication)",
        codes: &["DOC-01"],
    },
    // Routine tests
    TestRule {
        pattern: r"routine\s*(?:test|testing|insulation)",
        codes: &["RT-01", "ET-01"],
    },
    // Acceptance tests
    TestRule {
        pattern: r"acceptance\s*(?:test|testing)",
        codes: &["AT-01", "AT-02"],
    },
    // Type tests
    TestRule {
        pattern: r"type\s*(?:test|testing)",
        codes: &["TT-01"],
    },
    // Electrical tests
    TestRule {
        pattern: r"electrical\s*(?:test|testing)",
        codes: &["ET-01", "ET-02"],
    },
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    TEST_KEYWORD_RULES
        .iter()
        .map(|rule| {
            (
                Regex::new(rule.pattern).expect("static test rule pattern"),
                rule.codes,
            )
        })
        .collect()
});

/// All codes activated by the rules over the given lower-cased text.
#[must_use]
pub(crate) fn matching_codes(lower_text: &str) -> BTreeSet<String> {
    let mut codes = BTreeSet::new();
    for (pattern, rule_codes) in COMPILED_RULES.iter() {
        if pattern.is_match(lower_text) {
            codes.extend(rule_codes.iter().map(|c| (*c).to_string()));
        }
    }
    codes
}
