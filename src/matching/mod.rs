//! Spec matching engines for tender analysis.
//!
//! Two matchers share the [`SpecMatch`] result type:
//!
//! - [`QuickMatcher`]: a coarse, whole-document pass over the combined
//!   tender text. It feeds the bid viability scorer when ranking candidate
//!   opportunities and never produces the final recommendations.
//! - [`LineItemMatcher`]: the fine pass that scores every catalog product
//!   against six fixed spec dimensions per requested line item.
//!
//! Both are strict substring matchers over normalized text. That is a
//! compatibility requirement of the downstream pricing stage, not an
//! approximation of fuzzy matching.

mod line_item;
mod quick;
pub mod text;

pub use line_item::{LineItemMatcher, LineItemResult, LINE_ITEM_DIMENSIONS, LINE_ITEM_TOP_N};
pub use quick::{QuickMatcher, QUICK_MATCH_LIMIT};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::CatalogProduct;

/// The six spec dimensions compared by the line-item matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SpecDimension {
    Voltage,
    ConductorMaterial,
    Insulation,
    CoreCount,
    Armoring,
    Standards,
}

impl SpecDimension {
    /// All dimensions, in comparison-table order.
    pub const ALL: [Self; 6] = [
        Self::Voltage,
        Self::ConductorMaterial,
        Self::Insulation,
        Self::CoreCount,
        Self::Armoring,
        Self::Standards,
    ];

    /// Short name used in comparison tables and extracted spec keys.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::ConductorMaterial => "material",
            Self::Insulation => "insulation",
            Self::CoreCount => "cores",
            Self::Armoring => "armoring",
            Self::Standards => "standards",
        }
    }

    /// The catalog field this dimension compares against.
    #[must_use]
    pub fn product_value<'a>(&self, product: &'a CatalogProduct) -> &'a str {
        match self {
            Self::Voltage => &product.voltage_rating,
            Self::ConductorMaterial => &product.conductor_material,
            Self::Insulation => &product.insulation_type,
            Self::CoreCount => &product.core_count,
            Self::Armoring => &product.armoring,
            Self::Standards => &product.standards_compliance,
        }
    }
}

/// One row of a requirement-vs-product comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonRow {
    /// Dimension being compared
    pub dimension: SpecDimension,
    /// The requirement value extracted from the tender, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    /// The catalog product's value for this dimension
    pub product_value: String,
    /// Whether the product value was found in the item text
    pub matched: bool,
}

/// Result of comparing one opportunity or line item against one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpecMatch {
    /// Matched product id
    pub product_id: String,
    /// Matched product display name
    pub product_name: String,
    /// Match percentage, 0-100, rounded to 2 decimals
    #[serde(rename = "spec_match_percent")]
    pub match_percent: f64,
    /// Product category
    pub category: String,
    /// Field-by-field comparison (line-item matches only; empty for the
    /// coarse pass)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparison: Vec<ComparisonRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_names_are_stable() {
        let names: Vec<&str> = SpecDimension::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            ["voltage", "material", "insulation", "cores", "armoring", "standards"]
        );
    }
}
