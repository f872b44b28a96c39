//! Per-line-item spec matcher.
//!
//! For every requested line item, each catalog product is scored on the six
//! fixed dimensions in [`SpecDimension::ALL`]. A dimension counts as matched
//! when the normalized catalog value appears verbatim in the normalized item
//! text. The percentage is always out of six — an item that names only a
//! voltage can still reach at most 1/6 per product.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::text;
use super::{ComparisonRow, SpecDimension, SpecMatch};
use crate::model::{CatalogProduct, LineItem, LineItemId, ProductCatalog};
use crate::utils::round2;

/// Number of dimensions every product is scored on.
pub const LINE_ITEM_DIMENSIONS: u32 = 6;

/// Number of ranked matches retained per line item.
pub const LINE_ITEM_TOP_N: usize = 5;

/// One row per requested scope line: the ranked matches and the single
/// selected pick.
///
/// Invariant: `selected`, when present, is the first element of
/// `top_matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineItemResult {
    /// Stable join key for the pricing stage
    pub id: LineItemId,
    /// The requested scope text
    pub line_item: String,
    /// Extracted requirement fields, passed through from intake
    pub specs: indexmap::IndexMap<String, String>,
    /// Top matches, percentage descending, at most [`LINE_ITEM_TOP_N`]
    pub top_matches: Vec<SpecMatch>,
    /// Best candidate, absent when nothing matched
    pub selected: Option<SpecMatch>,
}

/// Six-dimension matcher producing [`LineItemResult`]s.
#[derive(Debug, Clone)]
pub struct LineItemMatcher {
    top_n: usize,
}

impl LineItemMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top_n: LINE_ITEM_TOP_N,
        }
    }

    /// Override how many ranked matches are retained per item.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Match every line item against the catalog.
    #[must_use]
    pub fn match_all(&self, items: &[LineItem], catalog: &ProductCatalog) -> Vec<LineItemResult> {
        items
            .iter()
            .map(|item| self.match_line_item(item, catalog))
            .collect()
    }

    /// Match one line item against the catalog.
    #[must_use]
    pub fn match_line_item(&self, item: &LineItem, catalog: &ProductCatalog) -> LineItemResult {
        let item_text = text::normalize_ws(&item.text);

        let mut matches: Vec<SpecMatch> = catalog
            .iter()
            .filter_map(|product| score_product(&item_text, item, product))
            .collect();

        matches.sort_by(|a, b| {
            b.match_percent
                .partial_cmp(&a.match_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(self.top_n);

        let selected = matches.first().cloned();
        debug!(
            item = %item.id,
            matches = matches.len(),
            selected = selected.as_ref().map_or("-", |m| m.product_id.as_str()),
            "line item matched"
        );

        LineItemResult {
            id: item.id,
            line_item: item.text.clone(),
            specs: item.specs.clone(),
            top_matches: matches,
            selected,
        }
    }
}

impl Default for LineItemMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Score one product against one normalized item text. Products matching
/// none of the six dimensions are excluded entirely.
fn score_product(item_text: &str, item: &LineItem, product: &CatalogProduct) -> Option<SpecMatch> {
    let mut comparison = Vec::with_capacity(SpecDimension::ALL.len());
    let mut matched = 0u32;

    for dimension in SpecDimension::ALL {
        let product_value = dimension.product_value(product);
        let found = {
            let needle = text::normalize_ws(product_value);
            !needle.is_empty() && item_text.contains(&needle)
        };
        if found {
            matched += 1;
        }
        comparison.push(ComparisonRow {
            dimension,
            requirement: item.specs.get(dimension.name()).cloned(),
            product_value: product_value.to_string(),
            matched: found,
        });
    }

    if matched == 0 {
        return None;
    }

    let percent = round2(f64::from(matched) / f64::from(LINE_ITEM_DIMENSIONS) * 100.0);
    Some(SpecMatch {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        match_percent: percent,
        category: product.category.clone(),
        comparison,
    })
}
