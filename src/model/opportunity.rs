//! Opportunity (tender) and line-item types.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One procurement tender under evaluation.
///
/// The free-text sections mirror the eight-section intake shape produced by
/// the upstream extraction collaborator. All fields are read-only to the
/// pipeline; exactly one opportunity is selected per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Opportunity {
    /// Project / tender name
    pub project_name: String,
    /// Issuing authority
    pub issued_by: String,
    /// Tender category, if the source provides one
    pub category: String,
    /// Submission deadline as received (may be empty or unparseable)
    pub submission_deadline: String,

    // Free-text sections
    pub project_overview: String,
    pub scope_of_supply: String,
    pub technical_specifications: String,
    pub testing_requirements: String,
    pub delivery_timeline: String,
    pub pricing_details: String,
    pub evaluation_criteria: String,
    pub submission_format: String,
}

impl Opportunity {
    /// Parsed submission deadline, if the raw string is parseable.
    #[must_use]
    pub fn deadline(&self) -> Option<NaiveDate> {
        parse_deadline(&self.submission_deadline)
    }

    /// The combined free text the coarse matcher scans: scope of supply
    /// plus technical specifications.
    #[must_use]
    pub fn matching_text(&self) -> String {
        format!("{} {}", self.scope_of_supply, self.technical_specifications)
    }
}

/// Parse a submission deadline in any of the formats tender sites emit.
///
/// Accepts `YYYY-MM-DD`, an ISO datetime with an optional trailing `Z`, and
/// `MM/DD/YYYY`. Returns `None` for anything else — a missing deadline is a
/// missing-signal condition, not an error.
#[must_use]
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim().trim_end_matches('Z');
    if raw.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(d);
    }
    None
}

/// Stable synthetic identifier for a line item.
///
/// Assigned once at intake and used as the join key between the matcher and
/// pricing stages. Joining on the raw line-item text would silently drop
/// rows whenever the text is re-derived with different whitespace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct LineItemId(pub u32);

impl std::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// One discrete product requirement extracted from an opportunity's scope
/// of supply.
///
/// `specs` carries the requirement fields the extraction collaborator pulled
/// out of the text (voltage, conductor, insulation, ...). The pipeline never
/// interprets them; they are passed through to the final report as
/// `rfp_specs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    pub id: LineItemId,
    /// Requested scope text for this item
    pub text: String,
    /// Extracted requirement fields, in extraction order
    #[serde(default)]
    pub specs: IndexMap<String, String>,
}

impl LineItem {
    /// Create a line item with no extracted spec fields.
    #[must_use]
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id: LineItemId(id),
            text: text.into(),
            specs: IndexMap::new(),
        }
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self(0)
    }
}
