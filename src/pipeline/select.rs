//! Opportunity selection.
//!
//! Scores every candidate with the bid viability model and picks the best
//! one, or falls back to the simpler nearest-deadline rule. Candidate
//! scoring is independent per opportunity and runs in parallel; the final
//! pick is deterministic for a given input order regardless of completion
//! order.

use chrono::NaiveDate;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::matching::{QuickMatcher, SpecMatch};
use crate::model::{Opportunity, ProductCatalog};
use crate::scoring::{estimate_contract_value, ViabilityScore, ViabilityScorer};

use super::PipelineConfig;

/// Default selection window: tenders due within the next three months.
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// How the selector picks among candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SelectionStrategy {
    /// Score every candidate and take the highest bid viability
    #[default]
    HighestViability,
    /// Take the candidate with the nearest parseable deadline
    EarliestDeadline,
}

/// One scored candidate, in input order.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// Index into the candidate slice
    pub index: usize,
    /// Quick matches that fed the scorer
    pub matches: Vec<SpecMatch>,
    /// Projected contract value used for price scoring
    pub estimated_value: f64,
    /// Full viability breakdown
    pub score: ViabilityScore,
}

/// The selected opportunity with its viability breakdown.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub opportunity: &'a Opportunity,
    pub score: ViabilityScore,
}

/// Keep candidates whose parsed deadline falls within `window_days` of
/// `as_of`. Candidates without a parseable deadline are dropped: a tender
/// that cannot be dated cannot be submitted on time.
#[must_use]
pub fn filter_upcoming(
    opportunities: &[Opportunity],
    as_of: NaiveDate,
    window_days: i64,
) -> Vec<&Opportunity> {
    let horizon = as_of + chrono::Duration::days(window_days);
    opportunities
        .iter()
        .filter(|opp| {
            opp.deadline()
                .is_some_and(|due| as_of <= due && due <= horizon)
        })
        .collect()
}

/// Score every candidate with the quick matcher and viability model.
///
/// Results come back in input order, so downstream picks are deterministic.
#[must_use]
pub fn score_candidates(
    opportunities: &[&Opportunity],
    catalog: &ProductCatalog,
    config: &PipelineConfig,
    as_of: NaiveDate,
) -> Vec<ScoredCandidate> {
    let matcher = QuickMatcher::new();
    let scorer = ViabilityScorer::new(catalog)
        .with_weights(config.weights)
        .with_params(config.params);

    opportunities
        .par_iter()
        .enumerate()
        .map(|(index, opp)| {
            let matches = matcher.match_opportunity(opp, catalog);
            let estimated_value = estimate_contract_value(&matches, catalog);
            let score = scorer.score(&matches, estimated_value, opp.deadline(), as_of);
            debug!(
                index,
                project = %opp.project_name,
                final_score = score.final_score,
                "candidate scored"
            );
            ScoredCandidate {
                index,
                matches,
                estimated_value,
                score,
            }
        })
        .collect()
}

/// Select one opportunity from the candidates, or `None` when the set is
/// empty (or, in deadline mode, no candidate has a parseable deadline).
#[must_use]
pub fn select_opportunity<'a>(
    opportunities: &[&'a Opportunity],
    catalog: &ProductCatalog,
    config: &PipelineConfig,
    as_of: NaiveDate,
) -> Option<Selection<'a>> {
    if opportunities.is_empty() {
        return None;
    }

    match config.strategy {
        SelectionStrategy::HighestViability => {
            let scored = score_candidates(opportunities, catalog, config, as_of);
            // First of equal scores wins: ties resolve to input order
            let best = scored.into_iter().reduce(|best, candidate| {
                if candidate.score.final_score > best.score.final_score {
                    candidate
                } else {
                    best
                }
            })?;
            let opportunity = opportunities[best.index];
            info!(
                project = %opportunity.project_name,
                score = best.score.final_score,
                grade = %best.score.grade,
                "selected highest-viability opportunity"
            );
            Some(Selection {
                opportunity,
                score: best.score,
            })
        }
        SelectionStrategy::EarliestDeadline => {
            let (index, opportunity, _) = opportunities
                .iter()
                .enumerate()
                .filter_map(|(i, opp)| opp.deadline().map(|due| (i, *opp, due)))
                .min_by_key(|&(i, _, due)| (due, i))?;

            let scored = score_candidates(&[opportunity], catalog, config, as_of);
            let score = scored.into_iter().next()?.score;
            info!(
                index,
                project = %opportunity.project_name,
                deadline = %opportunity.submission_deadline,
                "selected earliest-deadline opportunity"
            );
            Some(Selection { opportunity, score })
        }
    }
}
