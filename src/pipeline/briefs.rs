//! Role-specific projections of the selected opportunity.
//!
//! The downstream collaborators each need only a slice of the tender: the
//! line-item splitter works from scope and technical text, the pricing
//! stage from testing and commercial text. The briefs make those contracts
//! explicit instead of handing the whole record around.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::Opportunity;

/// Scope-and-specs view consumed by the line-item splitter and matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TechnicalBrief {
    pub project_name: String,
    pub issued_by: String,
    pub submission_deadline: String,
    pub scope_of_supply: String,
    pub technical_specifications: String,
    pub testing_requirements: String,
    pub delivery_timeline: String,
    pub project_overview: String,
}

impl From<&Opportunity> for TechnicalBrief {
    fn from(opp: &Opportunity) -> Self {
        Self {
            project_name: opp.project_name.clone(),
            issued_by: opp.issued_by.clone(),
            submission_deadline: opp.submission_deadline.clone(),
            scope_of_supply: opp.scope_of_supply.clone(),
            technical_specifications: opp.technical_specifications.clone(),
            testing_requirements: opp.testing_requirements.clone(),
            delivery_timeline: opp.delivery_timeline.clone(),
            project_overview: opp.project_overview.clone(),
        }
    }
}

/// Testing-and-commercials view consumed by the pricing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PricingBrief {
    pub project_name: String,
    pub issued_by: String,
    pub submission_deadline: String,
    pub testing_requirements: String,
    pub pricing_details: String,
    pub evaluation_criteria: String,
    pub scope_of_supply: String,
}

impl From<&Opportunity> for PricingBrief {
    fn from(opp: &Opportunity) -> Self {
        Self {
            project_name: opp.project_name.clone(),
            issued_by: opp.issued_by.clone(),
            submission_deadline: opp.submission_deadline.clone(),
            testing_requirements: opp.testing_requirements.clone(),
            pricing_details: opp.pricing_details.clone(),
            evaluation_criteria: opp.evaluation_criteria.clone(),
            scope_of_supply: opp.scope_of_supply.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn briefs_project_their_sections() {
        let opp = Opportunity {
            project_name: "Feeder".to_string(),
            testing_requirements: "Routine tests".to_string(),
            pricing_details: "Per meter".to_string(),
            scope_of_supply: "Cables".to_string(),
            ..Default::default()
        };

        let technical = TechnicalBrief::from(&opp);
        assert_eq!(technical.scope_of_supply, "Cables");
        assert_eq!(technical.testing_requirements, "Routine tests");

        let pricing = PricingBrief::from(&opp);
        assert_eq!(pricing.pricing_details, "Per meter");
        assert_eq!(pricing.testing_requirements, "Routine tests");
    }
}
