//! Deterministic risk and eligibility assessment for funding applications.
//!
//! The engine holds no state: identical [`ApplicationData`] always yields an identical
//! [`RiskAssessmentResult`], and all lookup tables are compile-time constants, so a single
//! engine may be shared freely across threads.

mod advice;
mod domain;
mod factors;
mod policy;
mod tables;
mod terms;

#[cfg(test)]
mod tests;

pub use advice::{Recommendation, RedFlag};
pub use domain::{
    ApplicationData, CreditHistory, DocumentationFlags, EducationLevel, Gender, Region, RiskLevel,
    Sector,
};
pub use policy::{FactorWeights, FACTOR_WEIGHTS, LOW_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
pub use tables::{RegionalFactors, SectorWeights, NEUTRAL_SECTOR_WEIGHTS};
pub use terms::{SuggestedLoanAmount, SuggestedTerms};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unrounded factor scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub business_viability: f64,
    pub financial_stability: f64,
    pub entrepreneur_profile: f64,
    pub market_opportunity: f64,
    pub documentation_completeness: f64,
}

impl FactorScores {
    fn rounded(&self) -> FactorBreakdown {
        FactorBreakdown {
            business_viability: whole_score(self.business_viability),
            financial_stability: whole_score(self.financial_stability),
            entrepreneur_profile: whole_score(self.entrepreneur_profile),
            market_opportunity: whole_score(self.market_opportunity),
            documentation_completeness: whole_score(self.documentation_completeness),
        }
    }
}

/// Factor scores as reported, rounded to whole points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub business_viability: u8,
    pub financial_stability: u8,
    pub entrepreneur_profile: u8,
    pub market_opportunity: u8,
    pub documentation_completeness: u8,
}

/// Complete assessment persisted alongside an application as its `ml_assessment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub overall_score: u8,
    pub eligibility_score: u8,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub factors: FactorBreakdown,
    pub recommendations: Vec<String>,
    pub red_flags: Vec<String>,
    pub predicted_default_probability: f64,
    pub suggested_loan_amount: SuggestedLoanAmount,
    pub suggested_terms: SuggestedTerms,
}

/// Raised when an application violates the engine's input contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

/// Stateless scorer; every method is a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAssessmentEngine;

impl RiskAssessmentEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, data: &ApplicationData) -> Result<RiskAssessmentResult, AssessmentError> {
        validate(data)?;

        let scores = self.factor_scores(data);
        let overall = self.overall_score(&scores);
        let risk_level = policy::risk_level(overall);

        let recommendations = advice::recommendations(data, &scores)
            .into_iter()
            .map(|recommendation| recommendation.message().to_string())
            .collect();
        let red_flags: Vec<String> = advice::red_flags(data, &scores)
            .into_iter()
            .map(|flag| flag.message().to_string())
            .collect();

        debug!(
            applicant = %data.applicant_name,
            sector = data.sector.label(),
            overall,
            risk_level = risk_level.label(),
            red_flags = red_flags.len(),
            "application assessed"
        );

        Ok(RiskAssessmentResult {
            overall_score: whole_score(overall),
            eligibility_score: whole_score(policy::eligibility_score(overall)),
            risk_level,
            confidence: whole_score(policy::confidence(scores.documentation_completeness)),
            factors: scores.rounded(),
            recommendations,
            red_flags,
            predicted_default_probability: policy::round_to_cents(policy::default_probability(
                overall,
            )),
            suggested_loan_amount: terms::suggested_amount(data, overall),
            suggested_terms: terms::suggested_terms(data, risk_level),
        })
    }

    /// Scores each factor without rounding.
    pub fn factor_scores(&self, data: &ApplicationData) -> FactorScores {
        FactorScores {
            business_viability: factors::business_viability(data),
            financial_stability: factors::financial_stability(data),
            entrepreneur_profile: factors::entrepreneur_profile(data),
            market_opportunity: factors::market_opportunity(data),
            documentation_completeness: factors::documentation_completeness(data),
        }
    }

    /// Weighted overall score before rounding; the risk tier is derived from this value.
    pub fn overall_score(&self, scores: &FactorScores) -> f64 {
        policy::overall_score(scores)
    }

    pub fn risk_level(&self, overall: f64) -> RiskLevel {
        policy::risk_level(overall)
    }
}

/// Convenience wrapper around [`RiskAssessmentEngine::assess`].
pub fn assess_risk(data: &ApplicationData) -> Result<RiskAssessmentResult, AssessmentError> {
    RiskAssessmentEngine.assess(data)
}

fn validate(data: &ApplicationData) -> Result<(), AssessmentError> {
    if !data.requested_amount.is_finite() {
        return Err(AssessmentError::InvalidInput {
            field: "requested_amount",
            reason: "must be a finite number",
        });
    }
    if data.requested_amount <= 0.0 {
        return Err(AssessmentError::InvalidInput {
            field: "requested_amount",
            reason: "must be greater than zero",
        });
    }

    let optional_amounts = [
        ("revenue", data.revenue),
        ("collateral_value", data.collateral_value),
    ];
    for (field, value) in optional_amounts {
        match value {
            Some(amount) if !amount.is_finite() => {
                return Err(AssessmentError::InvalidInput {
                    field,
                    reason: "must be a finite number",
                })
            }
            Some(amount) if amount < 0.0 => {
                return Err(AssessmentError::InvalidInput {
                    field,
                    reason: "must not be negative",
                })
            }
            _ => {}
        }
    }

    Ok(())
}

fn whole_score(value: f64) -> u8 {
    policy::round_half_up(value.clamp(0.0, 100.0)) as u8
}
