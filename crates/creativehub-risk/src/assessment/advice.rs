use serde::{Deserialize, Serialize};

use super::domain::{ApplicationData, CreditHistory};
use super::FactorScores;

/// Advisory guidance returned to the applicant, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrengthenBusinessPlan,
    ImproveCashFlowDocumentation,
    SeekMentorship,
    CompleteDocumentation,
    OfferCollateral,
    ReduceRequestedAmount,
}

impl Recommendation {
    pub const fn message(self) -> &'static str {
        match self {
            Recommendation::StrengthenBusinessPlan => {
                "Strengthen your business plan with detailed market analysis and financial projections"
            }
            Recommendation::ImproveCashFlowDocumentation => {
                "Provide recent bank statements and improve cash flow documentation"
            }
            Recommendation::SeekMentorship => {
                "Consider additional training or mentorship in your sector"
            }
            Recommendation::CompleteDocumentation => {
                "Complete all required documentation to improve your application strength"
            }
            Recommendation::OfferCollateral => {
                "Consider providing collateral to improve loan terms and approval chances"
            }
            Recommendation::ReduceRequestedAmount => {
                "Consider starting with a smaller loan amount to build credit history"
            }
        }
    }
}

/// High-risk conditions surfaced to reviewers, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    LowFinancialStability,
    PoorCreditHistory,
    HighDebtRatio,
    LargeAmountLimitedExperience,
    BusinessViabilityConcerns,
}

impl RedFlag {
    pub const fn message(self) -> &'static str {
        match self {
            RedFlag::LowFinancialStability => "Very low financial stability indicators",
            RedFlag::PoorCreditHistory => "Poor credit history increases default risk",
            RedFlag::HighDebtRatio => "High debt-to-income ratio with existing loans",
            RedFlag::LargeAmountLimitedExperience => {
                "Large loan amount requested with limited business experience"
            }
            RedFlag::BusinessViabilityConcerns => "Business model viability concerns",
        }
    }
}

pub(crate) fn recommendations(data: &ApplicationData, scores: &FactorScores) -> Vec<Recommendation> {
    let rules = [
        (
            scores.business_viability < 70.0,
            Recommendation::StrengthenBusinessPlan,
        ),
        (
            scores.financial_stability < 60.0,
            Recommendation::ImproveCashFlowDocumentation,
        ),
        (
            scores.entrepreneur_profile < 60.0,
            Recommendation::SeekMentorship,
        ),
        (
            scores.documentation_completeness < 80.0,
            Recommendation::CompleteDocumentation,
        ),
        (
            data.positive_collateral().is_none(),
            Recommendation::OfferCollateral,
        ),
        (
            data.requested_amount > 50_000.0,
            Recommendation::ReduceRequestedAmount,
        ),
    ];

    rules
        .into_iter()
        .filter_map(|(triggered, recommendation)| triggered.then_some(recommendation))
        .collect()
}

pub(crate) fn red_flags(data: &ApplicationData, scores: &FactorScores) -> Vec<RedFlag> {
    let revenue_short_of_request = data
        .positive_revenue()
        .map(|revenue| revenue < data.requested_amount)
        .unwrap_or(true);

    let rules = [
        (
            scores.financial_stability < 40.0,
            RedFlag::LowFinancialStability,
        ),
        (
            data.credit_history == Some(CreditHistory::Poor),
            RedFlag::PoorCreditHistory,
        ),
        (
            data.has_existing_loans() && revenue_short_of_request,
            RedFlag::HighDebtRatio,
        ),
        (
            data.requested_amount > 100_000.0 && data.experience_years < 2,
            RedFlag::LargeAmountLimitedExperience,
        ),
        (
            scores.business_viability < 30.0,
            RedFlag::BusinessViabilityConcerns,
        ),
    ];

    rules
        .into_iter()
        .filter_map(|(triggered, flag)| triggered.then_some(flag))
        .collect()
}
