//! Portfolio-level aggregation over a batch of assessments.

use serde::{Deserialize, Serialize};

use crate::assessment::{ApplicationData, RiskAssessmentResult, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub count: usize,
    pub average_requested_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBandCount {
    pub band: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    const fn ordered() -> [ScoreBand; 3] {
        [ScoreBand::High, ScoreBand::Medium, ScoreBand::Low]
    }

    const fn label(self) -> &'static str {
        match self {
            ScoreBand::High => "High (80-100)",
            ScoreBand::Medium => "Medium (60-79)",
            ScoreBand::Low => "Low (0-59)",
        }
    }

    fn for_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::High
        } else if score >= 60 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub total_applications: usize,
    pub total_requested: f64,
    pub total_suggested_optimal: u64,
    pub flagged_applications: usize,
    pub tiers: Vec<TierSummary>,
    pub score_bands: Vec<ScoreBandCount>,
}

impl PortfolioReport {
    pub fn from_assessments(assessments: &[(ApplicationData, RiskAssessmentResult)]) -> Self {
        let tiers = RiskLevel::ordered()
            .into_iter()
            .map(|level| {
                let amounts: Vec<f64> = assessments
                    .iter()
                    .filter(|(_, result)| result.risk_level == level)
                    .map(|(data, _)| data.requested_amount)
                    .collect();
                let average_requested_amount = if amounts.is_empty() {
                    0.0
                } else {
                    amounts.iter().sum::<f64>() / amounts.len() as f64
                };
                TierSummary {
                    risk_level: level,
                    risk_label: level.label().to_string(),
                    count: amounts.len(),
                    average_requested_amount,
                }
            })
            .collect();

        let score_bands = ScoreBand::ordered()
            .into_iter()
            .map(|band| ScoreBandCount {
                band: band.label().to_string(),
                count: assessments
                    .iter()
                    .filter(|(_, result)| ScoreBand::for_score(result.overall_score) == band)
                    .count(),
            })
            .collect();

        Self {
            total_applications: assessments.len(),
            total_requested: assessments
                .iter()
                .map(|(data, _)| data.requested_amount)
                .sum(),
            total_suggested_optimal: assessments
                .iter()
                .map(|(_, result)| result.suggested_loan_amount.optimal)
                .sum(),
            flagged_applications: assessments
                .iter()
                .filter(|(_, result)| !result.red_flags.is_empty())
                .count(),
            tiers,
            score_bands,
        }
    }

    pub fn tier(&self, level: RiskLevel) -> Option<&TierSummary> {
        self.tiers.iter().find(|tier| tier.risk_level == level)
    }
}
