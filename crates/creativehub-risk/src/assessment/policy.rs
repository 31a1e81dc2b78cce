use super::domain::RiskLevel;
use super::FactorScores;

/// Relative weight of each factor in the overall score. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub business_viability: f64,
    pub financial_stability: f64,
    pub entrepreneur_profile: f64,
    pub market_opportunity: f64,
    pub documentation_completeness: f64,
}

pub const FACTOR_WEIGHTS: FactorWeights = FactorWeights {
    business_viability: 0.25,
    financial_stability: 0.30,
    entrepreneur_profile: 0.20,
    market_opportunity: 0.15,
    documentation_completeness: 0.10,
};

impl FactorWeights {
    pub fn total(&self) -> f64 {
        self.business_viability
            + self.financial_stability
            + self.entrepreneur_profile
            + self.market_opportunity
            + self.documentation_completeness
    }
}

pub const LOW_RISK_THRESHOLD: f64 = 75.0;
pub const MEDIUM_RISK_THRESHOLD: f64 = 50.0;

const ELIGIBILITY_UPLIFT: f64 = 1.1;
const CONFIDENCE_CEILING: f64 = 95.0;
const DEFAULT_PROBABILITY_FLOOR: f64 = 0.02;
const DEFAULT_PROBABILITY_SCALE: f64 = 0.4;

pub(crate) fn overall_score(factors: &FactorScores) -> f64 {
    let weights = FACTOR_WEIGHTS;
    factors.business_viability * weights.business_viability
        + factors.financial_stability * weights.financial_stability
        + factors.entrepreneur_profile * weights.entrepreneur_profile
        + factors.market_opportunity * weights.market_opportunity
        + factors.documentation_completeness * weights.documentation_completeness
}

/// Thresholds are inclusive lower bounds and must be fed the unrounded score.
pub(crate) fn risk_level(overall: f64) -> RiskLevel {
    if overall >= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if overall >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

pub(crate) fn eligibility_score(overall: f64) -> f64 {
    (overall * ELIGIBILITY_UPLIFT).min(100.0)
}

pub(crate) fn confidence(documentation_completeness: f64) -> f64 {
    (60.0 + documentation_completeness * 0.35).min(CONFIDENCE_CEILING)
}

pub(crate) fn default_probability(overall: f64) -> f64 {
    ((100.0 - overall) / 100.0 * DEFAULT_PROBABILITY_SCALE).max(DEFAULT_PROBABILITY_FLOOR)
}

/// Rounds halves upward on the non-negative values the engine produces, matching
/// the integer display convention of the applications dashboard.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn round_to_cents(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}
