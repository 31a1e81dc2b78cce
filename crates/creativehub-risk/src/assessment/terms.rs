use serde::{Deserialize, Serialize};

use super::domain::{ApplicationData, RiskLevel};
use super::policy::round_half_up;

const RATE_FLOOR: f64 = 6.0;
const RATE_CEILING: f64 = 30.0;

const STANDARD_REPAYMENT_MONTHS: u32 = 24;
const EXTENDED_REPAYMENT_MONTHS: u32 = 36;
const LONG_REPAYMENT_MONTHS: u32 = 48;

const STANDARD_GRACE_MONTHS: u32 = 3;
const LONG_CYCLE_GRACE_MONTHS: u32 = 6;
const NEW_VENTURE_GRACE_MONTHS: u32 = 1;

/// Loan amount band, in the same units as the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedLoanAmount {
    pub min: u64,
    pub max: u64,
    pub optimal: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTerms {
    /// Annual interest rate band in whole percent, `[low, high]`.
    pub interest_rate_range: [u32; 2],
    pub repayment_period_months: u32,
    pub grace_period_months: u32,
}

/// Multipliers applied to the requested amount for a given overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AmountMultipliers {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

impl AmountMultipliers {
    pub(crate) fn for_score(overall: f64) -> Self {
        let score = overall / 100.0;
        Self {
            min: (score * 0.8).max(0.3),
            max: (0.5 + score * 0.7).min(1.2),
            optimal: (score * 1.1).min(1.0),
        }
    }
}

pub(crate) fn suggested_amount(data: &ApplicationData, overall: f64) -> SuggestedLoanAmount {
    let multipliers = AmountMultipliers::for_score(overall);
    let scaled = |multiplier: f64| whole_units(data.requested_amount * multiplier);

    SuggestedLoanAmount {
        min: scaled(multipliers.min),
        max: scaled(multipliers.max),
        optimal: scaled(multipliers.optimal),
    }
}

fn whole_units(amount: f64) -> u64 {
    // `as` saturates for out-of-range floats
    round_half_up(amount) as u64
}

pub(crate) fn suggested_terms(data: &ApplicationData, level: RiskLevel) -> SuggestedTerms {
    SuggestedTerms {
        interest_rate_range: interest_rate_range(data, level),
        repayment_period_months: repayment_period_months(data, level),
        grace_period_months: grace_period_months(data),
    }
}

fn interest_rate_range(data: &ApplicationData, level: RiskLevel) -> [u32; 2] {
    let (base_low, base_high) = level.base_rate_range();
    let risk = data.sector.weights().risk;

    let low = (base_low * risk).max(RATE_FLOOR);
    let high = (base_high * risk).min(RATE_CEILING);

    [round_half_up(low) as u32, round_half_up(high) as u32]
}

fn repayment_period_months(data: &ApplicationData, level: RiskLevel) -> u32 {
    let mut months = STANDARD_REPAYMENT_MONTHS;
    if data.requested_amount > 50_000.0 {
        months = EXTENDED_REPAYMENT_MONTHS;
    }
    if data.requested_amount > 100_000.0 {
        months = LONG_REPAYMENT_MONTHS;
    }
    if level == RiskLevel::High {
        months = months.min(STANDARD_REPAYMENT_MONTHS);
    }
    months
}

/// The new-venture rule runs last and overrides the sector extension.
fn grace_period_months(data: &ApplicationData) -> u32 {
    let mut months = STANDARD_GRACE_MONTHS;
    if data.sector.has_long_production_cycle() {
        months = LONG_CYCLE_GRACE_MONTHS;
    }
    if data.experience_years < 1 {
        months = NEW_VENTURE_GRACE_MONTHS;
    }
    months
}
