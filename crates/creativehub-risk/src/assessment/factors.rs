//! The five factor scorers. Each starts from a base score, adds bounded contributions and
//! clamps to `[0, 100]`.

use super::domain::{ApplicationData, CreditHistory, DocumentationFlags, EducationLevel, Gender};

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

pub fn business_viability(data: &ApplicationData) -> f64 {
    let mut score = 50.0;

    score += data.sector.weights().growth * 15.0;

    if data.documents.business_plan {
        score += 15.0;
    }
    if data.documents.market_analysis {
        score += 10.0;
    }

    score += match data.experience_years {
        years if years >= 5 => 15.0,
        years if years >= 2 => 10.0,
        1 => 5.0,
        _ => 0.0,
    };

    if let Some(revenue) = data.positive_revenue() {
        score += (revenue / 50_000.0 * 20.0).min(20.0);
    }

    if let Some(employees) = data.employees.filter(|count| *count > 1) {
        score += (f64::from(employees) * 2.0).min(10.0);
    }

    clamp_score(score)
}

pub fn financial_stability(data: &ApplicationData) -> f64 {
    let mut score = 40.0;

    if data.documents.financial_statements {
        score += 20.0;
    }

    if let Some(revenue) = data.positive_revenue() {
        let loan_to_revenue = data.requested_amount / revenue;
        score += if loan_to_revenue < 0.5 {
            20.0
        } else if loan_to_revenue < 1.0 {
            15.0
        } else if loan_to_revenue < 2.0 {
            10.0
        } else {
            -10.0
        };
    }

    score += match data.credit_history {
        Some(CreditHistory::Excellent) => 25.0,
        Some(CreditHistory::Good) => 15.0,
        Some(CreditHistory::Fair) => 5.0,
        Some(CreditHistory::Poor) => -15.0,
        None => 0.0,
    };

    if data.has_existing_loans() {
        score -= 10.0;
    }

    if let Some(collateral) = data.positive_collateral() {
        let coverage = collateral / data.requested_amount;
        if coverage >= 1.0 {
            score += 15.0;
        } else if coverage >= 0.5 {
            score += 10.0;
        } else if coverage >= 0.25 {
            score += 5.0;
        }
    }

    clamp_score(score)
}

pub fn entrepreneur_profile(data: &ApplicationData) -> f64 {
    let mut score = 50.0;

    score += match data.age {
        25..=45 => 15.0,
        18..=24 => 10.0,
        46..=60 => 10.0,
        _ => 0.0,
    };

    score += match data.education {
        EducationLevel::Tertiary => 15.0,
        EducationLevel::Vocational => 10.0,
        EducationLevel::Other => 0.0,
    };

    if data.gender == Gender::Female {
        score += 5.0;
    }

    score += (f64::from(data.experience_years) * 4.0).min(20.0);

    clamp_score(score)
}

pub fn market_opportunity(data: &ApplicationData) -> f64 {
    let mut score = 50.0;

    score += data.sector.weights().market * 20.0;
    score += data.region.factors().market * 15.0;
    score += amount_scale_score(data.requested_amount);

    clamp_score(score)
}

/// Creative businesses are best served by mid-sized facilities.
fn amount_scale_score(amount: f64) -> f64 {
    if (10_000.0..=50_000.0).contains(&amount) {
        15.0
    } else if (5_000.0..10_000.0).contains(&amount) {
        10.0
    } else if amount > 50_000.0 && amount <= 100_000.0 {
        10.0
    } else if amount < 5_000.0 {
        5.0
    } else {
        0.0
    }
}

pub fn documentation_completeness(data: &ApplicationData) -> f64 {
    let present = data.documents.present() as f64;
    let required = DocumentationFlags::REQUIRED as f64;
    clamp_score(20.0 + present / required * 80.0)
}
