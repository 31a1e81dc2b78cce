//! Risk and eligibility scoring for CreativeHub funding applications.
//!
//! The [`assessment`] engine is a pure function of a normalized [`ApplicationData`] record.
//! [`intake`] turns raw form submissions and CSV exports into that record, and [`portfolio`]
//! aggregates batches of assessments for reporting.

pub mod assessment;
pub mod config;
pub mod error;
pub mod intake;
pub mod portfolio;
pub mod telemetry;

pub use assessment::{
    assess_risk, ApplicationData, AssessmentError, CreditHistory, DocumentationFlags,
    EducationLevel, FactorScores, Gender, Region, RiskAssessmentEngine, RiskAssessmentResult,
    RiskLevel, Sector,
};
pub use intake::{assess_form, ApplicationForm, IntakeDefaults, IntakeError};
pub use portfolio::PortfolioReport;
