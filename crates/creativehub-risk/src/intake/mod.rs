//! Normalization of raw application submissions into [`ApplicationData`].
//!
//! Submissions arrive from several form versions and from the applications table, so field
//! names are accepted in both camelCase and snake_case, numbers may be sent as strings, and
//! document presence may be a boolean, a stored file reference or the plan text itself.
//! Text fields are reduced to the structured values the engine scores; anything that cannot be
//! matched falls back to a documented default and is logged rather than rejected.

pub mod csv;
mod parse;

pub use parse::parse_experience_years;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assessment::{
    ApplicationData, AssessmentError, CreditHistory, DocumentationFlags, EducationLevel, Gender,
    Region, RiskAssessmentEngine, RiskAssessmentResult, Sector,
};

/// Raw application as submitted by the intake forms or exported from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default, alias = "application_id", deserialize_with = "parse::optional_text")]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "applicantName",
        deserialize_with = "parse::optional_text"
    )]
    pub applicant_name: Option<String>,
    #[serde(
        default,
        alias = "businessName",
        deserialize_with = "parse::optional_text"
    )]
    pub business_name: Option<String>,
    #[serde(
        default,
        alias = "businessType",
        deserialize_with = "parse::optional_text"
    )]
    pub business_type: Option<String>,
    /// Stored records carry the value chain beside `business_type`; used when the latter is blank.
    #[serde(
        default,
        alias = "valueChain",
        deserialize_with = "parse::optional_text"
    )]
    pub value_chain: Option<String>,
    #[serde(
        default,
        alias = "requestedAmount",
        deserialize_with = "parse::optional_number"
    )]
    pub requested_amount: Option<f64>,
    #[serde(default, deserialize_with = "parse::optional_text")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "parse::optional_text")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "parse::optional_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "parse::optional_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "parse::optional_number")]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "parse::optional_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "parse::optional_number")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "parse::optional_number")]
    pub employees: Option<f64>,
    #[serde(
        default,
        alias = "existingLoans",
        deserialize_with = "parse::optional_flag"
    )]
    pub existing_loans: Option<bool>,
    #[serde(
        default,
        alias = "creditHistory",
        deserialize_with = "parse::optional_text"
    )]
    pub credit_history: Option<String>,
    #[serde(
        default,
        alias = "collateralValue",
        deserialize_with = "parse::optional_number"
    )]
    pub collateral_value: Option<f64>,
    #[serde(default, alias = "businessPlan", deserialize_with = "parse::presence")]
    pub business_plan: Option<bool>,
    #[serde(
        default,
        alias = "financialStatements",
        deserialize_with = "parse::presence"
    )]
    pub financial_statements: Option<bool>,
    #[serde(
        default,
        alias = "marketAnalysis",
        deserialize_with = "parse::presence"
    )]
    pub market_analysis: Option<bool>,
    #[serde(default)]
    pub documents: Option<DocumentsForm>,
}

/// Nested document references as stored by the upload flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentsForm {
    #[serde(default, alias = "businessPlan", deserialize_with = "parse::presence")]
    pub business_plan: Option<bool>,
    #[serde(
        default,
        alias = "financialStatements",
        deserialize_with = "parse::presence"
    )]
    pub financial_statements: Option<bool>,
    #[serde(
        default,
        alias = "marketAnalysis",
        deserialize_with = "parse::presence"
    )]
    pub market_analysis: Option<bool>,
}

/// Values assumed for profile fields the applicant left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeDefaults {
    pub region: String,
    pub age: u32,
    pub experience: String,
    pub education: String,
    pub gender: String,
    pub credit_history: Option<CreditHistory>,
}

impl Default for IntakeDefaults {
    fn default() -> Self {
        Self {
            region: "Nairobi".to_string(),
            age: 30,
            experience: "1 year".to_string(),
            education: "Secondary".to_string(),
            gender: "Other".to_string(),
            credit_history: Some(CreditHistory::Fair),
        }
    }
}

/// Errors raised while normalizing or scoring a submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

impl ApplicationForm {
    pub fn normalize(&self, defaults: &IntakeDefaults) -> Result<ApplicationData, IntakeError> {
        let requested_amount = self
            .requested_amount
            .ok_or(IntakeError::MissingField("requested_amount"))?;

        let age = match self.age {
            Some(age) if !age.is_finite() || age < 0.0 => {
                return Err(IntakeError::InvalidField {
                    field: "age",
                    reason: "must be a non-negative number",
                })
            }
            // a zero age is treated as not provided
            Some(age) if age == 0.0 => defaults.age,
            Some(age) => age.trunc() as u32,
            None => defaults.age,
        };

        let employees = match self.employees {
            Some(count) if !count.is_finite() || count < 0.0 => {
                return Err(IntakeError::InvalidField {
                    field: "employees",
                    reason: "must be a non-negative number",
                })
            }
            Some(count) => Some(count.trunc() as u32),
            None => None,
        };

        let experience = self.experience.as_deref().unwrap_or(&defaults.experience);
        let education = self.education.as_deref().unwrap_or(&defaults.education);
        let gender = self.gender.as_deref().unwrap_or(&defaults.gender);
        let region = self
            .region
            .as_deref()
            .or(self.country.as_deref())
            .unwrap_or(&defaults.region);
        let business_type = self.business_type.as_deref().or(self.value_chain.as_deref());

        Ok(ApplicationData {
            applicant_name: self.applicant_name.clone().unwrap_or_default(),
            business_name: self.business_name.clone().unwrap_or_default(),
            sector: resolve_sector(business_type),
            region: resolve_region(region),
            age,
            gender: Gender::from_text(gender),
            education: EducationLevel::from_text(education),
            experience_years: parse_experience_years(experience),
            requested_amount,
            revenue: self.revenue,
            employees,
            existing_loans: self.existing_loans,
            credit_history: self.resolve_credit_history(defaults),
            collateral_value: self.collateral_value,
            documents: self.documentation(),
        })
    }

    fn resolve_credit_history(&self, defaults: &IntakeDefaults) -> Option<CreditHistory> {
        match self.credit_history.as_deref() {
            None => defaults.credit_history,
            Some(raw) => {
                let parsed = CreditHistory::from_label(raw);
                if parsed.is_none() {
                    warn!(credit_history = raw, "unrecognised credit history ignored");
                }
                parsed
            }
        }
    }

    /// Nested document references win over the flat flags when both are present.
    fn documentation(&self) -> DocumentationFlags {
        let nested = self.documents.clone().unwrap_or_default();
        DocumentationFlags {
            business_plan: nested
                .business_plan
                .or(self.business_plan)
                .unwrap_or(false),
            financial_statements: nested
                .financial_statements
                .or(self.financial_statements)
                .unwrap_or(false),
            market_analysis: nested
                .market_analysis
                .or(self.market_analysis)
                .unwrap_or(false),
        }
    }
}

fn resolve_sector(raw: Option<&str>) -> Sector {
    let Some(raw) = raw else {
        return Sector::Other;
    };
    match Sector::from_label(raw) {
        Some(sector) => {
            if sector.label() != raw {
                debug!(
                    business_type = raw,
                    sector = sector.label(),
                    "sector matched after case and separator folding"
                );
            }
            sector
        }
        None => {
            warn!(business_type = raw, "unrecognised sector, scoring with neutral weights");
            Sector::Other
        }
    }
}

fn resolve_region(raw: &str) -> Region {
    match Region::from_location(raw) {
        Some(region) => region,
        None => {
            warn!(
                region = raw,
                fallback = Region::FALLBACK.label(),
                "unrecognised region, using fallback market"
            );
            Region::FALLBACK
        }
    }
}

/// Normalizes a submission and scores it in one step.
pub fn assess_form(
    form: &ApplicationForm,
    defaults: &IntakeDefaults,
) -> Result<RiskAssessmentResult, IntakeError> {
    let data = form.normalize(defaults)?;
    Ok(RiskAssessmentEngine::new().assess(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> ApplicationForm {
        serde_json::from_value(value).expect("valid form")
    }

    #[test]
    fn accepts_camel_case_submission() {
        let submission = form(json!({
            "applicantName": "Grace Achieng",
            "businessName": "Achieng Beads",
            "businessType": "Crafts",
            "requestedAmount": 8000,
            "experience": "3 years",
            "education": "Diploma in Design",
            "region": "Kisumu, near Nairobi",
            "age": 27,
            "gender": "FEMALE",
            "creditHistory": "Good",
            "existingLoans": false,
            "businessPlan": true
        }));

        let data = submission
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");

        assert_eq!(data.applicant_name, "Grace Achieng");
        assert_eq!(data.sector, Sector::Crafts);
        assert_eq!(data.region, Region::Nairobi);
        assert_eq!(data.experience_years, 3);
        assert_eq!(data.education, EducationLevel::Vocational);
        assert_eq!(data.gender, Gender::Female);
        assert_eq!(data.credit_history, Some(CreditHistory::Good));
        assert_eq!(data.existing_loans, Some(false));
        assert!(data.documents.business_plan);
        assert!(!data.documents.financial_statements);
    }

    #[test]
    fn accepts_stored_snake_case_record() {
        let record = form(json!({
            "id": "app-000042",
            "applicant_name": "Yonas Tesfaye",
            "value_chain": "audio_visual",
            "requested_amount": "45,000",
            "country": "Addis Ababa",
            "credit_history": "excellent",
            "collateral_value": "12000",
            "documents": {
                "business_plan": "https://drive.example/plan.pdf",
                "financial_statements": null,
                "market_analysis": { "file_id": "m-1" }
            }
        }));

        let data = record
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");

        assert_eq!(record.id.as_deref(), Some("app-000042"));
        assert_eq!(data.sector, Sector::AudioVisual);
        assert_eq!(data.region, Region::AddisAbaba);
        assert_eq!(data.requested_amount, 45_000.0);
        assert_eq!(data.collateral_value, Some(12_000.0));
        assert_eq!(
            data.documents,
            DocumentationFlags {
                business_plan: true,
                financial_statements: false,
                market_analysis: true,
            }
        );
    }

    #[test]
    fn blank_profile_fields_take_defaults() {
        let data = form(json!({ "requestedAmount": 12000 }))
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");

        assert_eq!(data.age, 30);
        assert_eq!(data.experience_years, 1);
        assert_eq!(data.education, EducationLevel::Other);
        assert_eq!(data.gender, Gender::Other);
        assert_eq!(data.region, Region::Nairobi);
        assert_eq!(data.sector, Sector::Other);
        assert_eq!(data.credit_history, Some(CreditHistory::Fair));
        assert_eq!(data.documents, DocumentationFlags::default());
    }

    #[test]
    fn unknown_sector_and_region_fall_back() {
        let data = form(json!({
            "businessType": "Unknown Sector",
            "region": "Atlantis",
            "requestedAmount": 20000,
            "creditHistory": "stellar"
        }))
        .normalize(&IntakeDefaults::default())
        .expect("normalizes");

        assert_eq!(data.sector, Sector::Other);
        assert_eq!(data.region, Region::FALLBACK);
        assert_eq!(data.credit_history, None);
    }

    #[test]
    fn stored_record_with_paired_location_and_sector_columns() {
        let record = form(json!({
            "requested_amount": 20000,
            "country": "Kenya",
            "region": null,
            "value_chain": "Music",
            "business_type": "Fashion"
        }));
        assert_eq!(record.country.as_deref(), Some("Kenya"));
        assert_eq!(record.region, None);

        let data = record
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");
        assert_eq!(data.sector, Sector::Fashion);
        assert_eq!(data.region, Region::FALLBACK);
    }

    #[test]
    fn region_wins_over_country_and_value_chain_fills_blank_type() {
        let data = form(json!({
            "requested_amount": 20000,
            "country": "Uganda",
            "region": "Kigali",
            "value_chain": "Gaming",
            "business_type": ""
        }))
        .normalize(&IntakeDefaults::default())
        .expect("normalizes");

        assert_eq!(data.region, Region::Kigali);
        assert_eq!(data.sector, Sector::Gaming);

        let data = form(json!({ "requestedAmount": 5000, "country": "Kampala, Uganda" }))
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");
        assert_eq!(data.region, Region::Kampala);
    }

    #[test]
    fn zero_age_takes_default() {
        let data = form(json!({ "requestedAmount": 5000, "age": 0 }))
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");
        assert_eq!(data.age, 30);

        let data = form(json!({ "requestedAmount": 5000, "age": "19" }))
            .normalize(&IntakeDefaults::default())
            .expect("normalizes");
        assert_eq!(data.age, 19);
    }

    #[test]
    fn missing_amount_is_rejected_before_scoring() {
        let err = form(json!({ "applicantName": "No Amount" }))
            .normalize(&IntakeDefaults::default())
            .expect_err("amount required");
        assert_eq!(err, IntakeError::MissingField("requested_amount"));
    }

    #[test]
    fn negative_age_is_rejected() {
        let err = form(json!({ "requestedAmount": 1000, "age": -4 }))
            .normalize(&IntakeDefaults::default())
            .expect_err("age validated");
        assert!(matches!(err, IntakeError::InvalidField { field: "age", .. }));
    }

    #[test]
    fn zero_amount_surfaces_engine_validation_error() {
        let err = assess_form(
            &form(json!({ "requestedAmount": 0 })),
            &IntakeDefaults::default(),
        )
        .expect_err("zero amount rejected");
        assert!(matches!(err, IntakeError::Assessment(_)));
    }

    #[test]
    fn malformed_number_fails_deserialization() {
        let parsed: Result<ApplicationForm, _> =
            serde_json::from_value(json!({ "requestedAmount": "a lot" }));
        assert!(parsed.is_err());
    }
}
