//! Batch intake from spreadsheet exports of the applications table.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::parse::parse_bool_text;
use super::ApplicationForm;

#[derive(Debug, thiserror::Error)]
pub enum CsvIntakeError {
    #[error("failed to read application export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: column `{column}` has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Reads one [`ApplicationForm`] per data row. Rows are numbered from 1, excluding the header.
pub fn parse_forms<R: Read>(reader: R) -> Result<Vec<ApplicationForm>, CsvIntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut forms = Vec::new();

    for (index, record) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
        let row = record?;
        forms.push(row.into_form(index + 1)?);
    }

    Ok(forms)
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(
        default,
        alias = "application_id",
        deserialize_with = "empty_string_as_none"
    )]
    id: Option<String>,
    #[serde(
        default,
        alias = "applicantName",
        deserialize_with = "empty_string_as_none"
    )]
    applicant_name: Option<String>,
    #[serde(
        default,
        alias = "businessName",
        deserialize_with = "empty_string_as_none"
    )]
    business_name: Option<String>,
    #[serde(
        default,
        alias = "businessType",
        deserialize_with = "empty_string_as_none"
    )]
    business_type: Option<String>,
    #[serde(
        default,
        alias = "valueChain",
        deserialize_with = "empty_string_as_none"
    )]
    value_chain: Option<String>,
    #[serde(
        default,
        alias = "requestedAmount",
        deserialize_with = "empty_string_as_none"
    )]
    requested_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    education: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    region: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    revenue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    employees: Option<String>,
    #[serde(
        default,
        alias = "existingLoans",
        deserialize_with = "empty_string_as_none"
    )]
    existing_loans: Option<String>,
    #[serde(
        default,
        alias = "creditHistory",
        deserialize_with = "empty_string_as_none"
    )]
    credit_history: Option<String>,
    #[serde(
        default,
        alias = "collateralValue",
        deserialize_with = "empty_string_as_none"
    )]
    collateral_value: Option<String>,
    #[serde(
        default,
        alias = "businessPlan",
        deserialize_with = "empty_string_as_none"
    )]
    business_plan: Option<String>,
    #[serde(
        default,
        alias = "financialStatements",
        deserialize_with = "empty_string_as_none"
    )]
    financial_statements: Option<String>,
    #[serde(
        default,
        alias = "marketAnalysis",
        deserialize_with = "empty_string_as_none"
    )]
    market_analysis: Option<String>,
}

impl ApplicationRow {
    fn into_form(self, row: usize) -> Result<ApplicationForm, CsvIntakeError> {
        Ok(ApplicationForm {
            requested_amount: number(row, "requested_amount", self.requested_amount)?,
            age: number(row, "age", self.age)?,
            revenue: number(row, "revenue", self.revenue)?,
            employees: number(row, "employees", self.employees)?,
            collateral_value: number(row, "collateral_value", self.collateral_value)?,
            existing_loans: flag(row, "existing_loans", self.existing_loans)?,
            business_plan: self.business_plan.as_deref().map(document_present),
            financial_statements: self.financial_statements.as_deref().map(document_present),
            market_analysis: self.market_analysis.as_deref().map(document_present),
            id: self.id,
            applicant_name: self.applicant_name,
            business_name: self.business_name,
            business_type: self.business_type,
            value_chain: self.value_chain,
            experience: self.experience,
            education: self.education,
            region: self.region,
            country: self.country,
            gender: self.gender,
            credit_history: self.credit_history,
            documents: None,
        })
    }
}

fn number(
    row: usize,
    column: &'static str,
    raw: Option<String>,
) -> Result<Option<f64>, CsvIntakeError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.replace(',', "")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| CsvIntakeError::InvalidValue {
            row,
            column,
            value: raw,
        })
}

fn flag(
    row: usize,
    column: &'static str,
    raw: Option<String>,
) -> Result<Option<bool>, CsvIntakeError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match parse_bool_text(&raw) {
        Some(value) => Ok(Some(value)),
        None => Err(CsvIntakeError::InvalidValue {
            row,
            column,
            value: raw,
        }),
    }
}

/// Export cells hold either a yes/no marker or the stored file reference.
fn document_present(raw: &str) -> bool {
    parse_bool_text(raw).unwrap_or(true)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
