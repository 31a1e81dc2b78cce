use clap::Args;
use creativehub_risk::error::AppError;
use creativehub_risk::intake::csv::parse_forms;
use creativehub_risk::{
    ApplicationData, ApplicationForm, IntakeDefaults, PortfolioReport, RiskAssessmentEngine,
    RiskAssessmentResult,
};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one application object or an array of them; `-` reads stdin
    #[arg(long, default_value = "-")]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of the applications table
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print only the portfolio summary
    #[arg(long)]
    pub(crate) summary_only: bool,
}

#[derive(Debug, Serialize)]
struct ScoredApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    applicant_name: String,
    business_name: String,
    assessment: RiskAssessmentResult,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    applications: Option<Vec<ScoredApplication>>,
    portfolio: PortfolioReport,
}

pub(crate) fn run_score(args: ScoreArgs, defaults: &IntakeDefaults) -> Result<(), AppError> {
    let reader = open_input(&args.input)?;
    let stdout = io::stdout();
    score_json(reader, stdout.lock(), defaults)
}

pub(crate) fn run_batch(args: BatchArgs, defaults: &IntakeDefaults) -> Result<(), AppError> {
    let reader = BufReader::new(File::open(&args.csv)?);
    let stdout = io::stdout();
    score_csv(reader, stdout.lock(), defaults, args.summary_only)
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, AppError> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

/// Scores a JSON submission, mirroring its shape: an object yields one result, an array yields
/// results in input order.
fn score_json<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    defaults: &IntakeDefaults,
) -> Result<(), AppError> {
    let engine = RiskAssessmentEngine::new();
    let payload: Value = serde_json::from_reader(reader)?;

    let output = match payload {
        Value::Array(items) => {
            let mut scored = Vec::with_capacity(items.len());
            for item in items {
                let form: ApplicationForm = serde_json::from_value(item)?;
                scored.push(score_form(&engine, &form, defaults)?.1);
            }
            info!(applications = scored.len(), "scored submissions");
            serde_json::to_value(scored)?
        }
        single => {
            let form: ApplicationForm = serde_json::from_value(single)?;
            serde_json::to_value(score_form(&engine, &form, defaults)?.1)?
        }
    };

    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    Ok(())
}

fn score_csv<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    defaults: &IntakeDefaults,
    summary_only: bool,
) -> Result<(), AppError> {
    let engine = RiskAssessmentEngine::new();
    let forms = parse_forms(reader)?;

    let mut assessed = Vec::with_capacity(forms.len());
    let mut scored = Vec::with_capacity(forms.len());
    for form in &forms {
        let (data, view) = score_form(&engine, form, defaults)?;
        assessed.push((data, view.assessment.clone()));
        scored.push(view);
    }

    let portfolio = PortfolioReport::from_assessments(&assessed);
    info!(
        applications = portfolio.total_applications,
        flagged = portfolio.flagged_applications,
        "scored batch"
    );

    let output = BatchOutput {
        applications: (!summary_only).then_some(scored),
        portfolio,
    };
    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    Ok(())
}

fn score_form(
    engine: &RiskAssessmentEngine,
    form: &ApplicationForm,
    defaults: &IntakeDefaults,
) -> Result<(ApplicationData, ScoredApplication), AppError> {
    let data = form.normalize(defaults)?;
    let assessment = engine.assess(&data)?;
    let view = ScoredApplication {
        id: form.id.clone(),
        applicant_name: data.applicant_name.clone(),
        business_name: data.business_name.clone(),
        assessment,
    };
    Ok((data, view))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_json(input: &str) -> Result<Value, AppError> {
        let mut out = Vec::new();
        score_json(input.as_bytes(), &mut out, &IntakeDefaults::default())?;
        Ok(serde_json::from_slice(&out).expect("output is json"))
    }

    #[test]
    fn single_object_yields_single_result() {
        let output = run_json(
            r#"{"id":"app-7","applicantName":"Amina","businessType":"Fashion","requestedAmount":25000}"#,
        )
        .expect("scores");

        assert_eq!(output["id"], "app-7");
        assert_eq!(output["applicant_name"], "Amina");
        assert!(output["assessment"]["overall_score"].is_u64());
    }

    #[test]
    fn array_preserves_input_order() {
        let output = run_json(
            r#"[{"applicantName":"First","requestedAmount":5000},
                {"applicantName":"Second","requestedAmount":"75,000"}]"#,
        )
        .expect("scores");

        let names: Vec<&str> = output
            .as_array()
            .expect("array output")
            .iter()
            .filter_map(|entry| entry["applicant_name"].as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn invalid_submission_is_a_client_error() {
        let err = run_json(r#"{"applicantName":"No amount"}"#).expect_err("rejected");
        assert!(err.is_client_error());

        let err = run_json("not json").expect_err("rejected");
        assert!(err.is_client_error());
    }

    #[test]
    fn batch_summary_only_omits_applications() {
        let csv = "applicant_name,business_type,requested_amount\nA,Music,10000\nB,Crafts,4000\n";
        let mut out = Vec::new();
        score_csv(csv.as_bytes(), &mut out, &IntakeDefaults::default(), true).expect("scores");
        let output: Value = serde_json::from_slice(&out).expect("output is json");

        assert!(output.get("applications").is_none());
        assert_eq!(output["portfolio"]["total_applications"], 2);
        assert_eq!(output["portfolio"]["total_requested"], 14000.0);
    }

    #[test]
    fn batch_lists_each_row() {
        let csv = "id,requested_amount\nr-1,10000\nr-2,20000\n";
        let mut out = Vec::new();
        score_csv(csv.as_bytes(), &mut out, &IntakeDefaults::default(), false).expect("scores");
        let output: Value = serde_json::from_slice(&out).expect("output is json");

        assert_eq!(output["applications"][1]["id"], "r-2");
    }
}
