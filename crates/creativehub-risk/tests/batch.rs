use creativehub_risk::intake::csv::parse_forms;
use creativehub_risk::{
    ApplicationData, IntakeDefaults, PortfolioReport, RiskAssessmentEngine,
    RiskAssessmentResult, RiskLevel,
};

const EXPORT: &str = "\
application_id,applicantName,businessType,requestedAmount,experience,education,region,age,gender,revenue,existingLoans,creditHistory,businessPlan,financialStatements,marketAnalysis
app-1,Amina Yusuf,Fashion,25000,5 years,University degree,Nairobi,30,Female,60000,no,good,yes,yes,yes
app-2,Tom Okello,Music,150000,0 years,,Dar es Salaam,30,,0,yes,poor,no,no,no
app-3,Sara Bekele,Crafts,20000,1 year,,Atlantis,,,,,,,,
";

fn assess_export() -> Vec<(ApplicationData, RiskAssessmentResult)> {
    let defaults = IntakeDefaults::default();
    let engine = RiskAssessmentEngine::new();
    parse_forms(EXPORT.as_bytes())
        .expect("export parses")
        .iter()
        .map(|form| {
            let data = form.normalize(&defaults).expect("row normalizes");
            let result = engine.assess(&data).expect("row scores");
            (data, result)
        })
        .collect()
}

#[test]
fn export_rows_score_in_file_order() {
    let assessed = assess_export();
    let levels: Vec<RiskLevel> = assessed.iter().map(|(_, r)| r.risk_level).collect();

    assert_eq!(levels, vec![RiskLevel::Low, RiskLevel::High, RiskLevel::Medium]);
    assert_eq!(assessed[1].1.red_flags.len(), 4);
}

#[test]
fn portfolio_report_summarizes_export() {
    let assessed = assess_export();
    let report = PortfolioReport::from_assessments(&assessed);

    assert_eq!(report.total_applications, 3);
    assert_eq!(report.total_requested, 195_000.0);
    assert_eq!(report.flagged_applications, 1);

    let counts: Vec<usize> = report.tiers.iter().map(|tier| tier.count).collect();
    assert_eq!(counts, vec![1, 1, 1]);

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["tiers"][0]["risk_level"], "low");
    assert_eq!(json["score_bands"][0]["band"], "High (80-100)");
}
