use crate::assessment::{
    ApplicationData, CreditHistory, DocumentationFlags, EducationLevel, Gender, Region, Sector,
};

/// Well-documented Fashion applicant used as the starting point for most scenarios.
pub(super) fn strong_application() -> ApplicationData {
    ApplicationData {
        applicant_name: "Wanjiru Kamau".to_string(),
        business_name: "Kamau Threads".to_string(),
        sector: Sector::Fashion,
        region: Region::Nairobi,
        age: 30,
        gender: Gender::Female,
        education: EducationLevel::Tertiary,
        experience_years: 5,
        requested_amount: 25_000.0,
        revenue: Some(60_000.0),
        employees: None,
        existing_loans: None,
        credit_history: Some(CreditHistory::Good),
        collateral_value: None,
        documents: DocumentationFlags::all(),
    }
}

/// Thin, undocumented application that lands in the high-risk tier.
pub(super) fn weak_application() -> ApplicationData {
    ApplicationData {
        applicant_name: "Otieno Ouma".to_string(),
        business_name: "Ouma Sound".to_string(),
        sector: Sector::Music,
        region: Region::DarEsSalaam,
        age: 30,
        gender: Gender::Other,
        education: EducationLevel::Other,
        experience_years: 0,
        requested_amount: 150_000.0,
        revenue: Some(0.0),
        employees: None,
        existing_loans: Some(true),
        credit_history: Some(CreditHistory::Poor),
        collateral_value: None,
        documents: DocumentationFlags::default(),
    }
}
