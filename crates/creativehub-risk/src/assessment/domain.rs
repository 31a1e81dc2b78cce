use serde::{Deserialize, Serialize};

/// Creative-sector categories recognised by the scoring tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Fashion,
    Music,
    #[serde(rename = "Visual Arts")]
    VisualArts,
    Gaming,
    AudioVisual,
    #[serde(rename = "Performing Arts")]
    PerformingArts,
    Crafts,
    /// Any business type outside the table; scored with neutral weights.
    Other,
}

impl Sector {
    pub const fn label(self) -> &'static str {
        match self {
            Sector::Fashion => "Fashion",
            Sector::Music => "Music",
            Sector::VisualArts => "Visual Arts",
            Sector::Gaming => "Gaming",
            Sector::AudioVisual => "AudioVisual",
            Sector::PerformingArts => "Performing Arts",
            Sector::Crafts => "Crafts",
            Sector::Other => "Other",
        }
    }

    pub const fn known() -> [Sector; 7] {
        [
            Sector::Fashion,
            Sector::Music,
            Sector::VisualArts,
            Sector::Gaming,
            Sector::AudioVisual,
            Sector::PerformingArts,
            Sector::Crafts,
        ]
    }

    /// Matches a business type label, ignoring case, spaces, underscores and hyphens.
    ///
    /// Returns `None` for anything outside the known set so the caller can decide how to
    /// surface the miss.
    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = squash(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::known()
            .into_iter()
            .find(|sector| squash(sector.label()) == wanted)
    }

    /// Sectors with long production cycles that earn an extended grace period.
    pub const fn has_long_production_cycle(self) -> bool {
        matches!(self, Sector::Gaming | Sector::AudioVisual)
    }
}

fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// East African markets covered by the regional factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Nairobi,
    Kampala,
    Kigali,
    #[serde(rename = "Addis Ababa")]
    AddisAbaba,
    #[serde(rename = "Dar es Salaam")]
    DarEsSalaam,
}

impl Region {
    /// Region assumed when a location cannot be matched.
    pub const FALLBACK: Region = Region::Nairobi;

    pub const fn label(self) -> &'static str {
        match self {
            Region::Nairobi => "Nairobi",
            Region::Kampala => "Kampala",
            Region::Kigali => "Kigali",
            Region::AddisAbaba => "Addis Ababa",
            Region::DarEsSalaam => "Dar es Salaam",
        }
    }

    /// Finds the first region whose search key occurs in the free-text location.
    ///
    /// Keys are checked in table order: `nairobi`, `kampala`, `kigali`, `addis`, `dar`.
    pub fn from_location(raw: &str) -> Option<Self> {
        const SEARCH_KEYS: [(&str, Region); 5] = [
            ("nairobi", Region::Nairobi),
            ("kampala", Region::Kampala),
            ("kigali", Region::Kigali),
            ("addis", Region::AddisAbaba),
            ("dar", Region::DarEsSalaam),
        ];

        let location = raw.to_lowercase();
        SEARCH_KEYS
            .iter()
            .find(|(key, _)| location.contains(key))
            .map(|(_, region)| *region)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn from_text(raw: &str) -> Self {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("female") {
            Gender::Female
        } else if value.eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Other
        }
    }
}

/// Highest completed education, reduced to the bands the profile scorer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    /// University study or any degree.
    Tertiary,
    /// Diplomas and certificates.
    Vocational,
    Other,
}

impl EducationLevel {
    pub fn from_text(raw: &str) -> Self {
        let text = raw.to_lowercase();
        if text.contains("university") || text.contains("degree") {
            EducationLevel::Tertiary
        } else if text.contains("diploma") || text.contains("certificate") {
            EducationLevel::Vocational
        } else {
            EducationLevel::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditHistory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditHistory {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(CreditHistory::Excellent),
            "good" => Some(CreditHistory::Good),
            "fair" => Some(CreditHistory::Fair),
            "poor" => Some(CreditHistory::Poor),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditHistory::Excellent => "excellent",
            CreditHistory::Good => "good",
            CreditHistory::Fair => "fair",
            CreditHistory::Poor => "poor",
        }
    }
}

/// Presence flags for the three supporting documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationFlags {
    pub business_plan: bool,
    pub financial_statements: bool,
    pub market_analysis: bool,
}

impl DocumentationFlags {
    pub const REQUIRED: usize = 3;

    pub const fn all() -> Self {
        Self {
            business_plan: true,
            financial_statements: true,
            market_analysis: true,
        }
    }

    pub fn present(&self) -> usize {
        [
            self.business_plan,
            self.financial_statements,
            self.market_analysis,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Normalized application consumed by the engine.
///
/// `requested_amount` must be finite and positive. Optional amounts, when present, must be
/// finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub applicant_name: String,
    pub business_name: String,
    pub sector: Sector,
    pub region: Region,
    pub age: u32,
    pub gender: Gender,
    pub education: EducationLevel,
    pub experience_years: u32,
    pub requested_amount: f64,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub employees: Option<u32>,
    #[serde(default)]
    pub existing_loans: Option<bool>,
    #[serde(default)]
    pub credit_history: Option<CreditHistory>,
    #[serde(default)]
    pub collateral_value: Option<f64>,
    #[serde(default)]
    pub documents: DocumentationFlags,
}

impl ApplicationData {
    /// Revenue only when strictly positive; zero and absent are treated alike.
    pub fn positive_revenue(&self) -> Option<f64> {
        self.revenue.filter(|revenue| *revenue > 0.0)
    }

    pub fn positive_collateral(&self) -> Option<f64> {
        self.collateral_value.filter(|value| *value > 0.0)
    }

    pub fn has_existing_loans(&self) -> bool {
        self.existing_loans.unwrap_or(false)
    }
}

/// Tier derived from the unrounded overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub const fn ordered() -> [RiskLevel; 3] {
        [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }
}
