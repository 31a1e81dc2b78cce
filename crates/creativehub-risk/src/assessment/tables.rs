use super::domain::{Region, RiskLevel, Sector};

/// Per-sector multipliers shared by several factor scorers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorWeights {
    pub growth: f64,
    pub risk: f64,
    pub market: f64,
}

pub const NEUTRAL_SECTOR_WEIGHTS: SectorWeights = SectorWeights {
    growth: 1.0,
    risk: 1.0,
    market: 1.0,
};

impl Sector {
    pub const fn weights(self) -> SectorWeights {
        match self {
            Sector::Fashion => SectorWeights {
                growth: 1.2,
                risk: 0.8,
                market: 1.1,
            },
            Sector::Music => SectorWeights {
                growth: 1.0,
                risk: 1.0,
                market: 0.9,
            },
            Sector::VisualArts => SectorWeights {
                growth: 0.9,
                risk: 0.7,
                market: 0.8,
            },
            Sector::Gaming => SectorWeights {
                growth: 1.5,
                risk: 1.2,
                market: 1.3,
            },
            Sector::AudioVisual => SectorWeights {
                growth: 1.1,
                risk: 0.9,
                market: 1.0,
            },
            Sector::PerformingArts => SectorWeights {
                growth: 0.8,
                risk: 0.6,
                market: 0.7,
            },
            Sector::Crafts => SectorWeights {
                growth: 0.9,
                risk: 0.5,
                market: 0.9,
            },
            Sector::Other => NEUTRAL_SECTOR_WEIGHTS,
        }
    }
}

/// Economic, infrastructure and market conditions per region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalFactors {
    pub economic: f64,
    pub infrastructure: f64,
    pub market: f64,
}

impl Region {
    pub const fn factors(self) -> RegionalFactors {
        match self {
            Region::Nairobi => RegionalFactors {
                economic: 1.3,
                infrastructure: 1.2,
                market: 1.4,
            },
            Region::Kampala => RegionalFactors {
                economic: 1.1,
                infrastructure: 1.0,
                market: 1.1,
            },
            Region::Kigali => RegionalFactors {
                economic: 1.2,
                infrastructure: 1.1,
                market: 1.0,
            },
            Region::AddisAbaba => RegionalFactors {
                economic: 1.0,
                infrastructure: 0.9,
                market: 1.0,
            },
            Region::DarEsSalaam => RegionalFactors {
                economic: 0.9,
                infrastructure: 0.8,
                market: 0.9,
            },
        }
    }
}

impl RiskLevel {
    /// Base annual interest rate band, in percent, before the sector risk adjustment.
    pub const fn base_rate_range(self) -> (f64, f64) {
        match self {
            RiskLevel::Low => (8.0, 12.0),
            RiskLevel::Medium => (12.0, 18.0),
            RiskLevel::High => (18.0, 25.0),
        }
    }
}
