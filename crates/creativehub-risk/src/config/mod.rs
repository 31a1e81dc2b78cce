use std::env;
use std::fmt;

use crate::assessment::CreditHistory;
use crate::intake::IntakeDefaults;

/// Distinguishes runtime behavior for different stages of the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scorer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            intake: load_intake_defaults()?,
        })
    }
}

fn load_intake_defaults() -> Result<IntakeDefaults, ConfigError> {
    let fallback = IntakeDefaults::default();

    let age = match env::var("INTAKE_DEFAULT_AGE") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidDefaultAge { value: raw })?,
        Err(_) => fallback.age,
    };

    let credit_history = match env::var("INTAKE_DEFAULT_CREDIT_HISTORY") {
        Ok(raw) if raw.trim().eq_ignore_ascii_case("none") || raw.trim().is_empty() => None,
        Ok(raw) => Some(
            CreditHistory::from_label(&raw)
                .ok_or(ConfigError::InvalidDefaultCreditHistory { value: raw })?,
        ),
        Err(_) => fallback.credit_history,
    };

    Ok(IntakeDefaults {
        region: env::var("INTAKE_DEFAULT_REGION").unwrap_or(fallback.region),
        age,
        experience: env::var("INTAKE_DEFAULT_EXPERIENCE").unwrap_or(fallback.experience),
        education: env::var("INTAKE_DEFAULT_EDUCATION").unwrap_or(fallback.education),
        gender: env::var("INTAKE_DEFAULT_GENDER").unwrap_or(fallback.gender),
        credit_history,
    })
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDefaultAge { value: String },
    InvalidDefaultCreditHistory { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDefaultAge { value } => {
                write!(f, "INTAKE_DEFAULT_AGE must be a whole number, got '{value}'")
            }
            ConfigError::InvalidDefaultCreditHistory { value } => write!(
                f,
                "INTAKE_DEFAULT_CREDIT_HISTORY must be excellent, good, fair, poor or none, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "INTAKE_DEFAULT_REGION",
            "INTAKE_DEFAULT_AGE",
            "INTAKE_DEFAULT_EXPERIENCE",
            "INTAKE_DEFAULT_EDUCATION",
            "INTAKE_DEFAULT_GENDER",
            "INTAKE_DEFAULT_CREDIT_HISTORY",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.intake, IntakeDefaults::default());
    }

    #[test]
    fn intake_defaults_follow_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("INTAKE_DEFAULT_REGION", "Kampala");
        env::set_var("INTAKE_DEFAULT_AGE", " 35 ");
        env::set_var("INTAKE_DEFAULT_CREDIT_HISTORY", "none");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.intake.region, "Kampala");
        assert_eq!(config.intake.age, 35);
        assert_eq!(config.intake.credit_history, None);
        assert_eq!(config.intake.experience, "1 year");
    }

    #[test]
    fn rejects_unparseable_default_age() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_DEFAULT_AGE", "thirty");

        let err = AppConfig::load().expect_err("age must parse");
        reset_env();

        assert!(matches!(err, ConfigError::InvalidDefaultAge { ref value } if value == "thirty"));
        assert!(err.to_string().contains("INTAKE_DEFAULT_AGE"));
    }

    #[test]
    fn rejects_unknown_default_credit_history() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_DEFAULT_CREDIT_HISTORY", "stellar");

        let err = AppConfig::load().expect_err("credit history must be known");
        reset_env();

        assert!(matches!(
            err,
            ConfigError::InvalidDefaultCreditHistory { .. }
        ));
    }
}
