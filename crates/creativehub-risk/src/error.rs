use std::fmt;

use crate::assessment::AssessmentError;
use crate::config::ConfigError;
use crate::intake::csv::CsvIntakeError;
use crate::intake::IntakeError;
use crate::telemetry::TelemetryError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Intake(IntakeError),
    Assessment(AssessmentError),
    Csv(CsvIntakeError),
}

impl AppError {
    /// True when the failure lies in the submitted data rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Json(_) | AppError::Intake(_) | AppError::Assessment(_) | AppError::Csv(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "malformed application json: {}", err),
            AppError::Intake(err) => write!(f, "intake error: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
            AppError::Csv(err) => write!(f, "csv error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Assessment(err) => Some(err),
            AppError::Csv(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<AssessmentError> for AppError {
    fn from(value: AssessmentError) -> Self {
        Self::Assessment(value)
    }
}

impl From<CsvIntakeError> for AppError {
    fn from(value: CsvIntakeError) -> Self {
        Self::Csv(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_data_errors_as_client_errors() {
        let missing: AppError = IntakeError::MissingField("requested_amount").into();
        assert!(missing.is_client_error());
        assert_eq!(
            missing.to_string(),
            "intake error: missing required field `requested_amount`"
        );

        let config: AppError = ConfigError::InvalidDefaultAge {
            value: "x".to_string(),
        }
        .into();
        assert!(!config.is_client_error());

        let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!io.is_client_error());
    }
}
