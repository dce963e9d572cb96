use std::env;
use std::fmt;
use std::str::FromStr;

use crate::screening::EligibilityConfig;

/// Distinguishes runtime behavior for different stages of deployment.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub screening: EligibilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = EligibilityConfig::default();
        let screening = EligibilityConfig {
            minimum_age: read_var("SCREENING_MIN_AGE", defaults.minimum_age)?,
            maximum_age: read_var("SCREENING_MAX_AGE", defaults.maximum_age)?,
            max_systolic_average: read_var("SCREENING_MAX_SYS_BP", defaults.max_systolic_average)?,
            max_diastolic_average: read_var(
                "SCREENING_MAX_DIA_BP",
                defaults.max_diastolic_average,
            )?,
        };

        if screening.minimum_age >= screening.maximum_age {
            return Err(ConfigError::EmptyAgeWindow {
                minimum: screening.minimum_age,
                maximum: screening.maximum_age,
            });
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            screening,
        })
    }
}

fn read_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { name: &'static str, value: String },
    EmptyAgeWindow { minimum: u16, maximum: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer (found '{value}')")
            }
            ConfigError::EmptyAgeWindow { minimum, maximum } => write!(
                f,
                "SCREENING_MIN_AGE ({minimum}) must be below SCREENING_MAX_AGE ({maximum})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
