use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::advisor::EngineConfig;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the advisor.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub engine: EngineConfig,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ADVISOR_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data = DataConfig {
            catalog_path: env::var_os("ADVISOR_CATALOG_PATH").map(PathBuf::from),
            questions_path: env::var_os("ADVISOR_QUESTIONS_PATH").map(PathBuf::from),
        };

        let engine = match env::var("ADVISOR_ENGINE_CONFIG") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map_err(|source| ConfigError::InvalidEngineConfig { source })?,
            _ => EngineConfig::default(),
        };

        let top_n = env::var("ADVISOR_TOP_N")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .ok()
            .filter(|top_n| *top_n >= 1)
            .ok_or(ConfigError::InvalidTopN)?;

        let log_level = env::var("ADVISOR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            data,
            engine,
            report: ReportConfig { top_n },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Optional overrides for the bundled reference datasets.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub catalog_path: Option<PathBuf>,
    pub questions_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub top_n: usize,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTopN,
    InvalidEngineConfig { source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTopN => write!(f, "ADVISOR_TOP_N must be a positive integer"),
            ConfigError::InvalidEngineConfig { source } => {
                write!(f, "ADVISOR_ENGINE_CONFIG must be a JSON engine config: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidTopN => None,
            ConfigError::InvalidEngineConfig { source } => Some(source),
        }
    }
}
