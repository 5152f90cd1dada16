use crate::presentation::config::{Environment, LoggingSettings};

use super::init_tracing::DEFAULT_FILTER;

/// Resolved logging options handed to [`super::init_tracing`].
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of the settings file.
    pub fn from_settings(settings: &LoggingSettings, environment: Environment) -> Self {
        let json_from_env = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let filter = match settings.level.trim() {
            "" => DEFAULT_FILTER.to_string(),
            level if level.contains('=') || level.contains(',') => level.to_string(),
            level => format!("{level},oratio=debug,tower_http=debug"),
        };

        Self {
            environment: environment.to_string(),
            json_format: settings.enable_json || json_from_env,
            filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}
