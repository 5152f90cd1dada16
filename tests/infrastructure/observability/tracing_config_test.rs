use oratio::infrastructure::observability::{DEFAULT_FILTER, TracingConfig};
use oratio::presentation::config::{Environment, LoggingSettings};

fn logging(level: &str, enable_json: bool) -> LoggingSettings {
    LoggingSettings {
        level: level.to_string(),
        enable_json,
    }
}

#[test]
fn given_plain_level_when_building_config_then_keeps_crate_directives() {
    let config = TracingConfig::from_settings(&logging("warn", false), Environment::Test);

    assert_eq!(config.filter, "warn,oratio=debug,tower_http=debug");
    assert_eq!(config.environment, "Test");
}

#[test]
fn given_full_directive_when_building_config_then_uses_it_verbatim() {
    let config =
        TracingConfig::from_settings(&logging("info,oratio=trace", false), Environment::Local);
    assert_eq!(config.filter, "info,oratio=trace");
}

#[test]
fn given_blank_level_when_building_config_then_uses_default_filter() {
    let config = TracingConfig::from_settings(&logging("  ", false), Environment::Prod);
    assert_eq!(config.filter, DEFAULT_FILTER);
}

#[test]
fn given_json_enabled_in_settings_when_building_config_then_json_format_is_on() {
    let config = TracingConfig::from_settings(&logging("info", true), Environment::Prod);
    assert!(config.json_format);
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
    assert_eq!(config.filter, DEFAULT_FILTER);
}
