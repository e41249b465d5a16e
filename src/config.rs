use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// Which service forecasts are fetched from
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Directly from the JMA public API
    Jma,
    /// From the local forecast backend, which also keeps a history of fetched forecasts
    Backend,
}

#[derive(Deserialize)]
pub struct Source {
    pub mode: SourceMode,
    #[serde(default = "default_jma_area_url")]
    pub jma_area_url: String,
    #[serde(default = "default_jma_forecast_url")]
    pub jma_forecast_url: String,
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Default)]
pub struct View {
    pub area_code: Option<String>,
    pub history_limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub source: Source,
    #[serde(default)]
    pub view: View,
}

fn default_jma_area_url() -> String {
    "https://www.jma.go.jp/bosai/common/const/area.json".to_string()
}

fn default_jma_forecast_url() -> String {
    "https://www.jma.go.jp/bosai/forecast/data/forecast/{}.json".to_string()
}

fn default_backend_base_url() -> String {
    "http://localhost:5001/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

/// Parses and checks configuration given as a toml string
///
/// # Arguments
///
/// * 'toml' - the configuration document
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if !config.source.jma_forecast_url.contains("{}") {
        return Err(ConfigError::from("jma_forecast_url lacks the {} area code placeholder"));
    }
    if config.source.timeout_secs == 0 {
        return Err(ConfigError::from("timeout_secs must be greater than zero"));
    }

    Ok(config)
}
