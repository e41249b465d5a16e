use log::info;
use crate::config::{load_config, Config, Source, SourceMode};
use crate::errors::{Stage, TenkiError};
use crate::logging::setup_logger;
use crate::manager_backend::Backend;
use crate::manager_jma::Jma;
use crate::models::area::Area;
use crate::models::RawForecast;

/// The fetch manager for the configured source
pub enum Mgr {
    Jma(Jma),
    Backend(Backend),
}

impl Mgr {
    /// Returns the manager matching the configured source mode
    ///
    /// # Arguments
    ///
    /// * 'source' - source configuration
    pub fn new(source: &Source) -> Mgr {
        match source.mode {
            SourceMode::Jma => Mgr::Jma(Jma::new(source)),
            SourceMode::Backend => Mgr::Backend(Backend::new(source)),
        }
    }

    /// Retrieves the selectable areas from the configured source
    ///
    pub fn get_areas(&self) -> Result<Vec<Area>, TenkiError> {
        match self {
            Mgr::Jma(jma) => jma.get_areas().map_err(TenkiError::fetch(Stage::Areas)),
            Mgr::Backend(backend) => backend.get_areas().map_err(TenkiError::fetch(Stage::Areas)),
        }
    }

    /// Retrieves the current forecast for an area, tagged with the source shape
    ///
    /// # Arguments
    ///
    /// * 'area_code' - the office code of the area
    pub fn get_forecast(&self, area_code: &str) -> Result<RawForecast, TenkiError> {
        match self {
            Mgr::Jma(jma) => Ok(RawForecast::Jma(jma.get_forecast(area_code)?)),
            Mgr::Backend(backend) => Ok(RawForecast::Backend {
                forecast: backend.get_forecast(area_code)?,
                from_history: false,
            }),
        }
    }
}

/// Loads configuration, sets up logging and returns configuration and fetch manager
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn init(config_path: &str) -> Result<(Config, Mgr), TenkiError> {
    let config = load_config(config_path)?;
    setup_logger(&config.general)?;

    info!("tenki version: {}", env!("CARGO_PKG_VERSION"));
    info!("forecast source: {:?}", config.source.mode);

    let mgr = Mgr::new(&config.source);

    Ok((config, mgr))
}
