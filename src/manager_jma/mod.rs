pub mod errors;

use std::time::Duration;
use log::debug;
use ureq::Agent;
use crate::config::Source;
use crate::manager_jma::errors::JmaError;
use crate::models::area::{Area, JmaAreaList};
use crate::models::jma_forecast::RawForecastV1;

/// Struct for fetching area lists and forecasts from the JMA public API
pub struct Jma {
    agent: Agent,
    area_url: String,
    forecast_url: String,
}

impl Jma {
    /// Returns a Jma struct ready for fetching from JMA
    ///
    /// # Arguments
    ///
    /// * 'config' - source configuration holding urls and request timeout
    pub fn new(config: &Source) -> Jma {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            area_url: config.jma_area_url.clone(),
            forecast_url: config.jma_forecast_url.clone(),
        }
    }

    /// Retrieves the forecast offices, sorted by area code
    ///
    pub fn get_areas(&self) -> Result<Vec<Area>, JmaError> {
        let json = self.get_request(&self.area_url)?;

        parse_areas(&json)
    }

    /// Retrieves the forecast document for an area
    ///
    /// # Arguments
    ///
    /// * 'area_code' - the office code of the area, e.g. "130000"
    pub fn get_forecast(&self, area_code: &str) -> Result<RawForecastV1, JmaError> {
        let url = forecast_url(&self.forecast_url, area_code);
        let json = self.get_request(&url)?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Sends a get request and returns the response body
    ///
    /// # Arguments
    ///
    /// * 'url' - url to get
    fn get_request(&self, url: &str) -> Result<String, JmaError> {
        debug!("GET {}", url);

        let json = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(json)
    }
}

/// Fills the area code into the forecast url template
///
/// # Arguments
///
/// * 'template' - url with `{}` where the area code goes
/// * 'area_code' - the office code of the area
fn forecast_url(template: &str, area_code: &str) -> String {
    template.replace("{}", area_code)
}

/// Parses the JMA area document into a list of areas sorted by code
///
/// # Arguments
///
/// * 'json' - the area document
fn parse_areas(json: &str) -> Result<Vec<Area>, JmaError> {
    let list: JmaAreaList = serde_json::from_str(json)?;

    Ok(list.into())
}
