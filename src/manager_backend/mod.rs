pub mod errors;

use std::time::Duration;
use log::debug;
use ureq::Agent;
use crate::config::Source;
use crate::manager_backend::errors::BackendError;
use crate::models::area::{Area, BackendArea};
use crate::models::backend_forecast::{DayForecast, RawForecastV2};

/// Struct for fetching forecasts and forecast history from the local forecast backend
pub struct Backend {
    agent: Agent,
    base_url: String,
}

impl Backend {
    /// Returns a Backend struct ready for fetching
    ///
    /// # Arguments
    ///
    /// * 'config' - source configuration holding the backend base url and request timeout
    pub fn new(config: &Source) -> Backend {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let agent = agent_config.into();

        Self { agent, base_url: config.backend_base_url.trim_end_matches('/').to_string() }
    }

    /// Retrieves the areas known to the backend, sorted by area code
    ///
    pub fn get_areas(&self) -> Result<Vec<Area>, BackendError> {
        let json = self.get_request(&self.areas_url())?;

        parse_areas(&json)
    }

    /// Retrieves a fresh forecast for an area, the backend fetches it from JMA and stores it
    ///
    /// # Arguments
    ///
    /// * 'area_code' - the office code of the area
    pub fn get_forecast(&self, area_code: &str) -> Result<RawForecastV2, BackendError> {
        let json = self.get_request(&self.forecast_url(area_code))?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Retrieves the fetch times of stored forecasts for an area, latest first
    ///
    /// # Arguments
    ///
    /// * 'area_code' - the office code of the area
    /// * 'limit' - max number of entries to return
    pub fn get_history(&self, area_code: &str, limit: usize) -> Result<Vec<String>, BackendError> {
        let json = self.get_request(&self.history_list_url(area_code, limit))?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Retrieves the forecast stored at the given fetch time
    ///
    /// # Arguments
    ///
    /// * 'area_code' - the office code of the area
    /// * 'fetched_at' - fetch time as listed by `get_history`
    pub fn get_historical_forecast(&self, area_code: &str, fetched_at: &str) -> Result<RawForecastV2, BackendError> {
        let json = self.get_request(&self.historical_forecast_url(area_code, fetched_at))?;

        parse_historical_forecast(&json, fetched_at)
    }

    fn areas_url(&self) -> String {
        format!("{}/areas", self.base_url)
    }

    fn forecast_url(&self, area_code: &str) -> String {
        format!("{}/forecast/{}", self.base_url, urlencoding::encode(area_code))
    }

    fn history_url(&self, area_code: &str) -> String {
        format!("{}/history", self.forecast_url(area_code))
    }

    fn history_list_url(&self, area_code: &str, limit: usize) -> String {
        format!("{}?limit={}", self.history_url(area_code), limit)
    }

    fn historical_forecast_url(&self, area_code: &str, fetched_at: &str) -> String {
        format!("{}/{}", self.history_url(area_code), urlencoding::encode(fetched_at))
    }

    /// Sends a get request and returns the response body
    ///
    /// # Arguments
    ///
    /// * 'url' - url to get
    fn get_request(&self, url: &str) -> Result<String, BackendError> {
        debug!("GET {}", url);

        let json = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(json)
    }
}

/// Parses the backend area list into areas sorted by code
///
/// # Arguments
///
/// * 'json' - the area list document
fn parse_areas(json: &str) -> Result<Vec<Area>, BackendError> {
    let list: Vec<BackendArea> = serde_json::from_str(json)?;

    let mut areas = list.into_iter().map(Area::from).collect::<Vec<Area>>();
    areas.sort_by(|a, b| a.code.cmp(&b.code));

    Ok(areas)
}

/// Parses stored forecast rows into a forecast document
///
/// # Arguments
///
/// * 'json' - the stored rows, today first
/// * 'fetched_at' - the fetch time the rows were requested for
fn parse_historical_forecast(json: &str, fetched_at: &str) -> Result<RawForecastV2, BackendError> {
    let rows: Vec<DayForecast> = serde_json::from_str(json)?;

    Ok(RawForecastV2::from_history(rows, fetched_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceMode;
    use crate::models::loose::Loose;

    fn backend() -> Backend {
        Backend::new(&Source {
            mode: SourceMode::Backend,
            jma_area_url: String::new(),
            jma_forecast_url: String::new(),
            backend_base_url: "http://localhost:5001/api/".to_string(),
            timeout_secs: 5,
        })
    }

    #[test]
    fn test_urls() {
        let backend = backend();

        assert_eq!(backend.areas_url(), "http://localhost:5001/api/areas");
        assert_eq!(backend.forecast_url("130000"), "http://localhost:5001/api/forecast/130000");
        assert_eq!(backend.history_url("130000"), "http://localhost:5001/api/forecast/130000/history");
        assert_eq!(
            backend.history_list_url("130000", 25),
            "http://localhost:5001/api/forecast/130000/history?limit=25"
        );
        assert_eq!(
            backend.historical_forecast_url("130000", "2024-01-15 08:00:00"),
            "http://localhost:5001/api/forecast/130000/history/2024-01-15%2008%3A00%3A00"
        );
    }

    #[test]
    fn test_parse_areas_sorted() {
        let json = r#"[{"area_code":"270000","area_name":"大阪府"},{"area_code":"130000","area_name":"東京都"}]"#;
        let areas = parse_areas(json).unwrap();

        assert_eq!(areas[0].name, "東京都");
        assert_eq!(areas[1].name, "大阪府");
    }

    #[test]
    fn test_parse_historical_forecast() {
        let json = r#"[
            {"forecast_date":"2024-01-15","weather_code":"100","weather_text":"晴れ","pop":"20","report_datetime":"2024-01-15T05:00:00+09:00"},
            {"forecast_date":"2024-01-16","weather_code":"300","weather_text":"雨","pop":"80"}
        ]"#;
        let raw = parse_historical_forecast(json, "2024-01-15 08:00:00").unwrap();

        assert_eq!(raw.today.unwrap().weather_code, Loose::from("100"));
        assert_eq!(raw.tomorrow.unwrap().pop, Loose::from("80"));
        assert!(raw.weekly.is_empty());
        assert_eq!(raw.report_datetime, Loose::from("2024-01-15T05:00:00+09:00"));
    }

    #[test]
    fn test_parse_empty_history_rows() {
        let raw = parse_historical_forecast("[]", "2024-01-15 08:00:00").unwrap();

        assert!(raw.today.is_none());
        assert_eq!(raw.report_datetime, Loose::from("2024-01-15 08:00:00"));
    }
}
