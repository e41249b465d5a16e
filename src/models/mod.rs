pub mod area;
pub mod backend_forecast;
pub mod jma_forecast;
pub mod loose;

use crate::models::backend_forecast::RawForecastV2;
use crate::models::jma_forecast::RawForecastV1;

/// A raw forecast tagged with the source that produced it
#[derive(Debug, Clone)]
pub enum RawForecast {
    /// Fetched directly from JMA
    Jma(RawForecastV1),
    /// Fetched from the forecast backend, either live or from its stored history
    Backend { forecast: RawForecastV2, from_history: bool },
}
