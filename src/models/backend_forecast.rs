use serde::Deserialize;
use crate::models::loose::{lenient, lenient_seq, Loose};

/// Day forecast as served by the forecast backend, also the shape of stored history rows
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DayForecast {
    pub weather_code: Loose,
    pub weather_text: Loose,
    pub wind: Loose,
    pub temp_min: Loose,
    pub temp_max: Loose,
    pub pop: Loose,
    pub report_datetime: Loose,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct WeeklyForecast {
    pub date: Loose,
    pub weather_code: Loose,
    pub pop: Loose,
    pub temp_min: Loose,
    pub temp_max: Loose,
}

/// Forecast document served by the backend at `/forecast/{area}`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawForecastV2 {
    #[serde(deserialize_with = "lenient")]
    pub today: Option<DayForecast>,
    #[serde(deserialize_with = "lenient")]
    pub tomorrow: Option<DayForecast>,
    #[serde(deserialize_with = "lenient_seq")]
    pub weekly: Vec<WeeklyForecast>,
    pub report_datetime: Loose,
}

impl RawForecastV2 {
    /// Builds a forecast document from rows stored at a given fetch time.
    ///
    /// Stored rows only carry today and tomorrow, so the weekly list is always empty.
    ///
    /// # Arguments
    ///
    /// * 'rows' - stored rows, today first
    /// * 'fetched_at' - the fetch time the rows were requested for
    pub fn from_history(rows: Vec<DayForecast>, fetched_at: &str) -> RawForecastV2 {
        let mut rows = rows.into_iter();
        let today = rows.next();
        let tomorrow = rows.next();

        let report_datetime = today.as_ref()
            .map(|t| t.report_datetime.clone())
            .filter(Loose::is_truthy)
            .unwrap_or_else(|| Loose::from(fetched_at));

        RawForecastV2 {
            today,
            tomorrow,
            weekly: Vec::new(),
            report_datetime,
        }
    }
}
