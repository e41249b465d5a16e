use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::models::loose::{lenient, lenient_seq, Loose};

/// Area reference attached to each area entry of a time series
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AreaRef {
    pub name: Loose,
    pub code: Loose,
}

/// One area of a time series. All arrays are parallel and indexed by the position
/// of the time series' `timeDefines`, only a subset of them is present in any given series.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AreaSeries {
    #[serde(deserialize_with = "lenient")]
    pub area: AreaRef,
    #[serde(deserialize_with = "lenient_seq")]
    pub weather_codes: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub weathers: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub winds: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub pops: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub temps: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub temps_min: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub temps_max: Vec<Loose>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(deserialize_with = "lenient_seq")]
    pub time_defines: Vec<Loose>,
    #[serde(deserialize_with = "lenient_seq")]
    pub areas: Vec<AreaSeries>,
}

/// One report of the JMA forecast document, either the short range or the weekly one
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastReport {
    pub report_datetime: Loose,
    #[serde(deserialize_with = "lenient_seq")]
    pub time_series: Vec<TimeSeries>,
}

impl ForecastReport {
    /// Returns the first area of the time series at the given position
    ///
    /// # Arguments
    ///
    /// * 'series' - position of the time series in the report
    pub fn first_area(&self, series: usize) -> Option<&AreaSeries> {
        self.time_series.get(series).and_then(|ts| ts.areas.first())
    }
}

/// Forecast document as published by JMA at `forecast/data/forecast/{area}.json`.
///
/// The document is a two element array, short range forecast first and weekly forecast second.
#[derive(Debug, Clone, Default)]
pub struct RawForecastV1 {
    pub forecast: ForecastReport,
    pub weekly: Option<ForecastReport>,
}

impl From<Value> for RawForecastV1 {
    fn from(value: Value) -> Self {
        let mut reports = match value {
            Value::Array(items) => items.into_iter(),
            _ => Vec::new().into_iter(),
        };

        let forecast = reports.next()
            .and_then(|v| serde_json::from_value::<ForecastReport>(v).ok())
            .unwrap_or_default();
        let weekly = reports.next()
            .and_then(|v| serde_json::from_value::<ForecastReport>(v).ok());

        RawForecastV1 { forecast, weekly }
    }
}

impl<'de> Deserialize<'de> for RawForecastV1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RawForecastV1::from(Value::deserialize(deserializer)?))
    }
}
