use chrono::{DateTime, Local, NaiveDate};
use log::debug;
use crate::day_names::{format_update_time, get_day_name, get_day_name_by_date, parse_local, TODAY_LABEL, TOMORROW_LABEL};
use crate::display::{DataSource, DaySummary, DisplayModel, NO_INFORMATION, PLACEHOLDER};
use crate::models::backend_forecast::{DayForecast, RawForecastV2, WeeklyForecast};
use crate::models::jma_forecast::{AreaSeries, RawForecastV1};
use crate::models::loose::{at, Loose};
use crate::models::RawForecast;
use crate::weather_icons::get_weather_icon;

/// Max number of days shown in the weekly list
pub const WEEKLY_DAYS: usize = 6;

/// Pop entries covering today in the short range forecast (6 hour blocks)
const TODAY_POPS: std::ops::Range<usize> = 0..4;

/// Pop entries covering tomorrow in the short range forecast
const TOMORROW_POPS: std::ops::Range<usize> = 4..8;

/// Turns raw forecast documents into display models.
///
/// Normalization never fails: every lookup has a fallback and a section that is missing
/// in the document only leaves its own fields at their placeholders.
pub struct ForecastNormalizer {
    now: DateTime<Local>,
}

impl ForecastNormalizer {
    /// Returns a normalizer labelling days relative to the given time
    ///
    /// # Arguments
    ///
    /// * 'now' - the time to consider as current
    pub fn at(now: DateTime<Local>) -> ForecastNormalizer {
        Self { now }
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Normalizes a forecast of either source shape
    ///
    /// # Arguments
    ///
    /// * 'raw' - the tagged raw forecast
    /// * 'area_name' - human readable name of the area
    pub fn normalize(&self, raw: &RawForecast, area_name: &str) -> DisplayModel {
        match raw {
            RawForecast::Jma(forecast) => self.normalize_v1(forecast, area_name),
            RawForecast::Backend { forecast, from_history } =>
                self.normalize_v2(forecast, area_name, *from_history),
        }
    }

    /// Normalizes a forecast document published by JMA.
    ///
    /// Weather, pop and temperature are read from the first area of the first three time series
    /// of the short range report. Since that report only carries temperatures for one day,
    /// tomorrow's range is taken from the weekly report.
    ///
    /// # Arguments
    ///
    /// * 'raw' - the JMA document
    /// * 'area_name' - human readable name of the area
    pub fn normalize_v1(&self, raw: &RawForecastV1, area_name: &str) -> DisplayModel {
        let report = &raw.forecast;
        let mut today = DaySummary::placeholder(TODAY_LABEL);
        let mut tomorrow = DaySummary::placeholder(TOMORROW_LABEL);

        match report.first_area(0) {
            Some(area) => {
                debug!("normalizing forecast for {} from area {} ({})", area_name, area.area.name, area.area.code);
                fill_weather(&mut today, area, 0);
                if area.weather_codes.len() > 1 {
                    fill_weather(&mut tomorrow, area, 1);
                }
            },
            None => debug!("no weather area in forecast for {}", area_name),
        }

        if let Some(temps) = report.first_area(2) {
            today.temp_range = temp_range(at(&temps.temps, 0).truthy(), at(&temps.temps, 1).truthy());
        }

        if let Some(pops) = report.first_area(1) {
            today.precipitation_percent = max_pop(&pops.pops, TODAY_POPS)
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            tomorrow.precipitation_percent = max_pop(&pops.pops, TOMORROW_POPS)
                .unwrap_or_else(|| PLACEHOLDER.to_string());
        }

        let weekly_temps = raw.weekly.as_ref().and_then(|w| w.first_area(1));
        if let Some(temps) = weekly_temps {
            tomorrow.temp_range = temp_range(at(&temps.temps_min, 1).truthy(), at(&temps.temps_max, 1).truthy());
        }

        DisplayModel {
            area_name: area_name.to_string(),
            update_time: self.update_time(&report.report_datetime, false),
            source: None,
            today,
            tomorrow,
            weekly: self.weekly_v1(raw),
        }
    }

    /// Normalizes a forecast document served by the backend.
    ///
    /// Pop is only rendered when truthy, so a 0% chance shows as "-". Tomorrow's
    /// temperature range is never carried by this document and always shows as "-".
    ///
    /// # Arguments
    ///
    /// * 'raw' - the backend document
    /// * 'area_name' - human readable name of the area
    /// * 'from_history' - whether the document was read from the backend's stored history
    pub fn normalize_v2(&self, raw: &RawForecastV2, area_name: &str, from_history: bool) -> DisplayModel {
        let mut today = DaySummary::placeholder(TODAY_LABEL);
        let mut tomorrow = DaySummary::placeholder(TOMORROW_LABEL);

        if let Some(day) = &raw.today {
            fill_day(&mut today, day);
            today.temp_range = temp_range(day.temp_min.truthy(), day.temp_max.truthy());
        }

        if let Some(day) = &raw.tomorrow {
            fill_day(&mut tomorrow, day);
            tomorrow.temp_range = PLACEHOLDER.to_string();
        }

        let today_date = self.today();
        let weekly = raw.weekly
            .iter()
            .skip(1)
            .take(WEEKLY_DAYS)
            .map(|day| weekly_day_v2(day, today_date))
            .collect();

        DisplayModel {
            area_name: area_name.to_string(),
            update_time: self.update_time(&raw.report_datetime, true),
            source: Some(if from_history { DataSource::History } else { DataSource::Live }),
            today,
            tomorrow,
            weekly,
        }
    }

    /// Builds the weekly list from the weekly report, skipping its first (today) entry
    fn weekly_v1(&self, raw: &RawForecastV1) -> Vec<DaySummary> {
        let Some(weekly) = &raw.weekly else {
            return Vec::new();
        };
        let Some(series) = weekly.time_series.first() else {
            return Vec::new();
        };

        let default_area = AreaSeries::default();
        let area = series.areas.first().unwrap_or(&default_area);
        let temps = weekly.first_area(1).unwrap_or(&default_area);
        let today_date = self.today();

        let end = series.time_defines.len().min(WEEKLY_DAYS + 1);
        (1..end)
            .map(|i| DaySummary {
                weather_icon: icon(at(&area.weather_codes, i)),
                weather_text: String::new(),
                temp_range: weekly_temp_range(at(&temps.temps_min, i), at(&temps.temps_max, i)),
                precipitation_percent: weekly_pop(at(&area.pops, i)),
                wind: PLACEHOLDER.to_string(),
                day_label: get_day_name(&at(&series.time_defines, i).to_string(), false, today_date),
            })
            .collect()
    }

    /// Formats the report time, falling back to the current time when allowed
    fn update_time(&self, report_datetime: &Loose, now_if_missing: bool) -> String {
        match report_datetime.truthy() {
            Some(s) => parse_local(&s).map_or_else(|| PLACEHOLDER.to_string(), format_update_time),
            None if now_if_missing => format_update_time(self.now),
            None => PLACEHOLDER.to_string(),
        }
    }
}

fn icon(code: &Loose) -> String {
    get_weather_icon(&code.to_string()).to_string()
}

/// Fills icon, text and wind from the short range weather series at the given position
fn fill_weather(summary: &mut DaySummary, area: &AreaSeries, index: usize) {
    summary.weather_icon = icon(at(&area.weather_codes, index));
    summary.weather_text = at(&area.weathers, index).truthy().unwrap_or_else(|| NO_INFORMATION.to_string());
    summary.wind = at(&area.winds, index).truthy().unwrap_or_else(|| PLACEHOLDER.to_string());
}

/// Fills icon, text, wind and pop from a backend day forecast
fn fill_day(summary: &mut DaySummary, day: &DayForecast) {
    summary.weather_icon = icon(&day.weather_code);
    summary.weather_text = day.weather_text.truthy().unwrap_or_else(|| NO_INFORMATION.to_string());
    summary.wind = day.wind.truthy().unwrap_or_else(|| PLACEHOLDER.to_string());
    summary.precipitation_percent = day.pop.truthy()
        .map_or_else(|| PLACEHOLDER.to_string(), |p| format!("{}%", p));
}

fn weekly_day_v2(day: &WeeklyForecast, today: NaiveDate) -> DaySummary {
    DaySummary {
        weather_icon: icon(&day.weather_code),
        weather_text: String::new(),
        temp_range: weekly_temp_range(&day.temp_min, &day.temp_max),
        precipitation_percent: weekly_pop(&day.pop),
        wind: PLACEHOLDER.to_string(),
        day_label: get_day_name_by_date(&day.date.to_string(), today),
    }
}

/// Formats a min/max range, each missing end rendered as "-"
fn temp_range(min: Option<String>, max: Option<String>) -> String {
    format!("{}°C / {}°C",
            min.as_deref().unwrap_or(PLACEHOLDER),
            max.as_deref().unwrap_or(PLACEHOLDER))
}

/// Weekly ranges are only rendered when at least one end is known
fn weekly_temp_range(min: &Loose, max: &Loose) -> String {
    let (min, max) = (min.truthy(), max.truthy());
    if min.is_none() && max.is_none() {
        PLACEHOLDER.to_string()
    } else {
        temp_range(min, max)
    }
}

/// Weekly pop is rendered for any present value, zero included
fn weekly_pop(pop: &Loose) -> String {
    pop.present().map_or_else(|| PLACEHOLDER.to_string(), |p| format!("{}%", p))
}

/// Returns the highest numeric pop within the given positions as a percent string,
/// or None if no position holds a number
///
/// # Arguments
///
/// * 'pops' - pop values of the short range forecast
/// * 'range' - positions to consider
fn max_pop(pops: &[Loose], range: std::ops::Range<usize>) -> Option<String> {
    pops.iter()
        .skip(range.start)
        .take(range.len())
        .filter_map(Loose::as_number)
        .reduce(f64::max)
        .map(|max| format!("{}%", max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn local_ts(day: u32) -> String {
        Local.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap().to_rfc3339()
    }

    fn jma_document(pops: Value) -> Value {
        json!([
            {
                "publishingOffice": "気象庁",
                "reportDatetime": Local.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap().to_rfc3339(),
                "timeSeries": [
                    {
                        "timeDefines": [local_ts(15), local_ts(16), local_ts(17)],
                        "areas": [{
                            "area": { "name": "東京地方", "code": "130010" },
                            "weatherCodes": ["100", "201", "300"],
                            "weathers": ["晴れ", "くもり時々晴れ", "雨"],
                            "winds": ["北の風", "", "南の風"]
                        }]
                    },
                    {
                        "timeDefines": [],
                        "areas": [{ "area": { "name": "東京地方" }, "pops": pops }]
                    },
                    {
                        "timeDefines": [],
                        "areas": [{ "area": { "name": "東京" }, "temps": ["3", "12"] }]
                    }
                ]
            },
            {
                "timeSeries": [
                    {
                        "timeDefines": (15..=22).map(local_ts).collect::<Vec<_>>(),
                        "areas": [{
                            "weatherCodes": ["100", "101", "200", "300", "400", "999", "100", "100"],
                            "pops": ["", "10", "0", "", "50", "60", "70", "80"]
                        }]
                    },
                    {
                        "timeDefines": (15..=22).map(local_ts).collect::<Vec<_>>(),
                        "areas": [{
                            "tempsMin": ["", "2", "3", "", "5", "6", "7", "8"],
                            "tempsMax": ["", "10", "11", "", "13", "14", "15", "16"]
                        }]
                    }
                ]
            }
        ])
    }

    fn normalize_v1(doc: Value) -> DisplayModel {
        ForecastNormalizer::at(now()).normalize_v1(&RawForecastV1::from(doc), "東京都")
    }

    #[test]
    fn test_v1_today_and_tomorrow() {
        let model = normalize_v1(jma_document(json!(["10", "20", "", "40", "50", "60", "70", "80"])));

        assert_eq!(model.area_name, "東京都");
        assert_eq!(model.update_time, "1月15日 11:00 更新");
        assert_eq!(model.source, None);

        assert_eq!(model.today.day_label, "今日");
        assert_eq!(model.today.weather_icon, "☀️");
        assert_eq!(model.today.weather_text, "晴れ");
        assert_eq!(model.today.wind, "北の風");
        assert_eq!(model.today.temp_range, "3°C / 12°C");

        assert_eq!(model.tomorrow.day_label, "明日");
        assert_eq!(model.tomorrow.weather_icon, "☁️");
        assert_eq!(model.tomorrow.weather_text, "くもり時々晴れ");
        assert_eq!(model.tomorrow.wind, "-");
        assert_eq!(model.tomorrow.temp_range, "2°C / 10°C");
    }

    #[test]
    fn test_v1_pop_windows() {
        let model = normalize_v1(jma_document(json!(["10", "20", "", "40", "50", "60", "70", "80"])));

        // Indices 0 to 3 hold 10, 20, "" and 40; see DESIGN.md open question 1
        assert_eq!(model.today.precipitation_percent, "40%");
        assert_eq!(model.tomorrow.precipitation_percent, "80%");
    }

    #[test]
    fn test_v1_pop_without_numbers() {
        let model = normalize_v1(jma_document(json!(["", "", "", "", "", "", "", ""])));
        assert_eq!(model.today.precipitation_percent, "-");
        assert_eq!(model.tomorrow.precipitation_percent, "-");

        let model = normalize_v1(jma_document(json!(["0", "10"])));
        assert_eq!(model.today.precipitation_percent, "10%");
        assert_eq!(model.tomorrow.precipitation_percent, "-");
    }

    #[test]
    fn test_v1_weekly() {
        let model = normalize_v1(jma_document(json!([])));

        assert_eq!(model.weekly.len(), 6);
        assert_eq!(model.weekly[0].day_label, "明日");
        assert_eq!(model.weekly[0].weather_icon, "🌤️");
        assert_eq!(model.weekly[0].precipitation_percent, "10%");
        assert_eq!(model.weekly[0].temp_range, "2°C / 10°C");

        // 2024-01-17 is a Wednesday
        assert_eq!(model.weekly[1].day_label, "1/17(水)");
        assert_eq!(model.weekly[1].precipitation_percent, "0%");
        assert_eq!(model.weekly[2].precipitation_percent, "-");
        assert_eq!(model.weekly[2].temp_range, "-");
        assert_eq!(model.weekly[4].weather_icon, "🌈");
        assert_eq!(model.weekly[5].day_label, "1/21(日)");
    }

    #[test]
    fn test_v1_weekly_shorter_than_a_week() {
        let mut doc = jma_document(json!([]));
        doc[1]["timeSeries"][0]["timeDefines"] = json!([local_ts(15), local_ts(16), local_ts(17)]);
        let model = normalize_v1(doc);

        assert_eq!(model.weekly.len(), 2);
    }

    #[test]
    fn test_v1_without_weekly_report() {
        let mut doc = jma_document(json!(["10"]));
        doc.as_array_mut().unwrap().truncate(1);
        let model = normalize_v1(doc);

        assert!(model.weekly.is_empty());
        assert_eq!(model.tomorrow.temp_range, "-");
        assert_eq!(model.tomorrow.weather_text, "くもり時々晴れ");
    }

    #[test]
    fn test_v1_empty_areas_only_skip_their_section() {
        let mut doc = jma_document(json!(["10", "20", "30", "40", "50"]));
        doc[0]["timeSeries"][0]["areas"] = json!([]);
        let model = normalize_v1(doc);

        assert_eq!(model.today.weather_icon, "-");
        assert_eq!(model.today.weather_text, "情報なし");
        assert_eq!(model.today.wind, "-");
        assert_eq!(model.today.temp_range, "3°C / 12°C");
        assert_eq!(model.today.precipitation_percent, "40%");
        assert_eq!(model.tomorrow.precipitation_percent, "50%");
        assert_eq!(model.weekly.len(), 6);
    }

    #[test]
    fn test_v1_single_day_keeps_tomorrow_placeholders() {
        let mut doc = jma_document(json!([]));
        doc[0]["timeSeries"][0]["areas"][0]["weatherCodes"] = json!(["100"]);
        let model = normalize_v1(doc);

        assert_eq!(model.tomorrow.weather_icon, "-");
        assert_eq!(model.tomorrow.weather_text, "情報なし");
    }

    #[test]
    fn test_v1_missing_temperatures() {
        let mut doc = jma_document(json!([]));
        doc[0]["timeSeries"][2]["areas"][0]["temps"] = json!(["", "12"]);
        assert_eq!(normalize_v1(doc.clone()).today.temp_range, "-°C / 12°C");

        doc[0]["timeSeries"][2]["areas"] = json!([]);
        assert_eq!(normalize_v1(doc).today.temp_range, "-");
    }

    #[test]
    fn test_v1_never_fails_on_garbage() {
        for doc in [json!(null), json!([]), json!([{}]), json!("x"), json!([1, 2, 3]),
                    json!([{ "timeSeries": [{ "areas": [{}] }] }, { "timeSeries": [{}] }])] {
            let model = normalize_v1(doc);
            assert!(model.weekly.len() <= WEEKLY_DAYS);
            assert_eq!(model.today.day_label, "今日");
            assert_eq!(model.update_time, "-");
        }
    }

    fn backend_document() -> Value {
        let date = |d: u32| format!("2024-01-{:02}", d);
        json!({
            "today": {
                "date": date(15), "weather_code": "101", "weather_text": "晴れ時々くもり",
                "wind": "北の風", "temp_min": "3", "temp_max": "12", "pop": 30
            },
            "tomorrow": {
                "date": date(16), "weather_code": "302", "weather_text": "雨",
                "wind": "南の風", "pop": 80
            },
            "weekly": (15..=23).map(|d| json!({
                "date": date(d), "weather_code": "200", "pop": "20", "temp_min": "1", "temp_max": "9"
            })).collect::<Vec<_>>(),
            "report_datetime": Local.with_ymd_and_hms(2024, 1, 15, 5, 0, 0).unwrap().to_rfc3339()
        })
    }

    fn normalize_v2(doc: Value, from_history: bool) -> DisplayModel {
        let raw: RawForecastV2 = serde_json::from_value(doc).unwrap();
        ForecastNormalizer::at(now()).normalize_v2(&raw, "東京都", from_history)
    }

    #[test]
    fn test_v2_today_and_tomorrow() {
        let model = normalize_v2(backend_document(), false);

        assert_eq!(model.update_time, "1月15日 5:00 更新");
        assert_eq!(model.source, Some(DataSource::Live));
        assert_eq!(model.today.weather_icon, "🌤️");
        assert_eq!(model.today.temp_range, "3°C / 12°C");
        assert_eq!(model.today.precipitation_percent, "30%");
        assert_eq!(model.tomorrow.weather_icon, "🌧️");
        assert_eq!(model.tomorrow.precipitation_percent, "80%");
        assert_eq!(model.tomorrow.wind, "南の風");
    }

    #[test]
    fn test_v2_tomorrow_temperature_is_never_rendered() {
        let mut doc = backend_document();
        doc["tomorrow"]["temp_min"] = json!("4");
        doc["tomorrow"]["temp_max"] = json!("10");
        assert_eq!(normalize_v2(doc, false).tomorrow.temp_range, "-");
    }

    #[test]
    fn test_v2_zero_pop_renders_placeholder() {
        let mut doc = backend_document();
        doc["today"]["pop"] = json!(0);
        doc["tomorrow"]["pop"] = json!("");
        let model = normalize_v2(doc, false);

        assert_eq!(model.today.precipitation_percent, "-");
        assert_eq!(model.tomorrow.precipitation_percent, "-");
    }

    #[test]
    fn test_v2_whole_float_values_render_without_fraction() {
        let mut doc = backend_document();
        doc["today"]["pop"] = json!(30.0);
        doc["today"]["temp_min"] = json!(3.0);
        doc["today"]["temp_max"] = json!(12.5);
        let model = normalize_v2(doc, false);

        assert_eq!(model.today.precipitation_percent, "30%");
        assert_eq!(model.today.temp_range, "3°C / 12.5°C");
    }

    #[test]
    fn test_v2_weekly_slice_and_labels() {
        let model = normalize_v2(backend_document(), false);

        assert_eq!(model.weekly.len(), 6);
        assert_eq!(model.weekly[0].day_label, "明日");
        assert_eq!(model.weekly[1].day_label, "1/17(水)");
        assert_eq!(model.weekly[5].day_label, "1/21(日)");
        assert_eq!(model.weekly[0].precipitation_percent, "20%");
        assert_eq!(model.weekly[0].temp_range, "1°C / 9°C");
    }

    #[test]
    fn test_v2_weekly_today_by_date() {
        let mut doc = backend_document();
        doc["weekly"] = json!([{ "date": "2024-01-14" }, { "date": "2024-01-15", "pop": 0 }]);
        let model = normalize_v2(doc, false);

        assert_eq!(model.weekly.len(), 1);
        assert_eq!(model.weekly[0].day_label, "今日");
        assert_eq!(model.weekly[0].precipitation_percent, "0%");
        assert_eq!(model.weekly[0].weather_icon, "🌈");
    }

    #[test]
    fn test_v2_empty_weekly() {
        let mut doc = backend_document();
        doc["weekly"] = json!([]);
        assert!(normalize_v2(doc.clone(), false).weekly.is_empty());

        doc.as_object_mut().unwrap().remove("weekly");
        assert!(normalize_v2(doc, false).weekly.is_empty());
    }

    #[test]
    fn test_v2_history_label_and_missing_report_time() {
        let mut doc = backend_document();
        doc.as_object_mut().unwrap().remove("report_datetime");
        let model = normalize_v2(doc, true);

        assert_eq!(model.source, Some(DataSource::History));
        assert_eq!(model.update_time, format_update_time(now()));
    }

    #[test]
    fn test_v2_missing_days() {
        let model = normalize_v2(json!({}), false);

        assert_eq!(model.today, DaySummary::placeholder("今日"));
        assert_eq!(model.tomorrow, DaySummary::placeholder("明日"));
        assert!(model.weekly.is_empty());
    }

    #[test]
    fn test_v2_empty_fields_fall_back() {
        let model = normalize_v2(json!({ "today": { "weather_text": "", "wind": null } }), false);

        assert_eq!(model.today.weather_icon, "🌈");
        assert_eq!(model.today.weather_text, "情報なし");
        assert_eq!(model.today.wind, "-");
        assert_eq!(model.today.temp_range, "-°C / -°C");
        assert_eq!(model.today.precipitation_percent, "-");
    }

    #[test]
    fn test_normalize_dispatches_on_source() {
        let normalizer = ForecastNormalizer::at(now());
        let raw = RawForecast::Backend {
            forecast: RawForecastV2::from_history(Vec::new(), "2024-01-15 08:00:00"),
            from_history: true,
        };
        let model = normalizer.normalize(&raw, "東京都");
        assert_eq!(model.source, Some(DataSource::History));
        assert_eq!(model.update_time, "1月15日 8:00 更新");

        let raw = RawForecast::Jma(RawForecastV1::default());
        assert_eq!(normalizer.normalize(&raw, "東京都").source, None);
    }
}
