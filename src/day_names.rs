use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};

pub const TODAY_LABEL: &str = "今日";
pub const TOMORROW_LABEL: &str = "明日";

/// Weekday names starting on Sunday
const DAY_NAMES: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Parses a timestamp into local time. Accepts RFC 3339 (as published by JMA) as well as
/// the naive `YYYY-MM-DD HH:MM:SS` form used for stored fetch times, the latter taken as local time.
///
/// # Arguments
///
/// * 'date_string' - the timestamp to parse
pub fn parse_local(date_string: &str) -> Option<DateTime<Local>> {
    let s = date_string.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Parses the calendar date of a timestamp or of a plain `YYYY-MM-DD` date
///
/// # Arguments
///
/// * 'date_string' - the date or timestamp to parse
pub fn parse_date(date_string: &str) -> Option<NaiveDate> {
    let s = date_string.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_local(s).map(|dt| dt.date_naive()))
}

/// Formats a report time, e.g. `1月15日 11:00 更新`
pub fn format_update_time(date_time: DateTime<Local>) -> String {
    format!("{}月{}日 {}:{:02} 更新",
            date_time.month(), date_time.day(), date_time.hour(), date_time.minute())
}

/// Formats a history entry time, e.g. `1/15 8:05`
pub fn format_history_time(date_time: DateTime<Local>) -> String {
    format!("{}/{} {}:{:02}",
            date_time.month(), date_time.day(), date_time.hour(), date_time.minute())
}

/// Formats a date as `M/D(曜)`
pub fn format_short_date(date: NaiveDate) -> String {
    let weekday = DAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!("{}/{}({})", date.month(), date.day(), weekday)
}

/// Returns the label for a forecast day given as a date string.
///
/// Only the calendar date is compared, so any time of day on tomorrow's date gives the
/// tomorrow label. Dates that can't be parsed give "-".
///
/// # Arguments
///
/// * 'date_string' - the date or timestamp of the forecast day
/// * 'is_today' - forces the today label regardless of date
/// * 'today' - the current local date
pub fn get_day_name(date_string: &str, is_today: bool, today: NaiveDate) -> String {
    if is_today {
        return TODAY_LABEL.to_string();
    }

    match parse_date(date_string) {
        Some(date) if Some(date) == tomorrow_of(today) => TOMORROW_LABEL.to_string(),
        Some(date) => format_short_date(date),
        None => "-".to_string(),
    }
}

/// Same as `get_day_name` but the today label is given by date equality rather than position
///
/// # Arguments
///
/// * 'date_string' - the date or timestamp of the forecast day
/// * 'today' - the current local date
pub fn get_day_name_by_date(date_string: &str, today: NaiveDate) -> String {
    let is_today = parse_date(date_string).is_some_and(|d| d == today);
    get_day_name(date_string, is_today, today)
}

fn tomorrow_of(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(1))
}
