use std::fmt;
use std::fmt::Formatter;
use crate::day_names::{format_history_time, parse_local};

pub const PLACEHOLDER: &str = "-";
pub const NO_INFORMATION: &str = "情報なし";
pub const NO_WEEKLY_DATA: &str = "週間予報データがありません";

/// Where the displayed forecast came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    History,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DataSource::Live => write!(f, "🌐 APIから取得"),
            DataSource::History => write!(f, "📁 DBから取得"),
        }
    }
}

/// Display ready summary of one forecast day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub weather_icon: String,
    pub weather_text: String,
    pub temp_range: String,
    pub precipitation_percent: String,
    pub wind: String,
    pub day_label: String,
}

impl DaySummary {
    /// Returns a summary with every field at its placeholder
    ///
    /// # Arguments
    ///
    /// * 'day_label' - label of the day
    pub fn placeholder(day_label: &str) -> DaySummary {
        DaySummary {
            weather_icon: PLACEHOLDER.to_string(),
            weather_text: NO_INFORMATION.to_string(),
            temp_range: PLACEHOLDER.to_string(),
            precipitation_percent: PLACEHOLDER.to_string(),
            wind: PLACEHOLDER.to_string(),
            day_label: day_label.to_string(),
        }
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{:-<32}", format!("{} ", self.day_label))?;
        writeln!(f, "  {} {}", self.weather_icon, self.weather_text)?;
        writeln!(f, "  気温     {}", self.temp_range)?;
        writeln!(f, "  降水確率 {}", self.precipitation_percent)?;
        writeln!(f, "  風       {}", self.wind)
    }
}

/// The normalized forecast ready for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub area_name: String,
    pub update_time: String,
    pub source: Option<DataSource>,
    pub today: DaySummary,
    pub tomorrow: DaySummary,
    pub weekly: Vec<DaySummary>,
}

impl fmt::Display for DisplayModel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{:=<48}", format!("{} ", self.area_name))?;
        write!(f, "{}", self.update_time)?;
        if let Some(source) = self.source {
            write!(f, "  {}", source)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        write!(f, "{}", self.today)?;
        write!(f, "{}", self.tomorrow)?;

        writeln!(f, "{:-<32}", "週間予報 ")?;
        if self.weekly.is_empty() {
            writeln!(f, "  {}", NO_WEEKLY_DATA)?;
        }
        for day in &self.weekly {
            writeln!(f, "  {:<10} {} {:>5}  {}",
                     day.day_label, day.weather_icon, day.precipitation_percent, day.temp_range)?;
        }

        Ok(())
    }
}

/// Renders the fetch times of stored forecasts, latest forecast first
///
/// # Arguments
///
/// * 'history' - fetch times as served by the backend
pub fn render_history(history: &[String]) -> String {
    let mut output = String::from("  (最新の予報)\n");
    for fetched_at in history {
        let label = parse_local(fetched_at).map_or_else(|| fetched_at.clone(), format_history_time);
        output.push_str(&format!("  {:<12} {}\n", label, fetched_at));
    }
    output
}
