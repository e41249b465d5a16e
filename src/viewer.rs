use chrono::Local;
use log::{error, info, warn};
use crate::config::Config;
use crate::display::render_history;
use crate::errors::{Stage, TenkiError};
use crate::initialization::Mgr;
use crate::manager_backend::Backend;
use crate::models::area::area_name;
use crate::models::RawForecast;
use crate::normalizer::ForecastNormalizer;

/// Number of history entries listed when not configured
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// What to show, taken from the command line with configured defaults
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub area_code: Option<String>,
    pub fetched_at: Option<String>,
}

impl Request {
    /// Builds a request from positional arguments `[area_code] [fetched_at]`
    ///
    /// # Arguments
    ///
    /// * 'args' - positional arguments following the configuration path
    /// * 'default_area' - area code to use when none is given
    pub fn from_args(args: &[String], default_area: Option<&str>) -> Result<Request, TenkiError> {
        if args.len() > 2 {
            return Err(TenkiError::Usage(format!("unexpected argument: {}", args[2])));
        }

        let area_code = args.first().cloned().or_else(|| default_area.map(str::to_string));
        let fetched_at = args.get(1).cloned();

        Ok(Request { area_code, fetched_at })
    }
}

/// Shows areas, the current forecast or a historical forecast depending on the request
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - fetch manager for the configured source
/// * 'request' - what to show
pub fn run(config: &Config, mgr: &Mgr, request: &Request) -> Result<(), TenkiError> {
    let areas = mgr.get_areas().inspect_err(|e| {
        error!("error fetching area list: {}", e);
    })?;
    info!("{} areas available", areas.len());

    let Some(area_code) = &request.area_code else {
        for area in &areas {
            println!("{}", area);
        }
        return Ok(());
    };
    let name = area_name(&areas, area_code);
    let normalizer = ForecastNormalizer::at(Local::now());

    let raw = match (mgr, &request.fetched_at) {
        (Mgr::Backend(backend), Some(fetched_at)) => {
            let forecast = backend.get_historical_forecast(area_code, fetched_at).map_err(|e| {
                error!("error fetching historical forecast: {}", e);
                TenkiError::fetch(Stage::History)(e)
            })?;
            RawForecast::Backend { forecast, from_history: true }
        },
        (Mgr::Jma(_), Some(_)) => {
            return Err(TenkiError::Usage("forecast history is only available from the backend source".to_string()));
        },
        (_, None) => mgr.get_forecast(area_code).inspect_err(|e| {
            error!("error fetching weather forecast: {}", e);
        })?,
    };

    let model = normalizer.normalize(&raw, &name);
    print!("{}", model);

    if let (Mgr::Backend(backend), None) = (mgr, &request.fetched_at) {
        print_history(backend, area_code, config.view.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
    }

    Ok(())
}

/// Prints the stored forecasts available for the area. A failure here does not affect
/// the forecast already shown and is only logged.
fn print_history(backend: &Backend, area_code: &str, limit: usize) {
    match backend.get_history(area_code, limit) {
        Ok(history) => {
            let history = history.into_iter().take(limit).collect::<Vec<String>>();
            println!("{:-<32}", "履歴 ");
            print!("{}", render_history(&history));
        },
        Err(e) => warn!("error loading history: {}", e),
    }
}
