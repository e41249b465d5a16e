use std::env;
use std::process::ExitCode;
use log::error;
use crate::initialization::init;
use crate::viewer::{run, Request};

mod config;
mod day_names;
mod display;
mod errors;
mod initialization;
mod logging;
mod manager_backend;
mod manager_jma;
mod models;
mod normalizer;
mod viewer;
mod weather_icons;

fn main() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<String>>();
    let Some(config_path) = args.first() else {
        eprintln!("usage: tenki <config.toml> [area_code] [fetched_at]");
        return ExitCode::from(2);
    };

    let (config, mgr) = match init(config_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let request = match Request::from_args(&args[1..], config.view.area_code.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: tenki <config.toml> [area_code] [fetched_at]");
            return ExitCode::from(2);
        },
    };

    match run(&config, &mgr, &request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        },
    }
}
