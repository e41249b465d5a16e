use std::fmt;
use std::fmt::Formatter;
use crate::manager_backend::errors::BackendError;
use crate::manager_jma::errors::JmaError;

/// Error depicting errors that occur while loading configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}

/// Error depicting errors that occur while setting up logging
#[derive(Debug)]
pub struct LoggingError(pub String);

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LoggingError: {}", self.0)
    }
}
impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self { LoggingError(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { LoggingError(e.to_string()) }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self { LoggingError(e.to_string()) }
}

/// What the viewer was doing when an error occurred, decides the message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Areas,
    Forecast,
    History,
}

impl Stage {
    /// Returns the message shown to the user when this stage fails
    pub fn user_message(&self) -> &'static str {
        match self {
            Stage::Areas => "地域リストの取得に失敗しました。ページを再読み込みしてください。",
            Stage::Forecast => "天気予報の取得に失敗しました。しばらくしてからもう一度お試しください。",
            Stage::History => "過去の予報の取得に失敗しました。",
        }
    }
}

/// Top level error of the viewer
#[derive(Debug)]
pub enum TenkiError {
    Config(ConfigError),
    Logging(LoggingError),
    Fetch { stage: Stage, msg: String },
    Usage(String),
}

impl TenkiError {
    /// Wraps a fetch error with the stage it occurred in
    ///
    /// # Arguments
    ///
    /// * 'stage' - what was being fetched
    pub fn fetch<E: fmt::Display>(stage: Stage) -> impl FnOnce(E) -> TenkiError {
        move |e| TenkiError::Fetch { stage, msg: e.to_string() }
    }

    /// Returns the message to present to the user
    pub fn user_message(&self) -> String {
        match self {
            TenkiError::Fetch { stage, .. } => stage.user_message().to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for TenkiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TenkiError::Config(e) => write!(f, "TenkiError::Config: {}", e),
            TenkiError::Logging(e) => write!(f, "TenkiError::Logging: {}", e),
            TenkiError::Fetch { stage, msg } => write!(f, "TenkiError::Fetch ({:?}): {}", stage, msg),
            TenkiError::Usage(e) => write!(f, "TenkiError::Usage: {}", e),
        }
    }
}
impl From<ConfigError> for TenkiError {
    fn from(e: ConfigError) -> Self { TenkiError::Config(e) }
}
impl From<LoggingError> for TenkiError {
    fn from(e: LoggingError) -> Self { TenkiError::Logging(e) }
}
impl From<JmaError> for TenkiError {
    fn from(e: JmaError) -> Self { TenkiError::Fetch { stage: Stage::Forecast, msg: e.to_string() } }
}
impl From<BackendError> for TenkiError {
    fn from(e: BackendError) -> Self { TenkiError::Fetch { stage: Stage::Forecast, msg: e.to_string() } }
}
