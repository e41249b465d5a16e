use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with forecast backend: {0}")]
pub struct BackendError(pub String);
impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> BackendError {
        BackendError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for BackendError {
    fn from(e: ureq::Error) -> BackendError {
        BackendError(format!("http request error: {}", e))
    }
}
