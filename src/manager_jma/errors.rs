use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with JMA: {0}")]
pub struct JmaError(pub String);
impl From<serde_json::Error> for JmaError {
    fn from(e: serde_json::Error) -> JmaError {
        JmaError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for JmaError {
    fn from(e: ureq::Error) -> JmaError {
        JmaError(format!("http request error: {}", e))
    }
}
