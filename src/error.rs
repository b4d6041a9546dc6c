use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reasons for one sync run. Every network operation surfaces one of
/// these instead of returning an absent value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{context} returned HTTP {status}")]
    Status {
        context: &'static str,
        status: StatusCode,
    },

    #[error("{context} request was rejected by the API: {errors:?}")]
    Api {
        context: &'static str,
        errors: Vec<serde_json::Value>,
    },

    #[error("could not decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("public IP lookup returned an unusable address {0:?}")]
    InvalidIp(String),
}
