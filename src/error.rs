use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for grid construction, API polling, and record persistence.
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a status other than `OK`/`ZERO_RESULTS`.
    /// Fault-tolerant loops catch this kind and only this kind.
    #[error("API returned status {0}")]
    Status(String),
    #[error("invalid grid: {0}")]
    Grid(String),
    #[error("{0}")]
    Parse(String),
    #[error(transparent)]
    Http(#[from] ureq::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
