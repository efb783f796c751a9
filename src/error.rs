//! Error types for offer-revive.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    /// The scheduler driver failed to deliver a revive call.
    #[error("driver error: {0}")]
    Driver(String),

    #[error("bad plan file {path}: {reason}")]
    Plan { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
