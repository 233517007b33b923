// error.rs — crate error type

use thiserror::Error;

/// Errors raised while loading configuration or building views.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown view type: {0}")]
    UnknownViewType(String),

    #[error("unknown controller type: {0}")]
    UnknownControllerType(String),

    #[error("invalid {field} bounds: min {min} > max {max}")]
    InvalidBounds {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
