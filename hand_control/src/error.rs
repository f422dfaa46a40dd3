//! Top-level application errors.

use hand_frame::SourceError;
use thiserror::Error;

use crate::sink::SinkError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("preview window: {0}")]
    Preview(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
