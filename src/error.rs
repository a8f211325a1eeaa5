//! Error type shared by the signal and configuration layers.

use thiserror::Error;

/// Errors surfaced by the palette crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A value handed to signal registration was not a handler.
    #[error("invalid callback: expected a handler, got {0}")]
    NotCallable(&'static str),
    /// Options JSON could not be parsed.
    #[error("palette options error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
