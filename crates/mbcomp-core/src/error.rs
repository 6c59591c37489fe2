//! Error types for mbcomp-core.

use thiserror::Error;

/// Error type for mbcomp-core operations.
///
/// Nothing on the audio thread returns these. They surface at the host
/// boundary: configuration, layout negotiation and state restore.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported channel layout: {input} in, {output} out")]
    UnsupportedLayout { input: usize, output: usize },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
