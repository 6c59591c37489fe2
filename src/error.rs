//! Centralized error type for the mbcomp umbrella crate.
//!
//! Wraps the core errors and state-blob decoding errors so `?` propagates
//! naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] mbcomp_core::Error),

    #[error("State: {0}")]
    State(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
