//! Parameter bridge and configuration for the mbcomp multiband compressor.
//!
//! # Primary API
//!
//! - [`MultibandParams`]: every host-visible parameter, shared via `Arc`
//! - [`ParamId`]: typed parameter identity with a stable string key
//! - [`ProcessSpec`]: sample rate, block size and channel count for a session
//!
//! Parameter objects are written from any thread and clamp on write; the
//! audio thread reads them through lock-free atomics at block boundaries.
//!
//! # Example
//!
//! ```
//! use mbcomp_core::{Band, BandParam, MultibandParams, ParamId};
//!
//! let params = MultibandParams::new();
//! params
//!     .param(ParamId::Band(Band::Low, BandParam::Threshold))
//!     .set_plain(-24.0);
//!
//! assert_eq!(params.band(Band::Low).settings().threshold_db, -24.0);
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{ProcessSpec, MAX_CHANNELS, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat, AtomicIndex};

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

pub mod params;
pub use params::{
    Band, BandParam, BandParams, BoolParam, ChoiceParam, CompressorSettings, CrossoverParams,
    FloatParam, MultibandParams, ParamId, ParamInfo, ParamKind, ParamRef, ParamSnapshot,
    RATIO_CHOICES,
};
