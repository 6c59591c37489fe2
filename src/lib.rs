//! # mbcomp - Three-band Multiband Compressor
//!
//! Splits a mono or stereo stream into low, mid and high bands with a
//! Linkwitz-Riley crossover, compresses each band with its own settings and
//! sums the bands back together. Real-time safe once configured: no
//! allocation, locking or logging in `process`.
//!
//! ## Architecture
//!
//! mbcomp is an umbrella crate over:
//! - **mbcomp-core** - Parameter bridge (typed ids, clamping parameters, snapshots), process spec
//! - **mbcomp-dsp** - Crossover network, per-band compressors, band routing, block engine
//!
//! ## Quick Start
//!
//! ```
//! use mbcomp::prelude::*;
//!
//! let mut processor = MultibandProcessor::builder()
//!     .sample_rate(48000.0)
//!     .max_block_size(512)
//!     .channels(2)
//!     .build()?;
//!
//! // Control side: any thread
//! let params = Arc::clone(processor.params());
//! params
//!     .param(ParamId::Band(Band::Mid, BandParam::Ratio))
//!     .set_plain(4.0);
//!
//! // Audio side
//! let mut left = vec![0.1_f32; 512];
//! let mut right = vec![0.1_f32; 512];
//! processor.process(&mut [&mut left[..], &mut right[..]]);
//!
//! // Persistence
//! let blob = processor.get_state()?;
//! processor.set_state(&blob)?;
//! # Ok::<(), mbcomp::Error>(())
//! ```

/// Re-export of mbcomp-core for direct access
pub use mbcomp_core as core;

/// Re-export of mbcomp-dsp for direct access
pub use mbcomp_dsp as dsp;

pub use mbcomp_core::{
    Band, BandParam, BandParams, BoolParam, ChoiceParam, CompressorSettings, CrossoverParams,
    FloatParam, MultibandParams, ParamId, ParamInfo, ParamKind, ParamRef, ParamSnapshot,
    ProcessSpec, RATIO_CHOICES,
};

pub use mbcomp_dsp::{CompressorUnit, CrossoverFrequencies, CrossoverNetwork, MultibandEngine};

mod error;
pub use error::{Error, Result};

mod builder;
mod layout;
mod processor;
pub mod state;

pub use builder::MultibandProcessorBuilder;
pub use layout::{is_layout_supported, ChannelLayout};
pub use processor::MultibandProcessor;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{MultibandProcessor, MultibandProcessorBuilder};

    pub use crate::{ChannelLayout, Error, Result};

    pub use crate::{
        Band, BandParam, CompressorSettings, MultibandParams, ParamId, ParamRef, ProcessSpec,
    };

    pub use std::sync::Arc;
}
