//! Real-time DSP for the mbcomp multiband compressor.
//!
//! - [`MultibandEngine`]: the full split, compress and sum pipeline
//! - [`CrossoverNetwork`]: three-band Linkwitz-Riley splitter with allpass phase compensation
//! - [`CompressorUnit`]: per-band compressor reading shared [`mbcomp_core::BandParams`]
//! - [`BandRouter`]: preallocated planar band buffers
//!
//! Nothing here allocates, locks or logs once [`MultibandEngine::configure`]
//! has returned.

mod crossover;
pub use crossover::{
    clamp_cutoff, CrossoverFrequencies, CrossoverNetwork, FilterKind, LinkwitzRiley,
    MIN_CROSSOVER_RATIO, MIN_CUTOFF_HZ,
};

mod dynamics;
pub use dynamics::{gain_reduction_db, CompressorUnit};

mod router;
pub use router::{BandBuffer, BandRouter};

mod engine;
pub use engine::MultibandEngine;
