//! Linkwitz-Riley band splitting.

mod network;
mod svf;

pub use network::{CrossoverFrequencies, CrossoverNetwork, MIN_CROSSOVER_RATIO};
pub use svf::{clamp_cutoff, FilterKind, LinkwitzRiley, MIN_CUTOFF_HZ};

#[cfg(test)]
pub(crate) use network::reference_allpass;
