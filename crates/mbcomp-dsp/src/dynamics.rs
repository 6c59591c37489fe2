//! Per-band dynamics.
//!
//! - [`CompressorUnit`] - peak-detecting feed-forward compressor bound to one band's parameters
//! - [`gain_reduction_db`] - the static gain curve, hard or soft knee

mod utils;

mod compressor;

pub use compressor::{gain_reduction_db, CompressorUnit};
pub(crate) use utils::flush_denormal;
