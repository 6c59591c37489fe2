//! Tolerance constants for audio testing.
//!
//! Different operations require different precision levels.

/// Floating point rounding errors (for passthrough, exact gain).
/// Use for operations that should be mathematically exact.
pub const FLOAT_EPSILON: f32 = 1e-6;

/// DSP processing tolerance. Two f32 filter cascades computing the same
/// transfer function by different routes agree to about this much.
pub const DSP_EPSILON: f32 = 1e-4;

/// Audio perceptual tolerance (~-60dB, inaudible differences).
pub const PERCEPTUAL_EPSILON: f32 = 0.001;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;

/// Allowed gap between measured and ideal gain reduction on a sine.
/// A peak detector sits below the sine's peak by its release ripple, so the
/// measured reduction is slightly under the static curve.
pub const GAIN_REDUCTION_DB_TOLERANCE: f32 = 0.75;
