//! Shared utilities for dynamics processors

/// Level reported for silence.
pub(crate) const SILENCE_DB: f32 = -96.0;

/// State magnitudes below this are flushed to zero so decaying tails never
/// reach the subnormal range.
pub(crate) const DENORMAL_FLOOR: f32 = 1.0e-15;

/// Convert linear amplitude to decibels
#[inline]
pub(crate) fn amplitude_to_db(amp: f32) -> f32 {
    if amp <= 0.0 {
        SILENCE_DB
    } else {
        20.0 * amp.log10()
    }
}

/// Convert decibels to linear amplitude
#[inline]
pub(crate) fn db_to_amplitude(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Calculate one-pole smoothing coefficient from a time constant in milliseconds
#[inline]
pub(crate) fn ms_to_coeff(time_ms: f32, sample_rate: f64) -> f32 {
    if time_ms <= 0.0 {
        0.0
    } else {
        (-1.0 / (time_ms * 0.001 * sample_rate as f32)).exp()
    }
}

#[inline]
pub(crate) fn flush_denormal(value: f32) -> f32 {
    if value.abs() < DENORMAL_FLOOR {
        0.0
    } else {
        value
    }
}
