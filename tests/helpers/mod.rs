//! Test helpers and fixtures for mbcomp integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): Filter cascades in f32
//! - `GAIN_REDUCTION_DB_TOLERANCE` (0.75 dB): Peak-detector ripple on sines
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use mbcomp::prelude::*;
use mbcomp::CrossoverFrequencies;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Standard block size for deterministic testing
pub const TEST_BLOCK_SIZE: usize = 512;

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Configured processor with default parameters.
pub fn test_processor(channels: usize) -> MultibandProcessor {
    init_tracing();
    MultibandProcessor::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .max_block_size(TEST_BLOCK_SIZE)
        .channels(channels)
        .build()
        .expect("Failed to create test processor")
}

/// Bypass every band's compressor.
pub fn bypass_all(params: &MultibandParams) {
    for band in Band::ALL {
        params.band(band).bypassed.set(true);
    }
}

/// Same settings on every band.
pub fn set_all_bands(params: &MultibandParams, settings: CompressorSettings) {
    for band in Band::ALL {
        params.band(band).apply(&settings);
    }
}

/// Run a mono signal through `processor` in blocks of `block_size`.
pub fn process_mono(processor: &mut MultibandProcessor, signal: &mut [f32], block_size: usize) {
    for block in signal.chunks_mut(block_size) {
        processor.process(&mut [block]);
    }
}

/// Generate a sine wave with the given peak amplitude.
pub fn generate_sine(frequency: f64, amplitude: f32, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Generate a DC offset signal (constant value).
pub fn generate_dc(value: f32, num_samples: usize) -> Vec<f32> {
    vec![value; num_samples]
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Linear amplitude to decibels.
pub fn to_db(amplitude: f32) -> f32 {
    20.0 * amplitude.max(1e-12).log10()
}

/// Decibels to linear amplitude.
pub fn from_db(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Assert that a signal is approximately silent (all values near zero).
pub fn assert_silence(samples: &[f32], tolerance: f32) {
    let max = peak(samples);
    assert!(
        max <= tolerance,
        "Expected silence, but peak amplitude was {}",
        max
    );
}

/// Assert every sample is finite.
pub fn assert_finite(samples: &[f32]) {
    if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
        panic!("Non-finite sample {} at index {}", samples[i], i);
    }
}

/// Input passed through `AP(mid_high) ∘ AP(low_mid)`: what the three bands
/// sum to when every compressor is bypassed.
pub fn allpass_reference(
    input: &[f32],
    frequencies: CrossoverFrequencies,
    sample_rate: f64,
) -> Vec<f32> {
    use mbcomp::dsp::{FilterKind, LinkwitzRiley};

    let mut output = input.to_vec();
    LinkwitzRiley::new(FilterKind::Allpass, frequencies.low_mid, sample_rate)
        .process_channel(0, &mut output);
    LinkwitzRiley::new(FilterKind::Allpass, frequencies.mid_high, sample_rate)
        .process_channel(0, &mut output);
    output
}
