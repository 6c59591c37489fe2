//! Linkwitz-Riley filters built from TPT state-variable sections.
//!
//! A Butterworth SVF section (Q = 1/sqrt(2)) gives 2nd-order lowpass,
//! bandpass and highpass outputs from the same state. Cascading two sections
//! gives the 24 dB/oct Linkwitz-Riley slopes; `LP4 + HP4` then has unit
//! magnitude and the phase of a 2nd-order allpass, which one section provides
//! directly as `x - 2k * band`.

use mbcomp_core::MAX_CHANNELS;

use crate::dynamics::flush_denormal;

/// Lowest cutoff a filter will run at.
pub const MIN_CUTOFF_HZ: f32 = 10.0;

/// Highest usable cutoff, as a fraction of the sample rate.
const MAX_CUTOFF_RATIO: f64 = 0.49;

/// Clamp a cutoff into the range the bilinear prewarp stays stable in.
#[inline]
pub fn clamp_cutoff(cutoff_hz: f32, sample_rate: f64) -> f32 {
    let max = (sample_rate * MAX_CUTOFF_RATIO) as f32;
    if cutoff_hz.is_nan() {
        return MIN_CUTOFF_HZ.min(max);
    }
    cutoff_hz.max(MIN_CUTOFF_HZ).min(max)
}

/// Filter response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// 4th-order Linkwitz-Riley lowpass
    Lowpass,
    /// 4th-order Linkwitz-Riley highpass
    Highpass,
    /// 2nd-order allpass matching the phase of the LR4 pair
    Allpass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SvfCoefficients {
    k: f32,
    a1: f32,
    a2: f32,
    a3: f32,
}

impl SvfCoefficients {
    fn butterworth(cutoff_hz: f32, sample_rate: f64) -> Self {
        let g = (std::f64::consts::PI * cutoff_hz as f64 / sample_rate).tan();
        let k = std::f64::consts::SQRT_2;
        let a1 = 1.0 / (1.0 + g * (g + k));
        let a2 = g * a1;
        let a3 = g * a2;

        Self {
            k: k as f32,
            a1: a1 as f32,
            a2: a2 as f32,
            a3: a3 as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SvfState {
    ic1eq: f32,
    ic2eq: f32,
}

struct SvfOutputs {
    low: f32,
    band: f32,
    high: f32,
}

impl SvfState {
    #[inline]
    fn tick(&mut self, c: &SvfCoefficients, x: f32) -> SvfOutputs {
        let v3 = x - self.ic2eq;
        let v1 = c.a1 * self.ic1eq + c.a2 * v3;
        let v2 = self.ic2eq + c.a2 * self.ic1eq + c.a3 * v3;
        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        SvfOutputs {
            low: v2,
            band: v1,
            high: x - c.k * v1 - v2,
        }
    }

    #[inline]
    fn is_at_rest(&self) -> bool {
        self.ic1eq == 0.0 && self.ic2eq == 0.0
    }
}

/// Linkwitz-Riley crossover filter with independent state per channel.
///
/// State below the denormal floor is flushed to zero on every sample; high
/// cutoffs decay fast enough to go subnormal within a single block.
#[derive(Debug, Clone)]
pub struct LinkwitzRiley {
    kind: FilterKind,
    cutoff_hz: f32,
    sample_rate: f64,
    coeffs: SvfCoefficients,
    stages: [[SvfState; 2]; MAX_CHANNELS],
}

impl LinkwitzRiley {
    pub fn new(kind: FilterKind, cutoff_hz: f32, sample_rate: f64) -> Self {
        let cutoff_hz = clamp_cutoff(cutoff_hz, sample_rate);
        Self {
            kind,
            cutoff_hz,
            sample_rate,
            coeffs: SvfCoefficients::butterworth(cutoff_hz, sample_rate),
            stages: [[SvfState::default(); 2]; MAX_CHANNELS],
        }
    }

    /// Effective cutoff after clamping.
    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    /// Recompute coefficients for a new sample rate and clear state.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.cutoff_hz = clamp_cutoff(self.cutoff_hz, sample_rate);
        self.coeffs = SvfCoefficients::butterworth(self.cutoff_hz, sample_rate);
        self.reset();
    }

    /// Move the cutoff. Coefficients are recomputed only when it changed;
    /// state is kept so sweeps stay click-free.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        let cutoff_hz = clamp_cutoff(cutoff_hz, self.sample_rate);
        if cutoff_hz != self.cutoff_hz {
            self.cutoff_hz = cutoff_hz;
            self.coeffs = SvfCoefficients::butterworth(cutoff_hz, self.sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.stages = [[SvfState::default(); 2]; MAX_CHANNELS];
    }

    #[inline]
    pub fn process_sample(&mut self, channel: usize, x: f32) -> f32 {
        let c = &self.coeffs;
        let [first, second] = &mut self.stages[channel];
        match self.kind {
            FilterKind::Lowpass => {
                let y = first.tick(c, x).low;
                second.tick(c, y).low
            }
            FilterKind::Highpass => {
                let y = first.tick(c, x).high;
                second.tick(c, y).high
            }
            FilterKind::Allpass => x - 2.0 * c.k * first.tick(c, x).band,
        }
    }

    /// Filter one channel in place.
    pub fn process_channel(&mut self, channel: usize, samples: &mut [f32]) {
        debug_assert!(channel < MAX_CHANNELS, "channel {} out of range", channel);
        if channel >= MAX_CHANNELS {
            return;
        }

        for sample in samples.iter_mut() {
            *sample = self.process_sample(channel, *sample);
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.stages.iter().flatten().all(SvfState::is_at_rest)
    }
}
