//! Three-band crossover network.
//!
//! ```text
//!            ┌─ LP4(low_mid) ─ AP(mid_high) ─────────── low
//! input ─────┤
//!            └─ HP4(low_mid) ─┬─ LP4(mid_high) ──────── mid
//!                             └─ HP4(mid_high) ──────── high
//! ```
//!
//! The allpass on the low path gives it the same phase shift the two upper
//! bands pick up from the second split, so `low + mid + high` is the input
//! through `AP(mid_high) ∘ AP(low_mid)`: flat magnitude, no cancellation.

use super::svf::{clamp_cutoff, FilterKind, LinkwitzRiley};

/// `mid_high` is kept at least this factor above `low_mid`.
pub const MIN_CROSSOVER_RATIO: f32 = 1.001;

/// The two split points in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverFrequencies {
    pub low_mid: f32,
    pub mid_high: f32,
}

impl Default for CrossoverFrequencies {
    fn default() -> Self {
        Self {
            low_mid: mbcomp_core::params::DEFAULT_LOW_MID_HZ,
            mid_high: mbcomp_core::params::DEFAULT_MID_HIGH_HZ,
        }
    }
}

impl CrossoverFrequencies {
    pub fn new(low_mid: f32, mid_high: f32) -> Self {
        Self { low_mid, mid_high }
    }

    /// Order the pair and keep both inside the usable range for
    /// `sample_rate`. Coincident or inverted cutoffs are pushed apart by
    /// [`MIN_CROSSOVER_RATIO`], moving `mid_high` up first and `low_mid`
    /// down when there is no room left below Nyquist.
    pub fn sanitized(self, sample_rate: f64) -> Self {
        let max = clamp_cutoff(f32::INFINITY, sample_rate);

        let low_mid = clamp_cutoff(self.low_mid, sample_rate);
        let mid_high = clamp_cutoff(self.mid_high, sample_rate)
            .max(low_mid * MIN_CROSSOVER_RATIO)
            .min(max);
        let low_mid = clamp_cutoff(low_mid.min(mid_high / MIN_CROSSOVER_RATIO), sample_rate);

        Self { low_mid, mid_high }
    }
}

/// Linkwitz-Riley network splitting a signal into low, mid and high bands.
///
/// Filters hold state per channel, so stage methods may be called channel by
/// channel in any order.
#[derive(Debug, Clone)]
pub struct CrossoverNetwork {
    frequencies: CrossoverFrequencies,
    sample_rate: f64,
    low_mid_lp: LinkwitzRiley,
    low_mid_hp: LinkwitzRiley,
    mid_high_ap: LinkwitzRiley,
    mid_high_lp: LinkwitzRiley,
    mid_high_hp: LinkwitzRiley,
}

impl CrossoverNetwork {
    pub fn new(frequencies: CrossoverFrequencies, sample_rate: f64) -> Self {
        let frequencies = frequencies.sanitized(sample_rate);
        let CrossoverFrequencies { low_mid, mid_high } = frequencies;

        Self {
            frequencies,
            sample_rate,
            low_mid_lp: LinkwitzRiley::new(FilterKind::Lowpass, low_mid, sample_rate),
            low_mid_hp: LinkwitzRiley::new(FilterKind::Highpass, low_mid, sample_rate),
            mid_high_ap: LinkwitzRiley::new(FilterKind::Allpass, mid_high, sample_rate),
            mid_high_lp: LinkwitzRiley::new(FilterKind::Lowpass, mid_high, sample_rate),
            mid_high_hp: LinkwitzRiley::new(FilterKind::Highpass, mid_high, sample_rate),
        }
    }

    /// Re-derive coefficients for `sample_rate` and clear all filter state.
    pub fn configure(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        for filter in self.filters_mut() {
            filter.set_sample_rate(sample_rate);
        }
        self.apply_frequencies(self.frequencies);
        tracing::debug!(
            "Crossover configured at {} Hz: low/mid {} Hz, mid/high {} Hz",
            sample_rate,
            self.frequencies.low_mid,
            self.frequencies.mid_high
        );
    }

    pub fn reset(&mut self) {
        for filter in self.filters_mut() {
            filter.reset();
        }
    }

    /// Move the split points. Filters only recompute when a cutoff changed.
    #[inline]
    pub fn set_frequencies(&mut self, low_mid: f32, mid_high: f32) {
        self.apply_frequencies(CrossoverFrequencies::new(low_mid, mid_high));
    }

    /// Effective split points after ordering and clamping.
    pub fn frequencies(&self) -> CrossoverFrequencies {
        self.frequencies
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Low band, in place: LP4(low_mid) then AP(mid_high).
    #[inline]
    pub fn process_low(&mut self, channel: usize, samples: &mut [f32]) {
        self.low_mid_lp.process_channel(channel, samples);
        self.mid_high_ap.process_channel(channel, samples);
    }

    /// Everything above the first split, in place: HP4(low_mid).
    #[inline]
    pub fn process_upper(&mut self, channel: usize, samples: &mut [f32]) {
        self.low_mid_hp.process_channel(channel, samples);
    }

    /// Mid band from the upper signal, in place: LP4(mid_high).
    #[inline]
    pub fn process_mid(&mut self, channel: usize, samples: &mut [f32]) {
        self.mid_high_lp.process_channel(channel, samples);
    }

    /// High band from the upper signal, in place: HP4(mid_high).
    #[inline]
    pub fn process_high(&mut self, channel: usize, samples: &mut [f32]) {
        self.mid_high_hp.process_channel(channel, samples);
    }

    /// Split one channel of `input` into the three band slices.
    ///
    /// All slices must have the same length as `input`.
    pub fn split(
        &mut self,
        channel: usize,
        input: &[f32],
        low: &mut [f32],
        mid: &mut [f32],
        high: &mut [f32],
    ) {
        debug_assert!(
            low.len() == input.len() && mid.len() == input.len() && high.len() == input.len(),
            "band slices must match the input length"
        );
        let len = input
            .len()
            .min(low.len())
            .min(mid.len())
            .min(high.len());
        let (low, mid, high) = (&mut low[..len], &mut mid[..len], &mut high[..len]);

        low.copy_from_slice(&input[..len]);
        mid.copy_from_slice(&input[..len]);
        self.process_low(channel, low);
        self.process_upper(channel, mid);
        high.copy_from_slice(mid);
        self.process_mid(channel, mid);
        self.process_high(channel, high);
    }

    /// True when every filter state has decayed to exactly zero.
    pub fn is_at_rest(&self) -> bool {
        [
            &self.low_mid_lp,
            &self.low_mid_hp,
            &self.mid_high_ap,
            &self.mid_high_lp,
            &self.mid_high_hp,
        ]
        .iter()
        .all(|f| f.is_at_rest())
    }

    fn apply_frequencies(&mut self, frequencies: CrossoverFrequencies) {
        let frequencies = frequencies.sanitized(self.sample_rate);
        self.frequencies = frequencies;

        self.low_mid_lp.set_cutoff(frequencies.low_mid);
        self.low_mid_hp.set_cutoff(frequencies.low_mid);
        self.mid_high_ap.set_cutoff(frequencies.mid_high);
        self.mid_high_lp.set_cutoff(frequencies.mid_high);
        self.mid_high_hp.set_cutoff(frequencies.mid_high);
    }

    fn filters_mut(&mut self) -> [&mut LinkwitzRiley; 5] {
        [
            &mut self.low_mid_lp,
            &mut self.low_mid_hp,
            &mut self.mid_high_ap,
            &mut self.mid_high_lp,
            &mut self.mid_high_hp,
        ]
    }
}

impl Default for CrossoverNetwork {
    fn default() -> Self {
        Self::new(
            CrossoverFrequencies::default(),
            mbcomp_core::ProcessSpec::default().sample_rate,
        )
    }
}

// Allpass reference for tests: the cascade the band sum must reproduce.
#[cfg(test)]
pub(crate) fn reference_allpass(
    frequencies: CrossoverFrequencies,
    sample_rate: f64,
    channel: usize,
    samples: &mut [f32],
) {
    let mut first = LinkwitzRiley::new(FilterKind::Allpass, frequencies.low_mid, sample_rate);
    let mut second = LinkwitzRiley::new(FilterKind::Allpass, frequencies.mid_high, sample_rate);
    first.process_channel(channel, samples);
    second.process_channel(channel, samples);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const SR: f64 = 48000.0;

    fn noise(len: usize, mut seed: u32) -> Vec<f32> {
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (seed >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
            })
            .collect()
    }

    fn band_sum(network: &mut CrossoverNetwork, input: &[f32]) -> Vec<f32> {
        let mut low = vec![0.0; input.len()];
        let mut mid = vec![0.0; input.len()];
        let mut high = vec![0.0; input.len()];
        network.split(0, input, &mut low, &mut mid, &mut high);
        (0..input.len()).map(|i| low[i] + mid[i] + high[i]).collect()
    }

    #[test]
    fn test_bands_sum_to_allpass_cascade() {
        let input = noise(4096, 7);
        let mut network = CrossoverNetwork::new(CrossoverFrequencies::new(400.0, 2000.0), SR);

        let sum = band_sum(&mut network, &input);
        let mut reference = input;
        reference_allpass(network.frequencies(), SR, 0, &mut reference);

        for (a, b) in sum.iter().zip(&reference) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sanitized_orders_cutoffs() {
        let f = CrossoverFrequencies::new(1500.0, 1000.0).sanitized(SR);
        assert!(f.mid_high > f.low_mid);
        assert_abs_diff_eq!(f.low_mid, 1500.0, epsilon = 0.01);
        assert_abs_diff_eq!(f.mid_high, 1500.0 * MIN_CROSSOVER_RATIO, epsilon = 0.01);

        let f = CrossoverFrequencies::new(400.0, 2000.0).sanitized(SR);
        assert_eq!(f, CrossoverFrequencies::new(400.0, 2000.0));
    }

    #[test]
    fn test_sanitized_respects_nyquist() {
        let f = CrossoverFrequencies::new(30000.0, 40000.0).sanitized(SR);
        assert!(f.mid_high < 24000.0);
        assert!(f.low_mid < f.mid_high);
    }

    #[test]
    fn test_degenerate_cutoffs_stay_finite() {
        let cases = [
            (1000.0, 1000.0),
            (5000.0, 100.0),
            (0.0, 0.0),
            (f32::NAN, 2000.0),
        ];
        for (low_mid, mid_high) in cases {
            let mut network =
                CrossoverNetwork::new(CrossoverFrequencies::new(low_mid, mid_high), SR);
            let sum = band_sum(&mut network, &noise(2048, 3));
            assert!(sum.iter().all(|s| s.is_finite()), "{} / {}", low_mid, mid_high);
        }
    }

    #[test]
    fn test_configure_clears_state() {
        let mut network = CrossoverNetwork::default();
        band_sum(&mut network, &noise(512, 11));
        assert!(!network.is_at_rest());

        network.configure(44100.0);
        assert!(network.is_at_rest());
        assert_eq!(network.sample_rate(), 44100.0);
    }

    proptest! {
        #[test]
        fn prop_band_sum_matches_reference(
            low_mid in 20.0f32..999.0,
            mid_high in 1000.0f32..20000.0,
            seed in any::<u32>(),
        ) {
            let input = noise(1024, seed);
            let mut network =
                CrossoverNetwork::new(CrossoverFrequencies::new(low_mid, mid_high), SR);

            let sum = band_sum(&mut network, &input);
            let mut reference = input;
            reference_allpass(network.frequencies(), SR, 0, &mut reference);

            for (a, b) in sum.iter().zip(&reference) {
                prop_assert!((a - b).abs() < 1e-3);
            }
        }
    }
}
