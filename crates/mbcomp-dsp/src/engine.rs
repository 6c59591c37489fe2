//! The per-block multiband pipeline.

use std::sync::Arc;

use mbcomp_core::{Band, MultibandParams, ProcessSpec, MAX_CHANNELS};

use crate::crossover::{CrossoverFrequencies, CrossoverNetwork};
use crate::dynamics::CompressorUnit;
use crate::router::BandRouter;

/// Three-band compressor engine.
///
/// Every block runs the same sequence:
///
/// 1. pull settings into the compressors and crossover cutoffs
/// 2. copy the input into the low and mid working buffers
/// 3. low buffer through LP(low_mid) and AP(mid_high); mid buffer through HP(low_mid)
/// 4. copy mid into high; mid through LP(mid_high), high through HP(mid_high)
/// 5. compress each band in place
/// 6. overwrite the block with the sum of the three bands
///
/// `configure` is the only method that allocates. Blocks longer than the
/// configured maximum are processed in chunks of at most that size.
#[derive(Debug, Clone)]
pub struct MultibandEngine {
    params: Arc<MultibandParams>,
    spec: ProcessSpec,
    network: CrossoverNetwork,
    router: BandRouter,
    compressors: [CompressorUnit; 3],
}

impl MultibandEngine {
    /// Create an engine bound to `params`. Call [`configure`](Self::configure)
    /// before processing to size buffers for the host's spec.
    pub fn new(params: Arc<MultibandParams>) -> Self {
        let spec = ProcessSpec::default();
        let (low_mid, mid_high) = params.crossover().frequencies();
        let compressors = Band::ALL.map(|band| CompressorUnit::new(Arc::clone(params.band(band))));

        Self {
            network: CrossoverNetwork::new(
                CrossoverFrequencies::new(low_mid, mid_high),
                spec.sample_rate,
            ),
            router: BandRouter::new(spec.num_channels, spec.max_block_size),
            compressors,
            params,
            spec,
        }
    }

    /// Soft-knee width in dB for every band. `0` is a hard knee.
    pub fn set_knee_db(&mut self, knee_db: f32) {
        for compressor in &mut self.compressors {
            compressor.set_knee_db(knee_db);
        }
    }

    /// Prepare for a new session: size buffers, derive coefficients and clear
    /// all filter and envelope state. Not real-time safe.
    ///
    /// # Panics
    ///
    /// Panics if `spec.sample_rate` is not positive.
    pub fn configure(&mut self, spec: ProcessSpec) {
        assert!(
            spec.sample_rate > 0.0,
            "sample rate must be positive, got {}",
            spec.sample_rate
        );
        let spec = ProcessSpec {
            num_channels: spec.num_channels.min(MAX_CHANNELS),
            ..spec
        };

        self.router.allocate(spec.num_channels, spec.max_block_size);
        self.network.configure(spec.sample_rate);
        for compressor in &mut self.compressors {
            compressor.configure(&spec);
        }
        self.spec = spec;
        self.pull_settings();

        tracing::info!(
            "Multiband engine configured: {} Hz, {} samples, {} channel(s)",
            spec.sample_rate,
            spec.max_block_size,
            spec.num_channels
        );
    }

    /// Clear filter and envelope state without touching parameters.
    pub fn reset(&mut self) {
        self.network.reset();
        for compressor in &mut self.compressors {
            compressor.reset();
        }
        self.router.clear();
    }

    /// Process a planar block in place. Every channel must hold the same
    /// number of samples.
    pub fn process_planar<C>(&mut self, channels: &mut [C])
    where
        C: AsRef<[f32]> + AsMut<[f32]>,
    {
        debug_assert_eq!(
            channels.len(),
            self.spec.num_channels,
            "channel count differs from configuration"
        );
        let num_channels = channels.len().min(self.spec.num_channels);
        let channels = &mut channels[..num_channels];
        let Some(len) = channels.iter().map(|c| c.as_ref().len()).min() else {
            return;
        };
        debug_assert!(
            channels.iter().all(|c| c.as_ref().len() == len),
            "planar channels differ in length"
        );
        debug_assert!(
            len <= self.spec.max_block_size,
            "block of {} exceeds configured maximum {}",
            len,
            self.spec.max_block_size
        );

        self.pull_settings();

        let chunk = self.router.capacity().max(1);
        let mut offset = 0;
        while offset < len {
            let n = chunk.min(len - offset);
            self.router.load_planar(channels, offset, n);
            self.run_bands(num_channels, n);
            self.router.sum_into_planar(channels, offset, n);
            offset += n;
        }
    }

    /// Process an interleaved block in place. Trailing samples that do not
    /// form a whole frame are left untouched.
    pub fn process_interleaved(&mut self, samples: &mut [f32]) {
        let num_channels = self.spec.num_channels;
        if num_channels == 0 {
            return;
        }
        let frames = samples.len() / num_channels;
        debug_assert!(
            frames <= self.spec.max_block_size,
            "block of {} exceeds configured maximum {}",
            frames,
            self.spec.max_block_size
        );

        self.pull_settings();

        let chunk = self.router.capacity().max(1);
        for block in samples[..frames * num_channels].chunks_mut(chunk * num_channels) {
            let n = block.len() / num_channels;
            self.router.load_interleaved(block, num_channels, n);
            self.run_bands(num_channels, n);
            self.router.sum_into_interleaved(block, num_channels, n);
        }
    }

    /// Current gain reduction of `band` in dB (positive).
    pub fn gain_reduction_db(&self, band: Band) -> f32 {
        self.compressors[band.index()].gain_reduction_db()
    }

    pub fn compressor(&self, band: Band) -> &CompressorUnit {
        &self.compressors[band.index()]
    }

    pub fn crossover(&self) -> &CrossoverNetwork {
        &self.network
    }

    pub fn params(&self) -> &Arc<MultibandParams> {
        &self.params
    }

    pub fn spec(&self) -> ProcessSpec {
        self.spec
    }

    /// The engine adds no latency and rings out within the block.
    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }

    /// True when every filter and envelope has decayed to exactly zero.
    pub fn is_at_rest(&self) -> bool {
        self.network.is_at_rest() && self.compressors.iter().all(CompressorUnit::is_at_rest)
    }

    #[inline]
    fn pull_settings(&mut self) {
        for compressor in &mut self.compressors {
            compressor.update_settings();
        }
        let (low_mid, mid_high) = self.params.crossover().frequencies();
        self.network.set_frequencies(low_mid, mid_high);
    }

    fn run_bands(&mut self, num_channels: usize, len: usize) {
        for ch in 0..num_channels {
            self.network
                .process_low(ch, self.router.band_mut(Band::Low).channel_mut(ch, len));
            self.network
                .process_upper(ch, self.router.band_mut(Band::Mid).channel_mut(ch, len));
        }

        self.router.copy_mid_to_high(num_channels, len);

        for ch in 0..num_channels {
            self.network
                .process_mid(ch, self.router.band_mut(Band::Mid).channel_mut(ch, len));
            self.network
                .process_high(ch, self.router.band_mut(Band::High).channel_mut(ch, len));
        }

        for band in Band::ALL {
            let compressor = &mut self.compressors[band.index()];
            let buffer = self.router.band_mut(band);
            for ch in 0..num_channels {
                compressor.process_channel(ch, buffer.channel_mut(ch, len));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::crossover::reference_allpass;
    use mbcomp_core::{BandParam, ParamId};

    const SR: f64 = 48000.0;

    fn engine(block: usize, channels: usize) -> MultibandEngine {
        let mut engine = MultibandEngine::new(Arc::new(MultibandParams::new()));
        engine.configure(ProcessSpec::new(SR, block, channels));
        engine
    }

    fn bypass_all(params: &MultibandParams) {
        for band in Band::ALL {
            params.band(band).bypassed.set(true);
        }
    }

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|n| ((n * 37) % 101) as f32 / 101.0 - 0.5).collect()
    }

    #[test]
    fn test_bypassed_engine_matches_allpass_reference() {
        let mut engine = engine(256, 1);
        bypass_all(engine.params());

        let input = ramp(1024);
        let mut output = input.clone();
        for block in output.chunks_mut(256) {
            engine.process_planar(&mut [block]);
        }

        let mut reference = input;
        reference_allpass(engine.crossover().frequencies(), SR, 0, &mut reference);
        for (a, b) in output.iter().zip(&reference) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_planar_and_interleaved_agree() {
        let mut planar = engine(128, 2);
        let mut interleaved = engine(128, 2);
        for e in [&planar, &interleaved] {
            e.params()
                .param(ParamId::Band(Band::Mid, BandParam::Threshold))
                .set_plain(-30.0);
        }

        let left = ramp(128);
        let right: Vec<f32> = left.iter().map(|s| -0.5 * s).collect();

        let mut l = left.clone();
        let mut r = right.clone();
        planar.process_planar(&mut [&mut l[..], &mut r[..]]);

        let mut frames: Vec<f32> = left.iter().zip(&right).flat_map(|(&a, &b)| [a, b]).collect();
        interleaved.process_interleaved(&mut frames);

        for i in 0..128 {
            assert_abs_diff_eq!(frames[2 * i], l[i], epsilon = 1e-6);
            assert_abs_diff_eq!(frames[2 * i + 1], r[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_configure_resets_state() {
        let mut engine = engine(64, 1);
        let mut block = ramp(64);
        engine.process_planar(&mut [&mut block[..]]);
        assert!(!engine.is_at_rest());

        engine.configure(ProcessSpec::new(44100.0, 64, 1));
        assert!(engine.is_at_rest());
        assert_eq!(engine.spec().sample_rate, 44100.0);
    }

    #[test]
    fn test_crossover_follows_parameters() {
        let mut engine = engine(64, 1);
        engine.params().crossover().low_mid.set(250.0);
        engine.params().crossover().mid_high.set(5000.0);

        let mut block = vec![0.0; 64];
        engine.process_planar(&mut [&mut block[..]]);

        assert_eq!(
            engine.crossover().frequencies(),
            CrossoverFrequencies::new(250.0, 5000.0)
        );
    }

    #[test]
    fn test_empty_block_is_a_no_op() {
        let mut engine = engine(64, 2);
        let mut left: [f32; 0] = [];
        let mut right: [f32; 0] = [];
        engine.process_planar(&mut [&mut left[..], &mut right[..]]);
        engine.process_interleaved(&mut []);
        assert!(engine.is_at_rest());
    }
}
