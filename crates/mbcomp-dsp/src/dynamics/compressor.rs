//! Per-band feed-forward compressor

use std::sync::Arc;

use mbcomp_core::{BandParams, CompressorSettings, ProcessSpec, MAX_CHANNELS};

use super::utils::{amplitude_to_db, db_to_amplitude, flush_denormal, ms_to_coeff};

/// Static gain curve: decibels of reduction for a detector level of `input_db`.
///
/// `knee_db <= 0` gives a hard knee. A soft knee blends quadratically across
/// `threshold ± knee/2`.
#[inline]
pub fn gain_reduction_db(input_db: f32, threshold_db: f32, ratio: f32, knee_db: f32) -> f32 {
    let slope = 1.0 - 1.0 / ratio.max(1.0);

    if knee_db <= 0.0 {
        return (input_db - threshold_db).max(0.0) * slope;
    }

    let half_knee = knee_db / 2.0;
    let below = threshold_db - half_knee;
    let above = threshold_db + half_knee;

    if input_db <= below {
        0.0
    } else if input_db >= above {
        (input_db - threshold_db) * slope
    } else {
        let x = input_db - below;
        slope / (2.0 * knee_db) * x * x
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelDetector {
    envelope: f32,
    gain_reduction: f32,
}

impl ChannelDetector {
    /// Advance the peak follower by one sample. The envelope never holds a
    /// value below the denormal floor, however long the block.
    #[inline]
    fn tick(&mut self, level: f32, attack: f32, release: f32) -> f32 {
        let coeff = if level > self.envelope { attack } else { release };
        self.envelope = flush_denormal(coeff * self.envelope + (1.0 - coeff) * level);
        self.envelope
    }
}

/// Compressor for one band, reading its settings from shared [`BandParams`].
///
/// Each channel has its own envelope. Settings are pulled once per block by
/// [`CompressorUnit::update_settings`]; within a block they are constant.
/// When bypassed the audio passes untouched but the envelope keeps tracking
/// the input, so leaving bypass does not cause a gain jump.
#[derive(Debug, Clone)]
pub struct CompressorUnit {
    params: Arc<BandParams>,
    settings: CompressorSettings,
    knee_db: f32,

    sample_rate: f64,
    num_channels: usize,
    attack_coeff: f32,
    release_coeff: f32,
    last_attack: f32,
    last_release: f32,
    channels: [ChannelDetector; MAX_CHANNELS],
}

impl CompressorUnit {
    pub fn new(params: Arc<BandParams>) -> Self {
        let spec = ProcessSpec::default();
        let settings = params.settings();

        Self {
            params,
            settings,
            knee_db: 0.0,
            sample_rate: spec.sample_rate,
            num_channels: spec.num_channels,
            attack_coeff: ms_to_coeff(settings.attack_ms, spec.sample_rate),
            release_coeff: ms_to_coeff(settings.release_ms, spec.sample_rate),
            last_attack: settings.attack_ms,
            last_release: settings.release_ms,
            channels: [ChannelDetector::default(); MAX_CHANNELS],
        }
    }

    pub fn set_knee_db(&mut self, knee_db: f32) {
        self.knee_db = if knee_db.is_finite() {
            knee_db.max(0.0)
        } else {
            0.0
        };
    }

    pub fn knee_db(&self) -> f32 {
        self.knee_db
    }

    pub fn params(&self) -> &Arc<BandParams> {
        &self.params
    }

    /// Settings in effect for the current block.
    pub fn settings(&self) -> CompressorSettings {
        self.settings
    }

    /// Prepare for `spec`. Clears the detectors.
    ///
    /// # Panics
    ///
    /// Panics if the sample rate is not positive.
    pub fn configure(&mut self, spec: &ProcessSpec) {
        assert!(
            spec.sample_rate > 0.0,
            "sample rate must be positive, got {}",
            spec.sample_rate
        );
        self.sample_rate = spec.sample_rate;
        self.num_channels = spec.num_channels.min(MAX_CHANNELS);

        self.settings = self.params.settings();
        self.attack_coeff = ms_to_coeff(self.settings.attack_ms, self.sample_rate);
        self.release_coeff = ms_to_coeff(self.settings.release_ms, self.sample_rate);
        self.last_attack = self.settings.attack_ms;
        self.last_release = self.settings.release_ms;
        self.reset();
    }

    /// Pull the current parameter values. Coefficients are only recomputed
    /// when attack or release actually moved.
    #[inline]
    pub fn update_settings(&mut self) {
        self.settings = self.params.settings();

        if (self.settings.attack_ms - self.last_attack).abs() > 0.00001 {
            self.attack_coeff = ms_to_coeff(self.settings.attack_ms, self.sample_rate);
            self.last_attack = self.settings.attack_ms;
        }

        if (self.settings.release_ms - self.last_release).abs() > 0.00001 {
            self.release_coeff = ms_to_coeff(self.settings.release_ms, self.sample_rate);
            self.last_release = self.settings.release_ms;
        }
    }

    pub fn reset(&mut self) {
        self.channels = [ChannelDetector::default(); MAX_CHANNELS];
    }

    /// Compress one channel in place.
    pub fn process_channel(&mut self, channel: usize, samples: &mut [f32]) {
        debug_assert!(channel < MAX_CHANNELS, "channel {} out of range", channel);
        let Some(state) = self.channels.get_mut(channel) else {
            return;
        };

        let CompressorSettings {
            threshold_db,
            ratio,
            bypassed,
            ..
        } = self.settings;
        let attack = self.attack_coeff;
        let release = self.release_coeff;

        for sample in samples.iter_mut() {
            let envelope = state.tick(sample.abs(), attack, release);

            state.gain_reduction = gain_reduction_db(
                amplitude_to_db(envelope),
                threshold_db,
                ratio,
                self.knee_db,
            );

            if !bypassed {
                *sample *= db_to_amplitude(-state.gain_reduction);
            }
        }
    }

    /// Compress every channel of a planar block in place.
    pub fn process<C: AsMut<[f32]>>(&mut self, channels: &mut [C]) {
        for (index, channel) in channels.iter_mut().enumerate().take(MAX_CHANNELS) {
            self.process_channel(index, channel.as_mut());
        }
    }

    /// Largest current gain reduction across channels, in dB (positive).
    pub fn gain_reduction_db(&self) -> f32 {
        self.channels[..self.num_channels]
            .iter()
            .map(|c| c.gain_reduction)
            .fold(0.0, f32::max)
    }

    /// Detector level of `channel` (linear).
    pub fn envelope_level(&self, channel: usize) -> f32 {
        self.channels.get(channel).map_or(0.0, |c| c.envelope)
    }

    /// True once every detector has decayed to exactly zero.
    pub fn is_at_rest(&self) -> bool {
        self.channels.iter().all(|c| c.envelope == 0.0)
    }
}
