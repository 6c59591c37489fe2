//! Per-band compressor parameters and the crossover pair.

use crate::parameter::ParameterRange;
use crate::params::id::Band;
use crate::params::types::{BoolParam, ChoiceParam, FloatParam};

/// Selectable compression ratios.
pub const RATIO_CHOICES: [f32; 14] = [
    1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0, 15.0, 20.0, 50.0, 100.0,
];
/// Default ratio index (2.0:1).
pub const DEFAULT_RATIO_INDEX: usize = 2;

pub const THRESHOLD_MIN_DB: f32 = -60.0;
pub const THRESHOLD_MAX_DB: f32 = 12.0;
pub const DEFAULT_THRESHOLD_DB: f32 = 0.0;

pub const TIME_MIN_MS: f32 = 5.0;
pub const TIME_MAX_MS: f32 = 500.0;
pub const DEFAULT_ATTACK_MS: f32 = 5.0;
pub const DEFAULT_RELEASE_MS: f32 = 250.0;

pub const LOW_MID_MIN_HZ: f32 = 20.0;
pub const LOW_MID_MAX_HZ: f32 = 999.0;
pub const DEFAULT_LOW_MID_HZ: f32 = 400.0;

pub const MID_HIGH_MIN_HZ: f32 = 1000.0;
pub const MID_HIGH_MAX_HZ: f32 = 20000.0;
pub const DEFAULT_MID_HIGH_HZ: f32 = 2000.0;

/// Values a compressor reads once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorSettings {
    pub attack_ms: f32,
    pub release_ms: f32,
    pub threshold_db: f32,
    pub ratio: f32,
    pub bypassed: bool,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            attack_ms: DEFAULT_ATTACK_MS,
            release_ms: DEFAULT_RELEASE_MS,
            threshold_db: DEFAULT_THRESHOLD_DB,
            ratio: RATIO_CHOICES[DEFAULT_RATIO_INDEX],
            bypassed: false,
        }
    }
}

/// The five compressor parameters of one band.
#[derive(Debug)]
pub struct BandParams {
    band: Band,
    pub threshold: FloatParam,
    pub attack: FloatParam,
    pub release: FloatParam,
    pub ratio: ChoiceParam,
    pub bypassed: BoolParam,
}

impl BandParams {
    pub fn new(band: Band) -> Self {
        let time_range = |default| {
            ParameterRange::linear(TIME_MIN_MS, TIME_MAX_MS, default).with_step(1.0)
        };

        Self {
            band,
            threshold: FloatParam::new(
                ParameterRange::linear(THRESHOLD_MIN_DB, THRESHOLD_MAX_DB, DEFAULT_THRESHOLD_DB)
                    .with_step(1.0),
                "dB",
            ),
            attack: FloatParam::new(time_range(DEFAULT_ATTACK_MS), "ms"),
            release: FloatParam::new(time_range(DEFAULT_RELEASE_MS), "ms"),
            ratio: ChoiceParam::new(&RATIO_CHOICES, DEFAULT_RATIO_INDEX),
            bypassed: BoolParam::new(false),
        }
    }

    pub fn band(&self) -> Band {
        self.band
    }

    /// Per-block snapshot for the compressor.
    #[inline]
    pub fn settings(&self) -> CompressorSettings {
        CompressorSettings {
            attack_ms: self.attack.get(),
            release_ms: self.release.get(),
            threshold_db: self.threshold.get(),
            ratio: self.ratio.value(),
            bypassed: self.bypassed.get(),
        }
    }

    /// Write every field of `settings` through the parameter ranges.
    pub fn apply(&self, settings: &CompressorSettings) {
        self.attack.set(settings.attack_ms);
        self.release.set(settings.release_ms);
        self.threshold.set(settings.threshold_db);
        self.ratio.set_value(settings.ratio);
        self.bypassed.set(settings.bypassed);
    }

    pub fn reset(&self) {
        self.threshold.reset();
        self.attack.reset();
        self.release.reset();
        self.ratio.reset();
        self.bypassed.reset();
    }
}

/// The two crossover cutoffs.
#[derive(Debug)]
pub struct CrossoverParams {
    pub low_mid: FloatParam,
    pub mid_high: FloatParam,
}

impl CrossoverParams {
    pub fn new() -> Self {
        Self {
            low_mid: FloatParam::new(
                ParameterRange::logarithmic(LOW_MID_MIN_HZ, LOW_MID_MAX_HZ, DEFAULT_LOW_MID_HZ)
                    .with_step(1.0),
                "Hz",
            ),
            mid_high: FloatParam::new(
                ParameterRange::logarithmic(MID_HIGH_MIN_HZ, MID_HIGH_MAX_HZ, DEFAULT_MID_HIGH_HZ)
                    .with_step(1.0),
                "Hz",
            ),
        }
    }

    /// Current `(low_mid, mid_high)` pair in Hz.
    #[inline]
    pub fn frequencies(&self) -> (f32, f32) {
        (self.low_mid.get(), self.mid_high.get())
    }

    pub fn reset(&self) {
        self.low_mid.reset();
        self.mid_high.reset();
    }
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self::new()
    }
}
