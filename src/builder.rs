//! Builder for configuring and constructing a `MultibandProcessor`.

use std::sync::Arc;

use mbcomp_core::{Band, CompressorSettings, MultibandParams, ProcessSpec};

use crate::{MultibandProcessor, Result};

/// Builds a configured [`MultibandProcessor`].
///
/// # Example
///
/// ```
/// use mbcomp::prelude::*;
///
/// let processor = MultibandProcessor::builder()
///     .sample_rate(44100.0)
///     .channels(1)
///     .crossover(250.0, 3000.0)
///     .soft_knee_db(6.0)
///     .build()?;
///
/// assert_eq!(processor.spec().sample_rate, 44100.0);
/// # Ok::<(), mbcomp::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MultibandProcessorBuilder {
    spec: ProcessSpec,
    params: Option<Arc<MultibandParams>>,
    bands: [Option<CompressorSettings>; 3],
    crossover: Option<(f32, f32)>,
    knee_db: f32,
}

impl Default for MultibandProcessorBuilder {
    fn default() -> Self {
        Self {
            spec: ProcessSpec::default(),
            params: None,
            bands: [None; 3],
            crossover: None,
            knee_db: 0.0,
        }
    }
}

impl MultibandProcessorBuilder {
    /// Default: 48000
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.spec.sample_rate = sample_rate;
        self
    }

    /// Default: 512
    pub fn max_block_size(mut self, max_block_size: usize) -> Self {
        self.spec.max_block_size = max_block_size;
        self
    }

    /// Default: 2
    pub fn channels(mut self, num_channels: usize) -> Self {
        self.spec.num_channels = num_channels;
        self
    }

    /// Share an existing parameter set instead of creating one.
    pub fn params(mut self, params: Arc<MultibandParams>) -> Self {
        self.params = Some(params);
        self
    }

    /// Initial settings for one band, written through the parameter ranges.
    pub fn band(mut self, band: Band, settings: CompressorSettings) -> Self {
        self.bands[band.index()] = Some(settings);
        self
    }

    /// Initial crossover frequencies in Hz.
    pub fn crossover(mut self, low_mid: f32, mid_high: f32) -> Self {
        self.crossover = Some((low_mid, mid_high));
        self
    }

    /// Soft knee width in decibels (0.0 = hard knee)
    pub fn soft_knee_db(mut self, db: f32) -> Self {
        self.knee_db = db.max(0.0);
        self
    }

    pub fn build(self) -> Result<MultibandProcessor> {
        self.spec.validate()?;

        let params = self.params.unwrap_or_default();
        for band in Band::ALL {
            if let Some(settings) = &self.bands[band.index()] {
                params.band(band).apply(settings);
            }
        }
        if let Some((low_mid, mid_high)) = self.crossover {
            params.crossover().low_mid.set(low_mid);
            params.crossover().mid_high.set(mid_high);
        }

        let mut processor = MultibandProcessor::with_params(params);
        processor.set_knee_db(self.knee_db);
        processor.configure(self.spec)?;
        Ok(processor)
    }
}
