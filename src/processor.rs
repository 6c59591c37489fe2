//! Host-facing multiband compressor.

use std::sync::Arc;

use mbcomp_core::{Band, MultibandParams, ProcessSpec};
use mbcomp_dsp::MultibandEngine;

use crate::builder::MultibandProcessorBuilder;
use crate::layout::ChannelLayout;
use crate::{state, Error, Result};

/// Multiband compressor behind the minimal host contract:
/// `configure`, `process`, `get_state` and `set_state`.
///
/// Parameters live in a shared [`MultibandParams`]; hand
/// [`params`](Self::params) to a control thread and write through it while
/// the audio thread calls `process`.
///
/// # Example
///
/// ```
/// use mbcomp::prelude::*;
///
/// let mut processor = MultibandProcessor::builder()
///     .sample_rate(48000.0)
///     .max_block_size(256)
///     .channels(2)
///     .build()?;
///
/// processor
///     .params()
///     .param(ParamId::Band(Band::Low, BandParam::Threshold))
///     .set_plain(-24.0);
///
/// let mut left = vec![0.0_f32; 256];
/// let mut right = vec![0.0_f32; 256];
/// processor.process(&mut [&mut left[..], &mut right[..]]);
/// # Ok::<(), mbcomp::Error>(())
/// ```
#[derive(Debug)]
pub struct MultibandProcessor {
    params: Arc<MultibandParams>,
    engine: MultibandEngine,
    configured: bool,
}

impl MultibandProcessor {
    /// Unconfigured processor with default parameters. Prefer
    /// [`MultibandProcessor::builder()`].
    pub fn new() -> Self {
        Self::with_params(Arc::new(MultibandParams::new()))
    }

    pub fn with_params(params: Arc<MultibandParams>) -> Self {
        Self {
            engine: MultibandEngine::new(Arc::clone(&params)),
            params,
            configured: false,
        }
    }

    pub fn builder() -> MultibandProcessorBuilder {
        MultibandProcessorBuilder::default()
    }

    pub fn params(&self) -> &Arc<MultibandParams> {
        &self.params
    }

    /// Validate `spec` and prepare the engine for it. Not real-time safe.
    pub fn configure(&mut self, spec: ProcessSpec) -> Result<()> {
        self.configure_with_layout(spec, ChannelLayout::symmetric(spec.num_channels))
    }

    /// Like [`configure`](Self::configure), checking the host's proposed
    /// input/output layout first.
    pub fn configure_with_layout(&mut self, spec: ProcessSpec, layout: ChannelLayout) -> Result<()> {
        if !layout.is_supported() {
            tracing::warn!(
                "Rejecting channel layout {} in / {} out",
                layout.inputs,
                layout.outputs
            );
            return Err(Error::Core(mbcomp_core::Error::UnsupportedLayout {
                input: layout.inputs,
                output: layout.outputs,
            }));
        }
        spec.validate()?;

        self.engine.configure(ProcessSpec {
            num_channels: layout.inputs,
            ..spec
        });
        self.configured = true;
        Ok(())
    }

    /// Soft-knee width in dB for every band. `0` is a hard knee.
    pub fn set_knee_db(&mut self, knee_db: f32) {
        self.engine.set_knee_db(knee_db);
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn spec(&self) -> ProcessSpec {
        self.engine.spec()
    }

    /// Process a planar block in place.
    ///
    /// Channels beyond the configured count are output channels without a
    /// matching input and are cleared.
    pub fn process(&mut self, channels: &mut [&mut [f32]]) {
        let num_channels = self.engine.spec().num_channels.min(channels.len());
        let (active, extra) = channels.split_at_mut(num_channels);

        for channel in extra.iter_mut() {
            channel.fill(0.0);
        }
        self.engine.process_planar(active);
    }

    /// Process an interleaved block in place, frames of the configured width.
    pub fn process_interleaved(&mut self, samples: &mut [f32]) {
        self.engine.process_interleaved(samples);
    }

    /// Clear filter and envelope state.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Serialize every parameter into a state blob.
    pub fn get_state(&self) -> Result<Vec<u8>> {
        state::encode(&self.params.snapshot())
    }

    /// Restore parameters from a state blob produced by
    /// [`get_state`](Self::get_state).
    ///
    /// An unreadable blob is rejected and leaves every parameter unchanged.
    pub fn set_state(&self, blob: &[u8]) -> Result<()> {
        let snapshot = state::decode(blob).inspect_err(|e| {
            tracing::warn!("Ignoring invalid state blob ({} bytes): {}", blob.len(), e);
        })?;
        self.params.restore(&snapshot).inspect_err(|e| {
            tracing::warn!("Ignoring state blob: {}", e);
        })?;
        tracing::debug!("Restored {} parameter values", snapshot.values.len());
        Ok(())
    }

    /// Current gain reduction of `band` in dB, for metering.
    pub fn gain_reduction_db(&self, band: Band) -> f32 {
        self.engine.gain_reduction_db(band)
    }

    pub fn engine(&self) -> &MultibandEngine {
        &self.engine
    }

    /// Always zero: no lookahead, no reverb-like tail.
    pub fn tail_length_seconds(&self) -> f64 {
        self.engine.tail_length_seconds()
    }

    pub fn is_layout_supported(inputs: usize, outputs: usize) -> bool {
        crate::layout::is_layout_supported(inputs, outputs)
    }
}

impl Default for MultibandProcessor {
    fn default() -> Self {
        Self::new()
    }
}
