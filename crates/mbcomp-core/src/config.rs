//! Processing configuration handed over by the host when playback (re)starts.

use crate::{Error, Result};

/// Lowest sample rate accepted by [`ProcessSpec::validate`].
pub const MIN_SAMPLE_RATE: f64 = 8000.0;
/// Highest sample rate accepted by [`ProcessSpec::validate`].
pub const MAX_SAMPLE_RATE: f64 = 384000.0;
/// The engine handles mono and stereo.
pub const MAX_CHANNELS: usize = 2;

/// Sample rate, maximum block size and channel count for a processing session.
///
/// All working buffers are sized from this once, at configure time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    pub sample_rate: f64,
    pub max_block_size: usize,
    pub num_channels: usize,
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            max_block_size: 512,
            num_channels: 2,
        }
    }
}

impl ProcessSpec {
    pub fn new(sample_rate: f64, max_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range ({}-{} Hz)",
                self.sample_rate, MIN_SAMPLE_RATE, MAX_SAMPLE_RATE
            )));
        }
        if self.max_block_size == 0 {
            return Err(Error::InvalidConfig(
                "max_block_size must be at least 1".to_string(),
            ));
        }
        if self.num_channels == 0 || self.num_channels > MAX_CHANNELS {
            return Err(Error::InvalidConfig(format!(
                "num_channels {} out of range (1-{})",
                self.num_channels, MAX_CHANNELS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = ProcessSpec::default();
        assert_eq!(spec.sample_rate, 48000.0);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        assert!(ProcessSpec::new(0.0, 512, 2).validate().is_err());
        assert!(ProcessSpec::new(-44100.0, 512, 2).validate().is_err());
        assert!(ProcessSpec::new(f64::NAN, 512, 2).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_block_and_channels() {
        assert!(ProcessSpec::new(44100.0, 0, 2).validate().is_err());
        assert!(ProcessSpec::new(44100.0, 256, 0).validate().is_err());
        assert!(ProcessSpec::new(44100.0, 256, 6).validate().is_err());
        assert!(ProcessSpec::new(44100.0, 256, 1).validate().is_ok());
    }
}
