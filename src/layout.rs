//! Channel layout negotiation with the host.

use mbcomp_core::MAX_CHANNELS;

/// Input and output channel counts offered by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLayout {
    pub inputs: usize,
    pub outputs: usize,
}

impl ChannelLayout {
    pub const MONO: ChannelLayout = ChannelLayout::symmetric(1);
    pub const STEREO: ChannelLayout = ChannelLayout::symmetric(2);

    pub const fn new(inputs: usize, outputs: usize) -> Self {
        Self { inputs, outputs }
    }

    /// Same count in and out.
    pub const fn symmetric(channels: usize) -> Self {
        Self::new(channels, channels)
    }

    /// Output must be mono or stereo and input must match it.
    pub fn is_supported(&self) -> bool {
        (1..=MAX_CHANNELS).contains(&self.outputs) && self.inputs == self.outputs
    }
}

/// Shorthand for [`ChannelLayout::is_supported`].
pub fn is_layout_supported(inputs: usize, outputs: usize) -> bool {
    ChannelLayout::new(inputs, outputs).is_supported()
}
