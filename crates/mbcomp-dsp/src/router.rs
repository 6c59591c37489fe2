//! Working buffers for the three bands and the copy/sum steps around them.

use mbcomp_core::Band;

/// Planar scratch buffer for one band, `channels × capacity` samples.
#[derive(Debug, Clone, Default)]
pub struct BandBuffer {
    channels: Vec<Vec<f32>>,
    capacity: usize,
}

impl BandBuffer {
    pub fn new(num_channels: usize, capacity: usize) -> Self {
        Self {
            channels: vec![vec![0.0; capacity]; num_channels],
            capacity,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// First `len` samples of `channel`.
    #[inline]
    pub fn channel(&self, channel: usize, len: usize) -> &[f32] {
        &self.channels[channel][..len]
    }

    #[inline]
    pub fn channel_mut(&mut self, channel: usize, len: usize) -> &mut [f32] {
        &mut self.channels[channel][..len]
    }

    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }
}

/// Owns the three band buffers; fans a block out to them and sums them back.
///
/// Buffers are allocated by [`BandRouter::allocate`] only. Every other method
/// works within that capacity; callers pass `len <= capacity`.
#[derive(Debug, Clone, Default)]
pub struct BandRouter {
    bands: [BandBuffer; 3],
}

impl BandRouter {
    pub fn new(num_channels: usize, max_block_size: usize) -> Self {
        let mut router = Self::default();
        router.allocate(num_channels, max_block_size);
        router
    }

    /// Size every band for `num_channels × max_block_size`. Not real-time safe.
    pub fn allocate(&mut self, num_channels: usize, max_block_size: usize) {
        self.bands = [
            BandBuffer::new(num_channels, max_block_size),
            BandBuffer::new(num_channels, max_block_size),
            BandBuffer::new(num_channels, max_block_size),
        ];
    }

    pub fn num_channels(&self) -> usize {
        self.bands[0].num_channels()
    }

    pub fn capacity(&self) -> usize {
        self.bands[0].capacity()
    }

    pub fn band(&self, band: Band) -> &BandBuffer {
        &self.bands[band.index()]
    }

    pub fn band_mut(&mut self, band: Band) -> &mut BandBuffer {
        &mut self.bands[band.index()]
    }

    /// Copy `len` samples from `offset` of each planar input channel into the
    /// low and mid buffers.
    pub fn load_planar<C: AsRef<[f32]>>(&mut self, input: &[C], offset: usize, len: usize) {
        let [low, mid, _] = &mut self.bands;
        for (ch, channel) in input.iter().enumerate().take(low.num_channels()) {
            let source = &channel.as_ref()[offset..offset + len];
            low.channel_mut(ch, len).copy_from_slice(source);
            mid.channel_mut(ch, len).copy_from_slice(source);
        }
    }

    /// De-interleave `len` frames into the low and mid buffers.
    pub fn load_interleaved(&mut self, input: &[f32], num_channels: usize, len: usize) {
        if num_channels == 0 {
            return;
        }
        let [low, mid, _] = &mut self.bands;
        let used = num_channels.min(low.num_channels());
        for (frame, samples) in input.chunks_exact(num_channels).take(len).enumerate() {
            for (ch, &sample) in samples.iter().enumerate().take(used) {
                low.channels[ch][frame] = sample;
                mid.channels[ch][frame] = sample;
            }
        }
    }

    /// High buffer = mid buffer, before the second split.
    pub fn copy_mid_to_high(&mut self, num_channels: usize, len: usize) {
        let [_, mid, high] = &mut self.bands;
        for ch in 0..num_channels.min(mid.num_channels()) {
            high.channel_mut(ch, len).copy_from_slice(mid.channel(ch, len));
        }
    }

    /// Overwrite `len` samples from `offset` of each output channel with the
    /// sum of the three bands.
    pub fn sum_into_planar<C: AsMut<[f32]>>(&self, output: &mut [C], offset: usize, len: usize) {
        let [low, mid, high] = &self.bands;
        for (ch, channel) in output.iter_mut().enumerate().take(low.num_channels()) {
            let target = &mut channel.as_mut()[offset..offset + len];
            target.fill(0.0);
            for band in [low, mid, high] {
                for (out, &s) in target.iter_mut().zip(band.channel(ch, len)) {
                    *out += s;
                }
            }
        }
    }

    /// Overwrite `len` interleaved frames with the sum of the three bands.
    pub fn sum_into_interleaved(&self, output: &mut [f32], num_channels: usize, len: usize) {
        if num_channels == 0 {
            return;
        }
        let [low, mid, high] = &self.bands;
        let used = num_channels.min(low.num_channels());
        for (frame, samples) in output.chunks_exact_mut(num_channels).take(len).enumerate() {
            for (ch, out) in samples.iter_mut().enumerate().take(used) {
                *out = 0.0;
                for band in [low, mid, high] {
                    *out += band.channels[ch][frame];
                }
            }
        }
    }

    pub fn clear(&mut self) {
        for band in &mut self.bands {
            band.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sizes_all_bands() {
        let router = BandRouter::new(2, 256);
        for band in Band::ALL {
            assert_eq!(router.band(band).num_channels(), 2);
            assert_eq!(router.band(band).capacity(), 256);
        }
    }

    #[test]
    fn test_load_planar_fills_low_and_mid() {
        let mut router = BandRouter::new(2, 8);
        let left = [1.0, 2.0, 3.0, 4.0];
        let right = [5.0, 6.0, 7.0, 8.0];

        router.load_planar(&[&left[..], &right[..]], 1, 3);

        assert_eq!(router.band(Band::Low).channel(0, 3), &[2.0, 3.0, 4.0]);
        assert_eq!(router.band(Band::Mid).channel(1, 3), &[6.0, 7.0, 8.0]);
        assert_eq!(router.band(Band::High).channel(0, 3), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_load_interleaved_deinterleaves() {
        let mut router = BandRouter::new(2, 8);
        router.load_interleaved(&[1.0, -1.0, 2.0, -2.0, 3.0, -3.0], 2, 3);

        assert_eq!(router.band(Band::Low).channel(0, 3), &[1.0, 2.0, 3.0]);
        assert_eq!(router.band(Band::Mid).channel(1, 3), &[-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_copy_mid_to_high() {
        let mut router = BandRouter::new(1, 4);
        router.load_planar(&[[0.5_f32, 0.25]], 0, 2);
        router.copy_mid_to_high(1, 2);

        assert_eq!(router.band(Band::High).channel(0, 2), &[0.5, 0.25]);
    }

    #[test]
    fn test_sum_overwrites_output() {
        let mut router = BandRouter::new(1, 4);
        router.band_mut(Band::Low).channel_mut(0, 2).copy_from_slice(&[1.0, 1.0]);
        router.band_mut(Band::Mid).channel_mut(0, 2).copy_from_slice(&[0.5, 0.0]);
        router.band_mut(Band::High).channel_mut(0, 2).copy_from_slice(&[0.25, -1.0]);

        let mut output = vec![vec![9.0; 2]];
        router.sum_into_planar(&mut output, 0, 2);
        assert_eq!(output[0], vec![1.75, 0.0]);

        let mut interleaved = [9.0; 2];
        router.sum_into_interleaved(&mut interleaved, 1, 2);
        assert_eq!(interleaved, [1.75, 0.0]);
    }
}
