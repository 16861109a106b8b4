//! Bluetooth sink — fixed-format output with a software gain stage ahead of
//! the radio hand-off.
//!
//! Unlike the headphone sink, volume here is not a hardware register: the
//! radio also exchanges its own AVRCP volume with the remote, so this sink's
//! [`BluetoothVolume`] gain is multiplied into the PCM stream before the
//! samples ever reach the radio.

use crate::pcm_buffer::PcmBuffer;
use crate::sink::{Sink, SinkFormat, SinkMode};
use crate::volume::BluetoothVolume;

/// Fixed output format the Bluetooth sink always reports from
/// `prepare_format`, regardless of the source format.
pub const FIXED_FORMAT: SinkFormat = SinkFormat {
    sample_rate_hz: 48_000,
    channels: 2,
    bits_per_sample: 16,
};

/// Errors from the Bluetooth sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BluetoothSinkError {
    /// The radio has not attached a drain consumer yet.
    NotAttached,
}

/// Bluetooth output sink. `N` is the drain buffer capacity in samples.
pub struct BluetoothSink<const N: usize> {
    drain: PcmBuffer<N>,
    mode: SinkMode,
    format: Option<SinkFormat>,
    volume: BluetoothVolume,
}

impl<const N: usize> BluetoothSink<N> {
    /// Create a new sink in `Off` mode with full software gain (unity).
    pub fn new() -> Self {
        Self {
            drain: PcmBuffer::new(),
            mode: SinkMode::Off,
            format: None,
            volume: BluetoothVolume::default(),
        }
    }

    /// The volume policy in effect on this sink.
    pub fn volume(&self) -> &BluetoothVolume {
        &self.volume
    }

    /// Mutable access to the volume policy.
    pub fn volume_mut(&mut self) -> &mut BluetoothVolume {
        &mut self.volume
    }

    /// Apply the current software gain to one interleaved PCM sample,
    /// saturating at the `i16` range.
    #[allow(clippy::cast_possible_truncation)] // result is clamped into i16 range by .clamp() below
    pub fn apply_gain(&self, sample: i16) -> i16 {
        let gained = f32::from(sample) * self.volume.gain();
        gained.clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
    }
}

impl<const N: usize> Default for BluetoothSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sink for BluetoothSink<N> {
    type Error = BluetoothSinkError;

    fn prepare_format(&self, _source: SinkFormat) -> SinkFormat {
        FIXED_FORMAT
    }

    fn configure(&mut self, _format: SinkFormat) -> Result<(), Self::Error> {
        self.format = Some(FIXED_FORMAT);
        Ok(())
    }

    fn format(&self) -> Option<SinkFormat> {
        self.format
    }

    fn set_mode(&mut self, mode: SinkMode) {
        self.mode = mode;
    }

    fn mode(&self) -> SinkMode {
        self.mode
    }

    #[allow(clippy::indexing_slicing)] // batch.len() <= CHUNK is guaranteed by `chunks(CHUNK)`
    async fn write(&mut self, samples: &[i16]) -> Result<usize, Self::Error> {
        // Software gain is applied sample-by-sample ahead of the hand-off
        // to the radio; the drain buffer itself is always fed post-gain.
        // Processed in fixed-size chunks so arbitrarily long slices never
        // overflow a stack scratch buffer.
        const CHUNK: usize = 256;
        let mut scratch = [0i16; CHUNK];
        for batch in samples.chunks(CHUNK) {
            for (slot, &s) in scratch.iter_mut().zip(batch.iter()) {
                *slot = self.apply_gain(s);
            }
            self.drain.send(&scratch[..batch.len()]).await;
        }
        Ok(samples.len())
    }

    fn reset_drain(&mut self) {
        self.drain.clear();
    }

    fn drain_is_empty(&self) -> bool {
        self.drain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::audio_types::VolumePercent;

    #[test]
    fn test_prepare_format_is_always_fixed() {
        let sink: BluetoothSink<64> = BluetoothSink::new();
        let prepared = sink.prepare_format(SinkFormat {
            sample_rate_hz: 44_100,
            channels: 1,
            bits_per_sample: 24,
        });
        assert_eq!(prepared, FIXED_FORMAT);
    }

    #[test]
    fn test_apply_gain_is_unity_at_full_volume() {
        let sink: BluetoothSink<64> = BluetoothSink::new();
        assert_eq!(sink.apply_gain(10_000), 10_000);
    }

    #[test]
    fn test_apply_gain_attenuates_at_low_volume() {
        let mut sink: BluetoothSink<64> = BluetoothSink::new();
        sink.volume_mut().set_pct(VolumePercent::new(0));
        assert_eq!(sink.apply_gain(10_000), 10);
    }

    #[tokio::test]
    async fn test_write_applies_gain_before_draining() {
        let mut sink: BluetoothSink<64> = BluetoothSink::new();
        sink.volume_mut().set_pct(VolumePercent::new(0));
        sink.write(&[10_000, -10_000]).await.expect("write");
        assert!(!sink.drain_is_empty());
    }
}
