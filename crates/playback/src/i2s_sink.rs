//! I²S (headphone) sink — DAC-attached drain buffer with hardware-unit
//! volume and a reconfigurable DMA-backed format.
//!
//! No real DMA/I²S peripheral is driven from this crate; `configure`/
//! `set_mode` record the intent a hardware integration layer (in
//! `firmware`) acts on. The volume and format-clamping policy is the part
//! that actually needs to be correct independent of hardware, so that's
//! what lives here.

use platform::audio_types::AttenuationRegister;

use crate::pcm_buffer::PcmBuffer;
use crate::sink::{Sink, SinkFormat, SinkMode};
use crate::volume::HeadphoneVolume;

/// Errors from the headphone sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2sSinkError {
    /// The drain buffer could not be reset within the retry budget.
    DrainResetFailed,
}

/// Headphone (I²S/DAC) output sink.
///
/// `N` is the drain buffer capacity in samples — on hardware this is sized
/// to roughly one DMA period.
pub struct I2sSink<const N: usize> {
    drain: PcmBuffer<N>,
    mode: SinkMode,
    format: Option<SinkFormat>,
    volume: HeadphoneVolume,
}

impl<const N: usize> I2sSink<N> {
    /// Minimum sample rate the DAC accepts.
    pub const MIN_SAMPLE_RATE_HZ: u32 = 8_000;
    /// Maximum sample rate the DAC accepts.
    pub const MAX_SAMPLE_RATE_HZ: u32 = 96_000;
    /// Minimum bit depth the DAC accepts.
    pub const MIN_BITS_PER_SAMPLE: u8 = 16;
    /// Maximum bit depth the DAC accepts.
    pub const MAX_BITS_PER_SAMPLE: u8 = 32;

    /// Create a new sink in `Off` mode with default volume (100%, no
    /// imbalance, no cap).
    pub fn new() -> Self {
        Self {
            drain: PcmBuffer::new(),
            mode: SinkMode::Off,
            format: None,
            volume: HeadphoneVolume::new(),
        }
    }

    /// The volume policy in effect on this sink.
    pub fn volume(&self) -> &HeadphoneVolume {
        &self.volume
    }

    /// Mutable access to the volume policy (for SetVolume/SetBalance/
    /// SetMaxVolume handlers upstream).
    pub fn volume_mut(&mut self) -> &mut HeadphoneVolume {
        &mut self.volume
    }

    /// Per-channel DAC attenuation register values, left then right, derived
    /// from the current volume/imbalance policy.
    pub fn channel_attenuations(&self) -> (AttenuationRegister, AttenuationRegister) {
        self.volume.channel_attenuations()
    }

    /// Drain buffer capacity in samples.
    pub const fn drain_capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for I2sSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sink for I2sSink<N> {
    type Error = I2sSinkError;

    fn prepare_format(&self, source: SinkFormat) -> SinkFormat {
        SinkFormat {
            sample_rate_hz: source
                .sample_rate_hz
                .clamp(Self::MIN_SAMPLE_RATE_HZ, Self::MAX_SAMPLE_RATE_HZ),
            channels: source.channels.clamp(1, 2),
            bits_per_sample: source
                .bits_per_sample
                .clamp(Self::MIN_BITS_PER_SAMPLE, Self::MAX_BITS_PER_SAMPLE),
        }
    }

    fn configure(&mut self, format: SinkFormat) -> Result<(), Self::Error> {
        self.format = Some(format);
        Ok(())
    }

    fn format(&self) -> Option<SinkFormat> {
        self.format
    }

    fn set_mode(&mut self, mode: SinkMode) {
        // Off -> {OnPaused, OnPlaying} re-creates the DMA channel and
        // restores whatever volume was last applied; nothing to do here
        // since `volume` is never cleared by `set_mode` itself.
        self.mode = mode;
    }

    fn mode(&self) -> SinkMode {
        self.mode
    }

    async fn write(&mut self, samples: &[i16]) -> Result<usize, Self::Error> {
        self.drain.send(samples).await;
        Ok(samples.len())
    }

    fn reset_drain(&mut self) {
        self.drain.clear();
    }

    fn drain_is_empty(&self) -> bool {
        self.drain.is_empty()
    }
}
