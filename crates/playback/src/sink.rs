//! Sink trait — the format-negotiation and drain-buffer contract shared by
//! the I²S (headphone) and Bluetooth outputs.
//!
//! The Sample Converter only ever talks to a sink through this trait; it
//! never knows whether samples end up on the DAC or over the radio.

/// PCM format a sink is prepared to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFormat {
    /// Sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Channel count (1 = mono, 2 = stereo).
    pub channels: u8,
    /// Bits per sample (16, 24, or 32).
    pub bits_per_sample: u8,
}

/// Power/activity state of a sink's output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    /// Output path torn down; no power draw from the drain side.
    Off,
    /// Output path live but not pulling samples (playback paused).
    OnPaused,
    /// Output path live and actively draining samples.
    OnPlaying,
}

/// A destination for converted PCM samples.
///
/// Implementations are not required to be `no_std`-agnostic beyond what the
/// crate as a whole targets; both provided sinks (`I2sSink`, `BluetoothSink`)
/// are `no_std`.
pub trait Sink {
    /// Error type for configuration/write failures.
    type Error: core::fmt::Debug;

    /// Given the upstream source format, return the format this sink would
    /// prefer to receive (clamped to whatever the sink hardware supports).
    fn prepare_format(&self, source: SinkFormat) -> SinkFormat;

    /// Apply a (possibly new) output format. Implementations that must tear
    /// down and recreate a DMA channel or radio stream do so here.
    fn configure(&mut self, format: SinkFormat) -> Result<(), Self::Error>;

    /// Current output format, or `None` if never configured.
    fn format(&self) -> Option<SinkFormat>;

    /// Set the sink's activity mode.
    fn set_mode(&mut self, mode: SinkMode);

    /// Current activity mode.
    fn mode(&self) -> SinkMode;

    /// Push interleaved PCM samples into the sink's drain buffer, blocking
    /// until all of them are accepted. Returns the number of samples sunk
    /// (equal to `samples.len()` on success).
    async fn write(&mut self, samples: &[i16]) -> Result<usize, Self::Error>;

    /// Repeatedly attempt to reset the drain buffer until it succeeds. Used
    /// by the hard-cut path when tearing down a track mid-stream.
    fn reset_drain(&mut self);

    /// `true` when the drain buffer holds no samples.
    fn drain_is_empty(&self) -> bool;
}
