//! Playback state machine, plus the `pump` glue that drives one decode step
//! through the decoder, sample converter, and sink.
//!
//! `PlaybackEngine` itself stays a pure, `no_std`, allocation-free state
//! machine tracking stopped/playing/paused and the seek position — it holds
//! no hardware handles and performs no I/O on its own. [`PlaybackEngine::pump`]
//! is the one method that touches a decoder/converter/sink, and it only does
//! so with borrows the caller supplies for the duration of the call; nothing
//! about the state machine's own fields or tests changes.

use crate::decoder::{FrameDecoder, PcmFrame};
use crate::sample_converter::{ConverterError, ConverterEvent, SampleConverter, SourceFormat};
use crate::sink::Sink;

/// Current playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No track is loaded or playback has been explicitly stopped.
    Stopped,
    /// A track is actively decoding and streaming to the DAC.
    Playing,
    /// Playback is temporarily suspended; position is preserved.
    Paused,
}

/// Errors returned by `PlaybackEngine` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// The requested operation requires the player to be in a playing or
    /// paused state, but it is currently stopped.
    NotPlaying,
    /// The player is already playing; calling `play()` again is a no-op error.
    AlreadyPlaying,
    /// A seek target exceeded the track duration (only returned by callers that
    /// want strict range checking; the default `seek_ms` clamps silently).
    SeekOutOfRange,
}

/// Pure state machine for audio playback control.
///
/// All fields are private; state is mutated only through the method API.
/// No allocations, no I/O, no hardware dependencies.
pub struct PlaybackEngine {
    state: PlaybackState,
    position_ms: u64,
    duration_ms: u64,
}

impl PlaybackEngine {
    /// Create a new engine in the `Stopped` state with unknown duration.
    ///
    /// Use [`with_duration`] when the track length is known at construction
    /// time so that `seek_ms` can clamp correctly.
    ///
    /// [`with_duration`]: PlaybackEngine::with_duration
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Stopped,
            position_ms: 0,
            duration_ms: u64::MAX,
        }
    }

    /// Create a new engine with a known track duration in milliseconds.
    ///
    /// Seek operations will be clamped to `[0, duration_ms]`.
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            state: PlaybackState::Stopped,
            position_ms: 0,
            duration_ms,
        }
    }

    /// Start or resume playback.
    ///
    /// Transitions:
    /// - `Stopped  → Playing`  ✓
    /// - `Paused   → Playing`  ✓
    /// - `Playing  → Playing`  returns `Err(AlreadyPlaying)`
    ///
    /// # Errors
    ///
    /// Returns `Err(PlaybackError::AlreadyPlaying)` when already playing.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Playing => Err(PlaybackError::AlreadyPlaying),
            PlaybackState::Stopped | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                Ok(())
            }
        }
    }

    /// Pause playback, preserving the current position.
    ///
    /// Transitions:
    /// - `Playing → Paused`  ✓
    /// - `Stopped → —`       returns `Err(NotPlaying)`
    /// - `Paused  → Paused`  idempotent, returns `Ok(())`
    ///
    /// # Errors
    ///
    /// Returns `Err(PlaybackError::NotPlaying)` when in the `Stopped` state.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Stopped => Err(PlaybackError::NotPlaying),
            PlaybackState::Playing | PlaybackState::Paused => {
                self.state = PlaybackState::Paused;
                Ok(())
            }
        }
    }

    /// Stop playback and reset position to zero.
    ///
    /// This always succeeds: stopping an already-stopped engine is a no-op.
    ///
    /// # Errors
    ///
    /// Always returns `Ok(())`.
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
        Ok(())
    }

    /// Seek to the given position (milliseconds from the start of the track).
    ///
    /// The position is clamped to `[0, duration_ms]`.  If the duration is not
    /// known (constructed with [`new`]), clamping is effectively disabled
    /// because `duration_ms` is initialised to `u64::MAX`.
    ///
    /// [`new`]: PlaybackEngine::new
    pub fn seek_ms(&mut self, ms: u64) {
        self.position_ms = ms.min(self.duration_ms);
    }

    /// Return the current playback position in milliseconds.
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Return the current [`PlaybackState`].
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Return the track duration in milliseconds.
    ///
    /// Returns `u64::MAX` when no duration has been set.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Decode one frame from `input`, push it through `converter` into
    /// `sink`, and advance `position_ms` when playing.
    ///
    /// `frame` and `scratch` are caller-owned scratch space so this never
    /// allocates: `frame` receives the decoded samples, `scratch` receives
    /// their 16-bit narrowing before the converter sees them.
    pub async fn pump<D, S, const SCRATCH: usize>(
        &mut self,
        decoder: &mut D,
        converter: &mut SampleConverter<SCRATCH>,
        sink: &mut S,
        input: &[u8],
        frame: &mut PcmFrame,
        scratch: &mut [i16],
    ) -> Result<PumpOutcome, PumpError<D::Error, S::Error>>
    where
        D: FrameDecoder,
        S: Sink,
    {
        let bytes_consumed = decoder
            .decode_frame(input, frame)
            .map_err(PumpError::Decode)?;

        let format = SourceFormat {
            sample_rate_hz: frame.sample_rate,
            channels: frame.channels,
            bits_per_sample: 16,
        };

        let mut converter_events: heapless::Vec<ConverterEvent, 2> = heapless::Vec::new();
        for event in converter
            .observe_format(sink, format)
            .await
            .map_err(PumpError::Convert)?
        {
            let _ = converter_events.push(event);
        }

        let written = frame.to_i16(scratch);
        let stream_update = converter
            .push_samples(sink, scratch.get(..written).unwrap_or(&[]))
            .await
            .map_err(PumpError::Convert)?;

        if self.state == PlaybackState::Playing && frame.sample_rate > 0 {
            let frame_ms = u64::from(frame.len) * 1000 / u64::from(frame.sample_rate);
            self.position_ms = self.position_ms.saturating_add(frame_ms).min(self.duration_ms);
        }

        Ok(PumpOutcome {
            bytes_consumed,
            converter_events,
            stream_update,
        })
    }
}

/// Result of one [`PlaybackEngine::pump`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PumpOutcome {
    /// Input bytes the decoder consumed.
    pub bytes_consumed: usize,
    /// Format-change events the converter emitted while handling this frame.
    pub converter_events: heapless::Vec<ConverterEvent, 2>,
    /// Cadence update emitted while forwarding this frame's samples, if any.
    pub stream_update: Option<ConverterEvent>,
}

/// Errors from [`PlaybackEngine::pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpError<D: core::fmt::Debug, S: core::fmt::Debug> {
    /// The decoder rejected the input.
    Decode(D),
    /// The converter or sink rejected the format/write.
    Convert(ConverterError<S>),
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod pump_tests {
    use super::*;
    use crate::sink::{SinkFormat, SinkMode};

    /// A decoder that always produces one fixed frame and reports all input
    /// consumed, regardless of its contents.
    struct FixedFrameDecoder {
        sample_rate: u32,
        channels: u8,
        len: usize,
    }

    impl FrameDecoder for FixedFrameDecoder {
        type Error = ();

        fn decode_frame(&mut self, input: &[u8], output: &mut PcmFrame) -> Result<usize, ()> {
            output.sample_rate = self.sample_rate;
            output.channels = self.channels;
            output.len = self.len;
            for (i, sample) in output.samples.iter_mut().take(self.len * usize::from(self.channels)).enumerate() {
                *sample = ((i as i32) + 1) << 16;
            }
            Ok(input.len())
        }

        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }

        fn channels(&self) -> u8 {
            self.channels
        }
    }

    struct FakeSink {
        format: Option<SinkFormat>,
        mode: SinkMode,
        buf: heapless::Vec<i16, 4096>,
    }

    impl FakeSink {
        fn new() -> Self {
            Self {
                format: None,
                mode: SinkMode::Off,
                buf: heapless::Vec::new(),
            }
        }
    }

    impl Sink for FakeSink {
        type Error = ();

        fn prepare_format(&self, source: SinkFormat) -> SinkFormat {
            source
        }

        fn configure(&mut self, format: SinkFormat) -> Result<(), ()> {
            self.format = Some(format);
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

        async fn write(&mut self, samples: &[i16]) -> Result<usize, ()> {
            for &s in samples {
                let _ = self.buf.push(s);
            }
            Ok(samples.len())
        }

        fn reset_drain(&mut self) {
            self.buf.clear();
        }

        fn drain_is_empty(&self) -> bool {
            self.buf.is_empty()
        }
    }

    #[tokio::test]
    async fn test_pump_decodes_converts_and_writes_to_sink() {
        let mut engine = PlaybackEngine::new();
        engine.play().expect("play");
        let mut decoder = FixedFrameDecoder {
            sample_rate: 8,
            channels: 1,
            len: 4,
        };
        let mut converter: SampleConverter<1024> = SampleConverter::new();
        let mut sink = FakeSink::new();
        let mut frame = PcmFrame::zeroed();
        let mut scratch = [0i16; 16];

        let outcome = engine
            .pump(&mut decoder, &mut converter, &mut sink, &[0u8; 10], &mut frame, &mut scratch)
            .await
            .expect("pump");

        assert_eq!(outcome.bytes_consumed, 10);
        assert_eq!(&sink.buf[..], &[1, 2, 3, 4]);
        assert!(matches!(
            outcome.converter_events.first(),
            Some(ConverterEvent::StreamStarted { .. })
        ));
    }

    #[tokio::test]
    async fn test_pump_advances_position_only_while_playing() {
        let mut engine = PlaybackEngine::with_duration(10_000);
        let mut decoder = FixedFrameDecoder {
            sample_rate: 8,
            channels: 1,
            len: 4,
        };
        let mut converter: SampleConverter<1024> = SampleConverter::new();
        let mut sink = FakeSink::new();
        let mut frame = PcmFrame::zeroed();
        let mut scratch = [0i16; 16];

        engine
            .pump(&mut decoder, &mut converter, &mut sink, &[0u8; 10], &mut frame, &mut scratch)
            .await
            .expect("pump while stopped");
        assert_eq!(engine.position_ms(), 0);

        engine.play().expect("play");
        engine
            .pump(&mut decoder, &mut converter, &mut sink, &[0u8; 10], &mut frame, &mut scratch)
            .await
            .expect("pump while playing");
        assert_eq!(engine.position_ms(), 500);
    }

    #[tokio::test]
    async fn test_pump_reports_stream_update_at_threshold() {
        let mut engine = PlaybackEngine::new();
        engine.play().expect("play");
        let mut decoder = FixedFrameDecoder {
            sample_rate: 4,
            channels: 1,
            len: 4,
        };
        let mut converter: SampleConverter<1024> = SampleConverter::new();
        let mut sink = FakeSink::new();
        let mut frame = PcmFrame::zeroed();
        let mut scratch = [0i16; 16];

        let outcome = engine
            .pump(&mut decoder, &mut converter, &mut sink, &[0u8; 10], &mut frame, &mut scratch)
            .await
            .expect("pump");

        assert_eq!(
            outcome.stream_update,
            Some(ConverterEvent::StreamUpdate { samples_sunk: 4 })
        );
    }
}
