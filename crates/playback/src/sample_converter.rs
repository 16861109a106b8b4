//! Sample Converter — sits between the Decoder and a [`Sink`], resampling
//! and reformatting PCM on the fly whenever the decoded format and the
//! sink's negotiated format disagree.
//!
//! The converter never blocks on file I/O; it only pumps samples the
//! decoder has already produced through an optional resampler and forwards
//! the result to the sink, accounting for partial frames left over between
//! calls.

use crate::sink::{Sink, SinkFormat};

/// PCM format as produced by the decoder for one batch of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFormat {
    /// Sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Channel count (1 = mono, 2 = stereo).
    pub channels: u8,
    /// Bits per sample as produced by the decoder (always 16 or 32 in this
    /// pipeline; decoders widen sub-16-bit sources themselves).
    pub bits_per_sample: u8,
}

/// Events the converter emits for the Audio FSM to translate into
/// PlaybackUpdate/StreamUpdate notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterEvent {
    /// The converter began forwarding frames for a newly-opened file.
    StreamStarted {
        /// Format the decoder is producing.
        src_format: SourceFormat,
        /// Format the sink was configured with.
        dst_format: SinkFormat,
    },
    /// The sink's negotiated format changed.
    ConverterConfigurationChanged {
        /// New source format observed.
        src: SourceFormat,
        /// New sink format negotiated for it.
        dst: SinkFormat,
    },
    /// Roughly one second of audio has been forwarded to the sink.
    StreamUpdate {
        /// Samples (per channel, summed across channels) sunk since the
        /// last `StreamUpdate`.
        samples_sunk: u32,
    },
}

/// Minimal linear-interpolation resampler.
///
/// Not a high-quality DSP resampler — it trades fidelity for being
/// allocation-free, branch-light, and easy to reason about on a
/// microcontroller. Maintains fractional phase and the last input frame
/// across calls so chunk boundaries don't introduce audible clicks.
pub struct LinearResampler {
    channels: usize,
    step: f32,
    frac_pos: f32,
    last_frame: [i16; 2],
}

impl LinearResampler {
    /// Construct a resampler converting `src_sr` Hz to `dst_sr` Hz for
    /// `channels` channels (1 or 2).
    pub fn new(src_sr: u32, dst_sr: u32, channels: u8) -> Self {
        Self {
            channels: usize::from(channels.clamp(1, 2)),
            step: src_sr as f32 / dst_sr as f32,
            frac_pos: 0.0,
            last_frame: [0; 2],
        }
    }

    /// Process `input` (interleaved frames), writing as many output frames
    /// as fit in `output` (also interleaved). Returns
    /// `(input_samples_consumed, output_samples_produced)`.
    ///
    /// The bounds below are all derived from `idx + 1 < in_frames`, checked
    /// before every indexed access; `ch` is clamped to `1..=2` at
    /// construction and matches `last_frame`'s fixed size.
    #[allow(clippy::indexing_slicing)]
    #[allow(clippy::arithmetic_side_effects)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn process(&mut self, input: &[i16], output: &mut [i16]) -> (usize, usize) {
        let ch = self.channels;
        if ch == 0 {
            return (0, 0);
        }
        let in_frames = input.len() / ch;
        let out_cap_frames = output.len() / ch;
        let mut out_frame = 0usize;
        let mut pos = self.frac_pos;

        while out_frame < out_cap_frames {
            let idx = libm::floorf(pos) as isize;
            if idx + 1 >= in_frames as isize {
                break;
            }
            let frac = pos - libm::floorf(pos);
            for c in 0..ch {
                let a = if idx < 0 {
                    self.last_frame[c]
                } else {
                    input[(idx as usize) * ch + c]
                };
                let b_idx = idx + 1;
                let b = if b_idx < 0 {
                    self.last_frame[c]
                } else {
                    input[(b_idx as usize) * ch + c]
                };
                let interpolated = f32::from(a) + (f32::from(b) - f32::from(a)) * frac;
                output[out_frame * ch + c] = interpolated as i16;
            }
            out_frame += 1;
            pos += self.step;
        }

        let consumed_frames = (libm::floorf(pos).max(0.0) as usize).min(in_frames);
        if consumed_frames > 0 {
            for c in 0..ch {
                self.last_frame[c] = input[(consumed_frames - 1) * ch + c];
            }
        }
        self.frac_pos = pos - consumed_frames as f32;
        (consumed_frames * ch, out_frame * ch)
    }
}

/// Errors from the Sample Converter's main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterError<E: core::fmt::Debug> {
    /// The sink rejected a configure/write call.
    Sink(E),
}

/// One (sample_rate × channels) worth of samples — the "about one second"
/// cadence `StreamUpdate` is emitted on.
fn update_threshold(format: SourceFormat) -> u32 {
    format.sample_rate_hz.saturating_mul(u32::from(format.channels))
}

/// Stateful converter sitting between a decoder and a [`Sink`].
///
/// `SCRATCH` bounds the resampled-output scratch buffer; it should be sized
/// to comfortably hold one decoder batch's worth of resampled output (a
/// DMA-buffer's worth is typical).
pub struct SampleConverter<const SCRATCH: usize> {
    source_format: Option<SourceFormat>,
    target_format: Option<SinkFormat>,
    resampler: Option<LinearResampler>,
    samples_since_update: u32,
    leftover: heapless::Vec<i16, SCRATCH>,
}

impl<const SCRATCH: usize> SampleConverter<SCRATCH> {
    /// Construct a converter with no format negotiated yet.
    pub fn new() -> Self {
        Self {
            source_format: None,
            target_format: None,
            resampler: None,
            samples_since_update: 0,
            leftover: heapless::Vec::new(),
        }
    }

    /// Source format currently in effect, if any.
    pub fn source_format(&self) -> Option<SourceFormat> {
        self.source_format
    }

    /// Target (sink) format currently in effect, if any.
    pub fn target_format(&self) -> Option<SinkFormat> {
        self.target_format
    }

    /// Handle a new batch header from the decoder: reconfigure the sink if
    /// the format changed, and return the events the caller should forward
    /// to the Audio FSM (in order).
    ///
    /// `heapless::Vec` bounds the returned event list to at most two
    /// entries: a configuration change and, if this call also crosses the
    /// update cadence, a `StreamUpdate`.
    pub async fn observe_format<S: Sink>(
        &mut self,
        sink: &mut S,
        format: SourceFormat,
    ) -> Result<heapless::Vec<ConverterEvent, 2>, ConverterError<S::Error>> {
        let mut events: heapless::Vec<ConverterEvent, 2> = heapless::Vec::new();
        if self.source_format == Some(format) {
            return Ok(events);
        }
        self.resampler = None;
        let candidate = sink.prepare_format(to_sink_format(format));
        let reconfigure = self.target_format != Some(candidate);
        if reconfigure {
            while !sink.drain_is_empty() {
                sink.reset_drain();
            }
            sink.configure(candidate).map_err(ConverterError::Sink)?;
            if self.samples_since_update > 0 {
                let _ = events.push(ConverterEvent::StreamUpdate {
                    samples_sunk: self.samples_since_update,
                });
            }
            self.samples_since_update = 0;
            self.target_format = Some(candidate);
        }
        let was_unset = self.source_format.is_none();
        self.source_format = Some(format);
        let _ = events.push(if was_unset {
            ConverterEvent::StreamStarted {
                src_format: format,
                dst_format: candidate,
            }
        } else {
            ConverterEvent::ConverterConfigurationChanged {
                src: format,
                dst: candidate,
            }
        });
        Ok(events)
    }

    /// Forward one batch of decoded samples to `sink`, resampling if the
    /// source and target sample rates differ. Returns `Some(StreamUpdate)`
    /// if forwarding this batch crossed the ~1 s cadence.
    pub async fn push_samples<S: Sink>(
        &mut self,
        sink: &mut S,
        samples: &[i16],
    ) -> Result<Option<ConverterEvent>, ConverterError<S::Error>> {
        let (Some(src), Some(dst)) = (self.source_format, self.target_format) else {
            return Ok(None);
        };

        if src.sample_rate_hz == dst.sample_rate_hz {
            sink.write(samples).await.map_err(ConverterError::Sink)?;
            return Ok(self.account(samples.len(), src));
        }

        let resampler = self
            .resampler
            .get_or_insert_with(|| LinearResampler::new(src.sample_rate_hz, dst.sample_rate_hz, src.channels));

        let mut input = samples;
        let mut total_sunk = 0usize;
        let mut scratch = [0i16; 1024];
        loop {
            let (consumed, produced) = resampler.process(input, &mut scratch);
            if produced > 0 {
                sink.write(scratch.get(..produced).unwrap_or(&[]))
                    .await
                    .map_err(ConverterError::Sink)?;
                total_sunk = total_sunk.saturating_add(produced);
            }
            if consumed == 0 {
                break;
            }
            input = input.get(consumed..).unwrap_or(&[]);
            if input.is_empty() {
                break;
            }
        }
        Ok(self.account(total_sunk, src))
    }

    fn account(&mut self, samples_forwarded: usize, src: SourceFormat) -> Option<ConverterEvent> {
        self.samples_since_update = self
            .samples_since_update
            .saturating_add(samples_forwarded as u32);
        let threshold = update_threshold(src);
        if threshold > 0 && self.samples_since_update >= threshold {
            let sunk = self.samples_since_update;
            self.samples_since_update = 0;
            Some(ConverterEvent::StreamUpdate { samples_sunk: sunk })
        } else {
            None
        }
    }
}

impl<const SCRATCH: usize> Default for SampleConverter<SCRATCH> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_sink_format(format: SourceFormat) -> SinkFormat {
    SinkFormat {
        sample_rate_hz: format.sample_rate_hz,
        channels: format.channels,
        bits_per_sample: format.bits_per_sample,
    }
}
