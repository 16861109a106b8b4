//! Audio FSM — track queue/decoder pipeline lifecycle, output routing,
//! volume policy.
//!
//! States: `Uninitialised -> Standby <-> Playback`. The distinction between
//! Standby and Playback is purely whether the active sink is draining
//! samples; both states otherwise share the same reaction table, so this
//! is modelled as one struct carrying a small `AudioState` tag rather than
//! three separate structs (c.f. the reference's single `AudioState` class
//! with internal mode flags).

use heapless::Vec;
use library::queue::QueueReason;

use super::events::{BtConnectionState, Output, SystemEvent, Transition, TrackRef};

/// Current high-level mode of the Audio FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// Waiting for `BootComplete`.
    Uninitialised,
    /// A sink exists but is not actively draining samples.
    Standby,
    /// The active sink is draining samples from the drain buffer.
    Playback,
}

/// The currently-playing (or about to play) track identity, as tracked by
/// the FSM rather than the library layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTrack {
    /// What's playing.
    pub track: TrackRef,
    /// Whether it came from the queue (vs. an ad-hoc SetTrack).
    pub from_queue: bool,
    /// Seconds into the track playback should start at.
    pub seek_to_second: u32,
    /// The track's logical-start offset (library `TrackInfo::start_offset_s`),
    /// added back in on gapless promotion so the promoted track's sample
    /// count reflects its real beginning rather than the cue point.
    pub start_offset_s: u32,
}

/// Mutable state the Audio FSM owns across reactions — the Rust analogue
/// of the reference's `sCurrentTrack`/`sCurrentSamples`/`sNextTrack*`
/// static fields, folded into one value instead of class statics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioContext {
    /// Track currently playing, if any.
    pub current_track: Option<CurrentTrack>,
    /// Samples sunk since `current_track` became current.
    pub current_samples: u32,
    /// Track queued to become current once `next_track_cue_samples` is
    /// reached.
    pub next_track: Option<CurrentTrack>,
    /// `current_samples` threshold at which `next_track` is promoted.
    pub next_track_cue_samples: u32,
    /// User-requested pause state.
    pub is_paused: bool,
    /// Which sink is currently active.
    pub active_output: Output,
    /// Current volume of the active sink, percent 0-100 (§4.3 volume
    /// policy's "current volume" knob).
    pub current_volume_pct: u8,
    /// Headphone-only ceiling on `current_volume_pct`.
    pub volume_limit_pct: u8,
}

impl Default for AudioContext {
    fn default() -> Self {
        Self {
            current_track: None,
            current_samples: 0,
            next_track: None,
            next_track_cue_samples: 0,
            is_paused: false,
            active_output: Output::default(),
            current_volume_pct: 100,
            volume_limit_pct: 100,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Output::Headphones
    }
}

/// Half the drain buffer's capacity in samples — the gapless cue offset
/// (≈ 1 s at 48 kHz stereo: `48000 * 2 / 2`).
pub const DEFAULT_CUE_OFFSET_SAMPLES: u32 = 48_000;

/// Sample rate assumed for seek/cue-offset sample-count math until a real
/// `StreamStarted` has reported the decoded format. Matches the same
/// 48 kHz/stereo baseline `DEFAULT_CUE_OFFSET_SAMPLES` is built from.
pub const ASSUMED_SAMPLE_RATE_HZ: u32 = 48_000;
/// Channel count assumed for the same math.
pub const ASSUMED_CHANNELS: u32 = 2;

/// Outcome of one `AudioFsm::react` call: at most one derived `SetTrack`
/// plus zero or more events to re-broadcast to System/UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioReaction {
    /// Events to dispatch back onto the shared queue (e.g. a translated
    /// `SetTrack`, or `PlaybackUpdate`/`VolumeChanged` for the UI side).
    pub emit: Vec<SystemEvent, 4>,
    /// Set on a hard-cut `SetTrack`: the owning task must run the
    /// drain-buffer clear algorithm (§4.3) — stop the file source, then
    /// repeatedly call `Sink::reset_drain`/`drain_is_empty` (actively
    /// draining small chunks first if paused) until the reset takes.
    /// The FSM has no `Sink` handle of its own, so it can only signal
    /// that the reset is required.
    pub requires_drain_reset: bool,
}

impl AudioReaction {
    fn with(event: SystemEvent) -> Self {
        let mut v = Vec::new();
        let _ = v.push(event);
        Self { emit: v, requires_drain_reset: false }
    }

    fn empty() -> Self {
        Self::default()
    }

    fn with_drain_reset(mut self) -> Self {
        self.requires_drain_reset = true;
        self
    }
}

/// The Audio FSM.
pub struct AudioFsm {
    state: AudioState,
    ctx: AudioContext,
}

impl AudioFsm {
    /// Construct the FSM in `Uninitialised`.
    pub fn new() -> Self {
        Self {
            state: AudioState::Uninitialised,
            ctx: AudioContext::default(),
        }
    }

    /// Current high-level state.
    pub fn state(&self) -> AudioState {
        self.state
    }

    /// Read-only view of the playback context.
    pub fn context(&self) -> &AudioContext {
        &self.ctx
    }

    /// React to one event, returning any events that should in turn be
    /// dispatched (translated `SetTrack`s, UI-facing updates, ...).
    pub fn react(&mut self, event: SystemEvent) -> AudioReaction {
        match (self.state, event) {
            (AudioState::Uninitialised, SystemEvent::BootComplete) => {
                self.ctx.next_track_cue_samples = DEFAULT_CUE_OFFSET_SAMPLES;
                self.state = AudioState::Standby;
                AudioReaction::empty()
            }
            (AudioState::Uninitialised, _) => AudioReaction::empty(),

            (_, SystemEvent::SetTrack {
                new_track,
                seek_to_second,
                transition,
                from_queue,
                start_offset_s,
            }) => self.handle_set_track(new_track, seek_to_second, transition, from_queue, start_offset_s),

            (_, SystemEvent::QueueUpdate { reason }) => self.handle_queue_update(reason),

            (_, SystemEvent::StreamStarted { .. }) => {
                // The new stream is cued DEFAULT_CUE_OFFSET_SAMPLES behind
                // the currently-sinking track; record the cue point here so
                // StreamUpdate can compare against it.
                self.ctx.next_track_cue_samples = self
                    .ctx
                    .current_samples
                    .saturating_add(DEFAULT_CUE_OFFSET_SAMPLES);
                AudioReaction::empty()
            }

            (_, SystemEvent::StreamUpdate { samples_sunk }) => {
                self.handle_stream_update(samples_sunk)
            }

            (AudioState::Playback, SystemEvent::StreamEnded)
            | (AudioState::Standby, SystemEvent::StreamEnded) => self.handle_stream_ended(),

            (_, SystemEvent::TogglePlayPause { playing }) => {
                self.ctx.is_paused = !playing;
                if playing && self.ctx.current_track.is_some() {
                    self.state = AudioState::Playback;
                } else {
                    self.state = AudioState::Standby;
                }
                AudioReaction::with(SystemEvent::StreamUpdate { samples_sunk: 0 })
            }

            (_, SystemEvent::BluetoothEvent { state, peer }) => {
                self.handle_bluetooth_event(state, peer)
            }

            (_, SystemEvent::OutputModeChanged { output }) => {
                self.ctx.active_output = output;
                AudioReaction::empty()
            }

            (_, SystemEvent::SetVolume { target }) => self.handle_set_volume(target),
            (_, SystemEvent::StepUpVolume) => self.handle_step_volume(5),
            (_, SystemEvent::StepDownVolume) => self.handle_step_volume(-5),
            (_, SystemEvent::SetVolumeLimit { limit_pct }) => self.handle_set_volume_limit(limit_pct),

            (_, SystemEvent::SdStateChanged { mounted: false }) => {
                self.state = AudioState::Standby;
                AudioReaction::empty()
            }

            _ => AudioReaction::empty(),
        }
    }

    fn handle_set_track(
        &mut self,
        new_track: TrackRef,
        seek_to_second: u32,
        transition: Transition,
        from_queue: bool,
        start_offset_s: u32,
    ) -> AudioReaction {
        match transition {
            Transition::HardCut => {
                self.ctx.current_track = if matches!(new_track, TrackRef::None) {
                    None
                } else {
                    Some(CurrentTrack {
                        track: new_track,
                        from_queue,
                        seek_to_second,
                        start_offset_s,
                    })
                };
                // Seek lands at the requested second; real sample rate/
                // channel count aren't known until the decoder reports a
                // `StreamStarted`, so this uses the same assumed baseline
                // the cue-offset math is built on.
                self.ctx.current_samples = seek_to_second
                    .saturating_mul(ASSUMED_SAMPLE_RATE_HZ)
                    .saturating_mul(ASSUMED_CHANNELS);
                self.ctx.next_track = None;
                // A hard cut discards whatever the drain buffer was still
                // sinking for the old track; the owning task must reset it.
                AudioReaction::empty().with_drain_reset()
            }
            Transition::Gapless => {
                self.ctx.next_track = Some(CurrentTrack {
                    track: new_track,
                    from_queue,
                    seek_to_second,
                    start_offset_s,
                });
                AudioReaction::empty()
            }
        }
    }

    fn handle_queue_update(&mut self, reason: QueueReason) -> AudioReaction {
        match reason {
            QueueReason::ExplicitUpdate | QueueReason::BulkLoad => {
                AudioReaction::with(SystemEvent::SetTrack {
                    new_track: TrackRef::None,
                    seek_to_second: 0,
                    transition: Transition::Gapless,
                    from_queue: true,
                    start_offset_s: 0,
                })
            }
            QueueReason::RepeatingLastTrack => {
                let uri = self
                    .ctx
                    .current_track
                    .as_ref()
                    .map(|t| t.track.clone())
                    .unwrap_or(TrackRef::None);
                let start_offset_s = self
                    .ctx
                    .current_track
                    .as_ref()
                    .map(|t| t.start_offset_s)
                    .unwrap_or(0);
                AudioReaction::with(SystemEvent::SetTrack {
                    new_track: uri,
                    seek_to_second: 0,
                    transition: Transition::Gapless,
                    from_queue: true,
                    start_offset_s,
                })
            }
            QueueReason::TrackFinished => AudioReaction::with(SystemEvent::SetTrack {
                new_track: TrackRef::None,
                seek_to_second: 0,
                transition: Transition::Gapless,
                from_queue: true,
                start_offset_s: 0,
            }),
            QueueReason::Deserialised => AudioReaction::empty(),
        }
    }

    fn handle_stream_update(&mut self, samples_sunk: u32) -> AudioReaction {
        self.ctx.current_samples = self.ctx.current_samples.saturating_add(samples_sunk);

        if self.state == AudioState::Standby && !self.ctx.is_paused && self.ctx.current_track.is_some() {
            self.state = AudioState::Playback;
        }

        if let Some(next) = self.ctx.next_track.take() {
            if self.ctx.current_samples >= self.ctx.next_track_cue_samples {
                let start_offset_samples = next
                    .start_offset_s
                    .saturating_mul(ASSUMED_SAMPLE_RATE_HZ)
                    .saturating_mul(ASSUMED_CHANNELS);
                self.ctx.current_samples = self
                    .ctx
                    .current_samples
                    .saturating_sub(self.ctx.next_track_cue_samples)
                    .saturating_add(start_offset_samples);
                self.ctx.current_track = Some(next);
                return AudioReaction::with(SystemEvent::StreamUpdate { samples_sunk: 0 });
            }
            self.ctx.next_track = Some(next);
        }
        AudioReaction::empty()
    }

    fn handle_stream_ended(&mut self) -> AudioReaction {
        let from_queue = self
            .ctx
            .current_track
            .as_ref()
            .map(|t| t.from_queue)
            .unwrap_or(false);
        if from_queue {
            AudioReaction::with(SystemEvent::QueueUpdate {
                reason: QueueReason::TrackFinished,
            })
        } else {
            AudioReaction::with(SystemEvent::SetTrack {
                new_track: TrackRef::None,
                seek_to_second: 0,
                transition: Transition::HardCut,
                from_queue: false,
                start_offset_s: 0,
            })
        }
    }

    /// Every volume mutation is persisted to NVS/per-MAC table by the
    /// caller before this returns (§4.3 volume policy); the FSM only
    /// settles on the new value and emits the event that tells the caller
    /// to do so.
    fn handle_set_volume(&mut self, target: super::events::VolumeTarget) -> AudioReaction {
        let volume_pct = match target {
            super::events::VolumeTarget::Percent(pct) => pct.min(100),
            // Decibel targets are resolved against the active sink's
            // attenuation curve by the caller; absent that, leave the
            // current percentage unchanged rather than guess.
            super::events::VolumeTarget::DecibelTenths(_) => self.ctx.current_volume_pct,
        };
        self.ctx.current_volume_pct = volume_pct.min(self.ctx.volume_limit_pct);
        AudioReaction::with(SystemEvent::VolumeChanged {
            volume_pct: self.ctx.current_volume_pct,
        })
    }

    fn handle_step_volume(&mut self, step_pct: i16) -> AudioReaction {
        let stepped = i16::from(self.ctx.current_volume_pct).saturating_add(step_pct);
        let clamped = stepped.clamp(0, i16::from(self.ctx.volume_limit_pct));
        self.ctx.current_volume_pct = clamped as u8;
        AudioReaction::with(SystemEvent::VolumeChanged {
            volume_pct: self.ctx.current_volume_pct,
        })
    }

    fn handle_set_volume_limit(&mut self, limit_pct: u8) -> AudioReaction {
        self.ctx.volume_limit_pct = limit_pct.min(100);
        self.ctx.current_volume_pct = self.ctx.current_volume_pct.min(self.ctx.volume_limit_pct);
        AudioReaction::with(SystemEvent::VolumeChanged {
            volume_pct: self.ctx.current_volume_pct,
        })
    }

    fn handle_bluetooth_event(
        &mut self,
        state: BtConnectionState,
        _peer: [u8; 6],
    ) -> AudioReaction {
        if state == BtConnectionState::Connected && self.ctx.active_output == Output::Bluetooth {
            // Reapplying the peer's persisted volume is the caller's job
            // (it owns the bluetooth::volume::PerDeviceVolume table and the
            // sink); this FSM only signals that it should happen.
            return AudioReaction::with(SystemEvent::SetVolume {
                target: super::events::VolumeTarget::Percent(0),
            });
        }
        AudioReaction::empty()
    }
}

impl Default for AudioFsm {
    fn default() -> Self {
        Self::new()
    }
}
