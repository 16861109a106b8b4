//! Wires the System and Audio FSMs onto the shared event queue (§4.1), and
//! the UI FSM onto its own. `CoreReactor` and `UiReactor` are what each
//! FSM's owning task actually passes to `EventQueue::service`.
//!
//! The System FSM's GPIO/companion polling (`on_gpio_poll`/`on_samd_poll`),
//! boot (`boot`), and idle/shutdown/USB-MSC timers are driven directly by
//! the owning task's timers, not through `Reactor::react` — only their
//! *output* events flow through the queue. `CoreReactor::react` is where
//! those output events (and the Audio FSM's own inputs) are actually
//! applied, and where playback/volume changes are translated into
//! `UiEvent`s for `UiReactor` (buffered in `ui_pending` for the owning
//! task to redispatch, same as `pending` for follow-up `SystemEvent`s).

use eventbus::{EventBus, Reactor};
use heapless::Vec;

use super::audio::AudioFsm;
use super::events::{SystemEvent, TrackRef, UiEvent};
use super::system::{IdleInputs, SystemFsm};
use super::ui::UiFsm;

/// Queue depth for both halves of the bus — matches the reference
/// firmware's FreeRTOS queue length for the System/Audio/UI tasks.
pub const QUEUE_DEPTH: usize = 16;

/// The concrete event bus type for this firmware.
pub type CoreEventBus = EventBus<SystemEvent, UiEvent, QUEUE_DEPTH, QUEUE_DEPTH>;

/// Reacts to `SystemEvent`s on behalf of both the System and Audio FSMs —
/// they share one queue (§4.1) because ordering between them matters (a
/// `QueueUpdate` must be seen by Audio before System re-evaluates Idle).
pub struct CoreReactor {
    /// The System FSM.
    pub system: SystemFsm,
    /// The Audio FSM.
    pub audio: AudioFsm,
    database_idle: bool,
    idle_inputs: IdleInputs,
    /// Events produced by a reaction that the caller should re-dispatch
    /// onto the shared queue once `react` returns (the Reactor interface
    /// has no queue handle of its own, so follow-up events are buffered
    /// here for the owning task to drain and redispatch).
    pub pending: Vec<SystemEvent, 8>,
    /// `UiEvent`s translated from this reaction, for the owning task to
    /// drain and dispatch onto the UI FSM's own queue (§4.6: "each core
    /// event ... translates 1:1 to property writes").
    pub ui_pending: Vec<UiEvent, 8>,
}

impl CoreReactor {
    /// Construct a reactor pairing a fresh System and Audio FSM.
    pub fn new() -> Self {
        Self {
            system: SystemFsm::new(),
            audio: AudioFsm::new(),
            database_idle: true,
            idle_inputs: IdleInputs {
                key_locked: false,
                database_idle: true,
                audio_standby: true,
            },
            pending: Vec::new(),
            ui_pending: Vec::new(),
        }
    }

    /// Mark the library database as busy/idle; affects Idle eligibility.
    pub fn set_database_idle(&mut self, idle: bool) {
        self.database_idle = idle;
    }

    fn reevaluate_idle(&mut self) {
        self.idle_inputs.database_idle = self.database_idle;
        self.idle_inputs.audio_standby = self.audio.state() == super::audio::AudioState::Standby;
        for event in self.system.evaluate_idle(self.idle_inputs) {
            let _ = self.pending.push(event);
        }
    }
}

impl Default for CoreReactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactor for CoreReactor {
    type Event = SystemEvent;

    fn react(&mut self, event: SystemEvent) {
        if let SystemEvent::KeyLockChanged { locking } = &event {
            self.idle_inputs.key_locked = *locking;
        }

        let affects_playback = matches!(
            event,
            SystemEvent::SetTrack { .. }
                | SystemEvent::TogglePlayPause { .. }
                | SystemEvent::StreamUpdate { .. }
                | SystemEvent::StreamEnded
                | SystemEvent::QueueUpdate { .. }
        );

        let reaction = self.audio.react(event);
        for out in reaction.emit {
            if let SystemEvent::VolumeChanged { volume_pct } = out {
                let _ = self.ui_pending.push(UiEvent::VolumeChanged { volume_pct });
            }
            let _ = self.pending.push(out);
        }

        if affects_playback {
            let track = self
                .audio
                .context()
                .current_track
                .as_ref()
                .map(|t| t.track.clone())
                .unwrap_or(TrackRef::None);
            let playing = self.audio.state() == super::audio::AudioState::Playback;
            let _ = self
                .ui_pending
                .push(UiEvent::PlaybackUpdate { track, playing });
        }

        self.reevaluate_idle();
    }
}

/// Reacts to `UiEvent`s on behalf of the UI FSM.
pub struct UiReactor {
    /// The UI FSM.
    pub ui: UiFsm,
}

impl UiReactor {
    /// Construct a reactor wrapping a fresh UI FSM.
    pub fn new() -> Self {
        Self { ui: UiFsm::new() }
    }
}

impl Default for UiReactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactor for UiReactor {
    type Event = UiEvent;

    fn react(&mut self, event: UiEvent) {
        self.ui.react(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::events::{Transition, TrackRef};

    #[test]
    fn test_set_track_reaction_reaches_audio_fsm() {
        let mut reactor = CoreReactor::new();
        reactor.react(SystemEvent::BootComplete);
        assert_eq!(reactor.audio.state(), super::super::audio::AudioState::Standby);

        reactor.react(SystemEvent::SetTrack {
            new_track: TrackRef::Uri(heapless::String::try_from("a.mp3").unwrap()),
            seek_to_second: 0,
            transition: Transition::HardCut,
            from_queue: true,
            start_offset_s: 0,
        });
        assert!(reactor.audio.context().current_track.is_some());
    }

    #[test]
    fn test_set_track_reaction_emits_ui_playback_update() {
        let mut reactor = CoreReactor::new();
        reactor.react(SystemEvent::BootComplete);
        reactor.react(SystemEvent::SetTrack {
            new_track: TrackRef::Uri(heapless::String::try_from("a.mp3").unwrap()),
            seek_to_second: 0,
            transition: Transition::HardCut,
            from_queue: true,
            start_offset_s: 0,
        });
        assert!(reactor.ui_pending.iter().any(|e| matches!(
            e,
            UiEvent::PlaybackUpdate { track: TrackRef::Uri(uri), .. } if uri.as_str() == "a.mp3"
        )));
    }

    #[test]
    fn test_set_volume_reaction_emits_ui_volume_changed() {
        let mut reactor = CoreReactor::new();
        reactor.react(SystemEvent::BootComplete);
        reactor.react(SystemEvent::SetVolume {
            target: super::super::events::VolumeTarget::Percent(60),
        });
        assert!(reactor
            .ui_pending
            .iter()
            .any(|e| *e == UiEvent::VolumeChanged { volume_pct: 60 }));
    }

    #[test]
    fn test_key_lock_change_updates_idle_inputs_and_may_emit_on_idle() {
        let mut reactor = CoreReactor::new();
        reactor.react(SystemEvent::KeyLockChanged { locking: true });
        assert!(reactor.pending.iter().any(|e| *e == SystemEvent::OnIdle));
    }

    #[test]
    fn test_ui_reactor_forwards_boot_complete() {
        let mut reactor = UiReactor::new();
        reactor.react(UiEvent::BootComplete);
        assert_eq!(reactor.ui.state(), super::super::ui::UiState::Lua);
    }
}
