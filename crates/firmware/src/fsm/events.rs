//! Event payloads dispatched on the event bus's two queues.
//!
//! `SystemEvent` is shared by the System and Audio FSMs (they sit on the
//! same queue, per §4.1); `UiEvent` carries the subset the UI FSM reacts to.
//! Both are plain enums — `no_std`, no heap, no captured closures — since
//! the event bus can only move `Copy`-ish typed values between tasks.

use heapless::String;
use library::queue::QueueReason;
use platform::companion_mcu::ChargeState;

/// Connection-state transition carried by `BluetoothEvent`.
///
/// `bluetooth::state::BluetoothState` tracks the current connected/peer
/// state; this enum is the edge that drove it to that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtConnectionState {
    /// A peer connected.
    Connected,
    /// The peer disconnected.
    Disconnected,
}

/// Maximum length of a track URI carried inline in an event payload.
pub const MAX_URI_LEN: usize = 256;

/// How a track change should affect the drain buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Clear the drain buffer immediately; the old stream's tail is discarded.
    HardCut,
    /// Leave the drain buffer alone; the new stream is cued in behind it.
    Gapless,
}

/// Which output device should be (or is) active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The onboard headphone DAC/amp.
    Headphones,
    /// The paired Bluetooth sink.
    Bluetooth,
}

/// A track reference as carried by `SetTrack` — resolved to a path by the
/// background worker before the file source opens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackRef {
    /// A library-indexed track id.
    Id(u32),
    /// A direct filesystem/playlist URI.
    Uri(String<MAX_URI_LEN>),
    /// Silence — stop playback without queuing a replacement.
    None,
}

/// Either a percentage (0-100) or a raw decibel value; the sink converts
/// through its own scale and rounds to a representable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTarget {
    /// Percent, 0-100.
    Percent(u8),
    /// Decibels, fixed-point tenths (e.g. -65 == -6.5 dB).
    DecibelTenths(i16),
}

/// Events handled by the System and Audio FSMs (they share one queue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemEvent {
    /// Boot finished; `services` is conceptually attached out-of-band via
    /// the `ServiceLocator` the FSM already holds — this variant is the
    /// synchronisation signal, not a payload carrier.
    BootComplete,
    /// The 100 ms poll timer's turn to check the GPIO expander.
    GpioInterrupt,
    /// The 100 ms poll timer's turn to check the companion MCU.
    SamdInterrupt,
    /// Hardware key-lock switch changed.
    KeyLockChanged {
        /// `true` when the lock is newly asserted.
        locking: bool,
    },
    /// Headphone jack detect changed.
    HasPhonesChanged {
        /// `true` when headphones are newly present.
        present: bool,
    },
    /// SD card-detect switch changed.
    SdDetectChanged {
        /// `true` when a card is newly present.
        present: bool,
    },
    /// Companion MCU charge/plugged-in status changed.
    BatteryStateChanged {
        /// New charge state.
        charge_state: ChargeState,
        /// Whether external power is present.
        plugged_in: bool,
    },
    /// Companion MCU USB mass-storage bridge state changed.
    SamdUsbStatusChanged {
        /// Whether the USB MSC bridge is enabled.
        msc_enabled: bool,
    },
    /// The companion requested (or released) the SD bus for USB MSC.
    SamdUsbMscChanged {
        /// `true` when USB mass storage mode is being entered.
        enabled: bool,
    },
    /// SD card mount state changed.
    SdStateChanged {
        /// `true` if the card is mounted and the database is open.
        mounted: bool,
    },
    /// The System FSM entered Idle.
    OnIdle,

    /// Request a track change (see §4.3 SetTrack).
    SetTrack {
        /// New track, or `None` for silence.
        new_track: TrackRef,
        /// Seek position within the new track.
        seek_to_second: u32,
        /// Drain-buffer handling.
        transition: Transition,
        /// Whether this SetTrack originated from the queue (affects
        /// `from_queue` bookkeeping on promotion).
        from_queue: bool,
        /// The track's logical-start offset from library metadata (§3
        /// TrackInfo's `start_offset_s`), added back in on gapless
        /// promotion to align to the track's real beginning.
        start_offset_s: u32,
    },
    /// The track queue changed; translated internally into a `SetTrack`.
    QueueUpdate {
        /// Why the queue changed.
        reason: QueueReason,
    },
    /// The decoder reached EOF (or a decode error, treated identically).
    StreamEnded,
    /// The Sample Converter began forwarding a newly opened stream.
    StreamStarted {
        /// Source sample rate in Hz.
        src_rate_hz: u32,
        /// Destination sample rate in Hz.
        dst_rate_hz: u32,
    },
    /// The Sample Converter forwarded another batch of samples.
    StreamUpdate {
        /// Samples (frames × channels) forwarded since the last update.
        samples_sunk: u32,
    },
    /// Play/pause toggle.
    TogglePlayPause {
        /// `true` requests playing, `false` requests pausing.
        playing: bool,
    },
    /// A Bluetooth connection-state change relevant to playback.
    BluetoothEvent {
        /// New connection state.
        state: BtConnectionState,
        /// Peer MAC, valid when `state == BtConnectionState::Connected`.
        peer: [u8; 6],
    },
    /// Absolute volume request.
    SetVolume {
        /// Target level.
        target: VolumeTarget,
    },
    /// Step the active sink's volume up one representable step.
    StepUpVolume,
    /// Step the active sink's volume down one representable step.
    StepDownVolume,
    /// Change the headphone volume ceiling.
    SetVolumeLimit {
        /// New ceiling, percent 0-100.
        limit_pct: u8,
    },
    /// Change the left/right imbalance, shared across sinks.
    SetVolumeBalance {
        /// -10..=10 dB.
        balance_db: i8,
    },
    /// Switch the active output device.
    OutputModeChanged {
        /// Newly active output.
        output: Output,
    },
    /// The active sink's volume (or limit) settled on a new value, after
    /// being persisted to NVS or the per-MAC table (§4.3 volume policy).
    VolumeChanged {
        /// New volume, percent 0-100.
        volume_pct: u8,
    },

    /// The System FSM has begun the Idle shutdown sequence (§4.2 Idle):
    /// touchwheel to low-power, enable-pins low, SD mux floated.
    EnterShutdownSequence,
    /// One shutdown-retry tick elapsed without the companion MCU
    /// confirming power-down; try again (§4.2 Idle, every 1 s).
    RetryCompanionPowerDown,
}

/// Events the UI FSM reacts to — a subset of `SystemEvent` plus UI-local
/// input, mirrored 1:1 into the observable property registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Boot finished; apply saved brightness and enter the Lua state.
    BootComplete,
    /// Queue contents/position/flags changed.
    QueueUpdate,
    /// Current track / position changed.
    PlaybackUpdate {
        /// Currently playing track, or `None` for silence.
        track: TrackRef,
        /// Whether playback is actively running (vs. paused).
        playing: bool,
    },
    /// Volume, imbalance or ceiling changed.
    VolumeChanged {
        /// New volume, percent 0-100.
        volume_pct: u8,
    },
    /// Battery/charge state changed.
    BatteryStateChanged {
        /// New charge state.
        charge_state: ChargeState,
    },
    /// Bluetooth connection state changed.
    BluetoothEvent {
        /// New connection state.
        state: BtConnectionState,
    },
    /// SD mount state changed.
    SdStateChanged {
        /// `true` if mounted.
        mounted: bool,
    },
}
