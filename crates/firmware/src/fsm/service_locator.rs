//! ServiceLocator — the process-wide container of singletons constructed
//! once during Boot and shared (immutably, by reference) with every FSM
//! thereafter (§3).
//!
//! The reference implementation heap-allocates this and passes it by
//! shared pointer; per §9's design notes this port instead holds it as a
//! single value constructed on the boot task's stack, generic over the
//! concrete peripheral trait implementations so each FSM borrows exactly
//! the services it needs. Per-service interior mutability (NVS, the
//! companion MCU client) is the caller's responsibility — this struct only
//! owns the handles, not a lock around them.
//!
//! Several services named in §3 (touchwheel, tag parser, collator,
//! database handle, TTS provider, background worker pool) have no
//! concrete driver in this workspace — their chip/codec internals are out
//! of scope per §1's non-goals, so they are represented here only to the
//! extent the core touches them: the per-MAC Bluetooth volume table and
//! the track queue, which the FSMs actually mutate.

use bluetooth::volume::PerDeviceVolume;
use library::queue::TrackQueue;
use platform::companion_mcu::CompanionMcu;
use platform::gpio_expander::GpioExpander;
use platform::nvs::Nvs;

/// Maximum queue length the locator's `TrackQueue` is sized for.
pub const MAX_QUEUE_LEN: usize = 512;

/// Process-wide singleton container, constructed once during Boot.
///
/// `NVS`, `SAMD`, `GPIO` are the concrete trait implementations for this
/// build target (real hardware drivers, or `platform::mocks`/`nvs::mock`
/// equivalents on desktop/test builds).
pub struct ServiceLocator<NVS, SAMD, GPIO>
where
    NVS: Nvs,
    SAMD: CompanionMcu,
    GPIO: GpioExpander,
{
    /// Non-volatile settings store.
    pub nvs: NVS,
    /// Companion power-management MCU client.
    pub companion: SAMD,
    /// GPIO expander (key-lock, headphone detect, SD detect).
    pub gpio: GPIO,
    /// Current track queue.
    pub queue: TrackQueue<MAX_QUEUE_LEN>,
    /// Per-MAC persisted Bluetooth volume.
    pub bt_volume: PerDeviceVolume,
}

impl<NVS, SAMD, GPIO> ServiceLocator<NVS, SAMD, GPIO>
where
    NVS: Nvs,
    SAMD: CompanionMcu,
    GPIO: GpioExpander,
{
    /// Construct the locator from its already-initialised driver
    /// singletons — called once at the end of `Booting.entry`.
    pub fn new(nvs: NVS, companion: SAMD, gpio: GPIO) -> Self {
        Self {
            nvs,
            companion,
            gpio,
            queue: TrackQueue::new(),
            bt_volume: PerDeviceVolume::new(),
        }
    }
}
