//! System FSM — boot, SD mount lifecycle, idle/power-down, interrupt
//! fan-out.
//!
//! States: `Uninitialised -> Booting -> {Running <-> Idle} -> Error`.
//! The 100 ms GPIO/companion poll timer and the idle/shutdown timers are
//! owned by the caller (the task running this FSM); `react` only decides
//! *what* to do given a snapshot diff or elapsed-timer notification, it
//! never blocks or sleeps itself.

use heapless::Vec;
use platform::companion_mcu::SamdStatus;
use platform::gpio_expander::GpioSnapshot;

use super::events::SystemEvent;

/// High-level state of the System FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    /// Before `Booting.entry` has run.
    Uninitialised,
    /// Driver/service bring-up in progress.
    Booting,
    /// Normal operation; SD mounted, database open.
    Running,
    /// Key-locked, database idle, Audio FSM in Standby.
    Idle,
    /// Terminal failure state; awaits hardware reset.
    Error,
}

/// Seconds of idle time (not plugged in) before full shutdown is
/// requested (§4.2 Idle).
pub const IDLE_SHUTDOWN_SECONDS: u32 = 10;
/// Seconds an unmount timer runs before a USB-MSC handover completes
/// (§4.2 Running).
pub const UNMOUNT_TIMEOUT_SECONDS: u32 = 10;
/// Grace period given to the companion MCU to release the SD bus before
/// the mux is reclaimed on MSC handover reversal.
pub const COMPANION_RELEASE_GRACE_MS: u32 = 250;

/// Whether Audio FSM is in Standby — the System FSM needs this to decide
/// Idle eligibility but does not own Audio FSM state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleInputs {
    /// Hardware key-lock currently asserted.
    pub key_locked: bool,
    /// Library database is not mid-scan/update.
    pub database_idle: bool,
    /// Audio FSM reports Standby (no active playback).
    pub audio_standby: bool,
}

impl IdleInputs {
    fn satisfied(&self) -> bool {
        self.key_locked && self.database_idle && self.audio_standby
    }
}

/// The System FSM.
pub struct SystemFsm {
    state: SystemState,
    gpio_snapshot: GpioSnapshot,
    samd_status: Option<SamdStatus>,
    sd_mounted: bool,
    /// Seconds the companion MCU has reported not-plugged-in while Idle
    /// (§4.2 Idle's shutdown countdown).
    idle_elapsed_seconds: u32,
    /// Set once the shutdown sequence has been entered, so the countdown
    /// and the companion-power-down retry don't both fire repeatedly.
    shutdown_requested: bool,
    /// Set while a USB-MSC handover (either direction) is in progress.
    msc_handover_active: bool,
}

impl SystemFsm {
    /// Construct the FSM in `Uninitialised`.
    pub fn new() -> Self {
        Self {
            state: SystemState::Uninitialised,
            gpio_snapshot: GpioSnapshot::default(),
            samd_status: None,
            sd_mounted: false,
            idle_elapsed_seconds: 0,
            shutdown_requested: false,
            msc_handover_active: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Whether the SD card is currently mounted.
    pub fn sd_mounted(&self) -> bool {
        self.sd_mounted
    }

    /// Whether a USB-MSC handover is currently in progress.
    pub fn msc_handover_active(&self) -> bool {
        self.msc_handover_active
    }

    /// Run `Booting.entry`: drivers are assumed already constructed by the
    /// caller (ServiceLocator is built before this FSM is driven). Mounts
    /// the SD card and opens the database (both performed by the caller;
    /// this records the outcome), then emits `BootComplete` followed by
    /// `SdStateChanged{mounted: true}` (§4.2 Running.entry).
    pub fn boot(&mut self) -> Vec<SystemEvent, 2> {
        self.state = SystemState::Booting;
        self.state = SystemState::Running;
        self.sd_mounted = true;
        let mut out = Vec::new();
        let _ = out.push(SystemEvent::BootComplete);
        let _ = out.push(SystemEvent::SdStateChanged { mounted: true });
        out
    }

    /// React to a GPIO poll: diff `new_snapshot` against the last known
    /// one and emit the implied `*Changed` events.
    pub fn on_gpio_poll(&mut self, new_snapshot: GpioSnapshot) -> Vec<SystemEvent, 3> {
        let diff = new_snapshot.diff(&self.gpio_snapshot);
        self.gpio_snapshot = new_snapshot;
        let mut out = Vec::new();
        if let Some(locking) = diff.key_lock_changed {
            let _ = out.push(SystemEvent::KeyLockChanged { locking });
        }
        if let Some(present) = diff.has_phones_changed {
            let _ = out.push(SystemEvent::HasPhonesChanged { present });
        }
        if let Some(present) = diff.sd_detect_changed {
            let _ = out.push(SystemEvent::SdDetectChanged { present });
        }
        out
    }

    /// React to a companion-MCU poll: diff against the last known status
    /// and emit the implied events.
    pub fn on_samd_poll(&mut self, new_status: SamdStatus) -> Vec<SystemEvent, 2> {
        let mut out = Vec::new();
        if let Some(prev) = self.samd_status {
            let diff = new_status.diff(&prev);
            if diff.charge_changed {
                let _ = out.push(SystemEvent::BatteryStateChanged {
                    charge_state: new_status.charge_state,
                    plugged_in: new_status.plugged_in,
                });
            }
            if diff.usb_msc_changed {
                let _ = out.push(SystemEvent::SamdUsbStatusChanged {
                    msc_enabled: new_status.usb_msc_enabled,
                });
            }
        }
        self.samd_status = Some(new_status);
        out
    }

    /// Evaluate Idle eligibility given the current inputs; call after any
    /// event that could change one of `IdleInputs`'s fields.
    pub fn evaluate_idle(&mut self, inputs: IdleInputs) -> Vec<SystemEvent, 1> {
        let mut out = Vec::new();
        if self.state == SystemState::Running && inputs.satisfied() {
            self.state = SystemState::Idle;
            let _ = out.push(SystemEvent::OnIdle);
        } else if self.state == SystemState::Idle && !inputs.satisfied() {
            self.state = SystemState::Running;
            self.idle_elapsed_seconds = 0;
            self.shutdown_requested = false;
        }
        out
    }

    /// Call once per second while in `Idle`. If the companion MCU reports
    /// the device is not plugged in, counts towards `IDLE_SHUTDOWN_SECONDS`
    /// and, on reaching it, emits `EnterShutdownSequence` exactly once
    /// (§4.2 Idle). Being plugged back in, or leaving Idle, resets the
    /// count.
    pub fn on_idle_tick(&mut self, plugged_in: bool) -> Vec<SystemEvent, 1> {
        let mut out = Vec::new();
        if self.state != SystemState::Idle || plugged_in {
            self.idle_elapsed_seconds = 0;
            return out;
        }
        self.idle_elapsed_seconds = self.idle_elapsed_seconds.saturating_add(1);
        if self.idle_elapsed_seconds >= IDLE_SHUTDOWN_SECONDS && !self.shutdown_requested {
            self.shutdown_requested = true;
            let _ = out.push(SystemEvent::EnterShutdownSequence);
        }
        out
    }

    /// Whether the shutdown sequence (touchwheel/enable-pins/SD mux down,
    /// companion MCU power-down retried) is currently in progress. The
    /// owning task performs the actual `GpioExpander::drive_all_low` /
    /// `CompanionMcu::power_down` calls; this FSM only tracks the intent
    /// so `on_shutdown_retry_tick`/`on_companion_powered_down` know whether
    /// a retry is still meaningful.
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Call once per second while `shutdown_requested()` and the companion
    /// MCU has not yet confirmed power-down; emits another retry
    /// (§4.2 Idle: "every 1 s, until it takes effect"). Returns `None` once
    /// the shutdown has been cancelled or already confirmed.
    pub fn on_shutdown_retry_tick(&mut self) -> Option<SystemEvent> {
        if self.shutdown_requested {
            Some(SystemEvent::RetryCompanionPowerDown)
        } else {
            None
        }
    }

    /// The companion MCU confirmed it cut power; the shutdown sequence is
    /// complete and no further retries are needed.
    pub fn on_companion_powered_down(&mut self) {
        self.shutdown_requested = false;
    }

    /// React to the companion MCU requesting (or releasing) the SD bus for
    /// USB mass-storage mode (§4.2 Running, `SamdUsbMscChanged`).
    ///
    /// Entering (`enabled == true`) unmounts immediately and hands the mux
    /// over, emitting `SdStateChanged{mounted: false}`. Leaving
    /// (`enabled == false`) only starts the release-grace period —
    /// [`Self::companion_release_grace_ms`] tells the caller how long to
    /// wait before calling [`Self::on_companion_release_grace_elapsed`],
    /// which performs the actual mux reclaim/remount.
    pub fn on_samd_usb_msc_changed(&mut self, enabled: bool) -> Vec<SystemEvent, 1> {
        let mut out = Vec::new();
        self.msc_handover_active = true;
        if enabled {
            self.sd_mounted = false;
            let _ = out.push(SystemEvent::SdStateChanged { mounted: false });
        }
        out
    }

    /// How long the caller should wait, after a reverse `SamdUsbMscChanged`,
    /// before calling [`Self::on_companion_release_grace_elapsed`]
    /// (§4.2 Running's 250 ms companion release grace).
    pub fn companion_release_grace_ms(&self) -> u32 {
        COMPANION_RELEASE_GRACE_MS
    }

    /// Reclaims the SD mux, power-cycles the card and remounts it, after
    /// the companion MCU's release grace period has elapsed.
    pub fn on_companion_release_grace_elapsed(&mut self) -> SystemEvent {
        self.msc_handover_active = false;
        self.sd_mounted = true;
        SystemEvent::SdStateChanged { mounted: true }
    }

    /// How long a USB-MSC unmount is given to complete before the caller
    /// should treat it as timed out (§4.2 Running's unmount-timeout timer).
    pub fn unmount_timeout_seconds(&self) -> u32 {
        UNMOUNT_TIMEOUT_SECONDS
    }

    /// React to a card mount/unmount outcome.
    pub fn on_sd_state_changed(&mut self, mounted: bool) -> SystemEvent {
        self.sd_mounted = mounted;
        SystemEvent::SdStateChanged { mounted }
    }

    /// Record a fatal boot/storage condition; terminal, no further
    /// transitions are possible.
    pub fn enter_error(&mut self) {
        self.state = SystemState::Error;
    }
}

impl Default for SystemFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::companion_mcu::ChargeState;

    #[test]
    fn test_boot_transitions_to_running_and_emits_boot_complete() {
        let mut fsm = SystemFsm::new();
        let events = fsm.boot();
        assert_eq!(fsm.state(), SystemState::Running);
        assert_eq!(events.first(), Some(&SystemEvent::BootComplete));
        assert!(fsm.sd_mounted());
        assert!(events.contains(&SystemEvent::SdStateChanged { mounted: true }));
    }

    #[test]
    fn test_gpio_poll_emits_only_changed_lines() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        let events = fsm.on_gpio_poll(GpioSnapshot {
            key_lock: true,
            has_phones: false,
            sd_present: false,
        });
        assert_eq!(events.len(), 1);
        assert_eq!(events.first(), Some(&SystemEvent::KeyLockChanged { locking: true }));
    }

    #[test]
    fn test_second_identical_gpio_poll_emits_nothing() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        let snap = GpioSnapshot {
            key_lock: true,
            has_phones: true,
            sd_present: true,
        };
        fsm.on_gpio_poll(snap);
        let events = fsm.on_gpio_poll(snap);
        assert!(events.is_empty());
    }

    #[test]
    fn test_samd_poll_emits_battery_changed_on_charge_state_change() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        fsm.on_samd_poll(SamdStatus {
            charge_state: ChargeState::Discharging,
            plugged_in: false,
            usb_msc_enabled: false,
        });
        let events = fsm.on_samd_poll(SamdStatus {
            charge_state: ChargeState::Charging,
            plugged_in: true,
            usb_msc_enabled: false,
        });
        assert_eq!(
            events.first(),
            Some(&SystemEvent::BatteryStateChanged {
                charge_state: ChargeState::Charging,
                plugged_in: true
            })
        );
    }

    #[test]
    fn test_idle_entered_when_all_conditions_satisfied() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        let events = fsm.evaluate_idle(IdleInputs {
            key_locked: true,
            database_idle: true,
            audio_standby: true,
        });
        assert_eq!(fsm.state(), SystemState::Idle);
        assert_eq!(events.first(), Some(&SystemEvent::OnIdle));
    }

    #[test]
    fn test_idle_not_entered_if_audio_is_playing() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        let events = fsm.evaluate_idle(IdleInputs {
            key_locked: true,
            database_idle: true,
            audio_standby: false,
        });
        assert_eq!(fsm.state(), SystemState::Running);
        assert!(events.is_empty());
    }

    #[test]
    fn test_leaving_idle_returns_to_running() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        fsm.evaluate_idle(IdleInputs {
            key_locked: true,
            database_idle: true,
            audio_standby: true,
        });
        assert_eq!(fsm.state(), SystemState::Idle);
        fsm.evaluate_idle(IdleInputs {
            key_locked: false,
            database_idle: true,
            audio_standby: true,
        });
        assert_eq!(fsm.state(), SystemState::Running);
    }

    #[test]
    fn test_sd_state_changed_updates_mounted_flag() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        let event = fsm.on_sd_state_changed(true);
        assert!(fsm.sd_mounted());
        assert_eq!(event, SystemEvent::SdStateChanged { mounted: true });
    }

    #[test]
    fn test_enter_error_is_terminal() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        fsm.enter_error();
        assert_eq!(fsm.state(), SystemState::Error);
    }

    fn idle(fsm: &mut SystemFsm) {
        fsm.boot();
        fsm.evaluate_idle(IdleInputs {
            key_locked: true,
            database_idle: true,
            audio_standby: true,
        });
        assert_eq!(fsm.state(), SystemState::Idle);
    }

    #[test]
    fn test_idle_tick_enters_shutdown_sequence_after_threshold() {
        let mut fsm = SystemFsm::new();
        idle(&mut fsm);
        for _ in 0..IDLE_SHUTDOWN_SECONDS - 1 {
            let events = fsm.on_idle_tick(false);
            assert!(events.is_empty());
        }
        let events = fsm.on_idle_tick(false);
        assert_eq!(events.first(), Some(&SystemEvent::EnterShutdownSequence));
        assert!(fsm.shutdown_requested());
    }

    #[test]
    fn test_idle_tick_does_not_count_while_plugged_in() {
        let mut fsm = SystemFsm::new();
        idle(&mut fsm);
        for _ in 0..IDLE_SHUTDOWN_SECONDS {
            fsm.on_idle_tick(true);
        }
        assert!(!fsm.shutdown_requested());
    }

    #[test]
    fn test_leaving_idle_cancels_shutdown_countdown() {
        let mut fsm = SystemFsm::new();
        idle(&mut fsm);
        fsm.on_idle_tick(false);
        fsm.evaluate_idle(IdleInputs {
            key_locked: false,
            database_idle: true,
            audio_standby: true,
        });
        for _ in 0..IDLE_SHUTDOWN_SECONDS {
            fsm.on_idle_tick(false);
        }
        assert!(!fsm.shutdown_requested());
    }

    #[test]
    fn test_shutdown_retry_tick_repeats_until_companion_confirms() {
        let mut fsm = SystemFsm::new();
        idle(&mut fsm);
        for _ in 0..IDLE_SHUTDOWN_SECONDS {
            fsm.on_idle_tick(false);
        }
        assert_eq!(fsm.on_shutdown_retry_tick(), Some(SystemEvent::RetryCompanionPowerDown));
        assert_eq!(fsm.on_shutdown_retry_tick(), Some(SystemEvent::RetryCompanionPowerDown));
        fsm.on_companion_powered_down();
        assert_eq!(fsm.on_shutdown_retry_tick(), None);
    }

    #[test]
    fn test_samd_usb_msc_entering_unmounts_and_hands_over_mux() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        let events = fsm.on_samd_usb_msc_changed(true);
        assert!(!fsm.sd_mounted());
        assert!(fsm.msc_handover_active());
        assert_eq!(events.first(), Some(&SystemEvent::SdStateChanged { mounted: false }));
    }

    #[test]
    fn test_samd_usb_msc_reverse_waits_for_release_grace_then_remounts() {
        let mut fsm = SystemFsm::new();
        fsm.boot();
        fsm.on_samd_usb_msc_changed(true);
        let events = fsm.on_samd_usb_msc_changed(false);
        assert!(events.is_empty());
        assert!(!fsm.sd_mounted());
        assert_eq!(fsm.companion_release_grace_ms(), COMPANION_RELEASE_GRACE_MS);
        let event = fsm.on_companion_release_grace_elapsed();
        assert!(fsm.sd_mounted());
        assert!(!fsm.msc_handover_active());
        assert_eq!(event, SystemEvent::SdStateChanged { mounted: true });
    }
}
