//! UI FSM — screen stack entry point plus the observable-property registry
//! mirroring core state for scripts.
//!
//! States: `Splash -> Lua`. This crate does not embed a Lua runtime (see
//! §1's non-goal); `UiFsm` owns the [`Property`] registry a future script
//! bridge would read from, and mirrors core events into it 1:1 exactly as
//! the reference's Lua state does.

use ui::property::{Property, PropertyValue};

use super::events::{TrackRef, UiEvent};

/// High-level state of the UI FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Minimal splash screen, shown until `BootComplete`.
    Splash,
    /// Normal operation; properties are live and scripts may subscribe.
    Lua,
}

/// Maximum bindings any one property in this registry can carry.
const MAX_BINDINGS: usize = 8;

/// The set of properties mirrored from core state, named after the Lua
/// module surface in §6 (a representative subset: playback, volume,
/// battery, bluetooth, sd_card — the full module list is the province of
/// the (out-of-scope) script bridge, not this registry).
pub struct UiFsm {
    state: UiState,
    /// `playback.track` — current track URI, empty when none.
    pub playback_track: Property<MAX_BINDINGS>,
    /// `playback.playing` — true while the Audio FSM is in Playback.
    pub playback_playing: Property<MAX_BINDINGS>,
    /// `volume.current_pct`.
    pub volume_current_pct: Property<MAX_BINDINGS>,
    /// `power.charge_state`, mirrored as text ("discharging"/"charging"/...).
    pub power_charge_state: Property<MAX_BINDINGS>,
    /// `bluetooth.connected`.
    pub bluetooth_connected: Property<MAX_BINDINGS>,
    /// `sd_card.mounted`.
    pub sd_card_mounted: Property<MAX_BINDINGS>,
}

impl UiFsm {
    /// Construct the FSM in `Splash`, properties at their boot defaults.
    pub fn new() -> Self {
        Self {
            state: UiState::Splash,
            playback_track: Property::new(PropertyValue::None),
            playback_playing: Property::new(PropertyValue::Bool(false)),
            volume_current_pct: Property::new(PropertyValue::Int(0)),
            power_charge_state: Property::new(PropertyValue::None),
            bluetooth_connected: Property::new(PropertyValue::Bool(false)),
            sd_card_mounted: Property::new(PropertyValue::Bool(false)),
        }
    }

    /// Current state.
    pub fn state(&self) -> UiState {
        self.state
    }

    /// React to one mirrored core event, updating the relevant properties.
    pub fn react(&mut self, event: UiEvent) {
        match event {
            UiEvent::BootComplete => {
                self.state = UiState::Lua;
            }
            UiEvent::QueueUpdate => {
                // Queue contents/order have no dedicated property in this
                // subset of the registry (see the module doc); scripts that
                // need the full queue go through the (out-of-scope) script
                // bridge, not this mirror.
            }
            UiEvent::PlaybackUpdate { track, playing } => {
                use core::fmt::Write;
                let mut text: heapless::String<96> = heapless::String::new();
                match &track {
                    TrackRef::Id(id) => {
                        let _ = write!(text, "{id}");
                    }
                    TrackRef::Uri(uri) => {
                        let _ = text.push_str(uri.as_str());
                    }
                    TrackRef::None => {}
                }
                self.playback_track.set_direct(PropertyValue::Text(text));
                self.playback_playing.set_direct(PropertyValue::Bool(playing));
            }
            UiEvent::VolumeChanged { volume_pct } => {
                self.volume_current_pct
                    .set_direct(PropertyValue::Int(i32::from(volume_pct)));
            }
            UiEvent::BatteryStateChanged { charge_state } => {
                let text = match charge_state {
                    platform::companion_mcu::ChargeState::Discharging => "discharging",
                    platform::companion_mcu::ChargeState::Charging => "charging",
                    platform::companion_mcu::ChargeState::FastCharging => "fast_charging",
                    platform::companion_mcu::ChargeState::Full => "full",
                };
                if let Ok(s) = heapless::String::try_from(text) {
                    self.power_charge_state.set_direct(PropertyValue::Text(s));
                }
            }
            UiEvent::BluetoothEvent { state } => {
                let connected = state == super::events::BtConnectionState::Connected;
                self.bluetooth_connected
                    .set_direct(PropertyValue::Bool(connected));
            }
            UiEvent::SdStateChanged { mounted } => {
                self.sd_card_mounted.set_direct(PropertyValue::Bool(mounted));
            }
        }
    }
}

impl Default for UiFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::companion_mcu::ChargeState;

    #[test]
    fn test_starts_in_splash() {
        let fsm = UiFsm::new();
        assert_eq!(fsm.state(), UiState::Splash);
    }

    #[test]
    fn test_boot_complete_enters_lua() {
        let mut fsm = UiFsm::new();
        fsm.react(UiEvent::BootComplete);
        assert_eq!(fsm.state(), UiState::Lua);
    }

    #[test]
    fn test_battery_state_changed_mirrors_into_property() {
        let mut fsm = UiFsm::new();
        fsm.react(UiEvent::BatteryStateChanged {
            charge_state: ChargeState::Charging,
        });
        assert_eq!(
            fsm.power_charge_state.get(),
            &PropertyValue::Text(heapless::String::try_from("charging").unwrap())
        );
    }

    #[test]
    fn test_bluetooth_event_mirrors_connected_flag() {
        let mut fsm = UiFsm::new();
        fsm.react(UiEvent::BluetoothEvent {
            state: super::super::events::BtConnectionState::Connected,
        });
        assert_eq!(fsm.bluetooth_connected.get(), &PropertyValue::Bool(true));
    }

    #[test]
    fn test_sd_state_changed_mirrors_mounted_flag() {
        let mut fsm = UiFsm::new();
        fsm.react(UiEvent::SdStateChanged { mounted: true });
        assert_eq!(fsm.sd_card_mounted.get(), &PropertyValue::Bool(true));
    }

    #[test]
    fn test_playback_update_mirrors_track_and_playing_flag() {
        let mut fsm = UiFsm::new();
        fsm.react(UiEvent::PlaybackUpdate {
            track: TrackRef::Uri(heapless::String::try_from("a.mp3").unwrap()),
            playing: true,
        });
        assert_eq!(
            fsm.playback_track.get(),
            &PropertyValue::Text(heapless::String::try_from("a.mp3").unwrap())
        );
        assert_eq!(fsm.playback_playing.get(), &PropertyValue::Bool(true));
    }

    #[test]
    fn test_volume_changed_mirrors_into_property() {
        let mut fsm = UiFsm::new();
        fsm.react(UiEvent::VolumeChanged { volume_pct: 42 });
        assert_eq!(fsm.volume_current_pct.get(), &PropertyValue::Int(42));
    }
}
