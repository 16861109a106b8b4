//! Companion power-management microcontroller client.
//!
//! The companion MCU (a SAMD21 on the reference hardware) owns battery
//! charging, the USB mass-storage bridge to the SD card, and the final
//! power-cut line. The core only ever talks to it through this trait; the
//! wire protocol and register map are out of scope here.

/// Charge state as reported by the companion MCU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeState {
    /// Not connected to external power.
    Discharging,
    /// Connected, charging at the standard rate.
    Charging,
    /// Connected, charging at the negotiated fast-charge rate.
    FastCharging,
    /// Connected, charge complete.
    Full,
}

/// A snapshot of the companion MCU's reported status, used to diff against
/// the previous snapshot when deciding which `*Changed` events to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamdStatus {
    /// Charge state.
    pub charge_state: ChargeState,
    /// True when external (USB) power is present, regardless of charge state.
    pub plugged_in: bool,
    /// True when the companion has the SD bus for USB mass storage.
    pub usb_msc_enabled: bool,
}

impl SamdStatus {
    /// Events implied by the difference between `self` (new) and `prev` (old).
    #[must_use]
    pub fn diff(&self, prev: &Self) -> SamdDiff {
        SamdDiff {
            charge_changed: self.charge_state != prev.charge_state
                || self.plugged_in != prev.plugged_in,
            usb_msc_changed: self.usb_msc_enabled != prev.usb_msc_enabled,
        }
    }
}

/// Which `*Changed` events a [`SamdStatus::diff`] implies should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamdDiff {
    /// `BatteryStateChanged` should be emitted.
    pub charge_changed: bool,
    /// `SamdUsbMscChanged` should be emitted.
    pub usb_msc_changed: bool,
}

/// Client trait for the companion power-management MCU.
pub trait CompanionMcu {
    /// Error type.
    type Error: core::fmt::Debug;

    /// Poll the companion for its current status.
    fn status(&mut self) -> impl core::future::Future<Output = Result<SamdStatus, Self::Error>>;

    /// Request the companion release the SD bus for USB mass-storage mode.
    fn enable_usb_msc(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Request the companion return the SD bus to the main controller.
    fn disable_usb_msc(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Request an immediate power cut. Idempotent — callers retry this on a
    /// fixed interval until the device actually powers off, to guard against
    /// a companion-firmware glitch dropping the first request.
    fn power_down(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

#[cfg(any(test, feature = "std"))]
pub use mock::MockCompanionMcu;

#[cfg(any(test, feature = "std"))]
mod mock {
    use super::{ChargeState, CompanionMcu, SamdStatus};

    /// In-memory [`CompanionMcu`] for tests and the desktop emulator.
    pub struct MockCompanionMcu {
        status: SamdStatus,
        pub power_down_calls: u32,
    }

    impl Default for MockCompanionMcu {
        fn default() -> Self {
            Self {
                status: SamdStatus {
                    charge_state: ChargeState::Discharging,
                    plugged_in: false,
                    usb_msc_enabled: false,
                },
                power_down_calls: 0,
            }
        }
    }

    impl MockCompanionMcu {
        /// Create a mock reporting the given status.
        #[must_use]
        pub fn new(status: SamdStatus) -> Self {
            Self { status, power_down_calls: 0 }
        }

        /// Replace the reported status (simulates the companion updating it).
        pub fn set_status(&mut self, status: SamdStatus) {
            self.status = status;
        }
    }

    impl CompanionMcu for MockCompanionMcu {
        type Error = core::convert::Infallible;

        async fn status(&mut self) -> Result<SamdStatus, Self::Error> {
            Ok(self.status)
        }

        async fn enable_usb_msc(&mut self) -> Result<(), Self::Error> {
            self.status.usb_msc_enabled = true;
            Ok(())
        }

        async fn disable_usb_msc(&mut self) -> Result<(), Self::Error> {
            self.status.usb_msc_enabled = false;
            Ok(())
        }

        async fn power_down(&mut self) -> Result<(), Self::Error> {
            self.power_down_calls += 1;
            Ok(())
        }
    }
}
