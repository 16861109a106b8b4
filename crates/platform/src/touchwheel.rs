//! Touchwheel power-mode control.
//!
//! The touchwheel is scanned by [`crate::InputDevice`]; this trait covers
//! only its power state, since idle shutdown needs to park it in low-power
//! mode before the companion MCU cuts the rail.

/// Touchwheel power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchwheelPower {
    /// Full scan rate.
    Active,
    /// Reduced scan rate, lower current draw, still wakes on touch.
    LowPower,
}

/// Touchwheel power control.
pub trait TouchwheelPowerControl {
    /// Error type.
    type Error: core::fmt::Debug;

    /// Set the touchwheel's power mode.
    fn set_power_mode(
        &mut self,
        mode: TouchwheelPower,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}
