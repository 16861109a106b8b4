//! GPIO expander snapshot and diffing.
//!
//! The System FSM's interrupt fan-out reads the expander once per poll and
//! diffs it against the previous reading rather than reacting to individual
//! pin edges, since several logical signals (key-lock, headphone detect, SD
//! card detect) share the same expander chip.

/// A single poll of the GPIO expander's input lines relevant to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioSnapshot {
    /// Hardware key-lock switch asserted.
    pub key_lock: bool,
    /// Headphones plugged into the 3.5 mm jack.
    pub has_phones: bool,
    /// SD card physically present (card-detect switch).
    pub sd_present: bool,
}

/// Which change events a [`GpioSnapshot::diff`] implies should fire, each
/// carrying the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpioDiff {
    /// `KeyLockChanged{locking}` should be emitted.
    pub key_lock_changed: Option<bool>,
    /// `HasPhonesChanged{present}` should be emitted.
    pub has_phones_changed: Option<bool>,
    /// `SdDetectChanged{present}` should be emitted.
    pub sd_detect_changed: Option<bool>,
}

impl GpioDiff {
    /// True if no line changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_lock_changed.is_none()
            && self.has_phones_changed.is_none()
            && self.sd_detect_changed.is_none()
    }
}

impl GpioSnapshot {
    /// Compute which lines changed since `prev`.
    #[must_use]
    pub fn diff(&self, prev: &Self) -> GpioDiff {
        GpioDiff {
            key_lock_changed: (self.key_lock != prev.key_lock).then_some(self.key_lock),
            has_phones_changed: (self.has_phones != prev.has_phones).then_some(self.has_phones),
            sd_detect_changed: (self.sd_present != prev.sd_present).then_some(self.sd_present),
        }
    }
}

/// GPIO expander read trait. The core polls this once per tick; the
/// specific I2C/SPI protocol to the expander chip is out of scope here.
pub trait GpioExpander {
    /// Error type.
    type Error: core::fmt::Debug;

    /// Read the current state of all lines the core cares about.
    fn read(&mut self) -> impl core::future::Future<Output = Result<GpioSnapshot, Self::Error>>;

    /// Drive every output enable-pin the expander owns to its inactive
    /// (low) level, used by the idle-shutdown sequence.
    fn drive_all_low(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}
