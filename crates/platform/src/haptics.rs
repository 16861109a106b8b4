//! Haptic feedback trait.
//!
//! Effect tables and the driver IC's register protocol are out of scope;
//! the core only ever selects an effect by its index within a named library.

/// Haptic effect libraries available on the driver IC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HapticLibrary {
    /// Manufacturer library A (short clicks/buzzes).
    A,
    /// Manufacturer library B (longer textured effects).
    B,
}

/// Haptic feedback driver.
pub trait Haptics {
    /// Error type.
    type Error: core::fmt::Debug;

    /// Play effect `index` from `library`.
    fn play_effect(
        &mut self,
        library: HapticLibrary,
        index: u8,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}
