//! Per-device Bluetooth volume persistence.
//!
//! Headphone volume is global; Bluetooth volume is remembered separately
//! per peer (keyed by MAC address) because different paired devices are
//! commonly used at very different loudness. On a connection-state change
//! to "connected", the newly-connected peer's saved level is looked up so
//! the caller can reapply it — it may differ from whatever was last
//! applied for a previous peer.

use heapless::Vec;
use platform::audio_types::VolumePercent;

/// Maximum number of distinct paired devices whose volume is remembered.
pub const MAX_PAIRED_DEVICES: usize = 16;

/// A 6-byte Bluetooth device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

/// Error returned when the per-device table is full and a new MAC would
/// need to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFullError;

/// Fixed-capacity MAC → volume table.
pub struct PerDeviceVolume {
    entries: Vec<(MacAddress, VolumePercent), MAX_PAIRED_DEVICES>,
}

impl PerDeviceVolume {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// The persisted volume for `mac`, or `None` if never set.
    pub fn get(&self, mac: MacAddress) -> Option<VolumePercent> {
        self.entries
            .iter()
            .find(|(m, _)| *m == mac)
            .map(|(_, v)| *v)
    }

    /// Persist `volume` for `mac`, updating an existing entry in place or
    /// inserting a new one.
    ///
    /// # Errors
    ///
    /// Returns [`TableFullError`] if `mac` is not already tracked and the
    /// table is at [`MAX_PAIRED_DEVICES`] capacity.
    pub fn set(&mut self, mac: MacAddress, volume: VolumePercent) -> Result<(), TableFullError> {
        if let Some(entry) = self.entries.iter_mut().find(|(m, _)| *m == mac) {
            entry.1 = volume;
            return Ok(());
        }
        self.entries.push((mac, volume)).map_err(|_| TableFullError)
    }

    /// Number of devices currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no devices are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PerDeviceVolume {
    fn default() -> Self {
        Self::new()
    }
}
