//! Volume policy shared by both sinks: percent/dB conversion, the left/right
//! imbalance knob, the headphone volume-limit cap, and the Bluetooth
//! software gain formula.
//!
//! Both domains round through the same representable-step convention
//! (integer percent, 0–100): headphones apply the result through
//! [`AttenuationRegister`], Bluetooth applies it as a linear gain factor
//! ahead of the radio's own AVRCP exchange.

use platform::audio_types::{AttenuationRegister, VolumePercent};

/// Silence floor used when converting 0% to a dB value (there is no finite
/// dB equivalent of "off").
pub const SILENCE_DB: f32 = -96.0;

/// Inclusive range of the shared left/right imbalance knob, in dB.
pub const IMBALANCE_MIN_DB: i8 = -10;
pub const IMBALANCE_MAX_DB: i8 = 10;

/// Gain range used by the Bluetooth software volume formula.
const BLUETOOTH_GAIN_RANGE_DB: f32 = 60.0;

/// One representable step in the shared percent domain.
const VOLUME_STEP_PCT: u8 = 1;

/// Map a [`VolumePercent`] to an ES9038Q2M [`AttenuationRegister`] value.
pub fn volume_to_attenuation(volume: VolumePercent) -> AttenuationRegister {
    AttenuationRegister::from_volume(volume)
}

/// Convert a volume percentage to its dB equivalent using a standard
/// logarithmic taper; 0% maps to [`SILENCE_DB`] rather than negative
/// infinity.
#[must_use]
pub fn pct_to_db(pct: VolumePercent) -> f32 {
    let p = pct.get();
    if p == 0 {
        SILENCE_DB
    } else {
        20.0 * libm::log10f(f32::from(p) / 100.0)
    }
}

/// Convert a dB value to the nearest representable volume percentage.
#[must_use]
pub fn db_to_pct(db: f32) -> VolumePercent {
    if db <= SILENCE_DB {
        return VolumePercent::new(0);
    }
    let linear = (libm::powf(10.0, db / 20.0) * 100.0).clamp(0.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // linear is clamped into 0.0..=100.0 immediately above
    let rounded = linear.round() as u8;
    VolumePercent::new(rounded)
}

/// Clamp an imbalance value into the representable range.
#[must_use]
pub fn clamp_imbalance_db(imbalance: i8) -> i8 {
    imbalance.clamp(IMBALANCE_MIN_DB, IMBALANCE_MAX_DB)
}

/// Headphone volume state: current level, the shared imbalance bias, and a
/// configurable absolute ceiling.
#[derive(Debug, Clone, Copy)]
pub struct HeadphoneVolume {
    current: VolumePercent,
    imbalance_db: i8,
    limit: VolumePercent,
}

impl HeadphoneVolume {
    /// Full volume, no imbalance, no cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: VolumePercent::new(100),
            imbalance_db: 0,
            limit: VolumePercent::new(100),
        }
    }

    #[must_use]
    pub fn current(&self) -> VolumePercent {
        self.current
    }

    #[must_use]
    pub fn imbalance_db(&self) -> i8 {
        self.imbalance_db
    }

    #[must_use]
    pub fn limit(&self) -> VolumePercent {
        self.limit
    }

    /// Apply a new volume in percent, clamped to the current limit.
    pub fn set_pct(&mut self, pct: VolumePercent) {
        self.current = VolumePercent::new(pct.get().min(self.limit.get()));
    }

    /// Apply a new volume given in dB, converted then clamped to the limit.
    pub fn set_db(&mut self, db: f32) {
        self.set_pct(db_to_pct(db));
    }

    /// Move one representable step up, saturating at the limit.
    pub fn step_up(&mut self) {
        let next = self.current.get().saturating_add(VOLUME_STEP_PCT).min(self.limit.get());
        self.current = VolumePercent::new(next);
    }

    /// Move one representable step down, saturating at 0.
    pub fn step_down(&mut self) {
        let next = self.current.get().saturating_sub(VOLUME_STEP_PCT);
        self.current = VolumePercent::new(next);
    }

    /// Set the shared left/right imbalance, clamped to the representable
    /// range.
    pub fn set_balance(&mut self, imbalance_db: i8) {
        self.imbalance_db = clamp_imbalance_db(imbalance_db);
    }

    /// Set the absolute ceiling, reclamping the current volume down if it
    /// now exceeds it. Returns `true` if the current volume changed.
    pub fn set_limit(&mut self, limit: VolumePercent) -> bool {
        self.limit = limit;
        if self.current.get() > limit.get() {
            self.current = limit;
            true
        } else {
            false
        }
    }

    /// Per-channel attenuation registers with the imbalance applied as a
    /// `+`/`-` dB bias on the shared current level. Each channel is
    /// independently capped at 0 dB (full volume) since the DAC register
    /// is attenuation-only and cannot represent gain above unity.
    #[must_use]
    pub fn channel_attenuations(&self) -> (AttenuationRegister, AttenuationRegister) {
        let base_db = pct_to_db(self.current);
        let bias = f32::from(self.imbalance_db);
        let left = db_to_pct((base_db + bias).min(0.0));
        let right = db_to_pct((base_db - bias).min(0.0));
        (volume_to_attenuation(left), volume_to_attenuation(right))
    }
}

impl Default for HeadphoneVolume {
    fn default() -> Self {
        Self::new()
    }
}

/// Bluetooth software volume for a single connected peer: a gain factor
/// applied to PCM samples before hand-off to the radio, in addition to
/// whatever AVRCP volume the peer negotiates on its own.
#[derive(Debug, Clone, Copy)]
pub struct BluetoothVolume {
    current: VolumePercent,
}

impl BluetoothVolume {
    #[must_use]
    pub fn new(pct: VolumePercent) -> Self {
        Self { current: pct }
    }

    #[must_use]
    pub fn current(&self) -> VolumePercent {
        self.current
    }

    pub fn set_pct(&mut self, pct: VolumePercent) {
        self.current = pct;
    }

    pub fn set_db(&mut self, db: f32) {
        self.current = db_to_pct(db);
    }

    /// Move one representable step up, saturating at 100%.
    pub fn step_up(&mut self) {
        let next = self.current.get().saturating_add(VOLUME_STEP_PCT).min(100);
        self.current = VolumePercent::new(next);
    }

    /// Move one representable step down, saturating at 0%.
    pub fn step_down(&mut self) {
        let next = self.current.get().saturating_sub(VOLUME_STEP_PCT);
        self.current = VolumePercent::new(next);
    }

    /// Linear software gain: `gain = 10^((range * (v - 100) / 100) / 20)`,
    /// `range = 60 dB`. At 100% this evaluates to unity gain; at 0% it
    /// attenuates by the full 60 dB range.
    #[must_use]
    pub fn gain(&self) -> f32 {
        let v = f32::from(self.current.get());
        let exponent = (BLUETOOTH_GAIN_RANGE_DB * (v - 100.0) / 100.0) / 20.0;
        libm::powf(10.0, exponent)
    }
}

impl Default for BluetoothVolume {
    fn default() -> Self {
        Self::new(VolumePercent::new(100))
    }
}
