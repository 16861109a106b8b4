//! Audio power sequencing typestate machine.
//!
//! Enforces the safe power-on/off ordering for TPA6120A2 + ES9038Q2M:
//!
//! ## Power-on sequence (prevents audible pop):
//! [DacOutputting] --mute_dac()--> [DacMuted] --enable_amp()--> [AmpEnabled] --unmute_dac()--> [FullyOn]
//!
//! ## Power-off sequence:
//! [FullyOn] --mute_dac_for_shutdown()--> [DacMuted] --disable_amp()--> [DacOutputting]
//!
//! The ES9038Q2M register map: register 15 (ATT_L) = 0xFF -> muted, 0x00 -> 0 dB.

use core::marker::PhantomData;

/// DAC is outputting audio; amplifier is disabled (SHUTDOWN low).
pub struct DacOutputting;

/// DAC attenuation set to maximum (muted); amplifier still disabled.
pub struct DacMuted;

/// Amplifier enabled (SHUTDOWN high); DAC is still muted.
pub struct AmpEnabled;

/// Fully operational: DAC outputting audio, amplifier enabled.
pub struct FullyOn;

/// Typestate machine for audio power sequencing.
pub struct AudioPowerSequencer<State> {
    _state: PhantomData<State>,
}

impl AudioPowerSequencer<DacOutputting> {
    /// Create sequencer in initial state (DAC running, amp off).
    #[must_use]
    pub fn new() -> Self { Self { _state: PhantomData } }

    /// Mute the DAC (set ATT registers to 0xFF) before enabling the amplifier.
    ///
    /// Stub variant: no I2C write. Use `mute_dac_with_i2c` in production firmware.
    #[deprecated(
        since = "0.1.0",
        note = "Use mute_dac_with_i2c() for hardware builds. This stub does nothing."
    )]
    #[must_use]
    pub fn mute_dac(self) -> AudioPowerSequencer<DacMuted> {
        AudioPowerSequencer { _state: PhantomData }
    }

    /// Mute the ES9038Q2M DAC by writing 0xFF to ATT_L (reg 15) and ATT_R (reg 16).
    ///
    /// # Errors
    ///
    /// Propagates any I2C bus error returned by the underlying HAL driver.
    pub fn mute_dac_with_i2c<I2C, E>(
        self,
        i2c: &mut I2C,
        addr: u8,
    ) -> Result<AudioPowerSequencer<DacMuted>, E>
    where
        I2C: embedded_hal::i2c::I2c<Error = E>,
    {
        i2c.write(addr, &[crate::es9038q2m::REG_ATT_L, crate::es9038q2m::ATT_MUTED])?;
        i2c.write(addr, &[crate::es9038q2m::REG_ATT_R, crate::es9038q2m::ATT_MUTED])?;
        Ok(AudioPowerSequencer { _state: PhantomData })
    }
}

impl AudioPowerSequencer<DacMuted> {
    /// Enable the headphone amplifier (raise TPA6120A2 SHUTDOWN pin).
    ///
    /// Stub variant: no GPIO write. Use `enable_amp_with_gpio` in production firmware.
    #[deprecated(
        since = "0.1.0",
        note = "Use enable_amp_with_gpio() for hardware builds. This stub does nothing."
    )]
    #[must_use]
    pub fn enable_amp(self) -> AudioPowerSequencer<AmpEnabled> {
        AudioPowerSequencer { _state: PhantomData }
    }

    /// Enable the TPA6120A2 headphone amplifier by driving SHUTDOWN high.
    ///
    /// # Errors
    ///
    /// Returns the GPIO error type E if the pin write fails.
    pub fn enable_amp_with_gpio<GPIO, E>(
        self,
        gpio: &mut GPIO,
    ) -> Result<AudioPowerSequencer<AmpEnabled>, E>
    where
        GPIO: embedded_hal::digital::OutputPin<Error = E>,
    {
        gpio.set_high()?;
        Ok(AudioPowerSequencer { _state: PhantomData })
    }

    /// Disable amplifier during power-down (returns to initial state).
    ///
    /// Stub variant: no GPIO write. Use `disable_amp_with_gpio` in production firmware.
    #[deprecated(
        since = "0.1.0",
        note = "Use disable_amp_with_gpio() for hardware builds. This stub does nothing."
    )]
    #[must_use]
    pub fn disable_amp(self) -> AudioPowerSequencer<DacOutputting> {
        AudioPowerSequencer { _state: PhantomData }
    }

    /// Disable the TPA6120A2 headphone amplifier by driving SHUTDOWN low.
    ///
    /// # Errors
    ///
    /// Returns the GPIO error type E if the pin write fails.
    pub fn disable_amp_with_gpio<GPIO, E>(
        self,
        gpio: &mut GPIO,
    ) -> Result<AudioPowerSequencer<DacOutputting>, E>
    where
        GPIO: embedded_hal::digital::OutputPin<Error = E>,
    {
        gpio.set_low()?;
        Ok(AudioPowerSequencer { _state: PhantomData })
    }
}

impl AudioPowerSequencer<AmpEnabled> {
    /// Unmute the DAC (restore ATT registers to desired volume level).
    ///
    /// Stub variant: no I2C write. Use `unmute_dac_with_i2c` in production firmware.
    #[deprecated(
        since = "0.1.0",
        note = "Use unmute_dac_with_i2c() for hardware builds. This stub does nothing."
    )]
    #[must_use]
    pub fn unmute_dac(self) -> AudioPowerSequencer<FullyOn> {
        AudioPowerSequencer { _state: PhantomData }
    }

    /// Unmute the ES9038Q2M DAC by writing 0x00 to ATT_L (reg 15) and ATT_R (reg 16).
    ///
    /// # Errors
    ///
    /// Propagates any I2C bus error returned by the underlying HAL driver.
    pub fn unmute_dac_with_i2c<I2C, E>(
        self,
        i2c: &mut I2C,
        addr: u8,
    ) -> Result<AudioPowerSequencer<FullyOn>, E>
    where
        I2C: embedded_hal::i2c::I2c<Error = E>,
    {
        i2c.write(addr, &[crate::es9038q2m::REG_ATT_L, crate::es9038q2m::ATT_FULL_VOLUME])?;
        i2c.write(addr, &[crate::es9038q2m::REG_ATT_R, crate::es9038q2m::ATT_FULL_VOLUME])?;
        Ok(AudioPowerSequencer { _state: PhantomData })
    }
}

impl AudioPowerSequencer<FullyOn> {
    /// Mute the DAC as the first step of power-down.
    ///
    /// Stub variant: no I2C write. Use `mute_dac_for_shutdown_with_i2c` in production firmware.
    #[deprecated(
        since = "0.1.0",
        note = "Use mute_dac_for_shutdown_with_i2c() for hardware builds. This stub does nothing."
    )]
    #[must_use]
    pub fn mute_dac_for_shutdown(self) -> AudioPowerSequencer<DacMuted> {
        AudioPowerSequencer { _state: PhantomData }
    }

    /// Mute the ES9038Q2M DAC as the first step of power-down via I2C.
    ///
    /// # Errors
    ///
    /// Propagates any I2C bus error returned by the underlying HAL driver.
    pub fn mute_dac_for_shutdown_with_i2c<I2C, E>(
        self,
        i2c: &mut I2C,
        addr: u8,
    ) -> Result<AudioPowerSequencer<DacMuted>, E>
    where
        I2C: embedded_hal::i2c::I2c<Error = E>,
    {
        i2c.write(addr, &[crate::es9038q2m::REG_ATT_L, crate::es9038q2m::ATT_MUTED])?;
        i2c.write(addr, &[crate::es9038q2m::REG_ATT_R, crate::es9038q2m::ATT_MUTED])?;
        Ok(AudioPowerSequencer { _state: PhantomData })
    }
}

impl Default for AudioPowerSequencer<DacOutputting> {
    fn default() -> Self { Self::new() }
}
