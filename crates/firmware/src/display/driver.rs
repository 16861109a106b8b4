//! SSD1677 / SSD2677 Hardware Driver
//!
//! Complete async driver for the SSD1677 / SSD2677 e-ink controller used in the
//! Good Display GDEM0397T81P (800×480, Carta 1200) panel.
//!
//! # Wiring (STM32H743ZI example)
//!
//! | Signal | STM32 pin | Direction |
//! |--------|-----------|-----------|
//! | SCK    | PA5 (SPI1_SCK)  | Host → Display |
//! | MOSI   | PA7 (SPI1_MOSI) | Host → Display |
//! | DC     | PB0 (GPIO)      | Host → Display |
//! | CS     | Managed by `SpiDevice` | Host → Display |
//! | RST    | PB2 (GPIO)      | Host → Display |
//! | BUSY   | PE3 (GPIO)      | Display → Host |
//!
//! # Memory layout
//!
//! The internal framebuffer (1bpp, 800×480 / 8 = 48 000 bytes) lives in AXI
//! SRAM when on hardware:
//! ```text
//! #[link_section = ".axisram"]
//! static FRAMEBUFFER: [u8; 48_000] = [0xFF; 48_000];
//! ```
//!
//! # Y-reversal
//!
//! The GDEM0397T81P gates are physically wired in reverse order.  When
//! `DATA_ENTRY_MODE = 0x01` (X+, Y−) is selected the controller scans from
//! the *bottom* gate, so logical row `y = 0` maps to RAM row `HEIGHT-1 = 479`
//! and logical row `y = 479` maps to RAM row `0`.  Every method that sets RAM
//! Y counters / ranges must apply `y_ram = HEIGHT - 1 - y`.

// Display geometry constants are u32 (matching embedded-graphics) but SSD1677
// registers are u16/u8.  These narrowing casts are safe because DISPLAY_WIDTH=800
// and DISPLAY_HEIGHT=480 both fit in u16, and BYTES_PER_ROW=100 fits in u8.
// Pixel coordinates from embedded-graphics are i32; after bounds checks they
// are always non-negative so casting to usize is safe.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects,
)]

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use platform::{DisplayDriver, EinkDisplay, RefreshMode};

use super::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bytes per row: 800 pixels / 8 bits = 100 bytes.
pub const BYTES_PER_ROW: usize = DISPLAY_WIDTH as usize / 8;

/// Total framebuffer size for 1bpp (black/white) at 800×480.
pub const FRAMEBUFFER_SIZE_1BPP: usize = BYTES_PER_ROW * DISPLAY_HEIGHT as usize;

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

/// SSD1677 / SSD2677 command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Command {
    /// Driver output control — 3 data bytes.
    DriverOutputControl = 0x01,
    /// Gate driving voltage — 1 data byte.
    GateVoltage = 0x03,
    /// Source driving voltage — 3 data bytes.
    SourceVoltage = 0x04,
    /// Booster soft-start — 5 data bytes.
    BoosterSoftStart = 0x0C,
    /// Deep sleep — 1 data byte (0x01 = preserve RAM).
    DeepSleep = 0x10,
    /// Data entry mode — 1 data byte.
    DataEntryMode = 0x11,
    /// Software reset — 0 data bytes; wait ≥10 ms then poll BUSY.
    SoftReset = 0x12,
    /// Temperature sensor control — 1 data byte.
    TempSensorControl = 0x18,
    /// Write temperature value — 2 data bytes.
    WriteTempValue = 0x1A,
    /// Master activation — 0 data bytes; triggers panel update.
    MasterActivation = 0x20,
    /// Display update control 1 — 2 data bytes.
    DisplayUpdateCtrl1 = 0x21,
    /// Display update control 2 — 1 data byte (sequence flags).
    DisplayUpdateCtrl2 = 0x22,
    /// Write RAM (B/W) — pixel data; 0=black, 1=white, MSB-first.
    WriteRamBW = 0x24,
    /// Write RAM (Red / previous frame buffer).
    WriteRamRed = 0x26,
    /// Write VCOM register — 1 data byte.
    WriteVcom = 0x2C,
    /// Write LUT register — 112 data bytes.
    WriteLut = 0x32,
    /// Border waveform control — 1 data byte.
    BorderWaveform = 0x3C,
    /// Set RAM X start/end address — 4 data bytes.
    SetRamXRange = 0x44,
    /// Set RAM Y start/end address — 4 data bytes.
    SetRamYRange = 0x45,
    /// Auto-write B/W RAM with fill byte — 1 data byte; wait BUSY after.
    AutoWriteBwRam = 0x46,
    /// Auto-write Red RAM with fill byte — 1 data byte; wait BUSY after.
    AutoWriteRedRam = 0x47,
    /// Set RAM X address counter — 2 data bytes.
    SetRamXCounter = 0x4E,
    /// Set RAM Y address counter — 2 data bytes.
    SetRamYCounter = 0x4F,
    /// NOP.
    Nop = 0xFF,
}

// ---------------------------------------------------------------------------
// DisplayUpdateCtrl2 flag constants
// ---------------------------------------------------------------------------

/// Full refresh using OTP waveform (clock + analog + temp + LUT + display).
pub const UPDATE_FULL: u8 = 0xF7;
/// Full refresh fast path.
pub const UPDATE_FULL_FAST: u8 = 0xD7;
/// Partial refresh.
pub const UPDATE_PARTIAL: u8 = 0xFC;
/// Power-off sequence.
pub const UPDATE_POWER_OFF: u8 = 0x83;
/// Power on only.
pub const UPDATE_POWER_ON: u8 = 0xE0;

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// SSD1677 / SSD2677 display driver.
///
/// Generic over:
/// - `SPI` — an async [`embedded_hal_async::spi::SpiDevice`] (manages CS).
/// - `DC`  — Data/Command [`embedded_hal::digital::OutputPin`].
/// - `RST` — Reset [`embedded_hal::digital::OutputPin`].
/// - `BUSY`— Busy [`embedded_hal::digital::InputPin`] (HIGH when busy).
/// - `DELAY` — [`embedded_hal_async::delay::DelayNs`] for timing.
///
/// On the STM32H743 target supply `embassy_time::Delay` for the `DELAY`
/// parameter.  In host tests supply `embedded_hal_mock::eh1::delay::NoopDelay`
/// or a custom implementation.
pub struct Ssd1677<SPI, DC, RST, BUSY, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: DELAY,
    refresh_mode: RefreshMode,
    partial_refresh_count: u8,
    /// 1bpp packed framebuffer (800×480 / 8 bytes = 48 000 bytes).
    ///
    /// `draw_iter` accumulates pixel writes here; a subsequent call to
    /// `refresh_full` / `refresh_partial` pushes the buffer to the
    /// controller's RAM and triggers a panel update.
    framebuffer: [u8; FRAMEBUFFER_SIZE_1BPP],
}

impl<SPI, DC, RST, BUSY, DELAY> Ssd1677<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    /// Create a new driver instance.
    ///
    /// The framebuffer is initialised to all-white (0xFF).
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: DELAY) -> Self {
        // SAFETY / note: On embedded (no_std) targets this struct is typically
        // placed in a `static` or on a task stack that lives in AXI SRAM, so
        // the large array size is expected and acceptable.
        #[allow(clippy::large_stack_arrays)]
        Self {
            spi,
            dc,
            rst,
            busy,
            delay,
            refresh_mode: RefreshMode::Full,
            partial_refresh_count: 0,
            framebuffer: [0xFF; FRAMEBUFFER_SIZE_1BPP],
        }
    }

    // -----------------------------------------------------------------------
    // Low-level SPI helpers
    // -----------------------------------------------------------------------

    /// Assert DC low (command mode) and send one command byte over SPI.
    ///
    /// `SpiDevice` handles CS assertion/de-assertion per transaction.
    async fn send_command(&mut self, cmd: Command) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Gpio)?;
        self.spi
            .write(&[cmd as u8])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Assert DC high (data mode) and send bytes over SPI.
    async fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| DisplayError::Gpio)?;
        self.spi
            .write(data)
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Send one command followed immediately by its data bytes.
    async fn cmd_data(&mut self, cmd: Command, data: &[u8]) -> Result<(), DisplayError> {
        self.send_command(cmd).await?;
        self.send_data(data).await
    }

    // -----------------------------------------------------------------------
    // BUSY polling
    // -----------------------------------------------------------------------

    /// Block until BUSY goes LOW (controller idle) or timeout expires.
    ///
    /// BUSY is active HIGH on SSD1677 / SSD2677.  Poll every 10 ms.
    /// After `MAX_BUSY_POLLS` attempts without BUSY going LOW the function
    /// returns `Err(DisplayError::Timeout)`.
    async fn wait_busy(&mut self) -> Result<(), DisplayError> {
        const POLL_MS: u32 = 10; // poll interval in milliseconds
        const MAX_BUSY_POLLS: u32 = 200; // 200 × 10 ms = 2 000 ms total

        for _ in 0..MAX_BUSY_POLLS {
            let is_busy = self.busy.is_high().map_err(|_| DisplayError::Gpio)?;
            if !is_busy {
                return Ok(());
            }
            self.delay.delay_ms(POLL_MS).await;
        }
        Err(DisplayError::Timeout)
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Hardware reset sequence.
    ///
    /// RST HIGH 20 ms → LOW 2 ms → HIGH 20 ms.
    async fn hardware_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(20).await;
        self.rst.set_low().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(2).await;
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(20).await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers (Y-reversal)
    // -----------------------------------------------------------------------

    /// Convert a logical Y coordinate to the controller RAM Y address.
    ///
    /// The GDEM0397T81P gates are physically reversed when `DATA_ENTRY_MODE`
    /// is `0x01` (X+, Y−).  RAM row 0 corresponds to the bottom physical
    /// gate, so `y_ram = HEIGHT - 1 - y_logical`.
    ///
    /// Returns `None` if `y_logical >= DISPLAY_HEIGHT` (out-of-bounds).
    #[inline]
    pub(crate) fn y_to_ram(y_logical: u16) -> Option<u16> {
        // DISPLAY_HEIGHT = 480 fits in u16 (max 65535). The cast is lossless.
        #[allow(clippy::arithmetic_side_effects)]
        if y_logical >= DISPLAY_HEIGHT as u16 {
            return None;
        }
        // The guard above ensures y_logical <= DISPLAY_HEIGHT - 1, so:
        //   (DISPLAY_HEIGHT as u16 - 1): 480 - 1 = 479, no underflow (DISPLAY_HEIGHT >= 1).
        //   (479) - y_logical: y_logical <= 479, so result >= 0, no underflow.
        #[allow(clippy::arithmetic_side_effects)]
        Some((DISPLAY_HEIGHT as u16 - 1) - y_logical)
    }

    // -----------------------------------------------------------------------
    // RAM window / counter helpers
    // -----------------------------------------------------------------------

    /// Set the RAM X address range.
    ///
    /// `x_byte_start` and `x_byte_end` are byte offsets (pixel_x / 8).
    async fn set_ram_x_range(
        &mut self,
        x_byte_start: u8,
        x_byte_end: u8,
    ) -> Result<(), DisplayError> {
        self.cmd_data(
            Command::SetRamXRange,
            &[x_byte_start, 0x00, x_byte_end, 0x00],
        )
        .await
    }

    /// Set the RAM Y address range using already-converted (reversed) Y values.
    async fn set_ram_y_range_raw(
        &mut self,
        y_start_ram: u16,
        y_end_ram: u16,
    ) -> Result<(), DisplayError> {
        self.cmd_data(
            Command::SetRamYRange,
            &[
                (y_start_ram & 0xFF) as u8,
                (y_start_ram >> 8) as u8,
                (y_end_ram & 0xFF) as u8,
                (y_end_ram >> 8) as u8,
            ],
        )
        .await
    }

    /// Set the RAM X address counter.
    async fn set_ram_x_counter(&mut self, x_byte: u8) -> Result<(), DisplayError> {
        self.cmd_data(Command::SetRamXCounter, &[x_byte, 0x00])
            .await
    }

    /// Set the RAM Y address counter (already reversed).
    async fn set_ram_y_counter_raw(&mut self, y_ram: u16) -> Result<(), DisplayError> {
        self.cmd_data(
            Command::SetRamYCounter,
            &[(y_ram & 0xFF) as u8, (y_ram >> 8) as u8],
        )
        .await
    }

    /// Configure full-screen RAM window and reset counters to top-left.
    ///
    /// With DATA_ENTRY_MODE 0x01 (X+, Y−):
    /// - X range: byte 0 to byte 99 (pixels 0–799)
    /// - Y range: RAM row 479 (logical y=0) down to RAM row 0 (logical y=479)
    /// - Counters: start at X=0, Y=479 (logical top-left)
    async fn set_full_window(&mut self) -> Result<(), DisplayError> {
        let x_end_byte = (BYTES_PER_ROW as u8).saturating_sub(1); // 99
                                                                  // Both inputs are compile-time constants within valid range; the
                                                                  // `ok_or` guard satisfies the bounds-checked API without runtime cost.
        let y_start_ram = Self::y_to_ram(0).ok_or(DisplayError::InvalidCoordinate)?; // 479 = 0x01DF
        // DISPLAY_HEIGHT as u16 - 1 = 479; DISPLAY_HEIGHT = 480 >= 1, no underflow.
        #[allow(clippy::arithmetic_side_effects)]
        let y_end_ram =
            Self::y_to_ram(DISPLAY_HEIGHT as u16 - 1).ok_or(DisplayError::InvalidCoordinate)?; // 0

        self.set_ram_x_range(0x00, x_end_byte).await?;
        self.set_ram_y_range_raw(y_start_ram, y_end_ram).await?;
        self.set_ram_x_counter(0x00).await?;
        self.set_ram_y_counter_raw(y_start_ram).await
    }

    // -----------------------------------------------------------------------
    // Framebuffer flush
    // -----------------------------------------------------------------------

    /// Push the internal framebuffer to the controller's B/W RAM via SPI.
    ///
    /// Sends in fixed 256-byte chunks to avoid borrow-checker conflicts.
    async fn flush_framebuffer(&mut self) -> Result<(), DisplayError> {
        self.send_command(Command::WriteRamBW).await?;

        const CHUNK: usize = 256;
        let mut offset = 0;
        while offset < FRAMEBUFFER_SIZE_1BPP {
            // offset < FRAMEBUFFER_SIZE_1BPP (loop guard), offset + CHUNK then capped
            // by .min(FRAMEBUFFER_SIZE_1BPP), so end <= FRAMEBUFFER_SIZE_1BPP.
            // offset + CHUNK: max is FRAMEBUFFER_SIZE_1BPP - 1 + 256 < usize::MAX.
            #[allow(clippy::arithmetic_side_effects)]
            let end = (offset + CHUNK).min(FRAMEBUFFER_SIZE_1BPP);
            let mut buf = [0u8; CHUNK];
            // end = (offset + CHUNK).min(FRAMEBUFFER_SIZE_1BPP) >= offset (since CHUNK > 0
            // and FRAMEBUFFER_SIZE_1BPP > offset), so end - offset >= 0.
            // end <= offset + CHUNK = offset + 256, so len <= 256 = CHUNK.
            #[allow(clippy::arithmetic_side_effects)]
            let len = end - offset;
            // offset <= end <= FRAMEBUFFER_SIZE_1BPP = len(self.framebuffer): valid slice.
            // len <= CHUNK = len(buf): valid slice.
            #[allow(clippy::indexing_slicing)]
            buf[..len].copy_from_slice(&self.framebuffer[offset..end]);
            #[allow(clippy::indexing_slicing)]
            self.send_data(&buf[..len]).await?;
            offset = end;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Initialisation (public for testing / firmware)
    // -----------------------------------------------------------------------

    /// Full initialisation sequence for GDEM0397T81P with SSD1677.
    ///
    /// Must be called once after power-on or wake-from-sleep before any
    /// display operations.
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        // 1. Hardware reset
        self.hardware_reset().await?;

        // 2. Software reset — wait 10 ms then poll BUSY
        self.send_command(Command::SoftReset).await?;
        self.delay.delay_ms(10).await;
        self.wait_busy().await?;

        // 3. Internal temperature sensor
        self.cmd_data(Command::TempSensorControl, &[0x80]).await?;

        // 4. Booster soft-start
        self.cmd_data(Command::BoosterSoftStart, &[0xAE, 0xC7, 0xC3, 0xC0, 0x80])
            .await?;

        // 5. Driver output: 480 gates (0x01DF), TB=1
        //    Gate = 479 = 0x01DF → low byte 0xDF, high byte 0x01; GD=0,SM=0,TB=1 → 0x02
        self.cmd_data(Command::DriverOutputControl, &[0xDF, 0x01, 0x02])
            .await?;

        // 6. Border waveform
        self.cmd_data(Command::BorderWaveform, &[0x01]).await?;

        // 7. Data entry mode: X+, Y- (matches Y-reversal)
        self.cmd_data(Command::DataEntryMode, &[0x01]).await?;

        // 8 & 9. RAM window + counters for full screen
        self.set_full_window().await?;

        // 10. Clear B/W RAM to white (0xF7 fill byte)
        self.cmd_data(Command::AutoWriteBwRam, &[0xF7]).await?;
        self.wait_busy().await?;

        // 11. Clear Red RAM to white
        self.cmd_data(Command::AutoWriteRedRam, &[0xF7]).await?;
        self.wait_busy().await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// platform::DisplayDriver implementation
// ---------------------------------------------------------------------------

impl<SPI, DC, RST, BUSY, DELAY> DisplayDriver for Ssd1677<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    type DriverError = DisplayError;

    fn spec(&self) -> platform::DisplayInfo {
        platform::DisplayInfo {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        }
    }

    /// Copy a framebuffer into the internal buffer and push it to the
    /// controller's SRAM via SPI.
    ///
    /// `framebuffer` must be exactly [`FRAMEBUFFER_SIZE_1BPP`] bytes packed
    /// as 1bpp (8 pixels per byte, MSB-first, 1=white, 0=black).
    async fn update_buffer(&mut self, framebuffer: &[u8]) -> Result<(), Self::DriverError> {
        if framebuffer.len() != FRAMEBUFFER_SIZE_1BPP {
            return Err(DisplayError::InvalidBuffer);
        }
        self.framebuffer.copy_from_slice(framebuffer);
        self.set_full_window().await?;
        self.flush_framebuffer().await
    }

    /// Trigger a full panel refresh using the OTP waveform.
    ///
    /// Clears ghosting.  Takes ~3 000 ms.
    async fn refresh_full(&mut self) -> Result<(), Self::DriverError> {
        self.set_full_window().await?;
        self.flush_framebuffer().await?;

        // Bypass Red RAM (B/W only mode)
        self.cmd_data(Command::DisplayUpdateCtrl1, &[0x40, 0x00])
            .await?;

        // Full refresh via OTP LUT
        self.cmd_data(Command::DisplayUpdateCtrl2, &[UPDATE_FULL])
            .await?;
        self.send_command(Command::MasterActivation).await?;
        self.wait_busy().await?;

        self.partial_refresh_count = 0;
        Ok(())
    }

    /// Trigger a partial panel refresh (~300 ms).
    ///
    /// Uses `UPDATE_PARTIAL` (0xFC) sequence flag.
    async fn refresh_partial(&mut self) -> Result<(), Self::DriverError> {
        self.set_full_window().await?;
        self.flush_framebuffer().await?;

        self.cmd_data(Command::DisplayUpdateCtrl2, &[UPDATE_PARTIAL])
            .await?;
        self.send_command(Command::MasterActivation).await?;
        self.wait_busy().await?;

        self.partial_refresh_count = self.partial_refresh_count.saturating_add(1);
        Ok(())
    }

    /// Enter deep sleep (preserves RAM, ~1 µA).
    async fn sleep(&mut self) -> Result<(), Self::DriverError> {
        self.cmd_data(Command::DeepSleep, &[0x01]).await?;
        self.delay.delay_ms(100).await;
        Ok(())
    }

    /// Wake from deep sleep by running a hardware reset and re-init.
    async fn wake(&mut self) -> Result<(), Self::DriverError> {
        self.hardware_reset().await?;
        self.init().await
    }

    /// Poll BUSY until the controller signals idle.
    async fn wait_ready(&mut self) -> Result<(), Self::DriverError> {
        self.wait_busy().await
    }
}

// ---------------------------------------------------------------------------
// DrawTarget — pixel accumulation into the framebuffer
// ---------------------------------------------------------------------------

impl<SPI, DC, RST, BUSY, DELAY> DrawTarget for Ssd1677<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    type Color = BinaryColor;
    type Error = DisplayError;

    /// Write pixels into the internal 1bpp framebuffer.
    ///
    /// Format: each byte holds 8 pixels, MSB-first.
    /// `BinaryColor::Off` (white) → bit = 1; `BinaryColor::On` (black) → bit = 0.
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= DISPLAY_WIDTH as i32
                || point.y >= DISPLAY_HEIGHT as i32
            {
                continue;
            }
            let x = point.x as usize;
            let y = point.y as usize;
            // Bounds guard above: x < DISPLAY_WIDTH (800), y < DISPLAY_HEIGHT (480).
            //   y * DISPLAY_WIDTH: max = 479 * 800 = 383200 < usize::MAX.
            //   + x: max total = 479 * 800 + 799 = 384399 < usize::MAX.
            #[allow(clippy::arithmetic_side_effects)]
            let pixel_index = y * DISPLAY_WIDTH as usize + x;
            let byte_index = pixel_index / 8;
            // pixel_index % 8 is in [0, 7]; 7 - (0..=7) is in [0, 7]. No underflow.
            #[allow(clippy::arithmetic_side_effects)]
            // MSB-first: pixel 0 of a row is in bit 7 of byte 0.
            let bit_shift = 7 - (pixel_index % 8);
            match color {
                BinaryColor::Off => {
                    // white → set bit
                    // byte_index = pixel_index / 8 <= (DISPLAY_WIDTH*DISPLAY_HEIGHT - 1) / 8
                    //   = (800*480 - 1) / 8 = 47999, which is < FRAMEBUFFER_SIZE_1BPP (48000).
                    #[allow(clippy::indexing_slicing)]
                    { self.framebuffer[byte_index] |= 1 << bit_shift; }
                }
                BinaryColor::On => {
                    // black → clear bit (same bound as above).
                    #[allow(clippy::indexing_slicing)]
                    { self.framebuffer[byte_index] &= !(1 << bit_shift); }
                }
            }
        }
        Ok(())
    }
}

impl<SPI, DC, RST, BUSY, DELAY> OriginDimensions for Ssd1677<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

// ---------------------------------------------------------------------------
// EinkDisplay
// ---------------------------------------------------------------------------

impl<SPI, DC, RST, BUSY, DELAY> EinkDisplay for Ssd1677<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn refresh_mode(&self) -> RefreshMode {
        self.refresh_mode
    }

    fn set_refresh_mode(&mut self, mode: RefreshMode) {
        self.refresh_mode = mode;
    }

    fn temperature(&self) -> Option<i8> {
        // Reading the on-chip temperature ADC register is not yet implemented.
        None
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors returned by the SSD1677 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI communication error.
    Communication,
    /// GPIO operation error.
    Gpio,
    /// Display busy — BUSY pin did not go LOW within the timeout.
    Busy,
    /// BUSY polling timed out.
    Timeout,
    /// Invalid state (e.g. calling refresh without init).
    InvalidState,
    /// Caller supplied a framebuffer with the wrong number of bytes.
    InvalidBuffer,
    /// A coordinate was outside the valid display area.
    InvalidCoordinate,
    /// Operation not supported.
    Unsupported,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "SPI communication error"),
            Self::Gpio => write!(f, "GPIO error"),
            Self::Busy => write!(f, "Display is busy"),
            Self::Timeout => write!(f, "Operation timed out"),
            Self::InvalidState => write!(f, "Invalid display state"),
            Self::InvalidBuffer => write!(f, "Invalid buffer size"),
            Self::InvalidCoordinate => write!(f, "Coordinate out of bounds"),
            Self::Unsupported => write!(f, "Unsupported operation"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

// ---------------------------------------------------------------------------
// Convenience type alias for the hardware binary
// ---------------------------------------------------------------------------

/// Type alias used by `firmware/src/main.rs` on the STM32H7 target.
///
/// On hardware, the SPI device is typically wrapped by
/// `embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice`.
/// The delay source is `embassy_time::Delay`.
#[cfg(feature = "hardware")]
pub type Ssd1677Display<SPI, DC, RST, BUSY, DELAY> = Ssd1677<SPI, DC, RST, BUSY, DELAY>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
