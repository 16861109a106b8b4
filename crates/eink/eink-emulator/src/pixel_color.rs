//! Unified pixel color abstraction for grayscale and tri-color e-ink displays
//!
//! Supports three color modes:
//! - Grayscale: Traditional 4-level B&W displays
//! - Spectra 6 (ACeP): 6-color displays with separate B&W and color planes
//! - Kaleido 3: 4096-color displays with color filter overlay

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::GrayColor;

/// Unified color type supporting grayscale and tri-color modes
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EinkColor {
    /// Grayscale mode (4 levels, traditional e-ink)
    Gray(Gray4),

    /// Spectra 6 (ACeP - Advanced Color ePaper, 6 colors)
    ///
    /// Uses 4 ink particles (red, blue, yellow, white) to produce 6 colors:
    /// black, white, red, yellow, blue, green
    Spectra6 {
        /// Black/white plane (grayscale level)
        bw: Gray4,
        /// Color pigment state
        color: SpectraColor,
    },

    /// Kaleido 3 (4096 colors via color filter overlay)
    ///
    /// 300ppi B&W panel with color filter overlay
    /// Effective 150ppi color resolution with 4-bit per channel RGB
    Kaleido3 {
        /// 4-bit red (0-15)
        r: u8,
        /// 4-bit green (0-15)
        g: u8,
        /// 4-bit blue (0-15)
        b: u8,
    },
}

/// Spectra 6 color pigment states
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpectraColor {
    /// No color (black/white only)
    None,
    /// Red pigment active
    Red,
    /// Yellow pigment active
    Yellow,
    /// Blue pigment active
    Blue,
    /// Green pigment (yellow + blue combination)
    Green,
}

impl EinkColor {
    /// Create from Gray4 for backward compatibility
    pub fn from_gray4(gray: Gray4) -> Self {
        EinkColor::Gray(gray)
    }

    /// Convert to ARGB for display rendering (0xAARRGGBB format for softbuffer)
    pub fn to_rgba(&self) -> u32 {
        match self {
            EinkColor::Gray(gray) => {
                // Convert grayscale to ARGB
                // Gray4 luma() returns 0-3, scale to 0-255
                let value = (gray.luma() as u32) * 85; // 0,1,2,3 → 0,85,170,255
                let r = value;
                let g = value;
                let b = value;
                let a = 255;
                // ARGB format: 0xAARRGGBB
                (a << 24) | (r << 16) | (g << 8) | b
            }
            EinkColor::Spectra6 { bw, color } => {
                // Combine B&W base with color pigment
                let base_value = (bw.luma() as u32) * 85; // 0-255 range

                match color {
                    SpectraColor::None => {
                        // Pure black/white - ARGB format
                        0xFF000000 | (base_value << 16) | (base_value << 8) | base_value
                    }
                    SpectraColor::Red => {
                        // Red pigment: bright red with gray modulation
                        let r = 255;
                        let g = base_value.min(128); // Muted green/blue
                        let b = base_value.min(128);
                        0xFF000000 | (r << 16) | (g << 8) | b
                    }
                    SpectraColor::Yellow => {
                        // Yellow pigment: bright yellow
                        let r = 255;
                        let g = 255;
                        let b = base_value.min(128);
                        0xFF000000 | (r << 16) | (g << 8) | b
                    }
                    SpectraColor::Blue => {
                        // Blue pigment: bright blue
                        let r = base_value.min(128);
                        let g = base_value.min(128);
                        let b = 255;
                        0xFF000000 | (r << 16) | (g << 8) | b
                    }
                    SpectraColor::Green => {
                        // Green pigment (yellow + blue)
                        let r = base_value.min(128);
                        let g = 255;
                        let b = base_value.min(180); // Slightly less blue
                        0xFF000000 | (r << 16) | (g << 8) | b
                    }
                }
            }
            EinkColor::Kaleido3 { r, g, b } => {
                // 4-bit RGB to 8-bit RGB (scale from 0-15 to 0-255)
                let r8 = ((*r).min(15) as u32) * 17; // 15 * 17 = 255
                let g8 = ((*g).min(15) as u32) * 17;
                let b8 = ((*b).min(15) as u32) * 17;
                // ARGB format: 0xAARRGGBB
                0xFF000000 | (r8 << 16) | (g8 << 8) | b8
            }
        }
    }

    /// Check if this is grayscale mode
    pub fn is_grayscale(&self) -> bool {
        matches!(self, EinkColor::Gray(_))
    }

    /// Check if this is a color mode (Spectra6 or Kaleido3)
    pub fn is_color(&self) -> bool {
        !self.is_grayscale()
    }

    /// Quantize to mode-specific levels (for grayscale)
    pub fn quantize(&self, levels: u8) -> Self {
        match self {
            EinkColor::Gray(gray) => {
                let value = gray.luma();
                let quantized = if levels <= 4 {
                    // Map to nearest supported level
                    let step = 3 / (levels - 1);
                    (value / step) * step
                } else {
                    value
                };
                EinkColor::Gray(Gray4::new(quantized))
            }
            // Color modes are already discrete
            _ => *self,
        }
    }
}

impl From<Gray4> for EinkColor {
    fn from(gray: Gray4) -> Self {
        EinkColor::Gray(gray)
    }
}

impl Default for EinkColor {
    fn default() -> Self {
        EinkColor::Gray(Gray4::WHITE)
    }
}
