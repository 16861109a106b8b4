//! CPU-based framebuffer for e-ink simulation
//!
//! Supports both grayscale (Gray4) and tri-color modes (Spectra 6, Kaleido 3).
//! Uses unified EinkColor type for all pixel operations.

use crate::pixel_color::{EinkColor, SpectraColor};
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::GrayColor;

/// Color mode for framebuffer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// Traditional grayscale (4 levels)
    Grayscale,
    /// Spectra 6 (ACeP) - 6 colors with dual-plane
    Spectra6,
    /// Kaleido 3 - 4096 colors via color filter
    Kaleido3,
}

/// CPU-based framebuffer for e-ink simulation
pub struct Framebuffer {
    pub pixels: Vec<EinkColor>,
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
}

impl Framebuffer {
    /// Create new framebuffer filled with white (backward compatibility)
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_color_mode(width, height, ColorMode::Grayscale)
    }

    /// Create framebuffer with specific color mode
    // SAFETY: width * height is a pixel count bounded by display dimensions (~800×480 max),
    // so width * height fits in u32; cast to usize is always safe on 32-bit+ targets.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn with_color_mode(width: u32, height: u32, mode: ColorMode) -> Self {
        let size = (width * height) as usize;
        let default_pixel = match mode {
            ColorMode::Grayscale => EinkColor::Gray(Gray4::WHITE),
            ColorMode::Spectra6 => EinkColor::Spectra6 {
                bw: Gray4::WHITE,
                color: SpectraColor::None,
            },
            ColorMode::Kaleido3 => EinkColor::Kaleido3 {
                r: 15,
                g: 15,
                b: 15,
            }, // White
        };

        Self {
            pixels: vec![default_pixel; size],
            width,
            height,
            color_mode: mode,
        }
    }

    /// Create from Gray4 buffer (backward compatibility)
    pub fn from_gray4(width: u32, height: u32, gray_pixels: Vec<Gray4>) -> Self {
        let pixels = gray_pixels.into_iter().map(EinkColor::from).collect();
        Self {
            pixels,
            width,
            height,
            color_mode: ColorMode::Grayscale,
        }
    }

    /// Set pixel at coordinates
    // SAFETY: x < width and y < height are checked before use; y * width + x is bounded
    // by width * height which fits in u32 for display-sized framebuffers.
    #[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: EinkColor) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) as usize;
            self.pixels[idx] = color;
        }
    }

    /// Get pixel at coordinates
    // SAFETY: x < width and y < height are checked before use; y * width + x is bounded
    // by width * height which fits in u32 for display-sized framebuffers.
    #[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<EinkColor> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Convert to RGBA for display (using EinkColor::to_rgba)
    pub fn to_rgba(&self) -> Vec<u32> {
        self.pixels.iter().map(|color| color.to_rgba()).collect()
    }

    /// Fill entire framebuffer with color
    pub fn fill(&mut self, color: EinkColor) {
        self.pixels.fill(color);
    }

    /// Clear framebuffer (fill with white)
    pub fn clear(&mut self) {
        let white = match self.color_mode {
            ColorMode::Grayscale => EinkColor::Gray(Gray4::WHITE),
            ColorMode::Spectra6 => EinkColor::Spectra6 {
                bw: Gray4::WHITE,
                color: SpectraColor::None,
            },
            ColorMode::Kaleido3 => EinkColor::Kaleido3 {
                r: 15,
                g: 15,
                b: 15,
            },
        };
        self.fill(white);
    }

    /// Convert Gray4 pixel to current color mode's equivalent
    pub fn gray4_to_mode(&self, gray: Gray4) -> EinkColor {
        match self.color_mode {
            ColorMode::Grayscale => EinkColor::Gray(gray),
            ColorMode::Spectra6 => EinkColor::Spectra6 {
                bw: gray,
                color: SpectraColor::None,
            },
            ColorMode::Kaleido3 => {
                // Convert grayscale to RGB
                // SAFETY: luma() returns 0-3; 3 * 5 = 15 which fits in u8.
                #[allow(clippy::arithmetic_side_effects)]
                let value = gray.luma() * 5; // 0-3 → 0-15
                EinkColor::Kaleido3 {
                    r: value,
                    g: value,
                    b: value,
                }
            }
        }
    }
}
