//! Color definitions
//!
//! RGB565 constants for embedded displays with 16-bit color depth.
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Screen background - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Label surface - slightly lighter than background
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Primary text - pure white
pub const TEXT_PRIMARY: Rgb565 = Rgb565::WHITE;

/// Secondary text - light gray
pub const TEXT_SECONDARY: Rgb565 = Rgb565::new(180 >> 3, 186 >> 2, 188 >> 3);
