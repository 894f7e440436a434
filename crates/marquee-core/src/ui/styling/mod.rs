//! Styling for marquee components
//!
//! - [`colors`] - RGB565 color constants
//! - [`layout`] - Padding around content
//! - [`style`] - Style configuration for a component

pub mod colors;
pub mod layout;
pub mod style;

pub use colors::{COLOR_BACKGROUND, COLOR_STROKE, COLOR_SURFACE, TEXT_PRIMARY, TEXT_SECONDARY};
pub use layout::Padding;
pub use style::Style;
