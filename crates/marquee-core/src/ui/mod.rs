// src/ui/mod.rs
//! Marquee UI system for embedded displays
//!
//! This module provides:
//! - Core traits for drawable elements and text displays
//! - The layout width constraint ([`MeasureSpec`]) handed to components
//! - Text sizing and measurement helpers
//! - The self-scrolling [`MarqueeLabel`] component
//! - A small styling layer (colors, padding, style)

pub mod components;
pub mod core;
pub mod styling;

// Re-export commonly used items
pub use components::{MarqueeLabel, TextSize};
pub use core::{DirtyRegion, Drawable, MeasureSpec, TextDisplay, Truncation};
pub use styling::{Padding, Style};
