//! Construction-time configuration for [`MarqueeLabel`](crate::ui::MarqueeLabel)
//!
//! A [`MarqueeConfig`] is read exactly once, when the label is built. It can
//! be persisted in a compact binary form with `postcard`, so a device can keep
//! per-label settings next to its other stored state.
//!
//! # Examples
//!
//! ```ignore
//! let config = MarqueeConfig::new()
//!     .with_separator_text(" * ")
//!     .with_pause_ms(1500);
//!
//! let bytes = config.to_bytes()?;
//! let restored = MarqueeConfig::from_bytes(&bytes)?;
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Number of spaces used as separator when none is configured.
pub const DEFAULT_SEPARATOR_LENGTH: u16 = 12;

/// Base scroll speed in pixels per tick, before density scaling.
pub const DEFAULT_SPEED: f32 = 0.5;

/// Pause before scrolling starts and at every loop seam.
pub const DEFAULT_PAUSE_MS: u32 = 2000;

/// Delay between two animation steps.
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 10;

/// Error types for configuration handling
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Explicit speed of zero would never move the text
    #[error("Scroll speed must be at least 1 px per tick")]
    ZeroSpeed,

    /// Tick interval of zero would spin the step queue
    #[error("Tick interval must be at least 1 ms")]
    ZeroTickInterval,

    /// Density is used to scale the default speed
    #[error("Display density must be positive and finite (got {density})")]
    InvalidDensity {
        /// The rejected density
        density: f32,
    },

    /// Serialization into the persisted form failed
    #[error("Failed to encode marquee configuration")]
    Encode,

    /// The persisted form could not be decoded
    #[error("Failed to decode marquee configuration")]
    Decode,
}

/// Text inserted between the two looped copies of the label text.
///
/// The two forms are mutually exclusive: either an explicit string, or a
/// number of space characters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Separator {
    /// Explicit separator text, used verbatim
    Text(String),
    /// A run of `n` spaces
    Spaces(u16),
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Spaces(DEFAULT_SEPARATOR_LENGTH)
    }
}

impl Separator {
    /// Expand the separator into the string that is placed between copies.
    pub fn to_text(&self) -> String {
        match self {
            Separator::Text(text) => text.clone(),
            Separator::Spaces(count) => " ".repeat(*count as usize),
        }
    }
}

/// Marquee label configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MarqueeConfig {
    /// Separator between looped copies
    pub separator: Separator,

    /// Pixels advanced per tick; `None` derives it from `density`
    pub speed: Option<u32>,

    /// Display density used to scale [`DEFAULT_SPEED`]
    pub density: f32,

    /// Pause before the first step and after each completed loop
    pub pause_ms: u32,

    /// Delay between two steps while scrolling
    pub tick_interval_ms: u32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            speed: None,
            density: 1.0,
            pause_ms: DEFAULT_PAUSE_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl MarqueeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit separator string.
    pub fn with_separator_text(mut self, text: &str) -> Self {
        self.separator = Separator::Text(String::from(text));
        self
    }

    /// Use a run of `count` spaces as separator.
    pub fn with_separator_length(mut self, count: u16) -> Self {
        self.separator = Separator::Spaces(count);
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_pause_ms(mut self, pause_ms: u32) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u32) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Effective speed in pixels per tick.
    ///
    /// An explicit speed wins; otherwise [`DEFAULT_SPEED`] is scaled by the
    /// display density and rounded, with a floor of one pixel.
    pub fn speed_px(&self) -> u32 {
        match self.speed {
            Some(speed) => speed,
            None => ((DEFAULT_SPEED * self.density + 0.5) as u32).max(1),
        }
    }

    /// Check the configuration for values the label cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed == Some(0) {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidDensity {
                density: self.density,
            });
        }
        Ok(())
    }

    /// Serialize into the persisted byte form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encode)
    }

    /// Decode and validate a persisted configuration.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}
