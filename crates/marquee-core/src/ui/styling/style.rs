//! Style configuration for UI elements

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

use super::colors::TEXT_PRIMARY;
use super::layout::Padding;

/// Visual style configuration for a UI element
///
/// # Examples
///
/// ```ignore
/// let style = Style::new()
///     .with_background(COLOR_SURFACE)
///     .with_border(COLOR_STROKE, 1)
///     .with_padding(Padding::symmetric(2, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Background fill color (if any)
    pub background_color: Option<Rgb565>,

    /// Foreground/text color (if any)
    pub foreground_color: Option<Rgb565>,

    /// Border color (if any)
    pub border_color: Option<Rgb565>,

    /// Border width in pixels (0 = no border)
    pub border_width: u32,

    /// Internal padding around content
    pub padding: Padding,
}

impl Default for Style {
    /// White text, no background, no border, no padding
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: Some(TEXT_PRIMARY),
            border_color: None,
            border_width: 0,
            padding: Padding::default(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = Some(color);
        self
    }

    pub fn with_border(mut self, color: Rgb565, width: u32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Whether drawing this style produces any fill or stroke.
    pub fn has_decoration(&self) -> bool {
        self.background_color.is_some() || (self.border_color.is_some() && self.border_width > 0)
    }

    /// Convert to an embedded-graphics primitive style for the background box.
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        if let Some(border) = self.border_color {
            builder = builder
                .stroke_color(border)
                .stroke_width(self.border_width);
        }

        builder.build()
    }
}
