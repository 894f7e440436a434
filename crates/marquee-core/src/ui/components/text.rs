// src/ui/components/text.rs
//! Text sizing and measurement

use embedded_graphics::mono_font::{MonoFont, ascii::FONT_5X8, ascii::FONT_6X10, ascii::FONT_10X20};

/// Text size variants
///
/// Provides three preset text sizes with corresponding embedded-graphics fonts:
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        }
    }

    /// Rendered width of `text` in pixels under this font.
    ///
    /// Mono fonts advance by the character cell plus the font's spacing, with
    /// no spacing after the last glyph.
    pub fn text_width(&self, text: &str) -> u32 {
        let font = self.font();
        let count = text.chars().count() as u32;
        if count == 0 {
            return 0;
        }
        count * font.character_size.width + (count - 1) * font.character_spacing
    }

    /// Height of one line of text in pixels.
    pub fn line_height(&self) -> u32 {
        self.font().character_size.height
    }
}
