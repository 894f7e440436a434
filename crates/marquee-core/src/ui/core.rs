// src/ui/core.rs
//! Core UI traits and types for the marquee UI system

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Width constraint handed to a component by the layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The parent imposes no width limit
    Unspecified,
    /// The component may be at most this wide
    AtMost(u32),
    /// The component is exactly this wide
    Exactly(u32),
}

impl MeasureSpec {
    /// Effective maximum width, `None` when unconstrained.
    pub fn max_width(&self) -> Option<u32> {
        match self {
            MeasureSpec::Unspecified => None,
            MeasureSpec::AtMost(width) | MeasureSpec::Exactly(width) => Some(*width),
        }
    }
}

/// Truncation modes a generic text display might offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    /// Cut the text at the edge
    Clip,
    /// Replace the tail with an ellipsis
    End,
    /// Replace the middle with an ellipsis
    Middle,
    /// Scroll the text horizontally
    Marquee,
}

/// Dirty region tracking for efficient rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
    pub is_dirty: bool,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            is_dirty: true,
        }
    }
}

/// Trait for any UI element that can be drawn
///
/// `draw` takes `&mut self`: components may settle layout-dependent
/// decisions lazily on the first draw after a change.
pub trait Drawable {
    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);

    /// Get the dirty region for partial updates
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Text-display capability shared by text components
///
/// Implementors that only support a subset of these settings (for example a
/// single-line scrolling label) accept the calls and ignore them.
pub trait TextDisplay {
    /// Replace the displayed text
    fn set_text(&mut self, text: &str);

    /// Text as set by the caller
    fn text(&self) -> &str;

    /// Limit the number of rendered lines
    fn set_max_lines(&mut self, lines: u32);

    /// Reserve space for at least this many lines
    fn set_min_lines(&mut self, lines: u32);

    /// Choose how overflowing text is cut
    fn set_truncation(&mut self, truncation: Truncation);

    /// Force all text onto one line
    fn set_single_line(&mut self, single_line: bool);
}
