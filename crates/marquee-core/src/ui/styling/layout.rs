//! Layout primitives

/// Padding around an element (top, right, bottom, left)
///
/// # Examples
///
/// ```ignore
/// let p = Padding::all(4);
/// let p = Padding::symmetric(2, 6);
/// let total_width = p.horizontal();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Equal padding on all four sides.
    pub const fn all(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    pub const fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left + right.
    pub const fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// Top + bottom.
    pub const fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}
