//! UI components library

pub mod marquee;
pub mod text;

pub use marquee::MarqueeLabel;
pub use text::TextSize;
