//! Hardware-independent core library for marquee-rs
//!
//! This crate contains a self-scrolling ("marquee") single-line text label
//! for `embedded-graphics` displays, together with the cooperative step
//! queue that drives its animation and the configuration it is built from.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod scheduler;
pub mod ui;

pub use config::{ConfigError, MarqueeConfig, Separator};
pub use scheduler::StepQueue;
pub use ui::{MarqueeLabel, MeasureSpec};
