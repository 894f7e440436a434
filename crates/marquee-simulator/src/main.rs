//! Desktop simulator for the marquee-rs scrolling label.
//!
//! Renders a handful of marquee-core labels in an SDL2 window via
//! `embedded-graphics-simulator` and drives their step queues from the
//! window's frame loop.
//!
//! # Key bindings
//!
//! | Key | Action                                   |
//! |-----|------------------------------------------|
//! | R   | Restart the headline from the beginning |
//! | S   | Cycle the headline separator             |
//! | T   | Toggle headline between long/short text  |
//! | V   | Toggle headline visibility               |
//! | +/- | Headline speed up / down                 |
//! | P   | Toggle headline pause (short/long)       |
//! | Q   | Quit                                     |

use std::time::{Duration, Instant as StdInstant};

use embassy_time::{Duration as StepDuration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::info;

use marquee_core::ui::styling::{COLOR_BACKGROUND, COLOR_STROKE, COLOR_SURFACE, TEXT_SECONDARY};
use marquee_core::ui::{Drawable, MarqueeLabel, Padding, Style, TextSize};
use marquee_core::MarqueeConfig;

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 240;
const DISPLAY_HEIGHT_PX: u32 = 135;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~60 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(16);

const LONG_HEADLINE: &str = "Breaking: marquee labels now loop seamlessly on tiny displays";
const SHORT_HEADLINE: &str = "All quiet";

/// Headline pause presets toggled with `P`.
const LONG_PAUSE: StepDuration = StepDuration::from_millis(2000);
const SHORT_PAUSE: StepDuration = StepDuration::from_millis(500);

const SEPARATORS: [&str; 3] = ["            ", "  --  ", " * "];

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Labels shown in the window.
struct Scene {
    headline: MarqueeLabel,
    status: MarqueeLabel,
    ticker: MarqueeLabel,
    separator_index: usize,
    long_headline: bool,
}

impl Scene {
    fn new() -> Self {
        let card = Style::new()
            .with_background(COLOR_SURFACE)
            .with_border(COLOR_STROKE, 1)
            .with_padding(Padding::symmetric(4, 6));

        let headline = MarqueeLabel::new(
            Rectangle::new(Point::new(10, 10), Size::new(220, 30)),
            LONG_HEADLINE,
            TextSize::Large,
            &MarqueeConfig::new().with_density(2.0),
        )
        .with_style(card);

        let status = MarqueeLabel::new(
            Rectangle::new(Point::new(10, 52), Size::new(220, 18)),
            "Static: this fits",
            TextSize::Medium,
            &MarqueeConfig::default(),
        )
        .with_alignment(Alignment::Center)
        .with_style(card);

        let ticker = MarqueeLabel::new(
            Rectangle::new(Point::new(10, 82), Size::new(150, 18)),
            "AAPL 231.40  MSFT 422.10  NVDA 118.25  TSLA 244.70",
            TextSize::Medium,
            &MarqueeConfig::new()
                .with_separator_text(" -- ")
                .with_speed(1)
                .with_pause_ms(500)
                .with_tick_interval_ms(20),
        )
        .with_style(card.with_foreground(TEXT_SECONDARY));

        Self {
            headline,
            status,
            ticker,
            separator_index: 0,
            long_headline: true,
        }
    }

    fn labels_mut(&mut self) -> [&mut MarqueeLabel; 3] {
        [&mut self.headline, &mut self.status, &mut self.ticker]
    }

    fn handle_key(&mut self, keycode: Keycode) {
        let headline = &mut self.headline;
        match keycode {
            Keycode::R => {
                info!("Restarting headline");
                headline.start_from_beginning();
            }
            Keycode::S => {
                self.separator_index = (self.separator_index + 1) % SEPARATORS.len();
                let separator = SEPARATORS[self.separator_index];
                info!("Separator -> {:?}", separator);
                headline.set_separator(separator);
            }
            Keycode::T => {
                self.long_headline = !self.long_headline;
                let text = if self.long_headline {
                    LONG_HEADLINE
                } else {
                    SHORT_HEADLINE
                };
                info!("Headline -> {:?}", text);
                headline.set_text(text);
            }
            Keycode::V => {
                let visible = !headline.is_visible();
                info!("Headline visible: {}", visible);
                headline.set_visible(visible);
            }
            Keycode::Plus | Keycode::Equals | Keycode::KpPlus => {
                headline.set_speed(headline.speed() + 1);
                info!("Headline speed {} px/tick", headline.speed());
            }
            Keycode::Minus | Keycode::KpMinus => {
                headline.set_speed(headline.speed().saturating_sub(1).max(1));
                info!("Headline speed {} px/tick", headline.speed());
            }
            Keycode::P => {
                let pause = if headline.pause() == LONG_PAUSE {
                    SHORT_PAUSE
                } else {
                    LONG_PAUSE
                };
                headline.set_pause(pause);
                info!("Headline pause {} ms", pause.as_millis());
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting marquee simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: R=Restart  S=Separator  T=Text  V=Visibility  +/-=Speed  P=Pause  Q=Quit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Marquee Simulator", &output_settings);

    let mut scene = Scene::new();
    let started = StdInstant::now();
    let now = || Instant::from_millis(started.elapsed().as_millis() as u64);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(COLOR_BACKGROUND);
    for label in scene.labels_mut() {
        let _ = label.draw(&mut display);
        label.mark_clean();
    }
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = StdInstant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    scene.handle_key(keycode);
                }
                _ => {}
            }
        }

        // --- Animation steps ----------------------------------------------
        let frame_now = now();
        for label in scene.labels_mut() {
            label.update(frame_now);
        }

        // --- Render -------------------------------------------------------
        for label in scene.labels_mut() {
            if label.is_dirty() {
                let _ = display.fill_solid(&label.bounds(), COLOR_BACKGROUND);
                if let Err(e) = label.draw(&mut display) {
                    log::error!("Draw error: {:?}", e);
                }
                label.mark_clean();
            }
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
