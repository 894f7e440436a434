// src/ui/components/marquee.rs
//! Self-scrolling single-line text label

use alloc::string::String;
use embassy_time::{Duration, Instant};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::{debug, trace, warn};

use crate::config::{ConfigError, MarqueeConfig};
use crate::scheduler::StepQueue;
use crate::ui::components::text::TextSize;
use crate::ui::core::{Drawable, MeasureSpec, TextDisplay, Truncation};
use crate::ui::styling::{Style, TEXT_PRIMARY};

/// Delay used instead of a zero pause so the step queue always moves forward.
const MIN_STEP_DELAY: Duration = Duration::from_millis(1);

/// Round a non-negative pixel offset to the nearest whole pixel.
fn round_px(offset: f32) -> i32 {
    (offset + 0.5) as i32
}

/// Single-line text label that scrolls when its text does not fit
///
/// The label decides lazily, on the first draw after its text, separator,
/// font or layout width changed, whether the text is wider than the space it
/// was given. If so it switches to marquee mode: the displayed text becomes
/// `text + separator + text`, alignment is dropped, and the visible window
/// advances by `speed` pixels every tick. After one full `text + separator`
/// cycle the window jumps back by that width, which looks identical, and
/// holds still for the configured pause. Text that fits is drawn once, with
/// the alignment the label was built with.
///
/// Animation runs on the label's own [`StepQueue`]; the host only has to
/// call [`update`](Self::update) every frame and redraw when the label is
/// dirty.
///
/// # Examples
/// ```ignore
/// let mut label = MarqueeLabel::new(
///     Rectangle::new(Point::new(10, 10), Size::new(120, 12)),
///     "Now playing: a rather long track title",
///     TextSize::Medium,
///     &MarqueeConfig::default(),
/// );
///
/// loop {
///     label.update(now());
///     if label.is_dirty() {
///         label.draw(&mut display)?;
///         label.mark_clean();
///     }
/// }
/// ```
#[derive(Debug)]
pub struct MarqueeLabel {
    bounds: Rectangle,
    size: TextSize,
    style: Style,

    /// Text as set by the caller, never doubled
    original: String,
    /// Text actually rendered
    display: String,
    separator: String,

    current_scroll_x: f32,
    scroll_x: i32,
    speed: u32,
    tick_interval: Duration,
    pause: Duration,

    text_width: u32,
    separator_width: u32,
    loop_reset_width: u32,

    /// Cooperative stop flag checked by every step
    stopped: bool,
    /// First step still to be posted, relative to the next `update` time
    start_pending: bool,
    /// Display text is currently the doubled marquee text
    marquee_active: bool,
    measured: bool,
    max_width: Option<u32>,

    original_alignment: Alignment,
    alignment: Option<Alignment>,
    visible: bool,

    queue: StepQueue,
    dirty: bool,
}

impl MarqueeLabel {
    /// Create a label laid out to exactly fit `bounds`.
    ///
    /// The configuration is read once. Zero speed or tick interval are
    /// clamped to their minimum; use [`try_new`](Self::try_new) to reject
    /// them instead.
    pub fn new(bounds: Rectangle, text: &str, size: TextSize, config: &MarqueeConfig) -> Self {
        let mut label = Self {
            bounds,
            size,
            style: Style::default(),
            original: String::new(),
            display: String::new(),
            separator: config.separator.to_text(),
            current_scroll_x: 0.0,
            scroll_x: 0,
            speed: 1,
            tick_interval: MIN_STEP_DELAY,
            pause: Duration::from_millis(config.pause_ms as u64),
            text_width: 0,
            separator_width: 0,
            loop_reset_width: 0,
            stopped: true,
            start_pending: false,
            marquee_active: false,
            measured: false,
            max_width: None,
            original_alignment: Alignment::Left,
            alignment: Some(Alignment::Left),
            visible: true,
            queue: StepQueue::new(),
            dirty: true,
        };

        label.set_speed(config.speed_px());
        label.set_tick_interval(Duration::from_millis(config.tick_interval_ms as u64));
        label.set_text(text);
        label.on_measure(MeasureSpec::Exactly(label.content_width()));
        label
    }

    /// Create a label after validating `config`.
    pub fn try_new(
        bounds: Rectangle,
        text: &str,
        size: TextSize,
        config: &MarqueeConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(bounds, text, size, config))
    }

    /// Set the alignment used whenever the text fits.
    ///
    /// This is the alignment restored after scrolling turns out to be
    /// unnecessary.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.original_alignment = alignment;
        self.alignment = Some(alignment);
        self.measured = false;
        self.dirty = true;
        self
    }

    /// Set the style. Padding shrinks the width available to the text.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self.on_measure(MeasureSpec::Exactly(self.content_width()));
        self.dirty = true;
        self
    }

    // ------------------------------------------------------------------
    // Text, separator and font
    // ------------------------------------------------------------------

    /// Replace the text.
    ///
    /// Stops any animation, resets the scroll offset and defers the
    /// scroll-or-not decision to the next draw.
    pub fn set_text(&mut self, text: &str) {
        self.original.clear();
        self.original.push_str(text);
        self.invalidate_marquee();
    }

    /// Text as set by the caller.
    pub fn text(&self) -> &str {
        &self.original
    }

    /// Text currently rendered; doubled around the separator while scrolling.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Replace the separator placed between looped copies.
    ///
    /// Like [`set_text`](Self::set_text) this stops, resets and forces a
    /// fresh measurement on the next draw.
    pub fn set_separator(&mut self, separator: &str) {
        self.separator.clear();
        self.separator.push_str(separator);
        self.invalidate_marquee();
    }

    pub fn text_size(&self) -> TextSize {
        self.size
    }

    /// Switch font. All cached widths are recomputed.
    pub fn set_text_size(&mut self, size: TextSize) {
        if self.size != size {
            self.size = size;
            self.invalidate_marquee();
        }
    }

    // ------------------------------------------------------------------
    // Animation parameters
    // ------------------------------------------------------------------

    /// Pixels advanced per tick.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        if speed == 0 {
            warn!("Marquee speed of 0 px ignored, using 1 px per tick");
        }
        self.speed = speed.max(1);
    }

    /// Delay between two steps while scrolling.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        if interval.as_ticks() == 0 {
            warn!("Marquee tick interval of 0 ignored, using 1 ms");
        }
        self.tick_interval = interval.max(MIN_STEP_DELAY);
    }

    /// Pause before scrolling starts and at every loop seam.
    pub fn pause(&self) -> Duration {
        self.pause
    }

    pub fn set_pause(&mut self, pause: Duration) {
        self.pause = pause;
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Record the width constraint from a layout pass.
    ///
    /// Never starts scrolling by itself; a changed width only marks the
    /// label for re-evaluation on the next draw.
    pub fn on_measure(&mut self, spec: MeasureSpec) {
        let max_width = spec.max_width();
        if max_width != self.max_width {
            debug!(
                "Marquee layout width {:?} -> {:?}",
                self.max_width, max_width
            );
            self.max_width = max_width;
            self.measured = false;
            self.dirty = true;
        }
    }

    /// Move or resize the label; the new content width becomes an exact
    /// width constraint.
    pub fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.on_measure(MeasureSpec::Exactly(self.content_width()));
        self.dirty = true;
    }

    /// Width constraint from the last layout pass, `None` if unconstrained.
    pub fn max_width(&self) -> Option<u32> {
        self.max_width
    }

    /// Whether the next draw will re-evaluate scrolling.
    pub fn needs_measure(&self) -> bool {
        !self.measured
    }

    // ------------------------------------------------------------------
    // Animation control
    // ------------------------------------------------------------------

    /// Run every step that has come due by `now`.
    ///
    /// A loop started since the last call gets its first step posted here,
    /// one pause after `now`. Returns `true` if the visible scroll position
    /// changed.
    pub fn update(&mut self, now: Instant) -> bool {
        let before = self.scroll_x;
        if self.start_pending {
            self.start_pending = false;
            self.queue.advance_to(now);
            self.queue.post_delayed(self.pause.max(MIN_STEP_DELAY));
            debug!(
                "Marquee first step due at {} ms",
                (now + self.pause.max(MIN_STEP_DELAY)).as_millis()
            );
        }
        while self.queue.poll(now).is_some() {
            self.run_step();
        }
        self.scroll_x != before
    }

    /// Ask the loop to stop.
    ///
    /// A step that is already queued still fires but does nothing and does
    /// not reschedule itself.
    pub fn stop(&mut self) {
        if !self.stopped {
            debug!("Marquee stopped at offset {}", self.scroll_x);
        }
        self.stopped = true;
        self.start_pending = false;
    }

    /// Restart scrolling from offset 0, after the usual pause.
    ///
    /// Only a label that has committed to scrolling restarts; for text
    /// that fits this just resets the offset.
    pub fn start_from_beginning(&mut self) {
        self.reset();
        if self.marquee_active {
            self.start();
        } else {
            debug!("Marquee restart ignored, text fits");
        }
    }

    /// Show or hide the label.
    ///
    /// Hiding stops the loop; showing a scrolling label restarts it from
    /// the beginning.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.start_from_beginning();
        } else {
            self.stop();
        }
        self.dirty = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the animation loop is active.
    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Whether the label committed to marquee mode on its last evaluation.
    pub fn is_scrolling(&self) -> bool {
        self.marquee_active
    }

    /// Accumulated scroll offset in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.current_scroll_x
    }

    /// Horizontal scroll position applied when drawing.
    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }

    /// Current alignment; `None` while scrolling.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn text_width(&self) -> u32 {
        self.text_width
    }

    pub fn separator_width(&self) -> u32 {
        self.separator_width
    }

    /// Distance after which the scrolled pattern repeats.
    pub fn loop_reset_width(&self) -> u32 {
        self.loop_reset_width
    }

    /// Steps waiting in the label's queue, including a stale one after
    /// `stop` and a first step not yet posted by `update`.
    pub fn pending_steps(&self) -> usize {
        self.queue.pending() + usize::from(self.start_pending)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn content_width(&self) -> u32 {
        self.bounds
            .size
            .width
            .saturating_sub(self.style.padding.horizontal())
    }

    fn content_area(&self) -> Rectangle {
        let padding = self.style.padding;
        Rectangle::new(
            self.bounds.top_left + Point::new(padding.left as i32, padding.top as i32),
            Size::new(
                self.content_width(),
                self.bounds.size.height.saturating_sub(padding.vertical()),
            ),
        )
    }

    fn refresh_widths(&mut self) {
        self.text_width = self.size.text_width(&self.original);
        self.separator_width = self.size.text_width(&self.separator);

        let mut cycle = self.original.clone();
        cycle.push_str(&self.separator);
        self.loop_reset_width = self.size.text_width(&cycle);
    }

    /// Text, separator or font changed: drop the doubled text and measure
    /// again on the next draw.
    fn invalidate_marquee(&mut self) {
        self.stop();
        self.display.clone_from(&self.original);
        self.marquee_active = false;
        self.refresh_widths();
        self.reset();
        self.measured = false;
        self.dirty = true;
    }

    fn scroll_to(&mut self, x: i32) {
        if self.scroll_x != x {
            self.scroll_x = x;
            self.dirty = true;
        }
    }

    fn reset(&mut self) {
        self.current_scroll_x = 0.0;
        self.scroll_to(0);
    }

    /// Decide between marquee and static rendering for the current text
    /// and width.
    fn evaluate(&mut self) {
        let overflows = match self.max_width {
            Some(max_width) => self.text_width > max_width,
            None => false,
        };

        if overflows {
            if !self.marquee_active {
                debug!(
                    "Marquee: text {} px exceeds {:?} px, scrolling",
                    self.text_width, self.max_width
                );
                self.init_marquee();
            }
            self.alignment = None;
            if self.stopped {
                self.start();
            }
        } else {
            if self.marquee_active || !self.stopped {
                debug!("Marquee: text {} px fits, static", self.text_width);
                self.stop();
                self.display.clone_from(&self.original);
                self.marquee_active = false;
                self.reset();
            }
            self.alignment = Some(self.original_alignment);
        }
        self.dirty = true;
    }

    fn init_marquee(&mut self) {
        self.refresh_widths();

        self.display.clear();
        self.display.push_str(&self.original);
        self.display.push_str(&self.separator);
        self.display.push_str(&self.original);
        self.marquee_active = true;
    }

    /// Clear the stop flag and drop queued steps; the first step is posted
    /// by the next [`update`](Self::update) so the pause runs from host time.
    fn start(&mut self) {
        self.stopped = false;
        self.queue.remove_callbacks();
        self.start_pending = true;
        debug!("Marquee started, pause {} ms", self.pause.as_millis());
    }

    /// One animation tick.
    fn run_step(&mut self) {
        if self.stopped {
            trace!("Marquee step skipped, loop stopped");
            return;
        }

        self.current_scroll_x += self.speed as f32;
        self.scroll_to(round_px(self.current_scroll_x));

        let reset = self.loop_reset_width as i32;
        if reset > 0 && self.scroll_x > reset {
            // A single step may overshoot by more than one cycle
            let wrapped = (self.scroll_x - reset).rem_euclid(reset);
            self.current_scroll_x = wrapped as f32;
            self.scroll_to(wrapped);
            trace!("Marquee wrapped to {}", wrapped);
            self.queue.post_delayed(self.pause.max(MIN_STEP_DELAY));
            return;
        }

        self.queue.post_delayed(self.tick_interval);
    }

    fn text_anchor(&self, area: Rectangle) -> Point {
        let y = area.top_left.y;
        let x = match self.alignment {
            None | Some(Alignment::Left) => area.top_left.x,
            Some(Alignment::Center) => area.center().x,
            Some(Alignment::Right) => area.top_left.x + area.size.width as i32 - 1,
        };
        Point::new(x - self.scroll_x, y)
    }
}

impl Drawable for MarqueeLabel {
    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        if !self.visible {
            return Ok(());
        }

        if !self.measured {
            self.evaluate();
            self.measured = true;
        }

        if self.style.has_decoration() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let area = self.content_area();
        let color = self.style.foreground_color.unwrap_or(TEXT_PRIMARY);
        let character_style = MonoTextStyle::new(self.size.font(), color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment.unwrap_or(Alignment::Left))
            .baseline(Baseline::Top)
            .build();

        let mut clipped = display.clipped(&area);
        Text::with_text_style(
            &self.display,
            self.text_anchor(area),
            character_style,
            text_style,
        )
        .draw(&mut clipped)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Line count, truncation and single-line settings are fixed for a marquee
/// label; these calls are accepted and ignored.
impl TextDisplay for MarqueeLabel {
    fn set_text(&mut self, text: &str) {
        MarqueeLabel::set_text(self, text);
    }

    fn text(&self) -> &str {
        &self.original
    }

    fn set_max_lines(&mut self, lines: u32) {
        debug!("Marquee ignores max lines ({})", lines);
    }

    fn set_min_lines(&mut self, lines: u32) {
        debug!("Marquee ignores min lines ({})", lines);
    }

    fn set_truncation(&mut self, truncation: Truncation) {
        debug!("Marquee ignores truncation {:?}", truncation);
    }

    fn set_single_line(&mut self, single_line: bool) {
        debug!("Marquee is always single line (asked {})", single_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::{COLOR_SURFACE, Padding};
    use embedded_graphics::mock_display::MockDisplay;

    /// 33 characters, 198 px in the medium font.
    const LONG: &str = "Hello marquee world, this is long";
    /// 20 characters, 120 px in the medium font.
    const SHORT: &str = "Twenty chars exactly";

    fn bounds(width: u32) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(width, 12))
    }

    fn label(width: u32, text: &str, config: &MarqueeConfig) -> MarqueeLabel {
        MarqueeLabel::new(bounds(width), text, TextSize::Medium, config)
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn first_draw(label: &mut MarqueeLabel) {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_out_of_bounds_drawing(true);
        display.set_allow_overdraw(true);
        label.draw(&mut display).unwrap();
    }

    #[test]
    fn test_long_text_starts_scrolling_on_first_draw() {
        let mut label = label(100, LONG, &MarqueeConfig::default());
        assert!(!label.is_running());
        assert_eq!(label.display_text(), LONG);

        first_draw(&mut label);

        assert!(label.is_running());
        assert!(label.is_scrolling());
        assert_eq!(label.alignment(), None);

        let mut expected = String::from(LONG);
        expected.push_str(&" ".repeat(12));
        expected.push_str(LONG);
        assert_eq!(label.display_text(), expected);
        assert_eq!(label.text(), LONG);

        assert_eq!(label.text_width(), 198);
        assert_eq!(label.separator_width(), 72);
        assert_eq!(label.loop_reset_width(), 270);
        assert_eq!(label.pending_steps(), 1);
    }

    #[test]
    fn test_fitting_text_stays_static_with_original_alignment() {
        let mut label =
            label(300, SHORT, &MarqueeConfig::default()).with_alignment(Alignment::Center);
        first_draw(&mut label);

        assert!(!label.is_running());
        assert!(!label.is_scrolling());
        assert_eq!(label.alignment(), Some(Alignment::Center));
        assert_eq!(label.display_text(), SHORT);
        assert_eq!(label.pending_steps(), 0);
    }

    #[test]
    fn test_text_exactly_filling_width_does_not_scroll() {
        let mut label = label(120, SHORT, &MarqueeConfig::default());
        first_draw(&mut label);
        assert!(!label.is_running());
    }

    #[test]
    fn test_unconstrained_layout_never_scrolls() {
        let mut label = label(100, LONG, &MarqueeConfig::default());
        label.on_measure(MeasureSpec::Unspecified);
        assert_eq!(label.max_width(), None);

        first_draw(&mut label);
        assert!(!label.is_running());
        assert_eq!(label.display_text(), LONG);
    }

    #[test]
    fn test_at_most_constraint_is_a_bound() {
        let mut label = label(400, SHORT, &MarqueeConfig::default());
        label.on_measure(MeasureSpec::AtMost(50));
        assert_eq!(label.max_width(), Some(50));

        first_draw(&mut label);
        assert!(label.is_running());
    }

    #[test]
    fn test_padding_reduces_available_width() {
        let style = Style::new().with_padding(Padding::symmetric(0, 10));
        let label = label(130, SHORT, &MarqueeConfig::default()).with_style(style);
        assert_eq!(label.max_width(), Some(110));
    }

    #[test]
    fn test_empty_text_never_scrolls() {
        let mut label = label(10, "", &MarqueeConfig::default());
        first_draw(&mut label);
        assert!(!label.is_running());
        assert_eq!(label.text_width(), 0);
    }

    #[test]
    fn test_decision_is_made_once_per_change() {
        let mut label = label(100, LONG, &MarqueeConfig::default());
        first_draw(&mut label);
        assert!(!label.needs_measure());

        label.stop();
        first_draw(&mut label);
        // No re-measurement, so the stopped loop stays stopped
        assert!(!label.is_running());
    }

    #[test]
    fn test_steps_follow_pause_then_tick_cadence() {
        let config = MarqueeConfig::new()
            .with_speed(1)
            .with_pause_ms(2000)
            .with_tick_interval_ms(10);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));

        assert!(!label.update(at(1999)));
        assert_eq!(label.scroll_x(), 0);

        assert!(label.update(at(2000)));
        assert_eq!(label.scroll_x(), 1);

        label.update(at(2050));
        assert_eq!(label.scroll_x(), 6);
        assert_eq!(label.scroll_offset(), 6.0);
    }

    #[test]
    fn test_wrap_pauses_at_seam() {
        let config = MarqueeConfig::new()
            .with_speed(100)
            .with_pause_ms(2000)
            .with_tick_interval_ms(10);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));

        // Steps at 2000 (100), 2010 (200), 2020 (300 -> wraps to 30)
        label.update(at(2020));
        assert_eq!(label.scroll_x(), 30);
        assert_eq!(label.scroll_offset(), 30.0);

        assert!(!label.update(at(4019)));
        assert_eq!(label.scroll_x(), 30);

        label.update(at(4020));
        assert_eq!(label.scroll_x(), 130);
    }

    #[test]
    fn test_offset_stays_below_loop_width_after_wrap() {
        let config = MarqueeConfig::new()
            .with_speed(1000)
            .with_pause_ms(0)
            .with_tick_interval_ms(10);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));

        // First step overshoots by several cycles: (1000 - 270) mod 270
        label.update(at(1));
        assert_eq!(label.scroll_x(), 190);

        for ms in 2..50 {
            label.update(at(ms));
            let offset = label.scroll_offset();
            assert!(offset >= 0.0);
            assert!(offset < label.loop_reset_width() as f32);
        }
    }

    #[test]
    fn test_first_step_waits_a_full_pause_from_host_time() {
        let config = MarqueeConfig::new()
            .with_speed(1)
            .with_pause_ms(2000)
            .with_tick_interval_ms(10);
        let mut label = label(100, LONG, &config);

        // Drawn before the host ever reported a time
        first_draw(&mut label);
        assert!(label.is_running());

        assert!(!label.update(at(10_001)));
        assert_eq!(label.scroll_x(), 0);
        assert!(!label.update(at(12_000)));

        assert!(label.update(at(12_001)));
        assert_eq!(label.scroll_x(), 1);
    }

    #[test]
    fn test_gap_between_updates_runs_a_single_step() {
        let config = MarqueeConfig::new()
            .with_speed(1)
            .with_pause_ms(0)
            .with_tick_interval_ms(10);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(21));
        assert_eq!(label.scroll_x(), 3);

        // A five second hitch advances one step, not five hundred
        label.update(at(5_021));
        assert_eq!(label.scroll_x(), 4);

        label.update(at(5_031));
        assert_eq!(label.scroll_x(), 5);
    }

    #[test]
    fn test_relayout_restarts_stopped_overflowing_label() {
        let config = MarqueeConfig::new().with_pause_ms(0);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(30));
        label.stop();
        assert!(label.is_scrolling());
        assert!(!label.is_running());

        label.set_bounds(bounds(90));
        first_draw(&mut label);

        assert!(label.is_scrolling());
        assert!(label.is_running());
        assert_eq!(label.pending_steps(), 1);
    }

    #[test]
    fn test_relayout_keeps_running_loop_untouched() {
        let config = MarqueeConfig::new().with_pause_ms(0);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(30));
        let offset = label.scroll_x();

        label.set_bounds(bounds(90));
        first_draw(&mut label);

        assert!(label.is_running());
        assert_eq!(label.scroll_x(), offset);
        assert_eq!(label.pending_steps(), 1);
    }

    #[test]
    fn test_alignment_change_while_scrolling_is_deferred() {
        let mut label = label(100, LONG, &MarqueeConfig::default());
        first_draw(&mut label);

        let mut label = label.with_alignment(Alignment::Center);
        first_draw(&mut label);
        assert_eq!(label.alignment(), None);
        assert!(label.is_running());

        // The new alignment applies once the text fits
        label.set_bounds(bounds(400));
        first_draw(&mut label);
        assert_eq!(label.alignment(), Some(Alignment::Center));
    }

    #[test]
    fn test_set_pause_applies_to_next_start() {
        let config = MarqueeConfig::new().with_speed(1).with_pause_ms(2000);
        let mut label = label(100, LONG, &config);
        label.set_pause(Duration::from_millis(500));
        assert_eq!(label.pause(), Duration::from_millis(500));

        first_draw(&mut label);
        label.update(at(0));
        assert!(!label.update(at(499)));
        assert!(label.update(at(500)));
        assert_eq!(label.scroll_x(), 1);
    }

    #[test]
    fn test_stop_leaves_one_stale_noop_step() {
        let config = MarqueeConfig::new().with_speed(1).with_pause_ms(0);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(31));
        let offset = label.scroll_x();
        assert!(offset > 0);

        label.stop();
        assert!(!label.is_running());
        assert_eq!(label.pending_steps(), 1);

        assert!(!label.update(at(10_000)));
        assert_eq!(label.scroll_x(), offset);
        assert_eq!(label.pending_steps(), 0);
    }

    #[test]
    fn test_set_text_twice_resets_and_waits_for_draw() {
        let config = MarqueeConfig::new().with_pause_ms(0);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(40));
        assert!(label.scroll_x() > 0);

        label.set_text(LONG);
        assert_eq!(label.scroll_offset(), 0.0);
        assert_eq!(label.scroll_x(), 0);
        assert!(!label.is_running());

        label.set_text(LONG);
        assert_eq!(label.scroll_offset(), 0.0);
        assert!(!label.is_running());
        assert!(label.needs_measure());
        assert_eq!(label.display_text(), LONG);

        first_draw(&mut label);
        assert!(label.is_running());
    }

    #[test]
    fn test_separator_change_stops_and_remeasures() {
        let config = MarqueeConfig::new().with_pause_ms(0);
        let mut label = label(100, "Hello there, general marquee", &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(25));
        assert!(label.scroll_x() > 0);

        label.set_separator("--");
        assert_eq!(label.separator(), "--");
        assert!(!label.is_running());
        assert_eq!(label.scroll_offset(), 0.0);
        assert!(label.needs_measure());

        first_draw(&mut label);
        assert_eq!(
            label.display_text(),
            "Hello there, general marquee--Hello there, general marquee"
        );
        assert_eq!(label.separator_width(), 12);
    }

    #[test]
    fn test_custom_separator_from_config() {
        let config = MarqueeConfig::new().with_separator_text(" * ");
        let mut label = label(20, "Hello", &config);
        first_draw(&mut label);
        assert_eq!(label.display_text(), "Hello * Hello");
        assert_eq!(label.loop_reset_width(), 48);
    }

    #[test]
    fn test_layout_growth_turns_scrolling_off() {
        let mut label = label(100, LONG, &MarqueeConfig::default())
            .with_alignment(Alignment::Right);
        first_draw(&mut label);
        assert!(label.is_running());

        label.set_bounds(bounds(400));
        assert!(label.needs_measure());
        first_draw(&mut label);

        assert!(!label.is_running());
        assert!(!label.is_scrolling());
        assert_eq!(label.display_text(), LONG);
        assert_eq!(label.alignment(), Some(Alignment::Right));
        assert_eq!(label.scroll_x(), 0);
    }

    #[test]
    fn test_font_change_remeasures() {
        let mut label = label(60, "Hello", &MarqueeConfig::default());
        first_draw(&mut label);
        assert!(!label.is_running());

        label.set_text_size(TextSize::Large);
        assert_eq!(label.text_width(), 50);
        label.set_text("Hello!!");
        first_draw(&mut label);
        assert!(label.is_running());
    }

    #[test]
    fn test_visibility_restarts_from_beginning() {
        let config = MarqueeConfig::new().with_pause_ms(0);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.update(at(50));
        assert!(label.scroll_x() > 0);

        label.set_visible(false);
        assert!(!label.is_running());

        label.set_visible(true);
        assert!(label.is_running());
        assert_eq!(label.scroll_x(), 0);
        assert_eq!(label.pending_steps(), 1);
    }

    #[test]
    fn test_start_from_beginning_ignored_for_static_text() {
        let mut label = label(300, SHORT, &MarqueeConfig::default());
        first_draw(&mut label);
        label.start_from_beginning();
        assert!(!label.is_running());
        assert_eq!(label.pending_steps(), 0);
    }

    #[test]
    fn test_runtime_setters_clamp_zero() {
        let mut label = label(100, LONG, &MarqueeConfig::default());
        label.set_speed(0);
        assert_eq!(label.speed(), 1);
        label.set_speed(4);
        assert_eq!(label.speed(), 4);

        label.set_tick_interval(Duration::from_millis(0));
        assert_eq!(label.tick_interval(), Duration::from_millis(1));
        label.set_tick_interval(Duration::from_millis(16));
        assert_eq!(label.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let config = MarqueeConfig::new().with_tick_interval_ms(0);
        let result = MarqueeLabel::try_new(bounds(100), LONG, TextSize::Medium, &config);
        assert_eq!(result.err(), Some(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_text_display_overrides_are_ignored() {
        let mut label = label(100, LONG, &MarqueeConfig::default());
        first_draw(&mut label);
        let display_before = String::from(label.display_text());

        let facade: &mut dyn TextDisplay = &mut label;
        facade.set_max_lines(3);
        facade.set_min_lines(2);
        facade.set_truncation(Truncation::End);
        facade.set_single_line(false);
        assert_eq!(facade.text(), LONG);

        assert_eq!(label.display_text(), display_before);
        assert!(label.is_running());
    }

    #[test]
    fn test_steps_mark_label_dirty() {
        let config = MarqueeConfig::new().with_pause_ms(0);
        let mut label = label(100, LONG, &config);
        first_draw(&mut label);
        label.update(at(0));
        label.mark_clean();
        assert!(label.dirty_region().is_none());

        label.update(at(20));
        assert!(label.is_dirty());
        assert_eq!(label.dirty_region().map(|r| r.bounds), Some(bounds(100)));
    }

    #[test]
    fn test_draw_stays_inside_bounds() {
        let bounds = Rectangle::new(Point::new(4, 4), Size::new(40, 12));
        let style = Style::new()
            .with_background(COLOR_SURFACE)
            .with_padding(Padding::all(1));
        let mut label = MarqueeLabel::new(bounds, LONG, TextSize::Medium, &MarqueeConfig::default())
            .with_style(style);

        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        label.draw(&mut display).unwrap();

        assert!(label.is_running());
        assert_eq!(display.affected_area(), bounds);
    }

    #[test]
    fn test_hidden_label_draws_nothing() {
        let mut label = label(40, "Hi", &MarqueeConfig::default());
        label.set_visible(false);

        let mut display = MockDisplay::<Rgb565>::new();
        label.draw(&mut display).unwrap();
        assert_eq!(display.affected_area().size, Size::zero());
    }

    #[test]
    fn test_right_aligned_text_hugs_right_edge() {
        let mut label = label(60, "Hi", &MarqueeConfig::default()).with_alignment(Alignment::Right);

        let mut display = MockDisplay::<Rgb565>::new();
        label.draw(&mut display).unwrap();

        let area = display.affected_area();
        assert!(area.size.width > 0);
        assert!(area.top_left.x >= 48);
        assert!(area.top_left.x + area.size.width as i32 <= 60);
    }
}
