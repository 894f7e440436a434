//! Cooperative delayed-step queue
//!
//! Animation in this crate never runs on its own thread. A component posts
//! its next step with a delay, and the host loop hands the queue the current
//! time once per frame. [`StepQueue::poll`] then yields every deadline that
//! has come due, oldest first, so the component can run one step per yield.
//!
//! The queue keeps its own virtual clock. When a deadline fires on time the
//! clock jumps to that deadline, not to the frame time, so follow-up posts
//! are spaced from the moment the step was due. This keeps the step cadence
//! independent of the frame rate. A deadline more than [`MAX_CATCH_UP`] late
//! fires once and rebases the clock to the frame time, so a long gap between
//! polls never replays every missed step.
//!
//! Cancellation is cooperative: [`StepQueue::remove_callbacks`] drops pending
//! deadlines, but a component that only flips a "stopped" flag leaves its
//! already-posted step in place and is expected to ignore it when it fires.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use log::{debug, warn};

/// Maximum number of outstanding steps.
///
/// A single label never has more than one step in flight; the slack covers a
/// stale step that has not fired yet when a new one is posted.
pub const STEP_QUEUE_CAPACITY: usize = 4;

/// Lateness beyond which a due step rebases the clock instead of catching up.
pub const MAX_CATCH_UP: Duration = Duration::from_millis(250);

/// Single-threaded delayed-callback queue with a virtual clock
#[derive(Debug, Clone)]
pub struct StepQueue {
    now: Instant,
    pending: Vec<Instant, STEP_QUEUE_CAPACITY>,
}

impl Default for StepQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl StepQueue {
    /// Create an empty queue whose clock starts at zero.
    pub fn new() -> Self {
        Self {
            now: Instant::from_ticks(0),
            pending: Vec::new(),
        }
    }

    /// Current time of the queue's clock.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Number of steps waiting to fire.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward to `now`. The clock never runs backwards.
    pub fn advance_to(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Schedule a step `delay` after the queue's current time.
    pub fn post_delayed(&mut self, delay: Duration) {
        let deadline = self.now + delay;
        if self.pending.push(deadline).is_err() {
            warn!(
                "Step queue full ({} pending), dropping step due at {} ms",
                STEP_QUEUE_CAPACITY,
                deadline.as_millis()
            );
        }
    }

    /// Drop every pending step.
    pub fn remove_callbacks(&mut self) {
        self.pending.clear();
    }

    /// Pop the earliest deadline at or before `now`.
    ///
    /// On a hit the clock moves to the popped deadline, or to `now` when the
    /// deadline is more than [`MAX_CATCH_UP`] late. Once nothing is due the
    /// clock moves to `now` and `None` is returned.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        let due = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, deadline)| **deadline <= now)
            .min_by_key(|(_, deadline)| **deadline)
            .map(|(index, _)| index);

        match due {
            Some(index) => {
                let deadline = self.pending.swap_remove(index);
                let lateness = now.duration_since(deadline);
                if lateness > MAX_CATCH_UP {
                    debug!("Step {} ms late, rebasing clock", lateness.as_millis());
                    self.advance_to(now);
                } else {
                    self.advance_to(deadline);
                }
                Some(deadline)
            }
            None => {
                self.advance_to(now);
                None
            }
        }
    }
}
