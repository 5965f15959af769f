//! Timer-backed scheduler.

use gloo_timers::callback::{Interval, Timeout};
use simple_editor_core::{Callback, Scheduler};

/// Schedules through the window's timer functions.
///
/// Handles are gloo timers, so dropping one clears the underlying timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Interval = Interval;
    type Timeout = Timeout;

    fn interval(&self, period_ms: u32, tick: Callback) -> Interval {
        tracing::debug!(period_ms, "starting interval");
        Interval::new(period_ms, tick)
    }

    fn timeout(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, fire)
    }
}
