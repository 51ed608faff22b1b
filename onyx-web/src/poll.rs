//! Cancellable fixed-interval polling.
//!
//! Pages hold a [`PollHandle`] in component state and drop it on teardown;
//! the underlying timer is cleared on drop, so a view switch can never leak
//! an interval that keeps fetching into a dead view.

use gloo_timers::callback::Interval;

/// A running polling subscription. Dropping it stops the timer.
pub struct PollHandle {
    interval: Option<Interval>,
    period_secs: u32,
}

impl PollHandle {
    /// Start invoking `callback` every `period_secs` seconds.
    pub fn start<F>(period_secs: u32, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            interval: Some(Interval::new(period_secs.saturating_mul(1000), callback)),
            period_secs,
        }
    }

    /// The configured period in seconds.
    #[must_use]
    pub fn period_secs(&self) -> u32 {
        self.period_secs
    }

    /// Stop polling. Equivalent to dropping the handle.
    pub fn cancel(mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }
}

impl std::fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandle")
            .field("period_secs", &self.period_secs)
            .field("running", &self.interval.is_some())
            .finish()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn start_reports_period() {
        let handle = PollHandle::start(30, || {});
        assert_eq!(handle.period_secs(), 30);
        handle.cancel();
    }

    #[wasm_bindgen_test]
    fn dropped_handle_stops_firing() {
        let fired = Rc::new(Cell::new(0_u32));
        let counter = fired.clone();
        let handle = PollHandle::start(1, move || counter.set(counter.get() + 1));
        drop(handle);
        // The timer was cleared before it could ever fire.
        assert_eq!(fired.get(), 0);
    }
}
