//! Hover-intent timers on `setTimeout`.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use menu_designer_core::{HoverAction, HoverScheduler};

/// `HoverScheduler` backed by `gloo-timers`.
///
/// Each scheduled action becomes a `Timeout` whose callback hands the action
/// to `deliver`. Dropping or cancelling the handle clears the browser timer.
pub struct TimeoutScheduler {
    deliver: Rc<dyn Fn(HoverAction)>,
}

impl TimeoutScheduler {
    pub fn new(deliver: impl Fn(HoverAction) + 'static) -> Self {
        Self {
            deliver: Rc::new(deliver),
        }
    }
}

impl HoverScheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&mut self, action: HoverAction, delay_ms: u32) -> Timeout {
        let deliver = Rc::clone(&self.deliver);
        Timeout::new(delay_ms, move || deliver(action))
    }

    fn cancel(&mut self, handle: Timeout) {
        drop(handle.cancel());
    }
}
