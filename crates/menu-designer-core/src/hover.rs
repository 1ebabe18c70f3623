//! Single-slot hover-intent timer.
//!
//! Every hover transition goes through one slot per menu: scheduling always
//! cancels whatever is pending, so rapid enter/leave sequences never leave two
//! actions queued. The last event wins.

use crate::platform::HoverScheduler;
use crate::types::HoverAction;

pub struct HoverTimer<S: HoverScheduler> {
    scheduler: S,
    pending: Option<(HoverAction, S::Handle)>,
}

impl<S: HoverScheduler> HoverTimer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Schedule `action`, cancelling any pending one first.
    pub fn set(&mut self, action: HoverAction, delay_ms: u32) {
        self.clear();
        let handle = self.scheduler.schedule(action, delay_ms);
        tracing::trace!(?action, delay_ms, "hover timer set");
        self.pending = Some((action, handle));
    }

    /// Cancel the pending action, if any.
    pub fn clear(&mut self) {
        if let Some((action, handle)) = self.pending.take() {
            tracing::trace!(?action, "hover timer cleared");
            self.scheduler.cancel(handle);
        }
    }

    /// Empty the slot for a timer that has just fired.
    ///
    /// Returns the action that was pending. The handle is dropped without
    /// cancelling since it already ran.
    pub fn release(&mut self) -> Option<HoverAction> {
        self.pending.take().map(|(action, _)| action)
    }

    pub fn pending(&self) -> Option<HoverAction> {
        self.pending.as_ref().map(|(action, _)| *action)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
