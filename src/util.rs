use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glib::SourceId;

/// Decelerating ease shared by the progress-fill and scroll-to-top
/// animations.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Owner of at most one live timer handle.
///
/// Arming hands back the previous handle so the caller can cancel it;
/// whatever the arming order, a slot never tracks two handles at once.
#[derive(Debug)]
pub struct TimerSlot<T> {
    handle: Option<T>,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<T> TimerSlot<T> {
    #[must_use = "the returned handle is still live and must be cancelled"]
    pub fn arm(&mut self, handle: T) -> Option<T> {
        self.handle.replace(handle)
    }

    pub fn disarm(&mut self) -> Option<T> {
        self.handle.take()
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

/// Trailing-edge debouncer over the glib main loop.
///
/// Scheduling always removes the pending source first, so at most one
/// deferred call is ever outstanding.
pub struct Debouncer {
    wait: Duration,
    pending: Rc<RefCell<TimerSlot<SourceId>>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: Rc::new(RefCell::new(TimerSlot::default())),
        }
    }

    pub fn call<F: FnOnce() + 'static>(&self, f: F) {
        if let Some(id) = self.pending.borrow_mut().disarm() {
            id.remove();
        }
        let pending = Rc::clone(&self.pending);
        let id = glib::timeout_add_local_once(self.wait, move || {
            pending.borrow_mut().disarm();
            f();
        });
        if let Some(stale) = self.pending.borrow_mut().arm(id) {
            stale.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // decelerating: front-loaded progress
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_timer_slot_arms_at_most_one_handle() {
        let mut slot: TimerSlot<u32> = TimerSlot::default();
        assert!(!slot.is_armed());
        assert_eq!(slot.arm(1), None);

        // a second start yields the first handle back for cancellation
        let stale = slot.arm(2);
        assert_eq!(stale, Some(1));
        assert!(slot.is_armed());

        assert_eq!(slot.disarm(), Some(2));
        assert!(!slot.is_armed());
        assert_eq!(slot.disarm(), None);
    }

    #[test]
    fn test_timer_slot_stop_start_cycle() {
        // the cancel-then-start discipline: every start disarms first, so
        // repeated cycles never accumulate handles
        let mut slot: TimerSlot<u32> = TimerSlot::default();
        let mut cancelled = Vec::new();
        for handle in 10..13 {
            if let Some(old) = slot.disarm() {
                cancelled.push(old);
            }
            assert_eq!(slot.arm(handle), None);
        }
        assert_eq!(cancelled, vec![10, 11]);
        assert_eq!(slot.disarm(), Some(12));
    }
}
