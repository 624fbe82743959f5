use crate::util::ease_out_cubic;
use gtk::prelude::*;
use gtk4 as gtk;
use std::time::{Duration, Instant};

/// Offset past which the back-to-top control appears.
pub const SCROLL_THRESHOLD: f64 = 300.0;

pub const SCROLL_TO_TOP_DURATION: Duration = Duration::from_millis(400);

pub fn back_to_top_visible(offset: f64) -> bool {
    offset > SCROLL_THRESHOLD
}

/// Eased position on the way from `start` to the top.
pub fn position_at(start: f64, elapsed: Duration) -> f64 {
    let t = (elapsed.as_secs_f64() / SCROLL_TO_TOP_DURATION.as_secs_f64()).min(1.0);
    start * (1.0 - ease_out_cubic(t))
}

/// Smoothly animates the vertical adjustment to zero on the frame clock.
pub fn animate_to_top(scrolled: &gtk::ScrolledWindow) {
    let adjustment = scrolled.vadjustment();
    let start = adjustment.value();
    if start <= 0.0 {
        return;
    }
    let begun = Instant::now();
    scrolled.add_tick_callback(move |_, _| {
        let value = position_at(start, begun.elapsed());
        adjustment.set_value(value);
        if value <= 0.0 {
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });
}

/// Jumps the viewport so `target_top` sits just under the header.
pub fn scroll_to(scrolled: &gtk::ScrolledWindow, target_top: f64) {
    let adjustment = scrolled.vadjustment();
    adjustment.set_value(target_top.max(0.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_threshold_is_strict() {
        assert!(!back_to_top_visible(0.0));
        assert!(!back_to_top_visible(300.0));
        assert!(back_to_top_visible(300.1));
    }

    #[test]
    fn test_position_reaches_zero() {
        assert_eq!(position_at(800.0, Duration::ZERO), 800.0);
        assert_eq!(position_at(800.0, SCROLL_TO_TOP_DURATION), 0.0);
        assert_eq!(position_at(800.0, SCROLL_TO_TOP_DURATION * 3), 0.0);
    }

    #[test]
    fn test_position_decreases_monotonically() {
        let mut last = f64::MAX;
        for ms in (0..=400).step_by(40) {
            let v = position_at(600.0, Duration::from_millis(ms));
            assert!(v <= last);
            last = v;
        }
    }
}
