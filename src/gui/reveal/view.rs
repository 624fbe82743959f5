use super::model::{Bounds, RevealSurface, RevealTiming};
use gtk::prelude::*;
use gtk4 as gtk;
use std::time::Duration;

/// Element geometry relative to the scrolled content, the input to
/// `visible_fraction`. `None` while the widget is not laid out.
pub fn bounds_within(widget: &gtk::Widget, content: &gtk::Widget) -> Option<Bounds> {
    widget.compute_bounds(content).map(|rect| Bounds {
        top: rect.y() as f64,
        height: rect.height() as f64,
    })
}

/// CSS class representing the committed hidden state (opacity 0, offset).
const HIDDEN_CLASS: &str = "reveal-hidden";

const VISIBLE_CLASSES: &[&str] = &["reveal-visible", "reveal-visible-medium", "reveal-visible-fast"];

/// Picks the transition variant closest to the requested duration; the
/// actual durations live in the theme CSS.
fn transition_class(duration: Duration) -> &'static str {
    if duration >= Duration::from_millis(550) {
        "reveal-visible"
    } else if duration >= Duration::from_millis(350) {
        "reveal-visible-medium"
    } else {
        "reveal-visible-fast"
    }
}

/// `RevealSurface` over a batch of widgets. Committing strips any previous
/// transition class and forces an allocation read so the hidden state is
/// laid out before the transition class lands on a later main-loop turn.
pub struct WidgetReveal {
    widgets: Vec<gtk::Widget>,
}

impl WidgetReveal {
    pub fn new(widgets: Vec<gtk::Widget>) -> Self {
        Self { widgets }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Pre-hides a batch at construction time, before any intersection has
    /// been observed.
    pub fn hide_all(&mut self) {
        for i in 0..self.widgets.len() {
            self.commit_hidden(i);
        }
    }
}

impl RevealSurface for WidgetReveal {
    fn commit_hidden(&mut self, index: usize) {
        let Some(widget) = self.widgets.get(index) else {
            return;
        };
        for class in VISIBLE_CLASSES {
            widget.remove_css_class(class);
        }
        widget.add_css_class(HIDDEN_CLASS);
        // Forced layout read: guarantees the hidden state is committed.
        let _ = widget.allocated_height();
    }

    fn animate_in(&mut self, index: usize, timing: RevealTiming) {
        let Some(widget) = self.widgets.get(index) else {
            return;
        };
        let widget = widget.clone();
        glib::timeout_add_local_once(timing.delay, move || {
            widget.remove_css_class(HIDDEN_CLASS);
            widget.add_css_class(transition_class(timing.duration));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_class_buckets() {
        assert_eq!(
            transition_class(Duration::from_millis(700)),
            "reveal-visible"
        );
        assert_eq!(
            transition_class(Duration::from_millis(400)),
            "reveal-visible-medium"
        );
        assert_eq!(
            transition_class(Duration::from_millis(250)),
            "reveal-visible-fast"
        );
    }
}
