use super::{COMMIT_DELAY, COMPACT_WIDTH};
use std::time::Duration;

/// Window width class; narrower viewports get shorter durations and
/// tighter stagger steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Full,
    Compact,
}

impl DeviceClass {
    pub fn from_width(width: i32) -> Self {
        if width < COMPACT_WIDTH {
            DeviceClass::Compact
        } else {
            DeviceClass::Full
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub delay: Duration,
    pub duration: Duration,
}

/// The rendering side of the two-phase reveal protocol. Phase one forces an
/// immediate, transition-less hidden state; phase two, scheduled after
/// `RevealTiming::delay`, enables the transition to the visible state.
///
/// Kept as a trait so the sequencing can be exercised without a real
/// rendering engine.
pub trait RevealSurface {
    fn commit_hidden(&mut self, index: usize);
    fn animate_in(&mut self, index: usize, timing: RevealTiming);
}

/// Timing recipe for one batch of elements revealed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSequence {
    pub base_delay: Duration,
    pub step: Duration,
    pub duration: Duration,
}

impl RevealSequence {
    /// One-shot section reveals triggered by viewport entry.
    pub fn section(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Full => Self {
                base_delay: COMMIT_DELAY,
                step: Duration::from_millis(100),
                duration: Duration::from_millis(700),
            },
            DeviceClass::Compact => Self {
                base_delay: COMMIT_DELAY,
                step: Duration::from_millis(50),
                duration: Duration::from_millis(350),
            },
        }
    }

    /// Cascade for carousel cards re-shown on a page change.
    pub fn cards(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Full => Self {
                base_delay: COMMIT_DELAY,
                step: Duration::from_millis(100),
                duration: Duration::from_millis(600),
            },
            DeviceClass::Compact => Self {
                base_delay: COMMIT_DELAY,
                step: Duration::from_millis(50),
                duration: Duration::from_millis(300),
            },
        }
    }

    /// Short fade replayed on technology cards when the filter changes.
    pub fn filter(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Full => Self {
                base_delay: COMMIT_DELAY,
                step: Duration::from_millis(50),
                duration: Duration::from_millis(400),
            },
            DeviceClass::Compact => Self {
                base_delay: COMMIT_DELAY,
                step: Duration::from_millis(25),
                duration: Duration::from_millis(250),
            },
        }
    }

    pub fn timing(&self, index: usize) -> RevealTiming {
        RevealTiming {
            delay: self.base_delay + self.step * index as u32,
            duration: self.duration,
        }
    }

    /// Runs the full protocol over a batch: every hidden state is committed
    /// before any transition is enabled, and stagger grows with the index.
    pub fn play<S: RevealSurface + ?Sized>(&self, surface: &mut S, count: usize) {
        for i in 0..count {
            surface.commit_hidden(i);
        }
        for i in 0..count {
            surface.animate_in(i, self.timing(i));
        }
    }
}

/// Element geometry within the scrolled content, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

/// Fraction of the element currently inside the viewport, in `0.0..=1.0`.
pub fn visible_fraction(bounds: Bounds, scroll_offset: f64, viewport_height: f64) -> f64 {
    if bounds.height <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }
    let top = bounds.top.max(scroll_offset);
    let bottom = (bounds.top + bounds.height).min(scroll_offset + viewport_height);
    ((bottom - top) / bounds.height).clamp(0.0, 1.0)
}

/// Fires once when the visible fraction first reaches the threshold, then
/// is permanently spent.
#[derive(Debug, Clone, Copy)]
pub struct OneShot {
    threshold: f64,
    fired: bool,
}

impl OneShot {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    pub fn observe(&mut self, fraction: f64) -> bool {
        if self.fired || fraction < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn spent(&self) -> bool {
        self.fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    Entered,
    Left,
}

/// Repeatable in-view gate; reports only transitions across the threshold.
/// Drives gallery autoplay, which must stop when scrolled away and restart
/// on return.
#[derive(Debug, Clone, Copy)]
pub struct ViewGate {
    threshold: f64,
    in_view: bool,
}

impl ViewGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            in_view: false,
        }
    }

    pub fn observe(&mut self, fraction: f64) -> Option<GateEvent> {
        let now = fraction >= self.threshold;
        if now == self.in_view {
            return None;
        }
        self.in_view = now;
        Some(if now { GateEvent::Entered } else { GateEvent::Left })
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Phase {
        Commit(usize),
        Animate(usize, RevealTiming),
    }

    #[derive(Default)]
    struct Recorder {
        phases: Vec<Phase>,
    }

    impl RevealSurface for Recorder {
        fn commit_hidden(&mut self, index: usize) {
            self.phases.push(Phase::Commit(index));
        }
        fn animate_in(&mut self, index: usize, timing: RevealTiming) {
            self.phases.push(Phase::Animate(index, timing));
        }
    }

    #[test]
    fn test_all_commits_precede_animates() {
        let mut rec = Recorder::default();
        RevealSequence::cards(DeviceClass::Full).play(&mut rec, 3);

        assert_eq!(rec.phases.len(), 6);
        let first_animate = rec
            .phases
            .iter()
            .position(|p| matches!(p, Phase::Animate(..)))
            .unwrap();
        assert!(
            rec.phases[..first_animate]
                .iter()
                .all(|p| matches!(p, Phase::Commit(_)))
        );
    }

    #[test]
    fn test_stagger_grows_with_index() {
        let seq = RevealSequence::cards(DeviceClass::Full);
        let delays: Vec<_> = (0..3).map(|i| seq.timing(i).delay).collect();
        assert!(delays[0] < delays[1] && delays[1] < delays[2]);
        assert_eq!(delays[1] - delays[0], Duration::from_millis(100));
    }

    #[test]
    fn test_compact_device_shortens_timings() {
        let full = RevealSequence::cards(DeviceClass::Full);
        let compact = RevealSequence::cards(DeviceClass::Compact);
        assert!(compact.duration < full.duration);
        assert!(compact.step < full.step);
    }

    #[test]
    fn test_device_class_breakpoint() {
        assert_eq!(DeviceClass::from_width(1280), DeviceClass::Full);
        assert_eq!(DeviceClass::from_width(COMPACT_WIDTH), DeviceClass::Full);
        assert_eq!(
            DeviceClass::from_width(COMPACT_WIDTH - 1),
            DeviceClass::Compact
        );
    }

    #[test]
    fn test_visible_fraction_geometry() {
        let bounds = Bounds {
            top: 100.0,
            height: 200.0,
        };
        // fully above the viewport
        assert_eq!(visible_fraction(bounds, 400.0, 600.0), 0.0);
        // fully inside
        assert_eq!(visible_fraction(bounds, 0.0, 600.0), 1.0);
        // bottom half clipped: viewport ends at y=200, element spans 100..300
        let f = visible_fraction(bounds, 0.0, 200.0);
        assert!((f - 0.5).abs() < 1e-9);
        // degenerate element
        assert_eq!(
            visible_fraction(
                Bounds {
                    top: 0.0,
                    height: 0.0
                },
                0.0,
                600.0
            ),
            0.0
        );
    }

    #[test]
    fn test_viewport_growth_alone_reveals() {
        // same scroll offset, taller viewport: a resize brings the element
        // into view without any scrolling
        let bounds = Bounds {
            top: 500.0,
            height: 200.0,
        };
        let mut shot = OneShot::new(0.1);
        assert!(!shot.observe(visible_fraction(bounds, 0.0, 400.0)));
        assert!(shot.observe(visible_fraction(bounds, 0.0, 700.0)));
    }

    #[test]
    fn test_one_shot_never_fires_twice() {
        let mut shot = OneShot::new(0.1);
        assert!(!shot.observe(0.05));
        assert!(shot.observe(0.2));
        assert!(shot.spent());
        assert!(!shot.observe(0.9));
        assert!(!shot.observe(0.0));
    }

    #[test]
    fn test_view_gate_reports_transitions_only() {
        let mut gate = ViewGate::new(0.1);
        assert_eq!(gate.observe(0.0), None);
        assert_eq!(gate.observe(0.5), Some(GateEvent::Entered));
        assert_eq!(gate.observe(0.9), None);
        assert_eq!(gate.observe(0.05), Some(GateEvent::Left));
        assert_eq!(gate.observe(0.0), None);
        assert_eq!(gate.observe(0.1), Some(GateEvent::Entered));
    }
}
