/// What the view must do to its autoplay timer after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayAction {
    Start,
    Stop,
    None,
}

/// Circular image navigation with hover- and viewport-gated autoplay.
///
/// Only constructed for cards with two or more images; anything less is a
/// static display with no gallery behavior at all.
#[derive(Debug, Clone)]
pub struct Gallery {
    current: usize,
    len: usize,
    hovering: bool,
    in_view: bool,
}

impl Gallery {
    pub fn new(len: usize) -> Option<Self> {
        if len <= 1 {
            return None;
        }
        Some(Self {
            current: 0,
            len,
            hovering: false,
            in_view: false,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// True circular navigation: negative indices wrap to the end, overflow
    /// wraps to the start.
    pub fn show(&mut self, index: i64) -> usize {
        self.current = index.rem_euclid(self.len as i64) as usize;
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.show(self.current as i64 + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.show(self.current as i64 - 1)
    }

    /// Autoplay runs only while the pointer is away and the card intersects
    /// the viewport.
    pub fn should_autoplay(&self) -> bool {
        !self.hovering && self.in_view
    }

    pub fn pointer_entered(&mut self) -> AutoplayAction {
        self.hovering = true;
        AutoplayAction::Stop
    }

    pub fn pointer_left(&mut self) -> AutoplayAction {
        self.hovering = false;
        if self.in_view {
            AutoplayAction::Start
        } else {
            AutoplayAction::None
        }
    }

    /// Losing viewport visibility stops autoplay regardless of hover state;
    /// regaining it restarts only when the pointer is away.
    pub fn viewport_changed(&mut self, in_view: bool) -> AutoplayAction {
        self.in_view = in_view;
        match (in_view, self.hovering) {
            (false, _) => AutoplayAction::Stop,
            (true, false) => AutoplayAction::Start,
            (true, true) => AutoplayAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_image_has_no_gallery() {
        assert!(Gallery::new(0).is_none());
        assert!(Gallery::new(1).is_none());
        assert!(Gallery::new(2).is_some());
    }

    #[test]
    fn test_show_is_circular() {
        let mut g = Gallery::new(4).unwrap();
        assert_eq!(g.show(-1), 3);
        assert_eq!(g.show(4), 0);
        assert_eq!(g.show(-5), 3);
        assert_eq!(g.show(2), 2);
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let mut g = Gallery::new(3).unwrap();
        assert_eq!(g.next(), 1);
        assert_eq!(g.next(), 2);
        assert_eq!(g.next(), 0);
        assert_eq!(g.prev(), 2);
    }

    #[test]
    fn test_hover_pauses_and_unhover_resumes() {
        let mut g = Gallery::new(3).unwrap();
        assert_eq!(g.viewport_changed(true), AutoplayAction::Start);
        assert!(g.should_autoplay());

        assert_eq!(g.pointer_entered(), AutoplayAction::Stop);
        assert!(!g.should_autoplay());

        assert_eq!(g.pointer_left(), AutoplayAction::Start);
        assert!(g.should_autoplay());
    }

    #[test]
    fn test_leaving_viewport_stops_regardless_of_hover() {
        let mut g = Gallery::new(3).unwrap();
        g.viewport_changed(true);
        g.pointer_entered();

        assert_eq!(g.viewport_changed(false), AutoplayAction::Stop);
        assert!(!g.should_autoplay());

        // un-hovering while off screen must not restart the timer
        assert_eq!(g.pointer_left(), AutoplayAction::None);
        assert!(!g.should_autoplay());
    }

    #[test]
    fn test_reentering_viewport_while_hovered_stays_paused() {
        let mut g = Gallery::new(3).unwrap();
        g.pointer_entered();
        assert_eq!(g.viewport_changed(true), AutoplayAction::None);
        assert!(!g.should_autoplay());
    }
}
