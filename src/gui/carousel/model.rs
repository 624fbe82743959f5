use super::CARD_STAGGER;
use std::ops::Range;
use std::time::Duration;

/// Clamped page navigation over a fixed ordered card collection.
///
/// Unlike the per-project galleries, which wrap circularly, the pager clamps
/// at both ends: `next` at the last page and `prev` at the first page are
/// no-ops, and the matching buttons are reported disabled.
#[derive(Debug, Clone)]
pub struct Pager {
    current: usize,
    page_size: usize,
    total_items: usize,
}

/// One visible card within a page plan, with its cascade delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub index: usize,
    pub stagger: Duration,
}

/// Everything a render pass needs, in application order: card visibility
/// first, then indicator and button synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub visible: Vec<CardSlot>,
    pub active_dot: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PagePlan {
    pub fn is_visible(&self, card: usize) -> bool {
        self.visible.iter().any(|slot| slot.index == card)
    }
}

impl Pager {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            current: 0,
            page_size,
            total_items,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Never zero, so the indicator set is never empty.
    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Card indices on the current page. The last page holds the remainder
    /// and never wraps.
    pub fn page_span(&self) -> Range<usize> {
        let start = self.current * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Jump to a page. Indicator clicks are caller-validated; out-of-range
    /// requests are ignored rather than clamped.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= self.page_count() {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.page_count() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn plan(&self) -> PagePlan {
        let span = self.page_span();
        let visible = span
            .clone()
            .map(|index| CardSlot {
                index,
                stagger: CARD_STAGGER * (index - span.start) as u32,
            })
            .collect();

        PagePlan {
            visible,
            active_dot: self.current,
            prev_enabled: self.current > 0,
            next_enabled: self.current + 1 < self.page_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling() {
        assert_eq!(Pager::new(8, 3).page_count(), 3);
        assert_eq!(Pager::new(9, 3).page_count(), 3);
        assert_eq!(Pager::new(10, 3).page_count(), 4);
        assert_eq!(Pager::new(1, 3).page_count(), 1);
        assert_eq!(Pager::new(0, 3).page_count(), 1);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let mut pager = Pager::new(8, 3);
        assert!(pager.go_to(2));
        assert_eq!(pager.page_span(), 6..8);
        assert_eq!(pager.plan().visible.len(), 2);

        let mut even = Pager::new(9, 3);
        assert!(even.go_to(2));
        assert_eq!(even.plan().visible.len(), 3);
    }

    #[test]
    fn test_navigation_clamps_at_edges() {
        let mut pager = Pager::new(8, 3);
        assert!(!pager.prev());
        assert_eq!(pager.current(), 0);

        assert!(pager.go_to(2));
        assert!(!pager.next());
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_single_page_disables_both_buttons() {
        let pager = Pager::new(2, 3);
        let plan = pager.plan();
        assert!(!plan.prev_enabled);
        assert!(!plan.next_enabled);

        let empty = Pager::new(0, 3);
        let plan = empty.plan();
        assert!(plan.visible.is_empty());
        assert!(!plan.prev_enabled && !plan.next_enabled);
    }

    #[test]
    fn test_exactly_one_active_indicator() {
        let mut pager = Pager::new(8, 3);
        pager.next();
        let plan = pager.plan();
        assert_eq!(plan.active_dot, 1);
        // one dot per page, exactly one marked active
        let active = (0..pager.page_count())
            .filter(|&i| i == plan.active_dot)
            .count();
        assert_eq!(active, 1);
    }

    #[test]
    fn test_next_next_prev_scenario() {
        // 8 cards, page size 3: pages hold 3, 3, 2 cards.
        let mut pager = Pager::new(8, 3);
        assert_eq!(pager.plan().active_dot, 0);

        pager.next();
        pager.next();
        pager.prev();

        assert_eq!(pager.current(), 1);
        let plan = pager.plan();
        let indices: Vec<_> = plan.visible.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![3, 4, 5]);
        assert!(plan.prev_enabled);
        assert!(plan.next_enabled);
    }

    #[test]
    fn test_stagger_is_position_within_page() {
        let mut pager = Pager::new(8, 3);
        pager.go_to(1);
        let plan = pager.plan();
        let staggers: Vec<_> = plan.visible.iter().map(|s| s.stagger).collect();
        assert_eq!(
            staggers,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200),
            ]
        );
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut pager = Pager::new(8, 3);
        assert!(!pager.go_to(3));
        assert_eq!(pager.current(), 0);
    }
}
