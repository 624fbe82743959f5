use super::PROGRESS_DURATION;
use crate::config::Category;
use crate::util::ease_out_cubic;
use std::time::Duration;

/// Active technology filter. `All` matches every card regardless of its
/// category attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TechFilter {
    #[default]
    All,
    Category(Category),
}

impl TechFilter {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            TechFilter::All => true,
            TechFilter::Category(wanted) => wanted == category,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TechFilter::All => "All".to_string(),
            TechFilter::Category(c) => c.to_string(),
        }
    }
}

/// Visibility of each card under a filter, in card order.
pub fn filter_plan(filter: &TechFilter, categories: &[Category]) -> Vec<bool> {
    categories.iter().map(|c| filter.matches(c)).collect()
}

/// Eased fill animation toward a level in 0..=100. Pure time-to-fraction
/// mapping; the tick driver lives in the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    target: f64,
}

impl ProgressAnimation {
    pub fn new(level: u8) -> Self {
        Self {
            target: f64::from(level.min(100)) / 100.0,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn fraction_at(&self, elapsed: Duration) -> f64 {
        let t = (elapsed.as_secs_f64() / PROGRESS_DURATION.as_secs_f64()).min(1.0);
        ease_out_cubic(t) * self.target
    }

    pub fn finished(&self, elapsed: Duration) -> bool {
        elapsed >= PROGRESS_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Vec<Category> {
        names.iter().map(|&n| Category::from(n)).collect()
    }

    #[test]
    fn test_all_filter_matches_everything() {
        let categories = cats(&["frontend", "backend", "tools", "backend"]);
        let plan = filter_plan(&TechFilter::All, &categories);
        assert!(plan.into_iter().all(|visible| visible));
    }

    #[test]
    fn test_category_filter_matches_exactly() {
        let categories = cats(&["frontend", "backend", "tools", "backend"]);
        let filter = TechFilter::Category(Category::from("backend"));
        let plan = filter_plan(&filter, &categories);
        assert_eq!(plan, vec![false, true, false, true]);
    }

    #[test]
    fn test_filter_labels() {
        assert_eq!(TechFilter::All.label(), "All");
        assert_eq!(
            TechFilter::Category(Category::from("tools")).label(),
            "tools"
        );
    }

    #[test]
    fn test_progress_reaches_target() {
        let anim = ProgressAnimation::new(85);
        assert_eq!(anim.fraction_at(Duration::ZERO), 0.0);
        let done = anim.fraction_at(PROGRESS_DURATION);
        assert!((done - 0.85).abs() < 1e-9);
        assert!(anim.finished(PROGRESS_DURATION));
        // past the end it stays put
        assert_eq!(anim.fraction_at(PROGRESS_DURATION * 2), done);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let anim = ProgressAnimation::new(100);
        let mut last = -1.0;
        for ms in (0..=1000).step_by(50) {
            let f = anim.fraction_at(Duration::from_millis(ms));
            assert!(f >= last);
            last = f;
        }
    }

    #[test]
    fn test_level_clamped_to_100() {
        let anim = ProgressAnimation::new(250);
        assert_eq!(anim.target(), 1.0);
    }
}
