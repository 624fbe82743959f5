use std::time::Duration;

pub mod model;
pub mod view;

pub use model::{CardSlot, PagePlan, Pager};
pub use view::CarouselView;

pub const CARDS_PER_PAGE: usize = 3;

/// Per-card delay for the cascading "active" marking within a page.
pub const CARD_STAGGER: Duration = Duration::from_millis(100);
