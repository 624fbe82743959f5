use std::time::Duration;

pub mod model;
pub mod view;

pub use model::{ProgressAnimation, TechFilter};
pub use view::SkillsView;

/// Progress bars animate from zero to their level over this span.
pub const PROGRESS_DURATION: Duration = Duration::from_millis(1000);
