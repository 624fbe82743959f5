use std::time::Duration;

pub mod model;
pub mod view;

pub use model::{AutoplayAction, Gallery};
pub use view::GalleryView;

pub const AUTO_SLIDE_INTERVAL: Duration = Duration::from_millis(3000);

/// Image load size inside a project card.
pub const IMAGE_WIDTH: i32 = 480;
pub const IMAGE_HEIGHT: i32 = 270;
