use std::time::Duration;

pub mod model;
pub mod view;

pub use model::{
    Bounds, DeviceClass, GateEvent, OneShot, RevealSequence, RevealSurface, RevealTiming,
    ViewGate, visible_fraction,
};
pub use view::{WidgetReveal, bounds_within};

/// Deliberately low so reveals start before an element is fully on screen,
/// compensating for transition durations on the order of a second.
pub const SECTION_THRESHOLD: f64 = 0.1;
pub const GALLERY_THRESHOLD: f64 = 0.1;
pub const PROGRESS_THRESHOLD: f64 = 0.5;

/// Minimal delay between committing the hidden state and enabling the
/// transition, so the hidden state lands on an earlier main-loop turn.
pub const COMMIT_DELAY: Duration = Duration::from_millis(20);

/// Below this window width the compact timings apply.
pub const COMPACT_WIDTH: i32 = 768;
