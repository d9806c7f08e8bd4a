//! Mouse interaction for the stepgate TUI.

mod hit_area;

pub use hit_area::{ClickAction, HitArea, HitAreaRegistry};
