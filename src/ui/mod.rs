//! Text renderers for the watch face and dashboard.
//!
//! Everything here is a pure function of its arguments; the CLI decides
//! where the lines go.

pub mod gesture_display;
pub mod handwash_log;
pub mod notice;
pub mod progress_ring;
pub mod stats_card;
pub mod watch_face;

pub use gesture_display::Emphasis;
pub use progress_ring::ProgressRing;
pub use stats_card::{CardVariant, StatsCard};
