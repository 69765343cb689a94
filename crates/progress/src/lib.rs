//! Progress presentation
//!
//! Ring geometry, goal buckets and summary snapshots.

#![warn(missing_docs)]

pub mod ring;
pub mod tracker;

pub use ring::{ProgressRing, RingGeometry, clamp_percent, render_bar};
pub use tracker::{ProgressSnapshot, PeriodGroup, group_by_period, period_color};
