//! Local search operators for improving a single tour.
//!
//! - [`segments_intersect`] — Exact orientation-based segment intersection test
//! - [`CrossingOptimizer`] — Windowed 2-opt pass that removes self-intersections

mod intersect;
mod two_opt;

pub use intersect::segments_intersect;
pub use two_opt::{count_crossings, CrossingOptimizer};
