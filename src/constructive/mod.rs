//! Constructive heuristics for building an initial tour.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor from one start, O(n²)
//! - [`multi_start_nearest_neighbor`] — Best greedy tour over many starts, run in parallel

mod nearest_neighbor;

pub use nearest_neighbor::{multi_start_nearest_neighbor, nearest_neighbor};
