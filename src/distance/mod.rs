//! Pairwise distances and nearest-neighbor rankings.
//!
//! Provides a dense, read-only distance index built once per instance.

mod index;

pub use index::DistanceIndex;
