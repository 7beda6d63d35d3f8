//! # u-tsp
//!
//! Heuristic optimizer for the symmetric Euclidean traveling salesman
//! problem: build a short closed tour through a set of 2-D points.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Tour)
//! - [`distance`] — Pairwise distances and nearest-neighbor rankings
//! - [`constructive`] — Nearest-neighbor tour construction (single and multi-start)
//! - [`local_search`] — Crossing removal by windowed 2-opt
//! - [`tabu`] — Tabu Search with parallel swap neighborhoods
//! - [`error`] — Error type
//!
//! [`solve`] chains them: index → construct → uncross → search.

pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod models;
mod solver;
pub mod tabu;

pub use error::{Result, TspError};
pub use solver::{solve, TspSolution};
