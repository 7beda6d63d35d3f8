//! Domain model types for the symmetric Euclidean TSP.
//!
//! Points are immutable input records; a tour is an immutable cyclic
//! permutation of point indices that carries its own length.

mod point;
mod tour;

pub use point::Point;
pub use tour::{tour_length, Tour};
