//! Tabu Search over swap neighborhoods.
//!
//! A single-tour trajectory search: each iteration moves to the shortest
//! neighbor whose swapped pair is not on the tabu list, even when that
//! neighbor is longer, and stops after a plateau of non-improving moves.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod neighborhood;
mod runner;
mod tabu_list;
mod types;

pub use config::{SearchConfig, MIN_TABU_LIST_SIZE};
pub use neighborhood::{merge, NeighborhoodGenerator};
pub use runner::{SearchResult, SearchState, StopReason, TabuSearch};
pub use tabu_list::TabuList;
pub use types::{
    Candidate, NeighborhoodFamily, NoopObserver, SearchObserver, TabuEntry, TourEvent,
};
