//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a given tour (usually constructed and crossing-free)
//! 2. At each iteration:
//!    a. Generate the swap neighborhoods (adjacent sweep on the calling
//!       thread, random and longest-edge tasks on the worker pool)
//!    b. Select the shortest non-tabu neighbor; if none exists, release the
//!       oldest tabu pair and apply it
//!    c. Push the swapped pair onto the tabu list and move to the neighbor
//!    d. Update the best tour, or count a non-improving iteration
//! 3. Stop after `max_bad_routes` consecutive non-improving iterations,
//!    an optional iteration cap, or an external stop request
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::neighborhood::{task_seed, NeighborhoodGenerator};
use super::tabu_list::TabuList;
use super::types::{Candidate, NeighborhoodFamily, SearchObserver, TourEvent};
use crate::distance::DistanceIndex;
use crate::error::Result;
use crate::local_search::CrossingOptimizer;
use crate::models::Tour;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_bad_routes` consecutive iterations without a new best.
    Plateau,
    /// The configured iteration cap was reached.
    MaxIterations,
    /// The external stop flag was set.
    StopRequested,
    /// No move, not even a released tabu pair, was available.
    NoMoves,
    /// Fewer than four points: every tour has the same length.
    TooFewPoints,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best tour found.
    pub best: Tour,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best tour was found (0 = starting tour).
    pub best_iteration: usize,
    /// Why the loop stopped.
    pub stop_reason: StopReason,
    /// Best length after each iteration.
    pub cost_history: Vec<f64>,
}

impl SearchResult {
    /// Length of the best tour.
    pub fn best_length(&self) -> f64 {
        self.best.length()
    }
}

/// Mutable state of one search run.
#[derive(Debug, Clone)]
pub struct SearchState {
    current: Tour,
    best: Tour,
    non_improving: usize,
    tabu: TabuList,
}

impl SearchState {
    /// Starts a run at `initial`.
    pub fn new(initial: Tour, tabu: TabuList) -> Self {
        Self {
            best: initial.clone(),
            current: initial,
            non_improving: 0,
            tabu,
        }
    }

    /// The tour the search currently sits on.
    pub fn current(&self) -> &Tour {
        &self.current
    }

    /// Shortest tour seen so far.
    pub fn best(&self) -> &Tour {
        &self.best
    }

    /// Consecutive iterations without a new best.
    pub fn non_improving(&self) -> usize {
        self.non_improving
    }

    /// Forbidden swaps.
    pub fn tabu(&self) -> &TabuList {
        &self.tabu
    }

    /// Moves to the accepted candidate, recording its pair as tabu.
    ///
    /// Returns `true` if the new current tour is a new best.
    pub fn accept(&mut self, candidate: Candidate) -> bool {
        self.tabu.push(candidate.pair);
        self.current = candidate.tour;
        if self.current.length() < self.best.length() {
            self.best = self.current.clone();
            self.non_improving = 0;
            true
        } else {
            self.non_improving += 1;
            false
        }
    }

    /// Releases the least recently tabooed pair and builds its swap.
    ///
    /// Used when no admissible neighbor exists; `None` if the tabu list is
    /// empty.
    pub fn release_oldest(&mut self, index: &DistanceIndex) -> Option<Candidate> {
        let entry = self.tabu.pop_oldest()?;
        let (a, b) = entry.pair();
        let i = self.current.position_of(a)?;
        let j = self.current.position_of(b)?;
        Some(Candidate {
            tour: self.current.swapped(i, j, index),
            pair: entry,
            family: NeighborhoodFamily::Fallback,
        })
    }
}

/// Tabu Search over swap neighborhoods.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceIndex;
/// use u_tsp::constructive::nearest_neighbor;
/// use u_tsp::tabu::{NoopObserver, SearchConfig, TabuSearch};
///
/// let points = (0..12)
///     .map(|i| Point::new(i, (i * 17 % 23) as i64, (i * 29 % 31) as i64))
///     .collect();
/// let index = DistanceIndex::build(points).unwrap();
/// let initial = nearest_neighbor(&index, 0).unwrap();
///
/// let config = SearchConfig::default()
///     .with_max_bad_routes(50)
///     .with_worker_count(2)
///     .with_seed(42);
/// let result = TabuSearch::new(config)
///     .unwrap()
///     .run(&index, initial.clone(), &mut NoopObserver)
///     .unwrap();
/// assert!(result.best_length() <= initial.length());
/// ```
#[derive(Debug, Clone)]
pub struct TabuSearch {
    config: SearchConfig,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl TabuSearch {
    /// Creates a search with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidConfig`](crate::error::TspError::InvalidConfig)
    /// if the configuration does not validate.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stop_flag: None,
        })
    }

    /// Stops the search at the next iteration boundary once `flag` is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search from `initial`, notifying `observer` after every
    /// iteration.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::ThreadPool`](crate::error::TspError::ThreadPool)
    /// if the worker pool cannot be started.
    pub fn run<O>(
        &self,
        index: &DistanceIndex,
        initial: Tour,
        observer: &mut O,
    ) -> Result<SearchResult>
    where
        O: SearchObserver + ?Sized,
    {
        let n = initial.len();
        if n < 4 {
            return Ok(SearchResult {
                best: initial,
                iterations: 0,
                best_iteration: 0,
                stop_reason: StopReason::TooFewPoints,
                cost_history: Vec::new(),
            });
        }

        let config = &self.config;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .thread_name(|i| format!("tsp-worker-{i}"))
            .build()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let generator = NeighborhoodGenerator::new(index, config);
        let optimizer = CrossingOptimizer::new(config.look_ahead, config.min_window);
        let mut state = SearchState::new(initial, TabuList::new(config.tabu_capacity(n)));

        let start = Instant::now();
        info!(
            event = "search_start",
            points = n,
            length = state.best().length(),
            tabu_capacity = state.tabu().capacity(),
            workers = config.worker_count,
            seed = seed,
        );

        let mut iterations = 0usize;
        let mut best_iteration = 0usize;
        let mut cost_history = Vec::new();

        let stop_reason = loop {
            if self.stop_requested() {
                break StopReason::StopRequested;
            }
            if config.max_iterations.is_some_and(|max| iterations >= max) {
                break StopReason::MaxIterations;
            }

            let iteration_seed = task_seed(seed, iterations);
            let candidate = match generator.best_neighbor(
                state.current(),
                state.tabu(),
                &pool,
                iteration_seed,
            ) {
                Some(candidate) => candidate,
                None => match state.release_oldest(index) {
                    Some(candidate) => {
                        warn!(
                            event = "search_fallback",
                            iteration = iterations,
                            pair = ?candidate.pair.pair(),
                        );
                        candidate
                    }
                    None => break StopReason::NoMoves,
                },
            };

            let candidate = if config.optimize_neighbors {
                Candidate {
                    tour: optimizer.optimize(&candidate.tour, index),
                    ..candidate
                }
            } else {
                candidate
            };

            iterations += 1;
            if state.accept(candidate) {
                best_iteration = iterations;
                debug!(
                    event = "search_improved",
                    iteration = iterations,
                    length = state.best().length(),
                );
                observer.on_tour(state.best(), TourEvent::Improved);
            } else {
                observer.on_tour(state.current(), TourEvent::Explored);
            }
            cost_history.push(state.best().length());

            if state.non_improving() >= config.max_bad_routes {
                break StopReason::Plateau;
            }
        };

        info!(
            event = "search_end",
            iterations = iterations,
            best_iteration = best_iteration,
            length = state.best().length(),
            duration_ms = start.elapsed().as_millis() as u64,
            reason = ?stop_reason,
        );

        Ok(SearchResult {
            best: state.best,
            iterations,
            best_iteration,
            stop_reason,
            cost_history,
        })
    }

    fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
