//! End-to-end solve: index → construct → uncross → tabu search.

use tracing::info;

use crate::constructive::{multi_start_nearest_neighbor, nearest_neighbor};
use crate::distance::DistanceIndex;
use crate::error::Result;
use crate::local_search::CrossingOptimizer;
use crate::models::{Point, Tour};
use crate::tabu::{SearchConfig, SearchObserver, SearchResult, TabuSearch};

/// Outcome of [`solve`].
#[derive(Debug, Clone)]
pub struct TspSolution {
    /// Index built from the input points; tour positions refer to it.
    pub index: DistanceIndex,
    /// Length of the constructed tour before any improvement.
    pub constructed_length: f64,
    /// Length after crossing removal, where the search started.
    pub initial_length: f64,
    /// Search outcome, including the best tour.
    pub result: SearchResult,
}

impl TspSolution {
    /// Best tour found.
    pub fn best(&self) -> &Tour {
        &self.result.best
    }

    /// Length of the best tour.
    pub fn length(&self) -> f64 {
        self.result.best.length()
    }

    /// Point ids of the best tour in visiting order.
    pub fn point_ids(&self) -> Vec<usize> {
        self.result.best.point_ids(&self.index)
    }
}

/// Solves a Euclidean TSP instance heuristically.
///
/// Builds the [`DistanceIndex`], constructs a nearest-neighbor tour (multi-start
/// unless disabled), removes crossings, then runs [`TabuSearch`] until its
/// stopping condition fires. Inputs with fewer than four points return the
/// constructed tour unchanged.
///
/// # Errors
///
/// - [`TspError::InvalidInput`](crate::error::TspError::InvalidInput) for an empty point set
/// - [`TspError::DuplicatePointId`](crate::error::TspError::DuplicatePointId) for repeated ids
/// - [`TspError::InvalidConfig`](crate::error::TspError::InvalidConfig) for out-of-range settings
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::tabu::{NoopObserver, SearchConfig};
/// use u_tsp::solve;
///
/// let points = vec![
///     Point::new(1, 0, 0),
///     Point::new(2, 1, 1),
///     Point::new(3, 1, 0),
///     Point::new(4, 0, 1),
/// ];
/// let config = SearchConfig::default().with_max_bad_routes(20).with_seed(1);
/// let solution = solve(points, &config, &mut NoopObserver).unwrap();
/// assert!((solution.length() - 4.0).abs() < 1e-10);
/// assert_eq!(solution.point_ids().len(), 4);
/// ```
pub fn solve<O>(points: Vec<Point>, config: &SearchConfig, observer: &mut O) -> Result<TspSolution>
where
    O: SearchObserver + ?Sized,
{
    let search = TabuSearch::new(config.clone())?;
    let index = DistanceIndex::build(points)?;

    let constructed = if config.multi_start {
        multi_start_nearest_neighbor(&index, config.max_starts)?
    } else {
        nearest_neighbor(&index, 0)?
    };
    let constructed_length = constructed.length();

    let initial = CrossingOptimizer::new(config.look_ahead, config.min_window)
        .optimize(&constructed, &index);
    let initial_length = initial.length();
    info!(
        event = "initial_tour",
        constructed_length = constructed_length,
        uncrossed_length = initial_length,
    );

    let result = search.run(&index, initial, observer)?;

    Ok(TspSolution {
        index,
        constructed_length,
        initial_length,
        result,
    })
}
