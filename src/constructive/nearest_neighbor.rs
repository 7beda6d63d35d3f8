//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from a chosen point, always append the
//! nearest point not yet visited. The ranked neighbor lists of the
//! [`DistanceIndex`] make each step a skip-visited scan.
//!
//! # Complexity
//!
//! O(n²) per start in the worst case.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use rayon::prelude::*;
use tracing::info;

use crate::distance::DistanceIndex;
use crate::error::{Result, TspError};
use crate::models::Tour;

/// Constructs a tour with the nearest-neighbor heuristic from `start`.
///
/// Deterministic for a fixed start and index.
///
/// # Errors
///
/// Returns [`TspError::InvalidInput`] if the index is empty or `start` is out
/// of range.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceIndex;
/// use u_tsp::constructive::nearest_neighbor;
///
/// let index = DistanceIndex::build(vec![
///     Point::new(0, 0, 0),
///     Point::new(1, 1, 0),
///     Point::new(2, 1, 1),
///     Point::new(3, 0, 1),
/// ]).unwrap();
///
/// let tour = nearest_neighbor(&index, 0).unwrap();
/// assert_eq!(tour.order(), &[0, 1, 2, 3]);
/// assert!((tour.length() - 4.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor(index: &DistanceIndex, start: usize) -> Result<Tour> {
    let n = index.len();
    if n == 0 {
        return Err(TspError::invalid_input("cannot build a tour from zero points"));
    }
    if start >= n {
        return Err(TspError::invalid_input(format!(
            "start position {start} out of range for {n} points"
        )));
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[start] = true;
    order.push(start);

    let mut current = start;
    while let Some(next) = index.nearest_unvisited(current, &visited) {
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(Tour::from_order(order, index))
}

/// Runs [`nearest_neighbor`] from several starts and keeps the shortest tour.
///
/// Starts are the first `max_starts` positions (all positions if `None`),
/// evaluated in parallel. Ties go to the lowest start position.
///
/// # Errors
///
/// Returns [`TspError::InvalidInput`] if the index is empty.
pub fn multi_start_nearest_neighbor(
    index: &DistanceIndex,
    max_starts: Option<usize>,
) -> Result<Tour> {
    let n = index.len();
    if n == 0 {
        return Err(TspError::invalid_input("cannot build a tour from zero points"));
    }
    let starts = max_starts.map_or(n, |m| m.clamp(1, n));

    let (start, tour) = (0..starts)
        .into_par_iter()
        .map(|s| nearest_neighbor(index, s).map(|tour| (s, tour)))
        .try_reduce_with(|a, b| Ok(shorter(a, b)))
        .transpose()?
        .ok_or_else(|| TspError::invalid_input("no start evaluated"))?;
    info!(
        event = "construction_end",
        starts = starts,
        best_start = start,
        length = tour.length(),
    );
    Ok(tour)
}

/// Shorter of two `(start, tour)` results; equal lengths go to the lower start.
fn shorter(a: (usize, Tour), b: (usize, Tour)) -> (usize, Tour) {
    let by_length = a.1.length().total_cmp(&b.1.length());
    if by_length.then(a.0.cmp(&b.0)).is_le() {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn line_points() -> DistanceIndex {
        DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 1, 0),
            Point::new(2, 2, 0),
            Point::new(3, 3, 0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_nn_line() {
        let index = line_points();
        let tour = nearest_neighbor(&index, 0).expect("non-empty");
        assert_eq!(tour.order(), &[0, 1, 2, 3]);
        // 1 + 1 + 1 + 3
        assert!((tour.length() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_nn_unit_square_perimeter() {
        let index = DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 1, 0),
            Point::new(2, 1, 1),
            Point::new(3, 0, 1),
        ])
        .expect("valid");
        let tour = nearest_neighbor(&index, 0).expect("non-empty");
        assert!((tour.length() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let index = DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 10, 0), // far
            Point::new(2, 1, 0),  // near
        ])
        .expect("valid");
        let tour = nearest_neighbor(&index, 0).expect("non-empty");
        assert_eq!(tour.order(), &[0, 2, 1]);
    }

    #[test]
    fn test_nn_deterministic() {
        let index = line_points();
        let a = nearest_neighbor(&index, 2).expect("non-empty");
        let b = nearest_neighbor(&index, 2).expect("non-empty");
        assert_eq!(a, b);
    }

    #[test]
    fn test_nn_empty() {
        let index = DistanceIndex::build(Vec::new()).expect("valid");
        assert!(matches!(
            nearest_neighbor(&index, 0),
            Err(TspError::InvalidInput(_))
        ));
        assert!(matches!(
            multi_start_nearest_neighbor(&index, None),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nn_start_out_of_range() {
        let index = line_points();
        assert!(nearest_neighbor(&index, 4).is_err());
    }

    #[test]
    fn test_nn_single_point() {
        let index = DistanceIndex::build(vec![Point::new(4, 2, 2)]).expect("valid");
        let tour = multi_start_nearest_neighbor(&index, None).expect("non-empty");
        assert_eq!(tour.order(), &[0]);
        assert_eq!(tour.length(), 0.0);
    }

    #[test]
    fn test_multi_start_not_worse_than_single() {
        let index = DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 5, 1),
            Point::new(2, 9, 7),
            Point::new(3, 2, 8),
            Point::new(4, 7, 3),
            Point::new(5, 1, 4),
        ])
        .expect("valid");
        let best = multi_start_nearest_neighbor(&index, None).expect("non-empty");
        for s in 0..index.len() {
            let single = nearest_neighbor(&index, s).expect("non-empty");
            assert!(best.length() <= single.length() + 1e-10);
        }
    }

    #[test]
    fn test_multi_start_limited_starts() {
        let index = line_points();
        let tour = multi_start_nearest_neighbor(&index, Some(1)).expect("non-empty");
        assert_eq!(tour, nearest_neighbor(&index, 0).expect("non-empty"));
    }

    #[test]
    fn test_multi_start_matches_sequential_minimum() {
        let points = (0..40)
            .map(|i| Point::new(i, ((i * 37) % 101) as i64, ((i * 53) % 89) as i64))
            .collect();
        let index = DistanceIndex::build(points).expect("valid");

        let mut expected = nearest_neighbor(&index, 0).expect("non-empty");
        for s in 1..index.len() {
            let tour = nearest_neighbor(&index, s).expect("non-empty");
            if tour.length() < expected.length() {
                expected = tour;
            }
        }
        let best = multi_start_nearest_neighbor(&index, None).expect("non-empty");
        assert_eq!(best, expected);
    }

    #[test]
    fn test_shorter_prefers_lower_start_on_tie() {
        let index = line_points();
        let a = nearest_neighbor(&index, 0).expect("non-empty");
        let b = nearest_neighbor(&index, 3).expect("non-empty");
        assert_eq!(a.length(), b.length());
        assert_eq!(shorter((3, b.clone()), (0, a.clone())).0, 0);
        assert_eq!(shorter((0, a), (3, b)).0, 0);
    }
}
