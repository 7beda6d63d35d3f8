//! Crossing removal by windowed 2-opt.
//!
//! # Algorithm
//!
//! Scan positions `i` from the start of the tour. For each edge
//! `(i, i+1)`, test the next `window` edges `(j, j+1)` for a geometric
//! intersection. When two edges cross and reversing the segment between
//! them shortens the tour:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1]) < 0
//! ```
//!
//! reverse `t[i+1..=j]` and restart the scan on the new tour.
//!
//! Near the end of the tour the window shrinks by one per position; once
//! it drops below `min_window` the scan stops, which keeps the tail from
//! producing tiny reversals. Every accepted move strictly shortens the
//! tour, so the process terminates.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::debug;

use super::intersect::segments_intersect;
use crate::distance::DistanceIndex;
use crate::models::Tour;

const IMPROVEMENT_EPS: f64 = 1e-9;

/// Removes self-intersections from a tour.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceIndex;
/// use u_tsp::local_search::CrossingOptimizer;
///
/// let index = DistanceIndex::build(vec![
///     Point::new(0, 0, 0),
///     Point::new(1, 1, 1),
///     Point::new(2, 1, 0),
///     Point::new(3, 0, 1),
/// ]).unwrap();
///
/// // (0,0) → (1,1) → (1,0) → (0,1) crosses itself
/// let crossed = Tour::new(vec![0, 1, 2, 3], &index).unwrap();
/// let fixed = CrossingOptimizer::default().optimize(&crossed, &index);
/// assert!((fixed.length() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CrossingOptimizer {
    look_ahead: usize,
    min_window: usize,
}

impl Default for CrossingOptimizer {
    fn default() -> Self {
        Self {
            look_ahead: 30,
            min_window: 4,
        }
    }
}

impl CrossingOptimizer {
    /// Creates an optimizer testing `look_ahead` edges ahead of each position.
    pub fn new(look_ahead: usize, min_window: usize) -> Self {
        Self {
            look_ahead,
            min_window,
        }
    }

    /// Maximum number of edges compared against each edge.
    pub fn look_ahead(&self) -> usize {
        self.look_ahead
    }

    /// Window size below which the scan stops.
    pub fn min_window(&self) -> usize {
        self.min_window
    }

    /// Returns a tour with the crossings within the window removed.
    ///
    /// The result is never longer than `tour`.
    pub fn optimize(&self, tour: &Tour, index: &DistanceIndex) -> Tour {
        let mut current = tour.clone();
        let mut moves = 0usize;

        while let Some((i, j)) = self.find_crossing(&current, index) {
            let next = current.with_reversed_segment(i + 1, j, index);
            debug!(
                event = "crossing_removed",
                from = i,
                to = j,
                old_length = current.length(),
                new_length = next.length(),
            );
            current = next;
            moves += 1;
        }

        if moves > 0 {
            debug!(
                event = "crossings_done",
                moves = moves,
                length = current.length(),
            );
        }
        current
    }

    /// First improving crossing `(i, j)` found by a windowed scan.
    fn find_crossing(&self, tour: &Tour, index: &DistanceIndex) -> Option<(usize, usize)> {
        let n = tour.len();
        if n < 4 {
            return None;
        }
        let order = tour.order();
        let mut window = self.look_ahead;

        for i in 0..n - 2 {
            if i + 2 + window > n {
                window = window.saturating_sub(1);
                if window < self.min_window {
                    break;
                }
            }

            // Edge (n-1, 0) touches edge (0, 1), so it is skipped for i == 0.
            let last = if i == 0 { n - 2 } else { n - 1 };
            let hi = (i + 1 + window).min(last);
            let a = index.point(order[i]);
            let b = index.point(order[i + 1]);

            for j in (i + 2)..=hi {
                let c = index.point(order[j]);
                let d = index.point(order[(j + 1) % n]);
                if segments_intersect(a, b, c, d)
                    && tour.two_opt_delta(i, j, index) < -IMPROVEMENT_EPS
                {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

/// Counts pairs of non-adjacent tour edges that intersect.
///
/// Exhaustive O(n²); intended for diagnostics and tests.
pub fn count_crossings(tour: &Tour, index: &DistanceIndex) -> usize {
    let n = tour.len();
    if n < 4 {
        return 0;
    }
    let order = tour.order();
    let mut crossings = 0;
    for i in 0..n - 2 {
        let a = index.point(order[i]);
        let b = index.point(order[i + 1]);
        let last = if i == 0 { n - 2 } else { n - 1 };
        for j in (i + 2)..=last {
            let c = index.point(order[j]);
            let d = index.point(order[(j + 1) % n]);
            if segments_intersect(a, b, c, d) {
                crossings += 1;
            }
        }
    }
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn unit_square() -> DistanceIndex {
        DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 1, 0),
            Point::new(2, 1, 1),
            Point::new(3, 0, 1),
        ])
        .expect("valid")
    }

    fn scattered(n: usize) -> DistanceIndex {
        // Deterministic pseudo-random layout
        let points = (0..n)
            .map(|i| {
                let x = ((i * 7919) % 211) as i64;
                let y = ((i * 104_729) % 197) as i64;
                Point::new(i, x, y)
            })
            .collect();
        DistanceIndex::build(points).expect("valid")
    }

    #[test]
    fn test_perimeter_unchanged() {
        let index = unit_square();
        let tour = Tour::new(vec![0, 1, 2, 3], &index).expect("valid");
        let out = CrossingOptimizer::default().optimize(&tour, &index);
        assert_eq!(out, tour);
    }

    #[test]
    fn test_crossing_removed() {
        let index = unit_square();
        // (0,0) → (1,1) → (1,0) → (0,1)
        let tour = Tour::new(vec![0, 2, 1, 3], &index).expect("valid");
        assert!((tour.length() - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-10);
        assert_eq!(count_crossings(&tour, &index), 1);

        let out = CrossingOptimizer::default().optimize(&tour, &index);
        assert!((out.length() - 4.0).abs() < 1e-10);
        assert_eq!(count_crossings(&out, &index), 0);
    }

    #[test]
    fn test_crossing_through_closing_edge() {
        let index = DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 10, 0),
            Point::new(2, 20, 0),
            Point::new(3, 20, 10),
            Point::new(4, 10, 10),
            Point::new(5, 0, 10),
        ])
        .expect("valid");
        // Edge (5,0) closes over (1,4): the tour 0,1,5,3,2,4 zig-zags
        let tour = Tour::new(vec![0, 1, 5, 3, 2, 4], &index).expect("valid");
        let out = CrossingOptimizer::default().optimize(&tour, &index);
        assert!(out.length() < tour.length());
        assert!(out.is_consistent(&index));
    }

    #[test]
    fn test_never_increases_length() {
        let index = scattered(60);
        let order: Vec<usize> = (0..60).map(|i| (i * 37) % 60).collect();
        let tour = Tour::new(order, &index).expect("valid");
        let out = CrossingOptimizer::default().optimize(&tour, &index);
        assert!(out.length() <= tour.length());
        assert!(out.is_consistent(&index));
    }

    #[test]
    fn test_small_tours_untouched() {
        let index = DistanceIndex::build(vec![
            Point::new(0, 0, 0),
            Point::new(1, 4, 0),
            Point::new(2, 0, 3),
        ])
        .expect("valid");
        let tour = Tour::new(vec![0, 2, 1], &index).expect("valid");
        assert_eq!(CrossingOptimizer::default().optimize(&tour, &index), tour);
    }

    #[test]
    fn test_collinear_overlap_terminates() {
        // All points on one line: edges overlap but no reversal improves
        let index = DistanceIndex::build(
            (0..6).map(|i| Point::new(i, i as i64, 0)).collect(),
        )
        .expect("valid");
        let tour = Tour::new(vec![0, 1, 2, 3, 4, 5], &index).expect("valid");
        let out = CrossingOptimizer::default().optimize(&tour, &index);
        assert!(out.length() <= tour.length());
    }

    #[test]
    fn test_window_limits_search() {
        let index = scattered(40);
        let order: Vec<usize> = (0..40).map(|i| (i * 13) % 40).collect();
        let tour = Tour::new(order, &index).expect("valid");
        let narrow = CrossingOptimizer::new(4, 4).optimize(&tour, &index);
        let wide = CrossingOptimizer::new(40, 4).optimize(&tour, &index);
        assert!(narrow.length() <= tour.length());
        assert!(wide.length() <= tour.length());
    }
}
