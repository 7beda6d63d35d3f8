//! Dense distance index with per-point neighbor rankings.

use std::collections::HashSet;

use crate::error::{Result, TspError};
use crate::models::Point;

/// Precomputed Euclidean distances plus, for every point, all other points
/// ranked by ascending distance.
///
/// Points are addressed by their position in the input slice. Distances are
/// stored in a row-major n×n grid; rankings break distance ties by the
/// caller's point id so construction is deterministic. The index is never
/// mutated after [`build`](Self::build), so it can be shared across search
/// workers without locking.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceIndex;
///
/// let index = DistanceIndex::build(vec![
///     Point::new(1, 0, 0),
///     Point::new(2, 3, 4),
///     Point::new(3, 0, 8),
/// ]).unwrap();
/// assert!((index.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(index.ranked(0), &[1, 2]);
/// assert_eq!(index.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    points: Vec<Point>,
    data: Vec<f64>,
    ranked: Vec<Vec<usize>>,
}

impl DistanceIndex {
    /// Builds the index from the full point set.
    ///
    /// An empty point set yields an empty index; tour construction is what
    /// rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::DuplicatePointId`] if two points share an id.
    pub fn build(points: Vec<Point>) -> Result<Self> {
        let mut ids = HashSet::with_capacity(points.len());
        for p in &points {
            if !ids.insert(p.id()) {
                return Err(TspError::DuplicatePointId { id: p.id() });
            }
        }

        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        let ranked = (0..n)
            .map(|i| {
                let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                others.sort_by(|&a, &b| {
                    data[i * n + a]
                        .total_cmp(&data[i * n + b])
                        .then_with(|| points[a].id().cmp(&points[b].id()))
                });
                others
            })
            .collect();

        Ok(Self {
            points,
            data,
            ranked,
        })
    }

    /// Returns the distance between positions `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.points.len() + to]
    }

    /// All other positions ranked by ascending distance from `from`.
    pub fn ranked(&self, from: usize) -> &[usize] {
        &self.ranked[from]
    }

    /// Nearest position to `from` not flagged in `visited`.
    ///
    /// Scans the ranked list, skipping visited entries.
    pub fn nearest_unvisited(&self, from: usize, visited: &[bool]) -> Option<usize> {
        self.ranked[from].iter().copied().find(|&p| !visited[p])
    }

    /// The point stored at `position`.
    pub fn point(&self, position: usize) -> &Point {
        &self.points[position]
    }

    /// All indexed points, in input order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the stored grid is symmetric within the tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }
}
