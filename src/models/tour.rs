//! Tour type.

use crate::distance::DistanceIndex;
use crate::error::{Result, TspError};

/// A closed route visiting every indexed point exactly once.
///
/// The order holds positions into a [`DistanceIndex`] (not point ids), and
/// the last entry connects back to the first. A tour is immutable: swaps and
/// reversals return a new tour whose length is recomputed from its own
/// sequence.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceIndex;
///
/// let index = DistanceIndex::build(vec![
///     Point::new(1, 0, 0),
///     Point::new(2, 1, 0),
///     Point::new(3, 1, 1),
///     Point::new(4, 0, 1),
/// ]).unwrap();
///
/// let tour = Tour::new(vec![0, 1, 2, 3], &index).unwrap();
/// assert!((tour.length() - 4.0).abs() < 1e-10);
/// assert_eq!(tour.point_ids(&index), vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Creates a tour from a visiting order of index positions.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidTour`] if `order` is not a permutation of
    /// `0..index.len()`.
    pub fn new(order: Vec<usize>, index: &DistanceIndex) -> Result<Self> {
        let n = index.len();
        if order.len() != n {
            return Err(TspError::invalid_tour(format!(
                "expected {n} positions, got {}",
                order.len()
            )));
        }
        let mut seen = vec![false; n];
        for &p in &order {
            if p >= n {
                return Err(TspError::invalid_tour(format!("position {p} out of range")));
            }
            if seen[p] {
                return Err(TspError::invalid_tour(format!("position {p} repeated")));
            }
            seen[p] = true;
        }
        Ok(Self::from_order(order, index))
    }

    /// Builds a tour from an order already known to be a permutation.
    pub(crate) fn from_order(order: Vec<usize>, index: &DistanceIndex) -> Self {
        let length = tour_length(&order, index);
        Self { order, length }
    }

    /// Index positions in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of points in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no points.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Closed tour length, including the edge back to the start.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Caller-supplied point ids in visiting order.
    pub fn point_ids(&self, index: &DistanceIndex) -> Vec<usize> {
        self.order.iter().map(|&p| index.point(p).id()).collect()
    }

    /// Returns `true` if the carried length matches a fresh recomputation.
    pub fn is_consistent(&self, index: &DistanceIndex) -> bool {
        (tour_length(&self.order, index) - self.length).abs() <= 1e-9 * self.length.max(1.0)
    }

    /// Length of every edge; entry `k` is the edge from position `k` to
    /// position `k + 1` (wrapping).
    pub fn edge_lengths(&self, index: &DistanceIndex) -> Vec<f64> {
        let n = self.order.len();
        (0..n)
            .map(|k| index.get(self.order[k], self.order[(k + 1) % n]))
            .collect()
    }

    /// Length change caused by swapping the points at positions `i` and `j`.
    pub fn swap_delta(&self, i: usize, j: usize, index: &DistanceIndex) -> f64 {
        let n = self.order.len();
        if i == j || n < 2 {
            return 0.0;
        }
        let at = |p: usize| {
            let q = if p == i {
                j
            } else if p == j {
                i
            } else {
                p
            };
            self.order[q]
        };

        // Edges starting at these positions are the only ones touched.
        let mut starts = [(i + n - 1) % n, i, (j + n - 1) % n, j];
        starts.sort_unstable();

        let mut delta = 0.0;
        let mut prev = None;
        for &s in &starts {
            if prev == Some(s) {
                continue;
            }
            prev = Some(s);
            let t = (s + 1) % n;
            delta += index.get(at(s), at(t)) - index.get(self.order[s], self.order[t]);
        }
        delta
    }

    /// Length change caused by reversing positions `i + 1 ..= j`.
    ///
    /// Requires `i < j`.
    pub fn two_opt_delta(&self, i: usize, j: usize, index: &DistanceIndex) -> f64 {
        let n = self.order.len();
        let a = self.order[i];
        let b = self.order[i + 1];
        let c = self.order[j];
        let d = self.order[(j + 1) % n];
        index.get(a, c) + index.get(b, d) - index.get(a, b) - index.get(c, d)
    }

    /// Returns a new tour with the points at positions `i` and `j` exchanged.
    pub fn swapped(&self, i: usize, j: usize, index: &DistanceIndex) -> Self {
        let mut order = self.order.clone();
        order.swap(i, j);
        Self::from_order(order, index)
    }

    /// Returns a new tour with positions `from ..= to` reversed.
    pub fn with_reversed_segment(&self, from: usize, to: usize, index: &DistanceIndex) -> Self {
        let mut order = self.order.clone();
        order[from..=to].reverse();
        Self::from_order(order, index)
    }

    /// Returns the same cycle started `k` positions later.
    pub fn rotated(&self, k: usize, index: &DistanceIndex) -> Self {
        let mut order = self.order.clone();
        if !order.is_empty() {
            let k = k % order.len();
            order.rotate_left(k);
        }
        Self::from_order(order, index)
    }

    /// Returns the same cycle traversed in the opposite direction.
    pub fn reversed(&self, index: &DistanceIndex) -> Self {
        let mut order = self.order.clone();
        order.reverse();
        Self::from_order(order, index)
    }

    /// Position of the given index entry in this tour.
    pub fn position_of(&self, point: usize) -> Option<usize> {
        self.order.iter().position(|&p| p == point)
    }
}

/// Computes the closed length of a visiting order:
/// `order[0] → order[1] → ... → order[n-1] → order[0]`.
pub fn tour_length(order: &[usize], index: &DistanceIndex) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }
    let mut dist = 0.0;
    for w in order.windows(2) {
        dist += index.get(w[0], w[1]);
    }
    dist + index.get(order[n - 1], order[0])
}
