//! Point type.

use serde::{Deserialize, Serialize};

/// A location to visit, with integer planar coordinates.
///
/// The `id` is the caller's identifier and must be unique within one
/// instance. Inside the crate, points are addressed by their position in
/// the [`DistanceIndex`](crate::distance::DistanceIndex), never by value,
/// so two points sharing coordinates stay distinct.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
///
/// let a = Point::new(1, 0, 0);
/// let b = Point::new(2, 3, 4);
/// assert_eq!(b.id(), 2);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    id: usize,
    x: i64,
    y: i64,
}

impl Point {
    /// Creates a new point.
    pub fn new(id: usize, x: i64, y: i64) -> Self {
        Self { id, x, y }
    }

    /// Caller-supplied identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (self.x as i128 - other.x as i128) as f64;
        let dy = (self.y as i128 - other.y as i128) as f64;
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(3, -10, 20);
        assert_eq!(p.id(), 3);
        assert_eq!(p.x(), -10);
        assert_eq!(p.y(), 20);
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0, 0, 0);
        let b = Point::new(1, 3, 4);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!(a.distance_to(&a).abs() < 1e-10);
    }

    #[test]
    fn test_point_distance_symmetric() {
        let a = Point::new(0, 1, 2);
        let b = Point::new(1, 4, 6);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn test_point_distance_extreme_coordinates() {
        let a = Point::new(0, i64::MIN, 0);
        let b = Point::new(1, i64::MAX, 0);
        let expected = i64::MAX as f64 - i64::MIN as f64;
        assert_eq!(a.distance_to(&b), expected);
        assert_eq!(b.distance_to(&a), expected);

        let c = Point::new(2, i64::MIN, i64::MIN);
        let d = Point::new(3, i64::MAX, i64::MAX);
        assert!((c.distance_to(&d) - expected * 2f64.sqrt()).abs() <= expected * 1e-12);
    }

    #[test]
    fn test_same_coordinates_distinct_ids() {
        let a = Point::new(0, 5, 5);
        let b = Point::new(1, 5, 5);
        assert_ne!(a, b);
        assert_eq!(a.distance_to(&b), 0.0);
    }
}
