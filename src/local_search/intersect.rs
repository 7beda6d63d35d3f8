//! Segment intersection predicate.

use crate::models::Point;

/// Sign of the turn `o → a → b`: positive for counter-clockwise, negative
/// for clockwise, zero when collinear.
fn orientation(o: &Point, a: &Point, b: &Point) -> i128 {
    let (ox, oy) = (o.x() as i128, o.y() as i128);
    (a.x() as i128 - ox) * (b.y() as i128 - oy) - (a.y() as i128 - oy) * (b.x() as i128 - ox)
}

/// Whether `q`, known to be collinear with `p`–`r`, lies within their bounding box.
fn on_segment(p: &Point, q: &Point, r: &Point) -> bool {
    q.x() >= p.x().min(r.x())
        && q.x() <= p.x().max(r.x())
        && q.y() >= p.y().min(r.y())
        && q.y() <= p.y().max(r.y())
}

/// Returns `true` if segment `p1`–`p2` and segment `p3`–`p4` share a point.
///
/// Uses exact integer cross products, so touching and collinear-overlapping
/// segments count as intersecting and axis-aligned edges need no tolerance.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::local_search::segments_intersect;
///
/// let a = Point::new(0, 0, 0);
/// let b = Point::new(1, 2, 2);
/// let c = Point::new(2, 0, 2);
/// let d = Point::new(3, 2, 0);
/// assert!(segments_intersect(&a, &b, &c, &d));
/// assert!(!segments_intersect(&a, &d, &c, &b));
/// ```
pub fn segments_intersect(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> bool {
    let d1 = orientation(p3, p4, p1).signum();
    let d2 = orientation(p3, p4, p2).signum();
    let d3 = orientation(p1, p2, p3).signum();
    let d4 = orientation(p1, p2, p4).signum();

    if d1 * d2 < 0 && d3 * d4 < 0 {
        return true;
    }

    (d1 == 0 && on_segment(p3, p1, p4))
        || (d2 == 0 && on_segment(p3, p2, p4))
        || (d3 == 0 && on_segment(p1, p3, p2))
        || (d4 == 0 && on_segment(p1, p4, p2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(0, x, y)
    }

    #[test]
    fn test_proper_crossing() {
        assert!(segments_intersect(&p(0, 0), &p(1, 1), &p(1, 0), &p(0, 1)));
    }

    #[test]
    fn test_parallel_disjoint() {
        assert!(!segments_intersect(&p(0, 0), &p(1, 0), &p(0, 1), &p(1, 1)));
    }

    #[test]
    fn test_axis_aligned_cross() {
        assert!(segments_intersect(&p(0, 5), &p(10, 5), &p(5, 0), &p(5, 10)));
    }

    #[test]
    fn test_axis_aligned_miss() {
        assert!(!segments_intersect(&p(0, 5), &p(4, 5), &p(5, 0), &p(5, 10)));
    }

    #[test]
    fn test_touching_endpoint() {
        assert!(segments_intersect(&p(0, 0), &p(2, 2), &p(2, 2), &p(4, 0)));
    }

    #[test]
    fn test_collinear_overlap() {
        assert!(segments_intersect(&p(0, 0), &p(4, 0), &p(2, 0), &p(6, 0)));
    }

    #[test]
    fn test_collinear_disjoint() {
        assert!(!segments_intersect(&p(0, 0), &p(1, 0), &p(2, 0), &p(3, 0)));
    }

    #[test]
    fn test_large_coordinates() {
        let big = 3_000_000_000_000;
        assert!(segments_intersect(
            &p(-big, -big),
            &p(big, big),
            &p(-big, big),
            &p(big, -big)
        ));
    }
}
