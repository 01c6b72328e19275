use crate::math::{Point, Real};
use crate::utils::consts::{ENDPOINT_EPS, INTERSECT_EPS};

/// Computes the strict-interior intersection between the segments `[a, b]`
/// and `[c, d]`.
///
/// Returns `None` for parallel or collinear segments, and for intersections
/// occurring at (or within [`INTERSECT_EPS`] of) an endpoint of either
/// segment. This is the test used for obstruction queries, where touching an
/// endpoint does not count as crossing.
pub fn segments_intersect_strict(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> Option<Point<Real>> {
    let dir1 = b - a;
    let dir2 = d - c;
    let denom = dir1.perp(&dir2);

    if ulps_eq!(denom, 0.0) {
        return None;
    }

    let diff = c - a;
    let t = diff.perp(&dir2) / denom;
    let u = diff.perp(&dir1) / denom;

    if t > INTERSECT_EPS
        && t < 1.0 - INTERSECT_EPS
        && u > INTERSECT_EPS
        && u < 1.0 - INTERSECT_EPS
    {
        Some(a + dir1 * t)
    } else {
        None
    }
}

/// Computes the intersection parameters of the line carried by `[p1, p2]`
/// against the segment `[q1, q2]`.
///
/// The parameters `(u, v)` locate the intersection along `p1 → p2` and
/// `q1 → q2` respectively. Both are accepted in
/// `[-ENDPOINT_EPS, 1 + ENDPOINT_EPS]` and clamped to `[0, 1]`, so a cut
/// grazing a vertex still reports a hit on both incident edges.
pub fn line_hits_segment(
    p1: &Point<Real>,
    p2: &Point<Real>,
    q1: &Point<Real>,
    q2: &Point<Real>,
) -> Option<(Real, Real)> {
    let dp = p2 - p1;
    let dq = q2 - q1;
    let denom = dp.perp(&dq);

    if ulps_eq!(denom, 0.0) {
        return None;
    }

    let diff = q1 - p1;
    let u = diff.perp(&dq) / denom;
    let v = diff.perp(&dp) / denom;

    if u >= -ENDPOINT_EPS && u <= 1.0 + ENDPOINT_EPS && v >= -ENDPOINT_EPS && v <= 1.0 + ENDPOINT_EPS
    {
        Some((u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments() {
        let p = segments_intersect_strict(
            &Point::new(-1.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(0.0, -1.0),
            &Point::new(0.0, 1.0),
        )
        .unwrap();
        assert!(relative_eq!(p.x, 0.0));
        assert!(relative_eq!(p.y, 0.0));
    }

    #[test]
    fn endpoint_touch_is_not_strict() {
        // The second segment starts exactly on the first one.
        assert!(segments_intersect_strict(
            &Point::new(-1.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(0.0, 0.0),
            &Point::new(0.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn parallel_segments() {
        assert!(segments_intersect_strict(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn line_hit_reports_both_parameters() {
        let (u, v) = line_hits_segment(
            &Point::new(-2.0, 0.0),
            &Point::new(2.0, 0.0),
            &Point::new(1.0, -1.0),
            &Point::new(1.0, 1.0),
        )
        .unwrap();
        assert!(relative_eq!(u, 0.75));
        assert!(relative_eq!(v, 0.5));
    }

    #[test]
    fn line_hit_tolerates_vertex_graze() {
        // The segment ends exactly on the line: v = 1 must still be accepted.
        let (_, v) = line_hits_segment(
            &Point::new(-2.0, 0.0),
            &Point::new(2.0, 0.0),
            &Point::new(1.0, -1.0),
            &Point::new(1.0, 0.0),
        )
        .unwrap();
        assert_eq!(v, 1.0);
    }

    #[test]
    fn line_miss() {
        assert!(line_hits_segment(
            &Point::new(-2.0, 0.0),
            &Point::new(2.0, 0.0),
            &Point::new(1.0, 1.0),
            &Point::new(1.0, 2.0),
        )
        .is_none());
    }
}
