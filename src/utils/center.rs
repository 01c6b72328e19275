use crate::math::{Point, Real, Vector};
use crate::utils::winding::signed_area;

/// Computes the center of a set of points.
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let denom: Real = 1.0 / (pts.len() as Real);

    let mut piter = pts.iter();
    let mut res = *piter.next().unwrap() * denom;

    for pt in piter {
        res += pt.coords * denom;
    }

    res
}

/// Computes the area-weighted centroid of the closed loop `pts`.
///
/// Falls back to the vertex average when the loop encloses a near-zero area,
/// where the shoelace-weighted formula becomes ill-conditioned.
pub fn polygon_centroid(pts: &[Point<Real>]) -> Point<Real> {
    let area = signed_area(pts);

    if area.abs() < 1.0e-9 {
        return center(pts);
    }

    let mut acc = Vector::zeros();
    let mut j = pts.len() - 1;

    for i in 0..pts.len() {
        let cross = pts[j].coords.perp(&pts[i].coords);
        acc += (pts[j].coords + pts[i].coords) * cross;
        j = i;
    }

    Point::from(acc / (6.0 * area))
}
