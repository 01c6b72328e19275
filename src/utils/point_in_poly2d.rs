use crate::math::{Point, Real};

/// Tests if the given point is inside of a polygon with arbitrary orientation,
/// using even-odd ray casting along `+x`.
pub fn point_in_poly2d(pt: &Point<Real>, poly: &[Point<Real>]) -> bool {
    if poly.is_empty() {
        return false;
    }

    let mut inside = false;
    let mut j = poly.len() - 1;

    for i in 0..poly.len() {
        let a = &poly[i];
        let b = &poly[j];

        if (a.y > pt.y) != (b.y > pt.y) {
            let t = (pt.y - a.y) / (b.y - a.y);
            if pt.x < a.x + (b.x - a.x) * t {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}
