use crate::math::{Point, Real};

/// The winding direction of a closed loop of vertices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winding {
    /// Counter-clockwise, i.e. positive signed area. Outer boundaries.
    Ccw,
    /// Clockwise, i.e. negative signed area. Holes.
    Cw,
}

/// Computes the signed area of the closed loop `pts` with the shoelace
/// formula. Positive means counter-clockwise.
pub fn signed_area(pts: &[Point<Real>]) -> Real {
    if pts.len() < 3 {
        return 0.0;
    }

    let mut acc = 0.0;
    let mut j = pts.len() - 1;

    for i in 0..pts.len() {
        acc += pts[j].coords.perp(&pts[i].coords);
        j = i;
    }

    acc * 0.5
}

/// Reverses `pts` in place if its winding does not match `winding`.
///
/// Loops with fewer than three vertices (or zero area) are left untouched.
pub fn ensure_winding(pts: &mut [Point<Real>], winding: Winding) {
    let area = signed_area(pts);

    let reverse = match winding {
        Winding::Ccw => area < 0.0,
        Winding::Cw => area > 0.0,
    };

    if reverse {
        pts.reverse();
    }
}
