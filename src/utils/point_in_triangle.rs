//! Function to check if a point is inside a triangle and related functions.

use crate::math::{Point, Real};

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
/// The orientation or winding direction of a corner or polygon.
pub enum Orientation {
    /// Counter-clockwise
    Ccw,
    /// Clockwise
    Cw,
    /// Neither (a straight line)
    None,
}

/// Returns the orientation of the corner `p1, p2, p3`, i.e. the sign of the
/// 2D cross product `(p2 - p1) × (p3 - p1)`.
///
/// A positive cross product means the corner turns counter-clockwise:
/// o p3
///  .        o p2
///   .     .
///    .  .
///     o p1
pub fn corner_direction(p1: &Point<Real>, p2: &Point<Real>, p3: &Point<Real>) -> Orientation {
    let v1 = p2 - p1;
    let v2 = p3 - p1;
    let cross: Real = v1.perp(&v2);

    if cross > 0.0 {
        Orientation::Ccw
    } else if cross < 0.0 {
        Orientation::Cw
    } else {
        // Catches both an exact zero and NaN from degenerate inputs.
        Orientation::None
    }
}

/// Returns `true` if `p` lies strictly inside the counter-clockwise triangle
/// `v1, v2, v3`.
///
/// Points lying on an edge or on a vertex of the triangle are reported as
/// outside. This is what allows the duplicated bridge junctions produced by
/// hole stitching to sit on an ear boundary without blocking it.
pub fn is_point_strictly_in_triangle(
    p: &Point<Real>,
    v1: &Point<Real>,
    v2: &Point<Real>,
    v3: &Point<Real>,
) -> bool {
    corner_direction(v1, v2, p) == Orientation::Ccw
        && corner_direction(v2, v3, p) == Orientation::Ccw
        && corner_direction(v3, v1, p) == Orientation::Ccw
}
