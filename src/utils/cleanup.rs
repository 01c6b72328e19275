use crate::math::{Point, Real};
use crate::utils::consts::EPS_COINCIDE_SQ;

/// Removes consecutive coincident vertices from the closed loop `pts`,
/// including a trailing vertex coincident with the first one.
///
/// Two vertices are coincident when their squared distance is below
/// [`EPS_COINCIDE_SQ`](crate::utils::consts::EPS_COINCIDE_SQ).
pub fn dedup_coincident(pts: &mut Vec<Point<Real>>) {
    if pts.len() < 2 {
        return;
    }

    let mut write = 1;
    for read in 1..pts.len() {
        if na::distance_squared(&pts[write - 1], &pts[read]) >= EPS_COINCIDE_SQ {
            pts[write] = pts[read];
            write += 1;
        }
    }
    pts.truncate(write);

    // The loop is implicitly closed: the last vertex may coincide with the first.
    while pts.len() > 1 {
        let last = pts.len() - 1;
        if na::distance_squared(&pts[last], &pts[0]) < EPS_COINCIDE_SQ {
            let _ = pts.pop();
        } else {
            break;
        }
    }
}
