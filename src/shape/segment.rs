//! Definition of the segment shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::utils::consts::AABB_PAD;

/// A line segment shape.
///
/// The segment is directed: it goes from `a` toward `b`. Boundary edges of a
/// polygon and cut seams are both represented with this type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Segment {
    /// The first endpoint of the segment.
    pub a: Point<Real>,
    /// The second endpoint of the segment.
    pub b: Point<Real>,
}

impl Segment {
    /// Creates a new segment from its endpoints.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment, scaled by its length.
    ///
    /// Points from `a` toward `b`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The squared length of this segment.
    #[inline]
    pub fn length_squared(&self) -> Real {
        self.scaled_direction().norm_squared()
    }

    /// The length of this segment.
    #[inline]
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// The axis-aligned bounding box of this segment.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.a.inf(&self.b), self.a.sup(&self.b))
    }

    /// The bounding box of this segment, grown by
    /// [`AABB_PAD`](crate::utils::consts::AABB_PAD) on every side.
    ///
    /// An exactly axis-aligned segment has a degenerate (zero-thickness)
    /// bounding box; the padding keeps overlap culling conservative for it.
    #[inline]
    pub fn padded_aabb(&self) -> Aabb {
        self.aabb().loosened(AABB_PAD)
    }

    /// Does one of this segment's endpoints coincide with an endpoint of
    /// `other`, within the squared distance `eps_sq`?
    #[inline]
    pub fn shares_endpoint_with(&self, other: &Segment, eps_sq: Real) -> bool {
        na::distance_squared(&self.a, &other.a) < eps_sq
            || na::distance_squared(&self.a, &other.b) < eps_sq
            || na::distance_squared(&self.b, &other.a) < eps_sq
            || na::distance_squared(&self.b, &other.b) < eps_sq
    }
}
