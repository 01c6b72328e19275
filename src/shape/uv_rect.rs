use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// A host-supplied reference rectangle mapping world positions to `[0, 1]²`
/// texture coordinates.
///
/// The engine never modifies this rectangle: fragments of fragments keep
/// receiving the ancestral rectangle so their texturing does not drift as
/// they are sliced again.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    /// The world-space position mapped to the `(0, 0)` texture coordinate.
    pub mins: Point<Real>,
    /// The world-space width of the rectangle.
    pub width: Real,
    /// The world-space height of the rectangle.
    pub height: Real,
}

impl UvRect {
    /// Creates a new reference rectangle.
    #[inline]
    pub fn new(mins: Point<Real>, width: Real, height: Real) -> Self {
        Self { mins, width, height }
    }

    /// The reference rectangle snugly wrapping `aabb`.
    #[inline]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let extents = aabb.extents();
        Self::new(aabb.mins, extents.x, extents.y)
    }

    /// Maps the world position `p` to its texture coordinates.
    #[inline]
    pub fn uv(&self, p: &Point<Real>) -> [Real; 2] {
        [(p.x - self.mins.x) / self.width, (p.y - self.mins.y) / self.height]
    }

    /// The larger of the rectangle's two extents.
    #[inline]
    pub fn max_extent(&self) -> Real {
        self.width.max(self.height)
    }
}
