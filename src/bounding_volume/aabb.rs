//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};
use num::Bounded;

/// An Axis Aligned Bounding Box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates of this AABB.
    pub mins: Point<Real>,
    /// The point with the highest coordinates of this AABB.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new Aabb.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid Aabb with `mins` components set to `Real::max_value` and `maxs`
    /// components set to `-Real::max_value`.
    ///
    /// This is often used as the initial value of some Aabb merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new Aabb from a set of points.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.take_point(*pt);
        }

        result
    }

    /// The center of this Aabb.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this Aabb.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = na::convert::<f64, Real>(0.5);
        (self.maxs - self.mins) * half
    }

    /// The extents of this Aabb.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this Aabb so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// The smallest Aabb that contains both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Enlarges this Aabb so it also contains `other`.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        *self = self.merged(other);
    }

    /// This Aabb, dilated by `amount` on every side.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        debug_assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }

    /// Does this Aabb intersect `other`?
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.mins.x <= other.maxs.x
            && other.mins.x <= self.maxs.x
            && self.mins.y <= other.maxs.y
            && other.mins.y <= self.maxs.y
    }

    /// Does this Aabb contain `point`?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        point.x >= self.mins.x
            && point.x <= self.maxs.x
            && point.y >= self.mins.y
            && point.y <= self.maxs.y
    }

    /// The index (0 = `x`, 1 = `y`) of the axis along which this Aabb is the largest.
    #[inline]
    pub fn longest_axis(&self) -> usize {
        let extents = self.extents();
        if extents.x >= extents.y {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_and_queries() {
        let aabb = Aabb::from_points(&[
            Point::new(-1.0, 2.0),
            Point::new(3.0, -4.0),
            Point::new(0.0, 0.0),
        ]);

        assert_eq!(aabb.mins, Point::new(-1.0, -4.0));
        assert_eq!(aabb.maxs, Point::new(3.0, 2.0));
        assert!(aabb.contains_local_point(&Point::new(0.0, 0.0)));
        assert!(!aabb.contains_local_point(&Point::new(0.0, 3.0)));
    }

    #[test]
    fn intersects_is_inclusive() {
        let a = Aabb::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Aabb::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        let c = Aabb::new(Point::new(1.1, 1.1), Point::new(2.0, 2.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn loosened_grows_every_side() {
        let aabb = Aabb::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).loosened(0.5);
        assert_eq!(aabb.mins, Point::new(-0.5, -0.5));
        assert_eq!(aabb.maxs, Point::new(1.5, 1.5));
    }
}
