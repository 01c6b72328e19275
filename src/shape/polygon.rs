use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Segment;
use crate::utils::{self, Winding};

/// A simple planar polygon with zero or more holes.
///
/// The outer boundary is wound counter-clockwise and every hole clockwise;
/// the constructor enforces both, and removes consecutive coincident
/// vertices. Holes are expected to lie strictly inside the outer boundary
/// and to be pairwise disjoint; violating that precondition yields
/// unspecified (but non-panicking) slicing results.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    outer: Vec<Point<Real>>,
    holes: Vec<Vec<Point<Real>>>,
}

impl Polygon {
    /// Builds a new polygon from an outer loop and a set of hole loops.
    ///
    /// Both kinds of loops are implicitly closed (an edge joins the last
    /// vertex back to the first). Winding is normalized here, so the loops
    /// may be supplied in any order. Hole loops degenerating to fewer than
    /// three vertices after coincidence cleanup are dropped.
    pub fn new(outer: Vec<Point<Real>>, holes: Vec<Vec<Point<Real>>>) -> Self {
        let mut outer = outer;
        utils::dedup_coincident(&mut outer);
        utils::ensure_winding(&mut outer, Winding::Ccw);

        let mut cleaned_holes = Vec::with_capacity(holes.len());
        for mut hole in holes {
            utils::dedup_coincident(&mut hole);
            if hole.len() >= 3 {
                utils::ensure_winding(&mut hole, Winding::Cw);
                cleaned_holes.push(hole);
            }
        }

        Self {
            outer,
            holes: cleaned_holes,
        }
    }

    /// The outer boundary of this polygon, wound counter-clockwise.
    #[inline]
    pub fn outer(&self) -> &[Point<Real>] {
        &self.outer
    }

    /// The holes of this polygon, each wound clockwise.
    #[inline]
    pub fn holes(&self) -> &[Vec<Point<Real>>] {
        &self.holes
    }

    /// The signed area of this polygon: the (positive) outer area plus the
    /// (negative) signed areas of the holes.
    pub fn signed_area(&self) -> Real {
        let mut area = utils::signed_area(&self.outer);
        for hole in &self.holes {
            area += utils::signed_area(hole);
        }
        area
    }

    /// Compute the axis-aligned bounding box of the polygon.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.outer)
    }

    /// Does the interior of this polygon contain `point`?
    ///
    /// Uses even-odd containment: a point inside a hole is outside the
    /// polygon.
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        utils::point_in_poly2d(point, &self.outer)
            && !self
                .holes
                .iter()
                .any(|hole| utils::point_in_poly2d(point, hole))
    }

    /// Iterates over every boundary segment of this polygon: the outer
    /// loop's edges followed by each hole's edges.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        loop_segments(&self.outer).chain(
            self.holes
                .iter()
                .flat_map(|hole| loop_segments(hole)),
        )
    }

    /// Total number of vertices across the outer loop and every hole.
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(|h| h.len()).sum::<usize>()
    }
}

/// Iterates over the edges of a single implicitly-closed loop.
pub fn loop_segments(pts: &[Point<Real>]) -> impl Iterator<Item = Segment> + '_ {
    (0..pts.len()).map(move |i| Segment::new(pts[i], pts[(i + 1) % pts.len()]))
}
