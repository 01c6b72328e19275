use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Segment;
use crate::utils::consts::{EPS_ENDPOINT_MATCH_SQ, MAX_LEAF};
use crate::utils::segments_intersect_strict;

/// One node of a flat AABB tree.
///
/// A node is a leaf when `count > 0`; it then refers to the id range
/// `first..first + count` of the reordered id array. Internal nodes refer to
/// their children by index and keep `count == 0`.
#[derive(Copy, Clone, Debug)]
struct FlatNode {
    aabb: Aabb,
    children: [u32; 2],
    first: u32,
    count: u32,
}

/// A flat, static AABB tree over a set of indexed bounding boxes.
///
/// Built once by in-place partitioning, then queried without any pointer
/// chasing: the whole tree is two contiguous arrays. Leaves hold at most
/// [`MAX_LEAF`](crate::utils::consts::MAX_LEAF) items.
#[derive(Clone, Debug, Default)]
pub struct FlatAabbTree {
    nodes: Vec<FlatNode>,
    ids: Vec<u32>,
}

impl FlatAabbTree {
    /// Builds a tree over `aabbs`, where the i-th box keeps the id `i`.
    pub fn from_aabbs(aabbs: &[Aabb]) -> Self {
        let mut tree = FlatAabbTree {
            nodes: Vec::with_capacity(aabbs.len() * 2),
            ids: (0..aabbs.len() as u32).collect(),
        };

        if !aabbs.is_empty() {
            let _ = tree.build_node(aabbs, 0, aabbs.len());
        }

        tree
    }

    /// Recursively builds the node covering `ids[start..end]` and returns its index.
    fn build_node(&mut self, aabbs: &[Aabb], start: usize, end: usize) -> u32 {
        let mut aabb = Aabb::new_invalid();
        for &id in &self.ids[start..end] {
            aabb.merge(&aabbs[id as usize]);
        }

        let node_id = self.nodes.len() as u32;
        self.nodes.push(FlatNode {
            aabb,
            children: [0; 2],
            first: start as u32,
            count: 0,
        });

        if end - start <= MAX_LEAF {
            self.nodes[node_id as usize].count = (end - start) as u32;
            return node_id;
        }

        // Hoare-style partition of the id range by box center along the
        // longest axis of the subrange's bounds.
        let axis = aabb.longest_axis();
        let mid_val = aabb.center()[axis];
        let mut i = start;
        let mut j = end;

        while i < j {
            if aabbs[self.ids[i] as usize].center()[axis] < mid_val {
                i += 1;
            } else {
                j -= 1;
                self.ids.swap(i, j);
            }
        }

        let mut split = i;
        if split == start || split == end {
            // Degenerate partition (identical centers): split at half-count.
            split = start + (end - start) / 2;
        }

        let left = self.build_node(aabbs, start, split);
        let right = self.build_node(aabbs, split, end);
        self.nodes[node_id as usize].children = [left, right];
        node_id
    }

    /// Visits the ids of every leaf whose subtree bounds intersect `aabb`.
    ///
    /// The visitor returns `true` to stop the traversal; the call then
    /// returns `true` as well. An empty tree returns `false`.
    pub fn any_in_aabb(&self, aabb: &Aabb, f: &mut impl FnMut(u32) -> bool) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        self.any_in_aabb_rec(0, aabb, f)
    }

    fn any_in_aabb_rec(&self, node: u32, aabb: &Aabb, f: &mut impl FnMut(u32) -> bool) -> bool {
        let n = &self.nodes[node as usize];

        if !n.aabb.intersects(aabb) {
            return false;
        }

        if n.count > 0 {
            for k in n.first..n.first + n.count {
                if f(self.ids[k as usize]) {
                    return true;
                }
            }
            false
        } else {
            self.any_in_aabb_rec(n.children[0], aabb, f)
                || self.any_in_aabb_rec(n.children[1], aabb, f)
        }
    }

    /// Visits the ids of every leaf whose subtree bounds contain `point`.
    pub fn for_each_containing(&self, point: &Point<Real>, f: &mut impl FnMut(u32)) {
        if self.nodes.is_empty() {
            return;
        }
        self.for_each_containing_rec(0, point, f);
    }

    fn for_each_containing_rec(&self, node: u32, point: &Point<Real>, f: &mut impl FnMut(u32)) {
        let n = &self.nodes[node as usize];

        if !n.aabb.contains_local_point(point) {
            return;
        }

        if n.count > 0 {
            for k in n.first..n.first + n.count {
                f(self.ids[k as usize]);
            }
        } else {
            self.for_each_containing_rec(n.children[0], point, f);
            self.for_each_containing_rec(n.children[1], point, f);
        }
    }
}

/// A static AABB tree over a set of segments, answering segment-vs-set
/// obstruction queries.
///
/// Segment bounds are padded (see [`Segment::padded_aabb`]) before the tree
/// is built, so axis-aligned edges cannot be missed by the overlap culling.
#[derive(Clone, Debug, Default)]
pub struct SegmentTree {
    segments: Vec<Segment>,
    tree: FlatAabbTree,
}

impl SegmentTree {
    /// Builds the tree over `segments`.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let aabbs: Vec<Aabb> = segments.iter().map(|seg| seg.padded_aabb()).collect();
        Self {
            segments,
            tree: FlatAabbTree::from_aabbs(&aabbs),
        }
    }

    /// The segments this tree was built over, in their original order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Does `query` cross the strict interior of any stored segment?
    ///
    /// Stored segments sharing an endpoint with `query` (within
    /// [`EPS_ENDPOINT_MATCH_SQ`](crate::utils::consts::EPS_ENDPOINT_MATCH_SQ))
    /// are ignored, so a bridge anchored on a polygon vertex is not occluded
    /// by the edges incident to that vertex. Returns on the first hit; an
    /// empty tree returns `false`.
    pub fn intersects_interior(&self, query: &Segment) -> bool {
        let query_aabb = query.aabb();

        self.tree.any_in_aabb(&query_aabb, &mut |id| {
            let seg = &self.segments[id as usize];

            if seg.shares_endpoint_with(query, EPS_ENDPOINT_MATCH_SQ) {
                return false;
            }

            segments_intersect_strict(&seg.a, &seg.b, &query.a, &query.b).is_some()
        })
    }
}

/// A static AABB tree over a set of indexed bounding boxes, answering
/// point-containment candidate queries.
///
/// Used by hierarchy assignment: leaves store solid indices and the query
/// enumerates every solid whose bounds contain a hole centroid.
#[derive(Clone, Debug, Default)]
pub struct AabbTree {
    aabbs: Vec<Aabb>,
    tree: FlatAabbTree,
}

impl AabbTree {
    /// Builds the tree over `aabbs`; the i-th box keeps the id `i`.
    pub fn from_aabbs(aabbs: Vec<Aabb>) -> Self {
        let tree = FlatAabbTree::from_aabbs(&aabbs);
        Self { aabbs, tree }
    }

    /// Calls `f` with the id of every box containing `point`.
    pub fn for_each_containing(&self, point: &Point<Real>, mut f: impl FnMut(u32)) {
        self.tree.for_each_containing(point, &mut |id| {
            if self.aabbs[id as usize].contains_local_point(point) {
                f(id);
            }
        })
    }
}
