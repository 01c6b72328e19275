//! Stitching the holes of a polygon into its outer ring.
//!
//! Each hole is joined to the outer boundary by a bridge: a pair of
//! coincident edges traversed once in each direction. The result is a single
//! simple polygon whose signed area equals the outer area plus the (negative)
//! hole areas, ready for ear clipping.

use ordered_float::OrderedFloat;

use crate::math::{Point, Real};
use crate::partitioning::SegmentTree;
use crate::shape::{loop_segments, Segment};
use crate::utils::consts::MAX_RING_NODES;
use crate::utils::segments_intersect_strict;

struct RingNode {
    position: Point<Real>,
    prev: u32,
    next: u32,
}

/// Arena of doubly-linked ring nodes addressed by `u32` handles.
///
/// Bridge junctions need vertices that are geometrically coincident yet
/// topologically distinct; handles make those duplicates two plain extra
/// entries.
#[derive(Default)]
struct RingArena {
    nodes: Vec<RingNode>,
}

impl RingArena {
    fn push_node(&mut self, position: Point<Real>) -> u32 {
        let handle = self.nodes.len() as u32;
        self.nodes.push(RingNode {
            position,
            prev: handle,
            next: handle,
        });
        handle
    }

    /// Builds a circular ring out of `pts` and returns the handle of its
    /// first node.
    fn push_loop(&mut self, pts: &[Point<Real>]) -> u32 {
        let first = self.nodes.len() as u32;
        let count = pts.len() as u32;

        for (i, pt) in pts.iter().enumerate() {
            let handle = self.push_node(*pt);
            self.nodes[handle as usize].prev = first + (i as u32 + count - 1) % count;
            self.nodes[handle as usize].next = first + (i as u32 + 1) % count;
        }

        first
    }

    #[inline]
    fn position(&self, handle: u32) -> Point<Real> {
        self.nodes[handle as usize].position
    }

    /// Splices the hole ring owning `m` into the outer ring after `p`.
    ///
    /// The resulting cycle is
    /// `p → m → (hole cycle) → m' → p' → old p.next`, where `m'` and `p'`
    /// are fresh nodes coincident with `m` and `p`.
    fn stitch(&mut self, p: u32, m: u32) {
        let p_next = self.nodes[p as usize].next;
        let m_prev = self.nodes[m as usize].prev;

        let m_twin = self.push_node(self.position(m));
        let p_twin = self.push_node(self.position(p));

        self.nodes[p as usize].next = m;
        self.nodes[m as usize].prev = p;

        self.nodes[m_prev as usize].next = m_twin;
        self.nodes[m_twin as usize].prev = m_prev;
        self.nodes[m_twin as usize].next = p_twin;

        self.nodes[p_twin as usize].prev = m_twin;
        self.nodes[p_twin as usize].next = p_next;
        self.nodes[p_next as usize].prev = p_twin;
    }

    /// Collects the ring containing `head` into a vertex sequence, bounded
    /// by the [`MAX_RING_NODES`](crate::utils::consts::MAX_RING_NODES)
    /// safety cap.
    fn flatten(&self, head: u32) -> Vec<Point<Real>> {
        let mut pts = Vec::new();
        let mut curr = head;

        loop {
            pts.push(self.position(curr));
            curr = self.nodes[curr as usize].next;

            if curr == head {
                break;
            }
            if pts.len() >= MAX_RING_NODES {
                log::warn!("hole merge: ring flattening hit the safety cap");
                break;
            }
        }

        pts
    }
}

/// Stitches `holes` into `outer`, producing a single simple polygon.
///
/// Expects the loops as produced by slicing: `outer` counter-clockwise,
/// every hole clockwise, holes disjoint and strictly inside `outer`. Holes
/// are processed rightmost-first; each one is bridged to the nearest visible
/// ring vertex lying strictly to the right of the hole's rightmost vertex.
/// A hole for which no unobstructed bridge exists is skipped with a warning.
pub fn merge_holes(outer: &[Point<Real>], holes: &[Vec<Point<Real>>]) -> Vec<Point<Real>> {
    if outer.len() < 3 || holes.is_empty() {
        return outer.to_vec();
    }

    // Obstruction tree over every boundary segment, outer and holes alike.
    let mut walls: Vec<Segment> = loop_segments(outer).collect();
    for hole in holes {
        walls.extend(loop_segments(hole));
    }
    let wall_tree = SegmentTree::from_segments(walls);

    let mut arena = RingArena::default();
    let outer_head = arena.push_loop(outer);

    // Anchor each hole at its rightmost vertex.
    let mut anchors: Vec<(u32, Real)> = Vec::with_capacity(holes.len());
    for hole in holes {
        if hole.len() < 3 {
            continue;
        }
        let head = arena.push_loop(hole);
        let mut anchor = head;
        for i in 0..hole.len() as u32 {
            if arena.position(head + i).x > arena.position(anchor).x {
                anchor = head + i;
            }
        }
        anchors.push((anchor, arena.position(anchor).x));
    }

    // Rightmost-first maximizes the odds that the bridge target to the right
    // is still unobstructed.
    anchors.sort_by_key(|&(_, max_x)| std::cmp::Reverse(OrderedFloat(max_x)));

    let mut bridges: Vec<Segment> = Vec::new();

    for (m, _) in anchors {
        let m_pos = arena.position(m);

        // Candidate bridge targets: every node of the current ring strictly
        // to the right of the anchor, nearest first.
        let mut candidates: Vec<(Real, u32)> = Vec::new();
        let mut curr = outer_head;
        let mut steps = 0;
        loop {
            let pos = arena.position(curr);
            if pos.x > m_pos.x {
                candidates.push((na::distance_squared(&pos, &m_pos), curr));
            }
            curr = arena.nodes[curr as usize].next;
            steps += 1;
            if curr == outer_head || steps >= MAX_RING_NODES {
                break;
            }
        }
        candidates.sort_by_key(|&(dist_sq, _)| OrderedFloat(dist_sq));

        let chosen = candidates.iter().find(|&&(_, p)| {
            let bridge = Segment::new(m_pos, arena.position(p));
            !wall_tree.intersects_interior(&bridge)
                && !bridges.iter().any(|placed| {
                    segments_intersect_strict(&placed.a, &placed.b, &bridge.a, &bridge.b)
                        .is_some()
                })
        });

        match chosen {
            Some(&(_, p)) => {
                bridges.push(Segment::new(m_pos, arena.position(p)));
                arena.stitch(p, m);
            }
            None => {
                log::warn!("hole merge: no visible bridge point for a hole, skipping it");
            }
        }
    }

    arena.flatten(outer_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::signed_area;

    fn square(half: Real) -> Vec<Point<Real>> {
        vec![
            Point::new(-half, -half),
            Point::new(half, -half),
            Point::new(half, half),
            Point::new(-half, half),
        ]
    }

    fn square_cw(half: Real) -> Vec<Point<Real>> {
        let mut pts = square(half);
        pts.reverse();
        pts
    }

    #[test]
    fn no_holes_returns_outer() {
        let outer = square(1.0);
        assert_eq!(merge_holes(&outer, &[]), outer);
    }

    #[test]
    fn single_hole_is_stitched() {
        let outer = square(2.0);
        let merged = merge_holes(&outer, &[square_cw(1.0)]);

        // 4 outer + 4 hole + 2 duplicated junctions.
        assert_eq!(merged.len(), 10);
        assert!(relative_eq!(signed_area(&merged), 16.0 - 4.0, epsilon = 1.0e-4));
    }

    #[test]
    fn two_holes_side_by_side() {
        let outer = square(4.0);
        let shift = |pts: Vec<Point<Real>>, dx: Real| -> Vec<Point<Real>> {
            pts.into_iter().map(|p| Point::new(p.x + dx, p.y)).collect()
        };
        let left = shift(square_cw(1.0), -2.0);
        let right = shift(square_cw(1.0), 2.0);

        let merged = merge_holes(&outer, &[left, right]);
        assert_eq!(merged.len(), 4 + 4 + 4 + 4);
        assert!(relative_eq!(signed_area(&merged), 64.0 - 8.0, epsilon = 1.0e-4));
    }

    #[test]
    fn merged_ring_is_simple() {
        // No two non-adjacent edges of the merged polygon may cross.
        let outer = square(2.0);
        let merged = merge_holes(&outer, &[square_cw(1.0)]);
        let n = merged.len();

        for i in 0..n {
            for j in i + 1..n {
                let (a, b) = (merged[i], merged[(i + 1) % n]);
                let (c, d) = (merged[j], merged[(j + 1) % n]);
                assert!(
                    segments_intersect_strict(&a, &b, &c, &d).is_none(),
                    "edges {} and {} cross",
                    i,
                    j
                );
            }
        }
    }
}
