//! Ear-clipping triangulation with a grid-accelerated ear test.
//!
//! Convex vertices wait on a LIFO candidate list; reflex vertices are
//! indexed in a uniform grid so that each ear test only inspects the reflex
//! vertices overlapping the candidate triangle's bounds instead of the whole
//! polygon.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::partitioning::UniformGrid;
use crate::utils::consts::EPS_JUNCTION_SQ;
use crate::utils::{
    corner_direction, is_point_strictly_in_triangle, signed_area, Orientation,
};

struct EarNode {
    position: Point<Real>,
    /// Index of this vertex in the input slice; this is what gets emitted.
    index: u32,
    prev: u32,
    next: u32,
    is_reflex: bool,
    is_candidate: bool,
}

/// Triangulates the simple polygon `points`, supplied in any winding.
///
/// Returns a triangle index list referring to `points`; its length is
/// `3 * (points.len() - 2)` on success and may be shorter on degenerate
/// input, in which case a warning is logged. Emitted triangles wind
/// counter-clockwise.
///
/// Vertex pairs that are coordinate-identical but distinct entries (the
/// duplicated bridge junctions produced by
/// [`merge_holes`](crate::transformation::merge_holes)) are handled: a
/// reflex vertex sitting exactly on an ear corner does not block the ear.
pub fn triangulate(points: &[Point<Real>]) -> Vec<u32> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut nodes: Vec<EarNode> = points
        .iter()
        .enumerate()
        .map(|(i, p)| EarNode {
            position: *p,
            index: i as u32,
            prev: ((i + n - 1) % n) as u32,
            next: ((i + 1) % n) as u32,
            is_reflex: false,
            is_candidate: false,
        })
        .collect();

    // The clipping loop assumes counter-clockwise winding; reversing the
    // links is enough, the emitted indices still refer to the input order.
    if signed_area(points) < 0.0 {
        for node in &mut nodes {
            std::mem::swap(&mut node.prev, &mut node.next);
        }
    }

    for i in 0..n {
        let prev = nodes[i].prev as usize;
        let next = nodes[i].next as usize;
        nodes[i].is_reflex = corner_direction(
            &nodes[prev].position,
            &nodes[i].position,
            &nodes[next].position,
        ) != Orientation::Ccw;
    }

    let reflex_count = nodes.iter().filter(|node| node.is_reflex).count();
    let mut grid = UniformGrid::new(&Aabb::from_points(points), n, reflex_count);
    let mut candidates: Vec<u32> = Vec::new();

    for (i, node) in nodes.iter_mut().enumerate() {
        if node.is_reflex {
            grid.insert(i as u32, &node.position);
        } else {
            node.is_candidate = true;
            candidates.push(i as u32);
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    let mut point_count = n;
    let mut cursor = 0u32;
    let mut iterations = 0usize;

    while point_count > 3 {
        let v = match candidates.pop() {
            Some(v) => v,
            None => break,
        };

        iterations += 1;
        if iterations > 2 * n {
            break;
        }

        nodes[v as usize].is_candidate = false;
        if nodes[v as usize].is_reflex {
            continue;
        }

        let prev = nodes[v as usize].prev;
        let next = nodes[v as usize].next;
        let pa = nodes[prev as usize].position;
        let pb = nodes[v as usize].position;
        let pc = nodes[next as usize].position;

        if !is_ear(&nodes, &grid, prev, next, &pa, &pb, &pc) {
            continue;
        }

        indices.push(nodes[prev as usize].index);
        indices.push(nodes[v as usize].index);
        indices.push(nodes[next as usize].index);

        nodes[prev as usize].next = next;
        nodes[next as usize].prev = prev;
        point_count -= 1;
        cursor = prev;

        requalify(&mut nodes, &mut grid, &mut candidates, prev);
        requalify(&mut nodes, &mut grid, &mut candidates, next);
    }

    if point_count == 3 {
        let a = cursor;
        let b = nodes[a as usize].next;
        let c = nodes[b as usize].next;
        indices.push(nodes[a as usize].index);
        indices.push(nodes[b as usize].index);
        indices.push(nodes[c as usize].index);
    } else {
        log::warn!(
            "ear clipping: emitted a partial triangulation, {} vertices left",
            point_count
        );
    }

    indices
}

/// Is the triangle `(pa, pb, pc)` free of every reflex vertex?
///
/// Only reflex vertices can invalidate an ear, so the grid holds exactly
/// those; vertices coincident with a triangle corner are the duplicated
/// bridge junctions and do not block.
fn is_ear(
    nodes: &[EarNode],
    grid: &UniformGrid,
    prev: u32,
    next: u32,
    pa: &Point<Real>,
    pb: &Point<Real>,
    pc: &Point<Real>,
) -> bool {
    let tri_aabb = Aabb::from_points([*pa, *pb, *pc].iter());
    let mut blocked = false;

    grid.for_each_in_aabb(&tri_aabb, &mut |r| {
        if blocked || r == prev || r == next {
            return;
        }

        let rp = &nodes[r as usize].position;
        if na::distance_squared(rp, pa) < EPS_JUNCTION_SQ
            || na::distance_squared(rp, pb) < EPS_JUNCTION_SQ
            || na::distance_squared(rp, pc) < EPS_JUNCTION_SQ
        {
            return;
        }

        if is_point_strictly_in_triangle(rp, pa, pb, pc) {
            blocked = true;
        }
    });

    !blocked
}

/// Refreshes the classification of `handle` after one of its neighbors was
/// clipped.
fn requalify(
    nodes: &mut [EarNode],
    grid: &mut UniformGrid,
    candidates: &mut Vec<u32>,
    handle: u32,
) {
    let prev = nodes[handle as usize].prev as usize;
    let next = nodes[handle as usize].next as usize;
    let position = nodes[handle as usize].position;

    let now_reflex = corner_direction(
        &nodes[prev].position,
        &position,
        &nodes[next].position,
    ) != Orientation::Ccw;

    let node = &mut nodes[handle as usize];

    if node.is_reflex && !now_reflex {
        grid.remove(handle, &position);
        node.is_reflex = false;
        if !node.is_candidate {
            node.is_candidate = true;
            candidates.push(handle);
        }
    } else if !node.is_reflex && now_reflex {
        node.is_reflex = true;
        grid.insert(handle, &position);
    } else if !now_reflex && !node.is_candidate {
        node.is_candidate = true;
        candidates.push(handle);
    }
}
