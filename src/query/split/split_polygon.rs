use ordered_float::OrderedFloat;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::partitioning::AabbTree;
use crate::shape::{Polygon, UvRect};
use crate::utils::consts::{AREA_MIN, EPS_COINCIDE_SQ};
use crate::utils::{self, line_hits_segment};

use super::planar_graph::PlanarGraph;

/// Slices `polygon` along the cut segment `[cut_a, cut_b]`.
///
/// The cut is extended on both sides so it clears the polygon regardless of
/// where its endpoints were picked; `uv_rect` supplies the extension scale
/// (it is the host's reference rectangle and is not otherwise consumed
/// here).
///
/// Returns the resulting polygons-with-holes. A result with fewer than two
/// polygons means no cut occurred (degenerate cut, or fewer than two
/// boundary intersections); the caller should keep the input object alive in
/// that case. The input is never mutated.
pub fn slice(
    polygon: &Polygon,
    cut_a: &Point<Real>,
    cut_b: &Point<Real>,
    uv_rect: &UvRect,
) -> Vec<Polygon> {
    let dir = cut_b - cut_a;
    let length = dir.norm();

    if length < 1.0e-6 {
        return Vec::new();
    }

    // Extend the cut so it crosses the whole polygon whatever its placement.
    let unit = dir / length;
    let extension = 1.5 * uv_rect.max_extent() + 1.0;
    let ext_a = cut_a - unit * extension;
    let ext_b = cut_b + unit * extension;

    let mut graph = PlanarGraph::new();
    let mut seam_points = Vec::new();

    insert_path(&mut graph, polygon.outer(), &ext_a, &ext_b, &mut seam_points);
    for hole in polygon.holes() {
        insert_path(&mut graph, hole, &ext_a, &ext_b, &mut seam_points);
    }

    dedup_points(&mut seam_points);
    if seam_points.len() < 2 {
        return Vec::new();
    }

    // Seam injection, odd-even rule: sorted along the cut, intersections
    // alternate between leaving and entering the filled region. Pairing
    // consecutive ones yields the interior spans of the cut; a dangling odd
    // tail is dropped.
    seam_points.sort_by_key(|p| OrderedFloat((p - ext_a).dot(&unit)));
    for pair in seam_points.chunks_exact(2) {
        // The seam is traversed once by the piece on each side.
        graph.insert_edge(&pair[0], &pair[1]);
        graph.insert_edge(&pair[1], &pair[0]);
    }

    let loops = graph.extract_loops();

    let mut solids = Vec::new();
    let mut holes = Vec::new();

    for lp in loops {
        let area = utils::signed_area(&lp);
        if area.abs() < AREA_MIN {
            continue;
        }
        if area > 0.0 {
            solids.push(lp);
        } else {
            holes.push(lp);
        }
    }

    let assigned = assign_holes(&solids, holes);

    solids
        .into_iter()
        .zip(assigned)
        .map(|(outer, outer_holes)| Polygon::new(outer, outer_holes))
        .collect()
}

/// Inserts one input loop into the graph, splicing in its intersections with
/// the extended cut.
///
/// Every intersection point is also appended to `seam_points` for the
/// subsequent seam injection.
fn insert_path(
    graph: &mut PlanarGraph,
    path: &[Point<Real>],
    cut_a: &Point<Real>,
    cut_b: &Point<Real>,
    seam_points: &mut Vec<Point<Real>>,
) {
    if path.len() < 3 {
        return;
    }

    // Collect the cut hits, keyed by (edge index, distance from the edge
    // start) so splicing preserves traversal order along every edge.
    let mut hits: Vec<(usize, Real, Point<Real>)> = Vec::new();

    for i in 0..path.len() {
        let a = path[i];
        let b = path[(i + 1) % path.len()];

        if let Some((_, v)) = line_hits_segment(cut_a, cut_b, &a, &b) {
            let p = a + (b - a) * v;
            hits.push((i, na::distance_squared(&a, &p), p));
        }
    }

    hits.sort_by_key(|(edge, dist_sq, _)| (*edge, OrderedFloat(*dist_sq)));

    let mut verts = Vec::with_capacity(path.len() + hits.len());
    let mut hit_iter = hits.iter().peekable();

    for (i, pt) in path.iter().enumerate() {
        verts.push(*pt);
        while let Some(&&(edge, _, p)) = hit_iter.peek() {
            if edge != i {
                break;
            }
            verts.push(p);
            seam_points.push(p);
            let _ = hit_iter.next();
        }
    }

    utils::dedup_coincident(&mut verts);

    for i in 0..verts.len() {
        graph.insert_edge(&verts[i], &verts[(i + 1) % verts.len()]);
    }
}

/// Removes near-duplicates from `pts` (coincidence tolerance), keeping first
/// occurrences.
fn dedup_points(pts: &mut Vec<Point<Real>>) {
    let mut kept: Vec<Point<Real>> = Vec::with_capacity(pts.len());

    for p in pts.drain(..) {
        if !kept
            .iter()
            .any(|q| na::distance_squared(q, &p) < EPS_COINCIDE_SQ)
        {
            kept.push(p);
        }
    }

    *pts = kept;
}

/// Assigns every hole loop to the smallest solid containing it.
///
/// A hole belongs to the smallest-area solid whose bounds contain the hole's
/// centroid, whose area exceeds the hole's, and whose boundary actually
/// encloses the centroid. Holes with no qualifying parent are discarded:
/// promoting them to solids would resurrect fill from what the cut removed.
fn assign_holes(
    solids: &[Vec<Point<Real>>],
    holes: Vec<Vec<Point<Real>>>,
) -> Vec<Vec<Vec<Point<Real>>>> {
    let mut assigned = vec![Vec::new(); solids.len()];

    if holes.is_empty() {
        return assigned;
    }

    let solid_areas: Vec<Real> = solids.iter().map(|s| utils::signed_area(s)).collect();
    let tree = AabbTree::from_aabbs(solids.iter().map(|s| Aabb::from_points(s)).collect());

    for hole in holes {
        let centroid = utils::polygon_centroid(&hole);
        let hole_area = utils::signed_area(&hole).abs();

        let mut best: Option<(Real, usize)> = None;
        tree.for_each_containing(&centroid, |id| {
            let i = id as usize;
            if solid_areas[i] > hole_area
                && utils::point_in_poly2d(&centroid, &solids[i])
                && best.map_or(true, |(best_area, _)| solid_areas[i] < best_area)
            {
                best = Some((solid_areas[i], i));
            }
        });

        match best {
            Some((_, i)) => assigned[i].push(hole),
            None => log::warn!("slice: discarding a hole with no containing solid"),
        }
    }

    assigned
}
