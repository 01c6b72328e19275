//! Tolerance constants shared by the whole slicing pipeline.
//!
//! These values are a contract: altering any of them changes the observable
//! behavior of the engine on near-degenerate inputs (cuts grazing a vertex,
//! slivers hovering around the area cutoff, bridge junctions, ...).

use crate::math::Real;

/// Two points closer than this distance are considered coincident.
pub const EPS_COINCIDE: Real = 1.0e-2;

/// Squared version of [`EPS_COINCIDE`], used by all coincidence tests.
pub const EPS_COINCIDE_SQ: Real = EPS_COINCIDE * EPS_COINCIDE;

/// Loops with an absolute signed area below this threshold are dropped.
pub const AREA_MIN: Real = 1.0e-2;

/// Strict-interior segment intersections require both parameters to lie in
/// the open interval `(INTERSECT_EPS, 1 - INTERSECT_EPS)`.
pub const INTERSECT_EPS: Real = 1.0e-5;

/// Cut/edge intersection parameters are accepted in
/// `[-ENDPOINT_EPS, 1 + ENDPOINT_EPS]` and then clamped to `[0, 1]`, so that
/// a cut passing through a vertex still registers on both incident edges.
pub const ENDPOINT_EPS: Real = 1.0e-4;

/// Segment AABBs are grown by this amount to avoid false negatives on
/// axis-aligned edges.
pub const AABB_PAD: Real = 1.0e-3;

/// Squared distance below which a stored segment endpoint is considered
/// identical to a query endpoint during obstruction queries.
pub const EPS_ENDPOINT_MATCH_SQ: Real = 1.0e-7;

/// Squared distance below which a reflex vertex coincides with an ear corner.
///
/// Bridge stitching duplicates junction vertices; the ear test must treat
/// those coordinate-identical twins as non-blocking.
pub const EPS_JUNCTION_SQ: Real = 1.0e-6;

/// Maximum number of segments stored in one leaf of the flat AABB tree.
pub const MAX_LEAF: usize = 4;

/// Upper bound on the total cell count of the uniform grid.
pub const MAX_GRID_CELLS: usize = 200_000;

/// Safety cap when flattening a stitched ring back to a vertex sequence.
pub const MAX_RING_NODES: usize = 100_000;
