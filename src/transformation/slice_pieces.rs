use crate::math::{Point, Real};
use crate::query;
use crate::shape::{Polygon, UvRect};
use crate::transformation::{merge_holes, triangulate};

/// One output fragment of a slice, ready for the host to turn into a mesh
/// and a collider.
#[derive(Clone, Debug)]
pub struct SlicePiece {
    /// The fragment as a polygon-with-holes; its outer and hole loops are
    /// the collider paths.
    pub polygon: Polygon,
    /// Flattened vertex buffer (holes stitched into the outer ring).
    pub vertices: Vec<Point<Real>>,
    /// Triangle index list over `vertices`, counter-clockwise.
    pub indices: Vec<u32>,
    /// Texture coordinates, one per vertex, from the ancestral reference
    /// rectangle.
    pub uvs: Vec<[Real; 2]>,
}

/// Slices `polygon` and assembles every resulting fragment into mesh data.
///
/// Composes [`slice`](crate::query::split::slice), [`merge_holes`] and
/// [`triangulate`], and maps every vertex through `uv_rect`. Returns an
/// empty list when no cut occurred (fewer than two fragments), in which
/// case the caller must leave the input object intact.
pub fn slice_to_pieces(
    polygon: &Polygon,
    cut_a: &Point<Real>,
    cut_b: &Point<Real>,
    uv_rect: &UvRect,
) -> Vec<SlicePiece> {
    let parts = query::split::slice(polygon, cut_a, cut_b, uv_rect);

    if parts.len() < 2 {
        return Vec::new();
    }

    parts
        .into_iter()
        .map(|part| {
            let vertices = merge_holes(part.outer(), part.holes());
            let indices = triangulate(&vertices);
            let uvs = vertices.iter().map(|p| uv_rect.uv(p)).collect();

            SlicePiece {
                polygon: part,
                vertices,
                indices,
                uvs,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pieces_carry_mesh_data() {
        let polygon = Polygon::new(
            vec![
                Point::new(-1.0, -1.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 1.0),
                Point::new(-1.0, 1.0),
            ],
            Vec::new(),
        );
        let rect = UvRect::from_aabb(&polygon.aabb());
        let pieces = slice_to_pieces(&polygon, &Point::new(0.0, -2.0), &Point::new(0.0, 2.0), &rect);

        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_eq!(piece.indices.len(), (piece.vertices.len() - 2) * 3);
            assert_eq!(piece.uvs.len(), piece.vertices.len());
            for uv in &piece.uvs {
                assert!(uv[0] >= -1.0e-3 && uv[0] <= 1.0 + 1.0e-3);
                assert!(uv[1] >= -1.0e-3 && uv[1] <= 1.0 + 1.0e-3);
            }
        }
    }

    #[test]
    fn missed_cut_produces_no_pieces() {
        let polygon = Polygon::new(
            vec![
                Point::new(-1.0, -1.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 1.0),
                Point::new(-1.0, 1.0),
            ],
            Vec::new(),
        );
        let rect = UvRect::from_aabb(&polygon.aabb());
        let pieces = slice_to_pieces(&polygon, &Point::new(4.0, -2.0), &Point::new(4.0, 2.0), &rect);
        assert!(pieces.is_empty());
    }
}
