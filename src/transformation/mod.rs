//! Turning slice results into render- and collision-ready geometry.

pub use self::ear_clipping::triangulate;
pub use self::hole_merge::merge_holes;
pub use self::slice_pieces::{slice_to_pieces, SlicePiece};

mod ear_clipping;
mod hole_merge;
mod slice_pieces;
