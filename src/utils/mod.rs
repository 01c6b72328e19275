//! Various unsorted geometrical and logical operators.

pub use self::center::{center, polygon_centroid};
pub use self::cleanup::dedup_coincident;
pub use self::point_in_poly2d::point_in_poly2d;
pub use self::point_in_triangle::{corner_direction, is_point_strictly_in_triangle, Orientation};
pub use self::segments_intersection::{line_hits_segment, segments_intersect_strict};
pub use self::winding::{ensure_winding, signed_area, Winding};

pub mod consts;
pub mod hashmap;
pub mod hashset;

mod center;
mod cleanup;
mod point_in_poly2d;
mod point_in_triangle;
mod segments_intersection;
mod winding;
