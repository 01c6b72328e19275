//! Shapes supported by cleave2d.

pub use self::polygon::{loop_segments, Polygon};
pub use self::segment::Segment;
pub use self::uv_rect::UvRect;

mod polygon;
mod segment;
mod uv_rect;
