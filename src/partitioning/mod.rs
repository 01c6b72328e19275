//! Spatial partitioning tools.

pub use self::segment_tree::{AabbTree, FlatAabbTree, SegmentTree};
pub use self::uniform_grid::UniformGrid;

mod segment_tree;
mod uniform_grid;
