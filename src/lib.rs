/*!
cleave2d
========

**cleave2d** is a 2-dimensional polygon slicing engine written with the rust
programming language. Given a planar polygon with holes and a directed cutting
segment, it computes the set of resulting polygons-with-holes, stitches the
holes of each result into its outer ring, and triangulates the outcome for
rendering and collision.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(not(feature = "f64"))]
    pub use f32 as Real;
}

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Vector2};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 2;

    /// The point type.
    pub use Point2 as Point;

    /// The vector type.
    pub use Vector2 as Vector;
}
