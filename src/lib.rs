//! This crate maintains dynamic Euclidean distance and color
//! fields over a set of mutable polygon shapes.
//! Every shape mutation re-rasterizes all boundaries onto a fixed
//! square grid and runs an exact closest-point transform, so each
//! cell always knows its true distance to the nearest shape
//! boundary, and the color of the shape that boundary belongs to.

pub mod error;
pub mod field;
pub mod render;
pub mod shape;

mod cpt;
mod raster;

pub mod prelude {
    pub use crate::{f16_field, f32_field};

    pub use crate::error::{Error, Result};

    pub use crate::field::{
        DistanceField, DistanceStorage, F16DistanceStorage, F32DistanceStorage, SENTINEL_DISTANCE,
    };

    pub use crate::render::{shading, CellSample, Rgb};

    pub use crate::shape::Shape;
}

use prelude::*;

/// Create an empty field with an `f16` distance storage for the specified resolution.
pub fn f16_field(resolution: usize) -> Result<DistanceField<F16DistanceStorage>> {
    DistanceField::new(resolution)
}

/// Create an empty field with an `f32` distance storage for the specified resolution.
pub fn f32_field(resolution: usize) -> Result<DistanceField<F32DistanceStorage>> {
    DistanceField::new(resolution)
}
