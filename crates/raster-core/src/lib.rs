//! Shared raster data model for flood-composer.
//!
//! This crate defines the types every other crate in the workspace speaks:
//! georeferenced grids, affine geotransforms, profiles (dimensions, data
//! type, no-data value, compression), boolean masks, and geographic
//! bounding boxes.
//!
//! The in-memory cell type is always `f32`; the [`Profile`] data type only
//! controls how cells are encoded on disk. Every value the flood pipeline
//! handles (classification codes 0..=3, the converted no-data 255, and the
//! permanent-water sentinel -9999) is exactly representable in `f32`.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod geotransform;
pub mod grid;
pub mod mask;
pub mod profile;

// Re-export commonly used types at crate root
pub use bbox::BoundingBox;
pub use crs::Crs;
pub use error::{RasterError, Result};
pub use geotransform::GeoTransform;
pub use grid::RasterGrid;
pub use mask::Mask;
pub use profile::{Compression, DataType, Profile};
