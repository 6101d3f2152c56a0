//! Error types for the raster data model.

use thiserror::Error;

/// Errors raised while constructing or manipulating raster values.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Grid data length does not match the profile dimensions.
    #[error("grid data has {actual} cells but profile declares {width}x{height} = {expected}")]
    ShapeMismatch {
        actual: usize,
        width: usize,
        height: usize,
        expected: usize,
    },

    /// A mask was applied to a grid of a different shape.
    #[error("mask shape {mask_width}x{mask_height} does not match grid shape {grid_width}x{grid_height}")]
    MaskShapeMismatch {
        mask_width: usize,
        mask_height: usize,
        grid_width: usize,
        grid_height: usize,
    },

    /// The geotransform cannot be inverted.
    #[error("degenerate geotransform: determinant is zero")]
    DegenerateTransform,
}

/// Result type for raster data model operations.
pub type Result<T> = std::result::Result<T, RasterError>;
