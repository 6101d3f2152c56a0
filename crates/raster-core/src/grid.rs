//! Georeferenced raster grids.

use crate::bbox::BoundingBox;
use crate::crs::Crs;
use crate::error::{RasterError, Result};
use crate::geotransform::GeoTransform;
use crate::mask::Mask;
use crate::profile::Profile;

/// A 2D array of cell values plus the metadata needed to georeference it.
///
/// Data is row-major, top-to-bottom. The shape invariant
/// `data.len() == width * height` is enforced at construction.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// Cell values (row-major).
    pub data: Vec<f32>,
    /// Metadata profile.
    pub profile: Profile,
    /// Pixel-to-geographic affine transform.
    pub transform: GeoTransform,
    /// Coordinate reference system.
    pub crs: Crs,
}

impl RasterGrid {
    /// Create a new grid, checking the shape invariant.
    pub fn new(
        data: Vec<f32>,
        profile: Profile,
        transform: GeoTransform,
        crs: Crs,
    ) -> Result<Self> {
        if data.len() != profile.cell_count() {
            return Err(RasterError::ShapeMismatch {
                actual: data.len(),
                width: profile.width,
                height: profile.height,
                expected: profile.cell_count(),
            });
        }
        Ok(Self {
            data,
            profile,
            transform,
            crs,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.profile.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.profile.height
    }

    /// Get the value at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width() || row >= self.height() {
            return None;
        }
        self.data.get(row * self.width() + col).copied()
    }

    /// Geographic bounding box covered by this grid.
    pub fn bbox(&self) -> BoundingBox {
        self.transform.bounds(self.width(), self.height())
    }

    /// Build a boolean mask from a cell-wise predicate.
    pub fn mask_where<F>(&self, predicate: F) -> Mask
    where
        F: Fn(f32) -> bool,
    {
        Mask::new(
            self.data.iter().map(|&v| predicate(v)).collect(),
            self.width(),
            self.height(),
        )
    }

    /// Check whether any cell satisfies a predicate.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(f32) -> bool,
    {
        self.data.iter().any(|&v| predicate(v))
    }

    /// Distinct cell values, sorted. Intended for logging classification
    /// inputs; NaN cells are skipped.
    pub fn distinct_values(&self) -> Vec<f32> {
        let mut values: Vec<f32> = Vec::new();
        for &v in &self.data {
            if v.is_nan() {
                continue;
            }
            if !values.contains(&v) {
                values.push(v);
            }
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values
    }
}
