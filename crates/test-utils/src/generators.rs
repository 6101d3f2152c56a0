//! Grid generators for predictable, verifiable test data.

use raster_core::{Crs, DataType, GeoTransform, Profile, RasterGrid};

/// Geotransform shared by generated grids: 0.01-degree cells anchored at
/// (8.5 E, 45.0 N), roughly the Po valley.
pub fn test_transform() -> GeoTransform {
    GeoTransform::new(8.5, 45.0, 0.01, -0.01)
}

/// Build a classification grid (u8 on disk) from explicit cell codes.
///
/// # Panics
/// Panics if `data.len() != width * height`.
pub fn classification_grid(data: Vec<f32>, width: usize, height: usize) -> RasterGrid {
    RasterGrid::new(
        data,
        Profile::single_band(width, height, DataType::U8),
        test_transform(),
        Crs::wgs84(),
    )
    .expect("generator shape mismatch")
}

/// Build a model-output grid (f32 on disk) with an optional declared
/// no-data value.
pub fn model_output_grid(
    data: Vec<f32>,
    width: usize,
    height: usize,
    nodata: Option<f64>,
) -> RasterGrid {
    let mut profile = Profile::single_band(width, height, DataType::F32);
    profile.nodata = nodata;
    RasterGrid::new(data, profile, test_transform(), Crs::wgs84())
        .expect("generator shape mismatch")
}

/// A three-state grid with a predictable layout: the first row is
/// permanent water (2), the second flooded (3), the rest land (0).
pub fn banded_three_state_grid(width: usize, height: usize) -> RasterGrid {
    let mut data = vec![0.0; width * height];
    for col in 0..width {
        data[col] = 2.0;
        if height > 1 {
            data[width + col] = 3.0;
        }
    }
    classification_grid(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banded_grid_layout() {
        let grid = banded_three_state_grid(3, 3);
        assert_eq!(grid.get(0, 0), Some(2.0));
        assert_eq!(grid.get(2, 1), Some(3.0));
        assert_eq!(grid.get(1, 2), Some(0.0));
    }

    #[test]
    fn test_model_output_nodata() {
        let grid = model_output_grid(vec![0.5; 4], 2, 2, Some(-1.0));
        assert_eq!(grid.profile.nodata, Some(-1.0));
        assert_eq!(grid.profile.dtype, DataType::F32);
    }
}
