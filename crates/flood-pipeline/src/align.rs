//! Grid-to-grid alignment with nearest-neighbor resampling.
//!
//! Categorical data (masks, class codes) must never be averaged or
//! interpolated; alignment therefore copies the containing source cell for
//! every destination pixel center, and fills cells outside the source
//! coverage with a caller-chosen value.

use tracing::debug;

use raster_core::{Mask, RasterGrid};

use crate::error::{PipelineError, Result};

/// Resample a source grid onto a destination grid's geometry using
/// nearest-neighbor sampling.
///
/// For each destination pixel center, the geographic coordinate is mapped
/// through the source geotransform; the containing source cell provides the
/// value, or `fill` when the point falls outside the source extent. The
/// output always has the destination's shape.
///
/// Both grids must share a CRS; no datum reprojection is performed.
pub fn align_nearest(src: &RasterGrid, dst: &RasterGrid, fill: f32) -> Result<Vec<f32>> {
    if src.crs != dst.crs {
        return Err(PipelineError::CrsMismatch {
            src: src.crs.to_string(),
            dst: dst.crs.to_string(),
        });
    }

    let (dst_width, dst_height) = (dst.width(), dst.height());
    let (src_width, src_height) = (src.width(), src.height());
    let mut output = vec![fill; dst_width * dst_height];

    for out_y in 0..dst_height {
        for out_x in 0..dst_width {
            let (x, y) = dst.transform.pixel_to_geo(out_x, out_y);
            let (col_f, row_f) = src.transform.geo_to_pixel(x, y);

            if !col_f.is_finite() || !row_f.is_finite() {
                continue;
            }

            let col = col_f.floor();
            let row = row_f.floor();
            if col < 0.0 || row < 0.0 {
                continue;
            }

            let (col, row) = (col as usize, row as usize);
            if col < src_width && row < src_height {
                output[out_y * dst_width + out_x] = src.data[row * src_width + col];
            }
        }
    }

    debug!(
        src_shape = ?(src_width, src_height),
        dst_shape = ?(dst_width, dst_height),
        "Aligned grid via nearest-neighbor resampling"
    );

    Ok(output)
}

/// Align a binary mask grid onto the destination grid and return it as a
/// boolean [`Mask`] of the destination's shape.
///
/// Cells outside the mask's original coverage are filled with 0 (unmasked).
pub fn align_mask(src: &RasterGrid, dst: &RasterGrid) -> Result<Mask> {
    let aligned = align_nearest(src, dst, 0.0)?;
    Ok(Mask::new(
        aligned.iter().map(|&v| v == 1.0).collect(),
        dst.width(),
        dst.height(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::{Crs, DataType, GeoTransform, Profile};

    fn grid(
        data: Vec<f32>,
        width: usize,
        height: usize,
        transform: GeoTransform,
        crs: Crs,
    ) -> RasterGrid {
        RasterGrid::new(
            data,
            Profile::single_band(width, height, DataType::U8),
            transform,
            crs,
        )
        .unwrap()
    }

    #[test]
    fn test_identity_alignment() {
        let gt = GeoTransform::new(0.0, 2.0, 1.0, -1.0);
        let src = grid(vec![1.0, 0.0, 0.0, 1.0], 2, 2, gt, Crs::wgs84());
        let dst = grid(vec![0.0; 4], 2, 2, gt, Crs::wgs84());

        let aligned = align_nearest(&src, &dst, 0.0).unwrap();
        assert_eq!(aligned, src.data);
    }

    #[test]
    fn test_upsample_keeps_categorical_values() {
        // 2x2 mask at 1-degree cells resampled onto a 4x4 grid at
        // 0.5-degree cells covering the same extent.
        let src = grid(
            vec![1.0, 0.0, 0.0, 1.0],
            2,
            2,
            GeoTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::wgs84(),
        );
        let dst = grid(
            vec![0.0; 16],
            4,
            4,
            GeoTransform::new(0.0, 2.0, 0.5, -0.5),
            Crs::wgs84(),
        );

        let aligned = align_nearest(&src, &dst, 0.0).unwrap();
        assert_eq!(aligned.len(), 16);
        // Nearest-neighbor introduces no intermediate values.
        assert!(aligned.iter().all(|&v| v == 0.0 || v == 1.0));
        // Top-left quadrant comes from the set source cell.
        assert_eq!(aligned[0], 1.0);
        assert_eq!(aligned[1], 1.0);
        assert_eq!(aligned[4], 1.0);
        assert_eq!(aligned[5], 1.0);
        // Top-right quadrant comes from the unset source cell.
        assert_eq!(aligned[2], 0.0);
        assert_eq!(aligned[3], 0.0);
    }

    #[test]
    fn test_fill_outside_coverage() {
        // Destination extends east of the source extent.
        let src = grid(
            vec![1.0, 1.0, 1.0, 1.0],
            2,
            2,
            GeoTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::wgs84(),
        );
        let dst = grid(
            vec![0.0; 4],
            2,
            2,
            GeoTransform::new(5.0, 2.0, 1.0, -1.0),
            Crs::wgs84(),
        );

        let aligned = align_nearest(&src, &dst, 0.0).unwrap();
        assert!(aligned.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_output_shape_matches_destination() {
        let src = grid(
            vec![1.0; 9],
            3,
            3,
            GeoTransform::new(0.0, 3.0, 1.0, -1.0),
            Crs::wgs84(),
        );
        let dst = grid(
            vec![0.0; 35],
            7,
            5,
            GeoTransform::new(0.0, 3.0, 0.4, -0.6),
            Crs::wgs84(),
        );

        let mask = align_mask(&src, &dst).unwrap();
        assert!(mask.matches_shape(7, 5));
    }

    #[test]
    fn test_crs_mismatch_is_an_error() {
        let src = grid(
            vec![1.0; 4],
            2,
            2,
            GeoTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::new("EPSG:32632"),
        );
        let dst = grid(
            vec![0.0; 4],
            2,
            2,
            GeoTransform::new(0.0, 2.0, 1.0, -1.0),
            Crs::wgs84(),
        );

        let err = align_nearest(&src, &dst, 0.0).unwrap_err();
        assert!(matches!(err, PipelineError::CrsMismatch { .. }));
    }
}
