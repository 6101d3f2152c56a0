//! Output compositing.
//!
//! Combines a raw model-output grid with zero, one, or two boolean masks
//! into the final raster. Fixed priority: permanent water wins, then
//! flooded cells keep their raw value, and everything else becomes the NaN
//! background marker.

use tracing::warn;

use raster_core::{DataType, Mask, RasterError, RasterGrid};

use crate::error::Result;

/// Which cells count as flooded.
#[derive(Debug, Clone, Copy)]
pub enum FloodExtent<'a> {
    /// An explicit flooded-cell mask.
    Mask(&'a Mask),
    /// Every cell whose raw value differs from the raw grid's declared
    /// no-data value is flooded. This is the fallback used when no
    /// explicit flood mask exists; with an unset or imperfect no-data
    /// value it can misclassify invalid cells as flooded.
    AllValid,
}

/// Composite a raw model output with the supplied masks.
///
/// Every output cell holds exactly one of: the permanent-water `sentinel`,
/// the raw value (flooded), or NaN (background). The output is always F32;
/// the background marker has no integer representation.
pub fn composite(
    raw: &RasterGrid,
    permanent_water: Option<&Mask>,
    flooded: FloodExtent<'_>,
    sentinel: f64,
) -> Result<RasterGrid> {
    let (width, height) = (raw.width(), raw.height());
    let mut output = vec![f32::NAN; raw.data.len()];

    match flooded {
        FloodExtent::Mask(mask) => {
            check_shape(mask, width, height)?;
            for (i, set) in mask.iter().enumerate() {
                if set {
                    output[i] = raw.data[i];
                }
            }
        }
        FloodExtent::AllValid => {
            match raw.profile.nodata {
                Some(nodata) => {
                    let nodata = nodata as f32;
                    for (i, &v) in raw.data.iter().enumerate() {
                        if v != nodata {
                            output[i] = v;
                        }
                    }
                }
                None => {
                    // Known correctness gap: without a declared no-data
                    // value every finite cell counts as flooded.
                    warn!(
                        "Raw model output declares no no-data value; treating all cells as flooded"
                    );
                    output.copy_from_slice(&raw.data);
                }
            }
        }
    }

    if let Some(mask) = permanent_water {
        check_shape(mask, width, height)?;
        let sentinel = sentinel as f32;
        for (i, set) in mask.iter().enumerate() {
            if set {
                // Permanent water always wins, even over flooded cells.
                output[i] = sentinel;
            }
        }
    }

    let profile = raw
        .profile
        .with_encoding(DataType::F32, raw.profile.nodata);
    Ok(RasterGrid::new(
        output,
        profile,
        raw.transform,
        raw.crs.clone(),
    )?)
}

fn check_shape(mask: &Mask, width: usize, height: usize) -> Result<()> {
    if !mask.matches_shape(width, height) {
        return Err(RasterError::MaskShapeMismatch {
            mask_width: mask.width(),
            mask_height: mask.height(),
            grid_width: width,
            grid_height: height,
        }
        .into());
    }
    Ok(())
}
