//! Flood-state classification.
//!
//! Converts an input classification grid (two-state or three-state) into
//! the binary form the hydraulic model expects, derives the permanent-water
//! mask where applicable, and detects the "no water present" early exit.

use std::path::Path;

use tracing::{error, info};

use platform::FileCatalog;
use raster_codec::write_grid;
use raster_core::{Mask, RasterGrid};

use crate::accessor::FloodMapInfo;
use crate::error::Result;

/// Cell code for land in both schemes.
pub const LAND: f32 = 0.0;
/// Cell code for water in the two-state scheme.
pub const TWO_STATE_WATER: f32 = 1.0;
/// Cell code for permanent water in the three-state scheme.
pub const PERMANENT_WATER: f32 = 2.0;
/// Cell code for flooded cells in the three-state scheme.
pub const FLOODED: f32 = 3.0;
/// No-data value assigned to land cells in the converted grid.
pub const CONVERTED_NODATA: f32 = 255.0;
/// Filename suffix of the converted grid.
pub const CONVERTED_SUFFIX: &str = "_converted";

/// Two-state {0=land, 1=water} vs three-state {0=land, 2=permanent water,
/// 3=flooded} interpretation of the input grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationScheme {
    TwoState,
    ThreeState,
}

/// Result of classifying a flood map.
///
/// `NoWater` is a successful early termination, `Failed` is fatal; the two
/// must never be conflated.
#[derive(Debug, Clone)]
pub enum ClassificationOutcome {
    /// No water cells present; nothing further to process.
    NoWater,
    /// The map the model should consume, plus the permanent-water mask for
    /// three-state inputs.
    Ready {
        flood_map: String,
        permanent_water: Option<Mask>,
    },
    /// Classification failed; the cause has already been logged.
    Failed,
}

/// Classify a flood map, persisting the converted grid for three-state
/// inputs.
///
/// Any internal error is caught, logged at error level, and reported as
/// [`ClassificationOutcome::Failed`] so the caller decides whether to
/// abort the run.
pub fn classify_flood_map(
    input_name: &str,
    info: &FloodMapInfo,
    scheme: ClassificationScheme,
    catalog: &dyn FileCatalog,
    converted_collection: Option<&str>,
) -> ClassificationOutcome {
    match classify_inner(input_name, info, scheme, catalog, converted_collection) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(input = %input_name, error = %e, "Flood map classification failed");
            ClassificationOutcome::Failed
        }
    }
}

fn classify_inner(
    input_name: &str,
    info: &FloodMapInfo,
    scheme: ClassificationScheme,
    catalog: &dyn FileCatalog,
    converted_collection: Option<&str>,
) -> Result<ClassificationOutcome> {
    let grid = &info.grid;
    info!(
        input = %input_name,
        values = ?grid.distinct_values(),
        "Processing input flood map data in memory"
    );

    match scheme {
        ClassificationScheme::ThreeState => {
            // Permanent water first; it is needed even when the converted
            // grid merges both water classes.
            let permanent_water = grid.mask_where(|v| v == PERMANENT_WATER);

            let has_water = grid.any(|v| v == PERMANENT_WATER || v == FLOODED);
            if !has_water {
                return Ok(ClassificationOutcome::NoWater);
            }

            info!("Three-state map: merging permanent and flooded water for hydraulic consistency");
            let converted = reclassify_three_state(grid)?;
            let converted_name = derived_name(input_name, CONVERTED_SUFFIX);

            write_grid(catalog.local_path(&converted_name), &converted)?;
            catalog.register(&converted_name, converted_collection)?;
            info!(converted = %converted_name, "Converted flood map saved");

            Ok(ClassificationOutcome::Ready {
                flood_map: converted_name,
                permanent_water: Some(permanent_water),
            })
        }
        ClassificationScheme::TwoState => {
            let has_water = grid.any(|v| v == TWO_STATE_WATER);
            if !has_water {
                return Ok(ClassificationOutcome::NoWater);
            }

            // The model consumes the two-state grid directly.
            Ok(ClassificationOutcome::Ready {
                flood_map: input_name.to_string(),
                permanent_water: None,
            })
        }
    }
}

/// Cell-wise reclassification of a three-state grid:
/// land (0) becomes the converted no-data value 255, water classes {2,3}
/// merge to 1, everything else becomes 0. The on-disk data type stays the
/// input's; only the declared no-data value changes.
fn reclassify_three_state(grid: &RasterGrid) -> Result<RasterGrid> {
    let data: Vec<f32> = grid
        .data
        .iter()
        .map(|&v| {
            if v == LAND {
                CONVERTED_NODATA
            } else if v == PERMANENT_WATER || v == FLOODED {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    let profile = grid
        .profile
        .with_encoding(grid.profile.dtype, Some(CONVERTED_NODATA as f64));

    Ok(RasterGrid::new(
        data,
        profile,
        grid.transform,
        grid.crs.clone(),
    )?)
}

/// Insert a suffix before the file extension:
/// `flood.ngr` + `_converted` → `flood_converted.ngr`.
fn derived_name(name: &str, suffix: &str) -> String {
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            format!("{}{}.{}", stem.to_string_lossy(), suffix, ext.to_string_lossy())
        }
        _ => format!("{name}{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::LocalCatalog;
    use raster_codec::Dataset;
    use raster_core::{Crs, DataType, GeoTransform, Profile};

    fn info_from(data: Vec<f32>, width: usize, height: usize) -> FloodMapInfo {
        let grid = RasterGrid::new(
            data,
            Profile::single_band(width, height, DataType::U8),
            GeoTransform::new(8.0, 45.0, 0.1, -0.1),
            Crs::wgs84(),
        )
        .unwrap();
        let bbox = grid.bbox();
        FloodMapInfo { grid, bbox }
    }

    #[test]
    fn test_derived_name() {
        assert_eq!(derived_name("flood.ngr", "_converted"), "flood_converted.ngr");
        assert_eq!(derived_name("flood", "_converted"), "flood_converted");
    }

    #[test]
    fn test_three_state_no_water() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let info = info_from(vec![0.0, 0.0, 0.0, 0.0], 2, 2);

        let outcome = classify_flood_map(
            "flood.ngr",
            &info,
            ClassificationScheme::ThreeState,
            &catalog,
            None,
        );
        assert!(matches!(outcome, ClassificationOutcome::NoWater));
    }

    #[test]
    fn test_three_state_conversion_and_mask() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let info = info_from(vec![0.0, 2.0, 3.0, 0.0, 2.0, 0.0], 3, 2);

        let outcome = classify_flood_map(
            "flood.ngr",
            &info,
            ClassificationScheme::ThreeState,
            &catalog,
            Some("wd_styles"),
        );

        let (flood_map, mask) = match outcome {
            ClassificationOutcome::Ready {
                flood_map,
                permanent_water,
            } => (flood_map, permanent_water.unwrap()),
            other => panic!("expected Ready, got {other:?}"),
        };

        assert_eq!(flood_map, "flood_converted.ngr");
        assert!(catalog.is_registered("flood_converted.ngr"));

        // Mask marks exactly the permanent-water cells.
        assert_eq!(mask.count(), 2);
        assert!(mask.get(1, 0));
        assert!(mask.get(1, 1));

        // Converted grid: 0 -> 255, {2,3} -> 1.
        let converted = Dataset::open(catalog.local_path(&flood_map)).unwrap();
        assert_eq!(
            converted.grid.data,
            vec![255.0, 1.0, 1.0, 255.0, 1.0, 255.0]
        );
        assert_eq!(converted.grid.profile.nodata, Some(255.0));
        assert_eq!(converted.grid.profile.dtype, DataType::U8);
    }

    #[test]
    fn test_mask_disjoint_from_flooded() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let info = info_from(vec![0.0, 2.0, 3.0, 3.0], 2, 2);

        let outcome = classify_flood_map(
            "flood.ngr",
            &info,
            ClassificationScheme::ThreeState,
            &catalog,
            None,
        );
        let mask = match outcome {
            ClassificationOutcome::Ready {
                permanent_water, ..
            } => permanent_water.unwrap(),
            other => panic!("expected Ready, got {other:?}"),
        };

        let flooded = info.grid.mask_where(|v| v == FLOODED);
        assert!(mask.is_disjoint(&flooded));
    }

    #[test]
    fn test_two_state_no_water() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let info = info_from(vec![0.0; 4], 2, 2);

        let outcome = classify_flood_map(
            "binary.ngr",
            &info,
            ClassificationScheme::TwoState,
            &catalog,
            None,
        );
        assert!(matches!(outcome, ClassificationOutcome::NoWater));
    }

    #[test]
    fn test_two_state_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let info = info_from(vec![0.0, 1.0, 0.0, 1.0], 2, 2);

        let outcome = classify_flood_map(
            "binary.ngr",
            &info,
            ClassificationScheme::TwoState,
            &catalog,
            None,
        );

        match outcome {
            ClassificationOutcome::Ready {
                flood_map,
                permanent_water,
            } => {
                // No conversion, no mask: the model takes the grid as-is.
                assert_eq!(flood_map, "binary.ngr");
                assert!(permanent_water.is_none());
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_two_state_idempotent_on_converted_grid() {
        // Re-running classification on an already-binary grid under the
        // two-state path is a no-op.
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let info = info_from(vec![255.0, 1.0, 1.0, 255.0], 2, 2);

        let outcome = classify_flood_map(
            "flood_converted.ngr",
            &info,
            ClassificationScheme::TwoState,
            &catalog,
            None,
        );
        match outcome {
            ClassificationOutcome::Ready { flood_map, .. } => {
                assert_eq!(flood_map, "flood_converted.ngr");
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_is_not_no_water() {
        // An unwritable catalog root makes persistence fail; the outcome
        // must be Failed, never NoWater.
        let catalog = LocalCatalog::new("/nonexistent/readonly/dir");
        let info = info_from(vec![0.0, 2.0, 3.0, 0.0], 2, 2);

        let outcome = classify_flood_map(
            "flood.ngr",
            &info,
            ClassificationScheme::ThreeState,
            &catalog,
            None,
        );
        assert!(matches!(outcome, ClassificationOutcome::Failed));
    }
}
