//! Permanent-water mask provisioning.
//!
//! Three-state inputs carry their own permanent-water class, so the mask
//! comes straight from the classifier. Two-state inputs with removal
//! requested need an externally generated land-cover raster, binarized on
//! the water class and persisted as a compact mask product; at compositing
//! time that product is aligned onto the hydraulic model's output grid.

use tracing::info;

use platform::{FileCatalog, JobRunner};
use raster_codec::{write_grid, Dataset};
use raster_core::{BoundingBox, Compression, DataType, Mask, RasterGrid};

use crate::align::align_mask;
use crate::error::{PipelineError, Result};

/// Land-cover class code for open water.
pub const LAND_COVER_WATER_CODE: f32 = 80.0;

/// Processor name of the land-cover extraction collaborator.
pub const LAND_COVER_PROCESSOR: &str = "world_cover_extractor";

/// Generate and persist a permanent-water mask from an external land-cover
/// source, scoped to the input's bounding box.
///
/// Delegates extraction to the [`LAND_COVER_PROCESSOR`] job; a non-DONE
/// status aborts the run with [`PipelineError::RemoteJob`]. The
/// full-coverage land-cover product is deleted once the binary mask file
/// is persisted and registered. Returns the mask product name.
pub fn generate_external_mask(
    runner: &dyn JobRunner,
    catalog: &dyn FileCatalog,
    bbox: &BoundingBox,
    base_name: &str,
) -> Result<String> {
    let mask_name = format!("{base_name}_PW_Mask.ngr");
    let full_name = format!("{base_name}_PW_Mask_full.ngr");

    let params = serde_json::json!({
        "BBOX": bbox.to_corners(),
        "OUTPUT": full_name,
    });

    info!(processor = LAND_COVER_PROCESSOR, output = %full_name, "Requesting land-cover extraction");
    let job = runner.execute(LAND_COVER_PROCESSOR, &params)?;
    let status = runner.wait(&job)?;
    if !status.is_done() {
        return Err(PipelineError::RemoteJob {
            processor: LAND_COVER_PROCESSOR.to_string(),
            status,
        });
    }

    let full = Dataset::open(catalog.local_path(&full_name))?;
    let binary = binarize_land_cover(&full.grid)?;

    write_grid(catalog.local_path(&mask_name), &binary)?;
    catalog.register(&mask_name, None)?;
    catalog.delete(&full_name)?;
    info!(mask = %mask_name, "Permanent water mask persisted");

    Ok(mask_name)
}

/// Binarize a land-cover grid: water class cells become 1, everything else
/// 0. The result is a u8, deflate-compressed grid with no-data 0.
fn binarize_land_cover(grid: &RasterGrid) -> Result<RasterGrid> {
    let data: Vec<f32> = grid
        .data
        .iter()
        .map(|&v| if v == LAND_COVER_WATER_CODE { 1.0 } else { 0.0 })
        .collect();

    let mut profile = grid.profile.with_encoding(DataType::U8, Some(0.0));
    profile.compression = Compression::Deflate;

    Ok(RasterGrid::new(
        data,
        profile,
        grid.transform,
        grid.crs.clone(),
    )?)
}

/// Load a persisted mask product and align it onto the model output grid.
///
/// Alignment targets the *model output* geometry, not the input flood
/// map's; resolution and extent may differ between the two.
pub fn load_aligned_mask(
    catalog: &dyn FileCatalog,
    mask_name: &str,
    model_output: &RasterGrid,
) -> Result<Mask> {
    let dataset = Dataset::open(catalog.local_path(mask_name))?;
    align_mask(&dataset.grid, model_output)
}
