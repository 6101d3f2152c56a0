//! Persisting composited output grids.

use std::path::Path;

use tracing::info;

use raster_codec::GridWriter;
use raster_core::{Compression, DataType, RasterGrid};

use crate::error::Result;

/// Save a composited grid with proper no-data handling.
///
/// Forces the on-disk type to F32 and deflate compression, declares the
/// permanent-water sentinel as the no-data value, and stamps the tags
/// downstream visualization tools need even when they ignore the profile:
/// an explicit no-data tag and forced statistics bounds (minimum pinned at
/// 0, maximum computed from the data ignoring the NaN background).
pub fn save_composite(path: impl AsRef<Path>, grid: &RasterGrid, sentinel: f64) -> Result<()> {
    let path = path.as_ref();

    let mut profile = grid.profile.with_encoding(DataType::F32, Some(sentinel));
    profile.compression = Compression::Deflate;

    let max = grid
        .data
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f32::NEG_INFINITY, f32::max);
    let max = if max.is_finite() { max } else { 0.0 };

    let mut writer = GridWriter::create(path, profile, grid.transform, grid.crs.clone());
    writer.write_band(&grid.data)?;
    writer.set_tag("NODATA_VALUE", format_number(sentinel));
    writer.set_tag("STATISTICS_MINIMUM", "0");
    writer.set_tag("STATISTICS_MAXIMUM", format_number(max as f64));
    writer.finish()?;

    info!(path = %path.display(), nodata = sentinel, max = max, "Saved composite output");
    Ok(())
}

/// Render a number the way tag consumers expect: integral values without a
/// trailing `.0`.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
