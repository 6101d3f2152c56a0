//! Read-only access to flood map rasters.

use std::path::Path;

use tracing::debug;

use raster_codec::Dataset;
use raster_core::{BoundingBox, RasterGrid};

use crate::error::Result;

/// Everything the pipeline needs from an input flood map, read in one pass.
///
/// The grid handle is released as soon as this struct is built; no file
/// stays open across pipeline stages.
#[derive(Debug, Clone)]
pub struct FloodMapInfo {
    /// Band 1 of the flood map.
    pub grid: RasterGrid,
    /// Geographic bounding box, used to scope external extraction jobs.
    pub bbox: BoundingBox,
}

/// Open a flood map file and extract its data and geospatial metadata.
///
/// Fails with `CodecError::NotFound` for a missing path and
/// `CodecError::Format` for a file that cannot be parsed as a
/// georeferenced grid. Reads exactly band 1; multi-band inputs are
/// unsupported by design.
pub fn open_flood_map(path: impl AsRef<Path>) -> Result<FloodMapInfo> {
    let path = path.as_ref();
    let dataset = Dataset::open(path)?;
    let bbox = dataset.grid.bbox();

    debug!(
        path = %path.display(),
        width = dataset.grid.width(),
        height = dataset.grid.height(),
        "Read flood map info"
    );

    Ok(FloodMapInfo {
        grid: dataset.grid,
        bbox,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_codec::{write_grid, CodecError};
    use raster_core::{Crs, DataType, GeoTransform, Profile};

    use crate::error::PipelineError;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = open_flood_map("/no/such/flood.ngr").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Codec(CodecError::NotFound(_))
        ));
    }

    #[test]
    fn test_open_returns_grid_and_bbox() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flood.ngr");
        let grid = RasterGrid::new(
            vec![0.0, 2.0, 3.0, 0.0],
            Profile::single_band(2, 2, DataType::U8),
            GeoTransform::new(8.0, 45.0, 0.5, -0.5),
            Crs::wgs84(),
        )
        .unwrap();
        write_grid(&path, &grid).unwrap();

        let info = open_flood_map(&path).unwrap();
        assert_eq!(info.grid.data, grid.data);
        assert!((info.bbox.min_lon - 8.0).abs() < 1e-10);
        assert!((info.bbox.max_lat - 45.0).abs() < 1e-10);
        assert!((info.bbox.max_lon - 9.0).abs() < 1e-10);
        assert!((info.bbox.min_lat - 44.0).abs() < 1e-10);
    }
}
