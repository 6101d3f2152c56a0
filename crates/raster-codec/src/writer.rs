//! Writing NGRID grid files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression as DeflateLevel;
use tracing::debug;

use raster_core::{Compression, Crs, GeoTransform, Profile, RasterError, RasterGrid};

use crate::error::{CodecError, Result};
use crate::format::{encode_cells, Header, FORMAT_VERSION};
use crate::FORMAT_MAGIC;

/// Buffered writer for one grid file.
///
/// Tags may be set until [`GridWriter::finish`] is called; the header is
/// serialized last so tag writes never require seeking.
pub struct GridWriter {
    path: PathBuf,
    profile: Profile,
    transform: GeoTransform,
    crs: Crs,
    tags: BTreeMap<String, String>,
    bands: Vec<Vec<f32>>,
}

impl GridWriter {
    /// Start writing a grid file with the given metadata.
    pub fn create(
        path: impl AsRef<Path>,
        profile: Profile,
        transform: GeoTransform,
        crs: Crs,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            profile,
            transform,
            crs,
            tags: BTreeMap::new(),
            bands: Vec::new(),
        }
    }

    /// Queue one band of cell data.
    ///
    /// The data length must match the profile dimensions.
    pub fn write_band(&mut self, data: &[f32]) -> Result<()> {
        if data.len() != self.profile.cell_count() {
            return Err(CodecError::Raster(RasterError::ShapeMismatch {
                actual: data.len(),
                width: self.profile.width,
                height: self.profile.height,
                expected: self.profile.cell_count(),
            }));
        }
        self.bands.push(data.to_vec());
        Ok(())
    }

    /// Set a descriptive tag recorded in the file header.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Encode and persist the file.
    pub fn finish(mut self) -> Result<()> {
        if self.bands.len() != self.profile.count {
            return Err(CodecError::format(format!(
                "profile declares {} band(s) but {} were written",
                self.profile.count,
                self.bands.len()
            )));
        }

        let header = Header {
            version: FORMAT_VERSION,
            profile: self.profile.clone(),
            transform: self.transform.to_gdal(),
            crs: self.crs.clone(),
            tags: std::mem::take(&mut self.tags),
        };
        let header_json = serde_json::to_vec(&header)
            .map_err(|e| CodecError::format(format!("header serialization failed: {e}")))?;

        let mut file = File::create(&self.path)?;
        file.write_all(FORMAT_MAGIC)?;
        file.write_all(&(header_json.len() as u32).to_le_bytes())?;
        file.write_all(&header_json)?;

        for band in &self.bands {
            let raw = encode_cells(band, self.profile.dtype);
            let crc = crc32fast::hash(&raw);

            let payload = match self.profile.compression {
                Compression::None => raw,
                Compression::Deflate => {
                    let mut encoder = ZlibEncoder::new(Vec::new(), DeflateLevel::default());
                    encoder.write_all(&raw)?;
                    encoder.finish()?
                }
            };

            file.write_all(&(payload.len() as u64).to_le_bytes())?;
            file.write_all(&payload)?;
            file.write_all(&crc.to_le_bytes())?;
        }

        file.flush()?;
        debug!(path = %self.path.display(), bands = self.profile.count, "Wrote grid file");
        Ok(())
    }
}

/// Write a single-band grid in one call.
pub fn write_grid(path: impl AsRef<Path>, grid: &RasterGrid) -> Result<()> {
    let mut writer = GridWriter::create(
        path,
        grid.profile.clone(),
        grid.transform,
        grid.crs.clone(),
    );
    writer.write_band(&grid.data)?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::DataType;

    #[test]
    fn test_band_shape_checked() {
        let profile = Profile::single_band(4, 4, DataType::F32);
        let mut writer = GridWriter::create(
            "/tmp/unused.ngr",
            profile,
            GeoTransform::default(),
            Crs::wgs84(),
        );
        assert!(writer.write_band(&[0.0; 15]).is_err());
        assert!(writer.write_band(&[0.0; 16]).is_ok());
    }

    #[test]
    fn test_band_count_checked() {
        let dir = tempfile::tempdir().unwrap();
        let profile = Profile::single_band(2, 2, DataType::F32);
        let writer = GridWriter::create(
            dir.path().join("empty.ngr"),
            profile,
            GeoTransform::default(),
            Crs::wgs84(),
        );
        // No band written for a single-band profile.
        assert!(matches!(writer.finish(), Err(CodecError::Format(_))));
    }
}
