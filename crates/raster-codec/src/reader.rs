//! Reading NGRID grid files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;
use tracing::debug;

use raster_core::{Compression, GeoTransform, RasterGrid};

use crate::error::{CodecError, Result};
use crate::format::{decode_cells, Header, FORMAT_MAGIC, FORMAT_VERSION};

/// An opened grid file: the decoded first band plus its descriptive tags.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Band 1 as a georeferenced grid.
    pub grid: RasterGrid,
    /// Descriptive tags from the header.
    pub tags: BTreeMap<String, String>,
}

impl Dataset {
    /// Open a grid file and decode band 1.
    ///
    /// Fails with [`CodecError::NotFound`] if the path does not exist and
    /// [`CodecError::Format`] if the file cannot be parsed. Read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CodecError::NotFound(path.display().to_string()));
        }

        let mut file = File::open(path)?;

        let mut magic = [0u8; 4];
        read_exact_or_format(&mut file, &mut magic, "magic")?;
        if &magic != FORMAT_MAGIC {
            return Err(CodecError::format("bad magic, not an NGRID file"));
        }

        let mut len_buf = [0u8; 4];
        read_exact_or_format(&mut file, &mut len_buf, "header length")?;
        let header_len = u32::from_le_bytes(len_buf) as usize;

        let mut header_buf = vec![0u8; header_len];
        read_exact_or_format(&mut file, &mut header_buf, "header")?;
        let header: Header = serde_json::from_slice(&header_buf)
            .map_err(|e| CodecError::format(format!("invalid header JSON: {e}")))?;

        if header.version != FORMAT_VERSION {
            return Err(CodecError::format(format!(
                "unsupported format version {}",
                header.version
            )));
        }
        if header.profile.count == 0 {
            return Err(CodecError::format("profile declares zero bands"));
        }

        // Band 1 only; remaining bands are left unread.
        let mut band_len_buf = [0u8; 8];
        read_exact_or_format(&mut file, &mut band_len_buf, "band length")?;
        let band_len = u64::from_le_bytes(band_len_buf) as usize;

        let mut payload = vec![0u8; band_len];
        read_exact_or_format(&mut file, &mut payload, "band payload")?;

        let mut crc_buf = [0u8; 4];
        read_exact_or_format(&mut file, &mut crc_buf, "band checksum")?;
        let stored_crc = u32::from_le_bytes(crc_buf);

        let raw = match header.profile.compression {
            Compression::None => payload,
            Compression::Deflate => {
                let mut decoder = ZlibDecoder::new(payload.as_slice());
                let mut out = Vec::new();
                decoder
                    .read_to_end(&mut out)
                    .map_err(|e| CodecError::format(format!("deflate decode failed: {e}")))?;
                out
            }
        };

        let computed_crc = crc32fast::hash(&raw);
        if computed_crc != stored_crc {
            return Err(CodecError::format(format!(
                "band checksum mismatch: stored {stored_crc:#010x}, computed {computed_crc:#010x}"
            )));
        }

        let data = decode_cells(&raw, header.profile.dtype)?;
        let grid = RasterGrid::new(
            data,
            header.profile,
            GeoTransform::from_gdal(header.transform),
            header.crs,
        )
        .map_err(|e| CodecError::format(e.to_string()))?;

        debug!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            dtype = %grid.profile.dtype,
            "Opened grid file"
        );

        Ok(Self {
            grid,
            tags: header.tags,
        })
    }
}

/// Read exactly `buf.len()` bytes, reporting truncation as a format error
/// rather than a bare I/O error.
fn read_exact_or_format(file: &mut File, buf: &mut [u8], what: &str) -> Result<()> {
    file.read_exact(buf)
        .map_err(|e| CodecError::format(format!("truncated {what}: {e}")))
}
