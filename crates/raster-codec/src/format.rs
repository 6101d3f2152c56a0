//! NGRID/1 on-disk layout: constants, header, cell encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use raster_core::{Crs, DataType, Profile};

use crate::error::{CodecError, Result};

/// File magic, first four bytes of every NGRID file.
pub const FORMAT_MAGIC: &[u8; 4] = b"NGR1";

/// Format version recorded in the header.
pub const FORMAT_VERSION: u32 = 1;

/// JSON metadata header stored after the magic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    /// Format version for forward compatibility checks.
    pub version: u32,
    /// Grid metadata profile.
    pub profile: Profile,
    /// Affine geotransform, GDAL coefficient order.
    pub transform: [f64; 6],
    /// Coordinate reference system.
    pub crs: Crs,
    /// Descriptive tags (no-data, forced statistics bounds, ...).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Encode in-memory `f32` cells into the profile's on-disk data type,
/// little-endian.
pub fn encode_cells(data: &[f32], dtype: DataType) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * dtype.byte_size());
    for &v in data {
        match dtype {
            DataType::U8 => bytes.push(v as u8),
            DataType::I16 => bytes.extend_from_slice(&(v as i16).to_le_bytes()),
            DataType::U16 => bytes.extend_from_slice(&(v as u16).to_le_bytes()),
            DataType::I32 => bytes.extend_from_slice(&(v as i32).to_le_bytes()),
            DataType::U32 => bytes.extend_from_slice(&(v as u32).to_le_bytes()),
            DataType::F32 => bytes.extend_from_slice(&v.to_le_bytes()),
            DataType::F64 => bytes.extend_from_slice(&(v as f64).to_le_bytes()),
        }
    }
    bytes
}

/// Decode on-disk cell bytes back into `f32` values.
pub fn decode_cells(bytes: &[u8], dtype: DataType) -> Result<Vec<f32>> {
    let size = dtype.byte_size();
    if bytes.len() % size != 0 {
        return Err(CodecError::format(format!(
            "band payload length {} is not a multiple of cell size {}",
            bytes.len(),
            size
        )));
    }

    let mut data = Vec::with_capacity(bytes.len() / size);
    for chunk in bytes.chunks_exact(size) {
        let v = match dtype {
            DataType::U8 => chunk[0] as f32,
            DataType::I16 => i16::from_le_bytes([chunk[0], chunk[1]]) as f32,
            DataType::U16 => u16::from_le_bytes([chunk[0], chunk[1]]) as f32,
            DataType::I32 => {
                i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f32
            }
            DataType::U32 => {
                u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f32
            }
            DataType::F32 => f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            DataType::F64 => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                f64::from_le_bytes(buf) as f32
            }
        };
        data.push(v);
    }
    Ok(data)
}
