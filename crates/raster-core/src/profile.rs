//! Raster profiles: dimensions, data type, no-data value, compression.

use serde::{Deserialize, Serialize};

/// On-disk cell encoding.
///
/// In-memory data is always `f32`; the data type controls how cells are
/// serialized by the codec and which domain values survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl DataType {
    /// Size of one encoded cell in bytes.
    pub fn byte_size(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Parse from string (case-insensitive). Unknown names default to F32.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "u8" | "uint8" => Self::U8,
            "i16" | "int16" => Self::I16,
            "u16" | "uint16" => Self::U16,
            "i32" | "int32" => Self::I32,
            "u32" | "uint32" => Self::U32,
            "f64" | "float64" => Self::F64,
            _ => Self::F32,
        }
    }

    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Band payload compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compression {
    /// No compression.
    #[default]
    None,
    /// Deflate (zlib) compression.
    Deflate,
}

impl Compression {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "deflate" | "zlib" | "lzw" => Self::Deflate,
            _ => Self::None,
        }
    }

    /// Get the codec name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Deflate => "deflate",
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata profile for a georeferenced grid.
///
/// Any grid written to disk must carry a profile consistent with its data:
/// `width * height` must equal the cell count, and `dtype` must be able to
/// represent the values being written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// On-disk cell encoding.
    pub dtype: DataType,
    /// Declared no-data value, if any.
    pub nodata: Option<f64>,
    /// Band payload compression.
    pub compression: Compression,
    /// Number of bands in the file. The pipeline reads exactly band 1.
    pub count: usize,
}

impl Profile {
    /// Create a single-band profile.
    pub fn single_band(width: usize, height: usize, dtype: DataType) -> Self {
        Self {
            width,
            height,
            dtype,
            nodata: None,
            compression: Compression::None,
            count: 1,
        }
    }

    /// Total number of cells in one band.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Copy of this profile with a different data type and no-data value.
    ///
    /// Mirrors the `profile.update(dtype=..., nodata=...)` step performed
    /// before every derived-grid write.
    pub fn with_encoding(&self, dtype: DataType, nodata: Option<f64>) -> Self {
        Self {
            dtype,
            nodata,
            ..self.clone()
        }
    }
}
