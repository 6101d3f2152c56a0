//! Coordinate reference system identifiers.

use serde::{Deserialize, Serialize};

/// A coordinate reference system identifier, e.g. `EPSG:4326`.
///
/// The pipeline never reprojects between datums; the identifier is carried
/// through reads and writes and compared when masks are aligned onto a
/// different grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs(String);

impl Crs {
    /// WGS84 geographic coordinates.
    pub fn wgs84() -> Self {
        Self("EPSG:4326".to_string())
    }

    /// Create from an authority code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The authority code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
