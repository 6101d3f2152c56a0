//! Geographic bounding boxes.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in WGS84 coordinates.
///
/// Derived from a grid's geotransform and extent. Used to request
/// externally-generated rasters covering the same area; it is never itself
/// reprojected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// A single corner of a bounding box, in the `{lat, lng}` shape remote
/// processors expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub lat: f64,
    pub lng: f64,
}

/// Wire form of a bounding box: two corners, north-east and south-west.
///
/// This is the shape serialized into remote job parameter dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerBounds {
    #[serde(rename = "northEast")]
    pub north_east: Corner,
    #[serde(rename = "southWest")]
    pub south_west: Corner,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Get the width in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Get the height in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bounding box.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Convert to the two-corner wire form used in job requests.
    pub fn to_corners(&self) -> CornerBounds {
        CornerBounds {
            north_east: Corner {
                lat: self.max_lat,
                lng: self.max_lon,
            },
            south_west: Corner {
                lat: self.min_lat,
                lng: self.min_lon,
            },
        }
    }
}

impl From<CornerBounds> for BoundingBox {
    fn from(c: CornerBounds) -> Self {
        Self::new(
            c.south_west.lng,
            c.south_west.lat,
            c.north_east.lng,
            c.north_east.lat,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BoundingBox::new(-100.0, 30.0, -90.0, 40.0);
        assert!((bbox.width() - 10.0).abs() < f64::EPSILON);
        assert!((bbox.height() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bbox_contains() {
        let bbox = BoundingBox::new(-100.0, 30.0, -90.0, 40.0);
        assert!(bbox.contains(-95.0, 35.0));
        assert!(!bbox.contains(-105.0, 35.0));
        assert!(!bbox.contains(-95.0, 45.0));
    }

    #[test]
    fn test_corner_round_trip() {
        let bbox = BoundingBox::new(8.5, 44.0, 9.5, 45.0);
        let corners = bbox.to_corners();
        assert!((corners.north_east.lat - 45.0).abs() < f64::EPSILON);
        assert!((corners.north_east.lng - 9.5).abs() < f64::EPSILON);
        assert!((corners.south_west.lat - 44.0).abs() < f64::EPSILON);
        assert!((corners.south_west.lng - 8.5).abs() < f64::EPSILON);
        assert_eq!(BoundingBox::from(corners), bbox);
    }

    #[test]
    fn test_corner_wire_shape() {
        let bbox = BoundingBox::new(8.5, 44.0, 9.5, 45.0);
        let json = serde_json::to_value(bbox.to_corners()).unwrap();
        assert!(json.get("northEast").is_some());
        assert!(json.get("southWest").is_some());
        assert_eq!(json["southWest"]["lat"], 44.0);
    }
}
