//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::crs::DEFAULT_REFERENCE;

/// An axis-aligned bounding box `[min_x, min_y, max_x, max_y]`.
///
/// The box carries no reference of its own; see [`Bounds`] for a box tied
/// to a named CRS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build from an OGC extent array.
    ///
    /// Accepts 2D `[minx, miny, maxx, maxy]` and 3D
    /// `[minx, miny, minz, maxx, maxy, maxz]` arrays.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [min_x, min_y, max_x, max_y] => Some(Self::new(*min_x, *min_y, *max_x, *max_y)),
            [min_x, min_y, _, max_x, max_y, _] => {
                Some(Self::new(*min_x, *min_y, *max_x, *max_y))
            }
            _ => None,
        }
    }

    /// Parse a `bbox` query value: "minx,miny,maxx,maxy"
    pub fn from_query_value(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Ordinates in `bbox` parameter order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Serialize as a `bbox` query value.
    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Reorder `(x1, y1, x2, y2)` to `(y1, x1, y2, x2)`.
    pub fn swapped(&self) -> Self {
        Self::new(self.min_y, self.min_x, self.max_y, self.max_x)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A bounding box expressed in a named reference (`EPSG:3857`, `CRS:84`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub reference: String,
    pub bbox: BoundingBox,
}

impl Bounds {
    pub fn new(reference: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            reference: reference.into(),
            bbox,
        }
    }

    /// Bounds in WGS84 lon/lat.
    pub fn crs84(bbox: BoundingBox) -> Self {
        Self::new(DEFAULT_REFERENCE, bbox)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
