//! Common types and utilities shared by the OGC API client crates.
//!
//! Everything here is pure: CRS naming, URL normalization, bounding boxes,
//! tile matrix geometry and the error taxonomy. Network access lives in
//! `ogcapi-client`.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod tile;
pub mod url;

pub use bbox::{Bounds, BoundingBox};
pub use crs::{
    reference_name, AxisOrder, CRS84_URI, CRS84_URN, DEFAULT_REFERENCE, REVERSED_AXIS_REFERENCES,
};
pub use error::{OgcError, OgcResult};
pub use tile::{
    quad_tree_compatible_level_offset, quad_tree_compatible_level_offset_with_tolerance,
    CornerOfOrigin, CrsReference, TileCoord, TileMatrix,
    TileMatrixSet, TileMatrixSetBoundingBox, VariableMatrixWidth, QUAD_TREE_SCALE_TOLERANCE,
};
