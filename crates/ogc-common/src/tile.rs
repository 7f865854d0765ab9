//! OGC two-dimensional tile matrix set geometry.
//!
//! These types deserialize the JSON encoding of OGC API - Tiles tile matrix
//! set documents (`/tileMatrixSets/{id}`) and provide the quad-tree
//! compatibility analysis used by pyramid-based tile consumers.

use serde::{Deserialize, Deserializer, Serialize};

/// Relative tolerance applied when comparing scale denominators of adjacent levels.
pub const QUAD_TREE_SCALE_TOLERANCE: f64 = 1e-8;

/// A tile address as issued by a pyramid renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub level: u32,
    pub row: u64,
    pub col: u64,
}

impl TileCoord {
    pub fn new(level: u32, row: u64, col: u64) -> Self {
        Self { level, row, col }
    }
}

/// Which corner of the matrix extent row/column zero is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerOfOrigin {
    TopLeft,
    BottomLeft,
}

impl CornerOfOrigin {
    /// Interpret a `cornerOfOrigin` value; absent means top-left.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            None => CornerOfOrigin::TopLeft,
            Some(v) if v.eq_ignore_ascii_case("topLeft") => CornerOfOrigin::TopLeft,
            Some(_) => CornerOfOrigin::BottomLeft,
        }
    }
}

/// Rows of a matrix whose width varies (polar coalescing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMatrixWidth {
    pub coalesce: u32,
    pub min_tile_row: u64,
    pub max_tile_row: u64,
}

/// A single tile matrix (zoom level) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrix {
    /// Identifier; numeric for pyramid levels but not required to be.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub scale_denominator: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_of_origin: Option<String>,

    pub point_of_origin: Vec<f64>,

    pub matrix_width: u64,

    pub matrix_height: u64,

    pub tile_width: u32,

    pub tile_height: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_matrix_widths: Option<Vec<VariableMatrixWidth>>,
}

impl TileMatrix {
    /// Numeric level of this matrix, when its id is a non-negative integer.
    pub fn level(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    pub fn corner(&self) -> CornerOfOrigin {
        CornerOfOrigin::from_value(self.corner_of_origin.as_deref())
    }
}

/// The `crs` member, either a plain URI or an object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrsReference {
    Uri(String),
    Object {
        #[serde(default)]
        uri: Option<String>,
        #[serde(default)]
        wkt: Option<serde_json::Value>,
    },
}

impl CrsReference {
    pub fn uri(&self) -> Option<&str> {
        match self {
            CrsReference::Uri(uri) => Some(uri),
            CrsReference::Object { uri, .. } => uri.as_deref(),
        }
    }
}

/// Corners of a tile matrix set's extent, in its own axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSetBoundingBox {
    pub lower_left: Vec<f64>,
    pub upper_right: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsReference>,
}

/// A complete tile matrix set definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSet {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    pub crs: CrsReference,

    #[serde(default)]
    pub ordered_axes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_known_scale_set: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<TileMatrixSetBoundingBox>,

    pub tile_matrices: Vec<TileMatrix>,
}

impl TileMatrixSet {
    /// CRS URI of the set (empty when only a WKT definition is given).
    pub fn crs_uri(&self) -> Option<&str> {
        self.crs.uri()
    }

    /// Matrices with numeric ids, ascending by level.
    pub fn numeric_levels(&self) -> Vec<(u64, &TileMatrix)> {
        let mut levels: Vec<(u64, &TileMatrix)> = self
            .tile_matrices
            .iter()
            .filter_map(|tm| tm.level().map(|level| (level, tm)))
            .collect();
        levels.sort_by_key(|(level, _)| *level);
        levels
    }

    /// Number of pyramid levels (matrices with numeric ids).
    pub fn level_count(&self) -> usize {
        self.tile_matrices
            .iter()
            .filter(|tm| tm.level().is_some())
            .count()
    }

    /// Matrix whose id equals `level` numerically.
    pub fn matrix_for_level(&self, level: u32) -> Option<&TileMatrix> {
        self.tile_matrices
            .iter()
            .find(|tm| tm.level() == Some(u64::from(level)))
    }
}

/// First pyramid level from which the set forms a clean quad tree.
///
/// The finest level is the reference. Walking towards coarser levels, each
/// level must have a scale denominator equal to the reference times its
/// power-of-two multiplier, the same origin x ordinate and tile size, no
/// variable widths, and a matrix size equal to the reference divided by the
/// multiplier. The index after the first level that fails is returned; `0`
/// means the whole pyramid is compatible.
pub fn quad_tree_compatible_level_offset(tms: &TileMatrixSet) -> usize {
    quad_tree_compatible_level_offset_with_tolerance(tms, QUAD_TREE_SCALE_TOLERANCE)
}

/// [`quad_tree_compatible_level_offset`] with an explicit relative scale tolerance.
pub fn quad_tree_compatible_level_offset_with_tolerance(
    tms: &TileMatrixSet,
    tolerance: f64,
) -> usize {
    let levels = tms.numeric_levels();
    let count = levels.len();
    if count < 2 {
        return 0;
    }

    let (_, reference) = levels[count - 1];
    let ref_origin_x = reference.point_of_origin.first().copied();

    for index in (0..count - 1).rev() {
        let (_, matrix) = levels[index];
        let multiplier = 2f64.powi((count - 1 - index) as i32);

        let expected_scale = reference.scale_denominator * multiplier;
        let scale_mismatch =
            (matrix.scale_denominator - expected_scale).abs() > matrix.scale_denominator * tolerance;
        let origin_mismatch = matrix.point_of_origin.first().copied() != ref_origin_x;
        let tile_size_mismatch = matrix.tile_width != reference.tile_width
            || matrix.tile_height != reference.tile_height;
        let width_mismatch = matrix.matrix_width as f64 != reference.matrix_width as f64 / multiplier;
        let height_mismatch =
            matrix.matrix_height as f64 != reference.matrix_height as f64 / multiplier;

        if scale_mismatch
            || origin_mismatch
            || tile_size_mismatch
            || matrix.variable_matrix_widths.is_some()
            || width_mismatch
            || height_mismatch
        {
            return index + 1;
        }
    }

    0
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
