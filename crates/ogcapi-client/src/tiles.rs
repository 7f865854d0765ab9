//! Tile and map URL construction.
//!
//! A pyramid renderer addresses tiles as `(level, row, col)` counted from
//! the top-left of a quad tree. [`TileAddressTranslator`] maps those
//! addresses onto a tile matrix set's own level ids and row convention.

use ogc_common::crs::{is_reversed_axis_reference, AxisOrder};
use ogc_common::{
    quad_tree_compatible_level_offset, reference_name, BoundingBox, Bounds, CornerOfOrigin,
    OgcError, OgcResult, TileCoord, TileMatrixSet,
};
use ogcapi_protocol::encode_component;

/// Resolves renderer tile addresses to URLs.
pub trait TileUrlResolver: Send + Sync {
    /// URL of the tile, or `None` when the address lies outside the set.
    fn resolve(&self, level: u32, row: u64, col: u64) -> Option<String>;

    fn resolve_coord(&self, coord: TileCoord) -> Option<String> {
        self.resolve(coord.level, coord.row, coord.col)
    }
}

/// Translates tile addresses for one tile matrix set and URL template.
///
/// The template carries `{tileMatrix}`, `{tileRow}` and `{tileCol}`
/// placeholders.
#[derive(Debug, Clone)]
pub struct TileAddressTranslator {
    template: String,
    reference: String,
    axis_order: AxisOrder,
    invert_rows: bool,
    level_ids: Vec<(u64, String)>,
    level0_columns: u64,
    level0_rows: u64,
    tile_width: u32,
    tile_height: u32,
    origin: (f64, f64),
    bounds: Option<Bounds>,
    quad_tree_level_offset: usize,
}

impl TileAddressTranslator {
    /// Fails when the set has no matrix with a numeric id.
    pub fn new(tms: &TileMatrixSet, template: impl Into<String>) -> OgcResult<Self> {
        let levels = tms.numeric_levels();
        let (_, level0) = levels
            .first()
            .copied()
            .ok_or(OgcError::InvalidTileMatrixSetGeometry)?;

        let axis_order = tms
            .ordered_axes
            .first()
            .map(|axis| AxisOrder::from_first_axis(axis))
            .unwrap_or(AxisOrder::XY);
        let (x, y) = axis_order.indices();

        let origin = (
            level0.point_of_origin.get(x).copied().unwrap_or_default(),
            level0.point_of_origin.get(y).copied().unwrap_or_default(),
        );

        let reference = reference_name(tms.crs_uri());

        let bounds = tms.bounding_box.as_ref().and_then(|bbox| {
            let min = (bbox.lower_left.get(x)?, bbox.lower_left.get(y)?);
            let max = (bbox.upper_right.get(x)?, bbox.upper_right.get(y)?);
            Some(Bounds::new(
                reference.clone(),
                BoundingBox::new(*min.0, *min.1, *max.0, *max.1),
            ))
        });

        Ok(Self {
            template: template.into(),
            axis_order,
            invert_rows: level0.corner() == CornerOfOrigin::TopLeft,
            level_ids: levels
                .iter()
                .map(|(level, matrix)| (*level, matrix.id.clone()))
                .collect(),
            level0_columns: level0.matrix_width,
            level0_rows: level0.matrix_height,
            tile_width: level0.tile_width,
            tile_height: level0.tile_height,
            origin,
            bounds,
            quad_tree_level_offset: quad_tree_compatible_level_offset(tms),
            reference,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Short name of the set's CRS.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn level_count(&self) -> usize {
        self.level_ids.len()
    }

    pub fn level0_columns(&self) -> u64 {
        self.level0_columns
    }

    pub fn level0_rows(&self) -> u64 {
        self.level0_rows
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Level-0 point of origin as `(x, y)`.
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Extent of the set as `(x, y)` corners.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// First level from which the set is a clean quad tree.
    pub fn quad_tree_level_offset(&self) -> usize {
        self.quad_tree_level_offset
    }

    /// Matrix id for a numeric level; the level itself when no matrix matches.
    pub fn level_id(&self, level: u32) -> String {
        self.level_ids
            .iter()
            .find(|(numeric, _)| *numeric == u64::from(level))
            .map(|(_, id)| id.clone())
            .unwrap_or_else(|| level.to_string())
    }

    /// Row in the set's own convention.
    pub fn matrix_row(&self, level: u32, row: u64) -> Option<u64> {
        if !self.invert_rows {
            return Some(row);
        }
        let rows = self.level0_rows.checked_mul(1u64.checked_shl(level)?)?;
        rows.checked_sub(1)?.checked_sub(row)
    }
}

impl TileUrlResolver for TileAddressTranslator {
    fn resolve(&self, level: u32, row: u64, col: u64) -> Option<String> {
        let row = self.matrix_row(level, row)?;
        Some(
            self.template
                .replace("{tileMatrix}", &self.level_id(level))
                .replace("{tileRow}", &row.to_string())
                .replace("{tileCol}", &col.to_string()),
        )
    }
}

/// Builds OGC API - Maps requests for a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct MapUrlBuilder {
    base_url: String,
    crs: String,
    reverse_axis: bool,
    format: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    datetime: Option<String>,
    subset: Vec<String>,
    transparent: Option<bool>,
    bgcolor: Option<String>,
}

impl MapUrlBuilder {
    /// `crs` is used for both `crs` and `bbox-crs`. Axes are reversed by
    /// default for the lat/lon geographic references.
    pub fn new(base_url: impl Into<String>, crs: impl Into<String>) -> Self {
        let crs = crs.into();
        let reverse_axis = is_reversed_axis_reference(&reference_name(Some(&crs)));
        Self {
            base_url: base_url.into(),
            crs,
            reverse_axis,
            format: None,
            width: None,
            height: None,
            datetime: None,
            subset: Vec::new(),
            transparent: None,
            bgcolor: None,
        }
    }

    pub fn reverse_axis(mut self, reverse: bool) -> Self {
        self.reverse_axis = reverse;
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn datetime(mut self, datetime: impl Into<String>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }

    /// Add a `subset` entry such as `elevation(500)`.
    pub fn subset(mut self, subset: impl Into<String>) -> Self {
        self.subset.push(subset.into());
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = Some(transparent);
        self
    }

    pub fn bgcolor(mut self, color: impl Into<String>) -> Self {
        self.bgcolor = Some(color.into());
        self
    }

    /// Request URL for `bbox`, given in x/y order.
    pub fn build(&self, bbox: &BoundingBox) -> String {
        let bbox = if self.reverse_axis { bbox.swapped() } else { *bbox };

        let mut params: Vec<(&str, String)> = vec![
            ("bbox", bbox.to_query_value()),
            ("crs", self.crs.clone()),
            ("bbox-crs", self.crs.clone()),
        ];
        if let Some(format) = &self.format {
            params.push(("f", format.clone()));
        }
        if let Some(width) = self.width {
            params.push(("width", width.to_string()));
        }
        if let Some(height) = self.height {
            params.push(("height", height.to_string()));
        }
        if let Some(datetime) = &self.datetime {
            params.push(("datetime", datetime.clone()));
        }
        if !self.subset.is_empty() {
            params.push(("subset", self.subset.join(",")));
        }
        if let Some(transparent) = self.transparent {
            params.push(("transparent", transparent.to_string()));
        }
        if let Some(bgcolor) = &self.bgcolor {
            params.push(("bgcolor", bgcolor.clone()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(value)))
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.base_url, separator, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSG_4326: &str = "http://www.opengis.net/def/crs/EPSG/0/4326";

    #[test]
    fn test_map_url() {
        let url = MapUrlBuilder::new("https://x.org/collections/blue/map", "http://www.opengis.net/def/crs/EPSG/0/3857")
            .format("image/png")
            .build(&BoundingBox::new(0.0, 1.0, 2.0, 3.0));
        assert_eq!(
            url,
            "https://x.org/collections/blue/map?bbox=0,1,2,3\
             &crs=http://www.opengis.net/def/crs/EPSG/0/3857\
             &bbox-crs=http://www.opengis.net/def/crs/EPSG/0/3857&f=image/png"
        );
    }

    #[test]
    fn test_map_url_reversed_axis() {
        let url = MapUrlBuilder::new("https://x.org/map?f=png", EPSG_4326)
            .datetime("2020-01-01T00:00:00Z")
            .transparent(true)
            .bgcolor("0xFFFFFF")
            .build(&BoundingBox::new(3.4, 51.15, 4.0, 51.75));
        assert!(url.starts_with("https://x.org/map?f=png&bbox=51.15,3.4,51.75,4&"));
        assert!(url.contains("&datetime=2020-01-01T00:00:00Z"));
        assert!(url.ends_with("&transparent=true&bgcolor=0xFFFFFF"));

        let url = MapUrlBuilder::new("https://x.org/map", EPSG_4326)
            .reverse_axis(false)
            .build(&BoundingBox::new(3.4, 51.15, 4.0, 51.75));
        assert!(url.starts_with("https://x.org/map?bbox=3.4,51.15,4,51.75&"));
    }

    #[test]
    fn test_map_url_subset_and_size() {
        let url = MapUrlBuilder::new("https://x.org/map", "CRS:84")
            .size(512, 256)
            .subset("elevation(500)")
            .build(&BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert!(url.contains("&width=512&height=256&subset=elevation%28500%29"));
    }
}
