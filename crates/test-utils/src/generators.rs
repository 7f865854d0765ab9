//! Generators for synthetic tile matrix set documents.
//!
//! The generated documents use the JSON encoding served at
//! `/tileMatrixSets/{id}`, so tests can feed them to the same
//! deserialization path as live responses.

use serde_json::{json, Value};

/// Scale denominator of WebMercatorQuad level 0.
pub const WEB_MERCATOR_LEVEL0_SCALE: f64 = 559082264.0287178;

/// Half the Web Mercator extent in meters.
pub const WEB_MERCATOR_HALF_EXTENT: f64 = 20037508.342789244;

/// Creates a tile matrix set whose levels form an exact quad tree.
///
/// Level `i` has id `"i"`, a scale denominator of
/// `level0_scale / 2^i`, and a matrix of
/// `level0_columns * 2^i` by `level0_rows * 2^i` tiles of 256x256 pixels.
/// Every level shares the same top-left origin.
///
/// # Example
///
/// ```
/// use test_utils::quad_pyramid;
///
/// let tms = quad_pyramid("Test", 3, 1000.0, 2, 1);
/// assert_eq!(tms["tileMatrices"].as_array().unwrap().len(), 3);
/// assert_eq!(tms["tileMatrices"][2]["matrixWidth"], 8);
/// ```
pub fn quad_pyramid(
    id: &str,
    levels: u32,
    level0_scale: f64,
    level0_columns: u64,
    level0_rows: u64,
) -> Value {
    let matrices: Vec<Value> = (0..levels)
        .map(|level| {
            let factor = 1u64 << level;
            json!({
                "id": level.to_string(),
                "scaleDenominator": level0_scale / factor as f64,
                "cellSize": level0_scale / factor as f64 * 0.00028,
                "cornerOfOrigin": "topLeft",
                "pointOfOrigin": [-180.0, 90.0],
                "matrixWidth": level0_columns * factor,
                "matrixHeight": level0_rows * factor,
                "tileWidth": 256,
                "tileHeight": 256
            })
        })
        .collect();

    json!({
        "id": id,
        "title": format!("{} synthetic pyramid", id),
        "crs": "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
        "orderedAxes": ["Lon", "Lat"],
        "tileMatrices": matrices
    })
}

/// Multiplies the scale denominator of one level by `factor`.
pub fn perturb_scale(tms: &mut Value, level: usize, factor: f64) {
    let scale = &mut tms["tileMatrices"][level]["scaleDenominator"];
    let current = scale.as_f64().unwrap_or_default();
    *scale = json!(current * factor);
}

/// Scale denominator of a WebMercatorQuad level.
pub fn web_mercator_scale(level: u32) -> f64 {
    WEB_MERCATOR_LEVEL0_SCALE / (1u64 << level) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_pyramid_shape() {
        let tms = quad_pyramid("Quad", 4, 800.0, 2, 1);
        let matrices = tms["tileMatrices"].as_array().unwrap();
        assert_eq!(matrices.len(), 4);
        assert_eq!(matrices[0]["id"], "0");
        assert_eq!(matrices[3]["scaleDenominator"], 100.0);
        assert_eq!(matrices[3]["matrixWidth"], 16);
        assert_eq!(matrices[3]["matrixHeight"], 8);
    }

    #[test]
    fn test_perturb_scale() {
        let mut tms = quad_pyramid("Quad", 2, 800.0, 1, 1);
        perturb_scale(&mut tms, 0, 1.5);
        assert_eq!(tms["tileMatrices"][0]["scaleDenominator"], 1200.0);
    }

    #[test]
    fn test_web_mercator_scale() {
        assert_eq!(web_mercator_scale(0), WEB_MERCATOR_LEVEL0_SCALE);
        assert_eq!(web_mercator_scale(1), WEB_MERCATOR_LEVEL0_SCALE / 2.0);
    }
}
