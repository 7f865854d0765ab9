//! Coordinate Reference System naming and axis-order helpers.
//!
//! OGC API servers identify reference systems with definition URIs such as
//! `http://www.opengis.net/def/crs/EPSG/0/4326`. Clients (and most geometry
//! libraries) work with short codes such as `EPSG:4326` or `CRS:84`.

use std::fmt;

/// OGC definition URI of the WGS84 lon/lat reference.
pub const CRS84_URI: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";

/// URN form of [`CRS84_URI`], expected by some feature decoders.
pub const CRS84_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// Reference assumed when nothing else is configured.
pub const DEFAULT_REFERENCE: &str = "CRS:84";

/// Geographic references whose authority axis order is lat/lon.
pub const REVERSED_AXIS_REFERENCES: [&str; 3] = ["EPSG:4269", "EPSG:4326", "EPSG:4267"];

const DEFINITION_PREFIXES: [&str; 2] = [
    "http://www.opengis.net/def/crs/",
    "https://www.opengis.net/def/crs/",
];

/// Map a CRS URI (or an already short name) to its canonical short code.
///
/// - `None` behaves exactly like [`CRS84_URI`].
/// - Enclosing angle brackets are removed.
/// - Anything that is not an `http(s)` URI is returned unchanged.
/// - `.../def/crs/EPSG/<version>/<code>` becomes `EPSG:<code>`.
/// - `.../def/crs/OGC/<version>/CRS<code>` becomes `CRS:<code>`.
/// - Every other shape is returned unchanged.
///
/// The OGC branch only strips a literal `CRS` prefix from the code; OGC
/// codes that do not carry it are kept whole.
pub fn reference_name(uri_or_name: Option<&str>) -> String {
    let cleaned: String = uri_or_name
        .unwrap_or(CRS84_URI)
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect();

    if !cleaned.starts_with("http") {
        return cleaned;
    }

    let Some(rest) = DEFINITION_PREFIXES
        .iter()
        .find_map(|prefix| cleaned.strip_prefix(prefix))
    else {
        return cleaned;
    };

    let parts: Vec<&str> = rest.split('/').collect();
    if let [authority, _version, code] = parts.as_slice() {
        match *authority {
            "EPSG" => return format!("EPSG:{}", code),
            "OGC" => {
                let code = code.strip_prefix("CRS").unwrap_or(code);
                return format!("CRS:{}", code);
            }
            _ => {}
        }
    }

    cleaned
}

/// True when the reference name designates WGS84 lon/lat.
pub fn is_crs84(reference: &str) -> bool {
    reference_name(Some(reference)) == DEFAULT_REFERENCE || reference == CRS84_URN
}

/// True when `reference` is one of [`REVERSED_AXIS_REFERENCES`].
pub fn is_reversed_axis_reference(reference: &str) -> bool {
    REVERSED_AXIS_REFERENCES.contains(&reference)
}

/// True when the canonical name of `crs` appears in `swap_list`.
pub fn needs_axis_swap(crs: Option<&str>, swap_list: &[String]) -> bool {
    let name = reference_name(crs);
    swap_list.iter().any(|candidate| *candidate == name)
}

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// X (longitude/easting), Y (latitude/northing)
    XY,
    /// Y (latitude/northing), X (longitude/easting)
    LatLon,
}

impl AxisOrder {
    /// Authority axis order of a canonical reference name.
    pub fn of_reference(reference: &str) -> Self {
        if is_reversed_axis_reference(reference) {
            AxisOrder::LatLon
        } else {
            AxisOrder::XY
        }
    }

    /// Axis order implied by the first entry of a tile matrix set's `orderedAxes`.
    pub fn from_first_axis(axis: &str) -> Self {
        match axis.to_uppercase().as_str() {
            "LAT" | "LATITUDE" | "N" | "S" => AxisOrder::LatLon,
            _ => AxisOrder::XY,
        }
    }

    /// Indices of the (x, y) ordinates inside a coordinate pair.
    pub fn indices(&self) -> (usize, usize) {
        match self {
            AxisOrder::XY => (0, 1),
            AxisOrder::LatLon => (1, 0),
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisOrder::XY => write!(f, "x,y"),
            AxisOrder::LatLon => write!(f, "lat,lon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_uri() {
        assert_eq!(
            reference_name(Some("http://www.opengis.net/def/crs/EPSG/0/4326")),
            "EPSG:4326"
        );
        assert_eq!(
            reference_name(Some("http://www.opengis.net/def/crs/EPSG/0/3857")),
            "EPSG:3857"
        );
    }

    #[test]
    fn test_ogc_uri() {
        assert_eq!(reference_name(Some(CRS84_URI)), "CRS:84");
        assert_eq!(
            reference_name(Some("http://www.opengis.net/def/crs/OGC/0/CRS84h")),
            "CRS:84h"
        );
    }

    #[test]
    fn test_ogc_code_without_prefix_is_kept() {
        assert_eq!(
            reference_name(Some("http://www.opengis.net/def/crs/OGC/1.3/84")),
            "CRS:84"
        );
    }

    #[test]
    fn test_none_is_crs84() {
        assert_eq!(reference_name(None), "CRS:84");
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(
            reference_name(Some("<http://www.opengis.net/def/crs/EPSG/0/25832>")),
            "EPSG:25832"
        );
    }

    #[test]
    fn test_short_codes_unchanged() {
        for name in ["EPSG:4326", "CRS:84", "urn:ogc:def:crs:EPSG::4326", ""] {
            assert_eq!(reference_name(Some(name)), name);
            assert_eq!(reference_name(Some(&reference_name(Some(name)))), name);
        }
    }

    #[test]
    fn test_unknown_shapes_unchanged() {
        let other_authority = "http://www.opengis.net/def/crs/IAU/2015/30100";
        assert_eq!(reference_name(Some(other_authority)), other_authority);

        let too_many = "http://www.opengis.net/def/crs/EPSG/0/4326/extra";
        assert_eq!(reference_name(Some(too_many)), too_many);

        let elsewhere = "http://example.com/crs/EPSG/0/4326";
        assert_eq!(reference_name(Some(elsewhere)), elsewhere);
    }

    #[test]
    fn test_https_prefix() {
        assert_eq!(
            reference_name(Some("https://www.opengis.net/def/crs/EPSG/0/4258")),
            "EPSG:4258"
        );
    }

    #[test]
    fn test_axis_swap_lookup() {
        let swap = vec!["EPSG:4326".to_string()];
        assert!(needs_axis_swap(
            Some("http://www.opengis.net/def/crs/EPSG/0/4326"),
            &swap
        ));
        assert!(!needs_axis_swap(None, &swap));
        assert!(!needs_axis_swap(Some("EPSG:3857"), &swap));
    }

    #[test]
    fn test_axis_order() {
        assert_eq!(AxisOrder::of_reference("EPSG:4326"), AxisOrder::LatLon);
        assert_eq!(AxisOrder::of_reference("CRS:84"), AxisOrder::XY);
        assert_eq!(AxisOrder::from_first_axis("Lat"), AxisOrder::LatLon);
        assert_eq!(AxisOrder::from_first_axis("N"), AxisOrder::LatLon);
        assert_eq!(AxisOrder::from_first_axis("E"), AxisOrder::XY);
        assert_eq!(AxisOrder::LatLon.indices(), (1, 0));
    }

    #[test]
    fn test_is_crs84() {
        assert!(is_crs84(CRS84_URI));
        assert!(is_crs84("CRS:84"));
        assert!(is_crs84(CRS84_URN));
        assert!(!is_crs84("EPSG:4326"));
    }
}
