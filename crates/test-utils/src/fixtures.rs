//! Common test fixtures for OGC API client tests.
//!
//! The documents describe one small synthetic service rooted at
//! [`service::ROOT_URL`]. Hrefs deliberately mix absolute, host-relative,
//! dot-relative and bare-relative forms.

/// Common bounding box definitions for testing.
pub mod bbox {
    /// The Netherlands, lon/lat
    pub const NETHERLANDS: (f64, f64, f64, f64) = (3.4, 51.15, 4.0, 51.75);
}

/// Documents served by the synthetic service.
pub mod service {
    use serde_json::{json, Value};

    pub const HOST: &str = "https://demo.example.org";

    /// Root URL as a user would type it (with a format parameter).
    pub const ROOT_URL: &str = "https://demo.example.org/ogcapi?f=json";

    /// Root URL after normalization.
    pub const BASE_URL: &str = "https://demo.example.org/ogcapi/";

    /// Where the data link of the landing page points, after normalization.
    pub const COLLECTIONS_URL: &str = "https://demo.example.org/ogcapi/collections/";

    /// Where the API description link points, after normalization.
    pub const OPENAPI_URL: &str = "https://demo.example.org/ogcapi/openapi/";

    pub const TILE_MATRIX_SETS_URL: &str = "https://demo.example.org/ogcapi/tileMatrixSets";

    pub const LAKES_ITEMS_URL: &str = "https://demo.example.org/ogcapi/collections/lakes/items";

    pub fn landing_page() -> Value {
        json!({
            "title": "Demo OGC API",
            "description": "Synthetic service used by the test suite",
            "links": [
                {"rel": "self", "type": "application/json", "title": "This document", "href": "https://demo.example.org/ogcapi?f=json"},
                {"rel": "service-desc", "type": "application/vnd.oai.openapi+json;version=3.0", "title": "API definition", "href": "/ogcapi/openapi?f=json"},
                {"rel": "service-doc", "type": "text/html", "title": "API documentation", "href": "/ogcapi/openapi?f=html"},
                {"rel": "conformance", "type": "application/json", "title": "Conformance", "href": "/ogcapi/conformance?f=json"},
                {"rel": "data", "type": "text/html", "title": "Collections", "href": "/ogcapi/collections?f=html"},
                {"rel": "data", "type": "application/json", "title": "Collections", "href": "./ogcapi/collections?f=json"}
            ]
        })
    }

    /// Landing page whose only data link has no media type and no API description.
    pub fn minimal_landing_page() -> Value {
        json!({
            "links": [
                {"rel": "data", "href": "https://demo.example.org/ogcapi/collections"}
            ]
        })
    }

    pub fn openapi() -> Value {
        json!({
            "openapi": "3.0.2",
            "info": {"title": "Demo OGC API", "version": "1.2.0"},
            "paths": {}
        })
    }

    pub fn collections() -> Value {
        json!({
            "links": [],
            "crs": [
                "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
                "http://www.opengis.net/def/crs/EPSG/0/4326"
            ],
            "collections": [
                {
                    "id": "lakes",
                    "title": "Large Lakes",
                    "description": "Lakes of the world, public domain",
                    "keywords": ["lakes", "water bodies"],
                    "extent": {
                        "spatial": {
                            "bbox": [[-180.0, -90.0, 180.0, 90.0]],
                            "crs": "http://www.opengis.net/def/crs/OGC/1.3/CRS84"
                        },
                        "temporal": {"interval": [["2011-11-11T11:11:11Z", null]]}
                    },
                    "crs": [
                        "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
                        "http://www.opengis.net/def/crs/EPSG/0/4326"
                    ],
                    "storageCrs": "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
                    "links": [
                        {"rel": "self", "type": "application/json", "title": "This document", "href": "/ogcapi/collections/lakes?f=json"},
                        {"rel": "items", "type": "application/geo+json", "title": "Items as GeoJSON", "href": "/ogcapi/collections/lakes/items?f=json"},
                        {"rel": "items", "type": "text/html", "title": "Items as HTML", "href": "/ogcapi/collections/lakes/items?f=html"}
                    ]
                },
                {
                    "id": "windmills",
                    "title": "Dutch Windmills",
                    "links": [
                        {"rel": "item", "type": "application/geo+json", "href": "ogcapi/collections/windmills/items"},
                        {"rel": "styles", "href": "ogcapi/collections/windmills/styles"}
                    ]
                },
                {
                    "id": "blue_marble",
                    "title": "Blue Marble",
                    "links": [
                        {"rel": "http://www.opengis.net/def/rel/ogc/1.0/map", "href": "/ogcapi/collections/blue_marble/map"},
                        {"rel": "http://www.opengis.net/def/rel/ogc/1.0/tilesets-map", "type": "application/json", "href": "https://tiles.example.org/blue_marble/map/tiles?f=json"},
                        {"rel": "http://www.opengis.net/def/rel/ogc/1.0/styles", "type": "application/json", "href": "/ogcapi/collections/blue_marble/styles"}
                    ]
                },
                {
                    "name": "countries",
                    "title": "Natural Earth Countries",
                    "links": [
                        {"rel": "items", "href": "/ogcapi/collections/countries/items"},
                        {"rel": "tilesets-map", "type": "application/json", "href": "/ogcapi/collections/countries/map/tiles"},
                        {"rel": "license", "type": "text/html", "href": "https://creativecommons.org/licenses/by/4.0/"}
                    ]
                }
            ]
        })
    }

    pub fn tile_matrix_sets() -> Value {
        json!({
            "tileMatrixSets": [
                {
                    "id": "WorldCRS84Quad",
                    "title": "CRS84 for the World",
                    "links": [
                        {"rel": "self", "type": "text/html", "href": "/ogcapi/tileMatrixSets/WorldCRS84Quad?f=html"},
                        {"rel": "self", "type": "application/json", "href": "/ogcapi/tileMatrixSets/WorldCRS84Quad?f=json"}
                    ]
                },
                {
                    "id": "WorldEPSG4326Quad",
                    "title": "EPSG:4326 for the World, latitude first",
                    "links": [
                        {"rel": "self", "href": "/ogcapi/tileMatrixSets/WorldEPSG4326Quad"}
                    ]
                }
            ]
        })
    }

    /// WorldCRS84Quad with three levels, lon/lat axis order.
    pub fn world_crs84_quad() -> Value {
        json!({
            "id": "WorldCRS84Quad",
            "title": "CRS84 for the World",
            "uri": "http://www.opengis.net/def/tilematrixset/OGC/1.0/WorldCRS84Quad",
            "crs": "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
            "orderedAxes": ["Lon", "Lat"],
            "wellKnownScaleSet": "http://www.opengis.net/def/wkss/OGC/1.0/GoogleCRS84Quad",
            "boundingBox": {
                "lowerLeft": [-180.0, -90.0],
                "upperRight": [180.0, 90.0]
            },
            "tileMatrices": [
                {
                    "id": "0",
                    "scaleDenominator": 279541132.0143589,
                    "cellSize": 0.703125,
                    "cornerOfOrigin": "topLeft",
                    "pointOfOrigin": [-180.0, 90.0],
                    "matrixWidth": 2, "matrixHeight": 1,
                    "tileWidth": 256, "tileHeight": 256
                },
                {
                    "id": "1",
                    "scaleDenominator": 139770566.00717944,
                    "cellSize": 0.3515625,
                    "cornerOfOrigin": "topLeft",
                    "pointOfOrigin": [-180.0, 90.0],
                    "matrixWidth": 4, "matrixHeight": 2,
                    "tileWidth": 256, "tileHeight": 256
                },
                {
                    "id": "2",
                    "scaleDenominator": 69885283.00358972,
                    "cellSize": 0.17578125,
                    "cornerOfOrigin": "topLeft",
                    "pointOfOrigin": [-180.0, 90.0],
                    "matrixWidth": 8, "matrixHeight": 4,
                    "tileWidth": 256, "tileHeight": 256
                }
            ]
        })
    }

    /// Latitude-first set with zero-padded matrix ids and a bottom-left origin.
    pub fn world_epsg4326_quad() -> Value {
        json!({
            "id": "WorldEPSG4326Quad",
            "crs": {"uri": "http://www.opengis.net/def/crs/EPSG/0/4326"},
            "orderedAxes": ["Lat", "Lon"],
            "boundingBox": {
                "lowerLeft": [-90.0, -180.0],
                "upperRight": [90.0, 180.0]
            },
            "tileMatrices": [
                {
                    "id": "00",
                    "scaleDenominator": 279541132.0143589,
                    "cornerOfOrigin": "bottomLeft",
                    "pointOfOrigin": [-90.0, -180.0],
                    "matrixWidth": 2, "matrixHeight": 1,
                    "tileWidth": 256, "tileHeight": 256
                },
                {
                    "id": "01",
                    "scaleDenominator": 139770566.00717944,
                    "cornerOfOrigin": "bottomLeft",
                    "pointOfOrigin": [-90.0, -180.0],
                    "matrixWidth": 4, "matrixHeight": 2,
                    "tileWidth": 256, "tileHeight": 256
                }
            ]
        })
    }

    pub fn lakes_feature_collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "numberMatched": 2,
            "numberReturned": 2,
            "features": [
                {
                    "type": "Feature",
                    "id": 1,
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[3.5, 51.2], [3.9, 51.2], [3.9, 51.6], [3.5, 51.2]]]
                    },
                    "properties": {"name": "Lake One", "scalerank": 0}
                },
                {
                    "type": "Feature",
                    "id": "lake-2",
                    "geometry": {"type": "Point", "coordinates": [3.7, 51.4]},
                    "properties": {"name": "Lake Two"}
                }
            ],
            "links": [
                {"rel": "next", "type": "application/geo+json", "href": "/ogcapi/collections/lakes/items?offset=2"}
            ]
        })
    }

    pub fn lake_feature() -> Value {
        json!({
            "type": "Feature",
            "id": 1,
            "geometry": {
                "type": "Point",
                "coordinates": [3.7, 51.4]
            },
            "properties": {"name": "Lake One"},
            "crs": {"type": "name", "properties": {"name": "http://www.opengis.net/def/crs/OGC/1.3/CRS84"}}
        })
    }
}
