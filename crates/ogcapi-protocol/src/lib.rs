//! OGC API - Features / Tiles / Maps document types.
//!
//! This crate provides the wire types of the documents an OGC API client
//! reads while discovering a service, plus the pure logic layered on top of
//! them: link classification and feature query construction.
//!
//! # Example
//!
//! ```rust
//! use ogcapi_protocol::{filter_links, CollectionLinkType, FeatureQuery, Link};
//!
//! let links = vec![
//!     Link::new("/collections/lakes/items", "items").with_type("application/geo+json"),
//!     Link::new("/collections/lakes", "self"),
//! ];
//! assert_eq!(filter_links(&links, CollectionLinkType::Items).len(), 1);
//!
//! let query = FeatureQuery::new().limit(10).format("json");
//! assert_eq!(query.to_query_string(), "f=json&limit=10");
//! ```

pub mod collections;
pub mod geojson;
pub mod links;
pub mod queries;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use collections::{normalize_collections, Collection, CollectionsDocument, RawCollection};
pub use geojson::{Feature, FeatureCollection, FeatureId, GeoJson, Geometry};
pub use links::{
    data_link, filter_links, filter_links_by_name, infer_media_type, tiles_link,
    CollectionLinkType, UnknownLinkType,
};
pub use queries::{encode_component, FeatureQuery};
pub use responses::{
    parse_tile_matrix_set, ApiDescription, LandingPage, TileMatrixSetCatalog, TileMatrixSetMeta,
};
pub use types::{lenient_links, resolve_links, Extent, Link, SpatialExtent, TemporalExtent};

/// Media types used by OGC API services
pub mod media_types {
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// GeoJSON media type
    pub const GEO_JSON: &str = "application/geo+json";
    /// HTML media type
    pub const HTML: &str = "text/html";
    /// Default map image type
    pub const PNG: &str = "image/png";
    /// Fallback when a response declares no content type
    pub const TEXT: &str = "text/plain";
}
