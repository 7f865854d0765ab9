//! Async client for OGC API - Features, Tiles and Maps services.
//!
//! The entry point is [`discover`], which reads a service's landing page and
//! returns a [`CapabilitiesDocument`]. From there:
//!
//! - vector data is read through a [`FeatureStore`] bound to a collection's
//!   items link;
//! - tiled layers are resolved with [`list_tile_matrix_sets`] /
//!   [`fetch_tile_matrix_set`] and addressed with a [`TileAddressTranslator`];
//! - map images are requested with a [`MapUrlBuilder`].
//!
//! HTTP is injected through [`HttpTransport`]; [`ReqwestTransport`] is the
//! default implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ogcapi_client::{discover, ClientConfig, DiscoverOptions};
//! use ogcapi_protocol::CollectionLinkType;
//!
//! # async fn run() -> ogc_common::OgcResult<()> {
//! let transport = Arc::new(ClientConfig::from_env().build_transport()?);
//! let options = DiscoverOptions::new().filter_by(CollectionLinkType::Items);
//! let caps = discover(transport, "https://demo.pygeoapi.io/master", &options).await?;
//! for collection in &caps.collections {
//!     println!("{}: {:?}", collection.id, collection.output_formats);
//! }
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod codec;
pub mod config;
pub mod features;
pub mod fetch;
pub mod tile_matrix;
pub mod tiles;

pub use capabilities::{discover, CapabilitiesDocument, DiscoverOptions};
pub use codec::{DecodeRequest, FeatureCodec, FeatureCursor, GeoJsonCodec};
pub use config::ClientConfig;
pub use features::{BoundsTransformer, FeatureStore, FeatureStoreOptions, IdentityTransformer};
pub use fetch::{
    FetchContext, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestRewrite,
};
pub use tile_matrix::{
    fetch_all_tile_matrix_sets_in_full, fetch_tile_matrix_set, list_tile_matrix_sets,
};
pub use tiles::{MapUrlBuilder, TileAddressTranslator, TileUrlResolver};
