//! Service discovery from a landing page.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use ogc_common::url::clean_url;
use ogc_common::OgcResult;
use ogcapi_protocol::{
    normalize_collections, ApiDescription, Collection, CollectionLinkType, CollectionsDocument,
    LandingPage,
};

use crate::fetch::{FetchContext, HttpTransport, RequestRewrite};

/// Options for [`discover`].
#[derive(Clone, Default)]
pub struct DiscoverOptions {
    /// Keep only collections with at least one link of this category, and
    /// read their output formats from those links.
    pub filter_collections_by_link_type: Option<CollectionLinkType>,

    /// Headers attached to every discovery request.
    pub request_headers: Vec<(String, String)>,

    pub rewrite: Option<Arc<dyn RequestRewrite>>,
}

impl DiscoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_by(mut self, category: CollectionLinkType) -> Self {
        self.filter_collections_by_link_type = Some(category);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_rewrite(mut self, rewrite: Arc<dyn RequestRewrite>) -> Self {
        self.rewrite = Some(rewrite);
        self
    }
}

impl fmt::Debug for DiscoverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoverOptions")
            .field(
                "filter_collections_by_link_type",
                &self.filter_collections_by_link_type,
            )
            .field("request_headers", &self.request_headers)
            .field("rewrite", &self.rewrite.is_some())
            .finish()
    }
}

/// What a service offers, as of one discovery round-trip.
#[derive(Debug, Clone)]
pub struct CapabilitiesDocument {
    /// Collections with absolute link hrefs.
    pub collections: Vec<Collection>,

    /// OpenAPI version of the API description; empty when unavailable.
    pub version: String,

    /// `info` object of the API description; empty object when unavailable.
    pub info: Value,

    /// Reference systems declared by the collections document.
    pub crs: Option<Vec<String>>,

    /// Normalized root URL (trailing slash, no query).
    pub base_url: String,

    /// Scheme and host of the root URL; empty for relative roots.
    pub host_url: String,

    /// Context for follow-up requests against the same service.
    pub context: FetchContext,
}

impl CapabilitiesDocument {
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|collection| collection.id == id)
    }
}

/// Discover a service from its landing page URL.
///
/// The collections document and the API description are fetched
/// concurrently. A failing API description is tolerated; every other
/// failure aborts discovery.
#[instrument(skip(transport, options), fields(category = ?options.filter_collections_by_link_type))]
pub async fn discover(
    transport: Arc<dyn HttpTransport>,
    root_url: &str,
    options: &DiscoverOptions,
) -> OgcResult<CapabilitiesDocument> {
    let base_url = clean_url(root_url);
    let context = FetchContext::new(&base_url, transport)
        .with_rewrite(options.rewrite.clone())
        .with_headers(options.request_headers.clone());

    let root = context.get_json(&base_url).await?;
    let landing = LandingPage::from_value(&root)?;

    let data_url = clean_url(&context.complete(&landing.data_link()?.href));
    let api_url = landing
        .api_description_link()
        .map(|link| clean_url(&context.complete(&link.href)));

    debug!(data_url = %data_url, api_url = ?api_url, "Fetching service documents");

    let (data, api) = tokio::join!(context.get_json(&data_url), async {
        match &api_url {
            Some(url) => Some(context.get_json(url).await),
            None => None,
        }
    });

    let data = CollectionsDocument::from_value(&data?);

    let api = match api {
        Some(Ok(value)) => ApiDescription::from_value(&value),
        Some(Err(e)) => {
            warn!(error = %e, "API description unavailable");
            ApiDescription::default()
        }
        None => ApiDescription::default(),
    };

    let collections = normalize_collections(
        data.collections,
        options.filter_collections_by_link_type,
        |href| context.complete(href),
    );

    debug!(count = collections.len(), version = %api.openapi, "Discovered collections");

    Ok(CapabilitiesDocument {
        collections,
        version: api.openapi,
        info: api.info,
        crs: data.crs,
        host_url: context.host().to_string(),
        base_url,
        context,
    })
}
