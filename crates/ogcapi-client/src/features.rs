//! Feature access for one collection's items endpoint.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use ogc_common::crs::{is_crs84, needs_axis_swap, CRS84_URI, CRS84_URN, DEFAULT_REFERENCE};
use ogc_common::url::{clean_url, clean_url_to_asset, format_in_query, strip_extension};
use ogc_common::{reference_name, Bounds, OgcError, OgcResult};
use ogcapi_protocol::{data_link, encode_component, Collection, Extent, Feature, FeatureQuery};

use crate::codec::{DecodeRequest, FeatureCodec, FeatureCursor};
use crate::fetch::{FetchContext, HttpRequest, HttpTransport, RequestRewrite};

/// Transforms bounding boxes between references.
pub trait BoundsTransformer: Send + Sync {
    /// Express `bounds` in `target_reference` (a canonical short name).
    fn transform(&self, bounds: &Bounds, target_reference: &str) -> OgcResult<Bounds>;
}

/// Transformer that only relabels bounds between equivalent references.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl BoundsTransformer for IdentityTransformer {
    fn transform(&self, bounds: &Bounds, target_reference: &str) -> OgcResult<Bounds> {
        if same_reference(&bounds.reference, target_reference) {
            Ok(Bounds::new(target_reference, bounds.bbox))
        } else {
            Err(OgcError::Transform(format!(
                "No transform from {} to {}",
                bounds.reference, target_reference
            )))
        }
    }
}

fn same_reference(a: &str, b: &str) -> bool {
    (is_crs84(a) && is_crs84(b)) || reference_name(Some(a)) == reference_name(Some(b))
}

/// Configuration of a [`FeatureStore`].
#[derive(Clone, Default)]
pub struct FeatureStoreOptions {
    /// Items URL; an `f=` parameter in it becomes the default output format.
    pub data_url: String,

    /// URL prefix of single features; derived from `data_url` when absent.
    pub feature_url: Option<String>,

    /// CRS URI to request features in; CRS84 when absent.
    pub crs: Option<String>,

    /// Media type added to the `Accept` header.
    pub output_format: Option<String>,

    /// Always send `bbox` in CRS84 instead of the store CRS.
    pub use_crs84_bounds: bool,

    /// References (short names) whose `bbox` ordinates are sent lat/lon.
    pub swap_axes: Vec<String>,

    /// Collection extent, used by [`FeatureStore::bounds`].
    pub extent: Option<Extent>,

    /// Headers sent with every request.
    pub request_headers: Vec<(String, String)>,

    pub rewrite: Option<Arc<dyn RequestRewrite>>,
}

impl FeatureStoreOptions {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
            ..Self::default()
        }
    }

    /// Options bound to the items link of `collection` serving `format`.
    pub fn for_collection(collection: &Collection, format: &str) -> Option<Self> {
        let href = data_link(&collection.links, format)?;
        Some(Self {
            data_url: href.to_string(),
            output_format: Some(format.to_string()),
            extent: collection.extent.clone(),
            ..Self::default()
        })
    }

    pub fn with_feature_url(mut self, url: impl Into<String>) -> Self {
        self.feature_url = Some(url.into());
        self
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    pub fn with_crs84_bounds(mut self, enabled: bool) -> Self {
        self.use_crs84_bounds = enabled;
        self
    }

    pub fn with_swap_axes<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.swap_axes = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
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

impl fmt::Debug for FeatureStoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureStoreOptions")
            .field("data_url", &self.data_url)
            .field("feature_url", &self.feature_url)
            .field("crs", &self.crs)
            .field("output_format", &self.output_format)
            .field("use_crs84_bounds", &self.use_crs84_bounds)
            .field("swap_axes", &self.swap_axes)
            .field("rewrite", &self.rewrite.is_some())
            .finish()
    }
}

/// How the response body is adjusted before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyRewrite {
    /// Every CRS84 URI becomes the URN form.
    AllCrs84,
    /// Only `srsName="<CRS84 URI>"` attributes.
    SrsNameOnly,
}

/// Reads features from one items endpoint.
pub struct FeatureStore {
    options: FeatureStoreOptions,
    context: FetchContext,
    codec: Arc<dyn FeatureCodec>,
    transformer: Arc<dyn BoundsTransformer>,
    feature_url: String,
    base_url: String,
    data_format: Option<String>,
    custom_crs: Option<String>,
    reference: String,
}

impl FeatureStore {
    pub fn new(
        options: FeatureStoreOptions,
        transport: Arc<dyn HttpTransport>,
        codec: Arc<dyn FeatureCodec>,
        transformer: Arc<dyn BoundsTransformer>,
    ) -> Self {
        let data_url = options.data_url.clone();
        let feature_url = match &options.feature_url {
            Some(url) => clean_url(url),
            None => clean_url(&strip_extension(&clean_url_to_asset(&data_url))),
        };
        let base_url = data_url.split('?').next().unwrap_or_default().to_string();
        let data_format = format_in_query(&data_url);
        let custom_crs = options
            .crs
            .clone()
            .filter(|crs| crs.as_str() != CRS84_URI);
        let reference = reference_name(options.crs.as_deref());

        let context = FetchContext::new(&data_url, transport)
            .with_rewrite(options.rewrite.clone())
            .with_headers(options.request_headers.clone());

        Self {
            options,
            context,
            codec,
            transformer,
            feature_url,
            base_url,
            data_format,
            custom_crs,
            reference,
        }
    }

    /// Prefix of single-feature URLs, with a trailing slash.
    pub fn feature_url(&self) -> &str {
        &self.feature_url
    }

    /// Items URL without query.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Output format embedded in the configured data URL.
    pub fn data_format(&self) -> Option<&str> {
        self.data_format.as_deref()
    }

    /// Configured CRS, unless it is CRS84.
    pub fn custom_crs(&self) -> Option<&str> {
        self.custom_crs.as_deref()
    }

    /// Short name of the store CRS.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Collection extent expressed in the store reference.
    ///
    /// `None` without an extent or when the transform fails.
    pub fn bounds(&self) -> Option<Bounds> {
        let bbox = self.options.extent.as_ref()?.first_bbox()?;
        let bounds = Bounds::crs84(bbox);
        if same_reference(DEFAULT_REFERENCE, &self.reference) {
            return Some(Bounds::new(self.reference.clone(), bbox));
        }
        self.transformer.transform(&bounds, &self.reference).ok()
    }

    /// Fetch one feature by id. Only `f` and `crs` of `query` are sent.
    #[instrument(skip(self, query), fields(base_url = %self.base_url))]
    pub async fn get(&self, id: &str, query: &FeatureQuery) -> OgcResult<Option<Feature>> {
        let prepared = self.prepare(query);
        let mut params = FeatureQuery::new();
        params.f = prepared.f;
        params.crs = prepared.crs;

        let url = params.apply_to(&format!("{}{}", self.feature_url, encode_component(id)));
        let mut cursor = self.fetch(&url, query, BodyRewrite::AllCrs84).await?;
        Ok(cursor.next())
    }

    /// Fetch one page of features.
    #[instrument(skip(self, query), fields(base_url = %self.base_url))]
    pub async fn query(&self, query: &FeatureQuery) -> OgcResult<FeatureCursor> {
        let url = self.prepare(query).apply_to(&self.base_url);
        self.fetch(&url, query, BodyRewrite::SrsNameOnly).await
    }

    /// Fetch features intersecting `bounds`.
    ///
    /// Any `bbox`/`bbox-crs` already set on `query` is replaced. Bounds are
    /// transformed only when the store emits CRS84 boxes; otherwise they are
    /// sent as given, labelled with the store CRS.
    #[instrument(skip(self, query), fields(base_url = %self.base_url))]
    pub async fn spatial_query(
        &self,
        bounds: &Bounds,
        query: &FeatureQuery,
    ) -> OgcResult<FeatureCursor> {
        let mut params = self.prepare(query);
        params.bbox_crs = None;

        if self.options.use_crs84_bounds {
            let bbox = if is_crs84(&bounds.reference) {
                bounds.bbox
            } else {
                self.transformer.transform(bounds, DEFAULT_REFERENCE)?.bbox
            };
            params.bbox = Some(bbox.to_query_value());
        } else {
            let mut bbox = bounds.bbox;
            if !same_reference(&bounds.reference, &self.reference) {
                debug!(
                    from = %bounds.reference,
                    to = %self.reference,
                    "Sending bbox in caller reference"
                );
            }
            if let Some(crs) = &self.custom_crs {
                params.bbox_crs = Some(crs.clone());
            }
            if needs_axis_swap(self.custom_crs.as_deref(), &self.options.swap_axes) {
                bbox = bbox.swapped();
            }
            params.bbox = Some(bbox.to_query_value());
        }

        let url = params.apply_to(&self.base_url);
        self.fetch(&url, query, BodyRewrite::SrsNameOnly).await
    }

    /// Fill `f` and `crs` from the store configuration when not given.
    fn prepare(&self, query: &FeatureQuery) -> FeatureQuery {
        let mut prepared = query.clone();
        if prepared.f.is_none() {
            prepared.f = self.data_format.clone();
        }
        if prepared.crs.is_none() {
            prepared.crs = self.custom_crs.clone();
        }
        prepared.headers.clear();
        prepared
    }

    /// Store `Accept` parts, then caller `Accept` parts, then the store
    /// output format. Repeated parts are kept once.
    fn accept_header(&self, query: &FeatureQuery) -> Option<String> {
        let configured = self
            .options
            .request_headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("accept"))
            .map(|(_, value)| value.as_str());
        let requested = query.header_value("Accept");
        let format = self.options.output_format.as_deref();

        let mut parts: Vec<&str> = Vec::new();
        let candidates = configured
            .chain(requested)
            .flat_map(|value| value.split(';'))
            .map(str::trim)
            .chain(format);
        for part in candidates {
            if !part.is_empty() && !parts.contains(&part) {
                parts.push(part);
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(";"))
        }
    }

    async fn fetch(
        &self,
        url: &str,
        query: &FeatureQuery,
        body_rewrite: BodyRewrite,
    ) -> OgcResult<FeatureCursor> {
        let mut request = HttpRequest::new(url);
        for (name, value) in &query.headers {
            if !name.eq_ignore_ascii_case("accept") {
                request = request.with_header(name.clone(), value.clone());
            }
        }
        if let Some(accept) = self.accept_header(query) {
            request = request.with_header("Accept", accept);
        }

        let response = self.context.send(request).await?;
        if !response.is_ok() {
            debug!(status = response.status, url = %url, "Feature request failed");
            return Err(OgcError::HttpStatus(response.status));
        }

        let content_crs = response
            .header("content-crs")
            .map(str::to_string)
            .or_else(|| self.custom_crs.clone());
        let content_type = response
            .header("content-type")
            .unwrap_or(ogcapi_protocol::media_types::TEXT)
            .to_string();
        let content_length = response
            .header("content-length")
            .and_then(|value| value.trim().parse::<u64>().ok());

        let text = response.text();
        let content = match body_rewrite {
            BodyRewrite::AllCrs84 => text.replace(CRS84_URI, CRS84_URN),
            BodyRewrite::SrsNameOnly => text.replace(
                &format!("srsName=\"{}\"", CRS84_URI),
                &format!("srsName=\"{}\"", CRS84_URN),
            ),
        };

        let reference = reference_name(content_crs.as_deref());
        debug!(content_type = %content_type, reference = %reference, "Decoding features");

        self.codec.decode(DecodeRequest {
            content,
            content_type,
            content_crs,
            content_length,
            reference,
        })
    }
}

impl fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureStore")
            .field("feature_url", &self.feature_url)
            .field("base_url", &self.base_url)
            .field("data_format", &self.data_format)
            .field("custom_crs", &self.custom_crs)
            .field("reference", &self.reference)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::GeoJsonCodec;
    use crate::fetch::HttpResponse;
    use async_trait::async_trait;
    use ogc_common::BoundingBox;

    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn get(&self, request: HttpRequest) -> OgcResult<HttpResponse> {
            Err(OgcError::Network(format!("unreachable: {}", request.url)))
        }
    }

    fn store(options: FeatureStoreOptions) -> FeatureStore {
        FeatureStore::new(
            options,
            Arc::new(Unreachable),
            Arc::new(GeoJsonCodec),
            Arc::new(IdentityTransformer),
        )
    }

    #[test]
    fn test_derived_urls() {
        let store = store(FeatureStoreOptions::new(
            "https://x.org/collections/lakes/items.json?f=json",
        ));
        assert_eq!(store.feature_url(), "https://x.org/collections/lakes/items/");
        assert_eq!(store.base_url(), "https://x.org/collections/lakes/items.json");
        assert_eq!(store.data_format(), Some("json"));
        assert_eq!(store.custom_crs(), None);
        assert_eq!(store.reference(), "CRS:84");
    }

    #[test]
    fn test_explicit_feature_url_and_crs() {
        let store = store(
            FeatureStoreOptions::new("https://x.org/items")
                .with_feature_url("https://x.org/features?f=json")
                .with_crs("http://www.opengis.net/def/crs/EPSG/0/28992"),
        );
        assert_eq!(store.feature_url(), "https://x.org/features/");
        assert_eq!(store.data_format(), None);
        assert_eq!(
            store.custom_crs(),
            Some("http://www.opengis.net/def/crs/EPSG/0/28992")
        );
        assert_eq!(store.reference(), "EPSG:28992");
    }

    #[test]
    fn test_crs84_is_not_custom() {
        let store = store(FeatureStoreOptions::new("https://x.org/items").with_crs(CRS84_URI));
        assert_eq!(store.custom_crs(), None);
    }

    #[test]
    fn test_accept_merge() {
        let store = store(
            FeatureStoreOptions::new("https://x.org/items").with_output_format("application/geo+json"),
        );
        let query = FeatureQuery::new().header("accept", "application/json; q=0.9");
        assert_eq!(
            store.accept_header(&query).as_deref(),
            Some("application/json;q=0.9;application/geo+json")
        );
        assert_eq!(
            store.accept_header(&FeatureQuery::new()).as_deref(),
            Some("application/geo+json")
        );
    }

    #[test]
    fn test_accept_merge_keeps_store_accept() {
        let configured = store(
            FeatureStoreOptions::new("https://x.org/items")
                .with_output_format("application/geo+json")
                .with_header("ACCEPT", "application/json; application/geo+json"),
        );
        assert_eq!(
            configured.accept_header(&FeatureQuery::new()).as_deref(),
            Some("application/json;application/geo+json")
        );

        let query = FeatureQuery::new().header("Accept", "text/csv");
        assert_eq!(
            configured.accept_header(&query).as_deref(),
            Some("application/json;application/geo+json;text/csv")
        );

        let plain = store(FeatureStoreOptions::new("https://x.org/items"));
        assert_eq!(plain.accept_header(&FeatureQuery::new()), None);
    }

    #[test]
    fn test_bounds_from_extent() {
        let extent: Extent = serde_json::from_str(
            r#"{"spatial": {"bbox": [[3.4, 51.15, 4.0, 51.75]]}}"#,
        )
        .unwrap();
        let crs84 = store(FeatureStoreOptions::new("https://x.org/items").with_extent(extent.clone()));
        assert_eq!(
            crs84.bounds(),
            Some(Bounds::crs84(BoundingBox::new(3.4, 51.15, 4.0, 51.75)))
        );

        let projected = store(
            FeatureStoreOptions::new("https://x.org/items")
                .with_extent(extent)
                .with_crs("http://www.opengis.net/def/crs/EPSG/0/3857"),
        );
        assert_eq!(projected.bounds(), None);
        assert_eq!(store(FeatureStoreOptions::new("https://x.org/items")).bounds(), None);
    }

    #[test]
    fn test_identity_transformer() {
        let bounds = Bounds::new(CRS84_URI, BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        let out = IdentityTransformer.transform(&bounds, "CRS:84").unwrap();
        assert_eq!(out.reference, "CRS:84");
        assert!(IdentityTransformer.transform(&bounds, "EPSG:3857").is_err());
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let store = store(FeatureStoreOptions::new("https://x.org/items"));
        let err = store.query(&FeatureQuery::new()).await.unwrap_err();
        assert!(matches!(err, OgcError::Network(_)));
    }
}
