//! Query parameters for the `/collections/{id}/items` endpoint.
//!
//! [`FeatureQuery`] enumerates every parameter the client understands.
//! Serialization is deterministic: `f` first, then the other parameters in
//! the order of [`FeatureQuery::PARAMETER_ORDER`], then free-form extras in
//! insertion order.

use ogc_common::BoundingBox;

/// Parameters of a feature request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureQuery {
    /// Output format (`f`).
    pub f: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// Serialized `bbox` value.
    pub bbox: Option<String>,
    pub bbox_crs: Option<String>,
    pub datetime: Option<String>,
    pub filter: Option<String>,
    pub filter_crs: Option<String>,
    pub filter_lang: Option<String>,
    /// Response CRS.
    pub crs: Option<String>,
    pub skip_geometry: Option<bool>,
    pub properties: Option<Vec<String>>,
    pub sortby: Option<String>,
    /// Vendor parameters passed through unchanged.
    pub extras: Vec<(String, String)>,
    /// Request headers; not part of the query string.
    pub headers: Vec<(String, String)>,
}

impl FeatureQuery {
    /// Parameter names after `f`, in emission order.
    pub const PARAMETER_ORDER: [&'static str; 12] = [
        "limit",
        "offset",
        "bbox",
        "bbox-crs",
        "datetime",
        "filter",
        "filter-crs",
        "filter-lang",
        "crs",
        "skipGeometry",
        "properties",
        "sortby",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, f: impl Into<String>) -> Self {
        self.f = Some(f.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn bbox(mut self, bbox: &BoundingBox) -> Self {
        self.bbox = Some(bbox.to_query_value());
        self
    }

    pub fn bbox_crs(mut self, crs: impl Into<String>) -> Self {
        self.bbox_crs = Some(crs.into());
        self
    }

    pub fn datetime(mut self, datetime: impl Into<String>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn filter_crs(mut self, crs: impl Into<String>) -> Self {
        self.filter_crs = Some(crs.into());
        self
    }

    pub fn filter_lang(mut self, lang: impl Into<String>) -> Self {
        self.filter_lang = Some(lang.into());
        self
    }

    pub fn crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    pub fn skip_geometry(mut self, skip: bool) -> Self {
        self.skip_geometry = Some(skip);
        self
    }

    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = Some(properties.into_iter().map(Into::into).collect());
        self
    }

    pub fn sortby(mut self, sortby: impl Into<String>) -> Self {
        self.sortby = Some(sortby.into());
        self
    }

    /// Add a passthrough parameter.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of a request header, matched case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Present parameters in emission order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(f) = &self.f {
            pairs.push(("f".to_string(), f.clone()));
        }
        for key in Self::PARAMETER_ORDER {
            if let Some(value) = self.value_of(key) {
                pairs.push((key.to_string(), value));
            }
        }
        pairs.extend(self.extras.iter().cloned());
        pairs
    }

    /// Encoded query string without the leading `?`; empty when nothing is set.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `base` with the query string appended.
    pub fn apply_to(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, query)
        }
    }

    fn value_of(&self, key: &str) -> Option<String> {
        match key {
            "limit" => self.limit.map(|v| v.to_string()),
            "offset" => self.offset.map(|v| v.to_string()),
            "bbox" => self.bbox.clone(),
            "bbox-crs" => self.bbox_crs.clone(),
            "datetime" => self.datetime.clone(),
            "filter" => self.filter.clone(),
            "filter-crs" => self.filter_crs.clone(),
            "filter-lang" => self.filter_lang.clone(),
            "crs" => self.crs.clone(),
            "skipGeometry" => self.skip_geometry.map(|v| v.to_string()),
            "properties" => self.properties.as_ref().map(|p| p.join(",")),
            "sortby" => self.sortby.clone(),
            _ => None,
        }
    }
}

/// Percent-encode a query component, leaving `:`, `/` and `,` readable.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%3A", ":")
        .replace("%2F", "/")
        .replace("%2C", ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_first() {
        let query = FeatureQuery::new().limit(10).crs("EPSG:4326").format("json");
        assert_eq!(query.to_query_string(), "f=json&limit=10&crs=EPSG:4326");
    }

    #[test]
    fn test_enumerated_order_then_extras() {
        let query = FeatureQuery::new()
            .extra("vendor", "x y")
            .sortby("-name")
            .bbox(&BoundingBox::new(3.4, 51.15, 4.0, 51.75))
            .bbox_crs("http://www.opengis.net/def/crs/EPSG/0/4326")
            .skip_geometry(true)
            .extra("another", "1");
        assert_eq!(
            query.to_query_string(),
            "bbox=3.4,51.15,4,51.75\
             &bbox-crs=http://www.opengis.net/def/crs/EPSG/0/4326\
             &skipGeometry=true&sortby=-name&vendor=x%20y&another=1"
        );
    }

    #[test]
    fn test_empty_query() {
        let query = FeatureQuery::new();
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.apply_to("https://x.org/items"), "https://x.org/items");
    }

    #[test]
    fn test_properties_and_filter_encoding() {
        let query = FeatureQuery::new()
            .properties(["name", "height"])
            .filter("name = 'A&B'")
            .filter_lang("cql2-text");
        assert_eq!(
            query.to_query_string(),
            "filter=name%20%3D%20%27A%26B%27&filter-lang=cql2-text&properties=name,height"
        );
    }

    #[test]
    fn test_headers_not_serialized() {
        let query = FeatureQuery::new().header("Accept", "application/geo+json");
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.header_value("accept"), Some("application/geo+json"));
        assert_eq!(query.header_value("x-other"), None);
    }
}
