//! Probe configuration loaded from YAML.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use ogc_common::BoundingBox;
use ogcapi_client::{ClientConfig, DiscoverOptions, FeatureStoreOptions};
use ogcapi_protocol::{media_types, CollectionLinkType};

/// A probe run against one service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeConfig {
    /// Landing page URL.
    pub url: String,

    /// Only list collections with links of this category (items, styles, map, tiles).
    #[serde(default)]
    pub category: Option<String>,

    /// Collection to read features from.
    #[serde(default)]
    pub collection: Option<String>,

    /// Media type of the items link to use.
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default)]
    pub limit: Option<u64>,

    /// `[min_x, min_y, max_x, max_y]` in `bbox_crs` (CRS84 when absent).
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,

    #[serde(default)]
    pub bbox_crs: Option<String>,

    /// CRS URI to request features in.
    #[serde(default)]
    pub crs: Option<String>,

    /// Reference names whose bbox axes are sent lat/lon.
    #[serde(default)]
    pub swap_axes: Vec<String>,

    #[serde(default)]
    pub use_crs84_bounds: bool,

    /// Fetch every tile matrix set definition.
    #[serde(default)]
    pub tile_matrix_sets: bool,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_format() -> String {
    media_types::GEO_JSON.to_string()
}

impl ProbeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            category: None,
            collection: None,
            format: default_format(),
            limit: None,
            bbox: None,
            bbox_crs: None,
            crs: None,
            swap_axes: Vec::new(),
            use_crs84_bounds: false,
            tile_matrix_sets: false,
            headers: BTreeMap::new(),
            timeout_secs: None,
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        let config: ProbeConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse: {}", path.display()))?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            bail!("url must be an http(s) URL: {}", self.url);
        }
        self.link_category()?;
        if let Some(bbox) = self.bounding_box() {
            if bbox.min_x > bbox.max_x || bbox.min_y > bbox.max_y {
                bail!("bbox minimum exceeds maximum: {:?}", self.bbox);
            }
        }
        if self.limit == Some(0) {
            bail!("limit must be > 0");
        }
        Ok(())
    }

    pub fn link_category(&self) -> Result<Option<CollectionLinkType>> {
        self.category
            .as_deref()
            .map(|name| name.parse::<CollectionLinkType>())
            .transpose()
            .context("Invalid category")
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox.map(|b| BoundingBox::new(b[0], b[1], b[2], b[3]))
    }

    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Transport settings: environment first, then file overrides.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        config
    }

    pub fn discover_options(&self) -> Result<DiscoverOptions> {
        Ok(DiscoverOptions {
            filter_collections_by_link_type: self.link_category()?,
            request_headers: self.header_pairs(),
            rewrite: None,
        })
    }

    /// Apply store settings to options derived from a collection.
    pub fn store_options(&self, mut options: FeatureStoreOptions) -> FeatureStoreOptions {
        options.crs = self.crs.clone();
        options.swap_axes = self.swap_axes.clone();
        options.use_crs84_bounds = self.use_crs84_bounds;
        options.request_headers = self.header_pairs();
        options
    }
}
