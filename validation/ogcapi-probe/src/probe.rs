//! Probe steps run against a live service.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use ogc_common::crs::DEFAULT_REFERENCE;
use ogc_common::{reference_name, Bounds};
use ogcapi_client::{
    discover, fetch_all_tile_matrix_sets_in_full, CapabilitiesDocument, FeatureStore,
    FeatureStoreOptions, GeoJsonCodec, HttpTransport, IdentityTransformer, TileAddressTranslator,
    TileUrlResolver,
};
use ogcapi_protocol::{tiles_link, FeatureQuery};

use crate::config::ProbeConfig;

/// Service summary.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    pub base_url: String,
    pub version: String,
    pub title: Option<String>,
    pub collections: Vec<CollectionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionRow {
    pub id: String,
    pub title: String,
    pub output_formats: Vec<String>,
    pub storage_crs: Option<String>,
    pub tiles_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileMatrixSetRow {
    pub id: String,
    pub reference: String,
    pub levels: usize,
    pub quad_tree_offset: usize,
    pub sample_tile: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    pub collection: String,
    pub reference: String,
    pub returned: usize,
    pub first_id: Option<String>,
    pub geometry_types: Vec<String>,
}

/// Everything a probe run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub service: ServiceSummary,
    pub tile_matrix_sets: Vec<TileMatrixSetRow>,
    pub features: Option<FeatureSummary>,
}

pub async fn discover_service(
    transport: Arc<dyn HttpTransport>,
    config: &ProbeConfig,
) -> Result<CapabilitiesDocument> {
    let options = config.discover_options()?;
    let caps = discover(transport, &config.url, &options)
        .await
        .with_context(|| format!("Discovery failed for {}", config.url))?;
    info!(collections = caps.collections.len(), "Discovered service");
    Ok(caps)
}

pub fn summarize(caps: &CapabilitiesDocument) -> ServiceSummary {
    let collections = caps
        .collections
        .iter()
        .map(|collection| {
            let tiles = tiles_link(&collection.links, &caps.host_url);
            CollectionRow {
                id: collection.id.clone(),
                title: collection.title.clone(),
                output_formats: collection.output_formats.clone(),
                storage_crs: collection
                    .storage_crs
                    .as_deref()
                    .map(|crs| reference_name(Some(crs))),
                tiles_url: (!tiles.is_empty()).then_some(tiles),
            }
        })
        .collect();

    ServiceSummary {
        base_url: caps.base_url.clone(),
        version: caps.version.clone(),
        title: caps
            .info
            .get("title")
            .and_then(|title| title.as_str())
            .map(str::to_string),
        collections,
    }
}

/// Fetch every tile matrix set and describe how renderers would address it.
pub async fn tile_matrix_sets(caps: &CapabilitiesDocument) -> Result<Vec<TileMatrixSetRow>> {
    let sets = fetch_all_tile_matrix_sets_in_full(caps)
        .await
        .context("Failed to fetch tile matrix sets")?;

    let rows = sets
        .iter()
        .map(|tms| {
            let template = format!("{}{{tileMatrix}}/{{tileRow}}/{{tileCol}}", sample_prefix(caps, &tms.id));
            let translator = TileAddressTranslator::new(tms, template);
            if let Err(e) = &translator {
                warn!(id = %tms.id, error = %e, "Tile matrix set has no numeric levels");
            }
            TileMatrixSetRow {
                id: tms.id.clone(),
                reference: reference_name(tms.crs_uri()),
                levels: tms.level_count(),
                quad_tree_offset: ogc_common::quad_tree_compatible_level_offset(tms),
                sample_tile: translator.ok().and_then(|t| t.resolve(0, 0, 0)),
            }
        })
        .collect();

    Ok(rows)
}

fn sample_prefix(caps: &CapabilitiesDocument, tms_id: &str) -> String {
    let tiled = caps
        .collections
        .iter()
        .map(|collection| tiles_link(&collection.links, &caps.host_url))
        .find(|url| !url.is_empty());
    match tiled {
        Some(url) => format!("{}{}/", url, tms_id),
        None => format!("{}tiles/{}/", caps.base_url, tms_id),
    }
}

/// Read one page of features from the configured collection.
pub async fn features(
    transport: Arc<dyn HttpTransport>,
    caps: &CapabilitiesDocument,
    config: &ProbeConfig,
) -> Result<Option<FeatureSummary>> {
    let Some(id) = config.collection.as_deref() else {
        return Ok(None);
    };
    let collection = caps
        .collection(id)
        .ok_or_else(|| anyhow!("Collection not found: {}", id))?;
    let options = FeatureStoreOptions::for_collection(collection, &config.format)
        .ok_or_else(|| anyhow!("Collection {} has no {} items link", id, config.format))?;

    let store = FeatureStore::new(
        config.store_options(options),
        transport,
        Arc::new(GeoJsonCodec),
        Arc::new(IdentityTransformer),
    );

    let mut query = FeatureQuery::new();
    query.limit = config.limit;

    let cursor = match config.bounding_box() {
        Some(bbox) => {
            let reference = config
                .bbox_crs
                .as_deref()
                .map(|crs| reference_name(Some(crs)))
                .unwrap_or_else(|| DEFAULT_REFERENCE.to_string());
            store
                .spatial_query(&Bounds::new(reference, bbox), &query)
                .await
        }
        None => store.query(&query).await,
    }
    .with_context(|| format!("Feature query failed for {}", id))?;

    let reference = cursor.reference().to_string();
    let features: Vec<_> = cursor.collect();
    let mut geometry_types: Vec<String> = Vec::new();
    for name in features
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .map(|g| g.type_name().to_string())
    {
        if !geometry_types.contains(&name) {
            geometry_types.push(name);
        }
    }

    Ok(Some(FeatureSummary {
        collection: id.to_string(),
        reference,
        returned: features.len(),
        first_id: features
            .first()
            .and_then(|f| f.id.as_ref())
            .map(|id| id.to_string()),
        geometry_types,
    }))
}

/// Run every step the configuration asks for.
pub async fn run(transport: Arc<dyn HttpTransport>, config: &ProbeConfig) -> Result<ProbeReport> {
    config.validate()?;
    let caps = discover_service(Arc::clone(&transport), config).await?;

    let tile_matrix_sets = if config.tile_matrix_sets {
        tile_matrix_sets(&caps).await?
    } else {
        Vec::new()
    };
    let features = features(transport, &caps, config).await?;

    Ok(ProbeReport {
        service: summarize(&caps),
        tile_matrix_sets,
        features,
    })
}
