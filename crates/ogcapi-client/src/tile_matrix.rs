//! Tile matrix set catalog and geometry retrieval.

use futures::future::try_join_all;
use tracing::{debug, instrument};

use ogc_common::url::clean_url;
use ogc_common::{OgcError, OgcResult, TileMatrixSet};
use ogcapi_protocol::{parse_tile_matrix_set, resolve_links, TileMatrixSetCatalog, TileMatrixSetMeta};

use crate::capabilities::CapabilitiesDocument;

/// List the tile matrix sets a service offers. Entry links are absolute.
#[instrument(skip(caps), fields(base_url = %caps.base_url))]
pub async fn list_tile_matrix_sets(caps: &CapabilitiesDocument) -> OgcResult<Vec<TileMatrixSetMeta>> {
    let url = format!("{}tileMatrixSets", caps.base_url);
    let value = caps.context.get_json(&url).await?;
    let catalog = TileMatrixSetCatalog::from_value(&value)?;

    let sets: Vec<TileMatrixSetMeta> = catalog
        .tile_matrix_sets
        .into_iter()
        .map(|meta| TileMatrixSetMeta {
            links: resolve_links(&meta.links, |href| caps.context.complete(href)),
            ..meta
        })
        .collect();

    debug!(count = sets.len(), "Listed tile matrix sets");
    Ok(sets)
}

/// Fetch and validate the definition behind a catalog entry.
#[instrument(skip(caps, meta), fields(id = %meta.id))]
pub async fn fetch_tile_matrix_set(
    caps: &CapabilitiesDocument,
    meta: &TileMatrixSetMeta,
) -> OgcResult<TileMatrixSet> {
    let link = meta
        .json_link()
        .ok_or(OgcError::InvalidTileMatrixSetGeometry)?;
    let url = caps.context.complete(&clean_url(&link.href));
    let value = caps.context.get_json(&url).await?;
    parse_tile_matrix_set(&value)
}

/// List the catalog, then fetch every definition concurrently.
///
/// Fails as a whole when any definition fails.
pub async fn fetch_all_tile_matrix_sets_in_full(
    caps: &CapabilitiesDocument,
) -> OgcResult<Vec<TileMatrixSet>> {
    let sets = list_tile_matrix_sets(caps).await?;
    try_join_all(sets.iter().map(|meta| fetch_tile_matrix_set(caps, meta))).await
}
