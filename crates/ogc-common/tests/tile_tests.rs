//! Quad-tree compatibility analysis against generated and fixture pyramids.

use ogc_common::tile::{
    quad_tree_compatible_level_offset, quad_tree_compatible_level_offset_with_tolerance,
    TileMatrixSet,
};
use test_utils::fixtures::service;
use test_utils::{perturb_scale, quad_pyramid};

fn parse(value: serde_json::Value) -> TileMatrixSet {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_exact_pyramid_is_fully_compatible() {
    let tms = parse(quad_pyramid("Quad", 8, 279541132.0143589, 2, 1));
    assert_eq!(quad_tree_compatible_level_offset(&tms), 0);
}

#[test]
fn test_perturbed_level_breaks_pyramid() {
    for level in 0..5 {
        let mut doc = quad_pyramid("Quad", 6, 1_000_000.0, 1, 1);
        perturb_scale(&mut doc, level, 1.0 + 1e-6);
        let tms = parse(doc);
        assert_eq!(
            quad_tree_compatible_level_offset(&tms),
            level + 1,
            "perturbed level {}",
            level
        );
    }
}

#[test]
fn test_perturbation_within_tolerance_is_ignored() {
    let mut doc = quad_pyramid("Quad", 4, 1_000_000.0, 1, 1);
    perturb_scale(&mut doc, 1, 1.0 + 1e-10);
    assert_eq!(quad_tree_compatible_level_offset(&parse(doc)), 0);
}

#[test]
fn test_custom_tolerance() {
    let mut doc = quad_pyramid("Quad", 4, 1_000_000.0, 1, 1);
    perturb_scale(&mut doc, 1, 1.0 + 1e-6);
    let tms = parse(doc);
    assert_eq!(quad_tree_compatible_level_offset(&tms), 2);
    assert_eq!(quad_tree_compatible_level_offset_with_tolerance(&tms, 1e-4), 0);
}

#[test]
fn test_coarse_level_with_wrong_matrix_width() {
    let mut doc = quad_pyramid("Quad", 4, 1_000_000.0, 2, 1);
    doc["tileMatrices"][0]["matrixWidth"] = serde_json::json!(3);
    assert_eq!(quad_tree_compatible_level_offset(&parse(doc)), 1);
}

#[test]
fn test_origin_shift_breaks_pyramid() {
    let mut doc = quad_pyramid("Quad", 4, 1_000_000.0, 1, 1);
    doc["tileMatrices"][1]["pointOfOrigin"] = serde_json::json!([-179.0, 90.0]);
    assert_eq!(quad_tree_compatible_level_offset(&parse(doc)), 2);
}

#[test]
fn test_tile_size_change_breaks_pyramid() {
    let mut doc = quad_pyramid("Quad", 3, 1_000_000.0, 1, 1);
    doc["tileMatrices"][0]["tileWidth"] = serde_json::json!(512);
    assert_eq!(quad_tree_compatible_level_offset(&parse(doc)), 1);
}

#[test]
fn test_fixture_sets() {
    let crs84 = parse(service::world_crs84_quad());
    assert_eq!(crs84.level_count(), 3);
    assert_eq!(quad_tree_compatible_level_offset(&crs84), 0);

    let lat_lon = parse(service::world_epsg4326_quad());
    assert_eq!(lat_lon.level_count(), 2);
    assert_eq!(lat_lon.matrix_for_level(1).unwrap().id, "01");
}
