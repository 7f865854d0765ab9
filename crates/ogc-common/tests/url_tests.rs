//! Tests for URL normalization and CRS naming, including the literal
//! end-to-end scenarios the client relies on.

use ogc_common::crs::reference_name;
use ogc_common::url::{clean_url, host_url, resolve_against_host};

// ============================================================================
// reference_name tests
// ============================================================================

#[test]
fn test_reference_name_epsg_family() {
    for code in ["4326", "3857", "25832", "3035"] {
        let uri = format!("http://www.opengis.net/def/crs/EPSG/0/{}", code);
        assert_eq!(reference_name(Some(&uri)), format!("EPSG:{}", code));
    }
}

#[test]
fn test_reference_name_ogc_family() {
    for (code, expected) in [("CRS84", "CRS:84"), ("CRS84h", "CRS:84h"), ("CRS27", "CRS:27")] {
        let uri = format!("http://www.opengis.net/def/crs/OGC/1.3/{}", code);
        assert_eq!(reference_name(Some(&uri)), expected);
    }
}

#[test]
fn test_reference_name_idempotent_on_results() {
    let inputs = [
        "http://www.opengis.net/def/crs/EPSG/0/4326",
        "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
        "EPSG:28992",
        "CRS:84",
    ];
    for input in inputs {
        let once = reference_name(Some(input));
        assert_eq!(reference_name(Some(&once)), once);
    }
}

#[test]
fn test_reference_name_literal_scenarios() {
    assert_eq!(
        reference_name(Some("http://www.opengis.net/def/crs/EPSG/0/4326")),
        "EPSG:4326"
    );
    assert_eq!(
        reference_name(Some("http://www.opengis.net/def/crs/OGC/1.3/CRS84")),
        "CRS:84"
    );
}

// ============================================================================
// clean_url tests
// ============================================================================

#[test]
fn test_clean_url_variants() {
    let cases = [
        ("http://localhost:8080/api/?f=json", "http://localhost:8080/api/"),
        ("http://localhost:8080/api?f=json", "http://localhost:8080/api/"),
        ("http://localhost:8080/api/", "http://localhost:8080/api/"),
        ("http://localhost:8080/api", "http://localhost:8080/api/"),
        ("http://localhost:8080/some/api/?f=json", "http://localhost:8080/some/api/"),
    ];
    for (input, expected) in cases {
        assert_eq!(clean_url(input), expected, "input: {}", input);
    }
}

#[test]
fn test_clean_url_idempotent() {
    let inputs = [
        "http://localhost:8080/api?f=json",
        "https://demo.example.org/ogcapi//",
        "relative/path?x=1&y=2",
        "/",
    ];
    for input in inputs {
        let once = clean_url(input);
        assert_eq!(clean_url(&once), once);
        assert!(once.ends_with('/'));
        assert!(!once.ends_with("//"));
        assert!(!once.contains('?'));
    }
}

// ============================================================================
// host_url tests
// ============================================================================

#[test]
fn test_host_url_relative() {
    assert_eq!(host_url("../api/user/proxy/auto_123"), "");
    assert_eq!(host_url("/ogcapi/collections"), "");
    assert_eq!(host_url("ftp://example.org/data"), "");
}

#[test]
fn test_host_url_absolute() {
    assert_eq!(host_url("http://localhost:8080/api/x"), "http://localhost:8080");
    assert_eq!(
        host_url("https://demo.pygeoapi.io/master2/"),
        "https://demo.pygeoapi.io"
    );
    assert_eq!(
        host_url("https://test.example.com/cubeserv/demo/ogcapi/EuroRegionalMap/"),
        "https://test.example.com"
    );
}

// ============================================================================
// resolve_against_host tests
// ============================================================================

#[test]
fn test_completion_of_host_relative_path() {
    let host = host_url("https://test.example.com/cubeserv/demo/ogcapi/EuroRegionalMap/");
    assert_eq!(
        resolve_against_host("/cubeserv/demo/ogcapi/EuroRegionalMap/", &host),
        "https://test.example.com/cubeserv/demo/ogcapi/EuroRegionalMap/"
    );
}

#[test]
fn test_completion_with_empty_host() {
    assert_eq!(resolve_against_host("/a", ""), "/a");
    assert_eq!(resolve_against_host("a", ""), "/a");
}
