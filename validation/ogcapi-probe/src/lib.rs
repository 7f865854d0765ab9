//! Probe for OGC API - Features / Tiles / Maps services.
//!
//! This crate provides tools to:
//! - Discover a service and list its collections
//! - Fetch tile matrix sets and report their quad-tree layout
//! - Run a feature query against one collection
//! - Output results as a console table or JSON

pub mod config;
pub mod probe;
pub mod report;

pub use config::ProbeConfig;
pub use probe::{run, FeatureSummary, ProbeReport, ServiceSummary, TileMatrixSetRow};
pub use report::ProbeReportFormatter;
